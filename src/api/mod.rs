mod client;
mod comments;
mod error;
mod posts;
mod request;
mod stats;
mod users;

pub use client::QueryClient;
pub use error::ApiError;
pub use request::RequestOptions;
