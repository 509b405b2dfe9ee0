pub mod constants;
pub mod text;

pub use text::{format_date, truncate_text};
