//! Data access and query composition for the BlogView dashboard.
//!
//! [`QueryClient`] lists, searches, pages, filters and sorts posts and users from
//! a demo blog API, fetches details with their related records, and sends the
//! mutations. [`validation`] checks form payloads before they are sent.

pub mod api;
pub mod common;
pub mod filters;
pub mod likes;
pub mod models;
pub mod query_state;
pub mod render;
pub mod settings;
pub mod validation;

pub use api::{ApiError, QueryClient, RequestOptions};
pub use filters::{PostSort, UserSort};
pub use likes::{ReactionUpdate, Reconciled};
pub use models::{
    normalize_reactions, Comment, CommentDraft, CommentThread, DashboardStats, PagedResult, Post,
    PostDraft, PostPatch, User, UserDraft, UserPatch, UserRef,
};
pub use query_state::{ListOptions, PostQueryState, QueryAction, QueryState, UserQueryState};
pub use validation::{validate_form, FieldRules, FormRules, ValidationResult};
