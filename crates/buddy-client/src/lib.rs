//! REST client for the learning backend.
//!
//! [`HttpBackend`] implements [`buddy_chat::LearningBackend`] over the
//! backend's `/chat`, `/recommend`, `/skill` and `/dashboard` routes.

pub mod error;
pub mod http;

pub use error::ClientError;
pub use http::{HttpBackend, SERVER_ERROR_ANSWER};
