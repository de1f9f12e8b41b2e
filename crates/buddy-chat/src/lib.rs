//! Chat widget engine for the Learning Buddy client.
//!
//! Classifies user utterances, routes them to the learning backend, and
//! keeps the conversation transcript and recommendation surface of one
//! chat session.

pub mod backend;
pub mod context;
pub mod error;
pub mod intent;
pub mod session;
pub mod skill;
pub mod surface;

pub use backend::LearningBackend;
pub use context::AppContext;
pub use error::{BackendError, ChatError};
pub use intent::{classify, extract_count, Intent};
pub use session::{ChatSession, Reply, ReplyKind, SendState, QUICK_ACTIONS};
pub use skill::format_skill_report;
pub use surface::RecommendationSurface;
