pub mod config;
pub mod error;
pub mod types;

pub use config::BuddyConfig;
pub use error::{BuddyError, Result};
pub use types::*;
