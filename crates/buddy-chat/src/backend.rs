//! Backend collaborator trait.
//!
//! The chat session never talks HTTP itself. It calls a [`LearningBackend`],
//! which `buddy-client` implements over REST and tests replace with fakes.

use async_trait::async_trait;
use buddy_core::{email_local_part, Recommendation, SkillAnalysisReport, UserSummary};

use crate::error::BackendError;

/// Calls the chat widget makes against the learning backend.
#[async_trait]
pub trait LearningBackend: Send + Sync {
    /// Answer a free-text question for the given account.
    async fn ask(&self, question: &str, user_email: &str) -> Result<String, BackendError>;

    /// Fetch up to `top_n` course recommendations for an identity key.
    async fn recommend(
        &self,
        identifier: &str,
        top_n: u32,
    ) -> Result<Vec<Recommendation>, BackendError>;

    /// Run the skill analysis for an account.
    async fn analyze_skills(&self, user_email: &str) -> Result<SkillAnalysisReport, BackendError>;

    /// List known users, used to resolve display names.
    async fn list_users(&self) -> Result<Vec<UserSummary>, BackendError>;
}

/// Resolve the display name for an account email.
///
/// Falls back to the local part of the email when the lookup fails or the
/// account is not listed.
pub async fn resolve_display_name(backend: &dyn LearningBackend, email: &str) -> String {
    match backend.list_users().await {
        Ok(users) => match users.into_iter().find(|u| u.email == email) {
            Some(user) => user.name,
            None => {
                tracing::debug!(email = %email, "User not in directory, using email local part");
                email_local_part(email).to_string()
            }
        },
        Err(e) => {
            tracing::warn!(email = %email, error = %e, "Failed to fetch user name");
            email_local_part(email).to_string()
        }
    }
}
