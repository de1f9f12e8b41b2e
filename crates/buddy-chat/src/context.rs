//! Application context: the logged-in user, theme, pending chat message and
//! the open chat session, passed explicitly to whatever renders them.

use std::sync::Arc;

use buddy_core::Theme;

use crate::backend::LearningBackend;
use crate::error::ChatError;
use crate::session::ChatSession;

/// Message queued by the "summarize my progress" shortcut.
pub const SUMMARY_REQUEST: &str =
    "Tolong rangkum hasil belajar saya sejauh ini dan berikan saran langkah selanjutnya.";

/// Shell-level state shared by every view.
///
/// The chat session lives only between `open_chat` and the next logout,
/// user switch or `close_chat`.
pub struct AppContext {
    user_email: String,
    logged_in: bool,
    theme: Theme,
    pending_message: String,
    chat: Option<Arc<ChatSession>>,
}

impl AppContext {
    pub fn new(user_email: impl Into<String>) -> Self {
        Self {
            user_email: user_email.into(),
            logged_in: false,
            theme: Theme::default(),
            pending_message: String::new(),
            chat: None,
        }
    }

    pub fn user_email(&self) -> &str {
        &self.user_email
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn pending_message(&self) -> &str {
        &self.pending_message
    }

    pub fn chat(&self) -> Option<&Arc<ChatSession>> {
        self.chat.as_ref()
    }

    pub fn login(&mut self) {
        self.logged_in = true;
        tracing::info!(email = %self.user_email, "Logged in");
    }

    /// Log out, dropping the chat session and any pending message.
    pub fn logout(&mut self) {
        self.logged_in = false;
        self.pending_message.clear();
        self.chat = None;
        tracing::info!(email = %self.user_email, "Logged out");
    }

    /// Switch the active account. The open chat belongs to the old account
    /// and is closed.
    pub fn switch_user(&mut self, user_email: impl Into<String>) {
        self.user_email = user_email.into();
        self.chat = None;
        tracing::info!(email = %self.user_email, "Active user switched");
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Queue a message for the next chat session to send on open.
    pub fn set_pending_message(&mut self, message: impl Into<String>) {
        self.pending_message = message.into();
    }

    /// Queue the progress-summary request.
    pub fn request_summary(&mut self) {
        self.set_pending_message(SUMMARY_REQUEST);
    }

    /// Open the chat panel for the active user.
    ///
    /// Reuses the open session if there is one. A pending message is
    /// delivered to the session once and then cleared.
    pub async fn open_chat(
        &mut self,
        backend: Arc<dyn LearningBackend>,
    ) -> Result<Arc<ChatSession>, ChatError> {
        if !self.logged_in {
            return Err(ChatError::NotLoggedIn);
        }

        let session = match self.chat.clone() {
            Some(session) => session,
            None => {
                let session = Arc::new(ChatSession::open(backend, self.user_email.clone()).await);
                self.chat = Some(session.clone());
                session
            }
        };

        if !self.pending_message.is_empty() {
            if let Some(result) = session.deliver_initial(&self.pending_message).await {
                self.pending_message.clear();
                if let Err(e) = result {
                    tracing::warn!(error = %e, "Pending chat message was not sent");
                }
            }
        }

        Ok(session)
    }

    /// Close the chat panel, discarding its transcript.
    pub fn close_chat(&mut self) {
        self.chat = None;
    }
}
