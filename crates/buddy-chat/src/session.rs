//! Chat session: the conversation orchestrator behind the chat widget.
//!
//! One session owns the transcript, the input buffer, the recommendation
//! surface and the `Sending` flag for a single open chat panel. Submits run
//! one at a time:
//! - Idle -> Sending (utterance accepted, user message appended)
//! - Sending -> Idle (exactly one bot message appended, success or failure)

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use buddy_core::{Message, Recommendation};

use crate::backend::{resolve_display_name, LearningBackend};
use crate::error::{BackendError, ChatError};
use crate::intent::{classify, extract_count, Intent};
use crate::skill::format_skill_report;
use crate::surface::RecommendationSurface;

/// Preset utterances offered as buttons under the transcript.
pub const QUICK_ACTIONS: [&str; 3] = [
    "Rangkum Hasil Belajar",
    "Rekomendasi Kursus",
    "Skill Apa yang paling berkembang?",
];

const FALLBACK_APOLOGY: &str = "Maaf, saya sedang mengalami gangguan. Coba lagi nanti.";
const NO_RECOMMENDATIONS: &str =
    "Maaf, saya tidak bisa menemukan rekomendasi kursus untuk Anda saat ini.";
const MISSING_IDENTITY: &str = "Email pengguna tidak ditemukan.";
const SKILL_REPORT_MALFORMED: &str =
    "Gagal menganalisis skill untuk pengguna ini. Periksa log untuk detail.";
const SKILL_REPORT_FAILED: &str = "Terjadi kesalahan saat menganalisis skill.";

/// Whether a request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SendState {
    /// Ready to accept a submit.
    Idle,
    /// A backend call is in flight; the typing indicator is on.
    Sending,
}

impl fmt::Display for SendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendState::Idle => write!(f, "Idle"),
            SendState::Sending => write!(f, "Sending"),
        }
    }
}

/// How a completed turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// The question-answer call returned an answer.
    Answer,
    /// Recommendations were fetched and the surface opened.
    Recommendations(usize),
    /// The recommendation call returned nothing usable.
    NoRecommendations,
    /// A backend call failed; the fallback apology was appended.
    Fallback,
    /// A skill report was rendered.
    SkillReport,
    /// The skill analysis failed or came back malformed.
    SkillFailure,
}

/// The bot message appended by a turn, and how it came about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub message: Message,
    pub kind: ReplyKind,
}

#[derive(Debug, Default)]
struct Panel {
    transcript: Vec<Message>,
    input: String,
    surface: RecommendationSurface,
}

/// Clears the `Sending` flag when dropped, whichever way the turn ends.
struct SendingGuard<'a>(&'a AtomicBool);

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// One open chat panel bound to one account.
pub struct ChatSession {
    backend: Arc<dyn LearningBackend>,
    user_email: String,
    display_name: String,
    panel: Mutex<Panel>,
    sending: AtomicBool,
    initial_consumed: AtomicBool,
}

impl ChatSession {
    /// Create a session with an already resolved display name.
    ///
    /// A non-empty name seeds the transcript with the welcome message.
    pub fn new(
        backend: Arc<dyn LearningBackend>,
        user_email: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        let display_name = display_name.into();
        let mut panel = Panel::default();
        if !display_name.is_empty() {
            panel.transcript.push(Message::bot(format!(
                "Halo {}, apa yang bisa saya bantu?",
                display_name
            )));
        }

        Self {
            backend,
            user_email: user_email.into(),
            display_name,
            panel: Mutex::new(panel),
            sending: AtomicBool::new(false),
            initial_consumed: AtomicBool::new(false),
        }
    }

    /// Open a session for an account, resolving its display name first.
    pub async fn open(backend: Arc<dyn LearningBackend>, user_email: impl Into<String>) -> Self {
        let user_email = user_email.into();
        let display_name = if user_email.is_empty() {
            String::new()
        } else {
            resolve_display_name(backend.as_ref(), &user_email).await
        };
        tracing::info!(email = %user_email, name = %display_name, "Chat session opened");
        Self::new(backend, user_email, display_name)
    }

    pub fn user_email(&self) -> &str {
        &self.user_email
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Identity key for per-user endpoints: the email, else the display
    /// name, else empty.
    pub fn identity(&self) -> &str {
        if !self.user_email.is_empty() {
            &self.user_email
        } else {
            &self.display_name
        }
    }

    pub fn state(&self) -> SendState {
        if self.sending.load(Ordering::Acquire) {
            SendState::Sending
        } else {
            SendState::Idle
        }
    }

    pub fn is_sending(&self) -> bool {
        self.state() == SendState::Sending
    }

    /// Snapshot of the transcript.
    pub fn transcript(&self) -> Vec<Message> {
        self.panel().transcript.clone()
    }

    pub fn transcript_len(&self) -> usize {
        self.panel().transcript.len()
    }

    /// Current content of the input buffer.
    pub fn input(&self) -> String {
        self.panel().input.clone()
    }

    pub fn set_input(&self, text: impl Into<String>) {
        self.panel().input = text.into();
    }

    /// Whether the send affordance is enabled.
    pub fn can_send(&self) -> bool {
        !self.is_sending() && !self.panel().input.trim().is_empty()
    }

    pub fn recommendations(&self) -> Vec<Recommendation> {
        self.panel().surface.items().to_vec()
    }

    pub fn is_surface_open(&self) -> bool {
        self.panel().surface.is_open()
    }

    pub fn close_surface(&self) {
        self.panel().surface.close();
    }

    /// Render the recommendation surface, if it is open.
    pub fn render_surface(&self) -> Option<String> {
        self.panel().surface.render(&self.display_name)
    }

    /// Submit the content of the input buffer.
    pub async fn send_input(&self) -> Result<Reply, ChatError> {
        let text = self.input();
        self.send(&text).await
    }

    /// Submit the quick action at `index` (0-based).
    pub async fn send_quick_action(&self, index: usize) -> Result<Reply, ChatError> {
        let label = QUICK_ACTIONS
            .get(index)
            .ok_or(ChatError::UnknownQuickAction(index))?;
        self.send(label).await
    }

    /// Submit an utterance.
    ///
    /// Empty or whitespace-only text and submits while another request is in
    /// flight are refused without touching the transcript. Otherwise exactly
    /// one user and one bot message are appended; backend failures become
    /// the bot message instead of an error.
    pub async fn send(&self, utterance: &str) -> Result<Reply, ChatError> {
        if utterance.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let _guard = self.begin_sending()?;

        {
            let mut panel = self.panel();
            panel.transcript.push(Message::user(utterance));
            panel.input.clear();
        }

        let intent = classify(utterance);
        tracing::debug!(intent = ?intent, "Utterance classified");

        let reply = match intent {
            Intent::Recommendation => self.fetch_recommendations(utterance).await,
            Intent::General => self.answer_question(utterance).await,
        };

        self.panel().transcript.push(reply.message.clone());
        Ok(reply)
    }

    /// Auto-submit a message handed over by the application shell.
    ///
    /// Delivers at most once per session: only when the message is
    /// non-empty and the display name has resolved, and never again after
    /// the first delivery. Returns `None` when nothing was sent.
    pub async fn deliver_initial(&self, message: &str) -> Option<Result<Reply, ChatError>> {
        if message.is_empty() || self.display_name.is_empty() {
            return None;
        }
        if self.initial_consumed.swap(true, Ordering::AcqRel) {
            tracing::debug!("Initial message already delivered, ignoring");
            return None;
        }
        Some(self.send(message).await)
    }

    pub fn initial_consumed(&self) -> bool {
        self.initial_consumed.load(Ordering::Acquire)
    }

    /// Run the skill analysis quick action and append its report.
    ///
    /// Shares the `Sending` flag with [`ChatSession::send`], so it is refused
    /// while a message is in flight. Appends exactly one bot message.
    pub async fn analyze_skills(&self) -> Result<Reply, ChatError> {
        let _guard = self.begin_sending()?;

        let identity = self.identity().to_string();
        let reply = if identity.is_empty() {
            Reply {
                message: Message::bot(MISSING_IDENTITY),
                kind: ReplyKind::SkillFailure,
            }
        } else {
            match self.backend.analyze_skills(&identity).await {
                Ok(report) => match format_skill_report(&report) {
                    Some(text) => Reply {
                        message: Message::bot(text),
                        kind: ReplyKind::SkillReport,
                    },
                    None => {
                        tracing::error!(
                            identity = %identity,
                            report = ?report,
                            "Skill analysis response has no analysis section"
                        );
                        Reply {
                            message: Message::bot(SKILL_REPORT_MALFORMED),
                            kind: ReplyKind::SkillFailure,
                        }
                    }
                },
                Err(e) => {
                    tracing::warn!(identity = %identity, error = %e, "Skill analysis failed");
                    let text = match e {
                        BackendError::Status(text) if !text.is_empty() => text,
                        _ => SKILL_REPORT_FAILED.to_string(),
                    };
                    Reply {
                        message: Message::bot(text),
                        kind: ReplyKind::SkillFailure,
                    }
                }
            }
        };

        self.panel().transcript.push(reply.message.clone());
        Ok(reply)
    }

    // -- Private helpers --

    fn panel(&self) -> MutexGuard<'_, Panel> {
        self.panel.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin_sending(&self) -> Result<SendingGuard<'_>, ChatError> {
        self.sending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ChatError::Busy)?;
        Ok(SendingGuard(&self.sending))
    }

    async fn fetch_recommendations(&self, utterance: &str) -> Reply {
        let top_n = extract_count(utterance);
        let identity = self.identity();

        let recs = match self.backend.recommend(identity, top_n).await {
            Ok(recs) => recs,
            Err(e) => {
                tracing::warn!(identity = %identity, error = %e, "Recommendation fetch failed");
                Vec::new()
            }
        };

        if recs.is_empty() {
            return Reply {
                message: Message::bot(NO_RECOMMENDATIONS),
                kind: ReplyKind::NoRecommendations,
            };
        }

        let count = recs.len();
        tracing::info!(identity = %identity, top_n, count, "Recommendations fetched");
        self.panel().surface.show(recs);
        Reply {
            message: Message::bot(format!(
                "Saya menampilkan {} rekomendasi kursus untuk Anda.",
                count
            )),
            kind: ReplyKind::Recommendations(count),
        }
    }

    async fn answer_question(&self, utterance: &str) -> Reply {
        match self.backend.ask(utterance, &self.user_email).await {
            Ok(answer) => Reply {
                message: Message::bot(answer),
                kind: ReplyKind::Answer,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Question-answer call failed");
                Reply {
                    message: Message::bot(FALLBACK_APOLOGY),
                    kind: ReplyKind::Fallback,
                }
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
