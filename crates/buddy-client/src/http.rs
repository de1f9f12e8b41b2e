use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use buddy_chat::{BackendError, LearningBackend};
use buddy_core::config::ApiConfig;
use buddy_core::{Recommendation, SkillAnalysisReport, UserSummary};

use crate::error::ClientError;

/// Answer used when `/chat/ask` responds without an answer.
pub const SERVER_ERROR_ANSWER: &str = "Maaf, terjadi kesalahan di server.";

#[derive(Debug, Serialize)]
struct AskRequest<'a> {
    question: &'a str,
    user_email: &'a str,
}

#[derive(Debug, Deserialize)]
struct AskResponse {
    #[serde(default)]
    answer: Option<String>,
}

/// HTTP implementation of the learning backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Create a client for the backend at `base_url`.
    ///
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        let mut builder =
            Client::builder().user_agent(concat!("learning-buddy/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ClientError> {
        let timeout = (config.timeout_secs > 0).then(|| Duration::from_secs(config.timeout_secs));
        Self::new(&config.base_url, timeout)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `POST /chat/ask`
    pub async fn ask_question(&self, question: &str, user_email: &str) -> Result<String, ClientError> {
        let url = self.endpoint(&["chat", "ask"])?;
        let resp = self
            .client
            .post(url)
            .json(&AskRequest {
                question,
                user_email,
            })
            .send()
            .await?;

        let status = resp.status();
        let body: AskResponse = resp.json().await?;
        match body.answer.filter(|a| !a.is_empty()) {
            Some(answer) => Ok(answer),
            None => {
                tracing::warn!(status = %status, "Chat response carried no answer");
                Ok(SERVER_ERROR_ANSWER.to_string())
            }
        }
    }

    /// `GET /recommend/smart/{identifier}?top_n=N`
    ///
    /// A body whose `recommendation` field is missing or not an array
    /// yields an empty list.
    pub async fn smart_recommendations(
        &self,
        identifier: &str,
        top_n: u32,
    ) -> Result<Vec<Recommendation>, ClientError> {
        let mut url = self.endpoint(&["recommend", "smart", identifier])?;
        url.query_pairs_mut()
            .append_pair("top_n", &top_n.to_string());

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::status("recommendations", status));
        }

        let body: Value = resp.json().await?;
        match body {
            Value::Object(mut map) => match map.remove("recommendation") {
                Some(items @ Value::Array(_)) => {
                    serde_json::from_value(items).map_err(|e| ClientError::Decode(e.to_string()))
                }
                _ => Ok(Vec::new()),
            },
            _ => Ok(Vec::new()),
        }
    }

    /// `GET /skill/analyze/{user_email}`
    ///
    /// A success body that is not a report object decodes as an empty
    /// report, which callers treat as malformed.
    pub async fn skill_analysis(&self, user_email: &str) -> Result<SkillAnalysisReport, ClientError> {
        let url = self.endpoint(&["skill", "analyze", user_email])?;
        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %text, "Skill analysis request failed");
            return Err(ClientError::status("skill analysis", status));
        }

        let body: Value = resp.json().await?;
        Ok(serde_json::from_value(body).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Skill analysis body has an unexpected shape");
            SkillAnalysisReport::default()
        }))
    }

    /// `GET /dashboard/users`
    pub async fn users(&self) -> Result<Vec<UserSummary>, ClientError> {
        let url = self.endpoint(&["dashboard", "users"])?;
        let users = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(users)
    }

    /// Base URL with `segments` appended as path segments.
    ///
    /// Characters that would change the path structure (`/`, `?`, `#`, space
    /// and friends) are percent-encoded; `@` stays literal, which servers
    /// decode the same as `%40`.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl LearningBackend for HttpBackend {
    async fn ask(&self, question: &str, user_email: &str) -> Result<String, BackendError> {
        Ok(self.ask_question(question, user_email).await?)
    }

    async fn recommend(
        &self,
        identifier: &str,
        top_n: u32,
    ) -> Result<Vec<Recommendation>, BackendError> {
        Ok(self.smart_recommendations(identifier, top_n).await?)
    }

    async fn analyze_skills(&self, user_email: &str) -> Result<SkillAnalysisReport, BackendError> {
        Ok(self.skill_analysis(user_email).await?)
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>, BackendError> {
        Ok(self.users().await?)
    }
}
