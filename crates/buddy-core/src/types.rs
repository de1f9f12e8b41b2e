use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// =============================================================================
// Transcript
// =============================================================================

/// One entry in the chat transcript.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub is_bot: bool,
}

impl Message {
    /// A message typed by the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_bot: false,
        }
    }

    /// A message produced by the assistant.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_bot: true,
        }
    }
}

// =============================================================================
// Backend payloads
// =============================================================================

/// A course recommended by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub course_name: String,
    /// Level label. The backend may send it as a number.
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub course_level_str: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hours_to_study: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Relevance in `0.0..=1.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept a string, number or bool and keep its text; `null` becomes empty.
fn scalar_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(text) => Ok(text),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}

/// Proficiency of the user in one skill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillLevel {
    #[serde(default)]
    pub skill: String,
    #[serde(default)]
    pub proficiency_label: String,
    /// Percentage, `0..=100`.
    #[serde(default)]
    pub proficiency: f64,
}

/// Weakness analysis section of a skill report.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillAnalysis {
    #[serde(default)]
    pub weakness_level: String,
    #[serde(default)]
    pub findings: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Skill development section of a skill report.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillDevelopment {
    #[serde(default)]
    pub most_developed: Option<SkillLevel>,
    #[serde(default)]
    pub top_skills: Vec<SkillLevel>,
}

/// Response of the skill-analysis endpoint.
///
/// `analysis` is optional on the wire; its absence is a malformed report,
/// not an empty one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillAnalysisReport {
    #[serde(default)]
    pub analysis: Option<SkillAnalysis>,
    #[serde(default)]
    pub skill_development: Option<SkillDevelopment>,
}

/// A row of the user directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub email: String,
    #[serde(default)]
    pub name: String,
}

// =============================================================================
// Enums
// =============================================================================

/// Colour theme of the application shell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Local part of an email address (text before `@`), or the whole string
/// when there is no `@`.
pub fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let m = Message::user("halo");
        assert!(!m.is_bot);
        assert_eq!(m.text, "halo");

        let b = Message::bot("hai");
        assert!(b.is_bot);
    }

    #[test]
    fn test_recommendation_optional_fields() {
        let json = r#"{"course_name":"Belajar Dasar AI","course_level_str":"Dasar","hours_to_study":12}"#;
        let rec: Recommendation = serde_json::from_str(json).unwrap();
        assert_eq!(rec.course_name, "Belajar Dasar AI");
        assert_eq!(rec.hours_to_study, 12.0);
        assert!(rec.reason.is_none());
        assert!(rec.score.is_none());

        let out = serde_json::to_string(&rec).unwrap();
        assert!(!out.contains("reason"));
        assert!(!out.contains("score"));
    }

    #[test]
    fn test_recommendation_numeric_level_and_nulls() {
        let json = r#"{"course_name":null,"course_level_str":1,"hours_to_study":null,"score":0.5}"#;
        let rec: Recommendation = serde_json::from_str(json).unwrap();
        assert_eq!(rec.course_name, "");
        assert_eq!(rec.course_level_str, "1");
        assert_eq!(rec.hours_to_study, 0.0);
        assert_eq!(rec.score, Some(0.5));

        let rec: Recommendation =
            serde_json::from_str(r#"{"course_name":"Git","course_level_str":null}"#).unwrap();
        assert_eq!(rec.course_level_str, "");
    }

    #[test]
    fn test_recommendation_rejects_structured_level() {
        let json = r#"{"course_name":"Git","course_level_str":{"id":1}}"#;
        assert!(serde_json::from_str::<Recommendation>(json).is_err());
    }

    #[test]
    fn test_skill_report_without_analysis() {
        let report: SkillAnalysisReport =
            serde_json::from_str(r#"{"detail":"User not found"}"#).unwrap();
        assert!(report.analysis.is_none());
        assert!(report.skill_development.is_none());
    }

    #[test]
    fn test_skill_report_full() {
        let json = r#"{
            "analysis": {"weakness_level": "Sedang", "findings": ["a"], "suggestions": []},
            "skill_development": {
                "most_developed": {"skill": "Python", "proficiency_label": "Mahir", "proficiency": 80},
                "top_skills": [{"skill": "Python", "proficiency_label": "Mahir", "proficiency": 80}]
            }
        }"#;
        let report: SkillAnalysisReport = serde_json::from_str(json).unwrap();
        let analysis = report.analysis.unwrap();
        assert_eq!(analysis.weakness_level, "Sedang");
        assert_eq!(analysis.findings, vec!["a".to_string()]);
        let dev = report.skill_development.unwrap();
        assert_eq!(dev.most_developed.unwrap().proficiency, 80.0);
        assert_eq!(dev.top_skills.len(), 1);
    }

    #[test]
    fn test_theme_toggle_and_serde() {
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
    }

    #[test]
    fn test_email_local_part() {
        assert_eq!(email_local_part("dina.wijaya1@example.com"), "dina.wijaya1");
        assert_eq!(email_local_part("no-at-sign"), "no-at-sign");
        assert_eq!(email_local_part(""), "");
        assert_eq!(email_local_part("@example.com"), "");
    }
}
