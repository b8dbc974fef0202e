//! Form records exchanged with the forms API

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::forms::Question;

/// Opaque server identifier.
///
/// The server sends ids as JSON numbers today; strings are accepted too so the
/// client never depends on the representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ResourceId(String);

pub type FormId = ResourceId;
pub type QuestionId = ResourceId;
pub type ResponseId = ResourceId;

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => ResourceId(s),
            RawId::Unsigned(n) => ResourceId(n.to_string()),
            RawId::Signed(n) => ResourceId(n.to_string()),
        })
    }
}

/// Entry of the caller's form list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSummary {
    pub form_id: FormId,
    pub title: String,
    #[serde(default)]
    pub response_count: u32,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl FormSummary {
    /// Creation time, if the server sent one we can read
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }

    /// Label shown next to the title
    pub fn status_label(&self) -> &'static str {
        if self.is_published {
            "Published"
        } else {
            "Draft"
        }
    }
}

/// Response body of the list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct FormListResponse {
    #[serde(default)]
    pub forms: Vec<FormSummary>,
}

/// A single form with its questions, as returned by the get endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDetail {
    #[serde(default)]
    pub form_id: Option<FormId>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Request body for create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormPayload {
    pub title: String,
    pub description: Option<String>,
    pub questions: Vec<Question>,
}

/// Form representation echoed by create and update.
///
/// Create and update return different subsets, so only the id is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormRecord {
    pub form_id: FormId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_published: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Request body for the publish endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PublishRequest {
    pub is_published: bool,
}

/// Acknowledgment of a publish change
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PublishAck {
    #[serde(default)]
    pub is_published: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body the API attaches to non-success responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Parse a server timestamp, accepting RFC 3339 and naive ISO 8601 (read as UTC)
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_form_id_from_number() {
        let id: FormId = serde_json::from_str("42").unwrap();
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn test_form_id_from_string() {
        let id: FormId = serde_json::from_str(r#""abc-1""#).unwrap();
        assert_eq!(id, FormId::new("abc-1"));
    }

    #[test]
    fn test_form_id_serializes_as_string() {
        let json = serde_json::to_string(&FormId::new("7")).unwrap();
        assert_eq!(json, r#""7""#);
    }

    #[test]
    fn test_list_response_keeps_server_order() {
        let json = r#"{"forms": [
            {"form_id": 3, "title": "C", "response_count": 2, "is_published": true},
            {"form_id": 1, "title": "A", "created_at": "2024-05-01T10:00:00"}
        ]}"#;
        let parsed: FormListResponse = serde_json::from_str(json).unwrap();

        let ids: Vec<&str> = parsed.forms.iter().map(|f| f.form_id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1"]);
        assert_eq!(parsed.forms[0].response_count, 2);
        assert!(parsed.forms[0].is_published);
        assert_eq!(parsed.forms[1].response_count, 0);
        assert!(!parsed.forms[1].is_published);
    }

    #[test]
    fn test_detail_questions_default_to_empty() {
        let parsed: FormDetail = serde_json::from_str(r#"{"title": "Survey"}"#).unwrap();
        assert!(parsed.questions.is_empty());
        assert!(parsed.description.is_none());
    }

    #[test]
    fn test_detail_with_questions() {
        let json = r#"{
            "form_id": 9,
            "title": "Survey",
            "description": null,
            "questions": [
                {"question_id": 11, "question_text": "Name?", "is_required": true, "display_order": 0}
            ]
        }"#;
        let parsed: FormDetail = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.questions.len(), 1);
        assert_eq!(parsed.questions[0].question_id, Some(QuestionId::new("11")));
        assert_eq!(parsed.questions[0].display_order, 0);
    }

    #[test]
    fn test_record_accepts_partial_echo() {
        let json = r#"{"form_id": 5, "title": "T", "updated_at": "2024-05-01T10:00:00"}"#;
        let parsed: FormRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.form_id, FormId::new("5"));
        assert!(parsed.is_published.is_none());
    }

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let dt = parse_timestamp("2024-05-01T10:30:00+02:00").unwrap();
        assert_eq!(dt.hour(), 8);
    }

    #[test]
    fn test_parse_timestamp_naive() {
        let dt = parse_timestamp("2024-05-01T10:30:00.123456").unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_status_label() {
        let mut form = FormSummary {
            form_id: FormId::new("1"),
            title: "T".to_string(),
            response_count: 0,
            is_published: false,
            created_at: None,
        };
        assert_eq!(form.status_label(), "Draft");
        form.is_published = true;
        assert_eq!(form.status_label(), "Published");
    }
}
