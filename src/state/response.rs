//! Submitted responses and the analytics computed from them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{parse_timestamp, FormId, QuestionId, ResponseId};

/// One answer inside a response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: QuestionId,
    #[serde(default)]
    pub question_text: Option<String>,
    #[serde(default)]
    pub text_answer: Option<String>,
}

/// A respondent's submission to a form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormResponse {
    pub response_id: ResponseId,
    /// Only sent when a single response is fetched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_id: Option<FormId>,
    #[serde(default)]
    pub respondent_email: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<String>,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl FormResponse {
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at.as_deref().and_then(parse_timestamp)
    }
}

/// Response body of the responses listing
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseListResponse {
    #[serde(default)]
    pub responses: Vec<FormResponse>,
}

/// Number of responses submitted on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: String,
    pub count: u32,
}

/// Response statistics of one form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormAnalytics {
    #[serde(default)]
    pub total_responses: u32,
    /// Days with at least one response, oldest first
    #[serde(default)]
    pub response_rate_per_day: Vec<DailyCount>,
    #[serde(default)]
    pub first_response_at: Option<String>,
    #[serde(default)]
    pub latest_response_at: Option<String>,
}

impl FormAnalytics {
    pub fn first_response_at(&self) -> Option<DateTime<Utc>> {
        self.first_response_at.as_deref().and_then(parse_timestamp)
    }

    pub fn latest_response_at(&self) -> Option<DateTime<Utc>> {
        self.latest_response_at.as_deref().and_then(parse_timestamp)
    }

    /// Day with the most responses; the earliest wins a tie
    pub fn busiest_day(&self) -> Option<&DailyCount> {
        self.response_rate_per_day
            .iter()
            .reduce(|best, day| if day.count > best.count { day } else { best })
    }
}

/// How often one distinct answer was given
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerCount {
    #[serde(default)]
    pub text_answer: Option<String>,
    pub count: u32,
}

/// Answer statistics of one question, most common answer first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionAnalytics {
    #[serde(default)]
    pub total_answers: u32,
    #[serde(default)]
    pub common_answers: Vec<AnswerCount>,
}
