//! Plain-text rendering of responses and analytics

use std::fmt::Write;

use chrono::{DateTime, Utc};

use super::list_view::truncate_str;
use crate::state::{FormAnalytics, FormResponse, QuestionAnalytics};

fn timestamp(dt: Option<DateTime<Utc>>) -> String {
    dt.map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// One line per response, newest as the server ordered them
pub fn render_responses(responses: &[FormResponse]) -> String {
    if responses.is_empty() {
        return "No responses yet.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8} {:<16}  {:<32} {:>7}",
        "ID", "SUBMITTED", "RESPONDENT", "ANSWERS"
    );
    for response in responses {
        let _ = writeln!(
            out,
            "{:<8} {:<16}  {:<32} {:>7}",
            response.response_id.as_str(),
            timestamp(response.submitted_at()),
            truncate_str(response.respondent_email.as_deref().unwrap_or("anonymous"), 32),
            response.answers.len()
        );
    }
    out
}

/// A single response with every answer
pub fn render_response(response: &FormResponse) -> String {
    let mut out = String::new();
    let _ = write!(out, "Response {}", response.response_id);
    if let Some(form_id) = &response.form_id {
        let _ = write!(out, " to form {form_id}");
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  from {} at {}",
        response.respondent_email.as_deref().unwrap_or("anonymous"),
        timestamp(response.submitted_at())
    );
    for answer in &response.answers {
        let question = answer
            .question_text
            .clone()
            .unwrap_or_else(|| format!("question {}", answer.question_id));
        let _ = writeln!(
            out,
            "  {question}: {}",
            answer.text_answer.as_deref().unwrap_or("(no answer)")
        );
    }
    out
}

/// Totals, first/latest submission and a per-day histogram
pub fn render_summary(summary: &FormAnalytics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total responses: {}", summary.total_responses);
    if summary.total_responses == 0 {
        return out;
    }
    let _ = writeln!(out, "First response:  {}", timestamp(summary.first_response_at()));
    let _ = writeln!(out, "Latest response: {}", timestamp(summary.latest_response_at()));
    if let Some(day) = summary.busiest_day() {
        let _ = writeln!(out, "Busiest day:     {} ({})", day.date, day.count);
    }
    for day in &summary.response_rate_per_day {
        let bar = "#".repeat(day.count.min(50) as usize);
        let _ = writeln!(out, "  {} {:>4} {bar}", day.date, day.count);
    }
    out
}

/// Distinct answers to one question, most common first
pub fn render_question_analytics(analytics: &QuestionAnalytics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total answers: {}", analytics.total_answers);
    for answer in &analytics.common_answers {
        let text = answer.text_answer.as_deref().unwrap_or("(blank)");
        let _ = writeln!(out, "  {:>4}  {}", answer.count, truncate_str(text, 60));
    }
    out
}
