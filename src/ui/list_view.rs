//! Plain-text rendering of forms and drafts

use std::fmt::Write;

use crate::controllers::EditorState;
use crate::state::{Draft, FormId, FormSummary};

/// Truncate a string to a maximum length with ellipsis
pub(super) fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Table of the caller's forms, one line per form
pub fn render_forms(forms: &[FormSummary]) -> String {
    if forms.is_empty() {
        return "No forms yet. Create one with `form-builder new`.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8} {:<32} {:>9}  {:<9}  {}",
        "ID", "TITLE", "RESPONSES", "STATUS", "CREATED"
    );
    for form in forms {
        let created = form
            .created_at()
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:<8} {:<32} {:>9}  {:<9}  {}",
            form.form_id.as_str(),
            truncate_str(&form.title, 32),
            form.response_count,
            form.status_label(),
            created
        );
    }
    out
}

/// The draft as the editor shell shows it, questions numbered from 1.
///
/// `form_id` is the form a save would update; `None` for a new form.
pub fn render_draft(draft: &Draft, state: EditorState, form_id: Option<&FormId>) -> String {
    let mut out = String::new();
    let title = if draft.title.is_empty() {
        "(untitled)"
    } else {
        draft.title.as_str()
    };
    // An id without fetched contents means the load failed; saving still updates it
    let label = match (state, form_id) {
        (EditorState::Empty, Some(_)) => "not loaded",
        _ => state.label(),
    };
    let _ = match form_id {
        Some(form_id) => writeln!(out, "{title} [{label}] form {form_id}"),
        None => writeln!(out, "{title} [{label}]"),
    };
    if let Some(description) = draft.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "  {description}");
    }

    if draft.questions().is_empty() {
        let _ = writeln!(out, "  No questions. Use `add` to create one.");
        return out;
    }
    for (i, question) in draft.questions().iter().enumerate() {
        let text = if question.question_text.is_empty() {
            "(no text)"
        } else {
            question.question_text.as_str()
        };
        let required = if question.is_required { " *" } else { "" };
        let _ = writeln!(out, "  {:>2}. {text}{required}", i + 1);
    }
    out
}
