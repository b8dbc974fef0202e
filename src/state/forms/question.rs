//! Question value objects

use serde::{Deserialize, Serialize};

use crate::state::QuestionId;

/// A single question of a form
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Question {
    /// Server-assigned id, carried through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<QuestionId>,
    pub question_text: String,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub display_order: u32,
}

impl Question {
    /// A blank optional question placed at `display_order`
    pub fn blank(display_order: u32) -> Self {
        Self {
            question_id: None,
            question_text: String::new(),
            is_required: false,
            display_order,
        }
    }

    /// Apply a single-field edit
    pub fn apply(&mut self, edit: QuestionEdit) {
        match edit {
            QuestionEdit::Text(text) => self.question_text = text,
            QuestionEdit::Required(required) => self.is_required = required,
        }
    }
}

/// Edit of exactly one user-editable question field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionEdit {
    Text(String),
    Required(bool),
}

impl QuestionEdit {
    /// Name of the field the edit targets, as sent on the wire
    pub fn field_name(&self) -> &'static str {
        match self {
            QuestionEdit::Text(_) => "question_text",
            QuestionEdit::Required(_) => "is_required",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_question() {
        let q = Question::blank(3);
        assert_eq!(q.question_text, "");
        assert!(!q.is_required);
        assert_eq!(q.display_order, 3);
        assert!(q.question_id.is_none());
    }

    #[test]
    fn test_apply_text_leaves_other_fields() {
        let mut q = Question::blank(1);
        q.is_required = true;
        q.apply(QuestionEdit::Text("Email?".to_string()));
        assert_eq!(q.question_text, "Email?");
        assert!(q.is_required);
        assert_eq!(q.display_order, 1);
    }

    #[test]
    fn test_apply_required() {
        let mut q = Question::blank(0);
        q.apply(QuestionEdit::Required(true));
        assert!(q.is_required);
        assert_eq!(q.question_text, "");
    }

    #[test]
    fn test_new_question_omits_id_on_wire() {
        let json = serde_json::to_value(Question::blank(0)).unwrap();
        assert!(json.get("question_id").is_none());
        assert_eq!(json["display_order"], 0);
        assert_eq!(json["is_required"], false);
    }

    #[test]
    fn test_field_names() {
        assert_eq!(QuestionEdit::Text(String::new()).field_name(), "question_text");
        assert_eq!(QuestionEdit::Required(false).field_name(), "is_required");
    }
}
