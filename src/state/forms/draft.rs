//! Working copy of a form being edited
//!
//! A [`Draft`] holds the title, description and the ordered question list of
//! one editor session. Questions are addressed by position; each also carries a
//! `display_order` that should equal its position. `reorder_questions` always
//! restores that, while `remove_question` only does so under
//! [`DisplayOrderPolicy::Normalize`].

use thiserror::Error;

use super::question::{Question, QuestionEdit};
use crate::state::{FormDetail, FormPayload};

/// Errors from positional edits
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("question index {index} is out of range for {len} questions")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Reasons a draft cannot be submitted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("form title is required")]
    EmptyTitle,
    #[error("question {} needs text", .index + 1)]
    EmptyQuestion { index: usize },
}

/// What happens to display orders when a question is removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayOrderPolicy {
    /// Leave remaining display orders as they are; gaps persist until the next reorder
    #[default]
    Preserve,
    /// Renumber every question to its position after each removal
    Normalize,
}

impl DisplayOrderPolicy {
    pub fn from_normalize_flag(normalize: bool) -> Self {
        if normalize {
            Self::Normalize
        } else {
            Self::Preserve
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub title: String,
    pub description: Option<String>,
    questions: Vec<Question>,
    policy: DisplayOrderPolicy,
}

impl Draft {
    pub fn new(policy: DisplayOrderPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Replace all contents with a fetched form. Server order and display
    /// orders are taken as they are.
    pub fn replace_with(&mut self, detail: FormDetail) {
        self.title = detail.title;
        self.description = detail.description;
        self.questions = detail.questions;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    /// Append a blank question at the end and return its index
    pub fn add_question(&mut self) -> usize {
        let index = self.questions.len();
        self.questions.push(Question::blank(index as u32));
        index
    }

    /// Replace one field of the question at `index`
    pub fn update_question(&mut self, index: usize, edit: QuestionEdit) -> Result<(), DraftError> {
        let len = self.questions.len();
        let question = self
            .questions
            .get_mut(index)
            .ok_or(DraftError::IndexOutOfBounds { index, len })?;
        question.apply(edit);
        Ok(())
    }

    /// Remove and return the question at `index`
    pub fn remove_question(&mut self, index: usize) -> Result<Question, DraftError> {
        self.check_index(index)?;
        let removed = self.questions.remove(index);
        if self.policy == DisplayOrderPolicy::Normalize {
            self.renumber();
        }
        Ok(removed)
    }

    /// Move the question at `from` to position `to`, then renumber every
    /// question to its new position.
    pub fn reorder_questions(&mut self, from: usize, to: usize) -> Result<(), DraftError> {
        self.check_index(from)?;
        self.check_index(to)?;

        let moved = self.questions.remove(from);
        let to = to.min(self.questions.len());
        self.questions.insert(to, moved);
        self.renumber();
        Ok(())
    }

    /// True when display orders are exactly 0..len in position order
    pub fn has_dense_display_order(&self) -> bool {
        self.questions
            .iter()
            .enumerate()
            .all(|(i, q)| q.display_order as usize == i)
    }

    /// Check what submission requires: a title and text on every question
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if let Some(index) = self
            .questions
            .iter()
            .position(|q| q.question_text.trim().is_empty())
        {
            return Err(ValidationError::EmptyQuestion { index });
        }
        Ok(())
    }

    /// Request body for create/update
    pub fn to_payload(&self) -> FormPayload {
        FormPayload {
            title: self.title.clone(),
            description: self.description.clone(),
            questions: self.questions.clone(),
        }
    }

    fn check_index(&self, index: usize) -> Result<(), DraftError> {
        if index < self.questions.len() {
            Ok(())
        } else {
            Err(DraftError::IndexOutOfBounds {
                index,
                len: self.questions.len(),
            })
        }
    }

    fn renumber(&mut self) {
        for (i, question) in self.questions.iter_mut().enumerate() {
            question.display_order = i as u32;
        }
    }
}
