//! Errors surfaced by the controllers

use thiserror::Error;

use super::EditorState;
use crate::api::ApiError;
use crate::state::{DraftError, FormId, ValidationError};

#[derive(Debug, Error)]
pub enum ControllerError {
    /// A request failed; `message` is what the user sees
    #[error("{message}")]
    Api {
        message: String,
        #[source]
        source: ApiError,
    },

    #[error(transparent)]
    Draft(#[from] DraftError),

    /// Submission blocked before any request was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("form {0} is not in the list")]
    UnknownForm(FormId),

    #[error("a save is already in progress")]
    SubmitInFlight,

    #[error("the form can no longer be edited ({})", .0.label())]
    NotEditable(EditorState),
}

impl ControllerError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ControllerError::Validation(_))
    }
}
