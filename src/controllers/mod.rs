//! Controllers for the form list, the form editor and form responses
//!
//! Each controller owns the local state of one view and talks to the API
//! through an injected [`FormsApi`](crate::api::FormsApi), authenticating
//! every call with a token read from its
//! [`CredentialProvider`](crate::auth::CredentialProvider).

mod error;
mod form_editor;
mod form_list;
mod responses;

pub use error::ControllerError;
pub use form_editor::{EditorState, FormEditorController};
pub use form_list::{DeleteOutcome, FormListController};
pub use responses::ResponsesController;

/// Whether a fetched response was applied or dropped as stale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Discarded,
}

pub(crate) const FETCH_FORMS_FAILED: &str = "Failed to fetch forms";
pub(crate) const UPDATE_STATUS_FAILED: &str = "Failed to update form status";
pub(crate) const DELETE_FAILED: &str = "Failed to delete form";
pub(crate) const FETCH_FORM_FAILED: &str = "Failed to fetch form";
pub(crate) const SAVE_FAILED: &str = "Failed to save form";
pub(crate) const FETCH_RESPONSES_FAILED: &str = "Failed to fetch responses";
pub(crate) const FETCH_RESPONSE_FAILED: &str = "Failed to fetch response";
pub(crate) const DELETE_RESPONSE_FAILED: &str = "Failed to delete response";
pub(crate) const FETCH_ANALYTICS_FAILED: &str = "Failed to fetch analytics";
pub(crate) const EXPORT_FAILED: &str = "Failed to export responses";
