//! Form editor controller: one draft, loaded and submitted as a whole

use std::sync::Arc;

use super::{ControllerError, LoadOutcome, FETCH_FORM_FAILED, SAVE_FAILED};
use crate::api::{ApiError, FormsApi};
use crate::auth::CredentialProvider;
use crate::state::{
    DisplayOrderPolicy, Draft, DraftError, FormId, FormRecord, QuestionEdit, RequestGeneration,
};

/// Lifecycle of an editor session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorState {
    /// New form, nothing fetched
    #[default]
    Empty,
    /// Contents match the fetched form
    Loaded,
    /// Edited since the last load
    Dirty,
    Submitting,
    /// Saved; the session is over
    Done,
    /// The last save failed; editing and saving are allowed again
    Failed,
}

impl EditorState {
    pub fn is_editable(self) -> bool {
        !matches!(self, EditorState::Submitting | EditorState::Done)
    }

    pub fn label(self) -> &'static str {
        match self {
            EditorState::Empty => "new",
            EditorState::Loaded => "loaded",
            EditorState::Dirty => "modified",
            EditorState::Submitting => "saving",
            EditorState::Done => "saved",
            EditorState::Failed => "save failed",
        }
    }
}

/// Controller for creating or updating one form
pub struct FormEditorController<A> {
    api: Arc<A>,
    credentials: Arc<dyn CredentialProvider>,
    form_id: Option<FormId>,
    draft: Draft,
    state: EditorState,
    error: Option<String>,
    generation: RequestGeneration,
}

impl<A: FormsApi> FormEditorController<A> {
    /// Editor for a new form
    pub fn new(
        api: Arc<A>,
        credentials: Arc<dyn CredentialProvider>,
        policy: DisplayOrderPolicy,
    ) -> Self {
        Self {
            api,
            credentials,
            form_id: None,
            draft: Draft::new(policy),
            state: EditorState::Empty,
            error: None,
            generation: RequestGeneration::new(),
        }
    }

    /// Editor for `form_id` if given, fetched right away; otherwise a new form.
    /// A failed fetch is left in [`error`](Self::error) with the draft empty.
    pub async fn open(
        api: Arc<A>,
        credentials: Arc<dyn CredentialProvider>,
        form_id: Option<FormId>,
        policy: DisplayOrderPolicy,
    ) -> Self {
        let mut editor = Self::new(api, credentials, policy);
        if let Some(form_id) = form_id {
            if let Err(e) = editor.load(&form_id).await {
                tracing::debug!(%form_id, error = %e, "Opened editor without form contents");
            }
        }
        editor
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn form_id(&self) -> Option<&FormId> {
        self.form_id.as_ref()
    }

    /// True until a form id is known; submit creates instead of updating
    pub fn is_new(&self) -> bool {
        self.form_id.is_none()
    }

    /// Last error message shown to the user
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Generation handle; invalidate it when the editor goes away
    pub fn session(&self) -> RequestGeneration {
        self.generation.clone()
    }

    /// Fetch `form_id` and replace the draft with it.
    ///
    /// The id is kept even when the fetch fails, so the editor stays bound to
    /// that form and a later submit updates it rather than creating a new one.
    pub async fn load(&mut self, form_id: &FormId) -> Result<LoadOutcome, ControllerError> {
        self.ensure_editable()?;
        self.form_id = Some(form_id.clone());
        let ticket = self.generation.begin();

        let result = self
            .api
            .get_form(self.credentials.bearer_token(), form_id)
            .await;

        if !self.generation.is_current(ticket) {
            tracing::debug!(%form_id, "Discarding stale form response");
            return Ok(LoadOutcome::Discarded);
        }

        match result {
            Ok(detail) => {
                tracing::debug!(
                    %form_id,
                    questions = detail.questions.len(),
                    is_published = detail.is_published,
                    "Loaded form"
                );
                self.draft.replace_with(detail);
                self.state = EditorState::Loaded;
                self.error = None;
                Ok(LoadOutcome::Applied)
            }
            Err(e) => Err(self.fail(e, FETCH_FORM_FAILED)),
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), ControllerError> {
        let title = title.into();
        self.edit(|draft| {
            draft.set_title(title);
            Ok(())
        })
    }

    pub fn set_description(
        &mut self,
        description: impl Into<String>,
    ) -> Result<(), ControllerError> {
        let description = description.into();
        self.edit(|draft| {
            draft.set_description(description);
            Ok(())
        })
    }

    /// Append a blank question; returns its index
    pub fn add_question(&mut self) -> Result<usize, ControllerError> {
        self.edit(|draft| Ok(draft.add_question()))
    }

    pub fn update_question(
        &mut self,
        index: usize,
        edit: QuestionEdit,
    ) -> Result<(), ControllerError> {
        let field = edit.field_name();
        self.edit(|draft| draft.update_question(index, edit))?;
        tracing::debug!(index, field, "Updated question");
        Ok(())
    }

    pub fn remove_question(&mut self, index: usize) -> Result<(), ControllerError> {
        self.edit(|draft| draft.remove_question(index).map(|_| ()))
    }

    /// Move a question to any position and renumber display orders
    pub fn reorder_questions(&mut self, from: usize, to: usize) -> Result<(), ControllerError> {
        self.edit(|draft| draft.reorder_questions(from, to))
    }

    /// Create or update the form from the draft.
    ///
    /// Validation failures send nothing. On success the session is `Done`
    /// and the caller should leave the editor.
    pub async fn submit(&mut self) -> Result<FormRecord, ControllerError> {
        match self.state {
            EditorState::Submitting => return Err(ControllerError::SubmitInFlight),
            EditorState::Done => return Err(ControllerError::NotEditable(EditorState::Done)),
            _ => {}
        }
        if let Err(e) = self.draft.validate() {
            self.error = Some(e.to_string());
            return Err(e.into());
        }

        tracing::debug!(
            form_id = ?self.form_id,
            dense_order = self.draft.has_dense_display_order(),
            "Submitting form"
        );
        self.state = EditorState::Submitting;
        let payload = self.draft.to_payload();
        let token = self.credentials.bearer_token();

        let result = match &self.form_id {
            Some(form_id) => self.api.update_form(token, form_id, &payload).await,
            None => self.api.create_form(token, &payload).await,
        };

        match result {
            Ok(record) => {
                tracing::info!(
                    form_id = %record.form_id,
                    questions = payload.questions.len(),
                    "Saved form"
                );
                self.state = EditorState::Done;
                self.error = None;
                Ok(record)
            }
            Err(e) => {
                self.state = EditorState::Failed;
                Err(self.fail(e, SAVE_FAILED))
            }
        }
    }

    fn ensure_editable(&self) -> Result<(), ControllerError> {
        if self.state.is_editable() {
            Ok(())
        } else {
            Err(ControllerError::NotEditable(self.state))
        }
    }

    fn edit<T>(
        &mut self,
        change: impl FnOnce(&mut Draft) -> Result<T, DraftError>,
    ) -> Result<T, ControllerError> {
        self.ensure_editable()?;
        let out = change(&mut self.draft)?;
        self.state = EditorState::Dirty;
        Ok(out)
    }

    fn fail(&mut self, source: ApiError, fallback: &str) -> ControllerError {
        let message = source.user_message(fallback);
        tracing::warn!(error = %source, "{message}");
        self.error = Some(message.clone());
        ControllerError::Api { message, source }
    }
}
