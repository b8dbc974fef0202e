//! Form list controller: the caller's forms, publish toggling and deletion

use std::sync::Arc;

use super::{
    ControllerError, LoadOutcome, DELETE_FAILED, FETCH_FORMS_FAILED, UPDATE_STATUS_FAILED,
};
use crate::api::{ApiError, FormsApi};
use crate::auth::CredentialProvider;
use crate::state::{
    apply_delete, apply_toggle, find_form, FormId, FormSummary, RequestGeneration,
};

/// Result of a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The confirmation step declined; nothing was sent
    Cancelled,
}

/// Controller for the list of the caller's forms.
///
/// The cache is replaced by `load` and otherwise only patched after the
/// server acknowledged a publish toggle or delete.
pub struct FormListController<A> {
    api: Arc<A>,
    credentials: Arc<dyn CredentialProvider>,
    forms: Vec<FormSummary>,
    error: Option<String>,
    generation: RequestGeneration,
}

impl<A: FormsApi> FormListController<A> {
    pub fn new(api: Arc<A>, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            api,
            credentials,
            forms: Vec::new(),
            error: None,
            generation: RequestGeneration::new(),
        }
    }

    pub fn forms(&self) -> &[FormSummary] {
        &self.forms
    }

    /// Last error message shown to the user
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetch the caller's forms and replace the cache with them.
    /// A newer `load` supersedes one still in flight.
    pub async fn load(&mut self) -> Result<LoadOutcome, ControllerError> {
        let ticket = self.generation.begin();

        let result = self.api.list_forms(self.credentials.bearer_token()).await;

        if !self.generation.is_current(ticket) {
            tracing::debug!("Discarding stale form list response");
            return Ok(LoadOutcome::Discarded);
        }

        match result {
            Ok(forms) => {
                tracing::debug!(count = forms.len(), "Loaded forms");
                self.forms = forms;
                self.error = None;
                Ok(LoadOutcome::Applied)
            }
            Err(e) => Err(self.fail(e, FETCH_FORMS_FAILED)),
        }
    }

    /// Ask the server to flip the publish flag of `form_id`, then flip the
    /// cached entry. Returns the new flag.
    pub async fn toggle_publish(&mut self, form_id: &FormId) -> Result<bool, ControllerError> {
        let current = find_form(&self.forms, form_id)
            .map(|f| f.is_published)
            .ok_or_else(|| ControllerError::UnknownForm(form_id.clone()))?;

        match self
            .api
            .set_published(self.credentials.bearer_token(), form_id, !current)
            .await
        {
            Ok(ack) => {
                apply_toggle(&mut self.forms, form_id);
                tracing::info!(
                    %form_id,
                    is_published = !current,
                    echoed = ?ack.is_published,
                    message = ack.message.as_deref().unwrap_or(""),
                    "Updated form status"
                );
                Ok(!current)
            }
            Err(e) => Err(self.fail(e, UPDATE_STATUS_FAILED)),
        }
    }

    /// Delete `form_id` once `confirm` agrees, then drop it from the cache
    pub async fn delete<F>(
        &mut self,
        form_id: &FormId,
        confirm: F,
    ) -> Result<DeleteOutcome, ControllerError>
    where
        F: FnOnce(&FormId) -> bool,
    {
        if !confirm(form_id) {
            return Ok(DeleteOutcome::Cancelled);
        }

        match self
            .api
            .delete_form(self.credentials.bearer_token(), form_id)
            .await
        {
            Ok(()) => {
                apply_delete(&mut self.forms, form_id);
                tracing::info!(%form_id, "Deleted form");
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) => Err(self.fail(e, DELETE_FAILED)),
        }
    }

    fn fail(&mut self, source: ApiError, fallback: &str) -> ControllerError {
        let message = source.user_message(fallback);
        tracing::warn!(error = %source, "{message}");
        self.error = Some(message.clone());
        ControllerError::Api { message, source }
    }
}
