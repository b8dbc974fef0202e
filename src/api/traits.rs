//! Trait abstraction for the forms API to enable mocking in tests

use async_trait::async_trait;

use super::error::ApiResult;
use crate::state::{
    FormAnalytics, FormDetail, FormId, FormPayload, FormRecord, FormResponse, FormSummary,
    PublishAck, QuestionAnalytics, QuestionId, ResponseId,
};

/// Operations of the forms REST API.
///
/// `token` is the bearer credential read for this call; `None` sends the
/// request unauthenticated and leaves rejecting it to the server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormsApi: Send + Sync {
    /// List the caller's forms in server order
    async fn list_forms(&self, token: Option<String>) -> ApiResult<Vec<FormSummary>>;

    /// Fetch one form with its questions
    async fn get_form(&self, token: Option<String>, form_id: &FormId) -> ApiResult<FormDetail>;

    /// Create a new form
    async fn create_form(
        &self,
        token: Option<String>,
        payload: &FormPayload,
    ) -> ApiResult<FormRecord>;

    /// Replace an existing form
    async fn update_form(
        &self,
        token: Option<String>,
        form_id: &FormId,
        payload: &FormPayload,
    ) -> ApiResult<FormRecord>;

    /// Delete a form
    async fn delete_form(&self, token: Option<String>, form_id: &FormId) -> ApiResult<()>;

    /// Set the publish flag of a form
    async fn set_published(
        &self,
        token: Option<String>,
        form_id: &FormId,
        is_published: bool,
    ) -> ApiResult<PublishAck>;

    /// List the responses submitted to a form
    async fn list_responses(
        &self,
        token: Option<String>,
        form_id: &FormId,
    ) -> ApiResult<Vec<FormResponse>>;

    /// Fetch one response with its answers
    async fn get_response(
        &self,
        token: Option<String>,
        response_id: &ResponseId,
    ) -> ApiResult<FormResponse>;

    /// Delete a response
    async fn delete_response(
        &self,
        token: Option<String>,
        response_id: &ResponseId,
    ) -> ApiResult<()>;

    /// Response statistics of a form
    async fn form_summary(
        &self,
        token: Option<String>,
        form_id: &FormId,
    ) -> ApiResult<FormAnalytics>;

    /// Answer statistics of a question
    async fn question_analytics(
        &self,
        token: Option<String>,
        question_id: &QuestionId,
    ) -> ApiResult<QuestionAnalytics>;

    /// All responses of a form as a spreadsheet (xlsx bytes)
    async fn export_responses(
        &self,
        token: Option<String>,
        form_id: &FormId,
    ) -> ApiResult<Vec<u8>>;
}
