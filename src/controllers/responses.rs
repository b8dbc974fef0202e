//! Responses controller: submissions to the caller's forms and their analytics

use std::sync::Arc;

use super::{
    ControllerError, DeleteOutcome, LoadOutcome, DELETE_RESPONSE_FAILED, EXPORT_FAILED,
    FETCH_ANALYTICS_FAILED, FETCH_RESPONSES_FAILED, FETCH_RESPONSE_FAILED,
};
use crate::api::{ApiError, FormsApi};
use crate::auth::CredentialProvider;
use crate::state::{
    FormAnalytics, FormId, FormResponse, QuestionAnalytics, QuestionId, RequestGeneration,
    ResponseId,
};

/// Read-mostly view of the responses to one form.
///
/// Responses are never edited here; the only mutation is deleting one.
pub struct ResponsesController<A> {
    api: Arc<A>,
    credentials: Arc<dyn CredentialProvider>,
    responses: Vec<FormResponse>,
    generation: RequestGeneration,
}

impl<A: FormsApi> ResponsesController<A> {
    pub fn new(api: Arc<A>, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            api,
            credentials,
            responses: Vec::new(),
            generation: RequestGeneration::new(),
        }
    }

    pub fn responses(&self) -> &[FormResponse] {
        &self.responses
    }

    /// Fetch the responses of `form_id` and replace the cache with them
    pub async fn load(&mut self, form_id: &FormId) -> Result<LoadOutcome, ControllerError> {
        let ticket = self.generation.begin();

        let result = self
            .api
            .list_responses(self.credentials.bearer_token(), form_id)
            .await;

        if !self.generation.is_current(ticket) {
            tracing::debug!(%form_id, "Discarding stale responses");
            return Ok(LoadOutcome::Discarded);
        }

        match result {
            Ok(responses) => {
                tracing::debug!(%form_id, count = responses.len(), "Loaded responses");
                self.responses = responses;
                Ok(LoadOutcome::Applied)
            }
            Err(e) => Err(fail(e, FETCH_RESPONSES_FAILED)),
        }
    }

    pub async fn response(
        &self,
        response_id: &ResponseId,
    ) -> Result<FormResponse, ControllerError> {
        self.api
            .get_response(self.credentials.bearer_token(), response_id)
            .await
            .map_err(|e| fail(e, FETCH_RESPONSE_FAILED))
    }

    /// Delete `response_id` once `confirm` agrees, then drop it from the cache
    pub async fn delete<F>(
        &mut self,
        response_id: &ResponseId,
        confirm: F,
    ) -> Result<DeleteOutcome, ControllerError>
    where
        F: FnOnce(&ResponseId) -> bool,
    {
        if !confirm(response_id) {
            return Ok(DeleteOutcome::Cancelled);
        }

        self.api
            .delete_response(self.credentials.bearer_token(), response_id)
            .await
            .map_err(|e| fail(e, DELETE_RESPONSE_FAILED))?;

        self.responses.retain(|r| &r.response_id != response_id);
        tracing::info!(%response_id, "Deleted response");
        Ok(DeleteOutcome::Deleted)
    }

    pub async fn summary(&self, form_id: &FormId) -> Result<FormAnalytics, ControllerError> {
        self.api
            .form_summary(self.credentials.bearer_token(), form_id)
            .await
            .map_err(|e| fail(e, FETCH_ANALYTICS_FAILED))
    }

    pub async fn question_analytics(
        &self,
        question_id: &QuestionId,
    ) -> Result<QuestionAnalytics, ControllerError> {
        self.api
            .question_analytics(self.credentials.bearer_token(), question_id)
            .await
            .map_err(|e| fail(e, FETCH_ANALYTICS_FAILED))
    }

    /// Spreadsheet of every response to `form_id`
    pub async fn export(&self, form_id: &FormId) -> Result<Vec<u8>, ControllerError> {
        let bytes = self
            .api
            .export_responses(self.credentials.bearer_token(), form_id)
            .await
            .map_err(|e| fail(e, EXPORT_FAILED))?;
        tracing::info!(%form_id, size = bytes.len(), "Exported responses");
        Ok(bytes)
    }
}

fn fail(source: ApiError, fallback: &str) -> ControllerError {
    let message = source.user_message(fallback);
    tracing::warn!(error = %source, "{message}");
    ControllerError::Api { message, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockFormsApi;
    use crate::auth::MockCredentialProvider;
    use crate::state::{Answer, DailyCount};
    use pretty_assertions::assert_eq;

    fn credentials() -> Arc<dyn CredentialProvider> {
        let mut credentials = MockCredentialProvider::new();
        credentials
            .expect_bearer_token()
            .returning(|| Some("secret".to_string()));
        Arc::new(credentials)
    }

    fn response(id: &str, answer: &str) -> FormResponse {
        FormResponse {
            response_id: ResponseId::new(id),
            form_id: None,
            respondent_email: None,
            submitted_at: Some("2024-05-01T10:00:00".to_string()),
            answers: vec![Answer {
                question_id: QuestionId::new("11"),
                question_text: Some("Name?".to_string()),
                text_answer: Some(answer.to_string()),
            }],
        }
    }

    fn controller(api: MockFormsApi) -> ResponsesController<MockFormsApi> {
        ResponsesController::new(Arc::new(api), credentials())
    }

    fn ids(controller: &ResponsesController<MockFormsApi>) -> Vec<&str> {
        controller
            .responses()
            .iter()
            .map(|r| r.response_id.as_str())
            .collect()
    }

    mod load {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_load_replaces_cache() {
            let mut api = MockFormsApi::new();
            api.expect_list_responses()
                .withf(|token, id| token.as_deref() == Some("secret") && id.as_str() == "3")
                .times(1)
                .returning(|_, _| Ok(vec![response("41", "Ada"), response("40", "Grace")]));
            let mut controller = controller(api);

            let outcome = controller.load(&FormId::new("3")).await.unwrap();

            assert_eq!(outcome, LoadOutcome::Applied);
            assert_eq!(ids(&controller), vec!["41", "40"]);
        }

        #[tokio::test]
        async fn test_load_failure_uses_server_message() {
            let mut api = MockFormsApi::new();
            api.expect_list_responses().returning(|_, _| {
                Err(ApiError::Status {
                    status: 404,
                    message: Some("Form not found".to_string()),
                })
            });
            let mut controller = controller(api);

            let err = controller.load(&FormId::new("9")).await.unwrap_err();

            assert_eq!(err.to_string(), "Form not found");
            assert!(controller.responses().is_empty());
        }

        #[tokio::test]
        async fn test_load_failure_fallback() {
            let mut api = MockFormsApi::new();
            api.expect_list_responses().returning(|_, _| {
                Err(ApiError::Status {
                    status: 500,
                    message: None,
                })
            });

            let err = controller(api).load(&FormId::new("3")).await.unwrap_err();

            assert_eq!(err.to_string(), "Failed to fetch responses");
        }

        #[tokio::test]
        async fn test_stale_responses_are_discarded() {
            let generation = RequestGeneration::new();
            let handle = generation.clone();
            let mut api = MockFormsApi::new();
            api.expect_list_responses().times(1).returning(move |_, _| {
                handle.invalidate();
                Ok(vec![response("40", "Ada")])
            });
            let mut controller = controller(api);
            controller.generation = generation;

            let outcome = controller.load(&FormId::new("3")).await.unwrap();

            assert_eq!(outcome, LoadOutcome::Discarded);
            assert!(controller.responses().is_empty());
        }
    }

    mod delete {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_delete_drops_cached_response() {
            let mut api = MockFormsApi::new();
            api.expect_list_responses()
                .returning(|_, _| Ok(vec![response("40", "Ada"), response("41", "Grace")]));
            api.expect_delete_response()
                .withf(|_, id| id.as_str() == "40")
                .times(1)
                .returning(|_, _| Ok(()));
            let mut controller = controller(api);
            controller.load(&FormId::new("3")).await.unwrap();

            let outcome = controller
                .delete(&ResponseId::new("40"), |_| true)
                .await
                .unwrap();

            assert_eq!(outcome, DeleteOutcome::Deleted);
            assert_eq!(ids(&controller), vec!["41"]);
        }

        #[tokio::test]
        async fn test_declined_delete_sends_nothing() {
            let mut api = MockFormsApi::new();
            api.expect_delete_response().never();

            let outcome = controller(api)
                .delete(&ResponseId::new("40"), |_| false)
                .await
                .unwrap();

            assert_eq!(outcome, DeleteOutcome::Cancelled);
        }

        #[tokio::test]
        async fn test_delete_failure() {
            let mut api = MockFormsApi::new();
            api.expect_delete_response().returning(|_, _| {
                Err(ApiError::Status {
                    status: 404,
                    message: Some("Response not found".to_string()),
                })
            });

            let err = controller(api)
                .delete(&ResponseId::new("40"), |_| true)
                .await
                .unwrap_err();

            assert_eq!(err.to_string(), "Response not found");
        }
    }

    mod analytics {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_summary() {
            let mut api = MockFormsApi::new();
            api.expect_form_summary()
                .withf(|token, id| token.is_some() && id.as_str() == "3")
                .times(1)
                .returning(|_, _| {
                    Ok(FormAnalytics {
                        total_responses: 2,
                        response_rate_per_day: vec![DailyCount {
                            date: "2024-05-01".to_string(),
                            count: 2,
                        }],
                        ..Default::default()
                    })
                });

            let summary = controller(api).summary(&FormId::new("3")).await.unwrap();

            assert_eq!(summary.total_responses, 2);
        }

        #[tokio::test]
        async fn test_summary_failure_fallback() {
            let mut api = MockFormsApi::new();
            api.expect_form_summary().returning(|_, _| {
                Err(ApiError::Status {
                    status: 500,
                    message: Some("  ".to_string()),
                })
            });

            let err = controller(api)
                .summary(&FormId::new("3"))
                .await
                .unwrap_err();

            assert_eq!(err.to_string(), "Failed to fetch analytics");
        }

        #[tokio::test]
        async fn test_question_analytics() {
            let mut api = MockFormsApi::new();
            api.expect_question_analytics()
                .withf(|_, id| id.as_str() == "11")
                .times(1)
                .returning(|_, _| Ok(QuestionAnalytics::default()));

            let analytics = controller(api)
                .question_analytics(&QuestionId::new("11"))
                .await
                .unwrap();

            assert_eq!(analytics.total_answers, 0);
        }

        #[tokio::test]
        async fn test_single_response() {
            let mut api = MockFormsApi::new();
            api.expect_get_response()
                .withf(|_, id| id.as_str() == "40")
                .returning(|_, _| Ok(response("40", "Ada")));

            let fetched = controller(api)
                .response(&ResponseId::new("40"))
                .await
                .unwrap();

            assert_eq!(fetched, response("40", "Ada"));
        }

        #[tokio::test]
        async fn test_export() {
            let mut api = MockFormsApi::new();
            api.expect_export_responses()
                .times(1)
                .returning(|_, _| Ok(b"PK".to_vec()));

            let bytes = controller(api).export(&FormId::new("3")).await.unwrap();

            assert_eq!(bytes, b"PK".to_vec());
        }
    }
}
