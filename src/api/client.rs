//! HTTP client for the forms REST API
//!
//! JSON over HTTP(S) with an optional bearer token per request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use super::error::{ApiError, ApiResult};
use super::traits::FormsApi;
use crate::state::{
    FormAnalytics, FormDetail, FormId, FormListResponse, FormPayload, FormRecord, FormResponse,
    FormSummary, PublishAck, PublishRequest, QuestionAnalytics, QuestionId, ResponseId,
    ResponseListResponse,
};

/// Versioned API root below the base URL
const API_PREFIX: [&str; 2] = ["api", "v1"];

// Route groups mounted under the API root
const FORMS: &str = "forms";
const RESPONSES: &str = "responses";
const ANALYTICS: &str = "analytics";

/// Client for the forms, responses and analytics endpoints of one API server
pub struct HttpFormsApi {
    client: Client,
    base_url: Url,
}

impl HttpFormsApi {
    /// Create a client for the server at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(base_url, client)
    }

    fn with_client(base_url: &str, client: Client) -> ApiResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self { client, base_url })
    }

    /// URL of the API root followed by `segments`
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(API_PREFIX).extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url, token: Option<String>) -> RequestBuilder {
        tracing::debug!(%method, %url, authenticated = token.is_some(), "Sending request");
        let builder = self.client.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and decode its JSON body
    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> ApiResult<T> {
        let response = Self::send(builder).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send a request, turning non-success statuses into errors
    async fn send(builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_status(status.as_u16(), &body);
        tracing::warn!(status = status.as_u16(), message = ?err.server_message(), "Request failed");
        Err(err)
    }
}

#[async_trait]
impl FormsApi for HttpFormsApi {
    async fn list_forms(&self, token: Option<String>) -> ApiResult<Vec<FormSummary>> {
        let request = self.request(Method::GET, self.endpoint(&[FORMS]), token);
        let response: FormListResponse = Self::send_json(request).await?;
        Ok(response.forms)
    }

    async fn get_form(&self, token: Option<String>, form_id: &FormId) -> ApiResult<FormDetail> {
        let url = self.endpoint(&[FORMS, form_id.as_str()]);
        Self::send_json(self.request(Method::GET, url, token)).await
    }

    async fn create_form(
        &self,
        token: Option<String>,
        payload: &FormPayload,
    ) -> ApiResult<FormRecord> {
        let request = self
            .request(Method::POST, self.endpoint(&[FORMS]), token)
            .json(payload);
        Self::send_json(request).await
    }

    async fn update_form(
        &self,
        token: Option<String>,
        form_id: &FormId,
        payload: &FormPayload,
    ) -> ApiResult<FormRecord> {
        let request = self
            .request(Method::PUT, self.endpoint(&[FORMS, form_id.as_str()]), token)
            .json(payload);
        Self::send_json(request).await
    }

    async fn delete_form(&self, token: Option<String>, form_id: &FormId) -> ApiResult<()> {
        let url = self.endpoint(&[FORMS, form_id.as_str()]);
        Self::send(self.request(Method::DELETE, url, token)).await?;
        Ok(())
    }

    async fn set_published(
        &self,
        token: Option<String>,
        form_id: &FormId,
        is_published: bool,
    ) -> ApiResult<PublishAck> {
        let url = self.endpoint(&[FORMS, form_id.as_str(), "publish"]);
        let request = self
            .request(Method::PUT, url, token)
            .json(&PublishRequest { is_published });
        let response = Self::send(request).await?;
        // The acknowledgment is informational; an unreadable body still counts as success
        Ok(response.json().await.unwrap_or_default())
    }

    async fn list_responses(
        &self,
        token: Option<String>,
        form_id: &FormId,
    ) -> ApiResult<Vec<FormResponse>> {
        let url = self.endpoint(&[RESPONSES, FORMS, form_id.as_str(), "responses"]);
        let response: ResponseListResponse =
            Self::send_json(self.request(Method::GET, url, token)).await?;
        Ok(response.responses)
    }

    async fn get_response(
        &self,
        token: Option<String>,
        response_id: &ResponseId,
    ) -> ApiResult<FormResponse> {
        let url = self.endpoint(&[RESPONSES, response_id.as_str()]);
        Self::send_json(self.request(Method::GET, url, token)).await
    }

    async fn delete_response(
        &self,
        token: Option<String>,
        response_id: &ResponseId,
    ) -> ApiResult<()> {
        let url = self.endpoint(&[RESPONSES, response_id.as_str()]);
        Self::send(self.request(Method::DELETE, url, token)).await?;
        Ok(())
    }

    async fn form_summary(
        &self,
        token: Option<String>,
        form_id: &FormId,
    ) -> ApiResult<FormAnalytics> {
        let url = self.endpoint(&[ANALYTICS, FORMS, form_id.as_str(), "analytics", "summary"]);
        Self::send_json(self.request(Method::GET, url, token)).await
    }

    async fn question_analytics(
        &self,
        token: Option<String>,
        question_id: &QuestionId,
    ) -> ApiResult<QuestionAnalytics> {
        let url = self.endpoint(&[ANALYTICS, "questions", question_id.as_str(), "analytics"]);
        Self::send_json(self.request(Method::GET, url, token)).await
    }

    async fn export_responses(
        &self,
        token: Option<String>,
        form_id: &FormId,
    ) -> ApiResult<Vec<u8>> {
        let url = self.endpoint(&[ANALYTICS, FORMS, form_id.as_str(), "export"]);
        let response = Self::send(self.request(Method::GET, url, token)).await?;
        Ok(response.bytes().await?.to_vec())
    }
}
