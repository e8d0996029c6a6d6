//! HTTP client for the campaign backend REST API

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::client::{AddGroupMembersRequest, CustomerListResponse, CustomerQuery, ImportResult};
use shared::models::{CustomerId, Group, GroupId};
use shared::response::ApiResponse;

use crate::api::CampaignApi;
use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client for making network requests to the campaign backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        }
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Make a GET request
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<ApiResponse<T>> {
        let mut request = self.client.get(self.url(path)).query(query);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<ApiResponse<T>> {
        let mut request = self.client.post(self.url(path)).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request without body
    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<ApiResponse<T>> {
        let mut request = self.client.post(self.url(path));

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<ApiResponse<T>> {
        let mut request = self.client.delete(self.url(path));

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> ClientResult<ApiResponse<T>> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(text)),
                _ => Err(ClientError::Internal(text)),
            };
        }

        response.json().await.map_err(Into::into)
    }

    /// Unwrap the envelope: error codes become `ClientError::Backend`,
    /// a success without payload is an invalid response.
    fn unwrap_results<T>(resp: ApiResponse<T>, what: &str) -> ClientResult<T> {
        if !resp.is_success() {
            return Err(ClientError::Backend {
                code: resp.code,
                message: resp.message,
            });
        }
        resp.results
            .ok_or_else(|| ClientError::InvalidResponse(format!("Missing {} data", what)))
    }

    /// Check an envelope of a call whose payload is irrelevant
    fn check_ok(resp: ApiResponse<serde_json::Value>) -> ClientResult<()> {
        if !resp.is_success() {
            return Err(ClientError::Backend {
                code: resp.code,
                message: resp.message,
            });
        }
        Ok(())
    }

    // ========== Customer Import / Validation ==========

    /// Import customers from a CSV file, optionally straight into a group
    pub async fn import_customers(
        &self,
        csv: Vec<u8>,
        filename: impl Into<String>,
        group_id: Option<GroupId>,
    ) -> ClientResult<ImportResult> {
        let file = reqwest::multipart::Part::bytes(csv)
            .file_name(filename.into())
            .mime_str("text/csv")?;
        let mut form = reqwest::multipart::Form::new().part("file", file);
        if let Some(group_id) = group_id {
            form = form.text("group_id", group_id.to_string());
        }

        let mut request = self
            .client
            .post(self.url("campaign/customers/import"))
            .multipart(form);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        let resp: ApiResponse<ImportResult> = Self::handle_response(response).await?;
        Self::unwrap_results(resp, "import")
    }

    /// Trigger upstream revalidation of one customer's phone/WhatsApp
    /// status. Readiness itself is always recomputed server-side.
    pub async fn validate_customer(&self, customer_id: CustomerId) -> ClientResult<()> {
        let resp = self
            .post_empty(&format!("campaign/customers/{}/validate", customer_id))
            .await?;
        Self::check_ok(resp)
    }

    /// Trigger revalidation of all pending customers
    pub async fn validate_pending_customers(&self) -> ClientResult<()> {
        let resp = self
            .post_empty("campaign/customers/validate-pending")
            .await?;
        Self::check_ok(resp)
    }
}

#[async_trait]
impl CampaignApi for HttpClient {
    async fn list_customers(&self, query: &CustomerQuery) -> ClientResult<CustomerListResponse> {
        let resp = self
            .get("campaign/customers", &query.to_query_pairs())
            .await?;
        Self::unwrap_results(resp, "customer list")
    }

    async fn get_group(&self, group_id: GroupId) -> ClientResult<Group> {
        let resp = self.get(&format!("campaign/groups/{}", group_id), &[]).await?;
        Self::unwrap_results(resp, "group")
    }

    async fn add_group_members(
        &self,
        group_id: GroupId,
        customer_ids: &[CustomerId],
    ) -> ClientResult<()> {
        let body = AddGroupMembersRequest {
            customer_ids: customer_ids.to_vec(),
        };
        let resp = self
            .post(&format!("campaign/groups/{}/members", group_id), &body)
            .await?;
        Self::check_ok(resp)
    }

    async fn remove_group_member(
        &self,
        group_id: GroupId,
        customer_id: CustomerId,
    ) -> ClientResult<()> {
        let resp = self
            .delete(&format!("campaign/groups/{}/members/{}", group_id, customer_id))
            .await?;
        Self::check_ok(resp)
    }
}
