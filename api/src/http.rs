//! `reqwest` implementation of [`WalletBackend`].

use async_trait::async_trait;
use bux_types::{Contact, LoggedInUser, NewTransaction, Transaction};
use reqwest::header::CACHE_CONTROL;
use reqwest::{RequestBuilder, Url};
use serde_json::Value;
use std::time::Duration;

use crate::backend::{ConfirmContact, LoginRequest, WalletBackend};
use crate::error::ApiError;
use crate::pagination::PaginationParams;
use crate::response::{decode, error_message, parse_body, transactions_from};

/// HTTP client for the wallet backend.
///
/// Holds a cookie store so the session cookie set by login is attached to
/// every later request.
#[derive(Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    api_url: Url,
}

impl HttpBackend {
    /// Create a client targeting `api_url` (e.g. `https://wallet.example.com/api/v1`).
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let api_url = Url::parse(api_url)
            .map_err(|e| ApiError::Transport(format!("invalid api url {api_url:?}: {e}")))?;
        if api_url.cannot_be_a_base() {
            return Err(ApiError::Transport(format!("api url {api_url} cannot be a base")));
        }
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { http, api_url })
    }

    /// The configured API base URL.
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Base URL joined with percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn get(&self, segments: &[&str]) -> RequestBuilder {
        self.http
            .get(self.endpoint(segments))
            .header(CACHE_CONTROL, "no-store, no-cache")
    }

    /// Send one request and return its raw body, classifying non-2xx statuses.
    ///
    /// Success is decided by the status alone; the body is not inspected.
    async fn execute(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        let url = response.url().path().to_string();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), path = %url, "backend request failed");
            return Err(ApiError::from_status(status.as_u16(), error_message(&text)));
        }
        tracing::debug!(status = status.as_u16(), path = %url, "backend request ok");
        Ok(text)
    }

    /// [`execute`](Self::execute) for endpoints whose payload is read.
    async fn execute_json(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        parse_body(&self.execute(request).await?)
    }

    /// [`execute`](Self::execute) for endpoints where only the status matters.
    async fn execute_unit(&self, request: RequestBuilder) -> Result<(), ApiError> {
        self.execute(request).await.map(|_| ())
    }
}

#[async_trait]
impl WalletBackend for HttpBackend {
    async fn current_user(&self) -> Result<LoggedInUser, ApiError> {
        let body = self.execute_json(self.get(&["user"])).await?;
        decode(body, "user")
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoggedInUser, ApiError> {
        let body = self
            .execute_json(self.http.post(self.endpoint(&["user", "login"])).json(request))
            .await?;
        decode(body, "user")
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.execute_unit(self.http.post(self.endpoint(&["user", "logout"])))
            .await
    }

    async fn transactions(&self, page: &PaginationParams) -> Result<Vec<Transaction>, ApiError> {
        let body = self.execute_json(self.get(&["transaction"]).query(page)).await?;
        transactions_from(body)
    }

    async fn transaction_details(&self, id: &str) -> Result<Value, ApiError> {
        self.execute_json(self.get(&["transaction", id])).await
    }

    async fn send_transaction(&self, request: &NewTransaction) -> Result<(), ApiError> {
        self.execute_unit(self.http.post(self.endpoint(&["transaction"])).json(request))
            .await
    }

    async fn contacts(&self) -> Result<Vec<Contact>, ApiError> {
        let body = self.execute_json(self.get(&["contact"])).await?;
        match body {
            Value::Null => Ok(Vec::new()),
            body => decode(body, "contact list"),
        }
    }

    async fn accept_contact(&self, paymail: &str) -> Result<(), ApiError> {
        self.execute_unit(
            self.http
                .patch(self.endpoint(&["contact", "accepted", paymail])),
        )
        .await
    }

    async fn reject_contact(&self, paymail: &str) -> Result<(), ApiError> {
        self.execute_unit(
            self.http
                .patch(self.endpoint(&["contact", "rejected", paymail])),
        )
        .await
    }

    async fn confirm_contact(&self, request: &ConfirmContact) -> Result<(), ApiError> {
        self.execute_unit(
            self.http
                .post(self.endpoint(&["contact", "confirmed"]))
                .json(request),
        )
        .await
    }
}
