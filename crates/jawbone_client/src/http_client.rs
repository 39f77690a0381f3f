//! HTTP client implementation for the Jawbone API.
//!
//! This module provides a reqwest-based implementation of the [`JawboneApi`](crate::JawboneApi) trait.

use crate::config::Config;
use crate::oauth::{self, Credentials, Scope, TokenResponse};
use crate::{Endpoint, JawboneApi, JawboneError};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://jawbone.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const JSON: &str = "application/json";

/// Client for the Jawbone API using reqwest.
///
/// Holds the credential state; the token exchange mutates it, so use one
/// client per credential.
#[derive(Clone, Debug)]
pub struct ReqwestJawboneClient {
    base_url: String,
    credentials: Credentials,
    client: reqwest::Client,
}

impl ReqwestJawboneClient {
    /// Create a new client instance with the default request timeout.
    ///
    /// # Arguments
    /// * `base_url` - The API host (e.g., "https://jawbone.com")
    /// * `credentials` - Client id/secret plus whatever code or token is already held
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self, JawboneError> {
        Self::with_timeout(base_url, credentials, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: &str,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, JawboneError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            client,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self, JawboneError> {
        Self::with_timeout(&cfg.base_url, cfg.credentials(), cfg.timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Fully qualified URL for `endpoint` with `args` substituted.
    pub fn request_url(&self, endpoint: Endpoint, args: &[&str]) -> Result<String, JawboneError> {
        Ok(format!("{}{}", self.base_url, endpoint.format(args)?))
    }

    /// URL to send the user to for granting access.
    pub fn build_authorization_url(
        &self,
        redirect_uri: &str,
        scope: Scope,
    ) -> Result<String, JawboneError> {
        oauth::authorization_url(&self.base_url, &self.credentials, redirect_uri, scope)
    }

    /// Exchange the held authorization code for an access token.
    ///
    /// On success the token becomes the credential for every later request.
    /// The code is single-use: once a token is held this fails without
    /// contacting the server.
    pub async fn exchange_code_for_token(&mut self) -> Result<TokenResponse, JawboneError> {
        if self.credentials.has_token() {
            return Err(JawboneError::Authorization(
                "access token already obtained; the authorization code cannot be reused".into(),
            ));
        }
        let code = self
            .credentials
            .authorization_code
            .clone()
            .ok_or_else(|| JawboneError::Authorization("no authorization code held".into()))?;

        let url = format!("{}{}", self.base_url, oauth::TOKEN_PATH);
        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.expose_secret()),
            ("code", code.as_str()),
        ];
        let request = self
            .client
            .post(&url)
            .header(ACCEPT, JSON)
            .query(&params)
            .body("");
        tracing::debug!("POST {}", oauth::TOKEN_PATH);

        let body = self.read_json(request.send().await?).await?;
        let token: TokenResponse = serde_json::from_value(body)?;
        self.credentials.store_token(&token);
        tracing::info!("obtained {} access token", token.token_type);
        Ok(token)
    }

    /// GET an absolute URL (e.g. a `links.next` value) and unwrap its envelope.
    pub async fn raw_get(&self, url: &str) -> Result<Value, JawboneError> {
        tracing::debug!("GET {}", url);
        let resp = self.get_request(url).send().await?;
        unwrap_envelope(self.read_json(resp).await?)
    }

    /// Build a GET request with headers derived from the current credential state.
    fn get_request(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url).header(ACCEPT, JSON);
        match self.credentials.authorization_header() {
            Some(value) => request.header(AUTHORIZATION, value),
            None => request,
        }
    }

    /// Check status and content type, then decode the body as JSON.
    async fn read_json(&self, resp: reqwest::Response) -> Result<Value, JawboneError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(self.error_from_response(resp).await);
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !is_json(&content_type) {
            return Err(JawboneError::UnexpectedContentType(content_type));
        }

        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Extract error information from a failed response.
    async fn error_from_response(&self, resp: reqwest::Response) -> JawboneError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let body: String = body.chars().take(256).collect();
        JawboneError::Status { status, body }
    }
}

#[async_trait]
impl JawboneApi for ReqwestJawboneClient {
    async fn resolve(&self, endpoint: Endpoint, args: &[&str]) -> Result<Value, JawboneError> {
        let url = self.request_url(endpoint, args)?;
        tracing::debug!(endpoint = endpoint.name(), "GET {}", url);
        let resp = self.get_request(&url).send().await?;
        unwrap_envelope(self.read_json(resp).await?)
    }
}

/// `application/json`, with or without parameters such as a charset.
fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(JSON))
}

/// Take the payload out of the `{"meta": .., "data": ..}` envelope.
fn unwrap_envelope(mut body: Value) -> Result<Value, JawboneError> {
    body.get_mut("data")
        .map(Value::take)
        .ok_or_else(|| JawboneError::Envelope("response has no `data` field".into()))
}
