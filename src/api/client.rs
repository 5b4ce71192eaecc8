//! HTTP client for the onboarding portal.
//!
//! Four endpoints, exactly as the portal exposes them:
//! `GET /api/csrf-token`, `GET /api/templates`, `POST /api/onboard`
//! (CSRF-authorized), `GET /api/status/{app_name}`.

use async_trait::async_trait;

use crate::api::types::{
    CsrfTokenResponse, DeploymentRequest, OnboardResponse, StatusResponse, Template,
};
use crate::config::PortalConfig;
use crate::error::ApiError;

/// Header carrying the CSRF token on mutating calls.
pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// The portal API surface the client consumes.
///
/// A trait seam so the wizard, submitter, and status inspector can be
/// exercised against an in-memory stub.
#[async_trait]
pub trait PortalApi: Send + Sync {
    /// Fetch the one-per-session CSRF token.
    async fn fetch_csrf_token(&self) -> Result<String, ApiError>;

    /// Fetch the ordered template catalog.
    async fn fetch_templates(&self) -> Result<Vec<Template>, ApiError>;

    /// Submit a deployment request, authorized with the CSRF token.
    async fn onboard(
        &self,
        request: &DeploymentRequest,
        csrf_token: &str,
    ) -> Result<OnboardResponse, ApiError>;

    /// Look up the live status of a previously deployed application.
    async fn app_status(&self, app_name: &str) -> Result<StatusResponse, ApiError>;
}

/// `reqwest`-backed portal client.
pub struct PortalClient {
    http: reqwest::Client,
    base_url: String,
}

impl PortalClient {
    pub fn new(config: &PortalConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn transport(endpoint: &str, e: reqwest::Error) -> ApiError {
        ApiError::Transport {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        }
    }

    fn decode(endpoint: &str, e: reqwest::Error) -> ApiError {
        ApiError::Decode {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        }
    }
}

#[async_trait]
impl PortalApi for PortalClient {
    async fn fetch_csrf_token(&self) -> Result<String, ApiError> {
        let endpoint = self.endpoint("/api/csrf-token");
        let response: CsrfTokenResponse = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| Self::transport(&endpoint, e))?
            .error_for_status()
            .map_err(|e| Self::transport(&endpoint, e))?
            .json()
            .await
            .map_err(|e| Self::decode(&endpoint, e))?;

        Ok(response.csrf_token)
    }

    async fn fetch_templates(&self) -> Result<Vec<Template>, ApiError> {
        let endpoint = self.endpoint("/api/templates");
        self.http
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| Self::transport(&endpoint, e))?
            .error_for_status()
            .map_err(|e| Self::transport(&endpoint, e))?
            .json()
            .await
            .map_err(|e| Self::decode(&endpoint, e))
    }

    async fn onboard(
        &self,
        request: &DeploymentRequest,
        csrf_token: &str,
    ) -> Result<OnboardResponse, ApiError> {
        let endpoint = self.endpoint("/api/onboard");

        // The portal answers rejections (4xx/5xx) with the same JSON shape,
        // so the body is decoded regardless of HTTP status.
        let response = self
            .http
            .post(&endpoint)
            .header(CSRF_HEADER, csrf_token)
            .json(request)
            .send()
            .await
            .map_err(|e| Self::transport(&endpoint, e))?;

        response
            .json()
            .await
            .map_err(|e| Self::decode(&endpoint, e))
    }

    async fn app_status(&self, app_name: &str) -> Result<StatusResponse, ApiError> {
        let endpoint = self.endpoint(&format!("/api/status/{app_name}"));

        // "Not found" arrives as a structured error body, not a bare 404.
        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| Self::transport(&endpoint, e))?;

        response
            .json()
            .await
            .map_err(|e| Self::decode(&endpoint, e))
    }
}
