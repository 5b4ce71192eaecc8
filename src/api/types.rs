//! Wire types for the onboarding portal API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Fallback message when the portal rejects a deployment without saying why.
pub const DEPLOYMENT_ERROR_FALLBACK: &str = "An error occurred during deployment";

/// Message shown when the deployment request never got a response.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error occurred. Please try again.";

/// An application template offered at step 1.
///
/// Immutable once fetched; identity is `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    pub default_port: u16,
    #[serde(default)]
    pub languages: Vec<String>,
    pub frameworks: Vec<String>,
}

/// Body of `GET /api/csrf-token`.
#[derive(Debug, Deserialize)]
pub struct CsrfTokenResponse {
    pub csrf_token: String,
}

/// Body of `POST /api/onboard`, built fresh from the form at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentRequest {
    pub app_name: String,
    pub description: String,
    pub team_email: String,
    pub framework: String,
    pub port: u16,
    pub replicas: u32,
    pub memory_request: String,
    pub memory_limit: String,
    pub cpu_request: String,
    pub cpu_limit: String,
}

/// Raw response of `POST /api/onboard`.
#[derive(Debug, Clone, Deserialize)]
pub struct OnboardResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub project_url: Option<String>,
    #[serde(default)]
    pub dev_url: Option<String>,
    #[serde(default)]
    pub prod_url: Option<String>,
}

/// Interpreted outcome of one deployment attempt.
///
/// A retry produces a new instance, replacing the previous one.
#[derive(Debug, Clone, PartialEq)]
pub enum DeploymentResult {
    Success {
        project_url: String,
        dev_url: String,
        prod_url: String,
    },
    Failure {
        message: String,
    },
}

impl DeploymentResult {
    /// Interpret the portal's response per the onboarding contract:
    /// `status == "success"` carries the three URLs, anything else is a
    /// failure with the server's message or a generic fallback.
    pub fn from_response(response: OnboardResponse) -> Self {
        if response.status == "success" {
            Self::Success {
                project_url: response.project_url.unwrap_or_default(),
                dev_url: response.dev_url.unwrap_or_default(),
                prod_url: response.prod_url.unwrap_or_default(),
            }
        } else {
            Self::Failure {
                message: response
                    .message
                    .unwrap_or_else(|| DEPLOYMENT_ERROR_FALLBACK.to_string()),
            }
        }
    }

    /// The outcome when the request never reached the portal.
    pub fn network_failure() -> Self {
        Self::Failure {
            message: NETWORK_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Raw response of `GET /api/status/{app_name}`.
///
/// Environments use a `BTreeMap` so rows render in a stable order.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(default)]
    pub app_name: Option<String>,
    #[serde(default)]
    pub environments: BTreeMap<String, EnvironmentStatus>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One deployment environment of an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentStatus {
    pub status: String,
    pub last_deployment: String,
    pub url: String,
}

impl EnvironmentStatus {
    /// Whether this environment is healthy. Everything that is not exactly
    /// `"available"` renders with the warning indicator.
    pub fn is_available(&self) -> bool {
        self.status == "available"
    }
}
