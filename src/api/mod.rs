//! Onboarding portal API: wire types and HTTP client.

pub mod client;
pub mod types;

pub use client::{CSRF_HEADER, PortalApi, PortalClient};
pub use types::{
    DEPLOYMENT_ERROR_FALLBACK, DeploymentRequest, DeploymentResult, EnvironmentStatus,
    NETWORK_ERROR_MESSAGE, OnboardResponse, StatusResponse, Template,
};
