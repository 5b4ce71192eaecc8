//! Deployment submitter — serializes the form into a request, sends it, and
//! interprets the outcome. Every outcome is a `DeploymentResult`; transport
//! failures become the generic network-error failure, never a panic.

use crate::api::{DeploymentRequest, DeploymentResult, PortalApi};
use crate::wizard::state::WizardState;

/// Build a deployment request from the current form. Constructed fresh at
/// submission time; a retry re-serializes the same stored form data.
pub fn build_request(state: &WizardState) -> DeploymentRequest {
    let fields = &state.fields;
    DeploymentRequest {
        app_name: fields.app_name().trim().to_string(),
        description: fields.description.trim().to_string(),
        team_email: fields.team_email.trim().to_string(),
        framework: fields.framework.clone(),
        port: fields.port,
        replicas: fields.replicas,
        memory_request: fields.memory_request.clone(),
        memory_limit: fields.memory_limit.clone(),
        cpu_request: fields.cpu_request.clone(),
        cpu_limit: fields.cpu_limit.clone(),
    }
}

/// Send one authorized deployment request and interpret the response.
///
/// When the CSRF fetch has not landed yet the request goes out with an empty
/// token and the portal rejects it; that rejection surfaces as a normal
/// failure result the user can retry.
pub async fn submit(
    api: &dyn PortalApi,
    request: &DeploymentRequest,
    csrf_token: Option<&str>,
) -> DeploymentResult {
    let token = csrf_token.unwrap_or("");
    if token.is_empty() {
        tracing::warn!("Submitting without a CSRF token; the portal will reject this");
    }

    match api.onboard(request, token).await {
        Ok(response) => DeploymentResult::from_response(response),
        Err(e) => {
            tracing::error!("Error deploying application: {e}");
            DeploymentResult::network_failure()
        }
    }
}
