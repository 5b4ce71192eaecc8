//! CSRF token manager — fetched once per session, filled in the background.
//!
//! The token fetch races freely with the catalog load; step 1 never waits on
//! it. If the fetch fails the cell stays empty and the failure surfaces only
//! when a submission goes out without a valid token and the portal rejects it.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::api::PortalApi;

/// Cloneable handle to the session's CSRF token cell.
#[derive(Clone, Default)]
pub struct CsrfToken {
    cell: Arc<RwLock<Option<String>>>,
}

impl CsrfToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// The token, if the fetch has landed.
    pub async fn get(&self) -> Option<String> {
        self.cell.read().await.clone()
    }

    pub async fn set(&self, token: String) {
        *self.cell.write().await = Some(token);
    }

    /// Launch the one-per-session background fetch. No automatic refresh and
    /// no retry; a failure is logged and left for submission time.
    pub fn spawn_fetch(&self, api: Arc<dyn PortalApi>) -> tokio::task::JoinHandle<()> {
        let handle = self.clone();
        tokio::spawn(async move {
            match api.fetch_csrf_token().await {
                Ok(token) => {
                    tracing::debug!("CSRF token obtained");
                    handle.set(token).await;
                }
                Err(e) => {
                    tracing::warn!("Failed to get CSRF token: {e}");
                }
            }
        })
    }
}
