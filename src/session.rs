//! Session state — the single explicitly-owned object for one wizard session.

use crate::api::Template;
use crate::token::CsrfToken;
use crate::wizard::WizardState;

/// Everything one session owns: the template catalog (owner of all
/// `Template`s), the CSRF token cell, and the wizard state. One instance per
/// session, mutated only by the main loop's handlers.
pub struct SessionState {
    pub catalog: Vec<Template>,
    pub csrf_token: CsrfToken,
    pub wizard: WizardState,
}

impl SessionState {
    pub fn new(catalog: Vec<Template>, csrf_token: CsrfToken) -> Self {
        Self {
            catalog,
            csrf_token,
            wizard: WizardState::new(),
        }
    }

    /// "Start over": the wizard resets to its defaults; the catalog and the
    /// session token are fetched once per session and survive.
    pub fn start_over(&mut self) {
        self.wizard.start_over();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::sample_template;

    #[tokio::test]
    async fn start_over_keeps_catalog_and_token() {
        let token = CsrfToken::new();
        token.set("tok-123".into()).await;

        let mut session = SessionState::new(vec![sample_template()], token);
        session
            .wizard
            .select_template(session.catalog[0].clone())
            .unwrap();

        session.start_over();

        assert_eq!(session.catalog.len(), 1);
        assert_eq!(session.csrf_token.get().await.as_deref(), Some("tok-123"));
        assert!(session.wizard.selected_template().is_none());
    }
}
