//! Wizard state — the single mutable session object driving the flow.

use crate::api::{DeploymentResult, Template};
use crate::error::WizardError;
use crate::wizard::form::FormFields;
use crate::wizard::step::WizardStep;

/// One entry in the framework choice list at step 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkOption {
    /// Wire token sent as `framework` in the deployment request.
    pub token: String,
    /// Display name.
    pub label: String,
}

/// Normalize a framework display name into its wire token: lowercase, runs
/// of whitespace collapsed to a single hyphen.
fn framework_token(label: &str) -> String {
    label
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// State of the four-step wizard.
///
/// Mutated only by transition handlers. Invariants: the step may only leave
/// `Selecting` once a template is selected, and backward navigation never
/// discards form fields.
#[derive(Debug, Clone, Default)]
pub struct WizardState {
    step: WizardStep,
    selected_template: Option<Template>,
    selected_frameworks: Vec<String>,
    pub fields: FormFields,
    deployment_result: Option<DeploymentResult>,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn selected_template(&self) -> Option<&Template> {
        self.selected_template.as_ref()
    }

    pub fn selected_frameworks(&self) -> &[String] {
        &self.selected_frameworks
    }

    pub fn deployment_result(&self) -> Option<&DeploymentResult> {
        self.deployment_result.as_ref()
    }

    /// Step 1 → step 2: select a template.
    ///
    /// Stores the template, copies its frameworks, pre-fills the port field
    /// with the template's default port, and resets the framework choice to
    /// the template itself.
    pub fn select_template(&mut self, template: Template) -> Result<(), WizardError> {
        if self.step != WizardStep::Selecting {
            return Err(self.invalid_transition(WizardStep::Detailing));
        }

        self.selected_frameworks = template.frameworks.clone();
        self.fields.port = template.default_port;
        self.fields.framework = template.id.clone();
        self.selected_template = Some(template);
        self.transition(WizardStep::Detailing)?;
        tracing::debug!(step = %self.step, "Template selected");
        Ok(())
    }

    /// The framework choice list for the selected template: the template
    /// itself first, then each of its frameworks as a normalized token.
    pub fn framework_options(&self) -> Vec<FrameworkOption> {
        let Some(template) = &self.selected_template else {
            return Vec::new();
        };

        let mut options = vec![FrameworkOption {
            token: template.id.clone(),
            label: template.name.clone(),
        }];
        options.extend(self.selected_frameworks.iter().map(|f| FrameworkOption {
            token: framework_token(f),
            label: f.clone(),
        }));
        options
    }

    /// Step 2 → step 3, gated by validation. On failure the wizard stays in
    /// `Detailing` and the error names the field to re-prompt.
    pub fn try_review(&mut self) -> Result<(), WizardError> {
        if self.step != WizardStep::Detailing {
            return Err(self.invalid_transition(WizardStep::Reviewing));
        }

        self.fields.validate()?;
        self.transition(WizardStep::Reviewing)
    }

    /// Unconditional backward navigation; form fields are untouched.
    /// No-op at step 1.
    pub fn back(&mut self) {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
    }

    /// Step 3 → step 4: enter the submitting state. The network call itself
    /// is the submitter's job; a result lands via [`Self::record_result`].
    pub fn begin_submit(&mut self) -> Result<(), WizardError> {
        if self.step != WizardStep::Reviewing {
            return Err(self.invalid_transition(WizardStep::Submitting));
        }
        if self.selected_template.is_none() {
            return Err(WizardError::NoTemplate);
        }

        // In-flight: any previous outcome is stale.
        self.deployment_result = None;
        self.transition(WizardStep::Submitting)
    }

    /// Record the outcome of a submission attempt, replacing any previous
    /// one. A retry stays at step 4 and records a fresh result.
    pub fn record_result(&mut self, result: DeploymentResult) {
        self.deployment_result = Some(result);
    }

    /// "Start over": force-reset to step 1 with default form values. The
    /// session's catalog and CSRF token are owned elsewhere and survive.
    pub fn start_over(&mut self) {
        *self = Self::default();
    }

    /// Apply a step change after checking it against
    /// [`WizardStep::can_transition_to`]. The handlers above additionally
    /// pin their source step, since the relation also admits backward moves.
    fn transition(&mut self, to: WizardStep) -> Result<(), WizardError> {
        if !self.step.can_transition_to(to) {
            return Err(self.invalid_transition(to));
        }
        self.step = to;
        Ok(())
    }

    fn invalid_transition(&self, to: WizardStep) -> WizardError {
        WizardError::InvalidTransition {
            from: self.step.number(),
            to: to.number(),
        }
    }
}
