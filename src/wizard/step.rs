//! Wizard steps — the four stages of the onboarding flow.

use serde::{Deserialize, Serialize};

/// The steps of the onboarding wizard.
///
/// Progresses linearly: Selecting → Detailing → Reviewing → Submitting.
/// Forward moves are gated one step at a time; backward moves are free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Selecting,
    Detailing,
    Reviewing,
    Submitting,
}

impl WizardStep {
    /// The 1-based step number shown to the user.
    pub fn number(&self) -> u8 {
        match self {
            Self::Selecting => 1,
            Self::Detailing => 2,
            Self::Reviewing => 3,
            Self::Submitting => 4,
        }
    }

    /// Get the next step in the linear progression, if any.
    pub fn next(&self) -> Option<WizardStep> {
        match self {
            Self::Selecting => Some(Self::Detailing),
            Self::Detailing => Some(Self::Reviewing),
            Self::Reviewing => Some(Self::Submitting),
            Self::Submitting => None,
        }
    }

    /// Get the previous step, if any.
    pub fn previous(&self) -> Option<WizardStep> {
        match self {
            Self::Selecting => None,
            Self::Detailing => Some(Self::Selecting),
            Self::Reviewing => Some(Self::Detailing),
            Self::Submitting => Some(Self::Reviewing),
        }
    }

    /// Check if a transition from `self` to `target` is valid: one step
    /// forward, or any number of steps backward.
    pub fn can_transition_to(&self, target: WizardStep) -> bool {
        target.number() < self.number() || self.next() == Some(target)
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::Selecting
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Selecting => "selecting",
            Self::Detailing => "detailing",
            Self::Reviewing => "reviewing",
            Self::Submitting => "submitting",
        };
        write!(f, "{s}")
    }
}
