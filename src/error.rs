//! Error types for the onboarding client.

/// Top-level error type for the interactive loop. Portal and status-query
/// failures are handled where they occur ([`ApiError`] and [`QueryError`]
/// never propagate this far), so only wizard and terminal IO errors remain.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors talking to the onboarding portal.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Request to {endpoint} failed: {reason}")]
    Transport { endpoint: String, reason: String },

    #[error("Invalid response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },
}

/// Wizard transition errors.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("Cannot move from step {from} to step {to}")]
    InvalidTransition { from: u8, to: u8 },

    #[error("No template selected")]
    NoTemplate,

    #[error("{0}")]
    Validation(#[from] ValidationError),
}

/// Client-side field validation errors (the step 2 → step 3 gate).
///
/// Checks run in declaration order; the first failing check wins, and each
/// variant names the field the terminal should re-prompt for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter an application name")]
    EmptyAppName,

    #[error("Please enter a description")]
    EmptyDescription,

    #[error("Please enter a team email")]
    EmptyTeamEmail,

    #[error("Please enter a valid email address")]
    InvalidTeamEmail,
}

impl ValidationError {
    /// The form field to refocus when this validation fails.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyAppName => "app_name",
            Self::EmptyDescription => "description",
            Self::EmptyTeamEmail | Self::InvalidTeamEmail => "team_email",
        }
    }
}

/// Status lookup errors.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Please enter an application name")]
    EmptyAppName,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result type alias for the client.
pub type Result<T> = std::result::Result<T, Error>;
