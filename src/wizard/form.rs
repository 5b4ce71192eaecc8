//! Form fields collected at step 2, with sanitization and ordered validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

/// Memory sizes offered for requests and limits.
pub const MEMORY_OPTIONS: [&str; 5] = ["128Mi", "256Mi", "512Mi", "1Gi", "2Gi"];

/// CPU sizes offered for requests and limits.
pub const CPU_OPTIONS: [&str; 5] = ["50m", "100m", "200m", "500m", "1000m"];

/// `local@domain.tld` shape, nothing stricter.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Restrict an application name to `[a-z0-9-]`: uppercase is lowercased,
/// everything else becomes a hyphen. Idempotent.
pub fn sanitize_app_name(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// The deployment form. App name is kept behind a sanitizing setter so the
/// stored value is always in the restricted alphabet.
#[derive(Debug, Clone, PartialEq)]
pub struct FormFields {
    app_name: String,
    pub description: String,
    pub team_email: String,
    /// Resolved framework token (template id, or a hyphenated framework name).
    pub framework: String,
    pub port: u16,
    pub replicas: u32,
    pub memory_request: String,
    pub memory_limit: String,
    pub cpu_request: String,
    pub cpu_limit: String,
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            app_name: String::new(),
            description: String::new(),
            team_email: String::new(),
            framework: String::new(),
            port: 8080,
            replicas: 3,
            memory_request: "256Mi".to_string(),
            memory_limit: "512Mi".to_string(),
            cpu_request: "100m".to_string(),
            cpu_limit: "500m".to_string(),
        }
    }
}

impl FormFields {
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Store an application name, sanitizing on the way in.
    pub fn set_app_name(&mut self, raw: &str) {
        self.app_name = sanitize_app_name(raw.trim());
    }

    /// Validate the fields gating step 2 → step 3. Order matters: the first
    /// failing check wins and stops further checks.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.app_name.trim().is_empty() {
            return Err(ValidationError::EmptyAppName);
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        let team_email = self.team_email.trim();
        if team_email.is_empty() {
            return Err(ValidationError::EmptyTeamEmail);
        }
        if !EMAIL_RE.is_match(team_email) {
            return Err(ValidationError::InvalidTeamEmail);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_lowercases_and_hyphenates() {
        assert_eq!(sanitize_app_name("My App"), "my-app");
        assert_eq!(sanitize_app_name("Shop_2.0"), "shop-2-0");
        assert_eq!(sanitize_app_name("already-clean-42"), "already-clean-42");
    }

    #[test]
    fn sanitize_is_idempotent() {
        for raw in ["My App!", "UPPER", "a b c", "weird*chars#here"] {
            let once = sanitize_app_name(raw);
            assert_eq!(sanitize_app_name(&once), once, "not idempotent for {raw:?}");
            assert!(
                once.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "out of alphabet for {raw:?}: {once:?}"
            );
        }
    }

    #[test]
    fn setter_always_sanitizes() {
        let mut fields = FormFields::default();
        fields.set_app_name("  My Shop 2.0  ");
        assert_eq!(fields.app_name(), "my-shop-2-0");
    }

    #[test]
    fn defaults_match_reset_values() {
        let fields = FormFields::default();
        assert_eq!(fields.port, 8080);
        assert_eq!(fields.replicas, 3);
        assert_eq!(fields.memory_request, "256Mi");
        assert_eq!(fields.memory_limit, "512Mi");
        assert_eq!(fields.cpu_request, "100m");
        assert_eq!(fields.cpu_limit, "500m");
        assert!(fields.app_name().is_empty());
    }

    fn valid_fields() -> FormFields {
        let mut fields = FormFields::default();
        fields.set_app_name("my-app");
        fields.description = "desc".into();
        fields.team_email = "a@b.com".into();
        fields
    }

    #[test]
    fn valid_fields_pass() {
        assert_eq!(valid_fields().validate(), Ok(()));
    }

    #[test]
    fn empty_app_name_fails_first() {
        // Everything else is also bad; the app name check must still win.
        let mut fields = FormFields::default();
        fields.team_email = "not-an-email".into();
        assert_eq!(fields.validate(), Err(ValidationError::EmptyAppName));
    }

    #[test]
    fn empty_description_fails_second() {
        let mut fields = valid_fields();
        fields.description = "   ".into();
        fields.team_email = "not-an-email".into();
        assert_eq!(fields.validate(), Err(ValidationError::EmptyDescription));
    }

    #[test]
    fn empty_email_fails_before_shape_check() {
        let mut fields = valid_fields();
        fields.team_email = "  ".into();
        assert_eq!(fields.validate(), Err(ValidationError::EmptyTeamEmail));
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in ["plainaddress", "no-domain@", "@no-local.com", "a@b", "a b@c.com"] {
            let mut fields = valid_fields();
            fields.team_email = email.into();
            assert_eq!(
                fields.validate(),
                Err(ValidationError::InvalidTeamEmail),
                "should reject {email:?}"
            );
        }
    }

    #[test]
    fn validation_error_names_the_field() {
        assert_eq!(ValidationError::EmptyAppName.field(), "app_name");
        assert_eq!(ValidationError::InvalidTeamEmail.field(), "team_email");
    }
}
