//! Status inspector — on-demand lookup of a deployed application.
//!
//! Independent of the wizard: created and discarded per query, reachable
//! from any step, never stored in wizard state.

use std::collections::BTreeMap;

use crate::api::{EnvironmentStatus, PortalApi};
use crate::error::QueryError;

/// Message shown when the status lookup itself fails.
pub const STATUS_QUERY_ERROR: &str = "An error occurred while checking the application status";

/// Outcome of one status query.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusReport {
    Found {
        app_name: String,
        environments: BTreeMap<String, EnvironmentStatus>,
    },
    NotFound {
        message: String,
    },
}

/// Look up the live status of an application by name.
///
/// A blank name is rejected locally with no network call. Everything the
/// portal answers, including "not found", becomes a report with a
/// displayable message. Failures to reach or decode the portal are errors:
/// the caller renders those in the same error area, with the generic
/// message in the interactive loop.
pub async fn inspect(api: &dyn PortalApi, app_name: &str) -> Result<StatusReport, QueryError> {
    let name = app_name.trim();
    if name.is_empty() {
        return Err(QueryError::EmptyAppName);
    }

    match api.app_status(name).await {
        Ok(response) if response.status == "success" => Ok(StatusReport::Found {
            app_name: response.app_name.unwrap_or_else(|| name.to_string()),
            environments: response.environments,
        }),
        Ok(response) => Ok(StatusReport::NotFound {
            message: response
                .message
                .unwrap_or_else(|| STATUS_QUERY_ERROR.to_string()),
        }),
        Err(e) => {
            tracing::error!("Error checking application status: {e}");
            Err(e.into())
        }
    }
}

/// Humanize the portal's `last_deployment` timestamp. Accepts RFC 3339 with
/// or without an offset; anything unparseable renders as-is.
pub fn humanize_timestamp(raw: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d %H:%M:%S %:z").to_string();
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::StubPortal;

    #[tokio::test]
    async fn blank_name_is_rejected_without_a_network_call() {
        let api = StubPortal::default();

        let err = inspect(&api, "   ").await.unwrap_err();
        assert!(matches!(err, QueryError::EmptyAppName));
        assert!(api.status_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn found_report_carries_environments() {
        let api = StubPortal {
            status_response: Some(
                r#"{
                    "status": "success",
                    "app_name": "my-app",
                    "environments": {
                        "prod": {"status": "degraded", "last_deployment": "2024-03-01T08:00:00Z", "url": "https://p"},
                        "dev": {"status": "available", "last_deployment": "2024-03-02T09:30:00Z", "url": "https://d"}
                    }
                }"#
                .into(),
            ),
            ..Default::default()
        };

        let report = inspect(&api, " my-app ").await.unwrap();
        let StatusReport::Found {
            app_name,
            environments,
        } = report
        else {
            panic!("expected Found");
        };

        assert_eq!(app_name, "my-app");
        let names: Vec<&str> = environments.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["dev", "prod"]);
        assert!(environments["dev"].is_available());
        assert!(!environments["prod"].is_available());

        // Trimmed name went over the wire
        assert_eq!(*api.status_calls.lock().unwrap(), vec!["my-app"]);
    }

    #[tokio::test]
    async fn not_found_uses_server_message() {
        let api = StubPortal {
            status_response: Some(
                r#"{"status":"error","message":"Application nope not found"}"#.into(),
            ),
            ..Default::default()
        };

        let report = inspect(&api, "nope").await.unwrap();
        assert_eq!(
            report,
            StatusReport::NotFound {
                message: "Application nope not found".into()
            }
        );
    }

    #[tokio::test]
    async fn not_found_without_message_gets_the_generic_one() {
        let api = StubPortal {
            status_response: Some(r#"{"status":"error"}"#.into()),
            ..Default::default()
        };

        let report = inspect(&api, "nope").await.unwrap();
        assert_eq!(
            report,
            StatusReport::NotFound {
                message: STATUS_QUERY_ERROR.into()
            }
        );
    }

    #[tokio::test]
    async fn transport_failure_is_a_query_error() {
        let api = StubPortal::default();

        let err = inspect(&api, "my-app").await.unwrap_err();
        assert!(matches!(err, QueryError::Api(_)));
    }

    #[test]
    fn humanizes_rfc3339_timestamps() {
        assert_eq!(
            humanize_timestamp("2024-03-02T09:30:00Z"),
            "2024-03-02 09:30:00 +00:00"
        );
        assert_eq!(
            humanize_timestamp("2024-03-02T09:30:00.123456"),
            "2024-03-02 09:30:00"
        );
        // Unparseable input passes through untouched
        assert_eq!(humanize_timestamp("last tuesday"), "last tuesday");
    }
}
