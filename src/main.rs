use std::sync::Arc;

use onboard_cli::api::{PortalApi, PortalClient};
use onboard_cli::config::PortalConfig;
use onboard_cli::session::SessionState;
use onboard_cli::status::StatusReport;
use onboard_cli::term::{self, WizardUi, print_banner};
use onboard_cli::token::CsrfToken;
use onboard_cli::{catalog, status};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = PortalConfig::from_env();
    let api: Arc<dyn PortalApi> = Arc::new(PortalClient::new(&config)?);

    print_banner(&config.base_url);

    // One-shot status lookup: `onboard status <app-name>`
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(String::as_str) == Some("status") {
        let name = args.get(2).map(String::as_str).unwrap_or("");
        match status::inspect(api.as_ref(), name).await {
            Ok(report) => {
                term::render_status_report(&report);
                if matches!(report, StatusReport::NotFound { .. }) {
                    std::process::exit(1);
                }
            }
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    // The token fetch runs in the background and races the catalog load;
    // step 1 never waits on it.
    let csrf_token = CsrfToken::new();
    csrf_token.spawn_fetch(Arc::clone(&api));

    let templates = match catalog::load_catalog(api.as_ref()).await {
        Ok(templates) => templates,
        Err(e) => {
            eprintln!("Failed to load templates: {e}");
            eprintln!("Please check the portal and try again.");
            std::process::exit(1);
        }
    };

    let session = SessionState::new(templates, csrf_token);
    WizardUi::new(api, session).run().await?;

    Ok(())
}
