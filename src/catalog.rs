//! Template catalog loader — one fetch per session.

use std::fmt::Write as _;

use crate::api::{PortalApi, Template};
use crate::error::ApiError;

/// Fetch the template catalog. Called once at startup; a failure is terminal
/// for the session (no automatic retry, the user relaunches).
pub async fn load_catalog(api: &dyn PortalApi) -> Result<Vec<Template>, ApiError> {
    let templates = api.fetch_templates().await?;
    tracing::info!(count = templates.len(), "Loaded template catalog");
    Ok(templates)
}

/// Render one selectable template tile for the terminal.
pub fn format_template_tile(index: usize, template: &Template) -> String {
    let mut tile = String::new();
    let _ = writeln!(tile, "{index}. {}", template.name);
    let _ = writeln!(tile, "   ID: {}", template.id);
    let _ = writeln!(tile, "   Description: {}", template.description);
    if !template.languages.is_empty() {
        let _ = writeln!(tile, "   Languages: {}", template.languages.join(", "));
    }
    let _ = writeln!(tile, "   Default Port: {}", template.default_port);
    let _ = write!(tile, "   Frameworks: {}", template.frameworks.join(", "));
    tile
}
