//! Handler for the `config` command group.

use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Execute `config validate`.
///
/// Loads the file exactly as `score` would, including the provider section,
/// but makes no provider calls.
pub fn execute_validate(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "valid": true,
            "path": path.display().to_string(),
            "provider": config.provider.kind(),
            "assets": config.assets.len(),
        }));
        return Ok(());
    }

    output::section("Configuration");
    output::field("Path", path.display());
    output::field("Provider", config.provider.kind());
    output::field("Assets", config.assets.len());
    output::success("Configuration is valid");
    Ok(())
}
