//! Handler for `trustgrade assets`.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::port::inbound::scoring::TrustScoring;

#[derive(Tabled)]
struct AssetRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Custody")]
    custody: &'static str,
    #[tabled(rename = "Custodian")]
    custodian: String,
    #[tabled(rename = "Redemption")]
    redemption: String,
    #[tabled(rename = "Peg anchor")]
    anchor: String,
}

/// List registered assets.
pub fn execute(scoring: &dyn TrustScoring) -> Result<()> {
    let profiles = scoring.assets();

    if output::is_json() {
        output::json_output(json!({
            "command": "assets",
            "assets": serde_json::to_value(&profiles)?,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    if profiles.is_empty() {
        output::warning("No assets registered");
        output::hint("add [[assets]] entries to the configuration file");
        return Ok(());
    }

    output::section("Registered assets");
    let rows: Vec<AssetRow> = profiles
        .into_iter()
        .map(|profile| AssetRow {
            id: profile.id.to_string(),
            symbol: profile.symbol,
            custody: profile.custody.as_str(),
            custodian: profile.custodian,
            redemption: format!("{}h", profile.redemption_latency_hours),
            anchor: profile
                .peg_anchor
                .map_or_else(|| "-".to_string(), |anchor| anchor.to_string()),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());

    output::hint(&format!(
        "run {} to score one",
        output::highlight("trustgrade score <id>")
    ));
    Ok(())
}
