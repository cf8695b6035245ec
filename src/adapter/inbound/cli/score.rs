//! Handler for `trustgrade score`.

use std::collections::HashMap;

use serde_json::json;
use tabled::{Table, Tabled};

use super::command::ScoreArgs;
use crate::adapter::inbound::cli::output;
use crate::domain::{
    asset::AssetProfile,
    id::AssetId,
    metric::Component,
    score::{Grade, ScoreResult},
};
use crate::error::{Error, Result};
use crate::port::inbound::scoring::TrustScoring;

#[derive(Tabled)]
struct ComponentRow {
    #[tabled(rename = "Component")]
    component: &'static str,
    #[tabled(rename = "Points")]
    points: String,
    #[tabled(rename = "Measurement")]
    measurement: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

/// Execute `score`.
///
/// Unknown ids are reported individually; the command still fails overall
/// so the exit code reflects them.
pub async fn execute(scoring: &dyn TrustScoring, args: &ScoreArgs) -> Result<()> {
    let profiles: HashMap<AssetId, AssetProfile> = scoring
        .assets()
        .into_iter()
        .map(|profile| (profile.id.clone(), profile))
        .collect();

    let ids: Vec<AssetId> = if args.all {
        let mut ids: Vec<AssetId> = profiles.keys().cloned().collect();
        ids.sort();
        ids
    } else {
        args.asset_ids.iter().map(|id| AssetId::new(id.as_str())).collect()
    };

    if ids.is_empty() {
        output::warning("No assets registered");
        return Ok(());
    }

    let mut scored = Vec::with_capacity(ids.len());
    let mut failure: Option<Error> = None;
    for result in scoring.score_assets(&ids).await {
        match result {
            Ok(score) => scored.push(score),
            Err(err) if failure.is_none() => failure = Some(err),
            Err(err) => output::error(&err.to_string()),
        }
    }

    if output::is_json() {
        render_json(&scored, args.all || ids.len() > 1)?;
    } else if !output::is_quiet() {
        output::header(env!("CARGO_PKG_VERSION"));
        for score in &scored {
            render(score, profiles.get(&score.asset_id));
        }
    }

    failure.map_or(Ok(()), Err)
}

fn render_json(scored: &[ScoreResult], many: bool) -> Result<()> {
    if many {
        output::json_output(json!({
            "command": "score",
            "results": serde_json::to_value(scored)?,
        }));
    } else if let Some(score) = scored.first() {
        output::json_output(serde_json::to_value(score)?);
    }
    Ok(())
}

fn render(score: &ScoreResult, profile: Option<&AssetProfile>) {
    output::section(&format!("{} ({})", score.symbol, score.asset_id));
    output::field("Score", format!("{}/100", score.total_score));
    output::field(
        "Grade",
        format!("{} {}", colored_grade(score.grade), output::muted(score.label)),
    );

    let rows: Vec<ComponentRow> = Component::ALL
        .iter()
        .map(|&component| ComponentRow {
            component: component.as_str(),
            points: format!("{}/{}", score.breakdown.get(component), component.max_points()),
            measurement: measurement(score, profile, component),
            status: if score.is_component_degraded(component) {
                "degraded"
            } else {
                "ok"
            },
        })
        .collect();
    output::lines(&Table::new(rows).to_string());

    if score.is_degraded() {
        let names: Vec<&str> = score.degraded.iter().map(Component::as_str).collect();
        output::warning(&format!("Fallback values used for: {}", names.join(", ")));
    }
}

fn colored_grade(grade: Grade) -> String {
    match grade {
        Grade::APlus | Grade::A | Grade::AMinus => output::positive(grade),
        Grade::BPlus | Grade::B | Grade::BMinus => output::caution(grade),
        Grade::CPlus | Grade::C | Grade::CMinus => output::negative(grade),
    }
}

fn measurement(score: &ScoreResult, profile: Option<&AssetProfile>, component: Component) -> String {
    let metrics = &score.metrics;
    let value = match component {
        Component::Custody => profile.map(|p| format!("{} ({})", p.custodian, p.custody)),
        Component::Redemption => profile.map(|p| format!("{}h", p.redemption_latency_hours)),
        Component::Liquidity => metrics.liquidity_usd.map(|usd| format!("${}", usd.round_dp(0))),
        Component::Holders => metrics
            .holder_concentration_pct
            .map(|pct| format!("top holder {}%", pct.round_dp(2))),
        Component::Trading => metrics.volume_24h_usd.map(|usd| {
            match metrics.volume_consistency_coefficient {
                Some(cv) => format!("${} 24h, cv {cv:.3}", usd.round_dp(0)),
                None => format!("${} 24h", usd.round_dp(0)),
            }
        }),
        Component::Peg => metrics
            .price_deviation_pct
            .map(|pct| format!("{}% off anchor", pct.round_dp(3))),
    };
    value.unwrap_or_else(|| "-".to_string())
}
