//! On-disk configuration and snapshot fixtures.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Snapshot values that score `tbtc-mint` at 98 with a 50-holder sample.
pub fn reference_snapshot() -> String {
    let mut holders = String::new();
    for i in 0..33 {
        let _ = writeln!(holders, "    {{ address = \"holder-{i}\", balance = 3 }},");
    }
    holders.push_str("    { address = \"holder-33\", balance = 1 },\n");

    format!(
        r#"[[asset]]
id = "tbtc-mint"
price = "100.1"
liquidity_usd = 12000000
volume_24h_usd = 1200000
volume_series = [1000000, 1100000, 900000, 1050000, 950000, 1000000, 1200000, 980000, 1020000, 1000000]
holders = [
{holders}]

[[asset]]
id = "wbtc-mint"
price = "100"
"#
    )
}

/// Configuration for the snapshot backend at `snapshot`.
pub fn snapshot_config(snapshot: &Path) -> String {
    format!(
        r#"[logging]
level = "warn"
format = "pretty"

[scoring]
holder_sample_size = 50

[provider]
type = "snapshot"
path = "{}"

[[assets]]
id = "tbtc-mint"
symbol = "tBTC"
custody = "decentralized"
custodian = "Threshold Network"
redemption_latency_hours = 6
peg_anchor = "wbtc-mint"

[[assets]]
id = "wbtc-mint"
symbol = "WBTC"
custody = "centralized"
custodian = "BitGo"
redemption_latency_hours = 48
"#,
        snapshot.display().to_string().replace('\\', "/")
    )
}

/// A temp directory holding `trustgrade.toml` and `snapshot.toml`.
pub struct Workspace {
    pub dir: TempDir,
    pub config: PathBuf,
    pub snapshot: PathBuf,
}

impl Workspace {
    pub fn with_snapshot(snapshot: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let snapshot_path = dir.path().join("snapshot.toml");
        fs::write(&snapshot_path, snapshot).expect("write snapshot");
        let config = dir.path().join("trustgrade.toml");
        fs::write(&config, snapshot_config(&snapshot_path)).expect("write config");
        Self {
            dir,
            config,
            snapshot: snapshot_path,
        }
    }

    pub fn reference() -> Self {
        Self::with_snapshot(&reference_snapshot())
    }

    /// Write an arbitrary config file into the workspace.
    pub fn write_config(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("write config");
        path
    }
}
