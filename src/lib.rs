//! Trustgrade - composite trust scoring for tokenized and wrapped assets.
//!
//! Scores an asset from 0 to 100 across six weighted components and maps
//! the total to a letter grade:
//!
//! | Component | Max | Source |
//! |-----------|-----|--------|
//! | Custody security | 25 | asset profile |
//! | Liquidity depth | 25 | liquidity provider (fail-closed) |
//! | Holder distribution | 15 | holder provider (fail-closed) |
//! | Trading activity | 15 | volume history provider |
//! | Peg stability | 10 | price provider (fail-open) |
//! | Redemption speed | 10 | asset profile |
//!
//! Provider failures never abort a score. A failed component takes its
//! fallback value and is listed in [`ScoreResult::degraded`].
//!
//! # Architecture
//!
//! - [`domain`] - Pure types and the scoring rubric
//! - [`port`] - Trait seams: the inbound scoring use case and outbound providers
//! - [`application`] - Scoring engine and asset registry
//! - [`adapter`] - CLI, HTTP and snapshot implementations of the ports
//! - [`infrastructure`] - Configuration and wiring
//!
//! # Example
//!
//! ```no_run
//! use trustgrade::infrastructure::config::settings::Config;
//! use trustgrade::infrastructure::factory::scoring::build_engine;
//!
//! # async fn demo() -> trustgrade::error::Result<()> {
//! let config = Config::load("trustgrade.toml")?;
//! let engine = build_engine(&config)?;
//! let score = engine.score_asset(&"tbtc-mint".into()).await?;
//! println!("{} {}", score.total_score, score.grade);
//! # Ok(())
//! # }
//! ```
//!
//! [`ScoreResult::degraded`]: domain::score::ScoreResult::degraded

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
