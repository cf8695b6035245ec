//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!              ┌──────────────────────────┐
//!   CLI ──────▶│  inbound::TrustScoring   │
//!              │                          │
//!              │   application::scoring   │
//!              │                          │
//!              │  outbound::provider::*   │──────▶ HTTP / snapshot adapters
//!              └──────────────────────────┘
//! ```

pub mod inbound;
pub mod outbound;
