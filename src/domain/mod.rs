//! Provider-agnostic domain types and pure scoring rules.
//!
//! - [`id`] - Stable asset identifiers
//! - [`asset`] - Configured asset metadata
//! - [`metric`] - Raw per-call measurements and component names
//! - [`rubric`] - Pure normalizers and bucket tables
//! - [`score`] - Breakdown, grade table and the final result
//! - [`error`] - Provider failure taxonomy

pub mod asset;
pub mod error;
pub mod id;
pub mod metric;
pub mod rubric;
pub mod score;
