//! REST response bodies.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::metric::HolderBalance;

#[derive(Debug, Deserialize)]
pub struct PriceResponse {
    pub price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct LiquidityResponse {
    pub liquidity_usd: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct HoldersResponse {
    #[serde(default)]
    pub holders: Vec<HolderEntry>,
}

#[derive(Debug, Deserialize)]
pub struct HolderEntry {
    pub address: String,
    pub balance: Decimal,
}

impl From<HolderEntry> for HolderBalance {
    fn from(entry: HolderEntry) -> Self {
        Self::new(entry.address, entry.balance)
    }
}

#[derive(Debug, Deserialize)]
pub struct VolumeResponse {
    pub volume_usd: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct VolumeSeriesResponse {
    #[serde(default)]
    pub samples: Vec<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn decimals_parse_from_strings_and_numbers() {
        let price: PriceResponse = serde_json::from_str(r#"{"price": "100.10"}"#).unwrap();
        assert_eq!(price.price, dec!(100.10));

        let liquidity: LiquidityResponse =
            serde_json::from_str(r#"{"liquidity_usd": 12000000}"#).unwrap();
        assert_eq!(liquidity.liquidity_usd, dec!(12_000_000));
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let holders: HoldersResponse = serde_json::from_str("{}").unwrap();
        assert!(holders.holders.is_empty());
        let series: VolumeSeriesResponse = serde_json::from_str("{}").unwrap();
        assert!(series.samples.is_empty());
    }
}
