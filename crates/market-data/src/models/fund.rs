//! Fund models: search rows, NAV history, holdings, and the assembled detail view.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Placeholder rendered for basic-info fields the provider did not return.
pub const MISSING_FIELD: &str = "---";

/// One row of the full-market fund listing, used for fuzzy search matching.
///
/// No uniqueness invariant is enforced in memory; the listing is taken as the
/// provider serves it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FundSummary {
    /// Fund code (e.g., "000001")
    pub code: String,

    /// Short display name
    pub name: String,

    /// Fund category (e.g., "混合型-灵活")
    #[serde(rename = "type")]
    pub fund_type: String,

    /// Phonetic (pinyin) alias used as a fourth search tier
    pub pinyin: String,
}

impl FundSummary {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        fund_type: impl Into<String>,
        pinyin: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            fund_type: fund_type.into(),
            pinyin: pinyin.into(),
        }
    }
}

/// Manager / size / rating block from the fund's basic-info endpoint.
///
/// Every field is optional; the detail assembly falls back to
/// [`MISSING_FIELD`] placeholders.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FundBasicInfo {
    pub manager: Option<String>,
    pub fund_size: Option<String>,
    pub rating: Option<String>,
}

/// One point of the unit-NAV series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavPoint {
    /// Valuation date
    pub date: NaiveDate,

    /// Unit net asset value
    pub nav: Decimal,

    /// Daily growth in percent, absent on non-trading gap rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_growth: Option<f64>,
}

/// One of the fund's top stock holdings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HoldingItem {
    /// Stock code (e.g., "600519")
    pub code: String,

    /// Stock name
    pub name: String,

    /// Portfolio weight in percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// Assembled fund detail response.
///
/// `history` is chronologically descending (newest first) and capped at 100
/// points by the service layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FundDetail {
    pub code: String,
    pub latest_nav: Option<Decimal>,
    pub nav_date: Option<NaiveDate>,
    pub daily_growth: Option<f64>,
    pub manager: String,
    pub fund_size: String,
    pub rating: String,
    pub history: Vec<NavPoint>,
    pub holdings: Vec<HoldingItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fund_summary_serializes_type_key() {
        let summary = FundSummary::new("000001", "华夏成长混合", "混合型-灵活", "HXCZHH");
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["type"], "混合型-灵活");
        assert_eq!(json["code"], "000001");
    }

    #[test]
    fn test_nav_point_omits_missing_growth() {
        let point = NavPoint {
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            nav: dec!(1.2345),
            daily_growth: None,
        };
        let json = serde_json::to_string(&point).unwrap();
        assert!(!json.contains("daily_growth"));
        assert!(json.contains("2026-01-15"));
    }
}
