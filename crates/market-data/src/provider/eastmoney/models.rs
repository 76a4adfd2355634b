//! Response structures for the Eastmoney endpoints.
//!
//! Field names mirror the wire payloads; everything is optional because the
//! endpoints drift between app versions and degrade by omitting fields
//! rather than erroring.

use serde::Deserialize;

// ============================================================================
// Mobile fund API (fundmobapi.eastmoney.com)
// ============================================================================

/// Generic envelope of the mobile fund API.
#[derive(Debug, Deserialize)]
pub(super) struct MobApiResponse<T> {
    #[serde(rename = "Datas")]
    pub datas: Option<T>,
    #[serde(rename = "ErrCode")]
    pub err_code: Option<i64>,
    #[serde(rename = "ErrMsg")]
    pub err_msg: Option<String>,
}

/// FundMNDetailInformation payload, reduced to the fields we map.
#[derive(Debug, Deserialize)]
pub(super) struct FundDetailInformation {
    /// Fund manager name
    #[serde(rename = "JJJL")]
    pub manager: Option<String>,

    /// Latest fund size in CNY, serialized as a string
    #[serde(rename = "ENDNAV")]
    pub end_nav: Option<String>,

    /// Rating (number of stars), serialized as a string
    #[serde(rename = "RLEVEL_SZ")]
    pub rating: Option<String>,
}

/// FundMNInverstPosition payload.
#[derive(Debug, Deserialize)]
pub(super) struct FundInvestPosition {
    #[serde(rename = "fundStocks", default)]
    pub fund_stocks: Vec<FundStockRow>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FundStockRow {
    #[serde(rename = "GPDM")]
    pub code: Option<String>,
    #[serde(rename = "GPJC")]
    pub name: Option<String>,
    /// Portfolio weight in percent, serialized as a string
    #[serde(rename = "JZBL")]
    pub weight: Option<String>,
}

// ============================================================================
// NAV history (api.fund.eastmoney.com/f10/lsjz)
// ============================================================================

#[derive(Debug, Deserialize)]
pub(super) struct NavHistoryResponse {
    #[serde(rename = "Data")]
    pub data: Option<NavHistoryData>,
    #[serde(rename = "ErrCode")]
    pub err_code: Option<i64>,
    #[serde(rename = "ErrMsg")]
    pub err_msg: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct NavHistoryData {
    #[serde(rename = "LSJZList", default)]
    pub list: Vec<NavHistoryRow>,
}

#[derive(Debug, Deserialize)]
pub(super) struct NavHistoryRow {
    /// Valuation date, "YYYY-MM-DD"
    #[serde(rename = "FSRQ")]
    pub date: String,
    /// Unit NAV, serialized as a string
    #[serde(rename = "DWJZ")]
    pub nav: Option<String>,
    /// Daily growth in percent; empty string on gap rows
    #[serde(rename = "JZZZL")]
    pub growth: Option<String>,
}

// ============================================================================
// Limit-up pools (push2ex.eastmoney.com)
// ============================================================================

#[derive(Debug, Deserialize)]
pub(super) struct PoolResponse {
    pub data: Option<PoolData>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PoolData {
    #[serde(default)]
    pub pool: Vec<PoolEntry>,
}

/// One pool row. The endpoint serializes stock codes as bare integers,
/// dropping leading zeros, so the code is taken as a raw value and
/// re-padded by the caller.
#[derive(Debug, Deserialize)]
pub(super) struct PoolEntry {
    /// Stock code, integer or string depending on API version
    pub c: serde_json::Value,
    /// Stock name
    pub n: Option<String>,
    /// Percent change
    pub zdp: Option<f64>,
    /// Consecutive boards
    pub lbc: Option<u32>,
}

// ============================================================================
// North-bound flow (push2.eastmoney.com/api/qt/kamt/get)
// ============================================================================

#[derive(Debug, Deserialize)]
pub(super) struct KamtResponse {
    pub data: Option<KamtData>,
}

#[derive(Debug, Deserialize)]
pub(super) struct KamtData {
    pub hk2sh: Option<KamtSide>,
    pub hk2sz: Option<KamtSide>,
    /// Trade date of the north-bound figures, "MM-DD" as served
    #[serde(rename = "s2nDate")]
    pub s2n_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct KamtSide {
    /// Daily net inflow in 10K CNY (万元)
    #[serde(rename = "dayNetAmtIn")]
    pub day_net_amt_in: Option<f64>,
}

// ============================================================================
// Hot rank (emappdata.eastmoney.com) + quote join (ulist.np/get)
// ============================================================================

#[derive(Debug, Deserialize)]
pub(super) struct HotRankResponse {
    #[serde(default)]
    pub data: Vec<HotRankRow>,
}

#[derive(Debug, Deserialize)]
pub(super) struct HotRankRow {
    /// Prefixed security code, e.g. "SH600519"
    pub sc: String,
    /// Rank, 1 = hottest
    pub rk: u32,
}

#[derive(Debug, Deserialize)]
pub(super) struct QuoteListResponse {
    pub data: Option<QuoteListData>,
}

#[derive(Debug, Deserialize)]
pub(super) struct QuoteListData {
    #[serde(default)]
    pub diff: Vec<QuoteListRow>,
}

#[derive(Debug, Deserialize)]
pub(super) struct QuoteListRow {
    /// Stock code
    pub f12: String,
    /// Stock name
    pub f14: Option<String>,
    /// Percent change; the literal "-" while suspended
    pub f3: Option<serde_json::Value>,
}

// ============================================================================
// Datacenter (datacenter-web.eastmoney.com/api/data/v1/get)
// ============================================================================

#[derive(Debug, Deserialize)]
pub(super) struct DataCenterResponse {
    pub result: Option<DataCenterResult>,
    pub success: Option<bool>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DataCenterResult {
    #[serde(default)]
    pub data: Vec<InstitutionTradeRow>,
}

#[derive(Debug, Deserialize)]
pub(super) struct InstitutionTradeRow {
    #[serde(rename = "SECURITY_CODE")]
    pub code: Option<String>,
    #[serde(rename = "SECURITY_NAME_ABBR")]
    pub name: Option<String>,
    /// Net buy amount in CNY
    #[serde(rename = "NET_BUY_AMT")]
    pub net_buy_amt: Option<f64>,
    /// "YYYY-MM-DD HH:MM:SS"
    #[serde(rename = "TRADE_DATE")]
    pub trade_date: Option<String>,
}
