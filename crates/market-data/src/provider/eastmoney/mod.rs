//! Eastmoney market data provider implementation.
//!
//! This module provides fund reference data and market-sentiment indicator
//! feeds from Eastmoney public endpoints:
//! - Fund listing via the fundcode_search script
//! - Fund detail / holdings via the mobile fund API
//! - NAV history via the f10/lsjz endpoint
//! - Limit-up pools, north-bound flow, hot rank and dragon-tiger
//!   institutional trades via the push2/datacenter endpoints
//!
//! The endpoints drift between provider releases: codes switch between
//! integers and strings, percent fields disappear while a stock is
//! suspended, column order in the listing script changes. Parsing here is
//! deliberately tolerant and normalizes everything to the crate models.

mod models;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use reqwest::Client;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::MarketDataError;
use crate::models::{
    FundBasicInfo, FundSummary, HoldingItem, HotRankEntry, InstitutionNetBuySnapshot,
    InstitutionTrade, LimitUpEntry, NavPoint, NorthFlowSnapshot,
};
use crate::provider::{FundDataProvider, SentimentFeedProvider};

use models::*;

const PROVIDER_ID: &str = "EASTMONEY";

const FUND_LISTING_URL: &str = "http://fund.eastmoney.com/js/fundcode_search.js";
const FUND_DETAIL_URL: &str =
    "https://fundmobapi.eastmoney.com/FundMNewApi/FundMNDetailInformation";
const FUND_POSITION_URL: &str =
    "https://fundmobapi.eastmoney.com/FundMNewApi/FundMNInverstPosition";
const NAV_HISTORY_URL: &str = "https://api.fund.eastmoney.com/f10/lsjz";
const NAV_HISTORY_REFERER: &str = "http://fundf10.eastmoney.com/";

const LIMIT_UP_POOL_URL: &str = "http://push2ex.eastmoney.com/getTopicZTPool";
const FAILED_POOL_URL: &str = "http://push2ex.eastmoney.com/getTopicZBPool";
const YESTERDAY_POOL_URL: &str = "http://push2ex.eastmoney.com/getYesterdayZTPool";
const POOL_UT: &str = "7eea3edcaed734bea9cbfc24409ed989";

const NORTH_FLOW_URL: &str = "https://push2.eastmoney.com/api/qt/kamt/get";
const HOT_RANK_URL: &str = "https://emappdata.eastmoney.com/stockrank/getAllCurrentList";
const QUOTE_LIST_URL: &str = "https://push2.eastmoney.com/api/qt/ulist.np/get";
const DATACENTER_URL: &str = "https://datacenter-web.eastmoney.com/api/data/v1/get";

/// Mobile API parameters required on every fundmobapi call.
const MOBAPI_PARAMS: [(&str, &str); 4] = [
    ("deviceid", "Wap"),
    ("plat", "Wap"),
    ("product", "EFund"),
    ("version", "6.2.8"),
];

/// Eastmoney provider for fund data and sentiment indicator feeds.
pub struct EastMoneyProvider {
    client: Client,
}

impl Default for EastMoneyProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl EastMoneyProvider {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (compatible; fundpulse)")
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    /// GET a URL with query parameters and return the response body.
    async fn fetch(
        &self,
        url: &str,
        params: &[(&str, &str)],
        referer: Option<&str>,
    ) -> Result<String, MarketDataError> {
        let mut request = self.client.get(url).query(params);
        if let Some(r) = referer {
            request = request.header(reqwest::header::REFERER, r);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }
        if !status.is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        response
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })
    }

    fn parse_json<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, MarketDataError> {
        serde_json::from_str(text).map_err(|e| MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to parse response: {}", e),
        })
    }

    /// Parse the fundcode_search script body.
    ///
    /// The payload is `var r = [["000001","HXCZHH","华夏成长混合","混合型-灵活",…],…];`
    /// with a JSON array embedded in a JS assignment. Rows are positional:
    /// code, pinyin abbreviation, name, type, then optionally the full
    /// pinyin. Short rows are skipped.
    fn parse_fund_listing(text: &str) -> Result<Vec<FundSummary>, MarketDataError> {
        let start = text.find('[');
        let end = text.rfind(']');
        let (start, end) = match (start, end) {
            (Some(s), Some(e)) if s < e => (s, e),
            _ => {
                return Err(MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: "Listing script has no embedded array".to_string(),
                })
            }
        };

        let rows: Vec<Vec<String>> = Self::parse_json(&text[start..=end])?;
        let funds = rows
            .into_iter()
            .filter_map(|row| {
                if row.len() < 4 {
                    return None;
                }
                Some(FundSummary::new(
                    row[0].clone(),
                    row[2].clone(),
                    row[3].clone(),
                    row[1].clone(),
                ))
            })
            .collect();

        Ok(funds)
    }

    /// Normalize a pool code value: the endpoint serializes codes as bare
    /// integers, which drops the leading zeros of Shenzhen codes.
    fn pool_code(value: &serde_json::Value) -> Option<String> {
        match value {
            serde_json::Value::String(s) if !s.is_empty() => Some(format!("{:0>6}", s)),
            serde_json::Value::Number(n) => n.as_u64().map(|v| format!("{:06}", v)),
            _ => None,
        }
    }

    /// Percent-change values come back as numbers or the literal "-" while
    /// a stock is suspended.
    fn value_to_f64(value: &serde_json::Value) -> Option<f64> {
        match value {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.parse::<f64>().ok(),
            _ => None,
        }
    }

    fn parse_opt_f64(s: &Option<String>) -> Option<f64> {
        s.as_ref()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty() && *v != "-" && *v != "--")
            .and_then(|v| v.parse::<f64>().ok())
    }

    /// Format a raw CNY fund size as "x.xx亿元"; non-numeric values pass
    /// through unchanged.
    fn format_fund_size(raw: &str) -> String {
        match raw.trim().parse::<f64>() {
            Ok(v) => format!("{:.2}亿元", v / 1e8),
            Err(_) => raw.to_string(),
        }
    }

    async fn fetch_pool(&self, url: &str) -> Result<Vec<LimitUpEntry>, MarketDataError> {
        let params = [
            ("ut", POOL_UT),
            ("dpt", "wz.ztzt"),
            ("Pageindex", "0"),
            ("pagesize", "320"),
        ];
        let text = self.fetch(url, &params, None).await?;
        let response: PoolResponse = Self::parse_json(&text)?;

        let entries = response
            .data
            .map(|d| d.pool)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|row| {
                let code = Self::pool_code(&row.c)?;
                Some(LimitUpEntry {
                    code,
                    name: row.n.unwrap_or_default(),
                    pct_change: row.zdp,
                    consecutive_boards: row.lbc,
                })
            })
            .collect();

        Ok(entries)
    }

    /// Join hot-rank codes with names and percent changes from the quote
    /// list endpoint. A failed join degrades to rank+code rows.
    async fn join_hot_rank_quotes(
        &self,
        rows: Vec<HotRankRow>,
    ) -> Result<Vec<HotRankEntry>, MarketDataError> {
        let secids: Vec<String> = rows
            .iter()
            .filter_map(|r| {
                let market = r.sc.get(..2)?;
                let code = r.sc.get(2..)?;
                match market {
                    "SH" => Some(format!("1.{}", code)),
                    "SZ" => Some(format!("0.{}", code)),
                    _ => None,
                }
            })
            .collect();

        let mut quotes = Vec::new();
        if !secids.is_empty() {
            let secids = secids.join(",");
            let params = [
                ("fltt", "2"),
                ("invt", "2"),
                ("fields", "f3,f12,f14"),
                ("secids", secids.as_str()),
            ];
            match self.fetch(QUOTE_LIST_URL, &params, None).await {
                Ok(text) => {
                    let response: QuoteListResponse = Self::parse_json(&text)?;
                    quotes = response.data.map(|d| d.diff).unwrap_or_default();
                }
                Err(e) => {
                    warn!("Eastmoney: hot rank quote join failed: {}", e);
                }
            }
        }

        let entries = rows
            .into_iter()
            .map(|row| {
                let code = row.sc.get(2..).unwrap_or(&row.sc).to_string();
                let quote = quotes.iter().find(|q| q.f12 == code);
                HotRankEntry {
                    rank: row.rk,
                    code,
                    name: quote.and_then(|q| q.f14.clone()),
                    pct_change: quote
                        .and_then(|q| q.f3.as_ref())
                        .and_then(Self::value_to_f64),
                }
            })
            .collect();

        Ok(entries)
    }
}

// ============================================================================
// FundDataProvider implementation
// ============================================================================

#[async_trait]
impl FundDataProvider for EastMoneyProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn list_funds(&self) -> Result<Vec<FundSummary>, MarketDataError> {
        let text = self.fetch(FUND_LISTING_URL, &[], None).await?;
        let funds = Self::parse_fund_listing(&text)?;
        debug!("Eastmoney: listed {} funds", funds.len());
        Ok(funds)
    }

    async fn fund_basic_info(&self, code: &str) -> Result<FundBasicInfo, MarketDataError> {
        let mut params = vec![("FCODE", code)];
        params.extend_from_slice(&MOBAPI_PARAMS);

        let text = self.fetch(FUND_DETAIL_URL, &params, None).await?;
        let response: MobApiResponse<FundDetailInformation> = Self::parse_json(&text)?;

        if let Some(msg) = response.err_msg.filter(|m| !m.is_empty()) {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: msg,
            });
        }

        let datas = response
            .datas
            .ok_or_else(|| MarketDataError::FundNotFound(code.to_string()))?;

        Ok(FundBasicInfo {
            manager: datas.manager.filter(|m| !m.is_empty()),
            fund_size: datas
                .end_nav
                .filter(|v| !v.is_empty())
                .map(|v| Self::format_fund_size(&v)),
            rating: datas
                .rating
                .filter(|v| !v.is_empty() && v != "-")
                .map(|v| format!("{}星", v)),
        })
    }

    async fn nav_history(&self, code: &str) -> Result<Vec<NavPoint>, MarketDataError> {
        let params = [
            ("fundCode", code),
            ("pageIndex", "1"),
            ("pageSize", "100"),
        ];
        let text = self
            .fetch(NAV_HISTORY_URL, &params, Some(NAV_HISTORY_REFERER))
            .await?;
        let response: NavHistoryResponse = Self::parse_json(&text)?;

        if response.err_code.is_some_and(|c| c != 0) {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: response
                    .err_msg
                    .unwrap_or_else(|| "NAV history error".to_string()),
            });
        }

        let rows = response.data.map(|d| d.list).unwrap_or_default();
        if rows.is_empty() {
            return Err(MarketDataError::FundNotFound(code.to_string()));
        }

        // Served newest first; kept that way.
        let points = rows
            .into_iter()
            .filter_map(|row| {
                let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d").ok()?;
                let nav = row.nav.as_deref().and_then(|v| Decimal::from_str(v).ok())?;
                Some(NavPoint {
                    date,
                    nav,
                    daily_growth: Self::parse_opt_f64(&row.growth),
                })
            })
            .collect();

        Ok(points)
    }

    async fn fund_holdings(&self, code: &str) -> Result<Vec<HoldingItem>, MarketDataError> {
        let mut params = vec![("FCODE", code)];
        params.extend_from_slice(&MOBAPI_PARAMS);

        let text = self.fetch(FUND_POSITION_URL, &params, None).await?;
        let response: MobApiResponse<FundInvestPosition> = Self::parse_json(&text)?;

        let holdings = response
            .datas
            .map(|d| d.fund_stocks)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|row| {
                Some(HoldingItem {
                    code: row.code?,
                    name: row.name.unwrap_or_default(),
                    weight: Self::parse_opt_f64(&row.weight),
                })
            })
            .collect();

        Ok(holdings)
    }
}

// ============================================================================
// SentimentFeedProvider implementation
// ============================================================================

#[async_trait]
impl SentimentFeedProvider for EastMoneyProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn limit_up_pool(&self) -> Result<Vec<LimitUpEntry>, MarketDataError> {
        let pool = self.fetch_pool(LIMIT_UP_POOL_URL).await?;
        debug!("Eastmoney: limit-up pool has {} entries", pool.len());
        Ok(pool)
    }

    async fn failed_limit_pool(&self) -> Result<Vec<LimitUpEntry>, MarketDataError> {
        self.fetch_pool(FAILED_POOL_URL).await
    }

    async fn yesterday_limit_up_pool(&self) -> Result<Vec<LimitUpEntry>, MarketDataError> {
        self.fetch_pool(YESTERDAY_POOL_URL).await
    }

    async fn north_flow(&self) -> Result<NorthFlowSnapshot, MarketDataError> {
        let params = [
            ("fields1", "f1,f2,f3,f4"),
            ("fields2", "f51,f52,f53,f54"),
        ];
        let text = self.fetch(NORTH_FLOW_URL, &params, None).await?;
        let response: KamtResponse = Self::parse_json(&text)?;

        let data = response.data.ok_or(MarketDataError::NoData)?;
        let sh = data.hk2sh.and_then(|s| s.day_net_amt_in);
        let sz = data.hk2sz.and_then(|s| s.day_net_amt_in);

        // Figures arrive in 万元; report 亿元. Either leg alone still counts.
        let net_inflow = match (sh, sz) {
            (None, None) => None,
            (a, b) => Some((a.unwrap_or(0.0) + b.unwrap_or(0.0)) / 1e4),
        };

        Ok(NorthFlowSnapshot {
            net_inflow: net_inflow.map(|v| (v * 100.0).round() / 100.0),
            date: data.s2n_date,
        })
    }

    async fn hot_rank(&self, limit: usize) -> Result<Vec<HotRankEntry>, MarketDataError> {
        let body = serde_json::json!({
            "appId": "appId01",
            "globalId": "786e4c21-70dc-435a-93bb-38",
            "marketType": "",
            "pageNo": 1,
            "pageSize": limit,
        });

        let response = self
            .client
            .post(HOT_RANK_URL)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketDataError::Timeout {
                        provider: PROVIDER_ID.to_string(),
                    }
                } else {
                    MarketDataError::ProviderError {
                        provider: PROVIDER_ID.to_string(),
                        message: e.to_string(),
                    }
                }
            })?;

        if !response.status().is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })?;
        let response: HotRankResponse = Self::parse_json(&text)?;

        let mut rows = response.data;
        rows.truncate(limit);
        self.join_hot_rank_quotes(rows).await
    }

    async fn institution_net_buy(
        &self,
        limit: usize,
    ) -> Result<InstitutionNetBuySnapshot, MarketDataError> {
        let page_size = limit.to_string();
        let params = [
            ("reportName", "RPT_ORGANIZATION_TRADE_DETAILS"),
            ("columns", "ALL"),
            ("source", "WEB"),
            ("client", "WEB"),
            ("sortColumns", "TRADE_DATE,NET_BUY_AMT"),
            ("sortTypes", "-1,-1"),
            ("pageNumber", "1"),
            ("pageSize", page_size.as_str()),
        ];
        let text = self.fetch(DATACENTER_URL, &params, None).await?;
        let response: DataCenterResponse = Self::parse_json(&text)?;

        if response.success == Some(false) {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: response.message.unwrap_or_else(|| "datacenter error".to_string()),
            });
        }

        let rows = response.result.map(|r| r.data).unwrap_or_default();
        let date = rows
            .first()
            .and_then(|r| r.trade_date.as_deref())
            .map(|d| d.split_whitespace().next().unwrap_or(d).to_string());

        let entries = rows
            .into_iter()
            .filter_map(|row| {
                Some(InstitutionTrade {
                    code: row.code?,
                    name: row.name.unwrap_or_default(),
                    net_buy: row
                        .net_buy_amt
                        .map(|v| (v / 1e8 * 100.0).round() / 100.0),
                })
            })
            .collect();

        Ok(InstitutionNetBuySnapshot { date, entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fund_listing() {
        let script = r#"var r = [["000001","HXCZHH","华夏成长混合","混合型-灵活","HUAXIACHENGZHANGHUNHE"],["000003","ZHKZZZQA","中海可转债债券A","债券型-可转债","ZHONGHAIKEZHUANZHAIZHAIQUANA"]];"#;
        let funds = EastMoneyProvider::parse_fund_listing(script).unwrap();
        assert_eq!(funds.len(), 2);
        assert_eq!(funds[0].code, "000001");
        assert_eq!(funds[0].name, "华夏成长混合");
        assert_eq!(funds[0].fund_type, "混合型-灵活");
        assert_eq!(funds[0].pinyin, "HXCZHH");
    }

    #[test]
    fn test_parse_fund_listing_skips_short_rows() {
        let script = r#"var r = [["000001","HXCZHH","华夏成长混合","混合型-灵活"],["junk"]];"#;
        let funds = EastMoneyProvider::parse_fund_listing(script).unwrap();
        assert_eq!(funds.len(), 1);
    }

    #[test]
    fn test_parse_fund_listing_without_array_is_error() {
        assert!(EastMoneyProvider::parse_fund_listing("var r = null;").is_err());
    }

    #[test]
    fn test_pool_code_pads_integer_codes() {
        let v = serde_json::json!(2594);
        assert_eq!(EastMoneyProvider::pool_code(&v), Some("002594".to_string()));

        let v = serde_json::json!("600519");
        assert_eq!(EastMoneyProvider::pool_code(&v), Some("600519".to_string()));

        assert_eq!(EastMoneyProvider::pool_code(&serde_json::Value::Null), None);
    }

    #[test]
    fn test_pool_response_parsing() {
        let json = r#"{"data":{"pool":[{"c":600519,"n":"贵州茅台","zdp":10.01,"lbc":2},{"c":"000001","n":"平安银行","zdp":9.98}]}}"#;
        let response: PoolResponse = serde_json::from_str(json).unwrap();
        let pool = response.data.unwrap().pool;
        assert_eq!(pool.len(), 2);
        assert_eq!(pool[0].lbc, Some(2));
        assert_eq!(pool[1].lbc, None);
    }

    #[test]
    fn test_nav_history_row_parsing() {
        let json = r#"{"Data":{"LSJZList":[{"FSRQ":"2026-01-15","DWJZ":"1.2345","JZZZL":"0.52"},{"FSRQ":"2026-01-14","DWJZ":"1.2281","JZZZL":""}]},"ErrCode":0}"#;
        let response: NavHistoryResponse = serde_json::from_str(json).unwrap();
        let rows = response.data.unwrap().list;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, "2026-01-15");
        assert_eq!(EastMoneyProvider::parse_opt_f64(&rows[0].growth), Some(0.52));
        assert_eq!(EastMoneyProvider::parse_opt_f64(&rows[1].growth), None);
    }

    #[test]
    fn test_value_to_f64_handles_suspended_marker() {
        assert_eq!(
            EastMoneyProvider::value_to_f64(&serde_json::json!(3.21)),
            Some(3.21)
        );
        assert_eq!(
            EastMoneyProvider::value_to_f64(&serde_json::json!("-")),
            None
        );
        assert_eq!(
            EastMoneyProvider::value_to_f64(&serde_json::json!("1.5")),
            Some(1.5)
        );
    }

    #[test]
    fn test_format_fund_size() {
        assert_eq!(
            EastMoneyProvider::format_fund_size("1234567890.5"),
            "12.35亿元"
        );
        assert_eq!(EastMoneyProvider::format_fund_size("n/a"), "n/a");
    }

    #[test]
    fn test_kamt_parsing_sums_both_legs() {
        let json = r#"{"data":{"hk2sh":{"dayNetAmtIn":123456.0},"hk2sz":{"dayNetAmtIn":-23456.0},"s2nDate":"01-15"}}"#;
        let response: KamtResponse = serde_json::from_str(json).unwrap();
        let data = response.data.unwrap();
        let sh = data.hk2sh.unwrap().day_net_amt_in.unwrap();
        let sz = data.hk2sz.unwrap().day_net_amt_in.unwrap();
        assert!(((sh + sz) / 1e4 - 10.0).abs() < 1e-9);
        assert_eq!(data.s2n_date.as_deref(), Some("01-15"));
    }

    #[test]
    fn test_datacenter_row_parsing() {
        let json = r#"{"result":{"data":[{"SECURITY_CODE":"600519","SECURITY_NAME_ABBR":"贵州茅台","NET_BUY_AMT":312345678.0,"TRADE_DATE":"2026-01-15 00:00:00"}]},"success":true,"message":"ok"}"#;
        let response: DataCenterResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.success, Some(true));
        let rows = response.result.unwrap().data;
        assert_eq!(rows[0].code.as_deref(), Some("600519"));
        assert_eq!(
            rows[0]
                .trade_date
                .as_deref()
                .and_then(|d| d.split_whitespace().next()),
            Some("2026-01-15")
        );
    }

    #[test]
    fn test_hot_rank_row_parsing() {
        let json = r#"{"data":[{"sc":"SH600519","rk":1},{"sc":"SZ000001","rk":2}]}"#;
        let response: HotRankResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[0].sc, "SH600519");
        assert_eq!(response.data[1].rk, 2);
    }
}
