//! Fund service boundary.
//!
//! Providers return typed errors; this layer absorbs them. Search failures
//! become an empty list and a missing or failed fund detail becomes `None`,
//! so HTTP callers cannot distinguish "not found" from an upstream failure.
//! That contract is inherited from the upstream system and kept on purpose.

use std::sync::Arc;

use log::warn;

use crate::models::{FundDetail, FundSummary, MISSING_FIELD};
use crate::provider::FundDataProvider;
use crate::search::rank_funds;

/// How many NAV points the detail view carries, newest first.
const NAV_HISTORY_LIMIT: usize = 100;

/// Default number of search rows when the caller does not specify one.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Service over a fund data provider.
pub struct FundService {
    provider: Arc<dyn FundDataProvider>,
}

impl FundService {
    pub fn new(provider: Arc<dyn FundDataProvider>) -> Self {
        Self { provider }
    }

    /// Search funds by code, name, or pinyin alias.
    ///
    /// An empty query and any provider failure both yield an empty list.
    pub async fn search_funds(&self, query: &str, limit: usize) -> Vec<FundSummary> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        match self.provider.list_funds().await {
            Ok(listing) => rank_funds(&listing, query, limit),
            Err(e) => {
                warn!("Fund search failed via {}: {}", self.provider.id(), e);
                Vec::new()
            }
        }
    }

    /// Assemble the fund detail view.
    ///
    /// The NAV series is the backbone: without it the result is `None`.
    /// Basic info and holdings degrade independently, to placeholders and an
    /// empty list respectively.
    pub async fn get_fund_detail(&self, code: &str) -> Option<FundDetail> {
        let mut history = match self.provider.nav_history(code).await {
            Ok(points) => points,
            Err(e) => {
                warn!(
                    "NAV history for {} failed via {}: {}",
                    code,
                    self.provider.id(),
                    e
                );
                return None;
            }
        };
        if history.is_empty() {
            return None;
        }
        history.truncate(NAV_HISTORY_LIMIT);

        let basic = match self.provider.fund_basic_info(code).await {
            Ok(info) => info,
            Err(e) => {
                warn!("Basic info for {} failed: {}", code, e);
                Default::default()
            }
        };

        let holdings = match self.provider.fund_holdings(code).await {
            Ok(holdings) => holdings,
            Err(e) => {
                warn!("Holdings for {} failed: {}", code, e);
                Vec::new()
            }
        };

        let latest = &history[0];
        Some(FundDetail {
            code: code.to_string(),
            latest_nav: Some(latest.nav),
            nav_date: Some(latest.date),
            daily_growth: latest.daily_growth,
            manager: basic.manager.unwrap_or_else(|| MISSING_FIELD.to_string()),
            fund_size: basic.fund_size.unwrap_or_else(|| MISSING_FIELD.to_string()),
            rating: basic.rating.unwrap_or_else(|| MISSING_FIELD.to_string()),
            history,
            holdings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MarketDataError;
    use crate::models::{FundBasicInfo, HoldingItem, NavPoint};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    /// Stub provider with scripted outcomes per operation.
    struct StubProvider {
        listing_fails: bool,
        nav_fails: bool,
        basic_fails: bool,
    }

    impl StubProvider {
        fn ok() -> Self {
            Self {
                listing_fails: false,
                nav_fails: false,
                basic_fails: false,
            }
        }
    }

    #[async_trait]
    impl FundDataProvider for StubProvider {
        fn id(&self) -> &'static str {
            "STUB"
        }

        async fn list_funds(&self) -> Result<Vec<FundSummary>, MarketDataError> {
            if self.listing_fails {
                return Err(MarketDataError::ProviderError {
                    provider: "STUB".to_string(),
                    message: "down".to_string(),
                });
            }
            Ok(vec![
                FundSummary::new("000001", "华夏成长混合", "混合型-灵活", "HXCZHH"),
                FundSummary::new("110011", "易方达中小盘混合", "混合型-偏股", "YFDZXPHH"),
            ])
        }

        async fn fund_basic_info(&self, _code: &str) -> Result<FundBasicInfo, MarketDataError> {
            if self.basic_fails {
                return Err(MarketDataError::NoData);
            }
            Ok(FundBasicInfo {
                manager: Some("张三".to_string()),
                fund_size: Some("12.35亿元".to_string()),
                rating: Some("5星".to_string()),
            })
        }

        async fn nav_history(&self, code: &str) -> Result<Vec<NavPoint>, MarketDataError> {
            if self.nav_fails {
                return Err(MarketDataError::FundNotFound(code.to_string()));
            }
            Ok(vec![
                NavPoint {
                    date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
                    nav: dec!(1.2345),
                    daily_growth: Some(0.52),
                },
                NavPoint {
                    date: NaiveDate::from_ymd_opt(2026, 1, 14).unwrap(),
                    nav: dec!(1.2281),
                    daily_growth: None,
                },
            ])
        }

        async fn fund_holdings(&self, _code: &str) -> Result<Vec<HoldingItem>, MarketDataError> {
            Ok(vec![HoldingItem {
                code: "600519".to_string(),
                name: "贵州茅台".to_string(),
                weight: Some(9.87),
            }])
        }
    }

    #[tokio::test]
    async fn test_search_empty_query_returns_empty() {
        let service = FundService::new(Arc::new(StubProvider::ok()));
        assert!(service.search_funds("", 10).await.is_empty());
    }

    #[tokio::test]
    async fn test_search_provider_failure_returns_empty() {
        let service = FundService::new(Arc::new(StubProvider {
            listing_fails: true,
            nav_fails: false,
            basic_fails: false,
        }));
        assert!(service.search_funds("000001", 10).await.is_empty());
    }

    #[tokio::test]
    async fn test_detail_assembles_latest_point() {
        let service = FundService::new(Arc::new(StubProvider::ok()));
        let detail = service.get_fund_detail("000001").await.unwrap();
        assert_eq!(detail.latest_nav, Some(dec!(1.2345)));
        assert_eq!(detail.daily_growth, Some(0.52));
        assert_eq!(detail.manager, "张三");
        assert_eq!(detail.history.len(), 2);
        assert_eq!(detail.holdings.len(), 1);
    }

    #[tokio::test]
    async fn test_detail_none_when_nav_fails() {
        let service = FundService::new(Arc::new(StubProvider {
            listing_fails: false,
            nav_fails: true,
            basic_fails: false,
        }));
        assert!(service.get_fund_detail("000001").await.is_none());
    }

    #[tokio::test]
    async fn test_detail_placeholders_when_basic_info_fails() {
        let service = FundService::new(Arc::new(StubProvider {
            listing_fails: false,
            nav_fails: false,
            basic_fails: true,
        }));
        let detail = service.get_fund_detail("000001").await.unwrap();
        assert_eq!(detail.manager, MISSING_FIELD);
        assert_eq!(detail.fund_size, MISSING_FIELD);
        assert_eq!(detail.rating, MISSING_FIELD);
    }
}
