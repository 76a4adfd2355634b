//! Money flow analyst: north-bound capital and institutional net buys.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use fundpulse_market_data::models::InstitutionTrade;
use fundpulse_market_data::provider::SentimentFeedProvider;

use crate::error::SentimentError;

/// How many institutional rows the report reads.
const INSTITUTION_TOP_COUNT: usize = 5;

/// Smart-money payload for the report.
///
/// The figures are passed through exactly as reported, including a literal
/// zero inflow; the report prompt pairs each figure with its data date and
/// instructs the model to call out stale-looking combinations instead of
/// the code reinterpreting them.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MoneyFlowSummary {
    /// North-bound daily net inflow in 100M CNY (亿元)
    pub north_money: Option<f64>,

    /// Data date of the north-bound figure
    pub north_date: Option<String>,

    /// Top institutional net buys, loosely structured records
    pub institution_buy: Vec<Value>,

    /// Data date of the institutional rows
    pub institution_date: Option<String>,
}

pub struct MoneyFlowAnalyst {
    feed: Arc<dyn SentimentFeedProvider>,
}

impl MoneyFlowAnalyst {
    pub fn new(feed: Arc<dyn SentimentFeedProvider>) -> Self {
        Self { feed }
    }

    pub async fn money_flow(&self) -> Result<MoneyFlowSummary, SentimentError> {
        let north = self.feed.north_flow().await?;
        let institutions = self.feed.institution_net_buy(INSTITUTION_TOP_COUNT).await?;

        Ok(MoneyFlowSummary {
            north_money: north.net_inflow,
            north_date: north.date,
            institution_buy: institutions.entries.iter().map(to_record).collect(),
            institution_date: institutions.date,
        })
    }
}

fn to_record(trade: &InstitutionTrade) -> Value {
    let mut map = Map::new();
    map.insert("name".to_string(), Value::from(trade.name.clone()));
    map.insert("code".to_string(), Value::from(trade.code.clone()));
    if let Some(net_buy) = trade.net_buy {
        map.insert("net_buy".to_string(), Value::from(net_buy));
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fundpulse_market_data::errors::MarketDataError;
    use fundpulse_market_data::models::{
        HotRankEntry, InstitutionNetBuySnapshot, LimitUpEntry, NorthFlowSnapshot,
    };

    struct StubFeed;

    #[async_trait]
    impl SentimentFeedProvider for StubFeed {
        fn id(&self) -> &'static str {
            "STUB"
        }

        async fn limit_up_pool(&self) -> Result<Vec<LimitUpEntry>, MarketDataError> {
            Ok(Vec::new())
        }

        async fn failed_limit_pool(&self) -> Result<Vec<LimitUpEntry>, MarketDataError> {
            Ok(Vec::new())
        }

        async fn yesterday_limit_up_pool(&self) -> Result<Vec<LimitUpEntry>, MarketDataError> {
            Ok(Vec::new())
        }

        async fn north_flow(&self) -> Result<NorthFlowSnapshot, MarketDataError> {
            Ok(NorthFlowSnapshot {
                net_inflow: Some(0.0),
                date: Some("01-14".to_string()),
            })
        }

        async fn hot_rank(&self, _limit: usize) -> Result<Vec<HotRankEntry>, MarketDataError> {
            Ok(Vec::new())
        }

        async fn institution_net_buy(
            &self,
            limit: usize,
        ) -> Result<InstitutionNetBuySnapshot, MarketDataError> {
            assert_eq!(limit, 5);
            Ok(InstitutionNetBuySnapshot {
                date: Some("2026-01-15".to_string()),
                entries: vec![InstitutionTrade {
                    code: "600519".to_string(),
                    name: "贵州茅台".to_string(),
                    net_buy: Some(2.53),
                }],
            })
        }
    }

    #[tokio::test]
    async fn test_zero_inflow_is_passed_through() {
        let summary = MoneyFlowAnalyst::new(Arc::new(StubFeed))
            .money_flow()
            .await
            .unwrap();

        // 0.0 is a reported figure, not a gap
        assert_eq!(summary.north_money, Some(0.0));
        assert_eq!(summary.north_date.as_deref(), Some("01-14"));
        assert_eq!(summary.institution_date.as_deref(), Some("2026-01-15"));
        assert_eq!(summary.institution_buy[0]["net_buy"], 2.53);
    }
}
