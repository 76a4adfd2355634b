//! Social sentinel: retail hot-rank classification.
//!
//! The hot rank is read as a contrarian indicator: what retail is piling
//! into, which of it is actually strong, and which of it is a falling
//! knife. Records are kept loosely structured so the report formatter's
//! alias handling applies to them like to any other feed.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use fundpulse_market_data::models::HotRankEntry;
use fundpulse_market_data::provider::SentimentFeedProvider;

use crate::error::SentimentError;

/// How deep into the ranking the classification looks.
const RANK_DEPTH: usize = 20;

/// How many of the hottest names are surfaced verbatim.
const TOP_HOT_COUNT: usize = 5;

/// Percent change above which a ranked stock counts as emotion core.
const EMOTION_CORE_THRESHOLD: f64 = 9.0;

/// Percent change below which a ranked stock counts as a falling knife.
const CATCH_KNIFE_THRESHOLD: f64 = -5.0;

/// Classified social sentiment payload.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SocialPulse {
    /// The hottest names by rank, most popular first
    pub top_hot: Vec<Value>,

    /// Ranked stocks still showing strength (> 9%)
    pub emotion_core: Vec<Value>,

    /// Ranked stocks deep in the red (< -5%)
    pub catch_knife: Vec<Value>,
}

pub struct SocialSentinel {
    feed: Arc<dyn SentimentFeedProvider>,
}

impl SocialSentinel {
    pub fn new(feed: Arc<dyn SentimentFeedProvider>) -> Self {
        Self { feed }
    }

    pub async fn social_sentiment(&self) -> Result<SocialPulse, SentimentError> {
        let ranking = self.feed.hot_rank(RANK_DEPTH).await?;

        let top_hot = ranking.iter().take(TOP_HOT_COUNT).map(to_record).collect();
        let emotion_core = ranking
            .iter()
            .filter(|e| e.pct_change.is_some_and(|p| p > EMOTION_CORE_THRESHOLD))
            .map(to_record)
            .collect();
        let catch_knife = ranking
            .iter()
            .filter(|e| e.pct_change.is_some_and(|p| p < CATCH_KNIFE_THRESHOLD))
            .map(to_record)
            .collect();

        Ok(SocialPulse {
            top_hot,
            emotion_core,
            catch_knife,
        })
    }
}

/// Only fields the feed actually delivered are present in the record, so a
/// missing name exercises the formatter's alias fallback.
fn to_record(entry: &HotRankEntry) -> Value {
    let mut map = Map::new();
    if let Some(name) = &entry.name {
        map.insert("name".to_string(), Value::from(name.clone()));
    }
    map.insert("code".to_string(), Value::from(entry.code.clone()));
    if let Some(pct) = entry.pct_change {
        map.insert("pct_change".to_string(), Value::from(pct));
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fundpulse_market_data::errors::MarketDataError;

    struct StubFeed {
        ranking: Vec<HotRankEntry>,
    }

    #[async_trait]
    impl SentimentFeedProvider for StubFeed {
        fn id(&self) -> &'static str {
            "STUB"
        }

        async fn limit_up_pool(
            &self,
        ) -> Result<Vec<fundpulse_market_data::models::LimitUpEntry>, MarketDataError> {
            Ok(Vec::new())
        }

        async fn failed_limit_pool(
            &self,
        ) -> Result<Vec<fundpulse_market_data::models::LimitUpEntry>, MarketDataError> {
            Ok(Vec::new())
        }

        async fn yesterday_limit_up_pool(
            &self,
        ) -> Result<Vec<fundpulse_market_data::models::LimitUpEntry>, MarketDataError> {
            Ok(Vec::new())
        }

        async fn north_flow(
            &self,
        ) -> Result<fundpulse_market_data::models::NorthFlowSnapshot, MarketDataError> {
            Ok(Default::default())
        }

        async fn hot_rank(&self, _limit: usize) -> Result<Vec<HotRankEntry>, MarketDataError> {
            Ok(self.ranking.clone())
        }

        async fn institution_net_buy(
            &self,
            _limit: usize,
        ) -> Result<fundpulse_market_data::models::InstitutionNetBuySnapshot, MarketDataError>
        {
            Ok(Default::default())
        }
    }

    fn entry(rank: u32, code: &str, name: &str, pct: Option<f64>) -> HotRankEntry {
        HotRankEntry {
            rank,
            code: code.to_string(),
            name: Some(name.to_string()),
            pct_change: pct,
        }
    }

    #[tokio::test]
    async fn test_classification_thresholds() {
        let feed = StubFeed {
            ranking: vec![
                entry(1, "600519", "贵州茅台", Some(1.2)),
                entry(2, "300750", "宁德时代", Some(9.8)),
                entry(3, "002594", "比亚迪", Some(-6.3)),
                entry(4, "601127", "赛力斯", None),
                entry(5, "600030", "中信证券", Some(-5.0)),
                entry(6, "000858", "五粮液", Some(10.01)),
            ],
        };

        let pulse = SocialSentinel::new(Arc::new(feed))
            .social_sentiment()
            .await
            .unwrap();

        assert_eq!(pulse.top_hot.len(), 5);
        // strictly greater than 9
        assert_eq!(pulse.emotion_core.len(), 2);
        // strictly less than -5; -5.0 exactly does not qualify
        assert_eq!(pulse.catch_knife.len(), 1);
        assert_eq!(pulse.catch_knife[0]["name"], "比亚迪");
    }

    #[tokio::test]
    async fn test_records_omit_missing_fields() {
        let feed = StubFeed {
            ranking: vec![HotRankEntry {
                rank: 1,
                code: "600519".to_string(),
                name: None,
                pct_change: None,
            }],
        };

        let pulse = SocialSentinel::new(Arc::new(feed))
            .social_sentiment()
            .await
            .unwrap();

        let record = pulse.top_hot[0].as_object().unwrap();
        assert!(!record.contains_key("name"));
        assert!(!record.contains_key("pct_change"));
        assert_eq!(record["code"], "600519");
    }
}
