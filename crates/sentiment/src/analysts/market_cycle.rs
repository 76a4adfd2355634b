//! Market cycle analyst: limit-up pool aggregation and phase determination.

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use fundpulse_market_data::provider::SentimentFeedProvider;

use crate::error::SentimentError;

/// Aggregated cycle metrics. Every field is optional: an empty pool on a
/// holiday or a partial feed leaves gaps that travel into the prompt as-is.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CycleMetrics {
    /// Number of stocks closing at limit-up
    pub limit_up_count: Option<u32>,

    /// Number of stocks that touched the limit and broke
    pub failed_limit_count: Option<u32>,

    /// Share of limit-touchers that stayed sealed, in percent
    pub seal_rate: Option<f64>,

    /// Highest consecutive-board count in the pool
    pub market_height: Option<u32>,

    /// Average follow-through of yesterday's limit-ups, in percent
    pub avg_premium: Option<f64>,
}

/// Phase label when the feed left too many gaps to classify.
pub const PHASE_INSUFFICIENT_DATA: &str = "数据不足";

pub struct MarketCycleAnalyst {
    feed: Arc<dyn SentimentFeedProvider>,
}

impl MarketCycleAnalyst {
    pub fn new(feed: Arc<dyn SentimentFeedProvider>) -> Self {
        Self { feed }
    }

    /// Fetch the three pool snapshots and aggregate them.
    pub async fn cycle_metrics(&self) -> Result<CycleMetrics, SentimentError> {
        let pool = self.feed.limit_up_pool().await?;
        let failed = self.feed.failed_limit_pool().await?;
        let yesterday = self.feed.yesterday_limit_up_pool().await?;

        let limit_up_count = pool.len() as u32;
        let failed_limit_count = failed.len() as u32;

        let touched = limit_up_count + failed_limit_count;
        let seal_rate = if touched > 0 {
            Some(round2(100.0 * f64::from(limit_up_count) / f64::from(touched)))
        } else {
            None
        };

        let market_height = pool.iter().filter_map(|e| e.consecutive_boards).max();

        let premiums: Vec<f64> = yesterday.iter().filter_map(|e| e.pct_change).collect();
        let avg_premium = if premiums.is_empty() {
            None
        } else {
            Some(round2(premiums.iter().sum::<f64>() / premiums.len() as f64))
        };

        debug!(
            "Cycle metrics: {} limit-ups, {} failed, height {:?}",
            limit_up_count, failed_limit_count, market_height
        );

        Ok(CycleMetrics {
            limit_up_count: Some(limit_up_count),
            failed_limit_count: Some(failed_limit_count),
            seal_rate,
            market_height,
            avg_premium,
        })
    }

    /// Classify the emotional cycle phase from the metrics.
    ///
    /// Thresholds follow the annotations the report prompt itself carries:
    /// under 30 limit-ups is freeze territory, over 60 is an active market,
    /// a seal rate under 65% signals failing follow-through, and a positive
    /// premium means chasing paid.
    pub fn determine_cycle_phase(metrics: &CycleMetrics) -> String {
        let (limit_ups, seal_rate) = match (metrics.limit_up_count, metrics.seal_rate) {
            (Some(l), Some(s)) => (l, s),
            _ => return PHASE_INSUFFICIENT_DATA.to_string(),
        };
        let premium = metrics.avg_premium.unwrap_or(0.0);

        if limit_ups < 30 {
            if premium > 0.0 {
                return "修复期".to_string();
            }
            return "冰点期".to_string();
        }
        if seal_rate < 65.0 {
            return "退潮期".to_string();
        }
        if limit_ups > 60 && seal_rate >= 75.0 {
            return "高潮期".to_string();
        }
        if premium > 0.0 {
            return "发酵期".to_string();
        }
        "修复期".to_string()
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(limit_ups: u32, seal_rate: f64, premium: f64) -> CycleMetrics {
        CycleMetrics {
            limit_up_count: Some(limit_ups),
            failed_limit_count: None,
            seal_rate: Some(seal_rate),
            market_height: None,
            avg_premium: Some(premium),
        }
    }

    #[test]
    fn test_missing_metrics_is_insufficient_data() {
        let phase = MarketCycleAnalyst::determine_cycle_phase(&CycleMetrics::default());
        assert_eq!(phase, PHASE_INSUFFICIENT_DATA);
    }

    #[test]
    fn test_freeze_phase() {
        assert_eq!(
            MarketCycleAnalyst::determine_cycle_phase(&metrics(15, 70.0, -2.0)),
            "冰点期"
        );
    }

    #[test]
    fn test_recovery_from_freeze() {
        assert_eq!(
            MarketCycleAnalyst::determine_cycle_phase(&metrics(25, 70.0, 1.5)),
            "修复期"
        );
    }

    #[test]
    fn test_ebb_phase_on_low_seal_rate() {
        assert_eq!(
            MarketCycleAnalyst::determine_cycle_phase(&metrics(50, 55.0, 2.0)),
            "退潮期"
        );
    }

    #[test]
    fn test_climax_phase() {
        assert_eq!(
            MarketCycleAnalyst::determine_cycle_phase(&metrics(80, 82.0, -0.5)),
            "高潮期"
        );
    }

    #[test]
    fn test_fermentation_phase() {
        assert_eq!(
            MarketCycleAnalyst::determine_cycle_phase(&metrics(45, 72.0, 3.1)),
            "发酵期"
        );
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(66.66666), 66.67);
    }
}
