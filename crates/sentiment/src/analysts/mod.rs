//! The four analyst sub-components feeding the dashboard.

mod market_cycle;
mod money_flow;
mod news_mining;
mod social_media;

pub use market_cycle::{CycleMetrics, MarketCycleAnalyst, PHASE_INSUFFICIENT_DATA};
pub use money_flow::{MoneyFlowAnalyst, MoneyFlowSummary};
pub use news_mining::{NewsMiner, NO_NEWS_PLACEHOLDER};
pub use social_media::{SocialPulse, SocialSentinel};
