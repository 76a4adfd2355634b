//! Fundpulse Sentiment Crate
//!
//! Market sentiment dashboard: four analyst sub-components (market cycle,
//! news mining, social sentinel, money flow) feeding one fixed report
//! prompt, with text generation delegated to the configured LLM backend.
//!
//! The analysts are independent and run sequentially; a failed indicator
//! feed aborts the whole report. Evidence discipline lives in the prompt
//! itself: the model is told to cite the supplied figures and to flag
//! missing or stale ones, which the formatting layer passes through rather
//! than papering over.

pub mod analysts;
pub mod dashboard;
pub mod error;
pub mod format;

pub use analysts::{
    CycleMetrics, MarketCycleAnalyst, MoneyFlowAnalyst, MoneyFlowSummary, NewsMiner, SocialPulse,
    SocialSentinel, NO_NEWS_PLACEHOLDER, PHASE_INSUFFICIENT_DATA,
};
pub use dashboard::{build_report_prompt, SentimentDashboard};
pub use error::SentimentError;
pub use format::{fmt_list, fmt_opt, DEFAULT_LIST_LIMIT, EMPTY_LIST_PLACEHOLDER};
