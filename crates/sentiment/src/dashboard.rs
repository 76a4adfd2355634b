//! Sentiment dashboard orchestrator.
//!
//! One invocation produces one natural-language market report: the four
//! analysts run in a fixed order, their payloads are rendered into a fixed
//! prompt template, and the text itself comes from the configured LLM
//! backend. There is no partial-report fallback — a failed indicator feed
//! aborts the run.

use std::sync::Arc;

use chrono::Local;
use log::info;

use fundpulse_ai::LlmClient;
use fundpulse_market_data::provider::SentimentFeedProvider;
use fundpulse_news::NewsSearchClient;

use crate::analysts::{
    CycleMetrics, MarketCycleAnalyst, MoneyFlowAnalyst, MoneyFlowSummary, NewsMiner, SocialPulse,
    SocialSentinel,
};
use crate::error::SentimentError;
use crate::format::{fmt_list, fmt_opt, DEFAULT_LIST_LIMIT};

/// How many news items the first-pass screening reads.
const NEWS_FETCH_LIMIT: usize = 15;

pub struct SentimentDashboard {
    llm: Arc<dyn LlmClient>,
    cycle_analyst: MarketCycleAnalyst,
    news_miner: NewsMiner,
    social_sentinel: SocialSentinel,
    money_analyst: MoneyFlowAnalyst,
}

impl SentimentDashboard {
    /// `news_api_key` may be empty; news mining then degrades to no items.
    pub fn new(
        llm: Arc<dyn LlmClient>,
        feed: Arc<dyn SentimentFeedProvider>,
        news_client: Arc<NewsSearchClient>,
        news_api_key: String,
    ) -> Self {
        Self {
            llm: llm.clone(),
            cycle_analyst: MarketCycleAnalyst::new(feed.clone()),
            news_miner: NewsMiner::new(news_client, news_api_key, llm),
            social_sentinel: SocialSentinel::new(feed.clone()),
            money_analyst: MoneyFlowAnalyst::new(feed),
        }
    }

    /// Run the full pipeline and return the generated report.
    pub async fn run_analysis(&self) -> Result<String, SentimentError> {
        info!("1. Analyzing market cycle");
        let cycle = self.cycle_analyst.cycle_metrics().await?;
        let phase = MarketCycleAnalyst::determine_cycle_phase(&cycle);

        info!("2. Mining news");
        let news_items = self.news_miner.fetch_recent_news(NEWS_FETCH_LIMIT).await;
        let news_report = self.news_miner.analyze_news_sentiment(&news_items).await;

        info!("3. Checking social sentiment");
        let social = self.social_sentinel.social_sentiment().await?;

        info!("4. Tracking money flow");
        let money = self.money_analyst.money_flow().await?;

        info!("5. Generating final dashboard report");
        Ok(self
            .generate_final_report(&cycle, &phase, &news_report, &social, &money)
            .await)
    }

    /// Render the prompt from the five inputs and delegate to the LLM.
    ///
    /// Pure up to the LLM call: the same inputs always produce the same
    /// prompt (modulo the report date).
    pub async fn generate_final_report(
        &self,
        cycle: &CycleMetrics,
        phase: &str,
        news_analysis: &str,
        social: &SocialPulse,
        money: &MoneyFlowSummary,
    ) -> String {
        let report_date = Local::now().format("%Y-%m-%d").to_string();
        let prompt = build_report_prompt(cycle, phase, news_analysis, social, money, &report_date);
        self.llm.generate_content(&prompt).await
    }
}

/// Assemble the fixed report prompt.
///
/// Missing numeric and date fields render as the literal `None`; the prompt
/// text itself instructs the model to flag stale-or-missing data instead of
/// the code suppressing it. Scraped news content is substituted without
/// sanitization, as served.
pub fn build_report_prompt(
    cycle: &CycleMetrics,
    phase: &str,
    news_analysis: &str,
    social: &SocialPulse,
    money: &MoneyFlowSummary,
    report_date: &str,
) -> String {
    format!(
        r#"【角色设定】
你是一位身经百战的A股超短游资大佬，风格犀利，厌恶废话，擅长捕捉情绪周期的拐点。
请根据以下数据，为散户兄弟们写一份【实战情绪日报】。

【核心原则（必须遵守）】
1) 只能基于输入数据做判断；不允许编造个股消息、资金数值、政策细节。
2) 每个结论必须引用至少 2 个不同维度的证据：周期指标 + 资金/舆情/消息面之一。
3) 遇到缺失/为0/明显滞后的数据，要明确标注“数据可能滞后/缺失”，不要强行解读。
4) 输出要“短句+结论”，但逻辑要完整：先定性→再给关键证据→最后给可执行策略。

【1. 市场周期数据 (客观指标)】
- 阶段判定: {phase} (基于数据的算法判定，仅供参考，请结合数据修正)
- 涨停数: {limit_up_count} (多<30偏冰点，>60偏活跃)
- 炸板数: {failed_limit_count}
- 封板率: {seal_rate}% (⚠️ 低于65%意味着大面概率上升)
- 连板高度: {market_height}板 (代表投机空间)
- 赚钱效应(昨日涨停溢价): {avg_premium}% (正值代表接力更易赚钱)

【2. 资金博弈 (Smart Money)】
- 北向资金(当日净流入): {north_money} 亿元 (数据日期: {north_date})
- 机构净买入Top5(龙虎榜口径): (数据日期: {institution_date})
{institution_buy}

【3. 社区舆情 (散户反向指标)】
- ⚠️ 人气Top5 (警惕高位接盘):
{top_hot}
- 🔥 情绪核心 (Top20里强势>9%):
{emotion_core}
- 🧊 接飞刀名单 (Top20里<-5%):
{catch_knife}

【4. 消息面核心驱动 (AI初筛结果)】
{news_analysis}

---
【写作要求】
请输出 Markdown 格式，结构如下：

# 🐂 A股情绪实战日报 ({report_date})

## 🔥 核心结论
(用一句话定性：今天是“情绪主升/吃肉”、“分歧退潮/吃面”还是“冰点试错/抄底”？)

## 1️⃣ 周期定位与博弈
- **当前水位**: **{phase}**
- **数据解读**: (必须点名使用：涨停数、封板率、溢价率/赚钱效应、连板高度；并给出你判断的“主线/风险点”。)

## 2️⃣ 舆情与主力透视
- **散户都在买什么**: (点评Top5人气股，如果是高位股，大喊“快跑”；如果是低位启动，提示“关注”。)
- **机构/游资动向**: (必须说明北向与机构数据是否“当日/滞后”；若北向为0或日期不一致，明确写“数据可能未更新”，不要强行归因。)

## 3️⃣ 消息面核心逻辑
(从消息面初筛结果中，挑出明天最可能延续的一个板块：给出“为什么能延续”的两条硬理由 + “一条反证风险”。)

## 💡 明日操盘策略
- **激进型 (打板/接力)**: (给出1条可执行规则：例如“只做首板/只做换手二板/只做趋势回踩”，并说明触发条件和止损。)
- **稳健型 (低吸/趋势)**: (给出1条可执行规则：例如“只做指数共振/只做情绪核心回踩”，并说明触发条件和止损。)"#,
        phase = phase,
        limit_up_count = fmt_opt(&cycle.limit_up_count),
        failed_limit_count = fmt_opt(&cycle.failed_limit_count),
        seal_rate = fmt_opt(&cycle.seal_rate),
        market_height = fmt_opt(&cycle.market_height),
        avg_premium = fmt_opt(&cycle.avg_premium),
        north_money = fmt_opt(&money.north_money),
        north_date = fmt_opt(&money.north_date),
        institution_date = fmt_opt(&money.institution_date),
        institution_buy = fmt_list(&money.institution_buy, DEFAULT_LIST_LIMIT),
        top_hot = fmt_list(&social.top_hot, DEFAULT_LIST_LIMIT),
        emotion_core = fmt_list(&social.emotion_core, DEFAULT_LIST_LIMIT),
        catch_knife = fmt_list(&social.catch_knife, DEFAULT_LIST_LIMIT),
        news_analysis = news_analysis,
        report_date = report_date,
    )
}
