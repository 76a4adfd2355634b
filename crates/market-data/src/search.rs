//! Fund search ranking.
//!
//! Four match tiers, applied in order against the full-market listing:
//! exact code, code prefix, name substring, pinyin substring. The merged
//! result is deduplicated by code and truncated to the requested limit.

use crate::models::FundSummary;

/// Rank the listing against a query.
///
/// The query is trimmed and lowercased first; an empty query yields an empty
/// result. Codes already selected by a higher tier are skipped by the lower
/// ones, so a fund appears at most once.
pub fn rank_funds(funds: &[FundSummary], query: &str, limit: usize) -> Vec<FundSummary> {
    let query = query.trim().to_lowercase();
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut results: Vec<FundSummary> = Vec::new();

    let mut push_tier = |matches: &mut dyn Iterator<Item = &FundSummary>,
                         results: &mut Vec<FundSummary>| {
        for fund in matches {
            if results.len() >= limit {
                break;
            }
            if results.iter().any(|r| r.code == fund.code) {
                continue;
            }
            results.push(fund.clone());
        }
    };

    // Tier 1: exact code match
    push_tier(
        &mut funds.iter().filter(|f| f.code == query),
        &mut results,
    );

    // Tier 2: code prefix
    if results.len() < limit {
        push_tier(
            &mut funds.iter().filter(|f| f.code.starts_with(&query)),
            &mut results,
        );
    }

    // Tier 3: name substring
    if results.len() < limit {
        push_tier(
            &mut funds
                .iter()
                .filter(|f| f.name.to_lowercase().contains(&query)),
            &mut results,
        );
    }

    // Tier 4: pinyin substring
    if results.len() < limit {
        push_tier(
            &mut funds
                .iter()
                .filter(|f| f.pinyin.to_lowercase().contains(&query)),
            &mut results,
        );
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> Vec<FundSummary> {
        vec![
            FundSummary::new("000001", "华夏成长混合", "混合型-灵活", "HXCZHH"),
            FundSummary::new("000011", "华夏大盘精选混合", "混合型-偏股", "HXDPJXHH"),
            FundSummary::new("110011", "易方达中小盘混合", "混合型-偏股", "YFDZXPHH"),
            FundSummary::new("161725", "招商中证白酒指数", "指数型-股票", "ZSZZBJZS"),
            FundSummary::new("001594", "天弘中证银行指数A", "指数型-股票", "THZZYHZSA"),
        ]
    }

    #[test]
    fn test_empty_query_returns_empty() {
        assert!(rank_funds(&listing(), "", 10).is_empty());
        assert!(rank_funds(&listing(), "   ", 10).is_empty());
    }

    #[test]
    fn test_exact_code_ranks_first() {
        let results = rank_funds(&listing(), "000001", 10);
        assert_eq!(results[0].code, "000001");
    }

    #[test]
    fn test_prefix_ranks_before_name_match() {
        // "0000" is a prefix of two codes and matches no names
        let results = rank_funds(&listing(), "0000", 10);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.code.starts_with("0000")));
    }

    #[test]
    fn test_name_substring_match() {
        let results = rank_funds(&listing(), "白酒", 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].code, "161725");
    }

    #[test]
    fn test_pinyin_match_is_last_tier() {
        let results = rank_funds(&listing(), "hxczhh", 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].code, "000001");
    }

    #[test]
    fn test_no_duplicates_across_tiers() {
        // "000001" matches exactly, as a prefix of itself, and nothing else;
        // it must appear once.
        let results = rank_funds(&listing(), "000001", 10);
        assert_eq!(
            results.iter().filter(|r| r.code == "000001").count(),
            1
        );
    }

    #[test]
    fn test_limit_is_respected_across_tiers() {
        let results = rank_funds(&listing(), "混合", 2);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let results = rank_funds(&listing(), "HXCZhh", 10);
        assert_eq!(results.len(), 1);
    }
}
