//! Defensive formatting for the report prompt.
//!
//! The analyst payloads are loosely structured and partially missing by
//! nature; these helpers render them without ever failing. Key aliases
//! cover the schema drift observed across upstream feed versions, where the
//! same list arrives with English, Chinese, or title-style keys.

use serde_json::Value;

/// Literal rendered for an empty or missing list.
pub const EMPTY_LIST_PLACEHOLDER: &str = "(无)";

/// Default cap on rendered lines.
pub const DEFAULT_LIST_LIMIT: usize = 5;

/// Fallback display name when no alias matches.
const UNKNOWN_NAME: &str = "N/A";

/// Key aliases tried, in order, for the display name.
const NAME_KEYS: [&str; 3] = ["name", "股票名称", "title"];

/// Key aliases tried, in order, for the instrument code.
const CODE_KEYS: [&str; 2] = ["code", "股票代码"];

/// Render a heterogeneous record list as at most `limit` numbered lines.
///
/// Each line carries the display name, then optionally the code in
/// parentheses, a percent change, and a net-buy figure when those keys are
/// present. Null values count as missing. Non-object items render verbatim.
pub fn fmt_list(items: &[Value], limit: usize) -> String {
    if items.is_empty() {
        return EMPTY_LIST_PLACEHOLDER.to_string();
    }

    let mut lines = Vec::new();
    for (i, item) in items.iter().take(limit).enumerate() {
        let index = i + 1;
        match item {
            Value::Object(map) => {
                let name = first_present(map, &NAME_KEYS)
                    .map(value_display)
                    .unwrap_or_else(|| UNKNOWN_NAME.to_string());
                let mut parts = vec![format!("{}. {}", index, name)];

                if let Some(code) = first_present(map, &CODE_KEYS) {
                    parts.push(format!("({})", value_display(code)));
                }
                if let Some(pct) = present(map, "pct_change") {
                    parts.push(format!("{}%", value_display(pct)));
                }
                if let Some(net_buy) = present(map, "net_buy") {
                    parts.push(format!("净买入{}亿", value_display(net_buy)));
                }

                lines.push(parts.join(" "));
            }
            other => lines.push(format!("{}. {}", index, value_display(other))),
        }
    }

    lines.join("\n")
}

/// Render an optional scalar the way it feeds the prompt: the value itself,
/// or the literal `None` so the model can see the gap.
pub fn fmt_opt<T: std::fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "None".to_string(),
    }
}

fn present<'a>(map: &'a serde_json::Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

fn first_present<'a>(
    map: &'a serde_json::Map<String, Value>,
    keys: &[&str],
) -> Option<&'a Value> {
    keys.iter().find_map(|k| present(map, k))
}

/// Strings render without quotes; everything else via its JSON form.
fn value_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
