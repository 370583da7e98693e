//! Canonical query construction for the tracking server's query DSL.
//!
//! The server aggregates events for us: window events are filtered down to
//! periods where the user was not AFK, categorized by the configured
//! taxonomy, and merged by category path. The client only sums durations.

use crate::libs::categories::{Category, Rule};
use serde_json::{json, Value};

/// Builds the statements of the canonical category query.
///
/// The AFK and window buckets are resolved server-side by prefix, so one
/// query works for any host without knowing its bucket suffix.
pub fn canonical_events(categories: &[Category]) -> Vec<String> {
    vec![
        r#"afk_events = flood(query_bucket(find_bucket("aw-watcher-afk_")));"#.to_string(),
        r#"window_events = flood(query_bucket(find_bucket("aw-watcher-window_")));"#.to_string(),
        r#"window_events = filter_period_intersect(window_events, filter_keyvals(afk_events, "status", ["not-afk"]));"#.to_string(),
        format!("events = categorize(window_events, {});", classes_json(categories)),
        r#"events = merge_events_by_keys(events, ["$category"]);"#.to_string(),
        "RETURN = events;".to_string(),
    ]
}

/// Serializes the taxonomy as the `classes` literal of a `categorize()`
/// call: a JSON array of `[path, rule]` pairs.
pub fn classes_json(categories: &[Category]) -> String {
    let classes: Vec<Value> = categories.iter().map(|c| json!([c.path, rule_json(&c.rule)])).collect();
    Value::Array(classes).to_string()
}

fn rule_json(rule: &Rule) -> Value {
    match rule {
        Rule::Regex { pattern, ignore_case } => json!({
            "type": "regex",
            "regex": pattern,
            "ignore_case": ignore_case,
        }),
        Rule::None => json!({ "type": "none" }),
    }
}
