//! Plain-text rendering of the chat history.

use banter_types::{ChatMessage, MessageRole};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};

use crate::api::Stats;

pub const EMPTY_HISTORY: &str = "No messages yet, say hi!";
pub const TYPING_INDICATOR: &str = "AI is typing...";

/// Messages bucketed by UTC calendar day, days ascending
pub fn group_by_day(messages: &[ChatMessage]) -> Vec<(NaiveDate, Vec<&ChatMessage>)> {
    let mut days: BTreeMap<NaiveDate, Vec<&ChatMessage>> = BTreeMap::new();
    for message in messages {
        days.entry(message.created_at.date_naive())
            .or_default()
            .push(message);
    }
    days.into_iter().collect()
}

pub fn role_label(role: MessageRole) -> &'static str {
    match role {
        MessageRole::User => "You",
        MessageRole::Assistant => "AI",
    }
}

pub fn day_separator(day: NaiveDate) -> String {
    format!("──────── {} ────────", day.format("%Y-%m-%d"))
}

pub fn format_message(message: &ChatMessage) -> String {
    format!(
        "[{}] {}: {}",
        message.created_at.format("%H:%M"),
        role_label(message.role),
        message.text
    )
}

pub fn render_history(messages: &[ChatMessage]) -> String {
    if messages.is_empty() {
        return EMPTY_HISTORY.to_string();
    }

    let mut lines = Vec::new();
    for (day, group) in group_by_day(messages) {
        lines.push(day_separator(day));
        lines.extend(group.into_iter().map(format_message));
    }
    lines.join("\n")
}

/// Entries of `current` whose ids were not in `previous`, in server order
pub fn new_messages<'a>(previous: &[ChatMessage], current: &'a [ChatMessage]) -> Vec<&'a ChatMessage> {
    let seen: HashSet<&str> = previous.iter().map(|m| m.id.as_str()).collect();
    current
        .iter()
        .filter(|m| !seen.contains(m.id.as_str()))
        .collect()
}

/// Render messages appended after `last_day`, opening a new day section
/// whenever the date changes
pub fn render_appended(last_day: Option<NaiveDate>, appended: &[&ChatMessage]) -> String {
    let mut lines = Vec::new();
    let mut current_day = last_day;
    for message in appended {
        let day = message.created_at.date_naive();
        if current_day != Some(day) {
            lines.push(day_separator(day));
            current_day = Some(day);
        }
        lines.push(format_message(message));
    }
    lines.join("\n")
}

pub fn format_stats(stats: &Stats) -> String {
    format!(
        "{} messages, {} tokens",
        stats.total_messages, stats.total_tokens
    )
}
