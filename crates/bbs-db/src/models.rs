//! Database row types — these map directly to SQLite rows.
//! Distinct from bbs-types models to keep the DB layer independent.

use bbs_types::models::Message;
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

/// Fixed-width UTC text, so lexical order in SQLite is chronological order.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

pub struct MessageRow {
    pub id: i64,
    pub username: String,
    pub message_content: String,
    pub seed: Option<String>,
    pub timestamp: String,
}

impl MessageRow {
    pub fn into_message(self) -> Message {
        let timestamp = parse_timestamp(&self.timestamp).unwrap_or_else(|| {
            warn!("Corrupt timestamp '{}' on message {}", self.timestamp, self.id);
            DateTime::default()
        });

        Message {
            id: self.id,
            username: self.username,
            message_content: self.message_content,
            seed: self.seed,
            timestamp,
        }
    }
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .map(|ndt| ndt.and_utc())
        .ok()
}
