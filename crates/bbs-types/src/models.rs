use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored post as it is listed on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub username: String,
    pub message_content: String,
    /// Display token derived from the poster's seed. Never the raw seed.
    pub seed: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// A post that has not been assigned an id yet.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub username: String,
    pub message_content: String,
    pub seed: Option<String>,
    pub timestamp: DateTime<Utc>,
}
