use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

use crate::models::format_timestamp;

/// Author of the historical post inserted by the first migration.
pub const SEEDED_USERNAME: &str = "カルパス財団";

/// Back-dated so the historical post always sorts last.
pub const SEEDED_TIMESTAMP: &str = "2025-07-05 00:00:00";

pub fn seeded_body() -> String {
    "ｶﾙﾊﾟｽ".repeat(30)
}

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);"
    )?;

    let version: i64 = conn
        .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (messages table)");
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS messages (
                id               INTEGER PRIMARY KEY AUTOINCREMENT,
                username         TEXT NOT NULL,
                message_content  TEXT NOT NULL,
                seed             TEXT,
                timestamp        TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_messages_timestamp
                ON messages(timestamp);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;

        seed_history(conn)?;
    }

    info!("Database migrations complete");
    Ok(())
}

fn seed_history(conn: &Connection) -> Result<()> {
    let timestamp = chrono::NaiveDateTime::parse_from_str(SEEDED_TIMESTAMP, "%Y-%m-%d %H:%M:%S")?
        .and_utc();

    let inserted = conn.execute(
        "INSERT INTO messages (username, message_content, seed, timestamp)
         SELECT ?1, ?2, NULL, ?3
         WHERE NOT EXISTS (
             SELECT 1 FROM messages WHERE username = ?1 AND message_content = ?2
         )",
        rusqlite::params![SEEDED_USERNAME, seeded_body(), format_timestamp(&timestamp)],
    )?;

    if inserted > 0 {
        info!("Inserted historical post by {}", SEEDED_USERNAME);
    }
    Ok(())
}
