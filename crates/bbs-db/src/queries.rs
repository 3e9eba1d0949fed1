use crate::Database;
use crate::models::{MessageRow, format_timestamp};
use anyhow::Result;
use bbs_types::models::NewMessage;
use rusqlite::Connection;

/// Ids bound per DELETE statement. Well under SQLite's variable limit.
const DELETE_BATCH_SIZE: usize = 500;

impl Database {
    // -- Messages --

    /// Append a post and return its freshly assigned id.
    pub fn insert_message(&self, msg: &NewMessage) -> Result<i64> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO messages (username, message_content, seed, timestamp) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![
                    msg.username,
                    msg.message_content,
                    msg.seed,
                    format_timestamp(&msg.timestamp)
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Remove every post whose id is in `ids`, atomically.
    /// Ids that do not exist are ignored. Returns how many rows were removed.
    ///
    /// Large id lists are split into batches below SQLite's bound-variable
    /// limit; all batches commit together or not at all.
    pub fn delete_messages(&self, ids: &[i64]) -> Result<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let mut removed = 0;

            for batch in ids.chunks(DELETE_BATCH_SIZE) {
                let placeholders: Vec<String> = (1..=batch.len()).map(|i| format!("?{}", i)).collect();
                let sql = format!(
                    "DELETE FROM messages WHERE id IN ({})",
                    placeholders.join(", ")
                );

                let params: Vec<&dyn rusqlite::types::ToSql> = batch
                    .iter()
                    .map(|id| id as &dyn rusqlite::types::ToSql)
                    .collect();

                removed += tx.execute(&sql, params.as_slice())?;
            }

            tx.commit()?;
            Ok(removed)
        })
    }

    /// All posts, newest first. Equal timestamps fall back to id order.
    pub fn get_messages(&self) -> Result<Vec<MessageRow>> {
        self.with_conn(query_messages)
    }
}

fn query_messages(conn: &Connection) -> Result<Vec<MessageRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, username, message_content, seed, timestamp
         FROM messages
         ORDER BY timestamp DESC, id DESC",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(MessageRow {
                id: row.get(0)?,
                username: row.get(1)?,
                message_content: row.get(2)?,
                seed: row.get(3)?,
                timestamp: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}
