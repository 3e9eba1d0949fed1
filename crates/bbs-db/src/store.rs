use anyhow::Result;
use bbs_types::models::{Message, NewMessage};

use crate::Database;

/// Storage capability handed to the request handlers.
///
/// Each call is one atomic unit against the backing store.
pub trait MessageStore: Send + Sync {
    fn insert(&self, msg: &NewMessage) -> Result<i64>;

    fn delete_by_ids(&self, ids: &[i64]) -> Result<usize>;

    /// Every message, newest first.
    fn list_recent(&self) -> Result<Vec<Message>>;
}

impl MessageStore for Database {
    fn insert(&self, msg: &NewMessage) -> Result<i64> {
        self.insert_message(msg)
    }

    fn delete_by_ids(&self, ids: &[i64]) -> Result<usize> {
        self.delete_messages(ids)
    }

    fn list_recent(&self) -> Result<Vec<Message>> {
        let rows = self.get_messages()?;
        Ok(rows.into_iter().map(|row| row.into_message()).collect())
    }
}
