use thiserror::Error;
use tracing::{debug, error, info};

use bbs_crypto::seed::seed_token;
use bbs_db::MessageStore;
use bbs_types::api::{Notice, PostForm};
use bbs_types::models::NewMessage;

use crate::command::{Command, Invocation};

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("failed to delete posts {ids:?}: {source:#}")]
    Delete { ids: Vec<i64>, source: anyhow::Error },

    #[error("failed to store post: {0:#}")]
    Insert(#[source] anyhow::Error),

    /// The blocking intake task panicked or was cancelled before it finished.
    #[error("intake task did not complete: {source}")]
    Aborted {
        command: bool,
        source: tokio::task::JoinError,
    },
}

impl IntakeError {
    pub fn notice(&self) -> Notice {
        match self {
            Self::Delete { .. } | Self::Aborted { command: true, .. } => Notice::DeleteFailed,
            Self::Insert(_) | Self::Aborted { command: false, .. } => Notice::PostFailed,
        }
    }

    pub fn is_command(&self) -> bool {
        matches!(self, Self::Delete { .. } | Self::Aborted { command: true, .. })
    }
}

/// What a submission ended up doing to the board.
#[derive(Debug)]
pub enum Outcome {
    /// Empty name or body; nothing happened.
    Ignored,
    /// A `/del` command ran and removed this many posts.
    Deleted(usize),
    /// A new post was stored under this id.
    Posted(i64),
    Failed(IntakeError),
}

impl Outcome {
    pub fn is_command(&self) -> bool {
        match self {
            Self::Deleted(_) => true,
            Self::Failed(err) => err.is_command(),
            Self::Ignored | Self::Posted(_) => false,
        }
    }
}

/// Run one submission through validation, command dispatch and storage.
///
/// Storage failures are logged and reported in the returned [`Outcome`];
/// they never abort the request.
pub fn submit(store: &dyn MessageStore, form: &PostForm) -> Outcome {
    if form.name.is_empty() || form.message.is_empty() {
        debug!("Ignoring submission with empty name or message");
        return Outcome::Ignored;
    }

    match Invocation::parse(&form.message) {
        Invocation::Command(Command::Delete(ids)) => delete(store, ids),
        Invocation::Literal => post(store, form),
    }
}

/// Whether [`submit`] would treat this form as a command rather than a post.
pub fn is_command(form: &PostForm) -> bool {
    !form.name.is_empty()
        && !form.message.is_empty()
        && matches!(Invocation::parse(&form.message), Invocation::Command(_))
}

fn delete(store: &dyn MessageStore, ids: Vec<i64>) -> Outcome {
    if ids.is_empty() {
        debug!("/del with no usable ids");
        return Outcome::Deleted(0);
    }

    match store.delete_by_ids(&ids) {
        Ok(count) => {
            info!("Deleted {} posts for ids {:?}", count, ids);
            Outcome::Deleted(count)
        }
        Err(source) => {
            let err = IntakeError::Delete { ids, source };
            error!("{}", err);
            Outcome::Failed(err)
        }
    }
}

fn post(store: &dyn MessageStore, form: &PostForm) -> Outcome {
    let msg = NewMessage {
        username: form.name.clone(),
        message_content: form.message.clone(),
        seed: seed_token(&form.seed),
        timestamp: chrono::Utc::now(),
    };

    match store.insert(&msg) {
        Ok(id) => {
            debug!("Stored post {} by {}", id, msg.username);
            Outcome::Posted(id)
        }
        Err(e) => {
            let err = IntakeError::Insert(e);
            error!("{}", err);
            Outcome::Failed(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};
    use bbs_crypto::seed::SEED_TOKEN_LEN;
    use bbs_db::Database;
    use bbs_types::models::Message;

    struct FailingStore;

    impl MessageStore for FailingStore {
        fn insert(&self, _msg: &NewMessage) -> Result<i64> {
            Err(anyhow!("disk full"))
        }

        fn delete_by_ids(&self, _ids: &[i64]) -> Result<usize> {
            Err(anyhow!("database is locked"))
        }

        fn list_recent(&self) -> Result<Vec<Message>> {
            Err(anyhow!("no such table"))
        }
    }

    fn form(name: &str, message: &str, seed: &str) -> PostForm {
        PostForm {
            name: name.into(),
            message: message.into(),
            seed: seed.into(),
        }
    }

    #[test]
    fn stores_plain_post_with_derived_seed() {
        let db = Database::open_in_memory().unwrap();
        let before = db.list_recent().unwrap().len();

        let Outcome::Posted(id) = submit(&db, &form("alice", "hello", "x")) else {
            panic!("expected a stored post");
        };

        let listed = db.list_recent().unwrap();
        assert_eq!(listed.len(), before + 1);
        let newest = &listed[0];
        assert_eq!(newest.id, id);
        assert_eq!(newest.username, "alice");
        assert_eq!(newest.message_content, "hello");
        assert_eq!(newest.seed, seed_token("x"));
        assert_eq!(newest.seed.as_ref().unwrap().len(), SEED_TOKEN_LEN);
    }

    #[test]
    fn empty_seed_stores_no_token() {
        let db = Database::open_in_memory().unwrap();
        submit(&db, &form("alice", "hello", ""));
        assert_eq!(db.list_recent().unwrap()[0].seed, None);
    }

    #[test]
    fn empty_fields_are_ignored() {
        let db = Database::open_in_memory().unwrap();
        let before = db.list_recent().unwrap();

        assert!(matches!(submit(&db, &form("", "hi", "")), Outcome::Ignored));
        assert!(matches!(submit(&db, &form("bob", "", "")), Outcome::Ignored));

        assert_eq!(db.list_recent().unwrap(), before);
    }

    #[test]
    fn empty_name_does_not_run_commands() {
        let db = Database::open_in_memory().unwrap();
        let id = db.list_recent().unwrap()[0].id;

        assert!(matches!(submit(&db, &form("", &format!("/del {}", id), "")), Outcome::Ignored));
        assert_eq!(db.list_recent().unwrap().len(), 1);
    }

    #[test]
    fn del_removes_targets_and_stores_nothing() {
        let db = Database::open_in_memory().unwrap();
        let Outcome::Posted(a) = submit(&db, &form("x", "a", "")) else { panic!() };
        let Outcome::Posted(b) = submit(&db, &form("y", "b", "")) else { panic!() };
        let Outcome::Posted(c) = submit(&db, &form("z", "c", "")) else { panic!() };

        let outcome = submit(&db, &form("bob", &format!("/del {} {} 424242", a, c), ""));
        assert!(matches!(outcome, Outcome::Deleted(2)));

        let listed = db.list_recent().unwrap();
        let ids: Vec<i64> = listed.iter().map(|m| m.id).collect();
        assert_eq!(ids.iter().filter(|&&id| id == b).count(), 1);
        assert!(!ids.contains(&a) && !ids.contains(&c));
        assert!(listed.iter().all(|m| m.username != "bob"));
    }

    #[test]
    fn del_without_valid_ids_changes_nothing() {
        let db = Database::open_in_memory().unwrap();
        let before = db.list_recent().unwrap();

        let outcome = submit(&db, &form("carol", "/del abc", ""));
        assert!(matches!(outcome, Outcome::Deleted(0)));
        assert!(outcome.is_command());
        assert_eq!(db.list_recent().unwrap(), before);
    }

    #[test]
    fn unknown_slash_text_is_stored_verbatim() {
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(submit(&db, &form("dave", "/shrug", "")), Outcome::Posted(_)));
        assert_eq!(db.list_recent().unwrap()[0].message_content, "/shrug");
    }

    #[test]
    fn classifies_command_bodies() {
        assert!(is_command(&form("bob", "/del 1", "")));
        assert!(is_command(&form("bob", "/del", "")));
        assert!(!is_command(&form("bob", "/shrug", "")));
        assert!(!is_command(&form("bob", "hello", "")));
        assert!(!is_command(&form("", "/del 1", "")));
    }

    #[test]
    fn insert_failure_is_reported_not_raised() {
        let outcome = submit(&FailingStore, &form("alice", "hello", ""));
        match outcome {
            Outcome::Failed(err) => {
                assert_eq!(err.notice(), Notice::PostFailed);
                assert!(!err.is_command());
                let source = std::error::Error::source(&err).unwrap();
                assert_eq!(source.to_string(), "disk full");
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn delete_failure_is_reported_not_raised() {
        let outcome = submit(&FailingStore, &form("bob", "/del 1 2", ""));
        assert!(outcome.is_command());
        match outcome {
            Outcome::Failed(err) => {
                assert_eq!(err.notice(), Notice::DeleteFailed);
                assert!(err.to_string().contains("database is locked"));
                let source = std::error::Error::source(&err).unwrap();
                assert_eq!(source.to_string(), "database is locked");
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }
}
