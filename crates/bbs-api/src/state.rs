use std::sync::Arc;

use bbs_db::MessageStore;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: Arc<dyn MessageStore>,
    pub board: BoardInfo,
}

/// Fixed text shown above the listing.
#[derive(Debug, Clone)]
pub struct BoardInfo {
    pub topic: String,
    pub maxim: Option<String>,
}
