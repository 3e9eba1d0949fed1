use serde::Deserialize;

// -- Submission --

/// Form body of `POST /post`.
#[derive(Debug, Clone, Deserialize)]
pub struct PostForm {
    pub name: String,
    pub message: String,
    #[serde(default)]
    pub seed: String,
}

// -- Listing --

/// Query string of `GET /`. Only used to refill the submission form and show
/// a banner; it never touches stored state.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub last_seed: String,
    pub notice: Option<String>,
}

impl ListingQuery {
    /// Unknown notice values are ignored rather than rejected.
    pub fn notice(&self) -> Option<Notice> {
        self.notice.as_deref().and_then(Notice::parse)
    }
}

/// Banner shown after a submission whose storage write failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    PostFailed,
    DeleteFailed,
}

impl Notice {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "post_failed" => Some(Self::PostFailed),
            "delete_failed" => Some(Self::DeleteFailed),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PostFailed => "post_failed",
            Self::DeleteFailed => "delete_failed",
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Self::PostFailed => "Your post could not be saved. Please try again.",
            Self::DeleteFailed => "The delete command could not be applied.",
        }
    }
}
