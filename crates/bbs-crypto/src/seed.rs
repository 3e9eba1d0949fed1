use sha2::{Digest, Sha256};

/// Length of a display token in hex characters. 64 keeps the whole digest.
pub const SEED_TOKEN_LEN: usize = 64;

/// Derive the display token for a raw seed.
/// An empty seed yields no token at all.
pub fn seed_token(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }

    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    let mut token = hex::encode(hasher.finalize());
    token.truncate(SEED_TOKEN_LEN);
    Some(token)
}
