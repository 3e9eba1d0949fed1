use std::path::PathBuf;

use anyhow::{Context, Result, bail};

const DEFAULT_TOPIC: &str = "Anonymous board";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub topic: String,
    pub maxim: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = get("BBS_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = get("BBS_PORT")
            .unwrap_or_else(|| "5000".into())
            .parse()
            .context("BBS_PORT must be a port number")?;

        // DATABASE_URL wins over BBS_DB_PATH so hosted deployments can point
        // the board somewhere else without a second variable.
        let db_path = match get("DATABASE_URL").filter(|v| !v.is_empty()) {
            Some(url) => sqlite_path(&url)?,
            None => get("BBS_DB_PATH")
                .unwrap_or_else(|| "database.db".into())
                .into(),
        };

        let topic = get("BBS_TOPIC")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_TOPIC.into());
        let maxim = get("BBS_MAXIM").filter(|v| !v.is_empty());

        Ok(Self { host, port, db_path, topic, maxim })
    }
}

/// Accepts `sqlite://<path>` or `sqlite:<path>`; anything else is refused.
fn sqlite_path(url: &str) -> Result<PathBuf> {
    if let Some(path) = url.strip_prefix("sqlite://").or_else(|| url.strip_prefix("sqlite:")) {
        if path.is_empty() {
            bail!("DATABASE_URL names no SQLite file");
        }
        return Ok(PathBuf::from(path));
    }

    let scheme = url.split(':').next().unwrap_or_default();
    bail!("DATABASE_URL scheme '{}' is not supported; only sqlite is", scheme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.db_path, PathBuf::from("database.db"));
        assert_eq!(cfg.topic, DEFAULT_TOPIC);
        assert_eq!(cfg.maxim, None);
    }

    #[test]
    fn database_url_overrides_path() {
        let cfg = config(&[
            ("BBS_DB_PATH", "local.db"),
            ("DATABASE_URL", "sqlite:///var/lib/bbs/board.db"),
        ])
        .unwrap();
        assert_eq!(cfg.db_path, PathBuf::from("/var/lib/bbs/board.db"));

        let cfg = config(&[("DATABASE_URL", "sqlite:board.db")]).unwrap();
        assert_eq!(cfg.db_path, PathBuf::from("board.db"));
    }

    #[test]
    fn networked_databases_are_refused() {
        let err = config(&[("DATABASE_URL", "postgres://u:p@host/db")]).unwrap_err();
        assert!(err.to_string().contains("postgres"));
    }

    #[test]
    fn bad_port_is_an_error() {
        assert!(config(&[("BBS_PORT", "http")]).is_err());
    }

    #[test]
    fn board_text() {
        let cfg = config(&[("BBS_TOPIC", "Local news"), ("BBS_MAXIM", "Be brief")]).unwrap();
        assert_eq!(cfg.topic, "Local news");
        assert_eq!(cfg.maxim.as_deref(), Some("Be brief"));
    }
}
