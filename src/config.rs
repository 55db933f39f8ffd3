use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Server configuration, loaded once at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the listener binds to. Port 0 asks the OS for an ephemeral
    /// port; the assigned port is queryable after bind.
    pub listen_addr: String,
    /// Directory the resource namespace is served from.
    pub root_dir: PathBuf,
    /// Optional `key=value`-per-line alias file.
    pub alias_file: Option<PathBuf>,
    /// Seconds a connection may sit idle between requests before it is
    /// silently closed.
    pub idle_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            root_dir: PathBuf::from("."),
            alias_file: None,
            idle_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Loads configuration from the YAML file named by `DOCSERVE_CONFIG`,
    /// falling back to defaults when the variable is unset.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("DOCSERVE_CONFIG") {
            Ok(path) => Self::from_file(&PathBuf::from(path)),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let cfg = serde_yaml::from_str(&text)?;
        Ok(cfg)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}
