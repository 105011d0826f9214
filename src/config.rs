use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::model::DEFAULT_MODEL_FILE;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub model_path: Option<PathBuf>,
    pub bind_addr: String,
    pub log_filter: String,
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            bind_addr: "0.0.0.0:8080".to_string(),
            log_filter: "info".to_string(),
            log_file: None,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("invalid config JSON in {}", path.display()))
    }

    /// File (if given) first, then `MODEL_PATH` / `BIND_ADDR` / `PORT`.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match path {
            Some(p) => Self::load(p)?,
            None => Self::default(),
        };
        cfg.apply_env(|k| std::env::var(k).ok());
        Ok(cfg)
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(p) = var("MODEL_PATH") {
            self.model_path = Some(PathBuf::from(p));
        }
        if let Some(addr) = var("BIND_ADDR") {
            self.bind_addr = addr;
        } else if let Some(port) = var("PORT").and_then(|s| s.parse::<u16>().ok()) {
            let host = self
                .bind_addr
                .rsplit_once(':')
                .map(|(h, _)| h.to_string())
                .unwrap_or_else(|| "0.0.0.0".to_string());
            self.bind_addr = format!("{}:{}", host, port);
        }
    }

    /// Explicit path if configured, else the first default location that exists.
    pub fn model_path(&self) -> Option<PathBuf> {
        match &self.model_path {
            Some(p) => Some(p.clone()),
            None => resolve_model_path(),
        }
    }
}

fn resolve_model_path() -> Option<PathBuf> {
    let candidates = [
        PathBuf::from(DEFAULT_MODEL_FILE),
        {
            let mut p = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("."));
            p.pop(); // exe dir
            p.push(DEFAULT_MODEL_FILE);
            p
        },
    ];

    candidates.into_iter().find(|c| c.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"model_path": "m/fare.json"}}"#).unwrap();

        let cfg = AppConfig::load(f.path()).unwrap();
        assert_eq!(cfg.model_path, Some(PathBuf::from("m/fare.json")));
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080");
        assert_eq!(cfg.log_filter, "info");
    }

    #[test]
    fn missing_or_broken_file_is_an_error() {
        assert!(AppConfig::load(Path::new("/no/such/config.json")).is_err());

        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "{{ not json").unwrap();
        assert!(AppConfig::load(f.path()).is_err());
    }

    #[test]
    fn env_overrides_file() {
        let env: HashMap<&str, &str> = [("MODEL_PATH", "/srv/model.json"), ("PORT", "9000")]
            .into_iter()
            .collect();
        let mut cfg = AppConfig::default();
        cfg.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(cfg.model_path, Some(PathBuf::from("/srv/model.json")));
        assert_eq!(cfg.bind_addr, "0.0.0.0:9000");
    }

    #[test]
    fn bind_addr_beats_port() {
        let env: HashMap<&str, &str> = [("BIND_ADDR", "127.0.0.1:7000"), ("PORT", "9000")]
            .into_iter()
            .collect();
        let mut cfg = AppConfig::default();
        cfg.apply_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.bind_addr, "127.0.0.1:7000");
    }

    #[test]
    fn explicit_model_path_is_returned_even_if_absent() {
        let cfg = AppConfig {
            model_path: Some(PathBuf::from("/nope/model.json")),
            ..AppConfig::default()
        };
        assert_eq!(cfg.model_path(), Some(PathBuf::from("/nope/model.json")));
    }

    #[test]
    fn repo_root_has_no_default_artifact() {
        // tests run from the crate root; nothing there should look like a model
        let cfg = AppConfig::default();
        assert_eq!(cfg.model_path(), None);
    }
}
