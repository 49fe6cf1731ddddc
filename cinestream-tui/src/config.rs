use std::path::PathBuf;

use anyhow::Context as _;
use cinestream_core::{BackTarget, catalogue::DEFAULT_STORAGE_KEY, cg, store::FileStore};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub general: General,
    pub storage: Storage,
    pub enrichment: Enrichment,
    pub navigation: Navigation,
}
impl Config {
    pub const FILENAME: &str = "cinestream-tui.toml";

    pub fn load() -> anyhow::Result<Self> {
        match std::fs::read_to_string(Self::FILENAME) {
            Ok(contents) => Self::parse(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("no config file found, creating default config");
                let config = Config::default();
                config.save()?;
                Ok(config)
            }
            Err(e) => Err(e).with_context(|| format!("failed to read {}", Self::FILENAME)),
        }
    }

    fn parse(contents: &str) -> anyhow::Result<Self> {
        toml::from_str(contents).with_context(|| format!("failed to parse {}", Self::FILENAME))
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let contents = toml::to_string(self).context("failed to serialize config")?;
        std::fs::write(Self::FILENAME, contents)
            .with_context(|| format!("failed to write {}", Self::FILENAME))?;
        tracing::info!("saved config to {}", Self::FILENAME);
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct General {
    pub tick_rate_ms: u64,
}
impl Default for General {
    fn default() -> Self {
        Self { tick_rate_ms: 100 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Storage {
    /// Where the catalogue is kept. Defaults to the platform data directory.
    pub data_dir: Option<PathBuf>,
    pub key: String,
}
impl Default for Storage {
    fn default() -> Self {
        Self {
            data_dir: None,
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}
impl Storage {
    const FALLBACK_DIR: &str = "cinestream-data";

    pub fn resolve_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(FileStore::default_dir)
            .unwrap_or_else(|| PathBuf::from(Self::FALLBACK_DIR))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Enrichment {
    pub enabled: bool,
    /// Falls back to `GEMINI_API_KEY`, then `API_KEY`.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}
impl Default for Enrichment {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: None,
            base_url: cg::Client::DEFAULT_BASE_URL.to_string(),
            model: cg::Client::DEFAULT_MODEL.to_string(),
        }
    }
}
impl Enrichment {
    const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

    fn resolve_api_key(&self, env: impl Fn(&str) -> Option<String>) -> Option<String> {
        self.api_key
            .clone()
            .into_iter()
            .chain(Self::API_KEY_VARS.into_iter().filter_map(|var| env(var)))
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }

    /// The suggestion client, if auto-fill is enabled and a key is available.
    pub fn client(&self) -> Option<cg::Client> {
        if !self.enabled {
            tracing::info!("auto-fill disabled in config");
            return None;
        }
        let Some(api_key) = self.resolve_api_key(|var| std::env::var(var).ok()) else {
            tracing::warn!("no Gemini API key configured, auto-fill unavailable");
            return None;
        };
        Some(cg::Client::new(
            self.base_url.clone(),
            api_key,
            self.model.clone(),
        ))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Navigation {
    pub back_target: BackTarget,
}
