use crate::params::{block_len_for_blocks, DEFAULT_EXPONENT_C};
use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "fpst";
const CONFIG_FILE: &str = "config.json";

/// Build configuration stored as JSON in the user config directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Length of generated texts, sentinel included; caps loaded texts
    #[serde(default = "default_text_len")]
    pub text_len: usize,

    /// Symbols of generated texts are drawn from [1, alphabet_size]
    #[serde(default = "default_alphabet_size")]
    pub alphabet_size: u16,

    /// Explicit block length B; takes precedence over `blocks`
    #[serde(default)]
    pub block_len: Option<usize>,

    /// Number of blocks b, giving B = ceil(n / b)
    #[serde(default = "default_blocks")]
    pub blocks: usize,

    /// Collision exponent c in p >= n^(3 + c)
    #[serde(default = "default_exponent_c")]
    pub exponent_c: f64,

    /// Seed for text generation and parameter search; random if None
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_text_len() -> usize {
    32_000
}

fn default_alphabet_size() -> u16 {
    128
}

fn default_blocks() -> usize {
    16_000
}

fn default_exponent_c() -> f64 {
    DEFAULT_EXPONENT_C
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            text_len: default_text_len(),
            alphabet_size: default_alphabet_size(),
            block_len: None,
            blocks: default_blocks(),
            exponent_c: default_exponent_c(),
            seed: None,
        }
    }
}

impl BuildConfig {
    /// Load config from `path` if given, otherwise from the user config
    /// directory, or return the default if no file exists there
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let config_path = get_config_path()?;
                if config_path.exists() {
                    Self::load_from(&config_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: BuildConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Save config to the user config directory, returning the file written
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = get_config_path()?;
        if let Some(dir) = config_path.parent() {
            fs::create_dir_all(dir).context("Failed to create config directory")?;
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&config_path, content).context("Failed to write config file")?;
        Ok(config_path)
    }

    /// Get the effective block length for a text of `text_len` symbols
    pub fn effective_block_len(&self, text_len: usize) -> Result<usize> {
        match self.block_len {
            Some(block_len) => {
                ensure!(block_len >= 1, "block length must be at least 1");
                Ok(block_len)
            }
            None => block_len_for_blocks(text_len, self.blocks),
        }
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(APP_NAME).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_config_default() {
        let config = BuildConfig::default();
        assert_eq!(config.text_len, 32_000);
        assert_eq!(config.alphabet_size, 128);
        assert_eq!(config.blocks, 16_000);
        assert_eq!(config.block_len, None);
        assert_eq!(config.exponent_c, 1.0);
    }

    #[test]
    fn test_effective_block_len() {
        let mut config = BuildConfig::default();

        // ceil(32000 / 16000)
        assert_eq!(config.effective_block_len(32_000).unwrap(), 2);
        assert_eq!(config.effective_block_len(32_001).unwrap(), 3);

        // Explicit value wins over the block count
        config.block_len = Some(5);
        assert_eq!(config.effective_block_len(32_000).unwrap(), 5);

        config.block_len = Some(0);
        assert!(config.effective_block_len(32_000).is_err());
    }

    #[test]
    fn test_build_config_serialization() {
        let config = BuildConfig {
            block_len: Some(4),
            seed: Some(17),
            ..BuildConfig::default()
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: BuildConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn test_build_config_partial_json() {
        // Should use defaults for missing fields
        let json = r#"{"text_len": 1000, "seed": 3}"#;
        let config: BuildConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.text_len, 1000);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.alphabet_size, 128); // default
    }

    #[test]
    fn test_build_config_empty_json() {
        // Empty object should use all defaults
        let config: BuildConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, BuildConfig::default());
    }

    #[test]
    fn test_load_from_explicit_path() {
        let path = std::env::temp_dir().join(format!("fpst_config_{}.json", std::process::id()));
        fs::write(&path, r#"{"alphabet_size": 4, "block_len": 3}"#).unwrap();

        let config = BuildConfig::load(Some(&path)).unwrap();
        assert_eq!(config.alphabet_size, 4);
        assert_eq!(config.block_len, Some(3));

        let _ = fs::remove_file(&path);
        assert!(BuildConfig::load(Some(&path)).is_err());
    }
}
