//! Store location resolution

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Optional per-project configuration file
pub const CONFIG_FILE: &str = "bracket.toml";
/// Fallback store location
pub const DEFAULT_STORE_DIR: &str = ".bracket/store";

#[derive(Debug, Default, Deserialize)]
struct Config {
    store: Option<PathBuf>,
}

fn parse_config(raw: &str) -> Result<Config> {
    toml::from_str(raw).context("Failed to parse bracket.toml")
}

/// Resolution order: `--store` flag, then `bracket.toml` in the working
/// directory, then the default location
pub fn resolve_store_path(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }

    let config_path = Path::new(CONFIG_FILE);
    if config_path.exists() {
        let raw = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", CONFIG_FILE))?;
        if let Some(store) = parse_config(&raw)?.store {
            return Ok(store);
        }
    }

    Ok(PathBuf::from(DEFAULT_STORE_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_everything() {
        let path = resolve_store_path(Some(PathBuf::from("/tmp/elsewhere"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/elsewhere"));
    }

    #[test]
    fn config_store_key_is_optional() {
        assert_eq!(parse_config("").unwrap().store, None);
        assert_eq!(
            parse_config("store = \"brackets/club-open\"").unwrap().store,
            Some(PathBuf::from("brackets/club-open"))
        );
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(parse_config("store = [1, 2]").is_err());
    }
}
