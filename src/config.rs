use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::aggregate::TOP_N_RANGE;

/// Looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "courtview.json";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Dashboard settings. Every field is optional in the JSON file.
///
/// ```json
/// {
///   "regular_path": "data/data_clean_regulier.csv",
///   "playoffs_path": "data/data_clean_playoffs.csv",
///   "export_dir": "exports",
///   "default_top_n": 10
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub regular_path: PathBuf,
    pub playoffs_path: PathBuf,
    /// Starting directory of the export save dialog.
    pub export_dir: PathBuf,
    pub default_top_n: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            regular_path: PathBuf::from("data_clean_regulier.csv"),
            playoffs_path: PathBuf::from("data_clean_playoffs.csv"),
            export_dir: PathBuf::from("."),
            default_top_n: 10,
        }
    }
}

impl Config {
    /// Parse a config file. Relative data paths stay relative to the
    /// working directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config.normalized())
    }

    /// The explicit path if given, else `courtview.json` when present, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)
                } else {
                    log::debug!("No {DEFAULT_CONFIG_FILE}, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    fn normalized(mut self) -> Self {
        let clamped = self
            .default_top_n
            .clamp(*TOP_N_RANGE.start(), *TOP_N_RANGE.end());
        if clamped != self.default_top_n {
            log::warn!(
                "default_top_n {} out of range, using {clamped}",
                self.default_top_n
            );
            self.default_top_n = clamped;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"regular_path": "r.csv"}"#).unwrap();
        assert_eq!(config.regular_path, PathBuf::from("r.csv"));
        assert_eq!(config.playoffs_path, PathBuf::from("data_clean_playoffs.csv"));
        assert_eq!(config.default_top_n, 10);
    }

    #[test]
    fn top_n_is_clamped() {
        let mut p = std::env::temp_dir();
        p.push(format!("courtview_config_{}.json", std::process::id()));
        std::fs::write(&p, r#"{"default_top_n": 50}"#).unwrap();
        assert_eq!(Config::from_file(&p).unwrap().default_top_n, 20);
    }

    #[test]
    fn bad_json_is_an_error() {
        let mut p = std::env::temp_dir();
        p.push(format!("courtview_config_bad_{}.json", std::process::id()));
        std::fs::write(&p, "{ nope").unwrap();
        assert!(Config::from_file(&p).is_err());
    }
}
