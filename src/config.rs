// src/config.rs

use directories::ProjectDirs;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
  Error,
  #[default]
  Warn,
  Info,
  Debug,
  Trace,
}

impl LogLevel {
  /// This level raised by `steps` notches (one per `-v`), saturating at trace.
  pub fn raised(self, steps: u8) -> LevelFilter {
    let order = [
      LevelFilter::Error,
      LevelFilter::Warn,
      LevelFilter::Info,
      LevelFilter::Debug,
      LevelFilter::Trace,
    ];
    let idx = (self as usize + steps as usize).min(order.len() - 1);
    order[idx]
  }
}

// --- OutputFormat ---

/// Field layout for converted coordinates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputFormat {
  pub width: usize,
  pub precision: usize,
}

impl Default for OutputFormat {
  fn default() -> Self {
    Self {
      width: 19,
      precision: 9,
    }
  }
}

// --- Main Config Struct ---

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
  #[serde(default)]
  pub output: OutputFormat,

  #[serde(default)]
  pub log_level: LogLevel,
}

impl Config {
  /// Loads config from the standard OS location (e.g. ~/.config/poscar-f2c/settings.json).
  ///
  /// Never fails; problems are reported in the returned message and defaults are used.
  pub fn load() -> (Self, String) {
    let Some(path) = Self::get_path() else {
      return (Self::default(), "No config directory. Using defaults.".to_string());
    };
    if !path.exists() {
      return (Self::default(), "No config found. Using defaults.".to_string());
    }
    match Self::load_from(&path) {
      Ok(cfg) => (cfg, format!("Config loaded from {:?}", path)),
      Err(e) => (Self::default(), format!("Ignoring config: {}", e)),
    }
  }

  /// Loads config from an explicit path. Read and parse errors are returned.
  pub fn load_from(path: &Path) -> Result<Self> {
    let file = File::open(path).map_err(|source| Error::File {
      path: path.to_path_buf(),
      source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| Error::Config {
      path: path.to_path_buf(),
      source,
    })
  }

  fn get_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "poscar-f2c", "poscar-f2c")
      .map(|proj| proj.config_dir().join("settings.json"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;

  fn write_config(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
  }

  #[test]
  fn test_defaults() {
    let cfg = Config::default();
    assert_eq!(cfg.output, OutputFormat { width: 19, precision: 9 });
    assert_eq!(cfg.log_level, LogLevel::Warn);
  }

  #[test]
  fn test_partial_config_fills_defaults() {
    let file = write_config(r#"{ "output": { "precision": 4 }, "log_level": "debug" }"#);
    let cfg = Config::load_from(file.path()).unwrap();
    assert_eq!(cfg.output.width, 19);
    assert_eq!(cfg.output.precision, 4);
    assert_eq!(cfg.log_level, LogLevel::Debug);

    let empty = write_config("{}");
    assert_eq!(Config::load_from(empty.path()).unwrap(), Config::default());
  }

  #[test]
  fn test_bad_config_is_an_error() {
    let file = write_config(r#"{ "log_level": "loud" }"#);
    assert!(matches!(Config::load_from(file.path()), Err(Error::Config { .. })));

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("settings.json");
    assert!(matches!(Config::load_from(&missing), Err(Error::File { .. })));
  }

  #[test]
  fn test_round_trip_through_json() {
    let cfg = Config {
      output: OutputFormat { width: 12, precision: 6 },
      log_level: LogLevel::Info,
    };
    let text = serde_json::to_string_pretty(&cfg).unwrap();
    assert!(text.contains("\"info\""));
    assert_eq!(serde_json::from_str::<Config>(&text).unwrap(), cfg);
  }

  #[test]
  fn test_verbosity_raises_level() {
    assert_eq!(LogLevel::Warn.raised(0), LevelFilter::Warn);
    assert_eq!(LogLevel::Warn.raised(2), LevelFilter::Debug);
    assert_eq!(LogLevel::Error.raised(9), LevelFilter::Trace);
  }
}
