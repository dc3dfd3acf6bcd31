// src/cli.rs

use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::io::poscar;
use crate::utils::logger;

/// Convert the atomic positions of a POSCAR file from Direct (fractional)
/// to Cartesian coordinates. The result is written to stdout.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
  /// POSCAR/CONTCAR file to convert
  pub input: PathBuf,

  /// Settings file (JSON); defaults to the per-user config location
  #[arg(long)]
  pub config: Option<PathBuf>,

  /// More log output on stderr (repeatable)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,
}

pub enum Parsed {
  Run(Cli),
  /// `--help` / `--version` were requested and have been printed.
  Exit,
}

impl Cli {
  /// Parse arguments. A missing or malformed command line is an
  /// `Invocation` error and prints nothing.
  pub fn parse_args<I, T>(args: I) -> Result<Parsed>
  where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
  {
    match Cli::try_parse_from(args) {
      Ok(cli) => Ok(Parsed::Run(cli)),
      Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
        let _ = e.print();
        Ok(Parsed::Exit)
      }
      Err(_) => Err(Error::Invocation),
    }
  }

  pub fn execute(&self) -> Result<()> {
    let (config, status) = match &self.config {
      Some(path) => (Config::load_from(path)?, format!("Config loaded from {:?}", path)),
      None => Config::load(),
    };

    // A second init only happens in tests; keep the first logger
    let _ = logger::init(config.log_level.raised(self.verbose));
    log::debug!("{}", status);

    let stdout = io::stdout();
    let summary = poscar::transcode_file(&self.input, stdout.lock(), &config.output)?;
    log::info!(
      "{} coordinate rows converted, {} markers, {} lines passed through",
      summary.converted,
      summary.markers,
      summary.passed_through
    );
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_missing_input_is_invocation_error() {
    assert!(matches!(
      Cli::parse_args(["poscar-f2c"]),
      Err(Error::Invocation)
    ));
  }

  #[test]
  fn test_parse_input_and_flags() {
    match Cli::parse_args(["poscar-f2c", "-vv", "--config", "cfg.json", "POSCAR"]) {
      Ok(Parsed::Run(cli)) => {
        assert_eq!(cli.input, PathBuf::from("POSCAR"));
        assert_eq!(cli.config, Some(PathBuf::from("cfg.json")));
        assert_eq!(cli.verbose, 2);
      }
      _ => panic!("expected a runnable command line"),
    }
  }

  #[test]
  fn test_unknown_flag_is_invocation_error() {
    assert!(matches!(
      Cli::parse_args(["poscar-f2c", "--frobnicate", "POSCAR"]),
      Err(Error::Invocation)
    ));
  }
}
