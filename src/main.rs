//! Entrypoint for CLI

use std::process::ExitCode;

use poscar_f2c::cli::{Cli, Parsed};

fn main() -> ExitCode {
  // Missing arguments: exit 1 with no output at all
  let cli = match Cli::parse_args(std::env::args_os()) {
    Ok(Parsed::Run(cli)) => cli,
    Ok(Parsed::Exit) => return ExitCode::SUCCESS,
    Err(_) => return ExitCode::from(1),
  };

  match cli.execute() {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      log::error!("{}", e);
      // Logging may not be up yet (e.g. a bad --config)
      if log::max_level() == log::LevelFilter::Off {
        eprintln!("error: {}", e);
      }
      ExitCode::from(1)
    }
  }
}
