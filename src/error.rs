// src/error.rs

use std::path::PathBuf;
use std::{io, result};

use thiserror::Error;

pub type Result<T, E = Error> = result::Result<T, E>;

/// Why a set of lattice vectors cannot describe a unit cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LatticeDefect {
  #[error("lattice vector {0} has a non-finite component")]
  NonFinite(char),
  #[error("lattice vector {0} has zero length")]
  ZeroLength(char),
  #[error("lattice vectors a and b are parallel (sin(gamma) = 0)")]
  ParallelAxes,
  #[error("cell volume factor is imaginary (negative radicand)")]
  NegativeRadicand,
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("no input structure file given")]
  Invocation,

  #[error("invalid lattice: {0}")]
  InvalidLattice(#[from] LatticeDefect),

  #[error("line {line}: {message}")]
  Parse { line: usize, message: String },

  #[error("{}: {source}", .path.display())]
  File { path: PathBuf, source: io::Error },

  #[error("config {}: {source}", .path.display())]
  Config {
    path: PathBuf,
    source: serde_json::Error,
  },

  #[error(transparent)]
  Io(#[from] io::Error),
}

impl Error {
  pub fn parse(line: usize, message: impl Into<String>) -> Self {
    Error::Parse {
      line,
      message: message.into(),
    }
  }
}
