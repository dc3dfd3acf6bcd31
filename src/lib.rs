//! Convert POSCAR atomic positions from fractional (Direct) to Cartesian coordinates.
//!
//! [`physics::conversion`] holds the lattice geometry; [`io::poscar`] drives
//! it line by line over a POSCAR stream.

pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod physics;
pub mod utils;

pub use error::{Error, LatticeDefect, Result};
