//src/model/mod.rs
pub mod lattice;

pub use lattice::Lattice;
