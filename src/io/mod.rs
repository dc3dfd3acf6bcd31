// src/io/mod.rs
pub mod poscar;
