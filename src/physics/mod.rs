// src/physics/mod.rs
pub mod conversion;
