// src/models/mod.rs

pub mod dsa;
pub mod interview;
pub mod quiz;
