//! Profile and storage adapters.

pub mod memory;
pub mod rest;
