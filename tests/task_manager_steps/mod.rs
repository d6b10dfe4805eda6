//! Step definitions for task manager scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
