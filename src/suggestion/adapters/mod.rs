//! Suggestion endpoint adapters.

pub mod memory;
pub mod rest;

pub use memory::StaticSuggestionClient;
pub use rest::RestSuggestionClient;
