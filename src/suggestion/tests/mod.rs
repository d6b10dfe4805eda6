//! Suggestion workflow tests.
