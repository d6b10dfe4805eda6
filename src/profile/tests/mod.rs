//! Profile picture tests.
