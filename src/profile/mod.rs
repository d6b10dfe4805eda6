//! Profile picture of the signed-in user.
//!
//! A user has at most one profile row holding the public URL of their
//! picture. Uploading a new picture first deletes the previous object on a
//! best-effort basis, then stores the new object, then upserts the row keyed
//! by user id.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The upload workflow in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
