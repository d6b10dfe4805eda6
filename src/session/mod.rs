//! Session gate.
//!
//! Every view that loads user data first asks the identity provider who is
//! signed in. Without an identity the caller is sent to the login view; a
//! failed identity query counts as "no session".
//!
//! - Domain types in [`domain`]
//! - Port contract in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The guard itself in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
