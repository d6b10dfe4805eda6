//! HTTP access to the hosted backend.
//!
//! The hosted service exposes four surfaces that the `rest` adapters of each
//! bounded context build on:
//!
//! - a relational REST API under `/rest/v1/{table}` with `column=op.value`
//!   filters,
//! - object storage under `/storage/v1/object/{bucket}/{path}`,
//! - session queries under `/auth/v1`,
//! - edge functions under `/functions/v1/{name}`.
//!
//! [`BackendClient`] owns the connection pool and credentials and is cheap to
//! clone.

mod client;
mod error;

pub use client::{AuthUser, BackendClient, Filter};
pub use error::{BackendError, BackendResult};
