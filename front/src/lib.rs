//! Chain demo frontend (plain variant).
//!
//! Greets the configured target and chains to the backend service with an
//! unauthenticated HTTP request.

pub mod config;
pub mod error;
pub mod routes;
