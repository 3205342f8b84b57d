//! Chain demo frontend (authenticated variant).
//!
//! Same surface as the plain frontend, except `/full` authenticates the
//! backend call: a short-lived identity token is minted for the backend URL
//! as audience and attached as a bearer credential. Credentials are ambient
//! (platform metadata server); no key material is handled here.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
