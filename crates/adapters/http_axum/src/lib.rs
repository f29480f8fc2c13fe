//! # orgsync-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **internal RPC endpoints** for the member-mapping contract —
//!   the server side of the silo boundary, mounted where the mapping data
//!   lives (control silo or monolith)
//! - Serve the **region API**: organization-member lifecycle and the
//!   team-scoped access-group index
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `orgsync-app` (for port traits and services) and
//! `orgsync-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
