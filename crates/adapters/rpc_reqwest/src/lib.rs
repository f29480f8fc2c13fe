//! # orgsync-adapter-rpc-reqwest
//!
//! Remote proxy for the member-mapping contract, built on
//! [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Implement `MemberMappingService` by POSTing the wire envelopes from
//!   `orgsync-app::rpc` to a control-silo peer
//! - Decode typed results and map response statuses back into the domain
//!   error taxonomy (404 → `NotFound`, 409 → `AlreadyExists`)
//!
//! A region-silo process constructs this client instead of the
//! database-backed service; call sites cannot tell the difference.
//!
//! ## Dependency rule
//! Depends on `orgsync-app` (for the contract and wire envelopes) and
//! `orgsync-domain`. The `app` and `domain` crates must never reference
//! this adapter.

pub mod client;
pub mod error;

pub use client::RpcMemberMappingClient;
pub use error::RpcError;
