//! # orgsync-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `MemberMappingRepository` — persistence for the mapping projection
//!   - `OrganizationRepository`, `OrganizationMemberRepository`,
//!     `TeamRepository`, `AccessGroupRepository` — region-silo persistence
//! - Define the **member-mapping service contract** (`MemberMappingService`)
//!   and its two realizations:
//!   - `DatabaseMemberMappingService` — in-process, database-backed
//!   - `MemberMappingDelegate` — location-transparent wrapper selected at
//!     construction time from the process silo mode
//! - Define the **RPC wire contract** (paths and body envelopes) shared by
//!   both sides of the silo boundary
//! - Orchestrate domain objects without knowing *how* persistence or
//!   transport works
//!
//! ## Dependency rule
//! Depends on `orgsync-domain` only (plus `serde` for the wire contract).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod delegation;
pub mod ports;
pub mod rpc;
pub mod services;
