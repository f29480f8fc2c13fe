//! # orgsync-domain
//!
//! Pure domain model for the orgsync membership-projection system.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **member mappings** (read-optimized projections of memberships
//!   kept in the control silo) and their partial-update payloads
//! - Define the **authoritative membership** record and its region-silo
//!   neighbours (organizations, teams, access groups)
//! - Define **silo modes** (monolith / control / region) used to select
//!   between in-process and remote service execution
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod patch;
pub mod silo;
pub mod time;

pub mod access_group;
pub mod member_mapping;
pub mod organization;
pub mod organization_member;
pub mod team;
