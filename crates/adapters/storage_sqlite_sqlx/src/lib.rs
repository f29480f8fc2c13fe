//! # orgsync-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `orgsync-app::ports`
//! - Manage the `SQLite` connection pool lifecycle
//! - Run database migrations (sqlx embedded migrations)
//! - Map between domain types and database rows, including translating
//!   unique-constraint violations into `AlreadyExists` and zero-row updates
//!   into `NotFound`
//!
//! A single migration set creates every table; each silo only touches its
//! subset (`member_mappings` in control, the region tables elsewhere, all of
//! them in a monolith).
//!
//! ## Dependency rule
//! Depends on `orgsync-app` (for port traits) and `orgsync-domain` (for
//! domain types). The `app` and `domain` crates must never reference this
//! adapter.

pub mod access_group_repo;
pub mod error;
pub mod member_mapping_repo;
pub mod organization_member_repo;
pub mod organization_repo;
pub mod pool;
pub mod team_repo;

pub use access_group_repo::SqliteAccessGroupRepository;
pub use error::StorageError;
pub use member_mapping_repo::SqliteMemberMappingRepository;
pub use organization_member_repo::SqliteOrganizationMemberRepository;
pub use organization_repo::SqliteOrganizationRepository;
pub use pool::{Config, Database};
pub use team_repo::SqliteTeamRepository;
