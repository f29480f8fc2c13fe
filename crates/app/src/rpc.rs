//! Wire contract for the member-mapping RPC boundary.
//!
//! Both sides of the silo boundary depend on this module: the HTTP adapter
//! mounts handlers at these paths in the control silo, and the remote proxy
//! POSTs to them from the region silo. Keeping paths and body envelopes in
//! one place is what guarantees the two stay in agreement.
//!
//! Bodies for the create operations are the domain payloads themselves
//! ([`NewMemberMapping`], [`OrganizationMember`]); update and delete wrap
//! the identifying pair in an envelope.
//!
//! [`NewMemberMapping`]: orgsync_domain::member_mapping::NewMemberMapping
//! [`OrganizationMember`]: orgsync_domain::organization_member::OrganizationMember

use serde::{Deserialize, Serialize};

use orgsync_domain::id::{OrganizationId, OrganizationMemberId};
use orgsync_domain::member_mapping::MemberMappingUpdate;

/// Absolute request paths for the member-mapping operations.
pub mod paths {
    /// `create_mapping`.
    pub const CREATE: &str = "/api/internal/member-mappings/create";
    /// `create_with_organization_member`.
    pub const CREATE_WITH_MEMBER: &str = "/api/internal/member-mappings/create-with-member";
    /// `update_with_organization_member`.
    pub const UPDATE_WITH_MEMBER: &str = "/api/internal/member-mappings/update-with-member";
    /// `delete_with_organization_member`.
    pub const DELETE_WITH_MEMBER: &str = "/api/internal/member-mappings/delete-with-member";
}

/// Body of [`paths::UPDATE_WITH_MEMBER`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateWithMemberRequest {
    pub member_id: OrganizationMemberId,
    pub organization_id: OrganizationId,
    pub update: MemberMappingUpdate,
}

/// Body of [`paths::DELETE_WITH_MEMBER`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteWithMemberRequest {
    pub member_id: OrganizationMemberId,
    pub organization_id: OrganizationId,
}
