//! Member-mapping service contract — the four operations that keep the
//! control-silo projection consistent with the authoritative membership
//! record, defined independent of deployment topology.
//!
//! Implemented by exactly one concrete backend
//! ([`DatabaseMemberMappingService`](crate::services::member_mapping_service::DatabaseMemberMappingService))
//! but invoked through
//! [`MemberMappingDelegate`](crate::delegation::MemberMappingDelegate), which
//! runs the call in-process or forwards it across the silo boundary. Callers
//! never know which.

use std::future::Future;

use orgsync_domain::error::OrgsyncError;
use orgsync_domain::id::{OrganizationId, OrganizationMemberId};
use orgsync_domain::member_mapping::{MemberMapping, MemberMappingUpdate, NewMemberMapping};
use orgsync_domain::organization_member::OrganizationMember;

/// The cross-silo member-mapping contract.
pub trait MemberMappingService {
    /// Create a new projection row, stamped with the current time.
    ///
    /// Fails with [`OrgsyncError::AlreadyExists`] when the identifying
    /// `(member_id, organization_id)` pair is already taken.
    fn create_mapping(
        &self,
        new: NewMemberMapping,
    ) -> impl Future<Output = Result<MemberMapping, OrgsyncError>> + Send;

    /// Create a projection sourced directly from an authoritative membership
    /// entity, `date_added` included.
    fn create_with_organization_member(
        &self,
        member: OrganizationMember,
    ) -> impl Future<Output = Result<MemberMapping, OrgsyncError>> + Send;

    /// Apply a partial update. Fields absent from `update` are left
    /// unchanged; fields present (including explicit null) overwrite the
    /// stored value.
    ///
    /// Fails with [`OrgsyncError::NotFound`] when no matching mapping exists.
    fn update_with_organization_member(
        &self,
        member_id: OrganizationMemberId,
        organization_id: OrganizationId,
        update: MemberMappingUpdate,
    ) -> impl Future<Output = Result<MemberMapping, OrgsyncError>> + Send;

    /// Remove the mapping. Deleting an absent mapping succeeds: deletes are
    /// replayed across the silo boundary and a second delivery must not fail
    /// the caller.
    fn delete_with_organization_member(
        &self,
        member_id: OrganizationMemberId,
        organization_id: OrganizationId,
    ) -> impl Future<Output = Result<(), OrgsyncError>> + Send;
}
