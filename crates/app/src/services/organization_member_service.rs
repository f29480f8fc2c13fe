//! Organization-member service — lifecycle of the authoritative membership
//! record, keeping the control-silo projection in step through the
//! member-mapping contract.
//!
//! Each storage or mapping call is its own unit of work; there is no
//! cross-silo transaction, so a failed projection call surfaces to the
//! caller instead of being silently dropped.

use orgsync_domain::error::{NotFoundError, OrgsyncError};
use orgsync_domain::id::{OrganizationId, OrganizationMemberId};
use orgsync_domain::member_mapping::MemberMappingUpdate;
use orgsync_domain::organization::Organization;
use orgsync_domain::organization_member::{NewOrganizationMember, OrganizationMember};
use orgsync_domain::time::now;

use crate::ports::{MemberMappingService, OrganizationMemberRepository, OrganizationRepository};

/// Application service for membership CRUD with projection sync.
pub struct OrganizationMemberService<OR, MR, MS> {
    orgs: OR,
    members: MR,
    mappings: MS,
}

impl<OR, MR, MS> OrganizationMemberService<OR, MR, MS>
where
    OR: OrganizationRepository,
    MR: OrganizationMemberRepository,
    MS: MemberMappingService,
{
    /// Create a new service from its ports.
    pub fn new(orgs: OR, members: MR, mappings: MS) -> Self {
        Self {
            orgs,
            members,
            mappings,
        }
    }

    /// Add a member to the organization addressed by `organization_slug`,
    /// then create its mapping projection.
    ///
    /// # Errors
    ///
    /// Returns [`OrgsyncError::Validation`] if invariants fail,
    /// [`OrgsyncError::NotFound`] when the organization does not exist, or a
    /// storage/transport error from the ports.
    pub async fn add_member(
        &self,
        organization_slug: &str,
        new: NewOrganizationMember,
    ) -> Result<OrganizationMember, OrgsyncError> {
        new.validate()?;
        let org = self.organization(organization_slug).await?;
        let member = self.members.create(org.id, new, now()).await?;
        self.mappings
            .create_with_organization_member(member.clone())
            .await?;
        Ok(member)
    }

    /// Apply a partial update to a membership, then push the member's full
    /// state to the mapping projection.
    ///
    /// # Errors
    ///
    /// Returns [`OrgsyncError::NotFound`] when the organization or member
    /// does not exist, [`OrgsyncError::Validation`] if the update violates
    /// invariants, or a storage/transport error from the ports.
    pub async fn update_member(
        &self,
        organization_slug: &str,
        member_id: OrganizationMemberId,
        update: MemberMappingUpdate,
    ) -> Result<OrganizationMember, OrgsyncError> {
        let org = self.organization(organization_slug).await?;
        let Some(mut member) = self.members.get(org.id, member_id).await? else {
            return Err(member_not_found(org.id, member_id));
        };
        member.apply_update(update)?;
        let member = self.members.update(member).await?;
        self.mappings
            .update_with_organization_member(
                member.id,
                member.organization_id,
                member.to_mapping_update(),
            )
            .await?;
        Ok(member)
    }

    /// Remove a membership and its mapping projection.
    ///
    /// # Errors
    ///
    /// Returns [`OrgsyncError::NotFound`] when the organization or member
    /// does not exist, or a storage/transport error from the ports.
    pub async fn remove_member(
        &self,
        organization_slug: &str,
        member_id: OrganizationMemberId,
    ) -> Result<(), OrgsyncError> {
        let org = self.organization(organization_slug).await?;
        self.members.delete(org.id, member_id).await?;
        self.mappings
            .delete_with_organization_member(member_id, org.id)
            .await
    }

    async fn organization(&self, slug: &str) -> Result<Organization, OrgsyncError> {
        let Some(org) = self.orgs.find_by_slug(slug).await? else {
            return Err(NotFoundError {
                entity: "Organization",
                key: slug.to_string(),
            }
            .into());
        };
        Ok(org)
    }
}

fn member_not_found(
    organization_id: OrganizationId,
    member_id: OrganizationMemberId,
) -> OrgsyncError {
    NotFoundError {
        entity: "OrganizationMember",
        key: format!("{member_id}/{organization_id}"),
    }
    .into()
}
