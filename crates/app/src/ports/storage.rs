//! Storage ports — repository traits for persistence.

use std::future::Future;

use orgsync_domain::access_group::{AccessGroup, NewAccessGroup};
use orgsync_domain::error::OrgsyncError;
use orgsync_domain::id::{OrganizationId, OrganizationMemberId, TeamId};
use orgsync_domain::member_mapping::MemberMapping;
use orgsync_domain::organization::{NewOrganization, Organization};
use orgsync_domain::organization_member::{NewOrganizationMember, OrganizationMember};
use orgsync_domain::team::{NewTeam, Team};
use orgsync_domain::time::Timestamp;

/// Persistence for the control-silo mapping projection.
pub trait MemberMappingRepository {
    /// Insert a new projection row.
    ///
    /// Fails with [`OrgsyncError::AlreadyExists`] when the identifying pair
    /// is already taken.
    fn insert(
        &self,
        mapping: MemberMapping,
    ) -> impl Future<Output = Result<MemberMapping, OrgsyncError>> + Send;

    /// Fetch a projection row by its identifying pair.
    fn get(
        &self,
        member_id: OrganizationMemberId,
        organization_id: OrganizationId,
    ) -> impl Future<Output = Result<Option<MemberMapping>, OrgsyncError>> + Send;

    /// All projection rows for one organization, ordered by member id.
    fn list_for_organization(
        &self,
        organization_id: OrganizationId,
    ) -> impl Future<Output = Result<Vec<MemberMapping>, OrgsyncError>> + Send;

    /// Overwrite an existing row.
    ///
    /// Fails with [`OrgsyncError::NotFound`] when no row matched.
    fn update(
        &self,
        mapping: MemberMapping,
    ) -> impl Future<Output = Result<MemberMapping, OrgsyncError>> + Send;

    /// Remove a row. Removing an absent row is not an error.
    fn delete(
        &self,
        member_id: OrganizationMemberId,
        organization_id: OrganizationId,
    ) -> impl Future<Output = Result<(), OrgsyncError>> + Send;
}

/// Persistence for organizations.
pub trait OrganizationRepository {
    /// Insert a new organization and return it with its assigned id.
    fn create(
        &self,
        new: NewOrganization,
    ) -> impl Future<Output = Result<Organization, OrgsyncError>> + Send;

    /// Look up an organization by slug.
    fn find_by_slug(
        &self,
        slug: &str,
    ) -> impl Future<Output = Result<Option<Organization>, OrgsyncError>> + Send;
}

/// Persistence for the authoritative membership records.
pub trait OrganizationMemberRepository {
    /// Insert a new membership and return it with its assigned id.
    fn create(
        &self,
        organization_id: OrganizationId,
        new: NewOrganizationMember,
        date_added: Timestamp,
    ) -> impl Future<Output = Result<OrganizationMember, OrgsyncError>> + Send;

    /// Fetch a membership scoped to its organization.
    fn get(
        &self,
        organization_id: OrganizationId,
        member_id: OrganizationMemberId,
    ) -> impl Future<Output = Result<Option<OrganizationMember>, OrgsyncError>> + Send;

    /// Overwrite an existing membership.
    ///
    /// Fails with [`OrgsyncError::NotFound`] when no row matched.
    fn update(
        &self,
        member: OrganizationMember,
    ) -> impl Future<Output = Result<OrganizationMember, OrgsyncError>> + Send;

    /// Remove a membership. Unlike the projection side, removing an absent
    /// authoritative record fails with [`OrgsyncError::NotFound`].
    fn delete(
        &self,
        organization_id: OrganizationId,
        member_id: OrganizationMemberId,
    ) -> impl Future<Output = Result<(), OrgsyncError>> + Send;
}

/// Persistence for teams.
pub trait TeamRepository {
    /// Insert a new team and return it with its assigned id.
    fn create(&self, new: NewTeam) -> impl Future<Output = Result<Team, OrgsyncError>> + Send;

    /// Look up a team by its organization slug and team slug.
    fn find_by_slugs(
        &self,
        organization_slug: &str,
        team_slug: &str,
    ) -> impl Future<Output = Result<Option<Team>, OrgsyncError>> + Send;
}

/// Persistence for team-scoped access groups.
pub trait AccessGroupRepository {
    /// Insert a new access group and return it with its assigned id and
    /// creation time.
    fn create(
        &self,
        new: NewAccessGroup,
    ) -> impl Future<Output = Result<AccessGroup, OrgsyncError>> + Send;

    /// All access groups of a team, ordered by name.
    fn list_by_team(
        &self,
        team_id: TeamId,
    ) -> impl Future<Output = Result<Vec<AccessGroup>, OrgsyncError>> + Send;
}
