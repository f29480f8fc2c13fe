//! Shared application state for axum handlers.

use std::sync::Arc;

use orgsync_app::ports::{
    AccessGroupRepository, MemberMappingService, OrganizationMemberRepository,
    OrganizationRepository, TeamRepository,
};
use orgsync_app::services::access_group_service::AccessGroupService;
use orgsync_app::services::organization_member_service::OrganizationMemberService;

/// Application state shared across all axum handlers.
///
/// Generic over the mapping-service realization and the repository types to
/// avoid dynamic dispatch; in a control silo or monolith `M` ends up being
/// the local database-backed service, in a region silo the remote proxy.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<M, OR, MR, TR, GR> {
    /// Member-mapping contract, served by the internal RPC endpoints.
    pub mapping_service: Arc<M>,
    /// Membership lifecycle service (region API).
    pub member_service: Arc<OrganizationMemberService<OR, MR, M>>,
    /// Access-group queries (region API).
    pub access_group_service: Arc<AccessGroupService<TR, GR>>,
}

impl<M, OR, MR, TR, GR> Clone for AppState<M, OR, MR, TR, GR> {
    fn clone(&self) -> Self {
        Self {
            mapping_service: Arc::clone(&self.mapping_service),
            member_service: Arc::clone(&self.member_service),
            access_group_service: Arc::clone(&self.access_group_service),
        }
    }
}

impl<M, OR, MR, TR, GR> AppState<M, OR, MR, TR, GR>
where
    M: MemberMappingService + Send + Sync + 'static,
    OR: OrganizationRepository + Send + Sync + 'static,
    MR: OrganizationMemberRepository + Send + Sync + 'static,
    TR: TeamRepository + Send + Sync + 'static,
    GR: AccessGroupRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        mapping_service: M,
        member_service: OrganizationMemberService<OR, MR, M>,
        access_group_service: AccessGroupService<TR, GR>,
    ) -> Self {
        Self {
            mapping_service: Arc::new(mapping_service),
            member_service: Arc::new(member_service),
            access_group_service: Arc::new(access_group_service),
        }
    }
}
