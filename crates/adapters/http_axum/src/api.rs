//! JSON API route assembly.

use axum::Router;
use axum::routing::{get, post, put};

use orgsync_app::ports::{
    AccessGroupRepository, MemberMappingService, OrganizationMemberRepository,
    OrganizationRepository, TeamRepository,
};

use crate::state::AppState;

pub mod access_groups;
pub mod member_mappings;
pub mod organization_members;

/// Build the `/api` subtree.
///
/// The `/internal` routes are the server side of the member-mapping RPC
/// boundary; their paths must stay in agreement with
/// [`orgsync_app::rpc::paths`] (pinned by the end-to-end tests, which
/// address the router through those constants).
pub fn routes<M, OR, MR, TR, GR>() -> Router<AppState<M, OR, MR, TR, GR>>
where
    M: MemberMappingService + Send + Sync + 'static,
    OR: OrganizationRepository + Send + Sync + 'static,
    MR: OrganizationMemberRepository + Send + Sync + 'static,
    TR: TeamRepository + Send + Sync + 'static,
    GR: AccessGroupRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/internal/member-mappings/create",
            post(member_mappings::create),
        )
        .route(
            "/internal/member-mappings/create-with-member",
            post(member_mappings::create_with_member),
        )
        .route(
            "/internal/member-mappings/update-with-member",
            post(member_mappings::update_with_member),
        )
        .route(
            "/internal/member-mappings/delete-with-member",
            post(member_mappings::delete_with_member),
        )
        .route(
            "/organizations/{org_slug}/members",
            post(organization_members::create),
        )
        .route(
            "/organizations/{org_slug}/members/{member_id}",
            put(organization_members::update).delete(organization_members::remove),
        )
        .route(
            "/organizations/{org_slug}/teams/{team_slug}/access-groups",
            get(access_groups::index),
        )
}
