//! JSON REST handler for the team access-group index.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use orgsync_app::ports::{
    AccessGroupRepository, MemberMappingService, OrganizationMemberRepository,
    OrganizationRepository, TeamRepository,
};
use orgsync_domain::access_group::AccessGroup;
use orgsync_domain::time::Timestamp;

use crate::error::ApiError;
use crate::state::AppState;

/// One access group as rendered by the index endpoint.
///
/// Ids are rendered as strings so API consumers never have to care how the
/// backend allocates them.
#[derive(Serialize)]
pub struct AccessGroupResponse {
    pub id: String,
    pub team_id: String,
    pub name: String,
    pub date_added: Timestamp,
}

impl From<AccessGroup> for AccessGroupResponse {
    fn from(group: AccessGroup) -> Self {
        Self {
            id: group.id.to_string(),
            team_id: group.team_id.to_string(),
            name: group.name,
            date_added: group.date_added,
        }
    }
}

/// Possible responses from the index endpoint.
pub enum IndexResponse {
    Ok(Json<Vec<AccessGroupResponse>>),
}

impl IntoResponse for IndexResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/organizations/{org_slug}/teams/{team_slug}/access-groups`
///
/// Returns the team's access groups ordered by name.
pub async fn index<M, OR, MR, TR, GR>(
    State(state): State<AppState<M, OR, MR, TR, GR>>,
    Path((org_slug, team_slug)): Path<(String, String)>,
) -> Result<IndexResponse, ApiError>
where
    M: MemberMappingService + Send + Sync + 'static,
    OR: OrganizationRepository + Send + Sync + 'static,
    MR: OrganizationMemberRepository + Send + Sync + 'static,
    TR: TeamRepository + Send + Sync + 'static,
    GR: AccessGroupRepository + Send + Sync + 'static,
{
    let groups = state
        .access_group_service
        .list_for_team(&org_slug, &team_slug)
        .await?;
    Ok(IndexResponse::Ok(Json(
        groups.into_iter().map(AccessGroupResponse::from).collect(),
    )))
}
