//! JSON REST handlers for the organization-member lifecycle (region API).

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use orgsync_app::ports::{
    AccessGroupRepository, MemberMappingService, OrganizationMemberRepository,
    OrganizationRepository, TeamRepository,
};
use orgsync_domain::id::{OrganizationMemberId, UserId};
use orgsync_domain::member_mapping::{InviteStatus, MemberMappingUpdate};
use orgsync_domain::organization_member::{NewOrganizationMember, OrganizationMember};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for adding a member.
#[derive(Deserialize)]
pub struct CreateMemberRequest {
    pub role: String,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub inviter_id: Option<UserId>,
    #[serde(default)]
    pub invite_status: Option<InviteStatus>,
}

impl From<CreateMemberRequest> for NewOrganizationMember {
    fn from(req: CreateMemberRequest) -> Self {
        Self {
            role: req.role,
            user_id: req.user_id,
            email: req.email,
            inviter_id: req.inviter_id,
            invite_status: req.invite_status,
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<OrganizationMember>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the update endpoint.
pub enum UpdateResponse {
    Ok(Json<OrganizationMember>),
}

impl IntoResponse for UpdateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `POST /api/organizations/{org_slug}/members`
pub async fn create<M, OR, MR, TR, GR>(
    State(state): State<AppState<M, OR, MR, TR, GR>>,
    Path(org_slug): Path<String>,
    Json(req): Json<CreateMemberRequest>,
) -> Result<CreateResponse, ApiError>
where
    M: MemberMappingService + Send + Sync + 'static,
    OR: OrganizationRepository + Send + Sync + 'static,
    MR: OrganizationMemberRepository + Send + Sync + 'static,
    TR: TeamRepository + Send + Sync + 'static,
    GR: AccessGroupRepository + Send + Sync + 'static,
{
    let member = state
        .member_service
        .add_member(&org_slug, req.into())
        .await?;
    Ok(CreateResponse::Created(Json(member)))
}

/// `PUT /api/organizations/{org_slug}/members/{member_id}`
///
/// The body is a tri-state patch: omitted fields are left alone, explicit
/// nulls clear the stored value.
pub async fn update<M, OR, MR, TR, GR>(
    State(state): State<AppState<M, OR, MR, TR, GR>>,
    Path((org_slug, member_id)): Path<(String, i64)>,
    Json(update): Json<MemberMappingUpdate>,
) -> Result<UpdateResponse, ApiError>
where
    M: MemberMappingService + Send + Sync + 'static,
    OR: OrganizationRepository + Send + Sync + 'static,
    MR: OrganizationMemberRepository + Send + Sync + 'static,
    TR: TeamRepository + Send + Sync + 'static,
    GR: AccessGroupRepository + Send + Sync + 'static,
{
    let member = state
        .member_service
        .update_member(&org_slug, OrganizationMemberId::new(member_id), update)
        .await?;
    Ok(UpdateResponse::Ok(Json(member)))
}

/// `DELETE /api/organizations/{org_slug}/members/{member_id}`
pub async fn remove<M, OR, MR, TR, GR>(
    State(state): State<AppState<M, OR, MR, TR, GR>>,
    Path((org_slug, member_id)): Path<(String, i64)>,
) -> Result<DeleteResponse, ApiError>
where
    M: MemberMappingService + Send + Sync + 'static,
    OR: OrganizationRepository + Send + Sync + 'static,
    MR: OrganizationMemberRepository + Send + Sync + 'static,
    TR: TeamRepository + Send + Sync + 'static,
    GR: AccessGroupRepository + Send + Sync + 'static,
{
    state
        .member_service
        .remove_member(&org_slug, OrganizationMemberId::new(member_id))
        .await?;
    Ok(DeleteResponse::NoContent)
}
