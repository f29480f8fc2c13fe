//! Internal RPC handlers for the member-mapping contract.
//!
//! These endpoints are the server side of the silo boundary: the remote
//! proxy in a region silo POSTs the wire envelopes here, and the handlers
//! execute the operation against the locally-constructed mapping service.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use orgsync_app::ports::{
    AccessGroupRepository, MemberMappingService, OrganizationMemberRepository,
    OrganizationRepository, TeamRepository,
};
use orgsync_app::rpc::{DeleteWithMemberRequest, UpdateWithMemberRequest};
use orgsync_domain::member_mapping::{MemberMapping, NewMemberMapping};
use orgsync_domain::organization_member::OrganizationMember;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the two create endpoints.
pub enum CreateResponse {
    Created(Json<MemberMapping>),
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
    Ok(Json<MemberMapping>),
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

/// `POST /api/internal/member-mappings/create`
pub async fn create<M, OR, MR, TR, GR>(
    State(state): State<AppState<M, OR, MR, TR, GR>>,
    Json(req): Json<NewMemberMapping>,
) -> Result<CreateResponse, ApiError>
where
    M: MemberMappingService + Send + Sync + 'static,
    OR: OrganizationRepository + Send + Sync + 'static,
    MR: OrganizationMemberRepository + Send + Sync + 'static,
    TR: TeamRepository + Send + Sync + 'static,
    GR: AccessGroupRepository + Send + Sync + 'static,
{
    let mapping = state.mapping_service.create_mapping(req).await?;
    Ok(CreateResponse::Created(Json(mapping)))
}

/// `POST /api/internal/member-mappings/create-with-member`
pub async fn create_with_member<M, OR, MR, TR, GR>(
    State(state): State<AppState<M, OR, MR, TR, GR>>,
    Json(req): Json<OrganizationMember>,
) -> Result<CreateResponse, ApiError>
where
    M: MemberMappingService + Send + Sync + 'static,
    OR: OrganizationRepository + Send + Sync + 'static,
    MR: OrganizationMemberRepository + Send + Sync + 'static,
    TR: TeamRepository + Send + Sync + 'static,
    GR: AccessGroupRepository + Send + Sync + 'static,
{
    let mapping = state
        .mapping_service
        .create_with_organization_member(req)
        .await?;
    Ok(CreateResponse::Created(Json(mapping)))
}

/// `POST /api/internal/member-mappings/update-with-member`
pub async fn update_with_member<M, OR, MR, TR, GR>(
    State(state): State<AppState<M, OR, MR, TR, GR>>,
    Json(req): Json<UpdateWithMemberRequest>,
) -> Result<UpdateResponse, ApiError>
where
    M: MemberMappingService + Send + Sync + 'static,
    OR: OrganizationRepository + Send + Sync + 'static,
    MR: OrganizationMemberRepository + Send + Sync + 'static,
    TR: TeamRepository + Send + Sync + 'static,
    GR: AccessGroupRepository + Send + Sync + 'static,
{
    let mapping = state
        .mapping_service
        .update_with_organization_member(req.member_id, req.organization_id, req.update)
        .await?;
    Ok(UpdateResponse::Ok(Json(mapping)))
}

/// `POST /api/internal/member-mappings/delete-with-member`
pub async fn delete_with_member<M, OR, MR, TR, GR>(
    State(state): State<AppState<M, OR, MR, TR, GR>>,
    Json(req): Json<DeleteWithMemberRequest>,
) -> Result<DeleteResponse, ApiError>
where
    M: MemberMappingService + Send + Sync + 'static,
    OR: OrganizationRepository + Send + Sync + 'static,
    MR: OrganizationMemberRepository + Send + Sync + 'static,
    TR: TeamRepository + Send + Sync + 'static,
    GR: AccessGroupRepository + Send + Sync + 'static,
{
    state
        .mapping_service
        .delete_with_organization_member(req.member_id, req.organization_id)
        .await?;
    Ok(DeleteResponse::NoContent)
}
