//! Reqwest-based implementation of the member-mapping contract.

use std::future::Future;

use reqwest::StatusCode;

use orgsync_app::ports::MemberMappingService;
use orgsync_app::rpc::{self, DeleteWithMemberRequest, UpdateWithMemberRequest};
use orgsync_domain::error::{AlreadyExistsError, NotFoundError, OrgsyncError};
use orgsync_domain::id::{OrganizationId, OrganizationMemberId};
use orgsync_domain::member_mapping::{MemberMapping, MemberMappingUpdate, NewMemberMapping};
use orgsync_domain::organization_member::OrganizationMember;

use crate::error::RpcError;

/// Remote proxy POSTing contract operations to a control-silo peer.
#[derive(Clone)]
pub struct RpcMemberMappingClient {
    base_url: String,
    client: reqwest::Client,
}

impl RpcMemberMappingClient {
    /// Create a client targeting the given control-silo base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// POST `body` to `path` and decode a mapping from a 2xx answer.
    ///
    /// `key` is the rendered identifying pair, used to reconstruct typed
    /// `NotFound` / `AlreadyExists` errors from the peer's status code.
    async fn post_for_mapping<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        key: String,
    ) -> Result<MemberMapping, OrgsyncError> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(RpcError::from)?;

        match response.status() {
            status if status.is_success() => {
                let mapping = response.json().await.map_err(RpcError::from)?;
                Ok(mapping)
            }
            StatusCode::NOT_FOUND => Err(NotFoundError {
                entity: "MemberMapping",
                key,
            }
            .into()),
            StatusCode::CONFLICT => Err(AlreadyExistsError {
                entity: "MemberMapping",
                key,
            }
            .into()),
            status => Err(unexpected_status(status, response).await),
        }
    }
}

async fn unexpected_status(status: StatusCode, response: reqwest::Response) -> OrgsyncError {
    let body = response.text().await.unwrap_or_default();
    RpcError::UnexpectedStatus {
        status: status.as_u16(),
        body,
    }
    .into()
}

impl MemberMappingService for RpcMemberMappingClient {
    fn create_mapping(
        &self,
        new: NewMemberMapping,
    ) -> impl Future<Output = Result<MemberMapping, OrgsyncError>> + Send {
        async move {
            let key = MemberMapping::render_key(new.member_id, new.organization_id);
            self.post_for_mapping(rpc::paths::CREATE, &new, key).await
        }
    }

    fn create_with_organization_member(
        &self,
        member: OrganizationMember,
    ) -> impl Future<Output = Result<MemberMapping, OrgsyncError>> + Send {
        async move {
            let key = MemberMapping::render_key(member.id, member.organization_id);
            self.post_for_mapping(rpc::paths::CREATE_WITH_MEMBER, &member, key)
                .await
        }
    }

    fn update_with_organization_member(
        &self,
        member_id: OrganizationMemberId,
        organization_id: OrganizationId,
        update: MemberMappingUpdate,
    ) -> impl Future<Output = Result<MemberMapping, OrgsyncError>> + Send {
        async move {
            let key = MemberMapping::render_key(member_id, organization_id);
            let request = UpdateWithMemberRequest {
                member_id,
                organization_id,
                update,
            };
            self.post_for_mapping(rpc::paths::UPDATE_WITH_MEMBER, &request, key)
                .await
        }
    }

    fn delete_with_organization_member(
        &self,
        member_id: OrganizationMemberId,
        organization_id: OrganizationId,
    ) -> impl Future<Output = Result<(), OrgsyncError>> + Send {
        async move {
            let request = DeleteWithMemberRequest {
                member_id,
                organization_id,
            };
            let response = self
                .client
                .post(self.url(rpc::paths::DELETE_WITH_MEMBER))
                .json(&request)
                .send()
                .await
                .map_err(RpcError::from)?;

            let status = response.status();
            if status.is_success() {
                Ok(())
            } else {
                Err(unexpected_status(status, response).await)
            }
        }
    }
}
