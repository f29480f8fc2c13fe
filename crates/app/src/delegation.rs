//! Location-transparent dispatch for the member-mapping contract.
//!
//! The variant is chosen once, at construction time, from the silo mode of
//! the running process. Call sites hold a single delegate value and the same
//! code works whether the operation executes in-process or crosses the silo
//! boundary as an RPC.

use std::future::Future;

use orgsync_domain::error::OrgsyncError;
use orgsync_domain::id::{OrganizationId, OrganizationMemberId};
use orgsync_domain::member_mapping::{MemberMapping, MemberMappingUpdate, NewMemberMapping};
use orgsync_domain::organization_member::OrganizationMember;
use orgsync_domain::silo::SiloMode;

use crate::ports::MemberMappingService;

/// Silo mode that owns member-mapping data.
pub const MEMBER_MAPPING_LOCAL_MODE: SiloMode = SiloMode::Control;

/// Delegate over the two realizations of the contract.
pub enum MemberMappingDelegate<L, R> {
    /// Executes in-process against local storage.
    Local(L),
    /// Forwards the call to the silo that owns the data.
    Remote(R),
}

impl<L, R> MemberMappingDelegate<L, R> {
    /// Whether a process running in `mode` should construct the local
    /// variant rather than a remote proxy.
    #[must_use]
    pub fn runs_locally(mode: SiloMode) -> bool {
        mode.serves(MEMBER_MAPPING_LOCAL_MODE)
    }
}

impl<L, R> MemberMappingService for MemberMappingDelegate<L, R>
where
    L: MemberMappingService + Send + Sync,
    R: MemberMappingService + Send + Sync,
{
    fn create_mapping(
        &self,
        new: NewMemberMapping,
    ) -> impl Future<Output = Result<MemberMapping, OrgsyncError>> + Send {
        async move {
            match self {
                Self::Local(service) => service.create_mapping(new).await,
                Self::Remote(service) => service.create_mapping(new).await,
            }
        }
    }

    fn create_with_organization_member(
        &self,
        member: OrganizationMember,
    ) -> impl Future<Output = Result<MemberMapping, OrgsyncError>> + Send {
        async move {
            match self {
                Self::Local(service) => service.create_with_organization_member(member).await,
                Self::Remote(service) => service.create_with_organization_member(member).await,
            }
        }
    }

    fn update_with_organization_member(
        &self,
        member_id: OrganizationMemberId,
        organization_id: OrganizationId,
        update: MemberMappingUpdate,
    ) -> impl Future<Output = Result<MemberMapping, OrgsyncError>> + Send {
        async move {
            match self {
                Self::Local(service) => {
                    service
                        .update_with_organization_member(member_id, organization_id, update)
                        .await
                }
                Self::Remote(service) => {
                    service
                        .update_with_organization_member(member_id, organization_id, update)
                        .await
                }
            }
        }
    }

    fn delete_with_organization_member(
        &self,
        member_id: OrganizationMemberId,
        organization_id: OrganizationId,
    ) -> impl Future<Output = Result<(), OrgsyncError>> + Send {
        async move {
            match self {
                Self::Local(service) => {
                    service
                        .delete_with_organization_member(member_id, organization_id)
                        .await
                }
                Self::Remote(service) => {
                    service
                        .delete_with_organization_member(member_id, organization_id)
                        .await
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgsync_domain::time::now;

    struct TaggedService(&'static str);

    impl MemberMappingService for TaggedService {
        fn create_mapping(
            &self,
            new: NewMemberMapping,
        ) -> impl Future<Output = Result<MemberMapping, OrgsyncError>> + Send {
            let mut mapping = new.into_mapping(now());
            mapping.role = self.0.to_string();
            async move { Ok(mapping) }
        }

        fn create_with_organization_member(
            &self,
            member: OrganizationMember,
        ) -> impl Future<Output = Result<MemberMapping, OrgsyncError>> + Send {
            let mut mapping = member.to_mapping();
            mapping.role = self.0.to_string();
            async move { Ok(mapping) }
        }

        fn update_with_organization_member(
            &self,
            member_id: OrganizationMemberId,
            organization_id: OrganizationId,
            _update: MemberMappingUpdate,
        ) -> impl Future<Output = Result<MemberMapping, OrgsyncError>> + Send {
            let mapping = MemberMapping {
                member_id,
                organization_id,
                date_added: now(),
                role: self.0.to_string(),
                user_id: None,
                email: Some("tagged@example.com".to_string()),
                inviter_id: None,
                invite_status: None,
            };
            async move { Ok(mapping) }
        }

        fn delete_with_organization_member(
            &self,
            _member_id: OrganizationMemberId,
            _organization_id: OrganizationId,
        ) -> impl Future<Output = Result<(), OrgsyncError>> + Send {
            async { Ok(()) }
        }
    }

    fn new_mapping() -> NewMemberMapping {
        NewMemberMapping {
            member_id: OrganizationMemberId::new(1),
            organization_id: OrganizationId::new(2),
            role: "member".to_string(),
            user_id: None,
            email: Some("ada@example.com".to_string()),
            inviter_id: None,
            invite_status: None,
        }
    }

    #[tokio::test]
    async fn should_dispatch_to_local_variant() {
        let delegate: MemberMappingDelegate<TaggedService, TaggedService> =
            MemberMappingDelegate::Local(TaggedService("local"));
        let mapping = delegate.create_mapping(new_mapping()).await.unwrap();
        assert_eq!(mapping.role, "local");
    }

    #[tokio::test]
    async fn should_dispatch_to_remote_variant() {
        let delegate: MemberMappingDelegate<TaggedService, TaggedService> =
            MemberMappingDelegate::Remote(TaggedService("remote"));
        let mapping = delegate.create_mapping(new_mapping()).await.unwrap();
        assert_eq!(mapping.role, "remote");
    }

    #[test]
    fn should_run_locally_in_monolith_and_control_modes() {
        assert!(MemberMappingDelegate::<(), ()>::runs_locally(
            SiloMode::Monolith
        ));
        assert!(MemberMappingDelegate::<(), ()>::runs_locally(
            SiloMode::Control
        ));
        assert!(!MemberMappingDelegate::<(), ()>::runs_locally(
            SiloMode::Region
        ));
    }
}
