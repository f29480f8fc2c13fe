//! Database-backed realization of the member-mapping contract.
//!
//! This is the single concrete backend; every other realization
//! (the delegate, the remote proxy) eventually lands here in the silo that
//! owns the data.

use std::future::Future;

use orgsync_domain::error::{NotFoundError, OrgsyncError};
use orgsync_domain::id::{OrganizationId, OrganizationMemberId};
use orgsync_domain::member_mapping::{MemberMapping, MemberMappingUpdate, NewMemberMapping};
use orgsync_domain::organization_member::OrganizationMember;
use orgsync_domain::time::now;

use crate::ports::{MemberMappingRepository, MemberMappingService};

/// In-process implementation of the contract over a mapping repository.
pub struct DatabaseMemberMappingService<R> {
    repo: R,
}

impl<R: MemberMappingRepository> DatabaseMemberMappingService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }
}

impl<R> MemberMappingService for DatabaseMemberMappingService<R>
where
    R: MemberMappingRepository + Send + Sync,
{
    fn create_mapping(
        &self,
        new: NewMemberMapping,
    ) -> impl Future<Output = Result<MemberMapping, OrgsyncError>> + Send {
        async move {
            let mapping = new.into_mapping(now());
            mapping.validate()?;
            self.repo.insert(mapping).await
        }
    }

    fn create_with_organization_member(
        &self,
        member: OrganizationMember,
    ) -> impl Future<Output = Result<MemberMapping, OrgsyncError>> + Send {
        async move {
            let mapping = member.to_mapping();
            mapping.validate()?;
            self.repo.insert(mapping).await
        }
    }

    fn update_with_organization_member(
        &self,
        member_id: OrganizationMemberId,
        organization_id: OrganizationId,
        update: MemberMappingUpdate,
    ) -> impl Future<Output = Result<MemberMapping, OrgsyncError>> + Send {
        async move {
            let Some(mut mapping) = self.repo.get(member_id, organization_id).await? else {
                return Err(NotFoundError {
                    entity: "MemberMapping",
                    key: MemberMapping::render_key(member_id, organization_id),
                }
                .into());
            };
            update.apply_to(&mut mapping)?;
            self.repo.update(mapping).await
        }
    }

    fn delete_with_organization_member(
        &self,
        member_id: OrganizationMemberId,
        organization_id: OrganizationId,
    ) -> impl Future<Output = Result<(), OrgsyncError>> + Send {
        self.repo.delete(member_id, organization_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgsync_domain::error::{AlreadyExistsError, ValidationError};
    use orgsync_domain::member_mapping::InviteStatus;
    use orgsync_domain::patch::Patch;
    use std::collections::HashMap;
    use std::sync::Mutex;

    type Key = (OrganizationMemberId, OrganizationId);

    struct InMemoryMappingRepo {
        store: Mutex<HashMap<Key, MemberMapping>>,
    }

    impl Default for InMemoryMappingRepo {
        fn default() -> Self {
            Self {
                store: Mutex::new(HashMap::new()),
            }
        }
    }

    impl MemberMappingRepository for InMemoryMappingRepo {
        fn insert(
            &self,
            mapping: MemberMapping,
        ) -> impl Future<Output = Result<MemberMapping, OrgsyncError>> + Send {
            let mut store = self.store.lock().unwrap();
            let key = (mapping.member_id, mapping.organization_id);
            let result = if store.contains_key(&key) {
                Err(AlreadyExistsError {
                    entity: "MemberMapping",
                    key: MemberMapping::render_key(key.0, key.1),
                }
                .into())
            } else {
                store.insert(key, mapping.clone());
                Ok(mapping)
            };
            async { result }
        }

        fn get(
            &self,
            member_id: OrganizationMemberId,
            organization_id: OrganizationId,
        ) -> impl Future<Output = Result<Option<MemberMapping>, OrgsyncError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.get(&(member_id, organization_id)).cloned();
            async { Ok(result) }
        }

        fn list_for_organization(
            &self,
            organization_id: OrganizationId,
        ) -> impl Future<Output = Result<Vec<MemberMapping>, OrgsyncError>> + Send {
            let store = self.store.lock().unwrap();
            let mut result: Vec<MemberMapping> = store
                .values()
                .filter(|m| m.organization_id == organization_id)
                .cloned()
                .collect();
            result.sort_by_key(|m| m.member_id);
            async { Ok(result) }
        }

        fn update(
            &self,
            mapping: MemberMapping,
        ) -> impl Future<Output = Result<MemberMapping, OrgsyncError>> + Send {
            let mut store = self.store.lock().unwrap();
            let key = (mapping.member_id, mapping.organization_id);
            let result = if store.contains_key(&key) {
                store.insert(key, mapping.clone());
                Ok(mapping)
            } else {
                Err(NotFoundError {
                    entity: "MemberMapping",
                    key: MemberMapping::render_key(key.0, key.1),
                }
                .into())
            };
            async { result }
        }

        fn delete(
            &self,
            member_id: OrganizationMemberId,
            organization_id: OrganizationId,
        ) -> impl Future<Output = Result<(), OrgsyncError>> + Send {
            let mut store = self.store.lock().unwrap();
            store.remove(&(member_id, organization_id));
            async { Ok(()) }
        }
    }

    fn make_service() -> DatabaseMemberMappingService<InMemoryMappingRepo> {
        DatabaseMemberMappingService::new(InMemoryMappingRepo::default())
    }

    fn new_mapping() -> NewMemberMapping {
        NewMemberMapping {
            member_id: OrganizationMemberId::new(42),
            organization_id: OrganizationId::new(7),
            role: "member".to_string(),
            user_id: None,
            email: Some("ada@example.com".to_string()),
            inviter_id: None,
            invite_status: Some(InviteStatus::RequestedToBeInvited),
        }
    }

    #[tokio::test]
    async fn should_create_mapping_and_echo_field_values() {
        let svc = make_service();
        let created = svc.create_mapping(new_mapping()).await.unwrap();
        assert_eq!(created.member_id, OrganizationMemberId::new(42));
        assert_eq!(created.organization_id, OrganizationId::new(7));
        assert_eq!(created.role, "member");
        assert_eq!(created.email.as_deref(), Some("ada@example.com"));
        assert_eq!(
            created.invite_status,
            Some(InviteStatus::RequestedToBeInvited)
        );
    }

    #[tokio::test]
    async fn should_reject_duplicate_create_for_same_pair() {
        let svc = make_service();
        svc.create_mapping(new_mapping()).await.unwrap();
        let result = svc.create_mapping(new_mapping()).await;
        assert!(matches!(result, Err(OrgsyncError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn should_reject_create_without_user_or_email() {
        let svc = make_service();
        let mut new = new_mapping();
        new.email = None;
        let result = svc.create_mapping(new).await;
        assert!(matches!(
            result,
            Err(OrgsyncError::Validation(
                ValidationError::MissingUserAndEmail
            ))
        ));
    }

    #[tokio::test]
    async fn should_leave_omitted_fields_unchanged_on_update() {
        let svc = make_service();
        svc.create_mapping(new_mapping()).await.unwrap();

        let update = MemberMappingUpdate {
            role: Patch::value("owner".to_string()),
            ..MemberMappingUpdate::default()
        };
        let updated = svc
            .update_with_organization_member(
                OrganizationMemberId::new(42),
                OrganizationId::new(7),
                update,
            )
            .await
            .unwrap();

        assert_eq!(updated.role, "owner");
        assert_eq!(updated.email.as_deref(), Some("ada@example.com"));
        assert_eq!(
            updated.invite_status,
            Some(InviteStatus::RequestedToBeInvited)
        );
    }

    #[tokio::test]
    async fn should_clear_field_on_explicit_null_update() {
        let svc = make_service();
        svc.create_mapping(new_mapping()).await.unwrap();

        let update = MemberMappingUpdate {
            user_id: Patch::value(orgsync_domain::id::UserId::new(9)),
            invite_status: Patch::clear(),
            ..MemberMappingUpdate::default()
        };
        let updated = svc
            .update_with_organization_member(
                OrganizationMemberId::new(42),
                OrganizationId::new(7),
                update,
            )
            .await
            .unwrap();

        assert_eq!(updated.invite_status, None);
        assert_eq!(updated.user_id, Some(orgsync_domain::id::UserId::new(9)));
    }

    #[tokio::test]
    async fn should_fail_update_after_delete_with_not_found() {
        let svc = make_service();
        svc.create_mapping(new_mapping()).await.unwrap();
        svc.delete_with_organization_member(OrganizationMemberId::new(42), OrganizationId::new(7))
            .await
            .unwrap();

        let result = svc
            .update_with_organization_member(
                OrganizationMemberId::new(42),
                OrganizationId::new(7),
                MemberMappingUpdate::default(),
            )
            .await;
        assert!(matches!(result, Err(OrgsyncError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_treat_delete_of_absent_mapping_as_success() {
        let svc = make_service();
        let result = svc
            .delete_with_organization_member(
                OrganizationMemberId::new(999),
                OrganizationId::new(7),
            )
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_project_member_fields_when_creating_from_member() {
        let svc = make_service();
        let member = OrganizationMember {
            id: OrganizationMemberId::new(5),
            organization_id: OrganizationId::new(7),
            role: "admin".to_string(),
            user_id: Some(orgsync_domain::id::UserId::new(3)),
            email: None,
            inviter_id: None,
            invite_status: Some(InviteStatus::Approved),
            date_added: now(),
        };
        let mapping = svc
            .create_with_organization_member(member.clone())
            .await
            .unwrap();
        assert_eq!(mapping.member_id, member.id);
        assert_eq!(mapping.date_added, member.date_added);
        assert_eq!(mapping.role, "admin");
    }
}
