//! `SQLite` implementation of [`MemberMappingRepository`].

use std::future::Future;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use orgsync_app::ports::MemberMappingRepository;
use orgsync_domain::error::{AlreadyExistsError, NotFoundError, OrgsyncError};
use orgsync_domain::id::{OrganizationId, OrganizationMemberId, UserId};
use orgsync_domain::member_mapping::{InviteStatus, MemberMapping};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`MemberMapping`].
struct Wrapper(MemberMapping);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<MemberMapping> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let member_id: i64 = row.try_get("member_id")?;
        let organization_id: i64 = row.try_get("organization_id")?;
        let date_added: DateTime<Utc> = row.try_get("date_added")?;
        let role: String = row.try_get("role")?;
        let user_id: Option<i64> = row.try_get("user_id")?;
        let email: Option<String> = row.try_get("email")?;
        let inviter_id: Option<i64> = row.try_get("inviter_id")?;
        let invite_status: Option<i32> = row.try_get("invite_status")?;

        let invite_status = invite_status
            .map(InviteStatus::try_from)
            .transpose()
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(MemberMapping {
            member_id: OrganizationMemberId::new(member_id),
            organization_id: OrganizationId::new(organization_id),
            date_added,
            role,
            user_id: user_id.map(UserId::new),
            email,
            inviter_id: inviter_id.map(UserId::new),
            invite_status,
        }))
    }
}

const INSERT: &str = "INSERT INTO member_mappings \
    (member_id, organization_id, date_added, role, user_id, email, inviter_id, invite_status) \
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)";
const SELECT_BY_PAIR: &str =
    "SELECT * FROM member_mappings WHERE member_id = ? AND organization_id = ?";
const SELECT_BY_ORGANIZATION: &str =
    "SELECT * FROM member_mappings WHERE organization_id = ? ORDER BY member_id";
const UPDATE: &str = "UPDATE member_mappings \
    SET date_added = ?, role = ?, user_id = ?, email = ?, inviter_id = ?, invite_status = ? \
    WHERE member_id = ? AND organization_id = ?";
const DELETE_BY_PAIR: &str =
    "DELETE FROM member_mappings WHERE member_id = ? AND organization_id = ?";

/// `SQLite`-backed member-mapping repository (control silo).
pub struct SqliteMemberMappingRepository {
    pool: SqlitePool,
}

impl SqliteMemberMappingRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl MemberMappingRepository for SqliteMemberMappingRepository {
    fn insert(
        &self,
        mapping: MemberMapping,
    ) -> impl Future<Output = Result<MemberMapping, OrgsyncError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(mapping.member_id.as_i64())
                .bind(mapping.organization_id.as_i64())
                .bind(mapping.date_added)
                .bind(&mapping.role)
                .bind(mapping.user_id.map(UserId::as_i64))
                .bind(&mapping.email)
                .bind(mapping.inviter_id.map(UserId::as_i64))
                .bind(mapping.invite_status.map(i32::from))
                .execute(&pool)
                .await
                .map_err(|err| match &err {
                    sqlx::Error::Database(db) if db.is_unique_violation() => {
                        OrgsyncError::from(AlreadyExistsError {
                            entity: "MemberMapping",
                            key: MemberMapping::render_key(
                                mapping.member_id,
                                mapping.organization_id,
                            ),
                        })
                    }
                    _ => StorageError::from(err).into(),
                })?;

            Ok(mapping)
        }
    }

    fn get(
        &self,
        member_id: OrganizationMemberId,
        organization_id: OrganizationId,
    ) -> impl Future<Output = Result<Option<MemberMapping>, OrgsyncError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_PAIR)
                .bind(member_id.as_i64())
                .bind(organization_id.as_i64())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn list_for_organization(
        &self,
        organization_id: OrganizationId,
    ) -> impl Future<Output = Result<Vec<MemberMapping>, OrgsyncError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_ORGANIZATION)
                .bind(organization_id.as_i64())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        mapping: MemberMapping,
    ) -> impl Future<Output = Result<MemberMapping, OrgsyncError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(mapping.date_added)
                .bind(&mapping.role)
                .bind(mapping.user_id.map(UserId::as_i64))
                .bind(&mapping.email)
                .bind(mapping.inviter_id.map(UserId::as_i64))
                .bind(mapping.invite_status.map(i32::from))
                .bind(mapping.member_id.as_i64())
                .bind(mapping.organization_id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(NotFoundError {
                    entity: "MemberMapping",
                    key: MemberMapping::render_key(mapping.member_id, mapping.organization_id),
                }
                .into());
            }

            Ok(mapping)
        }
    }

    fn delete(
        &self,
        member_id: OrganizationMemberId,
        organization_id: OrganizationId,
    ) -> impl Future<Output = Result<(), OrgsyncError>> + Send {
        let pool = self.pool.clone();
        async move {
            // idempotent: zero affected rows is still a success
            sqlx::query(DELETE_BY_PAIR)
                .bind(member_id.as_i64())
                .bind(organization_id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use orgsync_domain::time::now;

    async fn setup() -> SqliteMemberMappingRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteMemberMappingRepository::new(db.pool().clone())
    }

    fn test_mapping() -> MemberMapping {
        MemberMapping {
            member_id: OrganizationMemberId::new(42),
            organization_id: OrganizationId::new(7),
            date_added: now(),
            role: "member".to_string(),
            user_id: None,
            email: Some("ada@example.com".to_string()),
            inviter_id: Some(UserId::new(3)),
            invite_status: Some(InviteStatus::RequestedToBeInvited),
        }
    }

    #[tokio::test]
    async fn should_insert_and_retrieve_mapping_with_identical_fields() {
        let repo = setup().await;
        let mapping = test_mapping();

        repo.insert(mapping.clone()).await.unwrap();

        let fetched = repo
            .get(mapping.member_id, mapping.organization_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.role, mapping.role);
        assert_eq!(fetched.email, mapping.email);
        assert_eq!(fetched.inviter_id, mapping.inviter_id);
        assert_eq!(fetched.invite_status, mapping.invite_status);
        assert_eq!(fetched.date_added, mapping.date_added);
    }

    #[tokio::test]
    async fn should_reject_duplicate_pair_with_already_exists() {
        let repo = setup().await;
        repo.insert(test_mapping()).await.unwrap();

        let result = repo.insert(test_mapping()).await;
        assert!(matches!(result, Err(OrgsyncError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn should_return_none_when_pair_is_unknown() {
        let repo = setup().await;
        let result = repo
            .get(OrganizationMemberId::new(1), OrganizationId::new(1))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_list_mappings_for_one_organization_only() {
        let repo = setup().await;
        repo.insert(test_mapping()).await.unwrap();

        let mut other = test_mapping();
        other.member_id = OrganizationMemberId::new(43);
        other.organization_id = OrganizationId::new(8);
        repo.insert(other).await.unwrap();

        let mappings = repo
            .list_for_organization(OrganizationId::new(7))
            .await
            .unwrap();
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].member_id, OrganizationMemberId::new(42));
    }

    #[tokio::test]
    async fn should_persist_cleared_fields_on_update() {
        let repo = setup().await;
        let mut mapping = test_mapping();
        repo.insert(mapping.clone()).await.unwrap();

        mapping.user_id = Some(UserId::new(9));
        mapping.email = None;
        mapping.invite_status = None;
        repo.update(mapping.clone()).await.unwrap();

        let fetched = repo
            .get(mapping.member_id, mapping.organization_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.user_id, Some(UserId::new(9)));
        assert_eq!(fetched.email, None);
        assert_eq!(fetched.invite_status, None);
    }

    #[tokio::test]
    async fn should_fail_update_of_absent_row_with_not_found() {
        let repo = setup().await;
        let result = repo.update(test_mapping()).await;
        assert!(matches!(result, Err(OrgsyncError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_delete_and_tolerate_repeat_delete() {
        let repo = setup().await;
        let mapping = test_mapping();
        repo.insert(mapping.clone()).await.unwrap();

        repo.delete(mapping.member_id, mapping.organization_id)
            .await
            .unwrap();
        assert!(
            repo.get(mapping.member_id, mapping.organization_id)
                .await
                .unwrap()
                .is_none()
        );

        // second delete is a no-op, not an error
        repo.delete(mapping.member_id, mapping.organization_id)
            .await
            .unwrap();
    }
}
