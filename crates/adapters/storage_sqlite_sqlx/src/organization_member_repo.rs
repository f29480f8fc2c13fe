//! `SQLite` implementation of [`OrganizationMemberRepository`].

use std::future::Future;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use orgsync_app::ports::OrganizationMemberRepository;
use orgsync_domain::error::{NotFoundError, OrgsyncError};
use orgsync_domain::id::{OrganizationId, OrganizationMemberId, UserId};
use orgsync_domain::member_mapping::InviteStatus;
use orgsync_domain::organization_member::{NewOrganizationMember, OrganizationMember};
use orgsync_domain::time::Timestamp;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`OrganizationMember`].
struct Wrapper(OrganizationMember);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<OrganizationMember> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let organization_id: i64 = row.try_get("organization_id")?;
        let role: String = row.try_get("role")?;
        let user_id: Option<i64> = row.try_get("user_id")?;
        let email: Option<String> = row.try_get("email")?;
        let inviter_id: Option<i64> = row.try_get("inviter_id")?;
        let invite_status: Option<i32> = row.try_get("invite_status")?;
        let date_added: DateTime<Utc> = row.try_get("date_added")?;

        let invite_status = invite_status
            .map(InviteStatus::try_from)
            .transpose()
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(OrganizationMember {
            id: OrganizationMemberId::new(id),
            organization_id: OrganizationId::new(organization_id),
            role,
            user_id: user_id.map(UserId::new),
            email,
            inviter_id: inviter_id.map(UserId::new),
            invite_status,
            date_added,
        }))
    }
}

const INSERT: &str = "INSERT INTO organization_members \
    (organization_id, role, user_id, email, inviter_id, invite_status, date_added) \
    VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *";
const SELECT_BY_ID: &str =
    "SELECT * FROM organization_members WHERE id = ? AND organization_id = ?";
const UPDATE: &str = "UPDATE organization_members \
    SET role = ?, user_id = ?, email = ?, inviter_id = ?, invite_status = ? \
    WHERE id = ? AND organization_id = ?";
const DELETE_BY_ID: &str = "DELETE FROM organization_members WHERE id = ? AND organization_id = ?";

fn member_key(member_id: OrganizationMemberId, organization_id: OrganizationId) -> String {
    format!("{member_id}/{organization_id}")
}

/// `SQLite`-backed repository for the authoritative membership records.
pub struct SqliteOrganizationMemberRepository {
    pool: SqlitePool,
}

impl SqliteOrganizationMemberRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl OrganizationMemberRepository for SqliteOrganizationMemberRepository {
    fn create(
        &self,
        organization_id: OrganizationId,
        new: NewOrganizationMember,
        date_added: Timestamp,
    ) -> impl Future<Output = Result<OrganizationMember, OrgsyncError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Wrapper = sqlx::query_as(INSERT)
                .bind(organization_id.as_i64())
                .bind(&new.role)
                .bind(new.user_id.map(UserId::as_i64))
                .bind(&new.email)
                .bind(new.inviter_id.map(UserId::as_i64))
                .bind(new.invite_status.map(i32::from))
                .bind(date_added)
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.0)
        }
    }

    fn get(
        &self,
        organization_id: OrganizationId,
        member_id: OrganizationMemberId,
    ) -> impl Future<Output = Result<Option<OrganizationMember>, OrgsyncError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(member_id.as_i64())
                .bind(organization_id.as_i64())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn update(
        &self,
        member: OrganizationMember,
    ) -> impl Future<Output = Result<OrganizationMember, OrgsyncError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(&member.role)
                .bind(member.user_id.map(UserId::as_i64))
                .bind(&member.email)
                .bind(member.inviter_id.map(UserId::as_i64))
                .bind(member.invite_status.map(i32::from))
                .bind(member.id.as_i64())
                .bind(member.organization_id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(NotFoundError {
                    entity: "OrganizationMember",
                    key: member_key(member.id, member.organization_id),
                }
                .into());
            }

            Ok(member)
        }
    }

    fn delete(
        &self,
        organization_id: OrganizationId,
        member_id: OrganizationMemberId,
    ) -> impl Future<Output = Result<(), OrgsyncError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(member_id.as_i64())
                .bind(organization_id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            // authoritative records are deleted at most once
            if result.rows_affected() == 0 {
                return Err(NotFoundError {
                    entity: "OrganizationMember",
                    key: member_key(member_id, organization_id),
                }
                .into());
            }

            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use orgsync_domain::time::now;

    async fn setup() -> SqliteOrganizationMemberRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteOrganizationMemberRepository::new(db.pool().clone())
    }

    fn invite() -> NewOrganizationMember {
        NewOrganizationMember {
            role: "member".to_string(),
            user_id: None,
            email: Some("ada@example.com".to_string()),
            inviter_id: Some(UserId::new(3)),
            invite_status: Some(InviteStatus::RequestedToBeInvited),
        }
    }

    #[tokio::test]
    async fn should_assign_id_and_roundtrip_fields() {
        let repo = setup().await;
        let org = OrganizationId::new(7);

        let created = repo.create(org, invite(), now()).await.unwrap();
        assert!(created.id.as_i64() > 0);

        let fetched = repo.get(org, created.id).await.unwrap().unwrap();
        assert_eq!(fetched.email.as_deref(), Some("ada@example.com"));
        assert_eq!(fetched.inviter_id, Some(UserId::new(3)));
        assert_eq!(fetched.date_added, created.date_added);
    }

    #[tokio::test]
    async fn should_scope_get_to_the_organization() {
        let repo = setup().await;
        let created = repo
            .create(OrganizationId::new(7), invite(), now())
            .await
            .unwrap();

        let other_org = repo.get(OrganizationId::new(8), created.id).await.unwrap();
        assert!(other_org.is_none());
    }

    #[tokio::test]
    async fn should_persist_update() {
        let repo = setup().await;
        let org = OrganizationId::new(7);
        let mut member = repo.create(org, invite(), now()).await.unwrap();

        member.user_id = Some(UserId::new(9));
        member.email = None;
        member.invite_status = Some(InviteStatus::Approved);
        repo.update(member.clone()).await.unwrap();

        let fetched = repo.get(org, member.id).await.unwrap().unwrap();
        assert_eq!(fetched.user_id, Some(UserId::new(9)));
        assert_eq!(fetched.email, None);
        assert_eq!(fetched.invite_status, Some(InviteStatus::Approved));
    }

    #[tokio::test]
    async fn should_fail_delete_of_absent_member_with_not_found() {
        let repo = setup().await;
        let result = repo
            .delete(OrganizationId::new(7), OrganizationMemberId::new(999))
            .await;
        assert!(matches!(result, Err(OrgsyncError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_delete_existing_member() {
        let repo = setup().await;
        let org = OrganizationId::new(7);
        let member = repo.create(org, invite(), now()).await.unwrap();

        repo.delete(org, member.id).await.unwrap();

        assert!(repo.get(org, member.id).await.unwrap().is_none());
    }
}
