//! `SQLite` implementation of [`OrganizationRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use orgsync_app::ports::OrganizationRepository;
use orgsync_domain::error::{AlreadyExistsError, OrgsyncError};
use orgsync_domain::id::OrganizationId;
use orgsync_domain::organization::{NewOrganization, Organization};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Organization`].
struct Wrapper(Organization);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Organization> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let slug: String = row.try_get("slug")?;
        let name: String = row.try_get("name")?;

        Ok(Self(Organization {
            id: OrganizationId::new(id),
            slug,
            name,
        }))
    }
}

const INSERT: &str = "INSERT INTO organizations (slug, name) VALUES (?, ?) RETURNING *";
const SELECT_BY_SLUG: &str = "SELECT * FROM organizations WHERE slug = ?";

/// `SQLite`-backed organization repository.
pub struct SqliteOrganizationRepository {
    pool: SqlitePool,
}

impl SqliteOrganizationRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl OrganizationRepository for SqliteOrganizationRepository {
    fn create(
        &self,
        new: NewOrganization,
    ) -> impl Future<Output = Result<Organization, OrgsyncError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Wrapper = sqlx::query_as(INSERT)
                .bind(&new.slug)
                .bind(&new.name)
                .fetch_one(&pool)
                .await
                .map_err(|err| match &err {
                    sqlx::Error::Database(db) if db.is_unique_violation() => {
                        OrgsyncError::from(AlreadyExistsError {
                            entity: "Organization",
                            key: new.slug.clone(),
                        })
                    }
                    _ => StorageError::from(err).into(),
                })?;

            Ok(row.0)
        }
    }

    fn find_by_slug(
        &self,
        slug: &str,
    ) -> impl Future<Output = Result<Option<Organization>, OrgsyncError>> + Send {
        let pool = self.pool.clone();
        let slug = slug.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_SLUG)
                .bind(&slug)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }
}
