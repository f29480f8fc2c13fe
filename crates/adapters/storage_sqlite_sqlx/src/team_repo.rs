//! `SQLite` implementation of [`TeamRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use orgsync_app::ports::TeamRepository;
use orgsync_domain::error::{AlreadyExistsError, OrgsyncError};
use orgsync_domain::id::{OrganizationId, TeamId};
use orgsync_domain::team::{NewTeam, Team};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Team`].
struct Wrapper(Team);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Team> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let organization_id: i64 = row.try_get("organization_id")?;
        let slug: String = row.try_get("slug")?;
        let name: String = row.try_get("name")?;

        Ok(Self(Team {
            id: TeamId::new(id),
            organization_id: OrganizationId::new(organization_id),
            slug,
            name,
        }))
    }
}

const INSERT: &str = "INSERT INTO teams (organization_id, slug, name) VALUES (?, ?, ?) RETURNING *";
const SELECT_BY_SLUGS: &str = "SELECT teams.* FROM teams \
    JOIN organizations ON organizations.id = teams.organization_id \
    WHERE organizations.slug = ? AND teams.slug = ?";

/// `SQLite`-backed team repository.
pub struct SqliteTeamRepository {
    pool: SqlitePool,
}

impl SqliteTeamRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl TeamRepository for SqliteTeamRepository {
    fn create(&self, new: NewTeam) -> impl Future<Output = Result<Team, OrgsyncError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Wrapper = sqlx::query_as(INSERT)
                .bind(new.organization_id.as_i64())
                .bind(&new.slug)
                .bind(&new.name)
                .fetch_one(&pool)
                .await
                .map_err(|err| match &err {
                    sqlx::Error::Database(db) if db.is_unique_violation() => {
                        OrgsyncError::from(AlreadyExistsError {
                            entity: "Team",
                            key: format!("{}/{}", new.organization_id, new.slug),
                        })
                    }
                    _ => StorageError::from(err).into(),
                })?;

            Ok(row.0)
        }
    }

    fn find_by_slugs(
        &self,
        organization_slug: &str,
        team_slug: &str,
    ) -> impl Future<Output = Result<Option<Team>, OrgsyncError>> + Send {
        let pool = self.pool.clone();
        let organization_slug = organization_slug.to_string();
        let team_slug = team_slug.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_SLUGS)
                .bind(&organization_slug)
                .bind(&team_slug)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }
}
