//! `SQLite` implementation of [`AccessGroupRepository`].

use std::future::Future;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use orgsync_app::ports::AccessGroupRepository;
use orgsync_domain::access_group::{AccessGroup, NewAccessGroup};
use orgsync_domain::error::{AlreadyExistsError, OrgsyncError};
use orgsync_domain::id::{AccessGroupId, TeamId};
use orgsync_domain::time::now;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`AccessGroup`].
struct Wrapper(AccessGroup);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let team_id: i64 = row.try_get("team_id")?;
        let name: String = row.try_get("name")?;
        let date_added: DateTime<Utc> = row.try_get("date_added")?;

        Ok(Self(AccessGroup {
            id: AccessGroupId::new(id),
            team_id: TeamId::new(team_id),
            name,
            date_added,
        }))
    }
}

const INSERT: &str =
    "INSERT INTO access_groups (team_id, name, date_added) VALUES (?, ?, ?) RETURNING *";
const SELECT_BY_TEAM: &str = "SELECT * FROM access_groups WHERE team_id = ? ORDER BY name";

/// `SQLite`-backed access-group repository.
pub struct SqliteAccessGroupRepository {
    pool: SqlitePool,
}

impl SqliteAccessGroupRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl AccessGroupRepository for SqliteAccessGroupRepository {
    fn create(
        &self,
        new: NewAccessGroup,
    ) -> impl Future<Output = Result<AccessGroup, OrgsyncError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Wrapper = sqlx::query_as(INSERT)
                .bind(new.team_id.as_i64())
                .bind(&new.name)
                .bind(now())
                .fetch_one(&pool)
                .await
                .map_err(|err| match &err {
                    sqlx::Error::Database(db) if db.is_unique_violation() => {
                        OrgsyncError::from(AlreadyExistsError {
                            entity: "AccessGroup",
                            key: format!("{}/{}", new.team_id, new.name),
                        })
                    }
                    _ => StorageError::from(err).into(),
                })?;

            Ok(row.0)
        }
    }

    fn list_by_team(
        &self,
        team_id: TeamId,
    ) -> impl Future<Output = Result<Vec<AccessGroup>, OrgsyncError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_TEAM)
                .bind(team_id.as_i64())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }
}
