//! Access-group service — team-scoped queries for access groups.

use orgsync_domain::access_group::AccessGroup;
use orgsync_domain::error::{NotFoundError, OrgsyncError};

use crate::ports::{AccessGroupRepository, TeamRepository};

/// Application service answering the team access-group index.
pub struct AccessGroupService<TR, GR> {
    teams: TR,
    groups: GR,
}

impl<TR, GR> AccessGroupService<TR, GR>
where
    TR: TeamRepository,
    GR: AccessGroupRepository,
{
    /// Create a new service from its ports.
    pub fn new(teams: TR, groups: GR) -> Self {
        Self { teams, groups }
    }

    /// List the access groups of the team addressed by the two slugs,
    /// ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`OrgsyncError::NotFound`] when the team does not exist, or a
    /// storage error from the repositories.
    pub async fn list_for_team(
        &self,
        organization_slug: &str,
        team_slug: &str,
    ) -> Result<Vec<AccessGroup>, OrgsyncError> {
        let Some(team) = self.teams.find_by_slugs(organization_slug, team_slug).await? else {
            return Err(NotFoundError {
                entity: "Team",
                key: format!("{organization_slug}/{team_slug}"),
            }
            .into());
        };
        self.groups.list_by_team(team.id).await
    }
}
