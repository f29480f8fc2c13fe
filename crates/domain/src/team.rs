//! Team — a group of members inside an organization, addressed by slug.

use serde::{Deserialize, Serialize};

use crate::error::{OrgsyncError, ValidationError};
use crate::id::{OrganizationId, TeamId};

/// A team inside an organization. Slugs are unique per organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub organization_id: OrganizationId,
    pub slug: String,
    pub name: String,
}

/// Payload for creating a team; the id is storage-assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTeam {
    pub organization_id: OrganizationId,
    pub slug: String,
    pub name: String,
}

impl NewTeam {
    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`OrgsyncError::Validation`] when `slug` or `name` is empty.
    pub fn validate(&self) -> Result<(), OrgsyncError> {
        if self.slug.is_empty() {
            return Err(ValidationError::EmptySlug.into());
        }
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}
