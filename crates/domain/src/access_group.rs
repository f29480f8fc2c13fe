//! Access group — a named grant bucket scoped to a team.

use serde::{Deserialize, Serialize};

use crate::error::{OrgsyncError, ValidationError};
use crate::id::{AccessGroupId, TeamId};
use crate::time::Timestamp;

/// A team-scoped access group. Names are unique per team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessGroup {
    pub id: AccessGroupId,
    pub team_id: TeamId,
    pub name: String,
    pub date_added: Timestamp,
}

/// Payload for creating an access group; id and `date_added` are assigned
/// by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccessGroup {
    pub team_id: TeamId,
    pub name: String,
}

impl NewAccessGroup {
    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`OrgsyncError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), OrgsyncError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}
