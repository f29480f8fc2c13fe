//! Organization — a customer account, addressed by slug in URLs.

use serde::{Deserialize, Serialize};

use crate::error::{OrgsyncError, ValidationError};
use crate::id::OrganizationId;

/// A customer organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub slug: String,
    pub name: String,
}

/// Payload for creating an organization; the id is storage-assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrganization {
    pub slug: String,
    pub name: String,
}

impl NewOrganization {
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
