//! Member mapping — a denormalized, read-optimized projection of an
//! organization membership, kept in the control silo so membership queries
//! never cross the silo boundary.

use serde::{Deserialize, Serialize};

use crate::error::{OrgsyncError, ValidationError};
use crate::id::{OrganizationId, OrganizationMemberId, UserId};
use crate::patch::Patch;
use crate::time::Timestamp;

/// Invitation state of a membership. Stored and transmitted as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum InviteStatus {
    /// The membership is active.
    Approved,
    /// An organization manager asked for this person to be invited.
    RequestedToBeInvited,
    /// The person asked to join the organization.
    RequestedToJoin,
}

impl From<InviteStatus> for i32 {
    fn from(status: InviteStatus) -> Self {
        match status {
            InviteStatus::Approved => 0,
            InviteStatus::RequestedToBeInvited => 1,
            InviteStatus::RequestedToJoin => 2,
        }
    }
}

/// Error returned when decoding an out-of-range invite status.
#[derive(Debug, thiserror::Error)]
#[error("invalid invite status: {0}")]
pub struct InvalidInviteStatus(pub i32);

impl TryFrom<i32> for InviteStatus {
    type Error = InvalidInviteStatus;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::Approved),
            1 => Ok(Self::RequestedToBeInvited),
            2 => Ok(Self::RequestedToJoin),
            other => Err(InvalidInviteStatus(other)),
        }
    }
}

/// Projection row keyed by `(member_id, organization_id)`.
///
/// The pair is unique and stable for the life of the underlying membership;
/// every other field is a denormalized copy of the authoritative record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberMapping {
    pub member_id: OrganizationMemberId,
    pub organization_id: OrganizationId,
    pub date_added: Timestamp,
    pub role: String,
    pub user_id: Option<UserId>,
    pub email: Option<String>,
    pub inviter_id: Option<UserId>,
    pub invite_status: Option<InviteStatus>,
}

impl MemberMapping {
    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`OrgsyncError::Validation`] when `role` is empty or when
    /// neither `user_id` nor `email` is present.
    pub fn validate(&self) -> Result<(), OrgsyncError> {
        if self.role.is_empty() {
            return Err(ValidationError::EmptyRole.into());
        }
        if self.user_id.is_none() && self.email.is_none() {
            return Err(ValidationError::MissingUserAndEmail.into());
        }
        Ok(())
    }

    /// Render the identifying pair for error reporting.
    #[must_use]
    pub fn render_key(member_id: OrganizationMemberId, organization_id: OrganizationId) -> String {
        format!("{member_id}/{organization_id}")
    }
}

/// Payload for creating a mapping. `date_added` is stamped by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMemberMapping {
    pub member_id: OrganizationMemberId,
    pub organization_id: OrganizationId,
    pub role: String,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub inviter_id: Option<UserId>,
    #[serde(default)]
    pub invite_status: Option<InviteStatus>,
}

impl NewMemberMapping {
    /// Build the full projection row with the given creation time.
    #[must_use]
    pub fn into_mapping(self, date_added: Timestamp) -> MemberMapping {
        MemberMapping {
            member_id: self.member_id,
            organization_id: self.organization_id,
            date_added,
            role: self.role,
            user_id: self.user_id,
            email: self.email,
            inviter_id: self.inviter_id,
            invite_status: self.invite_status,
        }
    }
}

/// Partial update for a mapping.
///
/// Every field is tri-state: a key absent from the payload leaves the stored
/// value untouched, a key present with `null` clears it, a key present with
/// a value overwrites it. See [`Patch`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberMappingUpdate {
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub role: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub user_id: Patch<UserId>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub email: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub inviter_id: Patch<UserId>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub invite_status: Patch<InviteStatus>,
}

impl MemberMappingUpdate {
    /// Apply this update to a mapping in place, then re-check invariants.
    ///
    /// # Errors
    ///
    /// Returns [`OrgsyncError::Validation`] when `role` is explicitly
    /// cleared (it is not nullable) or when the updated record violates an
    /// invariant.
    pub fn apply_to(self, mapping: &mut MemberMapping) -> Result<(), OrgsyncError> {
        match self.role {
            Patch::Keep => {}
            Patch::Set(Some(role)) => mapping.role = role,
            Patch::Set(None) => return Err(ValidationError::EmptyRole.into()),
        }
        self.user_id.apply_to(&mut mapping.user_id);
        self.email.apply_to(&mut mapping.email);
        self.inviter_id.apply_to(&mut mapping.inviter_id);
        self.invite_status.apply_to(&mut mapping.invite_status);
        mapping.validate()
    }
}
