//! Organization member — the authoritative membership record, owned by the
//! region silo. The control-silo mapping is a projection of this record.

use serde::{Deserialize, Serialize};

use crate::error::{OrgsyncError, ValidationError};
use crate::id::{OrganizationId, OrganizationMemberId, UserId};
use crate::member_mapping::{InviteStatus, MemberMapping, MemberMappingUpdate};
use crate::patch::Patch;
use crate::time::Timestamp;

/// A person's membership in an organization.
///
/// A pending invite carries an `email` and no `user_id`; once accepted the
/// membership carries the `user_id` instead (the email may be cleared).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationMember {
    pub id: OrganizationMemberId,
    pub organization_id: OrganizationId,
    pub role: String,
    pub user_id: Option<UserId>,
    pub email: Option<String>,
    pub inviter_id: Option<UserId>,
    pub invite_status: Option<InviteStatus>,
    pub date_added: Timestamp,
}

impl OrganizationMember {
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

    /// Project every attribute into a new mapping row, `date_added` included.
    #[must_use]
    pub fn to_mapping(&self) -> MemberMapping {
        MemberMapping {
            member_id: self.id,
            organization_id: self.organization_id,
            date_added: self.date_added,
            role: self.role.clone(),
            user_id: self.user_id,
            email: self.email.clone(),
            inviter_id: self.inviter_id,
            invite_status: self.invite_status,
        }
    }

    /// Full-state update payload: every field present, mirroring this record.
    #[must_use]
    pub fn to_mapping_update(&self) -> MemberMappingUpdate {
        MemberMappingUpdate {
            role: Patch::value(self.role.clone()),
            user_id: Patch::Set(self.user_id),
            email: Patch::Set(self.email.clone()),
            inviter_id: Patch::Set(self.inviter_id),
            invite_status: Patch::Set(self.invite_status),
        }
    }

    /// Apply a partial update to the authoritative record, then re-check
    /// invariants. Same tri-state semantics as the mapping side.
    ///
    /// # Errors
    ///
    /// Returns [`OrgsyncError::Validation`] when `role` is explicitly
    /// cleared or when the updated record violates an invariant.
    pub fn apply_update(&mut self, update: MemberMappingUpdate) -> Result<(), OrgsyncError> {
        match update.role {
            Patch::Keep => {}
            Patch::Set(Some(role)) => self.role = role,
            Patch::Set(None) => return Err(ValidationError::EmptyRole.into()),
        }
        update.user_id.apply_to(&mut self.user_id);
        update.email.apply_to(&mut self.email);
        update.inviter_id.apply_to(&mut self.inviter_id);
        update.invite_status.apply_to(&mut self.invite_status);
        self.validate()
    }
}

/// Payload for creating a membership; the organization is resolved and the
/// id and `date_added` assigned by the service/storage layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrganizationMember {
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

impl NewOrganizationMember {
    /// Check invariants before the record is persisted.
    ///
    /// # Errors
    ///
    /// Same rules as [`OrganizationMember::validate`].
    pub fn validate(&self) -> Result<(), OrgsyncError> {
        if self.role.is_empty() {
            return Err(ValidationError::EmptyRole.into());
        }
        if self.user_id.is_none() && self.email.is_none() {
            return Err(ValidationError::MissingUserAndEmail.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::now;

    fn member() -> OrganizationMember {
        OrganizationMember {
            id: OrganizationMemberId::new(42),
            organization_id: OrganizationId::new(7),
            role: "member".to_string(),
            user_id: None,
            email: Some("ada@example.com".to_string()),
            inviter_id: Some(UserId::new(3)),
            invite_status: Some(InviteStatus::RequestedToBeInvited),
            date_added: now(),
        }
    }

    #[test]
    fn should_project_every_field_into_mapping() {
        let m = member();
        let mapping = m.to_mapping();
        assert_eq!(mapping.member_id, m.id);
        assert_eq!(mapping.organization_id, m.organization_id);
        assert_eq!(mapping.date_added, m.date_added);
        assert_eq!(mapping.role, m.role);
        assert_eq!(mapping.email, m.email);
        assert_eq!(mapping.inviter_id, m.inviter_id);
        assert_eq!(mapping.invite_status, m.invite_status);
    }

    #[test]
    fn should_mark_every_field_present_in_full_state_update() {
        let update = member().to_mapping_update();
        assert!(!update.role.is_keep());
        assert!(!update.user_id.is_keep());
        assert!(!update.email.is_keep());
        assert!(!update.inviter_id.is_keep());
        assert!(!update.invite_status.is_keep());
        // absent attributes become explicit nulls, not omissions
        assert_eq!(update.user_id, Patch::Set(None));
    }

    #[test]
    fn should_accept_invite_acceptance_update() {
        let mut m = member();
        let update = MemberMappingUpdate {
            user_id: Patch::value(UserId::new(9)),
            email: Patch::clear(),
            invite_status: Patch::value(InviteStatus::Approved),
            ..MemberMappingUpdate::default()
        };
        m.apply_update(update).unwrap();
        assert_eq!(m.user_id, Some(UserId::new(9)));
        assert_eq!(m.email, None);
        assert_eq!(m.invite_status, Some(InviteStatus::Approved));
    }

    #[test]
    fn should_reject_new_member_without_contact() {
        let new = NewOrganizationMember {
            role: "member".to_string(),
            user_id: None,
            email: None,
            inviter_id: None,
            invite_status: None,
        };
        assert!(matches!(
            new.validate(),
            Err(OrgsyncError::Validation(
                ValidationError::MissingUserAndEmail
            ))
        ));
    }
}
