//! Tri-state field wrapper for partial-update payloads.
//!
//! A plain `Option<T>` cannot distinguish "field not provided" from "field
//! explicitly cleared", so update payloads wrap each field in [`Patch<T>`]:
//! a field absent from the payload means "do not touch", a field present
//! with `null` means "clear the stored value".
//!
//! Container structs must mark every `Patch` field with
//! `#[serde(default, skip_serializing_if = "Patch::is_keep")]` so the
//! absent/null distinction survives JSON serialization in both directions.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// One field of a partial update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch<T> {
    /// Leave the stored value unchanged.
    Keep,
    /// Overwrite the stored value, `Set(None)` clearing it.
    Set(Option<T>),
}

impl<T> Patch<T> {
    /// Overwrite with a value.
    pub fn value(value: T) -> Self {
        Self::Set(Some(value))
    }

    /// Clear the stored value.
    #[must_use]
    pub const fn clear() -> Self {
        Self::Set(None)
    }

    /// Whether this field should be left unchanged.
    #[must_use]
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    /// Apply this patch to an optional slot.
    pub fn apply_to(self, slot: &mut Option<T>) {
        if let Self::Set(value) = self {
            *slot = value;
        }
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Keep
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Only reachable when the container forgot `skip_serializing_if`;
            // `Keep` then degrades to an explicit null.
            Self::Keep => serializer.serialize_none(),
            Self::Set(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // A present key always overwrites; absence is handled by
        // `#[serde(default)]` on the container field.
        Option::<T>::deserialize(deserializer).map(Self::Set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Payload {
        #[serde(default, skip_serializing_if = "Patch::is_keep")]
        nickname: Patch<String>,
    }

    #[test]
    fn should_deserialize_missing_field_as_keep() {
        let payload: Payload = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.nickname, Patch::Keep);
    }

    #[test]
    fn should_deserialize_null_as_clear() {
        let payload: Payload = serde_json::from_str(r#"{"nickname":null}"#).unwrap();
        assert_eq!(payload.nickname, Patch::clear());
    }

    #[test]
    fn should_deserialize_value_as_overwrite() {
        let payload: Payload = serde_json::from_str(r#"{"nickname":"ada"}"#).unwrap();
        assert_eq!(payload.nickname, Patch::value("ada".to_string()));
    }

    #[test]
    fn should_skip_keep_when_serializing() {
        let json = serde_json::to_string(&Payload::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn should_preserve_null_when_serializing_clear() {
        let payload = Payload {
            nickname: Patch::clear(),
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, r#"{"nickname":null}"#);
    }

    #[test]
    fn should_overwrite_slot_when_applying_value() {
        let mut slot = Some("old".to_string());
        Patch::value("new".to_string()).apply_to(&mut slot);
        assert_eq!(slot.as_deref(), Some("new"));
    }

    #[test]
    fn should_clear_slot_when_applying_null() {
        let mut slot = Some("old".to_string());
        Patch::clear().apply_to(&mut slot);
        assert_eq!(slot, None);
    }

    #[test]
    fn should_leave_slot_untouched_when_applying_keep() {
        let mut slot = Some("old".to_string());
        Patch::Keep.apply_to(&mut slot);
        assert_eq!(slot.as_deref(), Some("old"));
    }
}
