//! Common error types used across the workspace.
//!
//! Each layer defines its own typed error (`StorageError`, `RpcError`, …)
//! and converts into [`OrgsyncError`] via `#[from]` or an explicit boxed
//! source. No `String` variants.

/// Boxed error from an adapter layer, kept as a `source` for reporting.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error returned by application services and ports.
#[derive(Debug, thiserror::Error)]
pub enum OrgsyncError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The addressed record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// A record with the same identifying key already exists.
    #[error("already exists")]
    AlreadyExists(#[from] AlreadyExistsError),

    /// The storage layer failed.
    #[error("storage error")]
    Storage(#[source] BoxError),

    /// A remote procedure call failed in transit.
    #[error("rpc transport error")]
    Rpc(#[source] BoxError),
}

/// Domain invariant violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// `role` was empty or explicitly cleared.
    #[error("role must not be empty")]
    EmptyRole,

    /// Neither a user id nor an email was present on a membership.
    #[error("membership must carry a user id or an email")]
    MissingUserAndEmail,

    /// A slug field was empty.
    #[error("slug must not be empty")]
    EmptySlug,

    /// A name field was empty.
    #[error("name must not be empty")]
    EmptyName,
}

/// A lookup, update, or strict delete addressed a record that does not exist.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {key} not found")]
pub struct NotFoundError {
    /// Human-readable entity name, e.g. `"MemberMapping"`.
    pub entity: &'static str,
    /// Rendered identifying key.
    pub key: String,
}

/// A create addressed an identifying key that is already taken.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {key} already exists")]
pub struct AlreadyExistsError {
    /// Human-readable entity name.
    pub entity: &'static str,
    /// Rendered identifying key.
    pub key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_not_found_with_entity_and_key() {
        let err = NotFoundError {
            entity: "MemberMapping",
            key: "42/7".to_string(),
        };
        assert_eq!(err.to_string(), "MemberMapping 42/7 not found");
    }

    #[test]
    fn should_convert_validation_error_into_top_level_variant() {
        let err: OrgsyncError = ValidationError::EmptyRole.into();
        assert!(matches!(
            err,
            OrgsyncError::Validation(ValidationError::EmptyRole)
        ));
    }

    #[test]
    fn should_convert_already_exists_into_top_level_variant() {
        let err: OrgsyncError = AlreadyExistsError {
            entity: "Organization",
            key: "acme".to_string(),
        }
        .into();
        assert!(matches!(err, OrgsyncError::AlreadyExists(_)));
    }
}
