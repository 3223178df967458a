//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`HubError`]
//! via `#[from]` (or an explicit `into_domain`) at port boundaries.

/// Top-level error carried across port boundaries.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The requested item does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// An integration failed while talking to its device or rejected a call.
    #[error("integration error")]
    Integration(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A human readable name was empty.
    #[error("name must not be empty")]
    EmptyName,

    /// An entity id string was empty.
    #[error("entity_id must not be empty")]
    EmptyEntityId,

    /// An entity id string did not follow the `domain.object_id` form.
    #[error("entity_id {0:?} must be of the form domain.object_id")]
    InvalidEntityId(String),
}

/// Lookup failure for a typed item.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of item looked up (e.g. `"Entity"`).
    pub entity: &'static str,
    /// Identifier that was looked up.
    pub id: String,
}
