//! Error types for the auth kernel.

use thiserror::Error;

/// Errors from the identity directory and affiliation collaborators.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The subject no longer exists (deleted between credential issuance
    /// and use).
    #[error("subject not found: {0}")]
    NotFound(i64),

    /// The backing store is unreachable or misbehaving.
    #[error("directory unavailable: {0}")]
    Unavailable(String),

    /// An unexpected error occurred.
    #[error("internal directory error: {0}")]
    Internal(String),
}

/// Terminal failures of the authorization pipeline.
///
/// Each variant maps to a distinct client-visible outcome; the mapping to
/// HTTP statuses is owned by the transport layer, not by this type:
///
/// | Variant | Class |
/// |---------|-------|
/// | `MissingCredential`, `InvalidCredential`, `ExpiredCredential` | unauthenticated |
/// | `IdentityNotFound` | unauthenticated (identity problem) |
/// | `InsufficientRole`, `NoAccessibleEntities` | forbidden (authorization problem) |
/// | `ResolutionFailure` | internal (broken data dependency, not lack of access) |
///
/// Every failure is terminal and local to its pipeline stage; no partial
/// request context is ever handed downstream.
#[derive(Debug, Error)]
pub enum AuthKernelError {
    /// No bearer credential was presented, or the carrier header was
    /// malformed.
    #[error("missing credential")]
    MissingCredential,

    /// The credential was malformed or its signature did not verify.
    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    /// The credential's expiry timestamp has passed.
    #[error("expired credential")]
    ExpiredCredential,

    /// The credential verified but its subject no longer exists.
    #[error("identity not found: {0}")]
    IdentityNotFound(i64),

    /// The identity holds none of the route's allow-listed roles.
    #[error("insufficient role")]
    InsufficientRole,

    /// Role membership held, but the identity is affiliated with no
    /// concrete entity for any configured relation.
    #[error("no accessible entities")]
    NoAccessibleEntities,

    /// A downstream lookup failed during entity resolution. Distinguishable
    /// from "no access": it indicates the resolver's own data dependency
    /// is broken.
    #[error("resolution failure: {0}")]
    ResolutionFailure(String),
}

impl AuthKernelError {
    /// True for failures establishing *who* the caller is.
    #[must_use]
    pub fn is_authentication(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential
                | Self::InvalidCredential(_)
                | Self::ExpiredCredential
                | Self::IdentityNotFound(_)
        )
    }

    /// True for failures establishing *what* the caller may touch.
    #[must_use]
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::InsufficientRole | Self::NoAccessibleEntities)
    }
}

impl From<DirectoryError> for AuthKernelError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound(subject_id) => Self::IdentityNotFound(subject_id),
            DirectoryError::Unavailable(msg) | DirectoryError::Internal(msg) => {
                Self::ResolutionFailure(msg)
            }
        }
    }
}
