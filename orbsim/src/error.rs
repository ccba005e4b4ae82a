//! Error type shared by the simulation core.
//!
//! Construction-time problems (bad mass or radius, duplicate keys, malformed
//! scenario files) surface here immediately. Degenerate pairs inside the force
//! and energy sums are not errors; those are skipped in place.

use thiserror::Error;

pub type Result<T, E = SimError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A body failed validation before entering a collection
    #[error("invalid body `{key}`: {field} must be positive and finite, got {value}")]
    InvalidBody {
        key: String,
        field: &'static str,
        value: f64,
    },

    /// Acceleration requested for a body whose mass is not positive
    #[error("cannot compute acceleration of `{key}` with mass {mass}")]
    DegenerateAcceleration { key: String, mass: f64 },

    #[error("a body with key `{0}` is already present")]
    DuplicateKey(String),

    #[error("no body with key `{0}`")]
    UnknownBody(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
