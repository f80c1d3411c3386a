//! Runtime execution types: session identifiers and step counters.
//!
//! These are infrastructure types for tracking *execution*, distinct from the
//! workflow-domain types in [`crate::types`] (`NodeKind`, `ChannelType`).
//!
//! # Examples
//!
//! ```rust
//! use weavegraph::runtimes::types::{SessionId, StepNumber};
//!
//! let session = SessionId::generate();
//! println!("starting session {session}");
//!
//! let mut step = StepNumber::zero();
//! assert!(step.is_initial());
//! step = step.next();
//! assert_eq!(step.value(), 1);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier for a workflow execution session.
///
/// Wraps a `String` rather than exposing one directly so session identifiers
/// can't be confused with other string-typed parameters at the type level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap an existing identifier (e.g. one supplied by a caller or loaded
    /// from a checkpoint).
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh, random session identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a plain string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Monotonic superstep counter for a workflow session.
///
/// Saturates at `u64::MAX` instead of wrapping so a pathologically long-running
/// session can't overflow back around to a step number it has already used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StepNumber(u64);

impl StepNumber {
    /// Wrap a raw step count.
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// The step number before any superstep has run.
    #[must_use]
    pub fn zero() -> Self {
        Self(0)
    }

    /// The underlying step count.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Whether this is the initial (pre-execution) step.
    #[must_use]
    pub fn is_initial(&self) -> bool {
        self.0 == 0
    }

    /// The next step number, saturating at `u64::MAX`.
    #[must_use]
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for StepNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for StepNumber {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_roundtrips_as_str() {
        let id = SessionId::new("abc");
        assert_eq!(id.as_str(), "abc");
        assert_eq!(id.to_string(), "abc");
    }

    #[test]
    fn session_id_generate_is_unique() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn step_number_next_saturates() {
        let max = StepNumber::new(u64::MAX);
        assert_eq!(max.next().value(), u64::MAX);
    }

    #[test]
    fn step_number_zero_is_initial() {
        assert!(StepNumber::zero().is_initial());
        assert!(!StepNumber::zero().next().is_initial());
    }
}
