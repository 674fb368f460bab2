//! Error types for the countkit library.
//!
//! ## Key Components
//!
//! - [`CopyCountError`]: Returned when an operation is asked to insert or
//!   remove fewer than one copy of a key, or when adding copies would
//!   overflow a count ([`CopyCountErrorKind`] tells the two apart).
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (e.g. a hash table capacity below [`MIN_CAPACITY`](crate::ds::chained_table::MIN_CAPACITY)).
//! - [`InvariantError`]: Returned by `check_invariants` methods when internal
//!   data-structure invariants are violated.
//!
//! Absence (key not found, empty structure) is never an error: those paths
//! return `None`, `false`, or `0`.
//!
//! ## Example Usage
//!
//! ```
//! use countkit::error::{ConfigError, CopyCountError};
//! use countkit::index::FrequencyIndex;
//!
//! // Fallible constructor for user-configurable parameters
//! let index: Result<FrequencyIndex<u32, &str>, ConfigError> =
//!     FrequencyIndex::try_with_capacity(16);
//! assert!(index.is_ok());
//!
//! // A zero copy count is a precondition violation, not a miss
//! let mut index = index.unwrap();
//! let err: CopyCountError = index.insert(1, "a", 0).unwrap_err();
//! assert_eq!(err.operation(), "insert");
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// CopyCountError
// ---------------------------------------------------------------------------

/// Why a copy count was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyCountErrorKind {
    /// The count was zero.
    Zero,
    /// Adding the count would push a key's count or the total past
    /// `u64::MAX`.
    Overflow,
}

/// Error returned when a counting operation is given an unusable copy count.
///
/// Carries the name of the rejected operation so callers composing several
/// calls can tell which one failed. The structure is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyCountError {
    operation: &'static str,
    kind: CopyCountErrorKind,
}

impl CopyCountError {
    /// Creates a new `CopyCountError` for a zero count passed to the named
    /// operation.
    #[inline]
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            kind: CopyCountErrorKind::Zero,
        }
    }

    /// Creates a new `CopyCountError` for a count that would overflow.
    #[inline]
    pub fn overflow(operation: &'static str) -> Self {
        Self {
            operation,
            kind: CopyCountErrorKind::Overflow,
        }
    }

    /// Returns the name of the operation that rejected the count.
    #[inline]
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    #[inline]
    pub fn kind(&self) -> CopyCountErrorKind {
        self.kind
    }

    /// Returns `Ok(())` when `n_copy >= 1`.
    #[inline]
    pub(crate) fn check(operation: &'static str, n_copy: u64) -> Result<(), Self> {
        if n_copy == 0 {
            Err(Self::new(operation))
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for CopyCountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CopyCountErrorKind::Zero => {
                write!(f, "{}: copy count must be at least 1", self.operation)
            },
            CopyCountErrorKind::Overflow => {
                write!(f, "{}: copy count overflows u64", self.operation)
            },
        }
    }
}

impl std::error::Error for CopyCountError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal invariants are violated.
///
/// Produced by `check_invariants` methods (e.g.
/// [`FrequencyIndex::check_invariants`](crate::index::FrequencyIndex::check_invariants)).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when construction parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`ChainedHashTable::try_with_capacity`](crate::ds::ChainedHashTable::try_with_capacity).
///
/// # Example
///
/// ```
/// use countkit::ds::ChainedHashTable;
///
/// let err = ChainedHashTable::<u64, u64>::try_with_capacity(3).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
