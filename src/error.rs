//! Error types for the lfukit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when cache configuration parameters are invalid
//!   (zero capacity, window larger than the cache).
//!
//! ## Example Usage
//!
//! ```
//! use lfukit::error::ConfigError;
//! use lfukit::policy::wtinylfu::WTinyLfuCache;
//!
//! // Fallible constructor for user-configurable parameters
//! let cache: Result<WTinyLfuCache<u64, String>, ConfigError> = WTinyLfuCache::try_new(100);
//! assert!(cache.is_ok());
//!
//! // Zero capacity is caught without panicking
//! let bad = WTinyLfuCache::<u64, String>::try_new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`WTinyLfuCache::try_new`](crate::policy::wtinylfu::WTinyLfuCache::try_new)
/// and by
/// [`WTinyLfuCache::change_capacity`](crate::policy::wtinylfu::WTinyLfuCache::change_capacity).
/// Carries a human-readable description of which parameter failed validation.
///
/// # Example
///
/// ```
/// use lfukit::policy::wtinylfu::WTinyLfuCache;
///
/// let err = WTinyLfuCache::<u64, u64>::try_new(0).unwrap_err();
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
