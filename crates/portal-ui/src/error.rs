//! Error types for the switcher
//!
//! - [`BuilderError`] - Errors during configuration and layout construction
//! - [`Error`] - Transport failures surfaced by the poll loop
//!
//! A missing touch is not an error. Transport errors are never retried; they
//! end the poll loop and are fatal for the device.
//!
//! ## Example
//!
//! ```
//! use portal_ui::{BuilderError, Config};
//!
//! let result = Config::builder().poll_interval_ms(0).build();
//! assert!(matches!(result, Err(BuilderError::ZeroPollInterval)));
//! ```

use core::fmt;

/// Errors that can occur while running the poll loop
///
/// Generic over each transport's error type so callers can match on the
/// underlying hardware error.
#[derive(Debug, PartialEq, Eq)]
pub enum Error<T, K, D> {
    /// Touch controller read failed
    Touch(T),
    /// Keystroke transport failed
    Keys(K),
    /// Display draw or flush failed
    Display(D),
}

impl<T, K, D> fmt::Display for Error<T, K, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Touch(_) => write!(f, "Touch transport error"),
            Error::Keys(_) => write!(f, "Keystroke transport error"),
            Error::Display(_) => write!(f, "Display transport error"),
        }
    }
}

impl<T, K, D> core::error::Error for Error<T, K, D>
where
    T: fmt::Debug,
    K: fmt::Debug,
    D: fmt::Debug,
{
}

/// Errors that can occur when building configuration or a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderError {
    /// Poll interval must be at least one millisecond
    ZeroPollInterval,
    /// A layout needs at least one button
    EmptyLayout,
    /// More buttons than change tracking supports
    TooManyButtons {
        /// Number of buttons supplied
        count: usize,
    },
}

impl fmt::Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuilderError::ZeroPollInterval => write!(f, "Poll interval must be non-zero"),
            BuilderError::EmptyLayout => write!(f, "Layout has no buttons"),
            BuilderError::TooManyButtons { count } => write!(
                f,
                "Layout has {count} buttons (max {})",
                crate::layout::Layout::MAX_BUTTONS
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
