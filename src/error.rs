//! Crate-level error types.
//!
//! Navigation itself never fails: dropped input is reported as an
//! [`IgnoreReason`](crate::navigator::IgnoreReason) value. These errors
//! cover loading configuration and scenario files and binding to a host.

use std::fmt;

/// Errors produced by the snapscroll crate.
#[derive(Debug)]
pub enum SnapError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// A replay scenario is malformed or inconsistent.
    Scenario(String),
    /// The browser host could not be bound (missing window, listener
    /// registration failure, ...).
    Host(String),
}

impl fmt::Display for SnapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Scenario(msg) => write!(f, "scenario error: {msg}"),
            Self::Host(msg) => write!(f, "host error: {msg}"),
        }
    }
}

impl std::error::Error for SnapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SnapError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn io_errors_keep_their_source() {
        let err = SnapError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "scenario.toml",
        ));
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("I/O error"));
    }

    #[test]
    fn message_variants_have_no_source() {
        let err = SnapError::Scenario("no sections".into());
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "scenario error: no sections");
    }
}
