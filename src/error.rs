//! Crate-level error types.

use std::fmt;

/// Errors produced by the flurry crate.
///
/// The per-frame simulation path never fails; these cover loading presets
/// and rejecting configurations before an engine is built from them.
#[derive(Debug)]
pub enum FlurryError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Emitter or plane configuration outside its valid range.
    InvalidConfig(String),
}

impl fmt::Display for FlurryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidConfig(msg) => {
                write!(f, "invalid configuration: {msg}")
            }
        }
    }
}

impl std::error::Error for FlurryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FlurryError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn display_carries_context() {
        let err = FlurryError::InvalidConfig("max_particles must be > 0".into());
        assert_eq!(
            err.to_string(),
            "invalid configuration: max_particles must be > 0"
        );
    }

    #[test]
    fn io_errors_expose_their_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = FlurryError::from(io);
        assert!(err.source().is_some());
        assert!(FlurryError::OptionsParse("bad".into()).source().is_none());
    }
}
