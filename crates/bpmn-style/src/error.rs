//! Error types for style operations.
//!
//! Setters reject unusable caller input with a [`StyleError`] instead of
//! clamping it. Degenerate layout rectangles are never an error.

use thiserror::Error;

use bpmn_style_core::{error::CoreError, identifier::Id};

/// The main error type for style operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
    #[error("invalid value for `{parameter}`: {value}")]
    InvalidParameter { parameter: &'static str, value: f64 },

    #[error("participant index {index} is out of range for a list of {len}")]
    ParticipantIndex { index: usize, len: usize },

    #[error("invalid color: {0}")]
    Color(String),

    #[error("element `{0}` already exists")]
    DuplicateElement(Id),

    #[error("unknown element `{0}`")]
    UnknownElement(Id),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StyleError {
    /// Checks that a length parameter is finite and not negative.
    pub fn check_length(parameter: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(Self::InvalidParameter { parameter, value })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_length() {
        assert_eq!(StyleError::check_length("corner radius", 0.0), Ok(0.0));
        assert_eq!(
            StyleError::check_length("corner radius", -3.0),
            Err(StyleError::InvalidParameter {
                parameter: "corner radius",
                value: -3.0
            })
        );
        assert!(StyleError::check_length("marker size", f64::NAN).is_err());
    }

    #[test]
    fn test_messages() {
        let err = StyleError::ParticipantIndex { index: 4, len: 2 };
        assert_eq!(
            err.to_string(),
            "participant index 4 is out of range for a list of 2"
        );
        let core = CoreError::check_non_negative("line-up spacing", -1.0).unwrap_err();
        assert_eq!(
            StyleError::from(core).to_string(),
            "invalid line-up spacing: -1 (must not be negative)"
        );
    }
}
