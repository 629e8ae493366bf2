//! Error types for icon construction.

use thiserror::Error;

/// Errors raised when an icon combinator is built with unusable values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("invalid {name}: {value} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl CoreError {
    /// Checks that `value` is finite and not negative.
    pub fn check_non_negative(name: &'static str, value: f64) -> Result<f64, Self> {
        if !value.is_finite() {
            return Err(Self::InvalidValue {
                name,
                value,
                reason: "must be finite",
            });
        }
        if value < 0.0 {
            return Err(Self::InvalidValue {
                name,
                value,
                reason: "must not be negative",
            });
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_non_negative() {
        assert_eq!(CoreError::check_non_negative("spacing", 5.0), Ok(5.0));
        assert!(CoreError::check_non_negative("spacing", -1.0).is_err());
        assert!(CoreError::check_non_negative("spacing", f64::NAN).is_err());
        assert!(CoreError::check_non_negative("spacing", f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_message() {
        let err = CoreError::check_non_negative("cell width", -2.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid cell width: -2 (must not be negative)"
        );
    }
}
