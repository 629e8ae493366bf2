//! Error type of the gallery renderer.

use thiserror::Error;

use bpmn_style::StyleError;

use crate::config::ConfigError;

/// Errors reported by [`run`](crate::run).
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Style error: {0}")]
    Style(#[from] StyleError),
}
