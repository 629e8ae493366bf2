//! Error adapter for converting [`CliError`] to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use bpmn_style::StyleError;

use crate::{config::ConfigError, error::CliError};

/// Adapter giving a [`CliError`] an error code and help text.
pub struct ErrorAdapter(pub CliError);

impl fmt::Debug for ErrorAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CliError::Io(_) => "bpmn_style::io",
            CliError::Config(_) => "bpmn_style::config",
            CliError::Style(_) => "bpmn_style::style",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            CliError::Io(_) => return None,
            CliError::Config(ConfigError::MissingFile(_)) => {
                "check the path given with --config"
            }
            CliError::Config(ConfigError::Parse(_)) => {
                "the file may only contain [style] and [gallery] sections"
            }
            CliError::Style(StyleError::Color(_)) => {
                "colors are CSS color strings such as \"#336699\" or \"steelblue\""
            }
            CliError::Style(StyleError::InvalidParameter { .. }) => {
                "measures must be finite and not negative"
            }
            CliError::Style(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
