//! BPMN style gallery CLI library
//!
//! This module contains the core CLI logic: it renders a gallery of every
//! BPMN element kind to an SVG file.

pub mod error_adapter;

mod args;
mod config;
mod error;
mod gallery;

pub use args::Args;
pub use config::ConfigError;
pub use error::CliError;
pub use error_adapter::ErrorAdapter;

use std::fs;

use log::info;

use bpmn_style::{config::AppConfig, render::svg::SvgContext};

/// Run the gallery renderer
///
/// Loads the configuration, builds the gallery scene and writes it as SVG
/// to the output file.
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid style values in the configuration
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(output_path = args.output; "Rendering gallery");

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(columns) = args.columns {
        app_config = AppConfig::new(
            app_config.style().clone(),
            app_config.gallery().clone().with_columns(columns),
        );
    }

    let defaults = app_config.style().to_defaults()?;
    let mut scene = gallery::build(&defaults, app_config.gallery())?;

    let mut context = SvgContext::new();
    let (document, stats) = scene.render_svg(&mut context);

    fs::write(&args.output, document.to_string())?;

    info!(
        output_file = args.output,
        elements = scene.len(),
        leaves = context.created(),
        rebuilt = stats.rebuilt;
        "SVG exported successfully"
    );

    Ok(())
}
