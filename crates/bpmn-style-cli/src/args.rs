//! Command-line argument definitions for the gallery renderer.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the output path, configuration file
//! selection, gallery layout and logging verbosity.

use clap::Parser;

/// Command-line arguments for the BPMN style gallery renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the output SVG file
    #[arg(short, long, default_value = "gallery.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Number of gallery columns, overriding the configuration
    #[arg(long)]
    pub columns: Option<usize>,
}
