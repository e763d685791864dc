//! Developer CLI for SoftScreen.
//!
//! Inspects configuration and drives the controller against the headless
//! host. It never launches or wraps an application.

mod commands;
mod output;

use clap::Parser;
pub use commands::Cli;

use crate::error::SoftScreenError;

/// Parses the command line and runs the selected command.
///
/// # Errors
///
/// Returns an error if the command fails.
pub fn run() -> Result<(), SoftScreenError> {
    let cli = Cli::parse();
    cli.execute()
}
