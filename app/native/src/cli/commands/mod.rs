//! CLI command definitions using Clap.
//!
//! - `config_cmd` - Configuration inspection commands
//! - `simulate` - Scripted transitions against the headless host

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::error::SoftScreenError;
use crate::{config, logging, schema};

pub mod config_cmd;
pub mod simulate;

pub use config_cmd::ConfigCommands;
pub use simulate::SimulateArgs;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// SoftScreen CLI - inspect configuration and simulate soft fullscreen transitions.
#[derive(Parser, Debug)]
#[command(name = "softscreen")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log transitions at debug level.
    ///
    /// `SOFTSCREEN_LOG` takes precedence when set.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Configuration file commands.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Run enter/exit against an in-memory window system.
    ///
    /// Builds a controller on the headless host described by the
    /// `headless` configuration section, enters fullscreen, exits again,
    /// and prints the window state after each step.
    Simulate(SimulateArgs),

    /// Output the configuration JSON Schema.
    ///
    /// Can be redirected to a file for editors that support JSON Schema
    /// validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Usage:
    ///   eval "$(softscreen completions --shell zsh)"
    ///   softscreen completions --shell fish > ~/.config/fish/completions/softscreen.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the custom configuration file does not exist or
    /// the command fails.
    pub fn execute(&self) -> Result<(), SoftScreenError> {
        logging::init(self.verbose);

        if let Some(path) = &self.config {
            if !path.exists() {
                return Err(SoftScreenError::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            config::set_custom_config_path(path.clone());
        }

        match &self.command {
            Commands::Config(cmd) => config_cmd::execute(cmd),
            Commands::Simulate(args) => simulate::execute(args),
            Commands::Schema => {
                println!("{}", schema::generate_schema_json());
                Ok(())
            }
            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, "softscreen", &mut io::stdout());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::platform::Platform;

    #[test]
    fn test_cli_definition_is_valid() { Cli::command().debug_assert(); }

    #[test]
    fn test_parses_schema() {
        let cli = Cli::try_parse_from(["softscreen", "schema"]).unwrap();
        assert!(matches!(cli.command, Commands::Schema));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parses_global_options_after_subcommand() {
        let cli =
            Cli::try_parse_from(["softscreen", "config", "show", "--config", "/tmp/x.jsonc", "-v"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/x.jsonc")));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Config(ConfigCommands::Show)));
    }

    #[test]
    fn test_parses_simulate() {
        let cli = Cli::try_parse_from([
            "softscreen",
            "simulate",
            "--surface",
            "1024x768",
            "--display",
            "5",
            "--platform",
            "macos",
            "--primary-visible",
        ])
        .unwrap();
        let Commands::Simulate(args) = cli.command else {
            panic!("expected simulate");
        };
        assert_eq!(args.surface, Size::new(1024, 768));
        assert_eq!(args.display, Some(5));
        assert_eq!(args.platform, Some(Platform::MacOs));
        assert!(args.primary_visible);
    }

    #[test]
    fn test_simulate_defaults() {
        let cli = Cli::try_parse_from(["softscreen", "simulate"]).unwrap();
        let Commands::Simulate(args) = cli.command else {
            panic!("expected simulate");
        };
        assert_eq!(args.surface, Size::new(800, 600));
        assert_eq!(args.display, None);
        assert!(!args.json);
    }

    #[test]
    fn test_rejects_bad_surface_size() {
        assert!(Cli::try_parse_from(["softscreen", "simulate", "--surface", "wide"]).is_err());
    }

    #[test]
    fn test_parses_completions() {
        let cli = Cli::try_parse_from(["softscreen", "completions", "--shell", "zsh"]).unwrap();
        assert!(matches!(cli.command, Commands::Completions { shell: Shell::Zsh }));
    }
}
