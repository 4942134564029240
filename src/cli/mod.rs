//! Command-line interface for sheetport
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - Overlaying CLI flags onto the loaded configuration
//! - Subcommand handling (version, completion, config)

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::{Config, LogLevel};
use crate::error::Result;
use crate::export::ExportSettings;

pub mod completion;

/// Sheetport - background spreadsheet exporter
#[derive(Parser, Debug)]
#[command(
    name = "sheetport",
    version,
    about = "Export tabular query results to a spreadsheet",
    long_about = "Exports a CSV row set to a styled spreadsheet artifact in a background
worker, with incremental progress reporting, output-folder retention,
and a hand-off to the platform's default spreadsheet viewer."
)]
pub struct CliArgs {
    /// CSV file to export (first record is the header row)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Worksheet/table name (defaults to the input file stem)
    #[arg(short = 't', long, value_name = "NAME")]
    pub table_name: Option<String>,

    /// Output folder for exported artifacts
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// How many recent artifacts to keep in the output folder
    #[arg(long, value_name = "N")]
    pub keep_recent: Option<usize>,

    /// Do not open the exported file after saving
    #[arg(long = "no-open")]
    pub no_open: bool,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Quiet mode (minimal output)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (debug logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for sheetport
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version,

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish)
        #[arg(value_name = "SHELL")]
        shell: String,
    },

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn new() -> Result<Self> {
        let args = CliArgs::parse();
        let config = Self::load_config(&args)?;

        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = Config::load_from_file(args.config_file.as_deref())?;

        if let Err(e) = config.validate() {
            eprintln!("Warning: Configuration validation failed: {}", e);
            eprintln!("Using default configuration instead.");
            config = Config::default();
        }

        Self::apply_args_to_config(&mut config, args);

        Ok(config)
    }

    /// Apply CLI arguments to configuration
    ///
    /// Overrides configuration values with CLI arguments where provided
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        if let Some(output_dir) = &args.output_dir {
            config.export.output_dir = output_dir.clone();
        }
        if let Some(keep_recent) = args.keep_recent {
            config.export.keep_recent = keep_recent;
        }
        if args.no_open {
            config.export.open_after_save = false;
        }

        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Export settings derived from the effective configuration
    pub fn export_settings(&self) -> ExportSettings {
        ExportSettings::from(&self.config.export)
    }

    /// The input file, required for an export run
    pub fn input_file(&self) -> Result<&Path> {
        self.args
            .file
            .as_deref()
            .ok_or_else(|| "no input file provided (see --help)".into())
    }

    /// Table name: explicit flag, else the input file stem
    pub fn resolve_table_name(&self) -> String {
        if let Some(name) = &self.args.table_name {
            return name.clone();
        }
        self.args
            .file
            .as_deref()
            .and_then(|p| p.file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "export".to_string())
    }

    /// Handle subcommands
    ///
    /// # Returns
    /// * `Result<bool>` - True if subcommand was handled, false to continue
    pub fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Version) => {
                self.show_version();
                Ok(true)
            }
            Some(Commands::Completion { shell }) => {
                completion::generate_completion(shell)?;
                Ok(true)
            }
            Some(Commands::Config { show, validate }) => {
                self.handle_config_command(*show, *validate)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Show version information
    fn show_version(&self) {
        println!("sheetport version {}", env!("CARGO_PKG_VERSION"));
        println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    }

    /// Handle config subcommand
    fn handle_config_command(&self, show: bool, validate: bool) -> Result<()> {
        if validate {
            self.validate_config_file()?;
        }

        if show {
            self.show_config()?;
        }

        Ok(())
    }

    /// Validate configuration file
    fn validate_config_file(&self) -> Result<()> {
        let path = self.get_config_path();
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            println!("Configuration file does not exist; defaults apply");
            return Ok(());
        }

        match Config::load_from_file(self.args.config_file.as_deref()) {
            Ok(config) => match config.validate() {
                Ok(_) => println!("Configuration is valid"),
                Err(e) => println!("Configuration validation failed: {}", e),
            },
            Err(e) => println!("Failed to load configuration: {}", e),
        }

        Ok(())
    }

    /// Show effective configuration
    fn show_config(&self) -> Result<()> {
        let path = self.get_config_path();
        println!("Configuration file: {}", path.display());
        println!();

        match toml::to_string_pretty(&self.config) {
            Ok(toml_str) => println!("{}", toml_str),
            Err(e) => {
                eprintln!("Error formatting configuration: {}", e);
                println!("{:#?}", self.config);
            }
        }

        Ok(())
    }

    /// Get configuration file path (from args or default)
    fn get_config_path(&self) -> PathBuf {
        self.args
            .config_file
            .as_ref()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Config::default_config_path)
    }

    /// Print banner with export info
    pub fn print_banner(&self, rows: usize, table_name: &str) {
        if !self.args.quiet {
            println!(
                "Exporting {} rows of '{}' to {}",
                rows,
                table_name,
                self.config.export.output_dir.display()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interface(argv: Vec<&str>) -> CliInterface {
        let args = CliArgs::try_parse_from(argv).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        CliInterface { args, config }
    }

    #[test]
    fn test_cli_args_parsing() {
        let args = CliArgs::try_parse_from(vec!["sheetport"]).unwrap();
        assert!(args.file.is_none());
        assert!(args.table_name.is_none());
    }

    #[test]
    fn test_cli_args_with_file_and_flags() {
        let args = CliArgs::try_parse_from(vec![
            "sheetport",
            "results.csv",
            "--no-open",
            "--quiet",
        ])
        .unwrap();
        assert_eq!(args.file, Some(PathBuf::from("results.csv")));
        assert!(args.no_open);
        assert!(args.quiet);
    }

    #[test]
    fn test_args_override_config() {
        let cli = interface(vec![
            "sheetport",
            "results.csv",
            "-o",
            "exports",
            "--keep-recent",
            "3",
            "--no-open",
        ]);
        assert_eq!(cli.config.export.output_dir, PathBuf::from("exports"));
        assert_eq!(cli.config.export.keep_recent, 3);
        assert!(!cli.config.export.open_after_save);
    }

    #[test]
    fn test_logging_flag_precedence() {
        assert_eq!(
            interface(vec!["sheetport", "--vv"]).config.logging.level,
            LogLevel::Trace
        );
        assert_eq!(
            interface(vec!["sheetport", "-v"]).config.logging.level,
            LogLevel::Debug
        );
        assert_eq!(
            interface(vec!["sheetport", "-q"]).config.logging.level,
            LogLevel::Error
        );
        assert_eq!(
            interface(vec!["sheetport"]).config.logging.level,
            LogLevel::Warn
        );
    }

    #[test]
    fn test_resolve_table_name_from_stem() {
        let cli = interface(vec!["sheetport", "data/monthly report.csv"]);
        assert_eq!(cli.resolve_table_name(), "monthly report");
    }

    #[test]
    fn test_resolve_table_name_prefers_flag() {
        let cli = interface(vec!["sheetport", "data.csv", "-t", "Orders"]);
        assert_eq!(cli.resolve_table_name(), "Orders");
    }

    #[test]
    fn test_input_file_required() {
        let cli = interface(vec!["sheetport"]);
        assert!(cli.input_file().is_err());
    }
}
