pub mod cli;
pub mod memory;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::core::standings::DEFAULT_PAGE_SIZE;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_delimiter, validate_file_extensions, validate_path, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use toml_config::{TomlConfig, MAX_PAGE_SIZE};

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_TEAMS_FILE: &str = "data/teams.csv";
pub const DEFAULT_MATCHES_FILE: &str = "data/matches.csv";
pub const DEFAULT_DELIMITER: u8 = b';';

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "small-league")]
#[command(about = "Console manager for a small football league stored in CSV files")]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Team CSV file [default: data/teams.csv]")]
    pub teams_file: Option<String>,

    #[arg(long, help = "Match CSV file [default: data/matches.csv]")]
    pub matches_file: Option<String>,

    #[arg(long, help = "CSV field delimiter [default: ;]")]
    pub delimiter: Option<String>,

    #[arg(long, help = "Standings rows per page [default: 5]")]
    pub page_size: Option<usize>,

    #[arg(long, help = "Save both files when leaving the menu")]
    pub save_on_exit: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Effective configuration: defaults, then the TOML file, then the command
/// line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub teams_file: String,
    pub matches_file: String,
    pub delimiter: u8,
    pub page_size: usize,
    pub save_on_exit: bool,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            teams_file: DEFAULT_TEAMS_FILE.to_string(),
            matches_file: DEFAULT_MATCHES_FILE.to_string(),
            delimiter: DEFAULT_DELIMITER,
            page_size: DEFAULT_PAGE_SIZE,
            save_on_exit: false,
            verbose: false,
        }
    }
}

impl Settings {
    pub fn apply_toml(&mut self, config: &TomlConfig) -> Result<()> {
        config.validate()?;

        if let Some(teams_file) = &config.storage.teams_file {
            self.teams_file = teams_file.clone();
        }
        if let Some(matches_file) = &config.storage.matches_file {
            self.matches_file = matches_file.clone();
        }
        if let Some(delimiter) = &config.storage.delimiter {
            self.delimiter = validate_delimiter("storage.delimiter", delimiter)?;
        }
        if let Some(save_on_exit) = config.storage.save_on_exit {
            self.save_on_exit = save_on_exit;
        }
        if let Some(page_size) = config.display.page_size {
            self.page_size = page_size;
        }
        if let Some(verbose) = config.logging.verbose {
            self.verbose = verbose;
        }
        Ok(())
    }

    #[cfg(feature = "cli")]
    pub fn apply_cli(&mut self, cli: &CliConfig) -> Result<()> {
        if let Some(teams_file) = &cli.teams_file {
            self.teams_file = teams_file.clone();
        }
        if let Some(matches_file) = &cli.matches_file {
            self.matches_file = matches_file.clone();
        }
        if let Some(delimiter) = &cli.delimiter {
            self.delimiter = validate_delimiter("--delimiter", delimiter)?;
        }
        if let Some(page_size) = cli.page_size {
            self.page_size = page_size;
        }
        self.save_on_exit |= cli.save_on_exit;
        self.verbose |= cli.verbose;
        Ok(())
    }

    /// Merges the optional TOML file named by `--config` with the remaining
    /// command line flags and validates the result.
    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(path) = &cli.config {
            let toml = TomlConfig::from_file(path)?;
            settings.apply_toml(&toml)?;
        }
        settings.apply_cli(cli)?;
        settings.validate()?;

        Ok(settings)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("teams_file", &self.teams_file)?;
        validate_path("matches_file", &self.matches_file)?;
        validate_file_extensions(
            "storage",
            &[self.teams_file.as_str(), self.matches_file.as_str()],
            &["csv"],
        )?;
        validate_range("page_size", self.page_size, 1, MAX_PAGE_SIZE)?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn teams_file(&self) -> &str {
        &self.teams_file
    }

    fn matches_file(&self) -> &str {
        &self.matches_file
    }

    fn delimiter(&self) -> u8 {
        self.delimiter
    }

    fn page_size(&self) -> usize {
        self.page_size
    }
}
