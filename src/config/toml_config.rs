use crate::utils::error::{LeagueError, Result};
use crate::utils::validation::{
    validate_delimiter, validate_file_extensions, validate_path, validate_range, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MAX_PAGE_SIZE: usize = 100;

/// Optional configuration file. Every section and key may be omitted; the
/// command line and built-in defaults fill the gaps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub teams_file: Option<String>,
    pub matches_file: Option<String>,
    pub delimiter: Option<String>,
    pub save_on_exit: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LeagueError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LeagueError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        let files = [
            ("storage.teams_file", &self.storage.teams_file),
            ("storage.matches_file", &self.storage.matches_file),
        ];
        for (field, file) in files {
            if let Some(path) = file {
                validate_path(field, path)?;
                validate_file_extensions(field, &[path.as_str()], &["csv"])?;
            }
        }

        if let Some(delimiter) = &self.storage.delimiter {
            validate_delimiter("storage.delimiter", delimiter)?;
        }

        if let Some(page_size) = self.display.page_size {
            validate_range("display.page_size", page_size, 1, MAX_PAGE_SIZE)?;
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[storage]
teams_file = "league/teams.csv"
matches_file = "league/matches.csv"
delimiter = ","
save_on_exit = true

[display]
page_size = 10

[logging]
verbose = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.storage.teams_file.as_deref(), Some("league/teams.csv"));
        assert_eq!(config.storage.delimiter.as_deref(), Some(","));
        assert_eq!(config.storage.save_on_exit, Some(true));
        assert_eq!(config.display.page_size, Some(10));
        assert_eq!(config.logging.verbose, Some(true));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sections_are_optional() {
        let config = TomlConfig::from_toml_str("[display]\npage_size = 3\n").unwrap();

        assert!(config.storage.teams_file.is_none());
        assert_eq!(config.display.page_size, Some(3));
        assert!(TomlConfig::from_toml_str("").is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SMALL_LEAGUE_TEST_DATA_DIR", "/tmp/league");

        let toml_content = r#"
[storage]
teams_file = "${SMALL_LEAGUE_TEST_DATA_DIR}/teams.csv"
matches_file = "${SMALL_LEAGUE_UNSET_VARIABLE}/matches.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.storage.teams_file.as_deref(), Some("/tmp/league/teams.csv"));
        assert_eq!(
            config.storage.matches_file.as_deref(),
            Some("${SMALL_LEAGUE_UNSET_VARIABLE}/matches.csv")
        );

        std::env::remove_var("SMALL_LEAGUE_TEST_DATA_DIR");
    }

    #[test]
    fn test_config_validation() {
        let bad_extension = TomlConfig::from_toml_str("[storage]\nteams_file = \"teams.txt\"\n").unwrap();
        assert!(bad_extension.validate().is_err());

        let bad_delimiter = TomlConfig::from_toml_str("[storage]\ndelimiter = \";;\"\n").unwrap();
        assert!(bad_delimiter.validate().is_err());

        let bad_page = TomlConfig::from_toml_str("[display]\npage_size = 0\n").unwrap();
        assert!(bad_page.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let result = TomlConfig::from_toml_str("[display\npage_size = 3");

        assert!(matches!(result, Err(LeagueError::TomlError(_))));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[storage]\nteams_file = \"from-file.csv\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.storage.teams_file.as_deref(), Some("from-file.csv"));
    }
}
