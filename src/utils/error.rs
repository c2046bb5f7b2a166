use crate::core::match_repo::AddMatchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Malformed record #{record} in {file}: {reason}")]
    MalformedRecord {
        file: String,
        record: usize,
        reason: String,
    },

    #[error("The {repository} repository has not been started")]
    RepositoryNotStarted { repository: &'static str },

    #[error("Match {id} not found")]
    MatchNotFound { id: u32 },

    #[error("Match insertion failed: {0}")]
    Insert(#[from] AddMatchError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Storage,
    Data,
    Operation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LeagueError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LeagueError::ConfigError { .. }
            | LeagueError::InvalidConfigValueError { .. }
            | LeagueError::TomlError(_) => ErrorCategory::Configuration,
            LeagueError::CsvError(_)
            | LeagueError::IoError(_)
            | LeagueError::SerializationError(_) => ErrorCategory::Storage,
            LeagueError::MalformedRecord { .. } | LeagueError::ValidationError { .. } => {
                ErrorCategory::Data
            }
            LeagueError::RepositoryNotStarted { .. }
            | LeagueError::MatchNotFound { .. }
            | LeagueError::Insert(_) => ErrorCategory::Operation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LeagueError::MatchNotFound { .. } => ErrorSeverity::Low,
            LeagueError::ValidationError { .. } | LeagueError::Insert(_) => ErrorSeverity::Medium,
            LeagueError::ConfigError { .. }
            | LeagueError::InvalidConfigValueError { .. }
            | LeagueError::TomlError(_)
            | LeagueError::MalformedRecord { .. }
            | LeagueError::CsvError(_)
            | LeagueError::SerializationError(_) => ErrorSeverity::High,
            LeagueError::IoError(_) | LeagueError::RepositoryNotStarted { .. } => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the command line flags and the TOML configuration file"
            }
            ErrorCategory::Storage => {
                "Make sure the CSV files exist, are readable and use the configured delimiter"
            }
            ErrorCategory::Data => "Fix the offending record and start again",
            ErrorCategory::Operation => "Review the input and retry the operation",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LeagueError::MalformedRecord { file, record, .. } => {
                format!("The data file {} has an invalid entry (record {})", file, record)
            }
            LeagueError::CsvError(_) | LeagueError::IoError(_) => {
                "The league data could not be read or written".to_string()
            }
            LeagueError::TomlError(_) | LeagueError::ConfigError { .. } => {
                "The configuration file could not be loaded".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Process exit code for the binaries.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, LeagueError>;
