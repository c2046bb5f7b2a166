pub mod collections;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod views;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::CsvStorage, memory::MemoryStore, Settings};

pub use collections::Sequence;
pub use core::{AddMatchError, InsertTransaction, League, MatchRepository, TeamRepository};
pub use domain::model::{Match, Standing, Team};
pub use utils::error::{LeagueError, Result};
