pub mod league;
pub mod match_repo;
pub mod prefix;
pub mod standings;
pub mod team_repo;

pub use crate::domain::model::{Match, Standing, Team};
pub use crate::domain::ports::{ConfigProvider, RecordStore};
pub use crate::utils::error::Result;
pub use league::League;
pub use match_repo::{AddMatchError, InsertTransaction, MatchRepository};
pub use team_repo::TeamRepository;
