use crate::domain::model::{MatchRecord, TeamRecord};
use crate::utils::error::Result;

/// Where team and match rows come from and go back to.
pub trait RecordStore {
    fn load_teams(&self) -> Result<Vec<TeamRecord>>;
    fn load_matches(&self) -> Result<Vec<MatchRecord>>;
    fn save_teams(&self, teams: &[TeamRecord]) -> Result<()>;
    fn save_matches(&self, matches: &[MatchRecord]) -> Result<()>;
}

pub trait ConfigProvider {
    fn teams_file(&self) -> &str;
    fn matches_file(&self) -> &str;
    fn delimiter(&self) -> u8;
    fn page_size(&self) -> usize;
}
