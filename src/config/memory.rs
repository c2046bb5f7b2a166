use crate::core::RecordStore;
use crate::domain::model::{MatchRecord, TeamRecord};
use crate::utils::error::Result;
use std::cell::RefCell;

/// In-process store for tests and for embedding without files.
#[derive(Debug, Default)]
pub struct MemoryStore {
    teams: RefCell<Vec<TeamRecord>>,
    matches: RefCell<Vec<MatchRecord>>,
}

impl MemoryStore {
    pub fn new(teams: Vec<TeamRecord>, matches: Vec<MatchRecord>) -> Self {
        Self {
            teams: RefCell::new(teams),
            matches: RefCell::new(matches),
        }
    }

    pub fn teams(&self) -> Vec<TeamRecord> {
        self.teams.borrow().clone()
    }

    pub fn matches(&self) -> Vec<MatchRecord> {
        self.matches.borrow().clone()
    }
}

impl RecordStore for MemoryStore {
    fn load_teams(&self) -> Result<Vec<TeamRecord>> {
        Ok(self.teams())
    }

    fn load_matches(&self) -> Result<Vec<MatchRecord>> {
        Ok(self.matches())
    }

    fn save_teams(&self, teams: &[TeamRecord]) -> Result<()> {
        *self.teams.borrow_mut() = teams.to_vec();
        Ok(())
    }

    fn save_matches(&self, matches: &[MatchRecord]) -> Result<()> {
        *self.matches.borrow_mut() = matches.to_vec();
        Ok(())
    }
}
