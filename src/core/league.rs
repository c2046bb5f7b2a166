use crate::collections::Sequence;
use crate::core::match_repo::MatchRepository;
use crate::core::standings;
use crate::core::team_repo::TeamRepository;
use crate::domain::model::Standing;
use crate::domain::ports::RecordStore;
use crate::utils::error::Result;

/// Both repositories plus the store they were loaded from.
pub struct League<S: RecordStore> {
    store: S,
    pub teams: TeamRepository,
    pub matches: MatchRepository,
}

impl<S: RecordStore> League<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            teams: TeamRepository::new(),
            matches: MatchRepository::new(),
        }
    }

    /// Teams first, since matches resolve their team ids on load.
    pub fn start(&mut self) -> Result<()> {
        tracing::info!("Loading league data...");

        self.teams.start(&self.store)?;
        self.matches.start(&self.store, &self.teams)?;

        tracing::info!(
            "Loaded {} teams and {} matches",
            self.teams.len(),
            self.matches.len()
        );
        Ok(())
    }

    pub fn is_started(&self) -> bool {
        self.teams.is_started() && self.matches.is_started()
    }

    pub fn save(&self) -> Result<()> {
        self.teams.save(&self.store)?;
        self.matches.save(&self.store)?;
        Ok(())
    }

    pub fn standings(&self) -> Sequence<Standing> {
        standings::table(&self.teams, &self.matches)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::memory::MemoryStore;
    use crate::domain::model::{MatchRecord, TeamRecord};

    fn store() -> MemoryStore {
        MemoryStore::new(
            vec![
                TeamRecord {
                    id: 0,
                    name: "A".to_string(),
                },
                TeamRecord {
                    id: 1,
                    name: "B".to_string(),
                },
            ],
            vec![MatchRecord {
                id: 0,
                home_id: 1,
                away_id: 0,
                home_goals: 2,
                away_goals: 0,
            }],
        )
    }

    #[test]
    fn test_start_loads_both_repositories() {
        let mut league = League::new(store());
        assert!(!league.is_started());

        league.start().unwrap();

        assert!(league.is_started());
        assert_eq!(league.teams.len(), 2);
        assert_eq!(league.matches.len(), 1);
        assert_eq!(league.standings().first().map(|s| s.team_id), Some(1));
    }

    #[test]
    fn test_save_writes_changes_back() {
        let mut league = League::new(store());
        league.start().unwrap();

        league.teams.add("C").unwrap();
        league.matches.remove_by_id(0);
        league.save().unwrap();

        assert_eq!(league.store().teams().len(), 3);
        assert!(league.store().matches().is_empty());
    }

    #[test]
    fn test_save_before_start_fails() {
        let league = League::new(store());

        assert!(league.save().is_err());
    }
}
