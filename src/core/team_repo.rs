use crate::collections::Sequence;
use crate::core::prefix::matches_prefix;
use crate::domain::model::{Team, TeamRecord};
use crate::domain::ports::RecordStore;
use crate::utils::error::{LeagueError, Result};
use std::rc::Rc;

const REPOSITORY: &str = "team";

/// Append-only store of teams. Ids are assigned sequentially after the last
/// team in load order.
#[derive(Debug, Default)]
pub struct TeamRepository {
    teams: Option<Sequence<Rc<Team>>>,
}

impl TeamRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every team from `store` on the first call; later calls are no-ops.
    /// A single bad record fails the whole load and leaves the repository
    /// un-started.
    pub fn start<S: RecordStore>(&mut self, store: &S) -> Result<()> {
        if self.teams.is_some() {
            tracing::debug!("Team repository already started");
            return Ok(());
        }

        let records = store.load_teams()?;
        let mut teams: Sequence<Rc<Team>> = Sequence::new();

        for (index, record) in records.into_iter().enumerate() {
            let malformed = |reason: String| LeagueError::MalformedRecord {
                file: "teams".to_string(),
                record: index + 1,
                reason,
            };

            if teams.find_first(|team| team.id() == record.id).is_some() {
                return Err(malformed(format!("duplicate team id {}", record.id)));
            }

            let team = Team::new(record.id, record.name).map_err(|e| malformed(e.to_string()))?;
            teams.push(Rc::new(team));
        }

        tracing::debug!("Loaded {} teams", teams.len());
        self.teams = Some(teams);
        Ok(())
    }

    pub fn is_started(&self) -> bool {
        self.teams.is_some()
    }

    pub fn add(&mut self, name: &str) -> Result<Rc<Team>> {
        let teams = self
            .teams
            .as_mut()
            .ok_or(LeagueError::RepositoryNotStarted {
                repository: REPOSITORY,
            })?;

        let id = match teams.last() {
            None => 0,
            Some(last) => last.id().checked_add(1).ok_or_else(|| LeagueError::ValidationError {
                message: "team id space exhausted".to_string(),
            })?,
        };

        let team = Rc::new(Team::new(id, name)?);
        teams.push(Rc::clone(&team));

        tracing::info!("Added team {} ({})", team.name(), id);
        Ok(team)
    }

    pub fn get_by_id(&self, id: u32) -> Option<Rc<Team>> {
        self.teams
            .as_ref()?
            .find_first(|team| team.id() == id)
            .cloned()
    }

    /// Teams whose name starts with `prefix`. The result borrows the
    /// repository's teams; it is empty when the repository is not started.
    pub fn search_by_prefix(&self, prefix: &str) -> Sequence<&Rc<Team>> {
        tracing::debug!("Searching teams with prefix {:?}", prefix);

        self.teams
            .as_ref()
            .map(|teams| teams.search_all(|team| matches_prefix(team.name(), prefix)))
            .unwrap_or_default()
    }

    pub fn all(&self) -> Option<&Sequence<Rc<Team>>> {
        self.teams.as_ref()
    }

    pub fn len(&self) -> usize {
        self.teams.as_ref().map_or(0, Sequence::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_records(&self) -> Vec<TeamRecord> {
        self.teams
            .iter()
            .flat_map(|teams| teams.iter())
            .map(|team| team.to_record())
            .collect()
    }

    pub fn save<S: RecordStore>(&self, store: &S) -> Result<()> {
        if !self.is_started() {
            return Err(LeagueError::RepositoryNotStarted {
                repository: REPOSITORY,
            });
        }

        store.save_teams(&self.to_records())?;
        tracing::info!("Saved {} teams", self.len());
        Ok(())
    }
}
