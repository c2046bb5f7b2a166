use crate::collections::{Sequence, SequenceError};
use crate::core::prefix::matches_prefix;
use crate::core::team_repo::TeamRepository;
use crate::domain::model::{Match, MatchRecord};
use crate::domain::ports::RecordStore;
use crate::utils::error::{LeagueError, Result};
use thiserror::Error;

const REPOSITORY: &str = "match";

/// Every way staging or committing a match can fail.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddMatchError {
    #[error("the match repository has not been started")]
    NotStarted,

    #[error("another match is already staged in this transaction")]
    TransactionOpen,

    #[error("home and away teams must be different")]
    SameTeam,

    #[error("home team {0} does not exist")]
    HomeNotFound(u32),

    #[error("away team {0} does not exist")]
    AwayNotFound(u32),

    #[error("not enough memory to store a new match")]
    OutOfMemory,

    #[error("match id space exhausted")]
    IdsExhausted,

    #[error("no match is staged")]
    NothingStaged,
}

impl From<SequenceError> for AddMatchError {
    fn from(error: SequenceError) -> Self {
        match error {
            SequenceError::Absent => AddMatchError::NothingStaged,
            SequenceError::Allocation(_) => AddMatchError::OutOfMemory,
        }
    }
}

#[derive(Debug, Default)]
pub struct MatchRepository {
    matches: Option<Sequence<Match>>,
}

impl MatchRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every match from `store`, resolving team ids against `teams`.
    /// Idempotent. Unknown teams, a team playing itself or a duplicate id
    /// fail the whole load.
    pub fn start<S: RecordStore>(&mut self, store: &S, teams: &TeamRepository) -> Result<()> {
        if self.matches.is_some() {
            tracing::debug!("Match repository already started");
            return Ok(());
        }

        if !teams.is_started() {
            return Err(LeagueError::RepositoryNotStarted { repository: "team" });
        }

        let records = store.load_matches()?;
        let mut matches: Sequence<Match> = Sequence::new();

        for (index, record) in records.into_iter().enumerate() {
            let resolved = if matches.find_first(|m| m.id() == record.id).is_some() {
                Err(format!("duplicate match id {}", record.id))
            } else {
                resolve(record, teams)
            };

            match resolved {
                Ok(game) => matches.push(game),
                Err(reason) => {
                    matches.destroy_with(|game| {
                        tracing::trace!("Discarding partially loaded match {}", game.id())
                    });
                    return Err(LeagueError::MalformedRecord {
                        file: "matches".to_string(),
                        record: index + 1,
                        reason,
                    });
                }
            }
        }

        tracing::debug!("Loaded {} matches", matches.len());
        self.matches = Some(matches);
        Ok(())
    }

    pub fn is_started(&self) -> bool {
        self.matches.is_some()
    }

    /// Opens an insert session. The session borrows the repository
    /// exclusively, so only one can be alive at a time.
    pub fn start_insert_transaction(
        &mut self,
    ) -> std::result::Result<InsertTransaction<'_>, AddMatchError> {
        let matches = self.matches.as_mut().ok_or(AddMatchError::NotStarted)?;

        Ok(InsertTransaction {
            matches,
            staged: None,
        })
    }

    pub fn get_by_id(&self, id: u32) -> Option<&Match> {
        self.matches.as_ref()?.find_first(|game| game.id() == id)
    }

    pub fn get_by_id_mut(&mut self, id: u32) -> Option<&mut Match> {
        self.matches.as_mut()?.find_first_mut(|game| game.id() == id)
    }

    pub fn search_by_home(&self, prefix: &str) -> Sequence<&Match> {
        self.search(|game| matches_prefix(game.home().name(), prefix))
    }

    pub fn search_by_away(&self, prefix: &str) -> Sequence<&Match> {
        self.search(|game| matches_prefix(game.away().name(), prefix))
    }

    pub fn search_by_either(&self, prefix: &str) -> Sequence<&Match> {
        self.search(|game| {
            matches_prefix(game.home().name(), prefix) || matches_prefix(game.away().name(), prefix)
        })
    }

    /// Matches where `team_id` plays on either side.
    pub fn search_by_team(&self, team_id: u32) -> Sequence<&Match> {
        self.search(|game| game.involves(team_id))
    }

    pub fn update_goals(&mut self, id: u32, home_goals: u32, away_goals: u32) -> Result<()> {
        let game = self
            .get_by_id_mut(id)
            .ok_or(LeagueError::MatchNotFound { id })?;

        game.set_home_goals(home_goals);
        game.set_away_goals(away_goals);

        tracing::info!("Updated match {} to {}x{}", id, home_goals, away_goals);
        Ok(())
    }

    /// Removes the first match with `id`. Its teams stay in the team repository.
    pub fn remove_by_id(&mut self, id: u32) -> Option<Match> {
        let removed = self.matches.as_mut()?.remove_first(|game| game.id() == id);

        if removed.is_some() {
            tracing::info!("Removed match {}", id);
        }
        removed
    }

    pub fn all(&self) -> Option<&Sequence<Match>> {
        self.matches.as_ref()
    }

    pub fn len(&self) -> usize {
        self.matches.as_ref().map_or(0, Sequence::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_records(&self) -> Vec<MatchRecord> {
        self.matches
            .iter()
            .flat_map(|matches| matches.iter())
            .map(Match::to_record)
            .collect()
    }

    pub fn save<S: RecordStore>(&self, store: &S) -> Result<()> {
        if !self.is_started() {
            return Err(LeagueError::RepositoryNotStarted {
                repository: REPOSITORY,
            });
        }

        store.save_matches(&self.to_records())?;
        tracing::info!("Saved {} matches", self.len());
        Ok(())
    }

    fn search<P>(&self, predicate: P) -> Sequence<&Match>
    where
        P: FnMut(&Match) -> bool,
    {
        self.matches
            .as_ref()
            .map(|matches| matches.search_all(predicate))
            .unwrap_or_default()
    }
}

fn resolve(record: MatchRecord, teams: &TeamRepository) -> std::result::Result<Match, String> {
    let home = teams
        .get_by_id(record.home_id)
        .ok_or_else(|| format!("unknown home team {}", record.home_id))?;
    let away = teams
        .get_by_id(record.away_id)
        .ok_or_else(|| format!("unknown away team {}", record.away_id))?;

    Match::new(
        record.id,
        home,
        away,
        record.home_goals,
        record.away_goals,
    )
    .map_err(|e| e.to_string())
}

/// A pending insert: at most one staged match that is either committed to
/// the repository or discarded. Dropping the session discards anything
/// still staged.
pub struct InsertTransaction<'a> {
    matches: &'a mut Sequence<Match>,
    staged: Option<Match>,
}

impl InsertTransaction<'_> {
    /// Validates and stages a new match with the next sequential id.
    pub fn add_match(
        &mut self,
        teams: &TeamRepository,
        home_id: u32,
        away_id: u32,
        home_goals: u32,
        away_goals: u32,
    ) -> std::result::Result<&Match, AddMatchError> {
        if self.staged.is_some() {
            return Err(AddMatchError::TransactionOpen);
        }

        if home_id == away_id {
            return Err(AddMatchError::SameTeam);
        }

        let home = teams
            .get_by_id(home_id)
            .ok_or(AddMatchError::HomeNotFound(home_id))?;
        let away = teams
            .get_by_id(away_id)
            .ok_or(AddMatchError::AwayNotFound(away_id))?;

        self.matches.try_reserve(1)?;

        let id = match self.matches.last() {
            None => 0,
            Some(last) => last.id().checked_add(1).ok_or(AddMatchError::IdsExhausted)?,
        };

        let candidate = Match::new(id, home, away, home_goals, away_goals)
            .map_err(|_| AddMatchError::SameTeam)?;

        tracing::debug!("Staged match {}", id);
        let staged: &Match = self.staged.insert(candidate);
        Ok(staged)
    }

    pub fn staged(&self) -> Option<&Match> {
        self.staged.as_ref()
    }

    pub fn is_staged(&self) -> bool {
        self.staged.is_some()
    }

    /// Appends the staged match and returns its id. On failure the match
    /// stays staged.
    pub fn commit(&mut self) -> std::result::Result<u32, AddMatchError> {
        let id = self
            .staged
            .as_ref()
            .map(Match::id)
            .ok_or(AddMatchError::NothingStaged)?;

        self.matches.try_reserve(1)?;
        if let Some(game) = self.staged.take() {
            self.matches.push(game);
        }

        tracing::info!("Committed match {}", id);
        Ok(id)
    }

    /// Discards the staged match, if any.
    pub fn rollback(&mut self) {
        if let Some(game) = self.staged.take() {
            tracing::debug!("Rolled back match {}", game.id());
        }
    }
}

impl Drop for InsertTransaction<'_> {
    fn drop(&mut self) {
        self.rollback();
    }
}
