use crate::utils::error::{LeagueError, Result};
use crate::utils::validation::{validate_max_chars, validate_non_empty_string};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

pub const TEAM_NAME_MAX_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    id: u32,
    name: String,
}

impl Team {
    pub fn new(id: u32, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_team_name(&name)?;
        Ok(Self { id, name })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn to_record(&self) -> TeamRecord {
        TeamRecord {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

pub fn validate_team_name(name: &str) -> Result<()> {
    validate_non_empty_string("team name", name)?;
    validate_max_chars("team name", name, TEAM_NAME_MAX_LEN)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    HomeWin,
    Draw,
    AwayWin,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Outcome::HomeWin => "H",
            Outcome::Draw => "D",
            Outcome::AwayWin => "A",
        };
        f.write_str(letter)
    }
}

/// A scored game between two different teams. Teams are shared with the
/// team repository, never owned by the match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    id: u32,
    home: Rc<Team>,
    away: Rc<Team>,
    home_goals: u32,
    away_goals: u32,
}

impl Match {
    pub fn new(
        id: u32,
        home: Rc<Team>,
        away: Rc<Team>,
        home_goals: u32,
        away_goals: u32,
    ) -> Result<Self> {
        if home.id() == away.id() {
            return Err(LeagueError::ValidationError {
                message: format!("match {} has team {} on both sides", id, home.id()),
            });
        }

        Ok(Self {
            id,
            home,
            away,
            home_goals,
            away_goals,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn home(&self) -> &Team {
        &self.home
    }

    pub fn away(&self) -> &Team {
        &self.away
    }

    pub fn home_goals(&self) -> u32 {
        self.home_goals
    }

    pub fn away_goals(&self) -> u32 {
        self.away_goals
    }

    pub fn set_home_goals(&mut self, goals: u32) {
        self.home_goals = goals;
    }

    pub fn set_away_goals(&mut self, goals: u32) {
        self.away_goals = goals;
    }

    pub fn outcome(&self) -> Outcome {
        match self.home_goals.cmp(&self.away_goals) {
            std::cmp::Ordering::Greater => Outcome::HomeWin,
            std::cmp::Ordering::Equal => Outcome::Draw,
            std::cmp::Ordering::Less => Outcome::AwayWin,
        }
    }

    pub fn involves(&self, team_id: u32) -> bool {
        self.home.id() == team_id || self.away.id() == team_id
    }

    /// `(scored, conceded)` from the point of view of `team_id`, if it played.
    pub fn score_for(&self, team_id: u32) -> Option<(u32, u32)> {
        if self.home.id() == team_id {
            Some((self.home_goals, self.away_goals))
        } else if self.away.id() == team_id {
            Some((self.away_goals, self.home_goals))
        } else {
            None
        }
    }

    pub fn to_record(&self) -> MatchRecord {
        MatchRecord {
            id: self.id,
            home_id: self.home.id(),
            away_id: self.away.id(),
            home_goals: self.home_goals,
            away_goals: self.away_goals,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub team_id: u32,
    pub team_name: String,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u64,
    pub goals_against: u64,
}

impl Standing {
    pub fn new(team: &Team) -> Self {
        Self {
            team_id: team.id(),
            team_name: team.name().to_string(),
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
        }
    }

    /// Adds one match. Totals saturate instead of overflowing.
    pub fn record(&mut self, scored: u32, conceded: u32) {
        self.goals_for = self.goals_for.saturating_add(u64::from(scored));
        self.goals_against = self.goals_against.saturating_add(u64::from(conceded));

        let tally = match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => &mut self.wins,
            std::cmp::Ordering::Equal => &mut self.draws,
            std::cmp::Ordering::Less => &mut self.losses,
        };
        *tally = tally.saturating_add(1);
    }

    pub fn played(&self) -> u32 {
        self.wins.saturating_add(self.draws).saturating_add(self.losses)
    }

    pub fn points(&self) -> u32 {
        self.wins.saturating_mul(3).saturating_add(self.draws)
    }

    pub fn goal_difference(&self) -> i64 {
        let scored = i64::try_from(self.goals_for).unwrap_or(i64::MAX);
        let conceded = i64::try_from(self.goals_against).unwrap_or(i64::MAX);
        scored.saturating_sub(conceded)
    }
}

/// One row of the team file: `id;name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub id: u32,
    pub name: String,
}

impl TeamRecord {
    pub const HEADER: [&'static str; 2] = ["id", "name"];
}

/// One row of the match file: `id;home_id;away_id;home_goals;away_goals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: u32,
    pub home_id: u32,
    pub away_id: u32,
    pub home_goals: u32,
    pub away_goals: u32,
}

impl MatchRecord {
    pub const HEADER: [&'static str; 5] = ["id", "home_id", "away_id", "home_goals", "away_goals"];
}
