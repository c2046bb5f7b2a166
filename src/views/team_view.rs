use crate::core::standings;
use crate::core::{MatchRepository, TeamRepository};
use crate::domain::model::TEAM_NAME_MAX_LEN;
use crate::utils::error::Result;
use crate::views::console::Console;
use crate::views::format;
use std::io::{BufRead, Write};

/// Lists teams whose name starts with a prefix, each with its season record.
pub fn search_teams<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    teams: &TeamRepository,
    matches: &MatchRepository,
) -> Result<()> {
    console.say("=== Search Teams by Prefix ===")?;

    let Some(prefix) = console.read_string("Team name prefix: ", TEAM_NAME_MAX_LEN)? else {
        return Ok(());
    };

    let found = teams.search_by_prefix(&prefix);
    if found.is_empty() {
        console.say(format!("No team found with prefix \"{}\".", prefix))?;
        return Ok(());
    }

    console.say(format::STANDINGS_HEADER)?;
    console.say(format::rule())?;
    for team in &found {
        if let Some(standing) = standings::standing_for(teams, matches, team.id()) {
            console.say(format::standing_row(&standing))?;
        }
    }
    Ok(())
}

pub fn add_team<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    teams: &mut TeamRepository,
) -> Result<()> {
    console.say("=== Add Team ===")?;

    let Some(name) = console.read_string("Team name: ", TEAM_NAME_MAX_LEN)? else {
        return Ok(());
    };

    match teams.add(name.trim()) {
        Ok(team) => console.say(format!("Team {} added with ID {}.", team.name(), team.id())),
        Err(e) => {
            tracing::warn!("Team not added: {}", e);
            console.say(format!("Error: {}", e.user_friendly_message()))
        }
    }
}
