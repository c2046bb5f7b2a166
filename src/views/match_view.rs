use crate::collections::Sequence;
use crate::core::{AddMatchError, MatchRepository, TeamRepository};
use crate::domain::model::{Match, TEAM_NAME_MAX_LEN};
use crate::utils::error::Result;
use crate::views::console::Console;
use crate::views::format;
use std::io::{BufRead, Write};

/// Which side of a match a prefix search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
    Either,
}

fn search<'a>(matches: &'a MatchRepository, side: Side, prefix: &str) -> Sequence<&'a Match> {
    match side {
        Side::Home => matches.search_by_home(prefix),
        Side::Away => matches.search_by_away(prefix),
        Side::Either => matches.search_by_either(prefix),
    }
}

fn print_matches<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    found: &Sequence<&Match>,
) -> Result<()> {
    console.say(format::MATCH_HEADER)?;
    console.say(format::rule())?;
    for game in found {
        console.say(format::match_row(game))?;
    }
    Ok(())
}

/// Asks for home / away / either and returns `None` on cancel.
fn read_side<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Option<Side>> {
    console.say("1 - Home team")?;
    console.say("2 - Away team")?;
    console.say("3 - Home or away team")?;
    console.say("Q - Cancel")?;

    let side = match console.read_choice("Option: ", &['1', '2', '3', 'Q'])? {
        Some('1') => Some(Side::Home),
        Some('2') => Some(Side::Away),
        Some('3') => Some(Side::Either),
        _ => None,
    };
    Ok(side)
}

pub fn search_matches<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    matches: &MatchRepository,
) -> Result<()> {
    console.say("=== Search Matches ===")?;

    let Some(side) = read_side(console)? else {
        return console.say("Operation cancelled.");
    };
    let Some(prefix) = console.read_string("Team name prefix: ", TEAM_NAME_MAX_LEN)? else {
        return Ok(());
    };

    let found = search(matches, side, &prefix);
    if found.is_empty() {
        return console.say("No match found for that search.");
    }
    print_matches(console, &found)
}

/// Reads a goal count where `-` keeps `current`. Anything unreadable keeps it too.
fn read_goals<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    prompt: &str,
    current: u32,
) -> Result<Option<u32>> {
    let Some(answer) = console.read_line(prompt)? else {
        return Ok(None);
    };

    let answer = answer.trim();
    if answer == "-" {
        return Ok(Some(current));
    }

    match answer.parse::<u32>() {
        Ok(goals) => Ok(Some(goals)),
        Err(_) => {
            console.say(format!("Invalid value. Keeping previous goals ({}).", current))?;
            Ok(Some(current))
        }
    }
}

pub fn update_match<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    matches: &mut MatchRepository,
) -> Result<()> {
    console.say("=== Update Match ===")?;

    let Some(id) = console.read_u32("ID of the match to edit: ")? else {
        return Ok(());
    };

    let Some(game) = matches.get_by_id(id) else {
        return console.say(format!("Match with ID {} not found.", id));
    };
    let (home_goals, away_goals) = (game.home_goals(), game.away_goals());

    console.say("")?;
    console.say("Match found:")?;
    console.say(format::score_line(game, home_goals, away_goals))?;
    console.say("")?;
    console.say("Enter the new goal counts, or '-' to keep the current value.")?;

    let Some(new_home) = read_goals(console, "New home goals: ", home_goals)? else {
        return Ok(());
    };
    let Some(new_away) = read_goals(console, "New away goals: ", away_goals)? else {
        return Ok(());
    };

    if let Some(game) = matches.get_by_id(id) {
        console.say("")?;
        console.say("New result:")?;
        console.say(format::score_line(game, new_home, new_away))?;
    }

    match console.confirm("Confirm update? (Y/N): ")? {
        Some(true) => {
            matches.update_goals(id, new_home, new_away)?;
            console.say("Match updated successfully!")
        }
        _ => console.say("Operation cancelled."),
    }
}

/// Lists candidate matches, then removes one chosen by id among the listed ones.
pub fn delete_match<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    matches: &mut MatchRepository,
) -> Result<()> {
    console.say("=== Delete Match ===")?;
    console.say("List matches by:")?;
    console.say("1 - Home team")?;
    console.say("2 - Away team")?;
    console.say("3 - Home or away team")?;
    console.say("4 - All matches")?;
    console.say("Q - Cancel")?;

    let (side, by_prefix) = match console.read_choice("Option: ", &['1', '2', '3', '4', 'Q'])? {
        Some('1') => (Side::Home, true),
        Some('2') => (Side::Away, true),
        Some('3') => (Side::Either, true),
        Some('4') => (Side::Either, false),
        _ => return console.say("Operation cancelled."),
    };

    let prefix = if by_prefix {
        match console.read_string("Team name prefix: ", TEAM_NAME_MAX_LEN)? {
            Some(prefix) => prefix,
            None => return Ok(()),
        }
    } else {
        String::new()
    };

    let listed: Vec<u32> = {
        let found = search(matches, side, &prefix);
        if found.is_empty() {
            return console.say("No match found for that search.");
        }
        print_matches(console, &found)?;
        found.iter().map(|game| game.id()).collect()
    };

    let Some(id) = console.read_u32("ID of the match to delete: ")? else {
        return Ok(());
    };
    if !listed.contains(&id) {
        return console.say(format!("Match {} is not in the list above.", id));
    }

    match console.confirm("Confirm removal? (Y/N): ")? {
        Some(true) => match matches.remove_by_id(id) {
            Some(_) => console.say("Match removed successfully!"),
            None => console.say(format!("Match with ID {} not found.", id)),
        },
        _ => console.say("Operation cancelled."),
    }
}

fn describe(error: AddMatchError) -> String {
    match error {
        AddMatchError::NotStarted => {
            "Internal error: the match repository was not started.".to_string()
        }
        AddMatchError::TransactionOpen => {
            "Internal error: another insert transaction was not closed.".to_string()
        }
        AddMatchError::OutOfMemory => "Error: not enough memory for a new match.".to_string(),
        AddMatchError::IdsExhausted => {
            "Error: no match id is left for a new match.".to_string()
        }
        AddMatchError::SameTeam => "Error: home and away teams cannot be the same.".to_string(),
        AddMatchError::HomeNotFound(id) => format!("Error: home team (ID {}) does not exist.", id),
        AddMatchError::AwayNotFound(id) => format!("Error: away team (ID {}) does not exist.", id),
        AddMatchError::NothingStaged => "Internal error: no match was staged.".to_string(),
    }
}

/// Stages a match, shows it, and commits or rolls back on confirmation.
pub fn insert_match<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    teams: &TeamRepository,
    matches: &mut MatchRepository,
) -> Result<()> {
    console.say("=== Insert Match ===")?;

    let mut values = [0u32; 4];
    let prompts = [
        "Home team ID: ",
        "Away team ID: ",
        "Home goals: ",
        "Away goals: ",
    ];
    for (value, prompt) in values.iter_mut().zip(prompts) {
        match console.read_u32(prompt)? {
            Some(read) => *value = read,
            None => return Ok(()),
        }
    }
    let [home_id, away_id, home_goals, away_goals] = values;

    let mut transaction = match matches.start_insert_transaction() {
        Ok(transaction) => transaction,
        Err(e) => return console.say(describe(e)),
    };

    let preview = match transaction.add_match(teams, home_id, away_id, home_goals, away_goals) {
        Ok(staged) => format::match_row(staged),
        Err(e) => {
            tracing::warn!("Match not staged: {}", e);
            return console.say(describe(e));
        }
    };

    console.say("Confirm inserting the match below?")?;
    console.say(format::MATCH_HEADER)?;
    console.say(format::rule())?;
    console.say(preview)?;

    match console.confirm("(Y/N): ")? {
        Some(true) => match transaction.commit() {
            Ok(id) => console.say(format!("Match {} inserted successfully!", id)),
            Err(e) => {
                transaction.rollback();
                console.say(describe(e))
            }
        },
        _ => {
            transaction.rollback();
            console.say("Operation cancelled.")
        }
    }
}
