use crate::core::{League, RecordStore};
use crate::utils::error::Result;
use crate::views::console::Console;
use crate::views::{match_view, standings_view, team_view};
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    SearchTeams,
    SearchMatches,
    UpdateMatch,
    DeleteMatch,
    InsertMatch,
    Standings,
    AddTeam,
    Save,
    Quit,
}

impl MenuChoice {
    pub const KEYS: [char; 9] = ['1', '2', '3', '4', '5', '6', '7', 'S', 'Q'];

    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_uppercase() {
            '1' => Some(MenuChoice::SearchTeams),
            '2' => Some(MenuChoice::SearchMatches),
            '3' => Some(MenuChoice::UpdateMatch),
            '4' => Some(MenuChoice::DeleteMatch),
            '5' => Some(MenuChoice::InsertMatch),
            '6' => Some(MenuChoice::Standings),
            '7' => Some(MenuChoice::AddTeam),
            'S' => Some(MenuChoice::Save),
            'Q' => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

fn print_menu<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<()> {
    let banner = "=".repeat(37);

    console.blank()?;
    console.say(&banner)?;
    console.say("             MAIN MENU")?;
    console.say(&banner)?;
    console.say("1 - Search teams")?;
    console.say("2 - Search matches")?;
    console.say("3 - Update match")?;
    console.say("4 - Delete match")?;
    console.say("5 - Insert match")?;
    console.say("6 - League table")?;
    console.say("7 - Add team")?;
    console.say("S - Save")?;
    console.say("Q - Quit")?;
    console.say(&banner)
}

/// Main loop. Returns when the user quits or the input runs out.
pub fn run<S, R, W>(console: &mut Console<R, W>, league: &mut League<S>, page_size: usize) -> Result<()>
where
    S: RecordStore,
    R: BufRead,
    W: Write,
{
    loop {
        print_menu(console)?;

        let Some(choice) = console
            .read_choice("Option: ", &MenuChoice::KEYS)?
            .and_then(MenuChoice::from_key)
        else {
            return Ok(());
        };
        tracing::debug!("Menu choice {:?}", choice);

        match choice {
            MenuChoice::SearchTeams => team_view::search_teams(console, &league.teams, &league.matches)?,
            MenuChoice::SearchMatches => match_view::search_matches(console, &league.matches)?,
            MenuChoice::UpdateMatch => match_view::update_match(console, &mut league.matches)?,
            MenuChoice::DeleteMatch => match_view::delete_match(console, &mut league.matches)?,
            MenuChoice::InsertMatch => {
                match_view::insert_match(console, &league.teams, &mut league.matches)?
            }
            MenuChoice::Standings => {
                standings_view::show_standings(console, &league.teams, &league.matches, page_size)?
            }
            MenuChoice::AddTeam => team_view::add_team(console, &mut league.teams)?,
            MenuChoice::Save => match league.save() {
                Ok(()) => console.say("League saved.")?,
                Err(e) => {
                    tracing::error!("Save failed: {}", e);
                    console.say(format!("Error: {}", e.user_friendly_message()))?;
                }
            },
            MenuChoice::Quit => return Ok(()),
        }
    }
}
