use crate::collections::Sequence;
use crate::core::standings::{self, page, page_count};
use crate::core::{MatchRepository, TeamRepository};
use crate::domain::model::Standing;
use crate::utils::error::Result;
use crate::views::console::Console;
use crate::views::format;
use std::io::{BufRead, Write};

fn print_page<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    table: &Sequence<Standing>,
    current: usize,
    total: usize,
    page_size: usize,
) -> Result<()> {
    let shown = (current * page_size).min(table.len());

    console.blank()?;
    console.say(format!("Page {} of {}", current, total))?;
    console.say(format!("Remaining teams: {}", table.len() - shown))?;
    console.say(format::STANDINGS_HEADER)?;
    console.say(format::rule())?;

    if let Some(rows) = page(table, current, page_size) {
        for standing in &rows {
            console.say(format::standing_row(standing))?;
        }
    }
    Ok(())
}

/// Ranked table, one page at a time. The user types a page number or `Q`.
pub fn show_standings<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    teams: &TeamRepository,
    matches: &MatchRepository,
    page_size: usize,
) -> Result<()> {
    console.say("=== League Table ===")?;

    let table = standings::table(teams, matches);
    let total = page_count(table.len(), page_size);
    if total == 0 {
        return console.say("No teams registered.");
    }

    let mut current = 1;
    loop {
        print_page(console, &table, current, total, page_size)?;

        let Some(answer) = console.read_line("\nPage number or 'Q' to leave: ")? else {
            return Ok(());
        };
        let answer = answer.trim();

        if answer.eq_ignore_ascii_case("q") {
            return Ok(());
        }

        match answer.parse::<usize>() {
            Ok(requested) if (1..=total).contains(&requested) => current = requested,
            _ => {
                tracing::warn!("Rejected page {:?}", answer);
                console.say("Invalid page.")?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::memory::MemoryStore;
    use crate::domain::model::TeamRecord;
    use std::io::Cursor;

    fn run(team_count: u32, page_size: usize, input: &str) -> String {
        let records = (0..team_count)
            .map(|id| TeamRecord {
                id,
                name: format!("Team{}", id),
            })
            .collect();
        let store = MemoryStore::new(records, vec![]);
        let mut teams = TeamRepository::new();
        teams.start(&store).unwrap();
        let mut matches = MatchRepository::new();
        matches.start(&store, &teams).unwrap();

        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        show_standings(&mut console, &teams, &matches, page_size).unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_first_page_then_quit() {
        let output = run(7, 5, "q\n");

        assert!(output.contains("Page 1 of 2"));
        assert!(output.contains("Remaining teams: 2"));
        assert!(output.contains("Team4"));
        assert!(!output.contains("Team5"));
    }

    #[test]
    fn test_jump_to_last_page() {
        let output = run(7, 5, "2\nQ\n");

        assert!(output.contains("Page 2 of 2"));
        assert!(output.contains("Remaining teams: 0"));
        assert!(output.contains(" 6 | Team6"));
    }

    #[test]
    fn test_out_of_range_page() {
        let output = run(3, 5, "0\n2\nx\nq\n");

        assert_eq!(output.matches("Invalid page.").count(), 3);
    }

    #[test]
    fn test_no_teams() {
        assert!(run(0, 5, "").contains("No teams registered."));
    }
}
