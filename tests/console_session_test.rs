use small_league::views::{menu, Console};
use small_league::{CsvStorage, League};
use std::fs;
use std::io::Cursor;
use tempfile::TempDir;

fn session(input: &str, league: &mut League<CsvStorage>) -> anyhow::Result<String> {
    let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
    menu::run(&mut console, league, 5)?;
    Ok(String::from_utf8(console.into_output())?)
}

fn league(dir: &TempDir) -> anyhow::Result<League<CsvStorage>> {
    let teams_path = dir.path().join("teams.csv");
    let matches_path = dir.path().join("matches.csv");
    fs::write(&teams_path, "id;name\n0;Santos\n1;Sport\n2;Bahia\n")?;
    fs::write(
        &matches_path,
        "id;home_id;away_id;home_goals;away_goals\n0;0;1;1;0\n",
    )?;

    let mut league = League::new(CsvStorage::new(teams_path, matches_path, b';'));
    league.start()?;
    Ok(league)
}

#[test]
fn test_insert_then_view_table_then_save() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let mut league = league(&temp_dir)?;

    // insert Bahia 3 x 0 Santos, confirm, open the table, leave it, save, quit
    let output = session("5\n2\n0\n3\n0\ny\n6\nq\ns\nq\n", &mut league)?;

    assert!(output.contains("Match 1 inserted successfully!"));
    assert!(output.contains("Page 1 of 1"));
    assert!(output.contains("League saved."));

    let saved = fs::read_to_string(league.store().matches_path())?;
    assert!(saved.ends_with("1;2;0;3;0\n"));
    Ok(())
}

#[test]
fn test_cancelled_insert_is_not_saved() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let mut league = league(&temp_dir)?;

    let output = session("5\n1\n2\n1\n1\nn\ns\nq\n", &mut league)?;

    assert!(output.contains("Operation cancelled."));
    let saved = fs::read_to_string(league.store().matches_path())?;
    assert_eq!(saved.lines().count(), 2);
    Ok(())
}

#[test]
fn test_search_team_then_end_of_input() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let mut league = league(&temp_dir)?;

    let output = session("1\nS\n", &mut league)?;

    assert!(output.contains("Santos"));
    assert!(output.contains("Sport"));
    assert!(!output.contains(" 2 | Bahia"));
    Ok(())
}

#[test]
fn test_delete_and_update_through_menu() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let mut league = league(&temp_dir)?;

    session("3\n0\n2\n-\ny\nq\n", &mut league)?;
    assert_eq!(league.matches.get_by_id(0).map(|m| m.home_goals()), Some(2));

    session("4\n4\n0\ny\nq\n", &mut league)?;
    assert!(league.matches.is_empty());
    assert_eq!(league.teams.len(), 3);
    Ok(())
}
