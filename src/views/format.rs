use crate::domain::model::{Match, Standing};

pub const STANDINGS_HEADER: &str = "ID | Team        |  W |  D |  L | GF | GA |  GD | PTS";
pub const MATCH_HEADER: &str = "ID | Home        | Away        | HG | AG | R";
const RULE_WIDTH: usize = 54;

pub fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

pub fn standing_row(standing: &Standing) -> String {
    format!(
        "{:>2} | {:<11} | {:>2} | {:>2} | {:>2} | {:>2} | {:>2} | {:>3} | {:>3}",
        standing.team_id,
        standing.team_name,
        standing.wins,
        standing.draws,
        standing.losses,
        standing.goals_for,
        standing.goals_against,
        standing.goal_difference(),
        standing.points()
    )
}

pub fn match_row(game: &Match) -> String {
    format!(
        "{:>2} | {:<11} | {:<11} | {:>2} | {:>2} | {}",
        game.id(),
        game.home().name(),
        game.away().name(),
        game.home_goals(),
        game.away_goals(),
        game.outcome()
    )
}

/// `id | Home (h) x (a) Away`, with the goals given rather than stored.
pub fn score_line(game: &Match, home_goals: u32, away_goals: u32) -> String {
    format!(
        "{} | {} ({}) x ({}) {}",
        game.id(),
        game.home().name(),
        home_goals,
        away_goals,
        game.away().name()
    )
}
