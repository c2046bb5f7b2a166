use crate::collections::Sequence;
use crate::core::match_repo::MatchRepository;
use crate::core::team_repo::TeamRepository;
use crate::domain::model::{Standing, Team};
use std::cmp::Ordering;

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Points first; on equal points the lower team id ranks higher.
pub fn compare_standings(a: &Standing, b: &Standing) -> Ordering {
    a.points()
        .cmp(&b.points())
        .then_with(|| b.team_id.cmp(&a.team_id))
}

fn tally(team: &Team, matches: &MatchRepository) -> Standing {
    let mut standing = Standing::new(team);

    for game in matches.search_by_team(team.id()) {
        if let Some((scored, conceded)) = game.score_for(team.id()) {
            standing.record(scored, conceded);
        }
    }

    standing
}

/// One standing per team, in team load order.
pub fn compute(teams: &TeamRepository, matches: &MatchRepository) -> Sequence<Standing> {
    let standings: Sequence<Standing> = teams
        .all()
        .into_iter()
        .flat_map(|all| all.iter())
        .map(|team| tally(team, matches))
        .collect();

    tracing::debug!("Computed standings for {} teams", standings.len());
    standings
}

pub fn rank(standings: &mut Sequence<Standing>) {
    standings.exchange_sort_by(compare_standings);
}

/// Ranked league table.
pub fn table(teams: &TeamRepository, matches: &MatchRepository) -> Sequence<Standing> {
    let mut standings = compute(teams, matches);
    rank(&mut standings);
    standings
}

pub fn standing_for(
    teams: &TeamRepository,
    matches: &MatchRepository,
    team_id: u32,
) -> Option<Standing> {
    teams.get_by_id(team_id).map(|team| tally(&team, matches))
}

pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// The 1-based `page` of `items`; the last page may be short. `None` past
/// the end, for page 0 or for a zero page size.
pub fn page<T>(items: &Sequence<T>, page: usize, page_size: usize) -> Option<Sequence<&T>> {
    if page == 0 || page_size == 0 {
        return None;
    }

    let start = (page - 1).checked_mul(page_size)?;
    if start >= items.len() {
        return None;
    }
    let end = start.saturating_add(page_size).min(items.len());

    items.copy_range(start, end)
}
