use crate::collections::Sequence;
use crate::domain::model::Standing;
use crate::utils::error::{LeagueError, Result};
use crate::views::format;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Table,
    Csv,
    Tsv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = LeagueError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "table" => Ok(ExportFormat::Table),
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(LeagueError::InvalidConfigValueError {
                field: "format".to_string(),
                value: value.to_string(),
                reason: "Unsupported format. Valid formats: table, csv, tsv, json".to_string(),
            }),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Table => "table",
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        };
        f.write_str(name)
    }
}

/// Flat, ranked row as written by the delimited and JSON exports.
#[derive(Debug, Serialize)]
struct StandingRow<'a> {
    position: usize,
    id: u32,
    team: &'a str,
    played: u32,
    wins: u32,
    draws: u32,
    losses: u32,
    goals_for: u64,
    goals_against: u64,
    goal_difference: i64,
    points: u32,
}

#[derive(Debug, Serialize)]
struct StandingsReport<'a> {
    generated_at: String,
    teams: usize,
    standings: Vec<StandingRow<'a>>,
}

fn rows(standings: &Sequence<Standing>) -> Vec<StandingRow<'_>> {
    standings
        .iter()
        .enumerate()
        .map(|(index, standing)| StandingRow {
            position: index + 1,
            id: standing.team_id,
            team: &standing.team_name,
            played: standing.played(),
            wins: standing.wins,
            draws: standing.draws,
            losses: standing.losses,
            goals_for: standing.goals_for,
            goals_against: standing.goals_against,
            goal_difference: standing.goal_difference(),
            points: standing.points(),
        })
        .collect()
}

fn delimited(standings: &Sequence<Standing>, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    for row in rows(standings) {
        writer.serialize(row)?;
    }

    let bytes = writer.into_inner().map_err(|e| LeagueError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| LeagueError::ValidationError {
        message: format!("export produced invalid UTF-8: {}", e),
    })
}

/// Renders an already ranked table.
pub fn render(standings: &Sequence<Standing>, output_format: ExportFormat) -> Result<String> {
    tracing::debug!("Rendering {} standings as {}", standings.len(), output_format);

    match output_format {
        ExportFormat::Table => {
            let mut lines = vec![format::STANDINGS_HEADER.to_string(), format::rule()];
            lines.extend(standings.iter().map(format::standing_row));
            Ok(lines.join("\n") + "\n")
        }
        ExportFormat::Csv => delimited(standings, b','),
        ExportFormat::Tsv => delimited(standings, b'\t'),
        ExportFormat::Json => {
            let report = StandingsReport {
                generated_at: chrono::Utc::now().to_rfc3339(),
                teams: standings.len(),
                standings: rows(standings),
            };
            Ok(serde_json::to_string_pretty(&report)?)
        }
    }
}
