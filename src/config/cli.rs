use crate::core::{ConfigProvider, RecordStore};
use crate::domain::model::{MatchRecord, TeamRecord};
use crate::utils::error::{LeagueError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Team and match files on the local disk, one header line each.
#[derive(Debug, Clone)]
pub struct CsvStorage {
    teams_path: PathBuf,
    matches_path: PathBuf,
    delimiter: u8,
}

impl CsvStorage {
    pub fn new(teams_path: impl Into<PathBuf>, matches_path: impl Into<PathBuf>, delimiter: u8) -> Self {
        Self {
            teams_path: teams_path.into(),
            matches_path: matches_path.into(),
            delimiter,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.teams_file(), config.matches_file(), config.delimiter())
    }

    pub fn teams_path(&self) -> &Path {
        &self.teams_path
    }

    pub fn matches_path(&self) -> &Path {
        &self.matches_path
    }

    fn read<T: DeserializeOwned>(&self, path: &Path, file: &str) -> Result<Vec<T>> {
        tracing::debug!("Reading {} from {}", file, path.display());

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let malformed = |reason: String| LeagueError::MalformedRecord {
                file: file.to_string(),
                record: index + 1,
                reason,
            };

            let record = result.map_err(|e| malformed(e.to_string()))?;
            let row = record
                .deserialize(None)
                .map_err(|e| malformed(e.to_string()))?;
            rows.push(row);
        }

        Ok(rows)
    }

    fn write<T: Serialize>(&self, path: &Path, header: &[&str], rows: &[T]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .from_writer(File::create(path)?);

        writer.write_record(header)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        tracing::debug!("Wrote {} rows to {}", rows.len(), path.display());
        Ok(())
    }
}

impl RecordStore for CsvStorage {
    fn load_teams(&self) -> Result<Vec<TeamRecord>> {
        self.read(&self.teams_path, "teams")
    }

    fn load_matches(&self) -> Result<Vec<MatchRecord>> {
        self.read(&self.matches_path, "matches")
    }

    fn save_teams(&self, teams: &[TeamRecord]) -> Result<()> {
        self.write(&self.teams_path, &TeamRecord::HEADER, teams)
    }

    fn save_matches(&self, matches: &[MatchRecord]) -> Result<()> {
        self.write(&self.matches_path, &MatchRecord::HEADER, matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage(dir: &TempDir) -> CsvStorage {
        CsvStorage::new(
            dir.path().join("teams.csv"),
            dir.path().join("matches.csv"),
            b';',
        )
    }

    #[test]
    fn test_load_teams_with_header() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("teams.csv"), "id;name\n0;Santos\n1; Bahia \n").unwrap();

        let teams = storage(&dir).load_teams().unwrap();

        assert_eq!(teams.len(), 2);
        assert_eq!(teams[1].id, 1);
        assert_eq!(teams[1].name, "Bahia");
    }

    #[test]
    fn test_load_reports_malformed_line() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("matches.csv"),
            "id;home_id;away_id;home_goals;away_goals\n0;0;1;2;1\n1;0;x;0;0\n",
        )
        .unwrap();

        let result = storage(&dir).load_matches();

        match result {
            Err(LeagueError::MalformedRecord { file, record, .. }) => {
                assert_eq!(file, "matches");
                assert_eq!(record, 2);
            }
            other => panic!("expected a malformed record, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();

        assert!(storage(&dir).load_teams().is_err());
    }

    #[test]
    fn test_save_writes_header_and_creates_directories() {
        let dir = TempDir::new().unwrap();
        let store = CsvStorage::new(
            dir.path().join("nested/teams.csv"),
            dir.path().join("nested/matches.csv"),
            b';',
        );

        store
            .save_matches(&[MatchRecord {
                id: 3,
                home_id: 0,
                away_id: 1,
                home_goals: 2,
                away_goals: 2,
            }])
            .unwrap();

        let content = fs::read_to_string(store.matches_path()).unwrap();
        assert_eq!(content, "id;home_id;away_id;home_goals;away_goals\n3;0;1;2;2\n");
    }

    #[test]
    fn test_save_empty_file_keeps_header() {
        let dir = TempDir::new().unwrap();
        let store = storage(&dir);

        store.save_teams(&[]).unwrap();

        assert_eq!(fs::read_to_string(store.teams_path()).unwrap(), "id;name\n");
        assert!(store.load_teams().unwrap().is_empty());
    }
}
