use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use fractic_server_error::ServerError;
use tracing::info;

use crate::errors::WriteError;

/// ex. "spendwise_backup_2024-05-01.json"
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("spendwise_backup_{}.json", date.format("%Y-%m-%d"))
}

pub(crate) struct ExportWriter;

impl ExportWriter {
    pub(crate) fn new() -> Self {
        Self
    }

    /// Writes the serialized snapshot into `dir`, replacing any backup from
    /// the same day.
    pub(crate) async fn write(
        &self,
        dir: &Path,
        date: NaiveDate,
        snapshot_json: &str,
    ) -> Result<PathBuf, ServerError> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| WriteError::with_debug(&e))?;
        let path = dir.join(backup_file_name(date));
        tokio::fs::write(&path, snapshot_json)
            .await
            .map_err(|e| WriteError::with_debug(&e))?;
        info!(path = %path.display(), "snapshot exported");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(backup_file_name(date), "spendwise_backup_2024-05-01.json");
    }

    #[tokio::test]
    async fn test_write_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("backups");
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        let path = ExportWriter::new()
            .write(&target, date, "{\n  \"debts\": []\n}")
            .await
            .unwrap();
        assert_eq!(path, target.join("spendwise_backup_2024-05-01.json"));
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "{\n  \"debts\": []\n}"
        );
    }
}
