use crate::core::{HolidayProvider, HolidaySet, Result};
use async_trait::async_trait;
use std::path::PathBuf;

/// Reads holidays from a local JSON file in the same format the remote
/// source serves.
#[derive(Debug, Clone)]
pub struct FileHolidayProvider {
    path: PathBuf,
}

impl FileHolidayProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl HolidayProvider for FileHolidayProvider {
    async fn fetch_holidays(&self) -> Result<HolidaySet> {
        tracing::debug!("Reading holidays from: {}", self.path.display());
        let data = tokio::fs::read(&self.path).await?;
        let entries: Vec<String> = serde_json::from_slice(&data)?;
        Ok(HolidaySet::from_strings(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::WorkingDaysError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_read_holiday_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"["2025-12-08", "2025-12-25"]"#).unwrap();

        let holidays = FileHolidayProvider::new(file.path())
            .fetch_holidays()
            .await
            .unwrap();
        assert_eq!(holidays.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = FileHolidayProvider::new("/nonexistent/holidays.json")
            .fetch_holidays()
            .await
            .unwrap_err();
        assert!(matches!(err, WorkingDaysError::IoError(_)));
    }
}
