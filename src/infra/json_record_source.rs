use anyhow::Context;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use crate::app::ports::RecordSourcePort;
use crate::types::RawEventRecord;

/// Reads records from a JSON array file or an NDJSON file (one record per line)
pub struct JsonRecordSource {
    pub path: PathBuf,
}

impl JsonRecordSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn parse(&self, contents: &str) -> anyhow::Result<Vec<RawEventRecord>> {
        if contents.trim_start().starts_with('[') {
            return serde_json::from_str(contents)
                .with_context(|| format!("Failed to parse JSON array in {:?}", self.path));
        }

        let mut records = Vec::new();
        for (idx, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record: RawEventRecord = serde_json::from_str(line)
                .with_context(|| format!("Failed to parse line {} of {:?}", idx + 1, self.path))?;
            records.push(record);
        }
        Ok(records)
    }
}

#[async_trait]
impl RecordSourcePort for JsonRecordSource {
    async fn load_records(&self) -> anyhow::Result<Vec<RawEventRecord>> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read input file {:?}", self.path))?;
        let records = self.parse(&contents)?;
        debug!("Read {} records from {:?}", records.len(), self.path);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_reads_ndjson() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"id":"1","dates":["2026-05-01"],"url":"https://a.example/1"}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"id":"2","dates":["2026-05-02"],"url":"https://a.example/2"}}"#).unwrap();

        let source = JsonRecordSource::new(file.path().to_path_buf());
        let records = source.load_records().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id, "2");
    }

    #[tokio::test]
    async fn test_bad_line_reports_position() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"id":"1","dates":["2026-05-01"],"url":"u"}}"#).unwrap();
        writeln!(file, "not json").unwrap();

        let source = JsonRecordSource::new(file.path().to_path_buf());
        let err = source.load_records().await.unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
