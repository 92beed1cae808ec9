use anyhow::Context;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::app::ports::GroupedOutputPort;
use crate::types::GroupedEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// A single JSON array
    Json { pretty: bool },
    /// One cluster per line
    Ndjson,
}

/// Writes grouped events into a file under `output_dir`, replacing any previous run
pub struct GroupedOutputAdapter {
    pub output_dir: PathBuf,
    pub format: OutputFormat,
}

impl GroupedOutputAdapter {
    pub fn new(output_dir: PathBuf, format: OutputFormat) -> Self {
        Self { output_dir, format }
    }

    pub fn output_path(&self) -> PathBuf {
        let file_name = match self.format {
            OutputFormat::Json { .. } => "grouped_events.json",
            OutputFormat::Ndjson => "grouped_events.ndjson",
        };
        self.output_dir.join(file_name)
    }

    async fn ensure_output_directory(&self, dir: &Path) -> anyhow::Result<()> {
        if !dir.exists() {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create output directory {:?}", dir))?;
            debug!("Created output directory: {:?}", dir);
        }
        Ok(())
    }

    fn render(&self, events: &[GroupedEvent]) -> anyhow::Result<String> {
        let rendered = match self.format {
            OutputFormat::Json { pretty: true } => serde_json::to_string_pretty(events)?,
            OutputFormat::Json { pretty: false } => serde_json::to_string(events)?,
            OutputFormat::Ndjson => {
                let mut out = String::new();
                for event in events {
                    out.push_str(&serde_json::to_string(event)?);
                    out.push('\n');
                }
                out
            }
        };
        Ok(rendered)
    }
}

#[async_trait]
impl GroupedOutputPort for GroupedOutputAdapter {
    async fn write_grouped(&self, events: &[GroupedEvent]) -> anyhow::Result<PathBuf> {
        self.ensure_output_directory(&self.output_dir).await?;

        let path = self.output_path();
        let body = self
            .render(events)
            .context("Failed to serialize grouped events")?;
        tokio::fs::write(&path, body)
            .await
            .with_context(|| format!("Failed to write output file {:?}", path))?;

        debug!("Wrote {} grouped events to {:?}", events.len(), path);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::group_events;
    use crate::types::RawEventRecord;
    use tempfile::TempDir;

    fn events() -> Vec<GroupedEvent> {
        let record = |id: &str, name: &str| RawEventRecord {
            id: id.to_string(),
            event_names: vec![name.to_string()],
            performers: Vec::new(),
            venues: Vec::new(),
            locations: Vec::new(),
            dates: vec!["2026-05-01".to_string()],
            times: Vec::new(),
            url: format!("https://example.com/{}", id),
            tickets: Vec::new(),
            image: None,
        };
        group_events(&[record("a", "Alpha"), record("b", "Bravo")])
    }

    #[tokio::test]
    async fn test_writes_ndjson_into_new_directory() {
        let dir = TempDir::new().unwrap();
        let adapter = GroupedOutputAdapter::new(dir.path().join("nested"), OutputFormat::Ndjson);

        let path = adapter.write_grouped(&events()).await.unwrap();
        let contents = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: GroupedEvent = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.display_names, vec!["Alpha"]);
    }

    #[tokio::test]
    async fn test_json_overwrites_previous_run() {
        let dir = TempDir::new().unwrap();
        let adapter =
            GroupedOutputAdapter::new(dir.path().to_path_buf(), OutputFormat::Json { pretty: true });

        adapter.write_grouped(&events()).await.unwrap();
        let path = adapter.write_grouped(&events()[..1]).await.unwrap();

        let parsed: Vec<GroupedEvent> =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(parsed.len(), 1);
    }
}
