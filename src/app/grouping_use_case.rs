use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use crate::app::ports::{GroupedOutputPort, RecordSourcePort};
use crate::config::Config;
use crate::grouping::group_events_with;
use crate::observability::metrics;
use crate::pipeline::prepare;
use crate::upcoming::filter_upcoming;

/// Summary of one grouping run
#[derive(Debug, Clone, Serialize)]
pub struct GroupingRunResult {
    pub records_loaded: usize,
    pub records_rejected: usize,
    pub duplicate_urls: usize,
    pub clusters: usize,
    pub past_clusters_dropped: usize,
    pub output: PathBuf,
}

/// Load → clean → sort → group → drop past → write
pub struct GroupingUseCase {
    source: Arc<dyn RecordSourcePort>,
    output: Arc<dyn GroupedOutputPort>,
    config: Config,
}

impl GroupingUseCase {
    pub fn new(
        source: Arc<dyn RecordSourcePort>,
        output: Arc<dyn GroupedOutputPort>,
        config: Config,
    ) -> Self {
        Self {
            source,
            output,
            config,
        }
    }

    /// Run the whole batch. `now` decides which occurrences count as past
    /// when past filtering is enabled.
    #[instrument(skip(self))]
    pub async fn run(&self, now: DateTime<Utc>) -> Result<GroupingRunResult> {
        let raw = self.source.load_records().await?;
        info!("Loaded {} raw records", raw.len());
        metrics::pipeline::records_loaded(raw.len() as u64);

        let prepared = prepare(&raw);
        metrics::pipeline::records_rejected(prepared.rejected as u64);
        metrics::pipeline::duplicate_urls(prepared.duplicates as u64);
        debug!(
            "{} records after cleaning ({} rejected, {} duplicate URLs)",
            prepared.records.len(),
            prepared.rejected,
            prepared.duplicates
        );

        let mut events = group_events_with(&prepared.records, &self.config.grouping);

        let mut past_clusters_dropped = 0;
        if self.config.timezone.filter_past {
            let before = events.len();
            events = filter_upcoming(events, now, self.config.grouping.min_common_name_chars);
            past_clusters_dropped = before - events.len();
            metrics::pipeline::past_clusters_dropped(past_clusters_dropped as u64);
            info!("Dropped {} clusters that are entirely past", past_clusters_dropped);
        }

        let output = match self.output.write_grouped(&events).await {
            Ok(path) => path,
            Err(e) => {
                error!("Failed to write grouped events: {}", e);
                return Err(e);
            }
        };
        metrics::pipeline::clusters_written(events.len() as u64);
        info!("Wrote {} clusters to {}", events.len(), output.display());

        Ok(GroupingRunResult {
            records_loaded: raw.len(),
            records_rejected: prepared.rejected,
            duplicate_urls: prepared.duplicates,
            clusters: events.len(),
            past_clusters_dropped,
            output,
        })
    }
}
