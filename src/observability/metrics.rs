//! Metrics for the grouping engine and its shell
//!
//! Recording goes through the `metrics` facade; nothing is exported unless a
//! recorder is installed with [`init`].

use std::fmt;
use std::net::SocketAddr;
use tracing::{info, warn};

/// Enum representing all metric names used in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Grouping engine
    GroupingRecordsProcessed,
    GroupingClustersCreated,
    GroupingRecentMatches,
    GroupingRangeMatches,
    GroupingDuration,

    // Timezone resolution
    TimezoneFallbacks,

    // Shell
    PipelineRecordsLoaded,
    PipelineRecordsRejected,
    PipelineDuplicateUrls,
    PipelineClustersWritten,
    PipelinePastClustersDropped,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::GroupingRecordsProcessed => "gig_records_processed_total",
            MetricName::GroupingClustersCreated => "gig_clusters_created_total",
            MetricName::GroupingRecentMatches => "gig_pass1_matches_total",
            MetricName::GroupingRangeMatches => "gig_pass2_matches_total",
            MetricName::GroupingDuration => "gig_grouping_duration_seconds",

            MetricName::TimezoneFallbacks => "gig_timezone_fallbacks_total",

            MetricName::PipelineRecordsLoaded => "gig_pipeline_records_loaded_total",
            MetricName::PipelineRecordsRejected => "gig_pipeline_records_rejected_total",
            MetricName::PipelineDuplicateUrls => "gig_pipeline_duplicate_urls_total",
            MetricName::PipelineClustersWritten => "gig_pipeline_clusters_written_total",
            MetricName::PipelinePastClustersDropped => "gig_pipeline_past_clusters_dropped_total",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Install the Prometheus exporter on `0.0.0.0:port`
pub fn init(port: u16) {
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => info!("Prometheus exporter listening on http://{}/metrics", addr),
        Err(e) => warn!("Prometheus exporter install failed: {}", e),
    }
}

pub mod grouping {
    use super::MetricName;

    pub fn records_processed(count: u64) {
        ::metrics::counter!(MetricName::GroupingRecordsProcessed.as_str()).increment(count);
    }

    pub fn clusters_created(count: u64) {
        ::metrics::counter!(MetricName::GroupingClustersCreated.as_str()).increment(count);
    }

    pub fn recent_matches(count: u64) {
        ::metrics::counter!(MetricName::GroupingRecentMatches.as_str()).increment(count);
    }

    pub fn range_matches(count: u64) {
        ::metrics::counter!(MetricName::GroupingRangeMatches.as_str()).increment(count);
    }

    pub fn duration(secs: f64) {
        ::metrics::histogram!(MetricName::GroupingDuration.as_str()).record(secs);
    }
}

pub mod timezone {
    use super::MetricName;

    pub fn fallback() {
        ::metrics::counter!(MetricName::TimezoneFallbacks.as_str()).increment(1);
    }
}

pub mod pipeline {
    use super::MetricName;

    pub fn records_loaded(count: u64) {
        ::metrics::counter!(MetricName::PipelineRecordsLoaded.as_str()).increment(count);
    }

    pub fn records_rejected(count: u64) {
        ::metrics::counter!(MetricName::PipelineRecordsRejected.as_str()).increment(count);
    }

    pub fn duplicate_urls(count: u64) {
        ::metrics::counter!(MetricName::PipelineDuplicateUrls.as_str()).increment(count);
    }

    pub fn clusters_written(count: u64) {
        ::metrics::counter!(MetricName::PipelineClustersWritten.as_str()).increment(count);
    }

    pub fn past_clusters_dropped(count: u64) {
        ::metrics::counter!(MetricName::PipelinePastClustersDropped.as_str()).increment(count);
    }
}
