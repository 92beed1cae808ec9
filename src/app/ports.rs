use async_trait::async_trait;
use std::path::PathBuf;

use crate::types::{GroupedEvent, RawEventRecord};

/// Where raw listings come from
#[async_trait]
pub trait RecordSourcePort: Send + Sync {
    async fn load_records(&self) -> anyhow::Result<Vec<RawEventRecord>>;
}

/// Where finished clusters go. Returns the location written to.
#[async_trait]
pub trait GroupedOutputPort: Send + Sync {
    async fn write_grouped(&self, events: &[GroupedEvent]) -> anyhow::Result<PathBuf>;
}
