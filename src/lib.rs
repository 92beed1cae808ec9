pub mod config;
pub mod constants;
pub mod dates;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod types;

// Text canonicalization and display-name merging
pub mod merge;
pub mod text;

// The clustering engine and what runs on its output
pub mod grouping;
pub mod timezone;
pub mod upcoming;

pub mod observability;

// Application use case and file adapters
pub mod app;
pub mod infra;

pub use grouping::{group_events, group_events_with, EventGrouper, GroupingStats, ResolutionDecision};
pub use types::{GroupedEvent, RawEventRecord};
