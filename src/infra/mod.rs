// File adapters for the application ports

pub mod grouped_output_adapter;
pub mod json_record_source;

pub use grouped_output_adapter::{GroupedOutputAdapter, OutputFormat};
pub use json_record_source::JsonRecordSource;
