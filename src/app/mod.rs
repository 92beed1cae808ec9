pub mod grouping_use_case;
pub mod ports;

pub use grouping_use_case::{GroupingRunResult, GroupingUseCase};
