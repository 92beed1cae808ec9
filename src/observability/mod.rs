// Observability: metrics recording and export

pub mod metrics;

pub use self::metrics::{init as init_metrics, MetricName};
