pub mod metrics;

pub use metrics::{REPORT_FAILURES, REPORT_GENERATION_DURATION, REPORT_ROWS};
