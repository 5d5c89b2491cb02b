//! Report generation and export engine for clinic administrative data.
//!
//! Given raw records from five related domains (appointments, payments,
//! patients, clinicians, medical records), the engine filters, aggregates,
//! and serializes them into structured analytical reports in JSON or CSV.
//! Records are read through the [`store::ClinicStore`] contract; this crate
//! ships no storage implementation and holds no state across calls.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod pipeline;
pub mod report;
pub mod store;
pub mod telemetry;

pub use config::EngineConfig;
pub use error::{ReportError, ReportResult};
pub use export::{ExportFormat, ExportResult};
pub use filter::{RecordQuery, ReportFilters};
pub use pipeline::{
    export_report, generate_appointments_report, generate_clinicians_report,
    generate_financial_report, generate_medical_records_report, generate_patients_report,
    generate_report,
};
pub use report::{Period, Report, ReportType};
pub use store::{ClinicStore, FetchError, FetchResult};
