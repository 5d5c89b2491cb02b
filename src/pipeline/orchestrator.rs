use opentelemetry::KeyValue;

use crate::config::EngineConfig;
use crate::error::ReportResult;
use crate::export::{self, ExportFormat, ExportResult};
use crate::filter::ReportFilters;
use crate::report::{Report, ReportType};
use crate::store::ClinicStore;
use crate::telemetry::{REPORT_FAILURES, REPORT_GENERATION_DURATION, REPORT_ROWS};

use super::{appointments, clinicians, financial, medical_records, patients};

/// Dispatches a report type to its assembler pipeline and records domain
/// metrics. Any pipeline failure propagates unchanged; nothing partial is
/// returned.
#[tracing::instrument(
    name = "pipeline report",
    skip(store, filters),
    fields(report.type = %report_type, report.rows, report.duration_ms)
)]
pub async fn generate_report(
    store: &dyn ClinicStore,
    report_type: ReportType,
    filters: &ReportFilters,
) -> ReportResult<Report> {
    let start = std::time::Instant::now();

    let result = match report_type {
        ReportType::Appointments => {
            appointments::generate_appointments_report(store, filters).await
        }
        ReportType::Financial => financial::generate_financial_report(store, filters).await,
        ReportType::Patients => patients::generate_patients_report(store, filters).await,
        ReportType::Clinicians => clinicians::generate_clinicians_report(store, filters).await,
        ReportType::MedicalRecords => {
            medical_records::generate_medical_records_report(store, filters).await
        }
    };

    let duration = start.elapsed();
    let type_attr = [KeyValue::new("report.type", report_type.as_str())];

    match &result {
        Ok(report) => {
            REPORT_GENERATION_DURATION.record(duration.as_secs_f64(), &type_attr);
            REPORT_ROWS.record(report.data.len() as f64, &type_attr);

            let span = tracing::Span::current();
            span.record("report.rows", report.data.len());
            span.record("report.duration_ms", duration.as_millis() as u64);
        }
        Err(error) => {
            REPORT_FAILURES.add(1, &type_attr);
            tracing::error!(error = %error, report_type = %report_type, "report generation failed");
        }
    }

    result
}

/// The one public export entry point: selects the pipeline by type name,
/// generates the report, and renders it in the requested encoding.
///
/// An unrecognized report type is a caller error. An unrecognized format
/// name falls back to JSON (see `ExportFormat::from_name`).
pub async fn export_report(
    store: &dyn ClinicStore,
    config: &EngineConfig,
    report_type: &str,
    format: &str,
    filters: &ReportFilters,
) -> ReportResult<ExportResult> {
    let report_type: ReportType = report_type.parse()?;
    let format = ExportFormat::from_name(format);

    tracing::info!(
        app = %config.app_name,
        report_type = %report_type,
        format = format.extension(),
        "exporting report"
    );

    let report = generate_report(store, report_type, filters).await?;
    export::render(&report, format)
}
