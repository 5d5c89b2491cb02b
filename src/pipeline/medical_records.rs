use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::aggregate::{Bucket, ranking_value};
use crate::error::ReportResult;
use crate::filter::{self, ReportFilters};
use crate::report::{Report, ReportType};
use crate::store::ClinicStore;

const TOP_DIAGNOSES: usize = 10;

#[derive(Debug, Serialize)]
struct MedicalRecordRow {
    date: NaiveDate,
    patient: Option<String>,
    clinician: Option<String>,
    diagnosis: Option<String>,
    status: String,
    has_prescription: bool,
    has_requested_tests: bool,
}

#[tracing::instrument(
    name = "pipeline medical_records",
    skip(store, filters),
    fields(pipeline.stage = "medical_records", report.rows)
)]
pub async fn generate_medical_records_report(
    store: &dyn ClinicStore,
    filters: &ReportFilters,
) -> ReportResult<Report> {
    let query = filter::normalize(filters);
    let records = store.medical_records(&query).await?;

    let by_status = Bucket::group_by(&records, |r| Some(r.status.clone()));
    let by_diagnosis = Bucket::group_by(&records, |r| r.diagnosis.clone());

    let mut summary = Map::new();
    summary.insert("total_records".to_string(), json!(records.len()));
    summary.insert("by_status".to_string(), by_status.counts());
    summary.insert(
        "top_diagnoses".to_string(),
        ranking_value(&by_diagnosis.top_n(TOP_DIAGNOSES)),
    );

    let data = records
        .iter()
        .map(|r| {
            serde_json::to_value(MedicalRecordRow {
                date: r.record_date,
                patient: r.patient.as_ref().map(|p| p.full_name()),
                clinician: r.clinician.as_ref().map(|c| c.name.clone()),
                diagnosis: r.diagnosis.clone(),
                status: r.status.clone(),
                has_prescription: r.has_prescription(),
                has_requested_tests: r.has_requested_tests(),
            })
        })
        .collect::<Result<Vec<Value>, _>>()?;

    tracing::Span::current().record("report.rows", data.len());

    Ok(Report::assemble(
        ReportType::MedicalRecords,
        query.period,
        summary,
        data,
    ))
}
