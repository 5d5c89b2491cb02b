use chrono::{NaiveDate, Utc};
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::aggregate::{Bucket, age_histogram, histogram_value, ranking_value};
use crate::error::ReportResult;
use crate::filter::{self, ReportFilters};
use crate::report::{Report, ReportType};
use crate::store::ClinicStore;

const TOP_INSURERS: usize = 10;

#[derive(Debug, Serialize)]
struct PatientRow {
    name: String,
    gender: Option<String>,
    age: u32,
    insurance_provider: Option<String>,
    registered_on: NaiveDate,
    total_visits: u32,
    last_visit: Option<NaiveDate>,
}

#[tracing::instrument(
    name = "pipeline patients",
    skip(store, filters),
    fields(pipeline.stage = "patients", report.rows)
)]
pub async fn generate_patients_report(
    store: &dyn ClinicStore,
    filters: &ReportFilters,
) -> ReportResult<Report> {
    let query = filter::normalize(filters);
    let patients = store.active_patients(&query).await?;
    let today = Utc::now().date_naive();

    let by_gender = Bucket::group_by(&patients, |p| p.gender.clone());
    let by_insurer = Bucket::group_by(&patients, |p| p.insurance_provider.clone());
    let bands = age_histogram(patients.iter().map(|p| p.age_on(today)));

    let mut summary = Map::new();
    summary.insert("total_patients".to_string(), json!(patients.len()));
    summary.insert("by_gender".to_string(), by_gender.counts());
    summary.insert(
        "top_insurance_providers".to_string(),
        ranking_value(&by_insurer.top_n(TOP_INSURERS)),
    );
    summary.insert("age_distribution".to_string(), histogram_value(&bands));

    let data = patients
        .iter()
        .map(|p| {
            serde_json::to_value(PatientRow {
                name: p.full_name(),
                gender: p.gender.clone(),
                age: p.age_on(today),
                insurance_provider: p.insurance_provider.clone(),
                registered_on: p.registered_on,
                total_visits: p.total_visits,
                last_visit: p.last_visit,
            })
        })
        .collect::<Result<Vec<Value>, _>>()?;

    tracing::Span::current().record("report.rows", data.len());

    Ok(Report::assemble(
        ReportType::Patients,
        query.period,
        summary,
        data,
    ))
}
