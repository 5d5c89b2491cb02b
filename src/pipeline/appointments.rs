use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::aggregate::Bucket;
use crate::error::ReportResult;
use crate::filter::{self, ReportFilters};
use crate::report::{Report, ReportType};
use crate::store::ClinicStore;

#[derive(Debug, Serialize)]
struct AppointmentRow {
    date: NaiveDate,
    time: String,
    patient: Option<String>,
    clinician: Option<String>,
    status: String,
    #[serde(rename = "type")]
    appointment_type: String,
    duration_minutes: Option<u32>,
    price: Option<String>,
}

#[tracing::instrument(
    name = "pipeline appointments",
    skip(store, filters),
    fields(pipeline.stage = "appointments", report.rows)
)]
pub async fn generate_appointments_report(
    store: &dyn ClinicStore,
    filters: &ReportFilters,
) -> ReportResult<Report> {
    let query = filter::normalize(filters);
    let appointments = store.appointments(&query).await?;

    let by_status = Bucket::group_by(&appointments, |a| Some(a.status.clone()));
    let by_type = Bucket::group_by(&appointments, |a| Some(a.appointment_type.clone()));
    let by_clinician =
        Bucket::group_by(&appointments, |a| a.clinician.as_ref().map(|c| c.name.clone()));

    let mut summary = Map::new();
    summary.insert("total_appointments".to_string(), json!(appointments.len()));
    summary.insert("by_status".to_string(), by_status.counts());
    summary.insert("by_type".to_string(), by_type.counts());
    summary.insert("by_clinician".to_string(), by_clinician.counts());

    let data = appointments
        .iter()
        .map(|a| {
            serde_json::to_value(AppointmentRow {
                date: a.date,
                time: a.time.clone(),
                patient: a.patient.as_ref().map(|p| p.full_name()),
                clinician: a.clinician.as_ref().map(|c| c.name.clone()),
                status: a.status.clone(),
                appointment_type: a.appointment_type.clone(),
                duration_minutes: a.duration_minutes,
                price: a.price.clone(),
            })
        })
        .collect::<Result<Vec<Value>, _>>()?;

    tracing::Span::current().record("report.rows", data.len());

    Ok(Report::assemble(
        ReportType::Appointments,
        query.period,
        summary,
        data,
    ))
}
