use futures::future;
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::aggregate::{Bucket, round2};
use crate::error::ReportResult;
use crate::filter::{self, ReportFilters};
use crate::report::{Period, Report, ReportType};
use crate::store::records::Clinician;
use crate::store::{ClinicStore, FetchResult};

#[derive(Debug, Serialize)]
struct ClinicianRow {
    name: String,
    specialty: Option<String>,
    email: Option<String>,
}

/// In-range activity of one clinician: completed appointments and payments
/// tied to their appointments.
#[derive(Debug, Serialize)]
pub struct ClinicianPerformance {
    pub clinician_id: i64,
    pub name: String,
    pub completed_appointments: u64,
    pub revenue: f64,
}

async fn clinician_performance(
    store: &dyn ClinicStore,
    clinician: &Clinician,
    period: &Period,
) -> FetchResult<ClinicianPerformance> {
    let (completed_appointments, revenue) = tokio::try_join!(
        store.count_completed_appointments(clinician.id, period),
        store.sum_clinician_payments(clinician.id, period),
    )?;

    Ok(ClinicianPerformance {
        clinician_id: clinician.id,
        name: clinician.name.clone(),
        completed_appointments,
        revenue: round2(revenue),
    })
}

#[tracing::instrument(
    name = "pipeline clinicians",
    skip(store, filters),
    fields(pipeline.stage = "clinicians", report.rows)
)]
pub async fn generate_clinicians_report(
    store: &dyn ClinicStore,
    filters: &ReportFilters,
) -> ReportResult<Report> {
    let query = filter::normalize(filters);
    let clinicians = store.active_clinicians(&query).await?;

    let by_specialty = Bucket::group_by(&clinicians, |c| c.specialty.clone());

    let mut summary = Map::new();
    summary.insert("total_clinicians".to_string(), json!(clinicians.len()));
    summary.insert("by_specialty".to_string(), by_specialty.counts());

    if let Some(period) = query.period.as_ref() {
        // One independent sub-fetch pair per clinician, issued concurrently.
        // try_join_all keeps results in listing order, so correlation is by
        // clinician identity rather than completion order.
        let performance = future::try_join_all(
            clinicians
                .iter()
                .map(|c| clinician_performance(store, c, period)),
        )
        .await?;
        summary.insert(
            "performance".to_string(),
            serde_json::to_value(performance)?,
        );
    }

    let data = clinicians
        .iter()
        .map(|c| {
            serde_json::to_value(ClinicianRow {
                name: c.name.clone(),
                specialty: c.specialty.clone(),
                email: c.email.clone(),
            })
        })
        .collect::<Result<Vec<Value>, _>>()?;

    tracing::Span::current().record("report.rows", data.len());

    Ok(Report::assemble(
        ReportType::Clinicians,
        query.period,
        summary,
        data,
    ))
}
