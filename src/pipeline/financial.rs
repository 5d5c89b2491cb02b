use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::aggregate::{Bucket, parse_amount, round2, sum_amounts};
use crate::error::ReportResult;
use crate::filter::{self, ReportFilters};
use crate::report::{Report, ReportType};
use crate::store::ClinicStore;
use crate::store::records::{Payment, PaymentStatus};

/// Payment statuses that count towards realized revenue.
const SETTLED: [PaymentStatus; 2] = [PaymentStatus::Paid, PaymentStatus::PartiallyPaid];
const PENDING: [PaymentStatus; 1] = [PaymentStatus::Pending];

#[derive(Debug, Serialize)]
struct PaymentRow {
    date: NaiveDate,
    patient: Option<String>,
    clinician: Option<String>,
    amount: Option<String>,
    discount: Option<String>,
    method: Option<String>,
    status: &'static str,
}

fn payment_clinician(payment: &Payment) -> Option<String> {
    payment
        .appointment
        .as_ref()
        .and_then(|a| a.clinician.as_ref())
        .map(|c| c.name.clone())
}

#[tracing::instrument(
    name = "pipeline financial",
    skip(store, filters),
    fields(pipeline.stage = "financial", report.rows)
)]
pub async fn generate_financial_report(
    store: &dyn ClinicStore,
    filters: &ReportFilters,
) -> ReportResult<Report> {
    let query = filter::normalize(filters);

    // The settled and pending reads are independent; run them concurrently
    // and fail the whole report if either fails.
    let (settled, pending) = tokio::try_join!(
        store.payments_by_status(&SETTLED, &query),
        store.payments_by_status(&PENDING, &query),
    )?;

    let total_revenue = round2(sum_amounts(settled.iter().map(|p| p.amount.as_deref())));
    let total_discounts = round2(sum_amounts(settled.iter().map(|p| p.discount.as_deref())));
    let total_pending = round2(sum_amounts(pending.iter().map(|p| p.amount.as_deref())));

    let by_method = Bucket::group_amounts(
        &settled,
        |p| p.method.clone(),
        |p| parse_amount(p.amount.as_deref()),
    );
    let by_clinician = Bucket::group_amounts(&settled, payment_clinician, |p| {
        parse_amount(p.amount.as_deref())
    });

    let mut summary = Map::new();
    summary.insert("total_transactions".to_string(), json!(settled.len()));
    summary.insert("total_revenue".to_string(), json!(total_revenue));
    summary.insert("total_discounts".to_string(), json!(total_discounts));
    summary.insert(
        "net_revenue".to_string(),
        json!(round2(total_revenue - total_discounts)),
    );
    summary.insert("total_pending".to_string(), json!(total_pending));
    summary.insert("by_payment_method".to_string(), by_method.totals());
    summary.insert("by_clinician".to_string(), by_clinician.totals());

    let data = settled
        .iter()
        .map(|p| {
            serde_json::to_value(PaymentRow {
                date: p.payment_date,
                patient: p.patient.as_ref().map(|pt| pt.full_name()),
                clinician: payment_clinician(p),
                amount: p.amount.clone(),
                discount: p.discount.clone(),
                method: p.method.clone(),
                status: p.status.as_str(),
            })
        })
        .collect::<Result<Vec<Value>, _>>()?;

    tracing::Span::current().record("report.rows", data.len());

    Ok(Report::assemble(
        ReportType::Financial,
        query.period,
        summary,
        data,
    ))
}
