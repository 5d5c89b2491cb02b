pub mod records;

use async_trait::async_trait;
use thiserror::Error;

use crate::filter::RecordQuery;
use crate::report::Period;
use records::{Appointment, Clinician, MedicalRecord, Patient, Payment, PaymentStatus};

/// Failure raised by the data store collaborator. The engine propagates it
/// unchanged; there is no retry and no partial report.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct FetchError {
    message: String,
}

impl FetchError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type FetchResult<T> = Result<T, FetchError>;

/// Read contract against the clinic data store. Implementations execute
/// predicate-driven, optionally joined, sorted reads; from the engine's
/// perspective every call is side-effect-free.
///
/// Record-returning reads are expected to come back in a stable listing
/// order (by date, then id). The scalar reads back the clinician
/// performance fan-out.
#[async_trait]
pub trait ClinicStore: Send + Sync {
    /// Appointments matching the query, with patient and clinician joined.
    async fn appointments(&self, query: &RecordQuery) -> FetchResult<Vec<Appointment>>;

    /// Payments whose status is one of `statuses`, with the related
    /// appointment (and its clinician) joined.
    async fn payments_by_status(
        &self,
        statuses: &[PaymentStatus],
        query: &RecordQuery,
    ) -> FetchResult<Vec<Payment>>;

    /// Active patients matching the query.
    async fn active_patients(&self, query: &RecordQuery) -> FetchResult<Vec<Patient>>;

    /// Active clinicians matching the query.
    async fn active_clinicians(&self, query: &RecordQuery) -> FetchResult<Vec<Clinician>>;

    /// Medical records matching the query, with patient and clinician joined.
    async fn medical_records(&self, query: &RecordQuery) -> FetchResult<Vec<MedicalRecord>>;

    /// Count of completed appointments for one clinician inside `period`.
    async fn count_completed_appointments(
        &self,
        clinician_id: i64,
        period: &Period,
    ) -> FetchResult<u64>;

    /// Sum of payment amounts tied to one clinician's appointments inside
    /// `period`.
    async fn sum_clinician_payments(&self, clinician_id: i64, period: &Period)
    -> FetchResult<f64>;
}
