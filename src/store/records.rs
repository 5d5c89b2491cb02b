use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Read-only snapshots of the five clinic domains, as returned by the data
/// store collaborator. Monetary amounts are kept as the decimal strings the
/// store holds; they are folded through `aggregate::parse_amount`.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRef {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl PatientRef {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicianRef {
    pub id: i64,
    pub name: String,
    pub specialty: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub date: NaiveDate,
    pub time: String,
    pub status: String,
    pub appointment_type: String,
    pub duration_minutes: Option<u32>,
    pub price: Option<String>,
    pub patient: Option<PatientRef>,
    pub clinician: Option<ClinicianRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    PartiallyPaid,
    Pending,
    Cancelled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::PartiallyPaid => "partially_paid",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Cancelled => "cancelled",
        }
    }
}

/// A payment's appointment relation, joined one level deep so financial
/// aggregation can reach the clinician without a second read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentRef {
    pub id: i64,
    pub date: NaiveDate,
    pub clinician: Option<ClinicianRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub payment_date: NaiveDate,
    pub amount: Option<String>,
    pub discount: Option<String>,
    pub method: Option<String>,
    pub status: PaymentStatus,
    pub patient: Option<PatientRef>,
    pub appointment: Option<AppointmentRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<String>,
    pub date_of_birth: NaiveDate,
    pub insurance_provider: Option<String>,
    pub registered_on: NaiveDate,
    pub total_visits: u32,
    pub last_visit: Option<NaiveDate>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whole years completed between date of birth and `on`; a birth date in
    /// the future degrades to zero.
    pub fn age_on(&self, on: NaiveDate) -> u32 {
        on.years_since(self.date_of_birth).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clinician {
    pub id: i64,
    pub name: String,
    pub specialty: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub id: i64,
    pub record_date: NaiveDate,
    pub status: String,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub patient: Option<PatientRef>,
    pub clinician: Option<ClinicianRef>,
    pub prescription: Option<String>,
    pub requested_tests: Vec<String>,
}

impl MedicalRecord {
    pub fn has_prescription(&self) -> bool {
        self.prescription.as_deref().is_some_and(|p| !p.is_empty())
    }

    pub fn has_requested_tests(&self) -> bool {
        !self.requested_tests.is_empty()
    }
}
