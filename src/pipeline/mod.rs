pub mod appointments;
pub mod clinicians;
pub mod financial;
pub mod medical_records;
pub mod orchestrator;
pub mod patients;

pub use appointments::generate_appointments_report;
pub use clinicians::generate_clinicians_report;
pub use financial::generate_financial_report;
pub use medical_records::generate_medical_records_report;
pub use orchestrator::{export_report, generate_report};
pub use patients::generate_patients_report;
