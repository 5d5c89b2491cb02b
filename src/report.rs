use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ReportError;

/// Inclusive date range that drove a report's query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl Period {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportType {
    Appointments,
    Financial,
    Patients,
    Clinicians,
    MedicalRecords,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Appointments => "appointments",
            ReportType::Financial => "financial",
            ReportType::Patients => "patients",
            ReportType::Clinicians => "clinicians",
            ReportType::MedicalRecords => "medical-records",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "appointments" => Ok(ReportType::Appointments),
            "financial" => Ok(ReportType::Financial),
            "patients" => Ok(ReportType::Patients),
            "clinicians" => Ok(ReportType::Clinicians),
            "medical-records" => Ok(ReportType::MedicalRecords),
            other => Err(ReportError::InvalidReportType(other.to_string())),
        }
    }
}

/// Complete output of one aggregation pipeline: period metadata, named
/// summary aggregates, and row-level projections. Built fresh per call and
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub report_type: ReportType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    pub generated_at: DateTime<Utc>,
    pub summary: Map<String, Value>,
    pub data: Vec<Value>,
}

impl Report {
    /// Assembles a report, stamping the generation instant. Callers pass the
    /// fully fetched record projections; nothing is fetched after this point.
    pub fn assemble(
        report_type: ReportType,
        period: Option<Period>,
        summary: Map<String, Value>,
        data: Vec<Value>,
    ) -> Self {
        Self {
            report_type,
            period,
            generated_at: Utc::now(),
            summary,
            data,
        }
    }
}
