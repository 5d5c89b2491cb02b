use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{ReportError, ReportResult};
use crate::report::Period;

/// Raw, partially-specified filter set supplied by the caller. Absent fields
/// impose no constraint; unknown inbound fields are dropped at
/// deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportFilters {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub entity_id: Option<i64>,
    pub status: Option<String>,
}

impl ReportFilters {
    /// Builds a filter set from raw string inputs, as received from an outer
    /// surface. Malformed dates are invalid input, surfaced immediately.
    pub fn from_raw(
        date_from: Option<&str>,
        date_to: Option<&str>,
        entity_id: Option<i64>,
        status: Option<&str>,
    ) -> ReportResult<Self> {
        Ok(Self {
            date_from: date_from.map(parse_date).transpose()?,
            date_to: date_to.map(parse_date).transpose()?,
            entity_id,
            status: status.map(str::to_string),
        })
    }
}

fn parse_date(raw: &str) -> ReportResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ReportError::Validation(format!("invalid date '{raw}', use YYYY-MM-DD")))
}

/// Canonical predicate consumed by the fetch contract.
#[derive(Debug, Clone, Default)]
pub struct RecordQuery {
    pub period: Option<Period>,
    pub entity_id: Option<i64>,
    pub status: Option<String>,
}

/// Shapes a raw filter set into a canonical query predicate.
///
/// A date range is applied only when both bounds are present; a single bound
/// is silently dropped. That mirrors the behavior this engine replaces and is
/// kept deliberately pending a product decision on lone-bound semantics.
pub fn normalize(filters: &ReportFilters) -> RecordQuery {
    let period = match (filters.date_from, filters.date_to) {
        (Some(from), Some(to)) => Some(Period { from, to }),
        _ => None,
    };

    RecordQuery {
        period,
        entity_id: filters.entity_id,
        status: filters.status.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_both_bounds_build_a_period() {
        let filters = ReportFilters {
            date_from: Some(date(2025, 1, 1)),
            date_to: Some(date(2025, 1, 31)),
            ..Default::default()
        };
        let query = normalize(&filters);
        let period = query.period.unwrap();
        assert_eq!(period.from, date(2025, 1, 1));
        assert_eq!(period.to, date(2025, 1, 31));
    }

    #[test]
    fn test_single_bound_is_dropped() {
        let filters = ReportFilters {
            date_from: Some(date(2025, 1, 1)),
            ..Default::default()
        };
        assert!(normalize(&filters).period.is_none());

        let filters = ReportFilters {
            date_to: Some(date(2025, 1, 31)),
            ..Default::default()
        };
        assert!(normalize(&filters).period.is_none());
    }

    #[test]
    fn test_entity_and_status_pass_through() {
        let filters = ReportFilters {
            entity_id: Some(7),
            status: Some("completed".to_string()),
            ..Default::default()
        };
        let query = normalize(&filters);
        assert_eq!(query.entity_id, Some(7));
        assert_eq!(query.status.as_deref(), Some("completed"));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let filters: ReportFilters = serde_json::from_str(
            r#"{"date_from": "2025-01-01", "date_to": "2025-02-01", "sort_by": "name"}"#,
        )
        .unwrap();
        assert!(normalize(&filters).period.is_some());
    }

    #[test]
    fn test_from_raw_parses_dates() {
        let filters =
            ReportFilters::from_raw(Some("2025-01-01"), Some("2025-01-31"), None, Some("paid"))
                .unwrap();
        assert_eq!(filters.date_from, Some(date(2025, 1, 1)));
        assert_eq!(filters.status.as_deref(), Some("paid"));
    }

    #[test]
    fn test_from_raw_rejects_malformed_date() {
        let err = ReportFilters::from_raw(Some("01/02/2025"), None, None, None).unwrap_err();
        assert!(matches!(err, ReportError::Validation(_)));
    }
}
