use serde::Serialize;
use serde_json::Value;

use crate::error::ReportResult;
use crate::report::Report;

/// Marker returned by CSV export when a report carries no rows.
pub const NO_DATA_MARKER: &str = "No data available";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    /// Resolves a caller-supplied format name. Anything other than `"csv"`
    /// falls back to JSON; the fallback is deliberate, not an oversight.
    pub fn from_name(name: &str) -> Self {
        match name {
            "csv" => ExportFormat::Csv,
            _ => ExportFormat::Json,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportResult {
    pub format: ExportFormat,
    pub content: String,
    pub filename: String,
}

/// Serializes a report into the requested encoding and names the artifact
/// `{report_type}_{epoch_millis}.{ext}`. Uniqueness holds up to millisecond
/// resolution of the generation instant.
#[tracing::instrument(name = "export render", skip(report), fields(report.format))]
pub fn render(report: &Report, format: ExportFormat) -> ReportResult<ExportResult> {
    let content = match format {
        ExportFormat::Json => serde_json::to_string_pretty(report)?,
        ExportFormat::Csv => to_csv(report),
    };

    let filename = format!(
        "{}_{}.{}",
        report.report_type,
        report.generated_at.timestamp_millis(),
        format.extension()
    );

    tracing::Span::current().record("report.format", format.extension());

    Ok(ExportResult {
        format,
        content,
        filename,
    })
}

/// Renders report rows as CSV. The header row takes its columns, in order,
/// from the first data row; all rows are assumed homogeneous in shape.
/// Absent and null values become empty fields. Every row is
/// newline-terminated, with no trailing blank line.
pub fn to_csv(report: &Report) -> String {
    let Some(first) = report.data.first().and_then(Value::as_object) else {
        return NO_DATA_MARKER.to_string();
    };

    let headers: Vec<&String> = first.keys().collect();

    let mut out = String::new();
    out.push_str(
        &headers
            .iter()
            .map(|h| csv_field(h))
            .collect::<Vec<_>>()
            .join(","),
    );
    out.push('\n');

    for row in &report.data {
        let row = row.as_object();
        let line: Vec<String> = headers
            .iter()
            .map(|h| {
                let value = row.and_then(|r| r.get(h.as_str()));
                csv_field(&stringify(value))
            })
            .collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }

    out
}

fn stringify(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Fields containing a comma or a double quote are wrapped in double quotes,
/// with internal quotes doubled.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
