/// Writing assessment results to disk

use std::path::Path;

use tracing::info;

use crate::assessment::{Assessment, AssessmentResult};
use crate::error::{AssessorError, Result};

pub const RESULT_COLUMNS: [&str; 10] = [
    "Company",
    "Model",
    "Version",
    "File Type Considered",
    "API Types",
    "Max Tokens per Call",
    "Send Tokens",
    "Get Tokens",
    "Total Tokens",
    "Total Cost (USD)",
];

/// Export by file extension: `.csv` writes the results table, `.json` the
/// whole assessment.
pub fn write(path: &Path, assessment: &Assessment) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension.as_deref() {
        Some("csv") => write_csv(path, &assessment.results),
        Some("json") => write_json(path, assessment),
        _ => Err(AssessorError::Export(format!(
            "unsupported export format for {} (use .csv or .json)",
            path.display()
        ))),
    }
}

pub fn write_csv(path: &Path, results: &[AssessmentResult]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(RESULT_COLUMNS)?;

    for result in results {
        let max_tokens = result.max_tokens_display();
        let send = result.send_tokens().to_string();
        let receive = result.receive_tokens().to_string();
        let total = result.total_tokens().to_string();
        let cost = result.cost_display();
        wtr.write_record([
            result.company.as_str(),
            result.model.as_str(),
            result.version.as_str(),
            result.content_kind.as_str(),
            result.api_types.as_str(),
            max_tokens.as_str(),
            send.as_str(),
            receive.as_str(),
            total.as_str(),
            cost.as_str(),
        ])?;
    }

    wtr.flush()?;
    info!(path = %path.display(), rows = results.len(), "Exported assessment results");
    Ok(())
}

pub fn write_json(path: &Path, assessment: &Assessment) -> Result<()> {
    let json = serde_json::to_string_pretty(assessment)?;
    std::fs::write(path, json + "\n")?;
    info!(path = %path.display(), rows = assessment.results.len(), "Exported assessment results");
    Ok(())
}
