/// Reference table loading

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ErrorKind, ReaderBuilder, StringRecord};
use tracing::{debug, error, info, warn};

use super::{parse_api_types, ModelRecord, PLACEHOLDER};
use crate::cost::ModelPricing;
use crate::error::{AssessorError, Result};

pub const COL_COMPANY: &str = "Company";
pub const COL_MODEL: &str = "Model";
pub const COL_VERSION: &str = "Version";
pub const COL_API_TYPES: &str = "API Types";
pub const COL_MAX_TOKENS: &str = "Max Tokens per Call";
pub const COL_INPUT_COST: &str = "Input Token Cost ($ per 1M)";
pub const COL_OUTPUT_COST: &str = "Output Token Cost ($ per 1M)";
pub const COL_VIDEO_COST: &str = "Video Cost ($ per minute)";
pub const COL_AUDIO_COST: &str = "Audio Cost ($ per minute)";
pub const COL_IMAGE_COST: &str = "Image Cost ($ per image)";
pub const COL_FLAT_FILE_COST: &str = "Flat File Cost";
pub const COL_NOTES: &str = "Notes";

pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_COMPANY,
    COL_MODEL,
    COL_VERSION,
    COL_API_TYPES,
    COL_MAX_TOKENS,
    COL_INPUT_COST,
    COL_OUTPUT_COST,
];

/// A data row that was dropped, with its 1-based line number (the header is
/// line 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct LoadReport {
    pub records: Vec<ModelRecord>,
    pub skipped: Vec<SkippedRow>,
}

/// Load the reference table at `path`.
///
/// Never fails: a missing file or a header without the required columns
/// yields an empty vector and an error diagnostic, and callers treat that as
/// "no data". Use [`load_report`] to see why.
pub fn load(path: impl AsRef<Path>) -> Vec<ModelRecord> {
    let path = path.as_ref();
    match load_report(path) {
        Ok(report) => report.records,
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to load model reference data");
            Vec::new()
        }
    }
}

/// Like [`load`], but surfaces whole-file failures and the skipped rows.
pub fn load_report(path: impl AsRef<Path>) -> Result<LoadReport> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AssessorError::MissingSource(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let report = read_records(file)?;

    for skipped in &report.skipped {
        warn!(
            path = %path.display(),
            row = skipped.row,
            reason = %skipped.reason,
            "Skipping reference row"
        );
    }
    if report.records.is_empty() {
        warn!(path = %path.display(), "No models were loaded from the reference table");
    } else {
        info!(
            path = %path.display(),
            models = report.records.len(),
            skipped = report.skipped.len(),
            "Loaded model reference data"
        );
    }

    Ok(report)
}

/// Parse a reference table from any reader. Row-level problems are collected
/// in the report; only schema and I/O problems abort.
pub fn read_records<R: Read>(reader: R) -> Result<LoadReport> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = Columns::from_headers(reader.headers()?)?;
    let mut report = LoadReport::default();

    for (offset, result) in reader.records().enumerate() {
        let row = offset + 2;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                if matches!(e.kind(), ErrorKind::Io(_)) {
                    return Err(e.into());
                }
                report.skipped.push(SkippedRow {
                    row,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        match columns.to_model(&record, row) {
            Ok(model) => report.records.push(model),
            Err(AssessorError::RowConversion { row, reason }) => {
                report.skipped.push(SkippedRow { row, reason });
            }
            Err(e) => return Err(e),
        }
    }

    Ok(report)
}

struct Columns {
    index: HashMap<String, usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let mut index = HashMap::new();
        for (i, name) in headers.iter().enumerate() {
            // A UTF-8 byte order mark may survive on the first header.
            let name = name.trim_start_matches('\u{feff}');
            index.insert(name.to_string(), i);
        }

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !index.contains_key(**col))
            .map(|col| col.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(AssessorError::MalformedSchema { missing });
        }

        Ok(Self { index })
    }

    /// Cell of a required column. A row too short to reach it is structural
    /// damage and fails the row.
    fn required<'r>(&self, record: &'r StringRecord, name: &str, row: usize) -> Result<&'r str> {
        self.index
            .get(name)
            .and_then(|&i| record.get(i))
            .ok_or_else(|| AssessorError::RowConversion {
                row,
                reason: format!("missing column '{}'", name),
            })
    }

    fn optional<'r>(&self, record: &'r StringRecord, name: &str) -> Option<&'r str> {
        self.index.get(name).and_then(|&i| record.get(i))
    }

    fn to_model(&self, record: &StringRecord, row: usize) -> Result<ModelRecord> {
        let company = self.required(record, COL_COMPANY, row)?;
        let model = self.required(record, COL_MODEL, row)?;
        let version = self.required(record, COL_VERSION, row)?;
        let api_types = self.required(record, COL_API_TYPES, row)?;
        let max_tokens = self.required(record, COL_MAX_TOKENS, row)?;
        let input_cost = self.required(record, COL_INPUT_COST, row)?;
        let output_cost = self.required(record, COL_OUTPUT_COST, row)?;

        let price = |name: &str, raw: Option<&str>| raw.and_then(|raw| parse_price(raw, name, row));

        Ok(ModelRecord {
            company: or_placeholder(company),
            model: or_placeholder(model),
            version: version.trim().to_string(),
            api_types: parse_api_types(api_types),
            max_tokens: parse_count(max_tokens, COL_MAX_TOKENS, row),
            pricing: ModelPricing {
                input_price_per_1m: price(COL_INPUT_COST, Some(input_cost)),
                output_price_per_1m: price(COL_OUTPUT_COST, Some(output_cost)),
                video_price_per_minute: price(COL_VIDEO_COST, self.optional(record, COL_VIDEO_COST)),
                audio_price_per_minute: price(COL_AUDIO_COST, self.optional(record, COL_AUDIO_COST)),
                image_price: price(COL_IMAGE_COST, self.optional(record, COL_IMAGE_COST)),
                flat_file_price: price(COL_FLAT_FILE_COST, self.optional(record, COL_FLAT_FILE_COST)),
            },
            notes: self
                .optional(record, COL_NOTES)
                .map(|n| n.trim().to_string())
                .unwrap_or_default(),
        })
    }
}

fn or_placeholder(raw: &str) -> String {
    let value = raw.trim();
    if value.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        value.to_string()
    }
}

/// Integer cell with thousands separators allowed ("128,000"). Blank or
/// unparsable cells are absent.
fn parse_count(raw: &str, column: &str, row: usize) -> Option<u64> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    match value.replace(',', "").parse::<u64>() {
        Ok(n) => Some(n),
        Err(_) => {
            debug!(row, column, value, "Unparsable count, treating as absent");
            None
        }
    }
}

/// Non-negative finite price. Blank, unparsable, negative and non-finite
/// cells are absent.
fn parse_price(raw: &str, column: &str, row: usize) -> Option<f64> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => Some(n),
        _ => {
            debug!(row, column, value, "Unusable price, treating as absent");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Company,Model,Version,API Types,Max Tokens per Call,Input Token Cost ($ per 1M),Output Token Cost ($ per 1M),Video Cost ($ per minute),Audio Cost ($ per minute),Image Cost ($ per image),Flat File Cost,Notes";

    fn parse(body: &str) -> LoadReport {
        let table = format!("{}\n{}", HEADER, body);
        read_records(table.as_bytes()).unwrap()
    }

    #[test]
    fn test_full_row() {
        let report = parse(
            "OpenAI,GPT-4o,2024-08-06,\"Text, Image, Multi-Modal\",\"128,000\",2.5,10,,,0.003,,fast\n",
        );
        assert!(report.skipped.is_empty());
        let record = &report.records[0];
        assert_eq!(record.company, "OpenAI");
        assert_eq!(record.version, "2024-08-06");
        assert_eq!(record.api_types_display(), "Text, Image, Multi-Modal");
        assert_eq!(record.max_tokens, Some(128_000));
        assert_eq!(record.pricing.input_price_per_1m, Some(2.5));
        assert_eq!(record.pricing.output_price_per_1m, Some(10.0));
        assert_eq!(record.pricing.video_price_per_minute, None);
        assert_eq!(record.pricing.image_price, Some(0.003));
        assert_eq!(record.notes, "fast");
    }

    #[test]
    fn test_unparsable_max_tokens_is_absent_but_row_kept() {
        let report = parse("Acme,Writer,v1,Text,abc,1.0,2.0,,,,,\n");
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].max_tokens, None);
        assert_eq!(report.records[0].pricing.input_price_per_1m, Some(1.0));
    }

    #[test]
    fn test_negative_and_garbage_prices_are_absent() {
        let report = parse("Acme,Writer,v1,Text,100,-1,NaN,free,inf,,,\n");
        let pricing = &report.records[0].pricing;
        assert_eq!(pricing.input_price_per_1m, None);
        assert_eq!(pricing.output_price_per_1m, None);
        assert_eq!(pricing.video_price_per_minute, None);
        assert_eq!(pricing.audio_price_per_minute, None);
    }

    #[test]
    fn test_zero_price_is_kept_distinct_from_absent() {
        let report = parse("Acme,Writer,v1,Text,100,0,,,,,,\n");
        let pricing = &report.records[0].pricing;
        assert_eq!(pricing.input_price_per_1m, Some(0.0));
        assert_eq!(pricing.output_price_per_1m, None);
    }

    #[test]
    fn test_short_row_is_skipped_and_loading_continues() {
        let report = parse("Acme,Writer,v1\nBeta,Reader,2,Text,10,1,1,,,,,\n");
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].company, "Beta");
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].row, 2);
        assert!(report.skipped[0].reason.contains("API Types"));
    }

    #[test]
    fn test_optional_columns_may_be_missing() {
        let table = "Company,Model,Version,API Types,Max Tokens per Call,Input Token Cost ($ per 1M),Output Token Cost ($ per 1M)\nAcme,Writer,v1,Text,100,1,2\n";
        let report = read_records(table.as_bytes()).unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].pricing, ModelPricing {
            input_price_per_1m: Some(1.0),
            output_price_per_1m: Some(2.0),
            ..Default::default()
        });
        assert!(report.records[0].notes.is_empty());
    }

    #[test]
    fn test_missing_required_columns() {
        let table = "Company,Model,Version\nAcme,Writer,v1\n";
        match read_records(table.as_bytes()) {
            Err(AssessorError::MalformedSchema { missing }) => {
                assert_eq!(missing.len(), 4);
                assert!(missing.contains(&COL_API_TYPES.to_string()));
            }
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_column_names_are_case_sensitive() {
        let table = HEADER.replace("Company", "company");
        assert!(matches!(
            read_records(table.as_bytes()),
            Err(AssessorError::MalformedSchema { .. })
        ));
    }

    #[test]
    fn test_bom_on_first_header() {
        let table = format!("\u{feff}{}\nAcme,Writer,v1,Text,100,1,2,,,,,\n", HEADER);
        let report = read_records(table.as_bytes()).unwrap();
        assert_eq!(report.records.len(), 1);
    }

    #[test]
    fn test_blank_names_get_placeholder() {
        let report = parse(" , ,v1,,,,,,,,,\n");
        let record = &report.records[0];
        assert_eq!(record.company, PLACEHOLDER);
        assert_eq!(record.model, PLACEHOLDER);
        assert!(record.api_types.is_empty());
    }

    #[test]
    fn test_missing_file_loads_nothing() {
        let records = load("/definitely/not/here/model_reference.csv");
        assert!(records.is_empty());
        assert!(matches!(
            load_report("/definitely/not/here/model_reference.csv"),
            Err(AssessorError::MissingSource(_))
        ));
    }
}
