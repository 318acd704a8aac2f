use assessor_core::{Assessment, ModelRecord};
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

const MODEL_HEADERS: [&str; 5] = ["Company", "Model", "Version", "Max Tokens", "API Types"];
const RESULT_HEADERS: [&str; 8] = [
    "Company",
    "Model",
    "Version",
    "File Type",
    "Send Tokens",
    "Get Tokens",
    "Total Tokens",
    "Total Cost (USD)",
];

pub fn render_models(records: &[ModelRecord]) -> String {
    if records.is_empty() {
        return "No models available.\n".to_string();
    }

    let mut table = new_table(&MODEL_HEADERS);
    for r in records {
        table.add_row(vec![
            Cell::new(&r.company),
            Cell::new(&r.model),
            Cell::new(&r.version),
            Cell::new(
                r.max_tokens
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
            ),
            Cell::new(r.api_types_display()),
        ]);
    }
    format!("{table}\n")
}

pub fn render_assessment(assessment: &Assessment) -> String {
    let mut out = String::new();

    if !assessment.results.is_empty() {
        let mut table = new_table(&RESULT_HEADERS);
        for r in &assessment.results {
            table.add_row(vec![
                Cell::new(&r.company),
                Cell::new(&r.model),
                Cell::new(&r.version),
                Cell::new(r.content_kind),
                Cell::new(r.send_tokens()),
                Cell::new(r.receive_tokens()),
                Cell::new(r.total_tokens()),
                Cell::new(r.cost_display()),
            ]);
        }
        out.push_str(&format!("{table}\n"));
    }

    if !assessment.unsupported.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(
            "These models do not support this content type or have no pricing available:\n",
        );
        for label in &assessment.unsupported {
            out.push_str("  ");
            out.push_str(label);
            out.push('\n');
        }
    }

    if assessment.is_empty() {
        out.push_str("No matching models found for assessment.\n");
    }
    out
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| Cell::new(h)));
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use assessor_core::reference::parse_api_types;
    use assessor_core::{assess, ContentDescriptor, ContentKind, Estimator, ModelPricing};

    fn record(model: &str, types: &str) -> ModelRecord {
        ModelRecord {
            company: "Acme".to_string(),
            model: model.to_string(),
            version: "1".to_string(),
            api_types: parse_api_types(types),
            max_tokens: Some(8192),
            pricing: ModelPricing {
                input_price_per_1m: Some(1.0),
                output_price_per_1m: Some(2.0),
                ..Default::default()
            },
            notes: String::new(),
        }
    }

    #[test]
    fn test_render_models() {
        assert_eq!(render_models(&[]), "No models available.\n");
        let out = render_models(&[record("Writer", "Text, Code")]);
        for cell in ["Company", "Max Tokens", "API Types", "Acme", "Writer", "8192", "Text, Code"] {
            assert!(out.contains(cell), "missing {cell:?} in\n{out}");
        }
        assert!(!out.contains("N/A"));

        let mut unbounded = record("Reader", "Text");
        unbounded.max_tokens = None;
        assert!(render_models(&[unbounded]).contains("N/A"));
    }

    #[test]
    fn test_render_assessment() {
        let records = vec![record("Writer", "Text"), record("Painter", "Image")];
        let content = ContentDescriptor::new(ContentKind::Text, 4000);
        let out = render_assessment(&assess(&records, &content, &Estimator::default()));
        assert!(out.contains("Total Cost (USD)"));
        assert!(out.contains("Writer"));
        assert!(out.contains("1000"));
        assert!(out.contains("$0.002000"));
        assert!(out.contains("no pricing available"));
        assert!(out.contains("  Acme - Painter\n"));
        assert!(!out.contains("No matching models"));
    }

    #[test]
    fn test_render_empty_assessment() {
        let content = ContentDescriptor::new(ContentKind::Text, 4000);
        let out = render_assessment(&assess(Vec::new(), &content, &Estimator::default()));
        assert_eq!(out, "No matching models found for assessment.\n");
    }
}
