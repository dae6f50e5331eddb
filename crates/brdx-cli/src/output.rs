//! Output formatting for the CLI.

use crate::cli::OutputFormat;
use crate::error::Result;
use brdx_domain::{ExtractionResult, Feature, MetadataResponse};
use colored::*;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the metadata workflow response.
    ///
    /// Always JSON; the schema has no useful text rendering.
    pub fn format_metadata(&self, response: &MetadataResponse) -> Result<String> {
        Ok(serde_json::to_string_pretty(response)?)
    }

    /// Format an uploaded file id.
    pub fn format_upload(&self, file_id: &str) -> String {
        match self.format {
            OutputFormat::Json => serde_json::json!({ "file_id": file_id }).to_string(),
            OutputFormat::Text => file_id.to_string(),
        }
    }

    /// Format an extraction result.
    pub fn format_extraction(&self, result: &ExtractionResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Text => self.format_extraction_text(result),
        }
    }

    fn format_extraction_text(&self, result: &ExtractionResult) -> Result<String> {
        let features = result.features()?;

        let mut lines = vec![self.success(&format!(
            "Extraction {} for {}: {} feature(s)",
            result.id,
            result.file_id,
            features.len()
        ))];

        if features.is_empty() {
            lines.push(self.colorize("No features found.", "yellow"));
        }
        for feature in &features {
            lines.push(self.format_feature(feature));
        }

        Ok(lines.join("\n"))
    }

    fn format_feature(&self, feature: &Feature) -> String {
        let priority_color = match feature.priority.to_lowercase().as_str() {
            "critical" => "red",
            "high" => "magenta",
            "medium" => "yellow",
            _ => "cyan",
        };

        let mut lines = vec![format!(
            "\n{} [{}]",
            self.colorize(&feature.feature_id, "blue"),
            self.colorize(&feature.priority, priority_color)
        )];
        lines.push(format!("  {}", feature.user_story));
        push_list(&mut lines, "Acceptance criteria", &feature.acceptance_criteria);
        push_list(&mut lines, "Dependencies", &feature.dependencies);
        push_list(&mut lines, "Technical risks", &feature.technical_risks);
        lines.join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn push_list(lines: &mut Vec<String>, label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(format!("  {}:", label));
    lines.extend(items.iter().map(|item| format!("    - {}", item)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use brdx_domain::ExtractionSchema;
    use serde_json::json;
    use std::sync::Arc;

    fn create_test_result() -> ExtractionResult {
        ExtractionResult {
            id: "a1b2c3d".to_string(),
            file_id: "file-0123456789abcdef".to_string(),
            data: json!({
                "features": [{
                    "feature_id": "FR-001",
                    "user_story": "As an analyst, I want CSV export so that I can share reports",
                    "priority": "high",
                    "acceptance_criteria": ["Export completes under 5s"],
                    "dependencies": [],
                    "technical_risks": ["Large datasets"]
                }]
            }),
        }
    }

    #[test]
    fn test_text_format() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter.format_extraction(&create_test_result()).unwrap();
        assert!(output.starts_with("✓ Extraction a1b2c3d"));
        assert!(output.contains("FR-001 [high]"));
        assert!(output.contains("    - Export completes under 5s"));
        assert!(output.contains("Technical risks"));
        assert!(!output.contains("Dependencies"));
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_extraction(&create_test_result()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["id"], "a1b2c3d");
        assert_eq!(value["data"]["features"][0]["feature_id"], "FR-001");
    }

    #[test]
    fn test_empty_features() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let mut result = create_test_result();
        result.data = json!({"features": []});
        let output = formatter.format_extraction(&result).unwrap();
        assert!(output.contains("No features found"));
    }

    #[test]
    fn test_metadata_is_json() {
        let schema = ExtractionSchema::from_value(json!({
            "type": "object",
            "properties": {
                "features": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "feature_id": {"type": "string"},
                            "user_story": {"type": "string"},
                            "priority": {"type": "string"},
                            "acceptance_criteria": {"type": "array"},
                            "dependencies": {"type": "array"},
                            "technical_risks": {"type": "array"}
                        }
                    }
                }
            }
        }))
        .unwrap();
        let response = MetadataResponse {
            extracted_data_collection: "brd-technical-specs".to_string(),
            json_schema: Arc::new(schema),
        };

        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter.format_metadata(&response).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["extracted_data_collection"], "brd-technical-specs");
        assert_eq!(value["json_schema"]["type"], "object");
    }

    #[test]
    fn test_upload_formats() {
        let text = Formatter::new(OutputFormat::Text, false);
        assert_eq!(text.format_upload("file-1"), "file-1");

        let json = Formatter::new(OutputFormat::Json, false);
        assert_eq!(json.format_upload("file-1"), r#"{"file_id":"file-1"}"#);
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.error("test"), "✗ test");
    }
}
