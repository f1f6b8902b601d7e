//! Schema validation with detailed error reporting
//!
//! Two schemas ship with the crate: one for the settings document the
//! operator edits, one for the JSON-LD documents the builder emits.

use jsonschema::{validator_for, ValidationError as JsonSchemaError, Validator as JsonValidator};
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use thiserror::Error;

/// Schemas embedded at compile time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    /// The settings document holding `local_seo_schema_locations`
    Settings,
    /// One generated LocalBusiness document
    LocalBusiness,
}

impl SchemaKind {
    pub fn all() -> &'static [SchemaKind] {
        &[SchemaKind::Settings, SchemaKind::LocalBusiness]
    }

    pub fn source(&self) -> &'static str {
        match self {
            SchemaKind::Settings => include_str!("../../schemas/locations.schema.json"),
            SchemaKind::LocalBusiness => include_str!("../../schemas/local-business.schema.json"),
        }
    }
}

/// Validation error with source location information
#[derive(Debug, Error, Diagnostic)]
#[error("Schema validation failed: {summary}")]
#[diagnostic(code(lss::schema::validation_error))]
pub struct ValidationError {
    summary: String,

    #[source_code]
    src: NamedSource<String>,

    #[related]
    violations: Vec<SchemaViolation>,
}

/// A single schema violation
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct SchemaViolation {
    #[label("{}", self.hint)]
    span: SourceSpan,

    message: String,
    hint: String,

    #[help]
    help: Option<String>,
}

impl SchemaViolation {
    pub fn new(message: String, hint: String, span: SourceSpan, help: Option<String>) -> Self {
        Self {
            span,
            message,
            hint,
            help,
        }
    }
}

impl ValidationError {
    pub fn new(filename: &str, source: &str, violations: Vec<SchemaViolation>) -> Self {
        let count = violations.len();
        let summary = if count == 1 {
            "1 error".to_string()
        } else {
            format!("{} errors", count)
        };
        Self {
            summary,
            src: NamedSource::new(filename, source.to_string()),
            violations,
        }
    }

    /// Get the number of violations
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.message.as_str())
    }
}

/// A problem found in a generated document
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
    pub suggestion: Option<String>,
}

/// Validator with the embedded schemas compiled once
pub struct Validator {
    compiled: HashMap<SchemaKind, JsonValidator>,
}

impl Validator {
    pub fn new() -> Self {
        let mut compiled = HashMap::new();

        for kind in SchemaKind::all() {
            if let Ok(schema_json) = serde_json::from_str::<JsonValue>(kind.source()) {
                if let Ok(compiled_schema) = validator_for(&schema_json) {
                    compiled.insert(*kind, compiled_schema);
                }
            }
        }

        Self { compiled }
    }

    /// Validate a settings document (YAML or JSON text), collecting every error
    pub fn validate_settings(&self, content: &str, filename: &str) -> Result<(), ValidationError> {
        // JSON is valid YAML, so one parser covers both encodings
        let yaml_value: serde_yml::Value = match serde_yml::from_str(content) {
            Ok(v) => v,
            Err(e) => {
                let span = find_error_span(content, e.location());
                let violation = SchemaViolation::new(
                    format!("Parse error: {}", e),
                    "invalid document".to_string(),
                    span,
                    Some("Check syntax - indentation, colons, quotes and brackets".to_string()),
                );
                return Err(ValidationError::new(filename, content, vec![violation]));
            }
        };

        let json_value: JsonValue = match serde_json::to_value(&yaml_value) {
            Ok(JsonValue::Null) => return Ok(()),
            Ok(v) => v,
            Err(e) => {
                let violation = SchemaViolation::new(
                    format!("Failed to convert document to JSON: {}", e),
                    "conversion error".to_string(),
                    (0, content.len()).into(),
                    None,
                );
                return Err(ValidationError::new(filename, content, vec![violation]));
            }
        };

        let Some(schema) = self.compiled.get(&SchemaKind::Settings) else {
            return Ok(());
        };

        let violations: Vec<SchemaViolation> = schema
            .iter_errors(&json_value)
            .map(|e| error_to_violation(content, &e))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(filename, content, violations))
        }
    }

    /// Check one generated JSON-LD document against the LocalBusiness schema
    pub fn check_document(&self, document: &JsonValue) -> Vec<ValidationIssue> {
        let Some(schema) = self.compiled.get(&SchemaKind::LocalBusiness) else {
            return Vec::new();
        };

        schema
            .iter_errors(document)
            .map(|e| ValidationIssue {
                path: e.instance_path.to_string(),
                message: format_schema_error(&e),
                suggestion: generate_help_message(&e),
            })
            .collect()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a JSON Schema validation error to our violation format
fn error_to_violation(content: &str, error: &JsonSchemaError) -> SchemaViolation {
    let path = error.instance_path.to_string();
    let message = format_schema_error(error);
    let hint = format_error_hint(error);
    let help = generate_help_message(error);

    let span = find_path_span(content, &path);

    SchemaViolation::new(message, hint, span, help)
}

/// Format a JSON Schema error into a user-friendly message
fn format_schema_error(error: &JsonSchemaError) -> String {
    let path = if error.instance_path.as_str().is_empty() {
        "document root".to_string()
    } else {
        format!("'{}'", error.instance_path)
    };

    match &error.kind {
        jsonschema::error::ValidationErrorKind::Required { property } => {
            let prop_str = property
                .as_str()
                .map(|s| s.to_string())
                .unwrap_or_else(|| property.to_string());
            format!("Missing required field: {} at {}", prop_str, path)
        }
        jsonschema::error::ValidationErrorKind::Type { kind } => {
            format!("Wrong type at {}: expected {:?}", path, kind)
        }
        jsonschema::error::ValidationErrorKind::Enum { options } => {
            format!(
                "Invalid value at {}: must be one of: {}",
                path,
                format_enum_options(options)
            )
        }
        jsonschema::error::ValidationErrorKind::Pattern { pattern } => {
            format!("Value at {} doesn't match pattern: {}", path, pattern)
        }
        jsonschema::error::ValidationErrorKind::MinLength { limit } => {
            format!("Value at {} is too short: minimum {} characters", path, limit)
        }
        jsonschema::error::ValidationErrorKind::Minimum { limit } => {
            format!("Value at {} is too small: minimum {}", path, limit)
        }
        jsonschema::error::ValidationErrorKind::Maximum { limit } => {
            format!("Value at {} is too large: maximum {}", path, limit)
        }
        jsonschema::error::ValidationErrorKind::AdditionalProperties { unexpected } => {
            format!("Unknown field(s) at {}: {}", path, unexpected.join(", "))
        }
        _ => {
            format!("Validation error at {}: {}", path, error)
        }
    }
}

/// Format enum options as a string
fn format_enum_options(options: &JsonValue) -> String {
    if let Some(arr) = options.as_array() {
        arr.iter()
            .map(|v| v.as_str().map(|s| format!("{:?}", s)).unwrap_or_else(|| v.to_string()))
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        options.to_string()
    }
}

/// Generate a short hint for the error label
fn format_error_hint(error: &JsonSchemaError) -> String {
    match &error.kind {
        jsonschema::error::ValidationErrorKind::Required { .. } => "required field missing".to_string(),
        jsonschema::error::ValidationErrorKind::Type { .. } => "wrong type".to_string(),
        jsonschema::error::ValidationErrorKind::Enum { .. } => "invalid value".to_string(),
        jsonschema::error::ValidationErrorKind::Pattern { .. } => "pattern mismatch".to_string(),
        jsonschema::error::ValidationErrorKind::AdditionalProperties { .. } => "unknown field".to_string(),
        _ => "validation error".to_string(),
    }
}

/// Generate a help message with suggestions for fixing the error
fn generate_help_message(error: &JsonSchemaError) -> Option<String> {
    match &error.kind {
        jsonschema::error::ValidationErrorKind::Required { property } => {
            let prop_str = property
                .as_str()
                .map(|s| s.to_string())
                .unwrap_or_else(|| property.to_string());
            Some(format!("Add the '{}' field", prop_str))
        }
        jsonschema::error::ValidationErrorKind::Enum { options } => {
            Some(format!("Valid values: {}", format_enum_options(options)))
        }
        jsonschema::error::ValidationErrorKind::Pattern { pattern } => {
            if pattern.contains("a-z0-9_-") {
                Some("Location ids may only contain lowercase letters, digits, '_' and '-'".to_string())
            } else if pattern.contains("[0-5][0-9]") {
                Some("Times use 24-hour HH:MM, e.g. 09:00 or 17:30".to_string())
            } else if pattern.contains("https?") {
                Some("Use an absolute URL starting with http:// or https://".to_string())
            } else {
                None
            }
        }
        jsonschema::error::ValidationErrorKind::Minimum { .. }
        | jsonschema::error::ValidationErrorKind::Maximum { .. } => {
            Some("Latitude must be within -90..90 and longitude within -180..180".to_string())
        }
        jsonschema::error::ValidationErrorKind::AdditionalProperties { unexpected } => {
            if unexpected.len() == 1 {
                Some(format!("Remove the '{}' field or check spelling", unexpected[0]))
            } else {
                Some("Remove unknown fields or check spelling".to_string())
            }
        }
        _ => None,
    }
}

/// Find the span (byte offset, length) for a parse error location
fn find_error_span(content: &str, location: Option<serde_yml::Location>) -> SourceSpan {
    if let Some(loc) = location {
        let line = loc.line().saturating_sub(1);
        let column = loc.column().saturating_sub(1);

        let mut offset = 0;
        for (i, line_content) in content.lines().enumerate() {
            if i == line {
                offset += column;
                break;
            }
            offset += line_content.len() + 1;
        }

        let offset = offset.min(content.len());
        let rest_of_content = content.get(offset..).unwrap_or("");
        let len = rest_of_content
            .find('\n')
            .unwrap_or(rest_of_content.len())
            .max(1);

        (offset, len).into()
    } else {
        first_line_span(content)
    }
}

fn first_line_span(content: &str) -> SourceSpan {
    let len = content.find('\n').unwrap_or(content.len()).max(1);
    (0, len).into()
}

/// Find the span for a JSON pointer in YAML or JSON content
fn find_path_span(content: &str, json_path: &str) -> SourceSpan {
    // e.g. "/local_seo_schema_locations/loc_1/opening_hours/Mx"
    let parts: Vec<&str> = json_path.split('/').filter(|s| !s.is_empty()).collect();

    let Some(search_key) = parts.last() else {
        return first_line_span(content);
    };

    // Array index: point at the list's key instead
    if search_key.parse::<usize>().is_ok() && parts.len() >= 2 {
        if let Some(span) = find_key_span(content, parts[parts.len() - 2]) {
            return span;
        }
    }

    find_key_span(content, search_key).unwrap_or_else(|| first_line_span(content))
}

/// Find the line declaring `key:` (YAML) or `"key":` (JSON)
fn find_key_span(content: &str, key: &str) -> Option<SourceSpan> {
    let yaml_key = format!("{}:", key);
    let json_key = format!("\"{}\"", key);

    let mut offset = 0;
    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with(&yaml_key) || trimmed.starts_with(&json_key) {
            let key_start = offset + (line.len() - trimmed.len());
            return Some((key_start, trimmed.len()).into());
        }
        offset += line.len() + 1;
    }
    None
}
