//! Settings document storage
//!
//! Locations live under one option key of a settings document. The document
//! is a YAML or JSON file on disk ([`FileStore`]) or an in-memory map
//! ([`MemoryStore`]); both sit behind [`SettingsStore`].

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::identity::LocationId;
use crate::entities::location::{LocationRecord, Locations};

/// Option key holding the location collection
pub const LOCATIONS_OPTION: &str = "local_seo_schema_locations";

/// Errors raised while reading or writing a settings document
#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    #[diagnostic(code(lss::store::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("invalid settings document: {0}")]
    #[diagnostic(
        code(lss::store::invalid),
        help("run `lss validate` for a detailed report")
    )]
    Invalid(String),

    #[error("failed to serialize settings: {0}")]
    #[diagnostic(code(lss::store::serialize))]
    Serialize(String),
}

/// Syntax error in a settings file, with source location
#[derive(Debug, Error, Diagnostic)]
#[error("{format} syntax error: {message}")]
#[diagnostic(code(lss::store::syntax))]
pub struct SyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    format: DocumentFormat,
    message: String,
}

impl SyntaxError {
    fn new(
        format: DocumentFormat,
        message: String,
        source: &str,
        filename: &str,
        line: usize,
        column: usize,
    ) -> Self {
        let offset = line_col_to_offset(source, line, column);
        let help = generate_help(&message);

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1)),
            help,
            format,
            message,
        }
    }
}

/// On-disk encoding of a settings document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.json` files are JSON, everything else YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentFormat::Json => write!(f, "JSON"),
            DocumentFormat::Yaml => write!(f, "YAML"),
        }
    }
}

/// Key/value option storage
pub trait SettingsStore {
    /// Read one option, `None` when absent
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Write one option, keeping every other option as is
    fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;
}

/// Read the location collection; an absent option is an empty collection
///
/// Entries are read one at a time. An entry with an unusable id or fields
/// is skipped with a debug log; only a collection that is not a mapping is
/// an error.
pub fn load_locations(store: &dyn SettingsStore) -> Result<Locations, StoreError> {
    let entries = match store.get(LOCATIONS_OPTION)? {
        None | Some(Value::Null) => return Ok(Locations::new()),
        Some(Value::Object(entries)) => entries,
        Some(other) => {
            return Err(StoreError::Invalid(format!(
                "{}: expected a mapping of locations, found {}",
                LOCATIONS_OPTION,
                json_kind(&other)
            )))
        }
    };

    let mut locations = Locations::new();
    for (key, fields) in entries {
        let id = match LocationId::parse(&key) {
            Ok(id) => id,
            Err(e) => {
                tracing::debug!(key = %key, error = %e, "skipping stored location");
                continue;
            }
        };
        match serde_json::from_value::<LocationRecord>(fields) {
            Ok(record) => {
                locations.insert(id, record);
            }
            Err(e) => tracing::debug!(id = %id, error = %e, "skipping stored location"),
        }
    }
    Ok(locations)
}

/// Replace the stored location collection
pub fn save_locations(store: &dyn SettingsStore, locations: &Locations) -> Result<(), StoreError> {
    let value = serde_json::to_value(locations).map_err(|e| StoreError::Serialize(e.to_string()))?;
    store.set(LOCATIONS_OPTION, value)
}

/// Settings document backed by a single file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    format: DocumentFormat,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = DocumentFormat::from_path(&path);
        Self { path, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Raw file contents, `None` when the file does not exist
    pub fn read_source(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// Load the whole document; a missing file is an empty document
    pub fn load(&self) -> Result<Map<String, Value>, StoreError> {
        let Some(content) = self.read_source()? else {
            return Ok(Map::new());
        };
        self.parse(&content)
    }

    fn parse(&self, content: &str) -> Result<Map<String, Value>, StoreError> {
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        let filename = self.path.display().to_string();
        let value: Value = match self.format {
            DocumentFormat::Json => serde_json::from_str(content).map_err(|e| {
                SyntaxError::new(
                    self.format,
                    e.to_string(),
                    content,
                    &filename,
                    e.line(),
                    e.column(),
                )
            })?,
            DocumentFormat::Yaml => serde_yml::from_str(content).map_err(|e| {
                let (line, column) = e
                    .location()
                    .map(|loc| (loc.line(), loc.column()))
                    .unwrap_or((1, 1));
                SyntaxError::new(self.format, e.to_string(), content, &filename, line, column)
            })?,
        };

        match value {
            Value::Object(map) => Ok(map),
            Value::Null => Ok(Map::new()),
            other => Err(StoreError::Invalid(format!(
                "expected a mapping at the top level, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Write the whole document via a sibling temp file and rename
    pub fn save(&self, document: &Map<String, Value>) -> Result<(), StoreError> {
        let content = match self.format {
            DocumentFormat::Json => serde_json::to_string_pretty(document)
                .map(|mut s| {
                    s.push('\n');
                    s
                })
                .map_err(|e| StoreError::Serialize(e.to_string()))?,
            DocumentFormat::Yaml => {
                serde_yml::to_string(document).map_err(|e| StoreError::Serialize(e.to_string()))?
            }
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let tmp_path = self.temp_path();
        fs::write(&tmp_path, content).map_err(|e| self.io_error(e))?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            if let Err(cleanup) = fs::remove_file(&tmp_path) {
                tracing::debug!(
                    path = %tmp_path.display(),
                    error = %cleanup,
                    "could not remove temp file after failed rename"
                );
            }
            return Err(self.io_error(e));
        }

        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "settings".to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut document = self.load()?;
        document.insert(key.to_string(), value);
        self.save(&document)
    }
}

/// In-memory settings document
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RefCell<Map<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_document(document: Map<String, Value>) -> Self {
        Self {
            document: RefCell::new(document),
        }
    }

    pub fn into_document(self) -> Map<String, Value> {
        self.document.into_inner()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.document.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.document.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

/// Convert 1-based line/column to a byte offset
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let mut line_start = 0;
    for (i, text) in source.split('\n').enumerate() {
        if i + 1 == line {
            let col_offset = text
                .char_indices()
                .nth(column.saturating_sub(1))
                .map(|(j, _)| j)
                .unwrap_or(text.len());
            return line_start + col_offset;
        }
        line_start += text.len() + 1;
    }
    source.len().saturating_sub(1)
}

/// Suggestions keyed off the parser's message
fn generate_help(message: &str) -> Option<String> {
    let msg_lower = message.to_lowercase();

    if msg_lower.contains("tab") {
        return Some(
            "YAML requires spaces for indentation, not tabs. Replace tabs with spaces.".to_string(),
        );
    }

    if msg_lower.contains("duplicate key") {
        return Some("Each location id can only appear once. Rename the duplicate.".to_string());
    }

    if msg_lower.contains("expected block end") {
        return Some("Check your indentation - it may be inconsistent.".to_string());
    }

    if msg_lower.contains("mapping values are not allowed") {
        return Some("You may be missing a space after ':' or have incorrect indentation.".to_string());
    }

    if msg_lower.contains("trailing comma") {
        return Some("JSON does not allow a comma after the last item.".to_string());
    }

    if msg_lower.contains("expected `,` or `}`") || msg_lower.contains("expected ','") {
        return Some("Separate fields with commas and close every '{'.".to_string());
    }

    None
}
