//! Output encoding for JSON-LD documents
//!
//! Documents are pretty-printed with a four-space indent. Forward slashes
//! and non-ASCII characters are written as-is so the blocks stay readable
//! for schema validators and humans viewing the page source.

use miette::Diagnostic;
use rust_embed::Embed;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use sha2::{Digest, Sha256};
use tera::Tera;
use thiserror::Error;

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

const SCRIPT_TEMPLATE: &str = "jsonld.html.tera";

#[derive(Debug, Error, Diagnostic)]
pub enum RenderError {
    #[error("JSON encoding error: {0}")]
    #[diagnostic(code(lss::schema::encode))]
    Json(#[from] serde_json::Error),

    #[error("Template rendering error: {0}")]
    #[diagnostic(code(lss::schema::template))]
    Template(String),
}

/// Pretty JSON with four-space indentation
pub fn to_json_ld<T: Serialize>(document: &T) -> Result<String, RenderError> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    document.serialize(&mut ser)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// SHA-256 hex digest of rendered output
pub fn digest(output: &str) -> String {
    format!("{:x}", Sha256::digest(output.as_bytes()))
}

/// Wraps documents in `<script type="application/ld+json">` blocks
pub struct HeadRenderer {
    tera: Tera,
}

impl HeadRenderer {
    /// Create a renderer with the embedded templates
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)
                        .map_err(|e| RenderError::Template(e.to_string()))?;
                }
            }
        }

        Ok(Self { tera })
    }

    /// Render every document, one block per document, in order
    pub fn render<T: Serialize>(&self, documents: &[T]) -> Result<String, RenderError> {
        let encoded = documents
            .iter()
            .map(to_json_ld)
            .collect::<Result<Vec<_>, _>>()?;

        if self
            .tera
            .get_template_names()
            .any(|n| n == SCRIPT_TEMPLATE)
        {
            let mut context = tera::Context::new();
            context.insert("documents", &encoded);
            self.tera
                .render(SCRIPT_TEMPLATE, &context)
                .map_err(|e| RenderError::Template(e.to_string()))
        } else {
            Ok(Self::hardcoded_blocks(&encoded))
        }
    }

    fn hardcoded_blocks(encoded: &[String]) -> String {
        encoded
            .iter()
            .map(|json| format!("<script type=\"application/ld+json\">{}</script>\n", json))
            .collect()
    }
}
