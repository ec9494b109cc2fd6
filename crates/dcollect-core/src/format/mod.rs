//! Format dispatch: content type or file extension -> parser.
//!
//! Every supported payload ends up as a [`Tree`]. The network path resolves a
//! content type first ([`resolve_content_type`]) and maps it with
//! [`Format::from_content_type`]; the filesystem path maps the extension with
//! [`Format::from_extension`].

mod json;
mod table;
mod xml;

pub use json::json_to_tree;
pub use table::csv_to_tree;
pub use xml::{xml_to_tree, XML_LT_WORKAROUND};

use crate::archive;
use crate::error::LoadError;
use crate::options::FetchOptions;
use crate::Tree;
use std::path::Path;

/// Content type used when neither the response nor the file name says anything.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Parse strategy for a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Csv,
    Xml,
    /// Gzip-compressed tar holding a single XML entry.
    GzipXml,
}

impl Format {
    /// Map a (normalized) content type to a format. Unknown types are parsed as XML.
    pub fn from_content_type(content_type: &str) -> Format {
        match content_type {
            "application/ld+json" | "application/json" => Format::Json,
            "text/csv" => Format::Csv,
            "application/atom+xml" | "application/xml" | "text/xml" => Format::Xml,
            other => {
                tracing::debug!("no dedicated parser for {}, parsing as XML", other);
                Format::Xml
            }
        }
    }

    /// Map a file extension to a format. There is no fallback on this path.
    pub fn from_extension(path: &Path) -> Result<Format, LoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") | Some("jsonld") => Ok(Format::Json),
            Some("xml") => Ok(Format::Xml),
            Some("gz") => Ok(Format::GzipXml),
            Some("csv") => Ok(Format::Csv),
            _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Parse `payload` into a tree.
    pub fn parse(self, payload: &[u8]) -> Result<Tree, LoadError> {
        match self {
            Format::Json => json_to_tree(payload),
            Format::Csv => csv_to_tree(payload),
            Format::Xml => xml_to_tree(payload),
            Format::GzipXml => {
                let entry = archive::read_single_tar_gz_entry(payload)?;
                xml_to_tree(&entry)
            }
        }
    }
}

/// Strip parameters (`; charset=...`) and normalize case.
pub fn normalize_content_type(value: &str) -> String {
    value
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

/// Effective content type of a network payload.
///
/// Precedence: explicit option, then the `Content-Type` header, then a MIME
/// guess from the locator's file name, then [`DEFAULT_CONTENT_TYPE`].
pub fn resolve_content_type(
    options: &FetchOptions,
    header: Option<&str>,
    file_name: Option<&str>,
) -> String {
    if let Some(ct) = options.content_type.as_deref() {
        return normalize_content_type(ct);
    }
    if let Some(ct) = header {
        return normalize_content_type(ct);
    }
    tracing::debug!("No Header content-type available");
    file_name
        .and_then(|name| mime_guess::from_path(name).first_raw())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string()
}
