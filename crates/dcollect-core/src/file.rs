//! Filesystem fetch: read the file, pick the parser from its extension.

use crate::error::{Failure, LoadError};
use crate::format::Format;
use crate::loader::{normalize, Loaded};
use crate::locator::Locator;
use crate::options::FetchOptions;
use std::fs;

/// Read the file behind a `file://` locator and normalize it.
///
/// In raw mode the file's bytes are returned unchanged whatever the extension.
pub fn fetch(locator: &Locator, options: &FetchOptions) -> Result<Loaded, Failure> {
    let path = match locator.file_path() {
        Some(path) => path.map_err(|source| LoadError::Io {
            path: locator.to_string(),
            source,
        })?,
        None => return Err(LoadError::UnsupportedScheme(locator.to_string()).into()),
    };

    tracing::debug!("reading {}", path.display());
    let payload = fs::read(&path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let format = if options.raw {
        None
    } else {
        match Format::from_extension(&path) {
            Ok(format) => Some(format),
            Err(e) => return Err(Failure::with_raw(e, String::from_utf8_lossy(&payload))),
        }
    };

    normalize(payload, format)
}
