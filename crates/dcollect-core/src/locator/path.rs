//! Path handling for locators: last segment as a file-name hint, and
//! `file://` locators resolved to filesystem paths.

use std::path::PathBuf;
use url::Url;

/// Extracts the last path segment (percent-decoded) as a file-name hint.
///
/// Returns `None` if the path is empty/root or ends in `.`/`..`.
pub fn file_name_from_url(url: &Url) -> Option<String> {
    let segment = url.path().split('/').filter(|s| !s.is_empty()).last()?;
    let segment = percent_decode(segment);
    if segment.is_empty() || segment == "." || segment == ".." {
        return None;
    }
    Some(segment)
}

/// Host and path of a `file://` URL joined into a filesystem path.
///
/// `file:///tmp/a.json` is absolute; `file://data/a.json` puts the "host"
/// in front of the path and resolves it against the working directory.
pub fn file_path_from_url(url: &Url) -> std::io::Result<PathBuf> {
    let joined = format!(
        "{}{}",
        url.host_str().unwrap_or(""),
        percent_decode(url.path())
    );
    std::path::absolute(joined)
}

/// Percent-decode a URL path component. Invalid escapes pass through as-is.
pub(super) fn percent_decode(input: &str) -> String {
    let mut out = Vec::with_capacity(input.len());
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(high), Some(low)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                out.push(high << 4 | low);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
