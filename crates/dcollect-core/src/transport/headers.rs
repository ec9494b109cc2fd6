//! Parse raw response header lines into name/value pairs.

/// Parse header lines collected from a transfer.
///
/// With redirects followed, libcurl reports the headers of every response in
/// turn. Each status line (`HTTP/...`) starts a new block; only the last
/// block (the final response) is returned.
pub fn parse_header_lines(lines: &[String]) -> Vec<(String, String)> {
    let mut headers = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            headers.clear();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    headers
}
