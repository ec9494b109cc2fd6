//! CSV payloads: header row + data rows -> sequence of mappings.

use crate::error::LoadError;
use crate::Tree;
use serde_json::{Map, Value};

/// Normalize a header cell into a key: lower-case, drop anything that is not
/// an ASCII word character (`[a-z0-9_]`) or ASCII whitespace, trim, and join
/// words with `_`.
///
/// `"First Name"` -> `first_name`, `"E-Mail"` -> `email`, `"Café"` -> `caf`.
pub fn header_key(header: &str) -> String {
    let cleaned: String = header
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_ascii_whitespace())
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Parse CSV with a header row. Each data row becomes one mapping from
/// header key to cell text, in row order.
pub fn csv_to_tree(payload: &[u8]) -> Result<Tree, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(payload);

    let headers: Vec<String> = reader.headers()?.iter().map(header_key).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = Map::with_capacity(headers.len());
        for (i, key) in headers.iter().enumerate() {
            if row.contains_key(key) {
                continue;
            }
            let cell = record
                .get(i)
                .map(|c| Value::String(c.to_string()))
                .unwrap_or(Value::Null);
            row.insert(key.clone(), cell);
        }
        rows.push(Value::Object(row));
    }
    Ok(Value::Array(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn headers_lowercased_rows_in_order() {
        let tree = csv_to_tree(b"Name,Age\nAlice,30\nBob,25\n").unwrap();
        assert_eq!(
            tree,
            json!([
                {"name": "Alice", "age": "30"},
                {"name": "Bob", "age": "25"}
            ])
        );
    }

    #[test]
    fn header_key_symbolizes() {
        assert_eq!(header_key("First Name"), "first_name");
        assert_eq!(header_key("  E-Mail "), "email");
        assert_eq!(header_key("ID"), "id");
        assert_eq!(header_key("date_of_birth"), "date_of_birth");
    }

    #[test]
    fn header_key_keeps_ascii_word_characters_only() {
        assert_eq!(header_key("Café"), "caf");
        assert_eq!(header_key("Année Publication"), "anne_publication");
        assert_eq!(header_key("naïve\u{a0}key"), "navekey");
    }

    #[test]
    fn quoted_cells_and_embedded_commas() {
        let tree = csv_to_tree(b"title,author\n\"Dune, Part 1\",Herbert\n").unwrap();
        assert_eq!(tree[0]["title"], "Dune, Part 1");
        assert_eq!(tree[0]["author"], "Herbert");
    }

    #[test]
    fn short_rows_fill_null_and_long_rows_truncate() {
        let tree = csv_to_tree(b"a,b\n1\n2,3,4\n").unwrap();
        assert_eq!(tree, json!([{"a": "1", "b": null}, {"a": "2", "b": "3"}]));
    }

    #[test]
    fn duplicate_header_keeps_first_cell() {
        let tree = csv_to_tree(b"id,ID\n1,2\n").unwrap();
        assert_eq!(tree, json!([{"id": "1"}]));
    }

    #[test]
    fn header_only_is_empty_sequence() {
        assert_eq!(csv_to_tree(b"name,age\n").unwrap(), json!([]));
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let err = csv_to_tree(b"name\n\xff\xfe\n").unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }
}
