//! JSON and JSON-LD payloads.

use crate::error::LoadError;
use crate::Tree;

/// Parse a JSON document. JSON-LD is plain JSON at this level; no expansion
/// or compaction is applied.
pub fn json_to_tree(payload: &[u8]) -> Result<Tree, LoadError> {
    Ok(serde_json::from_slice(payload)?)
}
