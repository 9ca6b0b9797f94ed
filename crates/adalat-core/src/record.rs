//! Case record: the nested JSON-shaped document representing the predicted
//! case, edited in place by dotted-path directives during the proceeding.
//!
//! Deliberately schema-agnostic (a tagged `serde_json::Value` tree, not a
//! typed struct): the oracle may introduce fields the static schema has
//! never seen, and those edits must still land and be audited.

use crate::error::{SimResult, SimulationError};
use serde_json::{Map, Value};
use std::path::Path;

/// The mutable case document. An unmutated clone is kept by the
/// orchestrator for the end-of-run comparison artifact.
#[derive(Debug, Clone)]
pub struct CaseRecord {
    root: Value,
}

impl CaseRecord {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Load the case prediction document from disk. Read once at
    /// simulation start; never reloaded.
    pub fn load(path: &Path) -> SimResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SimulationError::CaseFile(format!("{}: {}", path.display(), e)))?;
        let root: Value = serde_json::from_str(&text)
            .map_err(|e| SimulationError::CaseFile(format!("{}: {}", path.display(), e)))?;
        Ok(Self { root })
    }

    /// Write the (possibly mutated) document as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> SimResult<()> {
        let text = serde_json::to_string_pretty(&self.root)?;
        std::fs::write(path, text)
            .map_err(|e| SimulationError::Artifact(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    pub fn value(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    /// Set the leaf addressed by a dotted path (e.g.
    /// `"Judgment_Reasoning.Liability_Confidence"`) to a text value and
    /// return the previous value for the audit trail.
    ///
    /// Missing intermediate segments are created as empty mappings, and a
    /// non-mapping intermediate is replaced by one, so recording a novel
    /// field introduced mid-proceeding never fails. Returns `None` when no
    /// prior leaf existed.
    pub fn set_field(&mut self, path: &str, new_value: &str) -> Option<String> {
        let segments: Vec<&str> = path.split('.').collect();
        let (leaf, parents) = match segments.split_last() {
            Some(split) => split,
            None => return None,
        };

        let mut current = &mut self.root;
        for segment in parents {
            if !current.is_object() {
                *current = Value::Object(Map::new());
            }
            let map = match current.as_object_mut() {
                Some(map) => map,
                None => return None,
            };
            current = map
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }

        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        let map = match current.as_object_mut() {
            Some(map) => map,
            None => return None,
        };
        let old = map.insert(leaf.to_string(), Value::String(new_value.to_string()));
        old.and_then(render_prior_value)
    }

    /// Read the value at a dotted path, if present.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut current = &self.root;
        for segment in path.split('.') {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Read a string at a dotted path, or the given fallback. Used by the
    /// prompt brief builders, which must tolerate absent fields.
    pub fn str_or<'a>(&'a self, path: &str, fallback: &'a str) -> &'a str {
        self.get(path).and_then(Value::as_str).unwrap_or(fallback)
    }

    /// Iterate the string items of a list at a dotted path (missing or
    /// non-list values yield nothing).
    pub fn str_list(&self, path: &str) -> Vec<&str> {
        self.get(path)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// The list of objects at a dotted path, if any.
    pub fn object_list(&self, path: &str) -> Vec<&Map<String, Value>> {
        self.get(path)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_object).collect())
            .unwrap_or_default()
    }
}

/// Render a replaced leaf for the audit trail. `Null` reads as "no prior
/// value"; strings are taken verbatim; anything else is compact JSON.
fn render_prior_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> CaseRecord {
        CaseRecord::new(json!({
            "Case_Summary": { "Title": "Sharma v. Galaxy Electronics" },
            "Judgment_Reasoning": {
                "Liability_Confidence": "78%",
                "Issues_Framed": [ { "Issue_Number": 1, "Issue": "Deficiency in service?" } ]
            }
        }))
    }

    #[test]
    fn replaces_leaf_and_returns_old_value() {
        let mut record = record();
        let old = record.set_field("Judgment_Reasoning.Liability_Confidence", "92%");
        assert_eq!(old.as_deref(), Some("78%"));
        assert_eq!(
            record.get("Judgment_Reasoning.Liability_Confidence"),
            Some(&json!("92%"))
        );
    }

    #[test]
    fn missing_intermediates_are_created() {
        let mut record = record();
        let old = record.set_field("Relief_Granted.Primary_Relief.Type", "Refund");
        assert_eq!(old, None);
        assert_eq!(
            record.get("Relief_Granted.Primary_Relief.Type"),
            Some(&json!("Refund"))
        );
    }

    #[test]
    fn non_mapping_intermediate_is_replaced() {
        let mut record = CaseRecord::new(json!({ "Case_Summary": "just text" }));
        let old = record.set_field("Case_Summary.Title", "New Title");
        assert_eq!(old, None);
        assert_eq!(record.get("Case_Summary.Title"), Some(&json!("New Title")));
    }

    #[test]
    fn non_string_old_value_is_rendered_as_json() {
        let mut record = CaseRecord::new(json!({ "Claim": { "Amount": 45000 } }));
        let old = record.set_field("Claim.Amount", "50000");
        assert_eq!(old.as_deref(), Some("45000"));
    }

    #[test]
    fn single_segment_path_edits_the_root_mapping() {
        let mut record = record();
        assert_eq!(record.set_field("Verdict_Note", "allowed in part"), None);
        assert_eq!(record.get("Verdict_Note"), Some(&json!("allowed in part")));
    }

    #[test]
    fn get_on_absent_path_is_none() {
        let record = record();
        assert_eq!(record.get("Case_Summary.Missing.Deeper"), None);
    }
}
