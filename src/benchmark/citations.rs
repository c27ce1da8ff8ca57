//! Citation Counts
//!
//! Sums `cit_count` of the first entry of every publication listed under
//! `project.publications` in a metrics annotation.

use serde_json::Value;

use crate::registry::ToolAnnotation;

/// Display value for a tool whose citations could not be read.
pub const UNKNOWN_CITATIONS: &str = "Unknown";

/// Total citation count of a tool, or `None` if the structure is missing or
/// malformed anywhere.
pub fn citation_count(annotation: &ToolAnnotation) -> Option<u64> {
    let publications = annotation
        .get_path(&["project", "publications"])?
        .as_array()?;

    publications.iter().try_fold(0u64, |total, publication| {
        let count = publication
            .get("entries")?
            .as_array()?
            .first()?
            .get("cit_count")
            .and_then(Value::as_u64)?;
        Some(total.saturating_add(count))
    })
}

/// Desirability bucket of a citation count.
pub fn citation_desirability(count: u64) -> f64 {
    match count {
        0 => 0.0,
        1..=9 => 0.25,
        10..=99 => 0.5,
        100..=199 => 0.75,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn annotation(document: Value) -> ToolAnnotation {
        ToolAnnotation::new("tool", document)
    }

    #[test]
    fn test_sums_first_entries() {
        let doc = json!({"project": {"publications": [
            {"entries": [{"cit_count": 12}, {"cit_count": 1000}]},
            {"entries": [{"cit_count": 30}]}
        ]}});
        assert_eq!(citation_count(&annotation(doc)), Some(42));
    }

    #[test]
    fn test_no_publications_is_zero() {
        let doc = json!({"project": {"publications": []}});
        assert_eq!(citation_count(&annotation(doc)), Some(0));
    }

    #[test]
    fn test_missing_structure_is_unknown() {
        assert_eq!(citation_count(&annotation(json!({}))), None);
        assert_eq!(citation_count(&ToolAnnotation::empty("tool")), None);
        assert_eq!(
            citation_count(&annotation(json!({"project": {"publications": {}}}))),
            None
        );
    }

    #[test]
    fn test_malformed_publication_is_unknown() {
        let doc = json!({"project": {"publications": [
            {"entries": [{"cit_count": 5}]},
            {"entries": []}
        ]}});
        assert_eq!(citation_count(&annotation(doc)), None);

        let doc = json!({"project": {"publications": [{"entries": [{"cit_count": "5"}]}]}});
        assert_eq!(citation_count(&annotation(doc)), None);
    }

    #[test]
    fn test_buckets() {
        assert_eq!(citation_desirability(0), 0.0);
        assert_eq!(citation_desirability(1), 0.25);
        assert_eq!(citation_desirability(9), 0.25);
        assert_eq!(citation_desirability(10), 0.5);
        assert_eq!(citation_desirability(99), 0.5);
        assert_eq!(citation_desirability(100), 0.75);
        assert_eq!(citation_desirability(199), 0.75);
        assert_eq!(citation_desirability(200), 1.0);
        assert_eq!(citation_desirability(u64::MAX), 1.0);
    }
}
