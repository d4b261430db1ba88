//! Per-node numbering parameters.

use serde::Serialize;

/// Position of one descendant in the walk, handed to a style.
///
/// Built fresh by the generator for every non-root node. The root ancestor
/// has no parameters at all; styles receive `None` for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberingParameters {
    /// 1-based position among all children of the parent, counted across
    /// every union of that parent.
    pub nth_child: u32,

    /// 1-based position of the union this child belongs to.
    pub nth_marriage: u32,

    /// Number of unions of the parent.
    pub total_marriages: u32,

    /// Label of the parent in the descendancy line.
    pub parent_label: Option<String>,

    /// 1 is the root ancestor, 2 their children, 3 grandchildren.
    pub depth: u32,
}

impl NumberingParameters {
    /// Generation relative to the root: 1 for children, 2 for grandchildren.
    pub fn generation(&self) -> u32 {
        self.depth.saturating_sub(1)
    }

    pub fn parent_label(&self) -> &str {
        self.parent_label.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_counts_from_the_root_children() {
        let params = NumberingParameters {
            nth_child: 2,
            nth_marriage: 1,
            total_marriages: 1,
            parent_label: None,
            depth: 3,
        };
        assert_eq!(params.generation(), 2);
        assert_eq!(params.parent_label(), "");
    }

    #[test]
    fn serializes_camel_case() {
        let params = NumberingParameters {
            nth_child: 3,
            nth_marriage: 2,
            total_marriages: 2,
            parent_label: Some("1.2".to_string()),
            depth: 2,
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({
                "nthChild": 3,
                "nthMarriage": 2,
                "totalMarriages": 2,
                "parentLabel": "1.2",
                "depth": 2
            })
        );
    }
}
