//! Tree summarizer — on-demand inspection data for a hovered node
//!
//! Everything here is computed per call over the node being inspected;
//! nothing is cached across the tree, because the inspection target changes
//! with every hover.

use crate::types::TreeNode;
use serde_json::Value;

/// A node stops expanding its nested preview once it has more children than
/// this; it is then shown as a count badge only. 3 expands, 4 collapses.
pub const PREVIEW_EXPAND_MAX: usize = 3;

/// Everything the inspection overlay shows for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSummary {
    pub name: String,
    pub value: Option<f64>,
    pub child_count: usize,
    pub descendant_count: usize,
    pub preview: Vec<ChildPreview>,
    pub properties: Vec<PropertyEntry>,
}

/// One child in the depth-bounded preview tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildPreview {
    pub name: String,
    pub value: Option<f64>,
    /// Immediate-child count, shown as a badge whenever nonzero.
    pub child_count: usize,
    /// Nested previews; empty when this child collapsed to its badge.
    pub children: Vec<ChildPreview>,
}

/// A flattened `customData` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyEntry {
    pub key: String,
    pub value: PropertyValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// JSON null, rendered as a literal marker distinct from absence.
    Null,
    Literal(String),
    Nested(Vec<PropertyEntry>),
}

pub fn child_count(node: &TreeNode) -> usize {
    node.children.len()
}

/// Count of all strict descendants:
/// `len(children) + Σ descendant_count(child)`, 0 for a leaf.
pub fn descendant_count(node: &TreeNode) -> usize {
    node.children.len()
        + node
            .children
            .iter()
            .map(descendant_count)
            .sum::<usize>()
}

/// Depth-bounded preview of a node's children. A child with at most
/// `PREVIEW_EXPAND_MAX` children of its own expands in place (recursively);
/// a wider child is collapsed to its count badge.
pub fn preview(node: &TreeNode) -> Vec<ChildPreview> {
    node.children.iter().map(child_preview).collect()
}

fn child_preview(node: &TreeNode) -> ChildPreview {
    let count = node.children.len();
    let children = if count > 0 && count <= PREVIEW_EXPAND_MAX {
        node.children.iter().map(child_preview).collect()
    } else {
        Vec::new()
    };
    ChildPreview {
        name: node.name.clone(),
        value: node.value,
        child_count: count,
        children,
    }
}

/// Flatten arbitrary nested custom data into a keyed entry list. Objects
/// and arrays recurse structurally (arrays keyed by index); only container
/// roots produce entries, matching the original's `Object.entries` walk.
pub fn properties(data: &Value) -> Vec<PropertyEntry> {
    match flatten(data) {
        PropertyValue::Nested(entries) => entries,
        _ => Vec::new(),
    }
}

fn flatten(value: &Value) -> PropertyValue {
    match value {
        Value::Null => PropertyValue::Null,
        Value::Bool(b) => PropertyValue::Literal(b.to_string()),
        Value::Number(n) => PropertyValue::Literal(n.to_string()),
        Value::String(s) => PropertyValue::Literal(s.clone()),
        Value::Array(items) => PropertyValue::Nested(
            items
                .iter()
                .enumerate()
                .map(|(i, v)| PropertyEntry {
                    key: i.to_string(),
                    value: flatten(v),
                })
                .collect(),
        ),
        Value::Object(map) => PropertyValue::Nested(
            map.iter()
                .map(|(k, v)| PropertyEntry {
                    key: k.clone(),
                    value: flatten(v),
                })
                .collect(),
        ),
    }
}

/// Bundle everything the tooltip needs for one node.
pub fn summarize(node: &TreeNode) -> NodeSummary {
    NodeSummary {
        name: node.name.clone(),
        value: node.value,
        child_count: child_count(node),
        descendant_count: descendant_count(node),
        preview: preview(node),
        properties: node
            .custom_data
            .as_ref()
            .map(properties)
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_tree;

    fn tree_with_children(counts: &[usize]) -> TreeNode {
        // root whose i-th child has counts[i] leaf children
        let children: Vec<String> = counts
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                let grandkids: Vec<String> = (0..n)
                    .map(|j| format!(r#"{{"name": "g{}-{}", "value": 1}}"#, i, j))
                    .collect();
                format!(
                    r#"{{"name": "c{}", "children": [{}]}}"#,
                    i,
                    grandkids.join(",")
                )
            })
            .collect();
        parse_tree(&format!(
            r#"{{"name": "root", "children": [{}]}}"#,
            children.join(",")
        ))
        .unwrap()
    }

    #[test]
    fn test_descendant_count_of_leaf_is_zero() {
        let leaf = parse_tree(r#"{"name": "leaf", "value": 1}"#).unwrap();
        assert_eq!(descendant_count(&leaf), 0);
        assert_eq!(child_count(&leaf), 0);
    }

    #[test]
    fn test_descendant_count_recurrence() {
        let tree = tree_with_children(&[2, 3]);
        // Children themselves count, plus their leaves.
        assert_eq!(descendant_count(&tree), 2 + 2 + 3);
        // descendantCount(n) = Σ over children c of (1 + descendantCount(c))
        let from_children: usize = tree
            .children
            .iter()
            .map(|c| 1 + descendant_count(c))
            .sum();
        assert_eq!(descendant_count(&tree), from_children);
    }

    #[test]
    fn test_preview_expands_at_most_three_grandchildren() {
        let tree = tree_with_children(&[3, 4]);
        let p = preview(&tree);
        assert_eq!(p.len(), 2);
        // Exactly 3: all grandchildren included.
        assert_eq!(p[0].child_count, 3);
        assert_eq!(p[0].children.len(), 3);
        // Exactly 4: collapsed to the badge, no grandchild list.
        assert_eq!(p[1].child_count, 4);
        assert!(p[1].children.is_empty());
    }

    #[test]
    fn test_preview_expansion_recurses() {
        let tree = parse_tree(
            r#"{"name": "r", "children": [
                {"name": "a", "children": [
                    {"name": "b", "children": [{"name": "c", "value": 1}]}
                ]}
            ]}"#,
        )
        .unwrap();
        let p = preview(&tree);
        assert_eq!(p[0].children[0].children[0].name, "c");
        assert_eq!(p[0].children[0].children[0].value, Some(1.0));
    }

    #[test]
    fn test_properties_flattening() {
        let data: Value = serde_json::from_str(
            r#"{"population": "21.9 million", "rank": 3, "capital": null,
                "coords": {"lat": 39.9, "lon": 116.4}, "tags": ["big", "old"]}"#,
        )
        .unwrap();
        let entries = properties(&data);
        assert_eq!(entries.len(), 5);
        assert_eq!(
            entries[0],
            PropertyEntry {
                key: "population".into(),
                value: PropertyValue::Literal("21.9 million".into())
            }
        );
        // null is a distinct marker, not a literal and not absent.
        assert_eq!(entries[2].value, PropertyValue::Null);
        match &entries[3].value {
            PropertyValue::Nested(nested) => {
                assert_eq!(nested[0].key, "lat");
                assert_eq!(nested[0].value, PropertyValue::Literal("39.9".into()));
            }
            other => panic!("expected nested coords, got {:?}", other),
        }
        // Arrays are keyed by index.
        match &entries[4].value {
            PropertyValue::Nested(items) => {
                assert_eq!(items[0].key, "0");
                assert_eq!(items[1].value, PropertyValue::Literal("old".into()));
            }
            other => panic!("expected nested tags, got {:?}", other),
        }
    }

    #[test]
    fn test_properties_of_non_container_are_empty() {
        assert!(properties(&Value::Null).is_empty());
        assert!(properties(&Value::String("plain".into())).is_empty());
    }

    #[test]
    fn test_summarize_bundles_everything() {
        let tree = parse_tree(
            r#"{"name": "Asia", "value": 12,
                "customData": {"population": "4.7 billion"},
                "children": [{"name": "China"}, {"name": "India"}]}"#,
        )
        .unwrap();
        let summary = summarize(&tree);
        assert_eq!(summary.name, "Asia");
        assert_eq!(summary.value, Some(12.0));
        assert_eq!(summary.child_count, 2);
        assert_eq!(summary.descendant_count, 2);
        assert_eq!(summary.preview.len(), 2);
        assert_eq!(summary.properties.len(), 1);
    }

    #[test]
    fn test_summary_without_custom_data_has_no_properties() {
        let tree = parse_tree(r#"{"name": "bare"}"#).unwrap();
        assert!(summarize(&tree).properties.is_empty());
    }
}
