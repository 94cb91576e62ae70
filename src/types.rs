//! Core data types shared across all modules
//!
//! The tree data model, the JSON ingestion pipeline, and small UI helpers.

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// A temporary UI message shown to the user (e.g. success/error notifications)
#[derive(Clone)]
pub struct FlashMessage {
    pub text: String,
    pub is_error: bool,
    pub created: Instant,
}

impl FlashMessage {
    pub fn new(text: String, is_error: bool) -> Self {
        Self {
            text,
            is_error,
            created: Instant::now(),
        }
    }

    pub fn is_expired(&self, seconds: u64) -> bool {
        self.created.elapsed().as_secs() >= seconds
    }
}

/// One node of the hierarchical dataset fed to a treemap instance.
///
/// The wire form matches the external component's data shape: camelCase keys,
/// optional fields omitted when absent, an empty child list marking a leaf.
/// `custom_data` is arbitrary nested JSON; `serde_json::Value` already is the
/// tagged Null/Bool/Number/String/Array/Object variant the summarizer
/// recurses over, and the `preserve_order` feature keeps mapping keys in
/// document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<serde_json::Value>,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Walk a child-index path down from this node.
    /// Returns None as soon as an index is out of range.
    pub fn descend(&self, path: &[usize]) -> Option<&TreeNode> {
        let mut node = self;
        for &idx in path {
            node = node.children.get(idx)?;
        }
        Some(node)
    }

    /// Weight of this subtree: the node's own value for leaves,
    /// the sum of child weights otherwise. Used for proportional slicing.
    pub fn total_value(&self) -> f64 {
        if self.children.is_empty() {
            self.value.unwrap_or(0.0)
        } else {
            self.children.iter().map(TreeNode::total_value).sum()
        }
    }
}

/// Parse raw editor text into a tree.
///
/// Parsing produces a fully owned value, so the result aliases nothing the
/// caller retains — the parse itself is the deep copy the store needs.
/// Syntax failures are returned for display; they are never fatal.
pub fn parse_tree(text: &str) -> Result<TreeNode, serde_json::Error> {
    serde_json::from_str(text)
}

/// Serialize a tree back to the editor's raw-text form (pretty, 2-space).
pub fn serialize_pretty(node: &TreeNode) -> String {
    // TreeNode contains no map keys that can fail to serialize
    serde_json::to_string_pretty(node).unwrap_or_default()
}

/// Format a node value the way the original data reads: integers without a
/// decimal point, everything else with up to two places.
pub fn format_value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{:.2}", v)
    }
}
