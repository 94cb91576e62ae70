//! Instance store — the configurable treemap instances
//!
//! Owns the instance collection and every mutation on it. Each instance has
//! its own data, raw editor text, color scheme, and revision counter; nothing
//! outside the store mutates an instance's fields. Mutations build the
//! successor collection and swap it in whole, so a reader holding the
//! previous collection never observes a half-applied edit.

use crate::modules::sample;
use crate::types::{parse_tree, serialize_pretty, TreeNode};
use crate::viz::ColorBehavior;
use chrono::Local;

/// Default two-stop range for new instances.
pub const DEFAULT_COLOR_STOPS: [&str; 2] = ["#4ecdc4", "#ff6b6b"];

/// One independently configured treemap instance.
#[derive(Debug, Clone)]
pub struct VizInstance {
    /// Unique for the process lifetime, stable for the instance lifetime.
    pub id: String,
    /// The active tree; exclusively owned by this instance.
    pub tree_root: TreeNode,
    /// Latest editor text; may be mid-edit and out of sync with `tree_root`.
    pub raw_text: String,
    /// At least one hex color, independently editable per index.
    pub color_stops: Vec<String>,
    pub color_behavior: ColorBehavior,
    /// Incremented only when `tree_root` is replaced by a parsed value;
    /// forces the engine to discard its navigation state.
    pub revision: u64,
    /// Diagnostic from the last rejected edit, cleared on a parsed one.
    pub parse_error: Option<String>,
}

pub struct InstanceStore {
    instances: Vec<VizInstance>,
    next_seq: u64,
}

impl InstanceStore {
    /// A store starts out with a single default instance.
    pub fn new() -> Self {
        let mut store = Self {
            instances: Vec::new(),
            next_seq: 0,
        };
        store.create_instance();
        store
    }

    pub fn instances(&self) -> &[VizInstance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&VizInstance> {
        self.instances.iter().find(|inst| inst.id == id)
    }

    /// Append a new instance seeded with the sample tree, the default color
    /// range, and the default rendering mode. Returns the new id.
    pub fn create_instance(&mut self) -> String {
        let id = self.fresh_id();
        let tree_root = sample::sample_tree();
        let raw_text = serialize_pretty(&tree_root);
        let instance = VizInstance {
            id: id.clone(),
            tree_root,
            raw_text,
            color_stops: DEFAULT_COLOR_STOPS.iter().map(|s| s.to_string()).collect(),
            color_behavior: ColorBehavior::default(),
            revision: 0,
            parse_error: None,
        };
        let mut next: Vec<VizInstance> = self.instances.clone();
        next.push(instance);
        self.instances = next;
        id
    }

    /// Remove by id. An absent id is a silent no-op. The panel is the layer
    /// that keeps the last instance from being removed; the store itself
    /// does not block it.
    pub fn remove_instance(&mut self, id: &str) {
        let next: Vec<VizInstance> = self
            .instances
            .iter()
            .filter(|inst| inst.id != id)
            .cloned()
            .collect();
        self.instances = next;
    }

    /// Accept the keystroke, defer validation: the text is stored verbatim
    /// either way. Only a successful parse replaces the tree and bumps the
    /// revision; a failed one records the diagnostic and leaves the last
    /// valid tree untouched.
    pub fn update_raw_text(&mut self, id: &str, text: String) {
        self.replace_instance(id, |inst| match parse_tree(&text) {
            Ok(tree) => VizInstance {
                tree_root: tree,
                raw_text: text,
                revision: inst.revision + 1,
                parse_error: None,
                ..inst.clone()
            },
            Err(err) => VizInstance {
                raw_text: text,
                parse_error: Some(err.to_string()),
                ..inst.clone()
            },
        });
    }

    /// Replace one color stop. Out-of-range indices (and unknown ids) are
    /// silent no-ops; the addressable range is determined by the UI issuing
    /// the call.
    pub fn set_color_stop(&mut self, id: &str, index: usize, value: String) {
        self.replace_instance(id, |inst| {
            let mut next = inst.clone();
            if let Some(slot) = next.color_stops.get_mut(index) {
                *slot = value;
            }
            next
        });
    }

    pub fn set_color_behavior(&mut self, id: &str, mode: ColorBehavior) {
        self.replace_instance(id, |inst| VizInstance {
            color_behavior: mode,
            ..inst.clone()
        });
    }

    /// Swap in a successor collection with `f` applied to the addressed
    /// instance. Unknown ids rebuild the collection unchanged.
    fn replace_instance<F>(&mut self, id: &str, f: F)
    where
        F: FnOnce(&VizInstance) -> VizInstance,
    {
        let mut f = Some(f);
        let next: Vec<VizInstance> = self
            .instances
            .iter()
            .map(|inst| {
                if inst.id == id {
                    match f.take() {
                        Some(f) => f(inst),
                        None => inst.clone(),
                    }
                } else {
                    inst.clone()
                }
            })
            .collect();
        self.instances = next;
    }

    /// Time-based with a process-local sequence tiebreak; uniqueness is the
    /// only contract.
    fn fresh_id(&mut self) -> String {
        let seq = self.next_seq;
        self.next_seq += 1;
        format!("map-{}-{}", Local::now().timestamp_millis(), seq)
    }
}

impl Default for InstanceStore {
    fn default() -> Self {
        Self::new()
    }
}
