//! Reference engine — a minimal stand-in for the external treemap component
//!
//! Renders one zoom level as value-proportional slices and keeps a
//! navigation stack per instance. This is deliberately not a real treemap:
//! no squarified subdivision, no animation, no smooth zoom. It exists so the
//! boundary (`TreeMapEngine`) is exercised end to end, and it honors the one
//! hard obligation the boundary carries: a revision change discards all
//! navigation state for that instance.

use crate::types::{format_value, TreeNode};
use crate::viz::{
    node, ColorBehavior, HitKind, HitRegion, NodeRenderCtx, TreeMapEngine, TreeMapProps,
    parse_hex_color,
};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

struct ViewState {
    revision: u64,
    path: Vec<usize>,
}

pub struct SliceEngine {
    views: HashMap<String, ViewState>,
}

impl SliceEngine {
    pub fn new() -> Self {
        Self {
            views: HashMap::new(),
        }
    }

    /// Navigation path of a viewport (root = empty).
    pub fn current_path(&self, instance_id: &str) -> &[usize] {
        self.views
            .get(instance_id)
            .map(|v| v.path.as_slice())
            .unwrap_or(&[])
    }

    fn ensure_view(&mut self, instance_id: &str, revision: u64) -> &mut ViewState {
        let view = self
            .views
            .entry(instance_id.to_string())
            .or_insert(ViewState {
                revision,
                path: Vec::new(),
            });
        if view.revision != revision {
            // Structural data change: zoom and navigation state is stale.
            view.revision = revision;
            view.path.clear();
        }
        view
    }
}

impl Default for SliceEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeMapEngine for SliceEngine {
    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        props: &TreeMapProps,
        hits: &mut Vec<HitRegion>,
    ) {
        if area.width < 2 || area.height < 1 {
            return;
        }
        let view = self.ensure_view(props.instance_id, props.revision);
        if props.data.descend(&view.path).is_none() {
            view.path.clear();
        }
        let path = view.path.clone();
        let zoom = match props.data.descend(&path) {
            Some(node) => node,
            None => return,
        };

        // Navigation stack (names, root first, ending at the zoom node).
        // Feeds the breadcrumb and the node render callbacks.
        let mut history: Vec<String> = Vec::with_capacity(path.len() + 1);
        let mut walk = props.data;
        for &idx in &path {
            history.push(walk.name.clone());
            match walk.children.get(idx) {
                Some(child) => walk = child,
                None => break,
            }
        }
        history.push(zoom.name.clone());

        let mut body = area;
        let wants_chrome =
            props.breadcrumb_enabled || (props.back_button_enabled && !path.is_empty());
        if wants_chrome && area.height > 1 {
            let chrome = Rect { height: 1, ..area };
            body = Rect {
                y: area.y + 1,
                height: area.height - 1,
                ..area
            };
            render_chrome(frame, chrome, props, &history, hits);
        }

        // Hovering padding gaps (or a leaf zoom) inspects the zoom node
        // itself; child cells pushed afterwards take precedence.
        hits.push(HitRegion {
            area: body,
            instance_id: props.instance_id.to_string(),
            kind: HitKind::Node(path.clone()),
        });

        if zoom.is_leaf() {
            render_cell(frame, body, props, zoom, 0, 1.0, &history, !path.is_empty());
            return;
        }

        let gap = (props.padding_inner / 4).min(2);
        let horizontal = body.width >= body.height * 2;
        let axis_len = if horizontal { body.width } else { body.height };
        let weights: Vec<f64> = zoom.children.iter().map(TreeNode::total_value).collect();
        let max_weight = weights.iter().cloned().fold(0.0_f64, f64::max);

        for (i, (offset, len)) in slice_lengths(axis_len, &weights, gap).into_iter().enumerate() {
            if len == 0 {
                continue;
            }
            let cell = if horizontal {
                Rect { x: body.x + offset, width: len, ..body }
            } else {
                Rect { y: body.y + offset, height: len, ..body }
            };
            let child = &zoom.children[i];
            let fraction = if max_weight > 0.0 {
                child.total_value() / max_weight
            } else {
                0.0
            };
            render_cell(frame, cell, props, child, i, fraction, &history, !path.is_empty());

            let mut child_path = path.clone();
            child_path.push(i);
            hits.push(HitRegion {
                area: cell,
                instance_id: props.instance_id.to_string(),
                kind: HitKind::Node(child_path),
            });
        }
    }

    fn navigate(&mut self, instance_id: &str, path: &[usize]) {
        let view = self
            .views
            .entry(instance_id.to_string())
            .or_insert(ViewState {
                revision: 0,
                path: Vec::new(),
            });
        view.path = path.to_vec();
    }

    fn navigate_back(&mut self, instance_id: &str) -> bool {
        match self.views.get_mut(instance_id) {
            Some(view) => view.path.pop().is_some(),
            None => false,
        }
    }

    fn drop_instance(&mut self, instance_id: &str) {
        self.views.remove(instance_id);
    }
}

/// Breadcrumb trail and back control on the viewport's top line.
fn render_chrome(
    frame: &mut Frame,
    area: Rect,
    props: &TreeMapProps,
    history: &[String],
    hits: &mut Vec<HitRegion>,
) {
    let (zoom_name, ancestors) = match history.split_last() {
        Some(split) => split,
        None => return,
    };
    let mut spans: Vec<Span> = Vec::new();
    if props.breadcrumb_enabled {
        for name in ancestors {
            spans.push(Span::styled(name.clone(), Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            zoom_name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    if props.back_button_enabled && !ancestors.is_empty() {
        let label = " ◀ back ";
        let w = label.len() as u16;
        if area.width > w {
            let back_area = Rect {
                x: area.x + area.width - w,
                width: w,
                ..area
            };
            frame.render_widget(
                Paragraph::new(Span::styled(
                    label,
                    Style::default().fg(Color::Black).bg(Color::Gray),
                )),
                back_area,
            );
            hits.push(HitRegion {
                area: back_area,
                instance_id: props.instance_id.to_string(),
                kind: HitKind::Back,
            });
        }
    }
}

fn render_cell(
    frame: &mut Frame,
    cell: Rect,
    props: &TreeMapProps,
    node_data: &TreeNode,
    index: usize,
    fraction: f64,
    history: &[String],
    can_navigate_back: bool,
) {
    let background = cell_color(
        props.color_behavior,
        props.color_stops,
        index,
        fraction,
        &node_data.name,
    );

    if props.color_behavior == ColorBehavior::BorderOnly {
        let border_color = first_stop_color(props.color_stops);
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
            cell,
        );
    } else if let Some(bg) = background {
        frame.render_widget(Block::default().style(Style::default().bg(bg)), cell);
    }

    let ctx = NodeRenderCtx {
        node: node_data,
        area: cell,
        background,
        can_navigate_back,
        history,
    };
    match props.node_renderer {
        Some(renderer) => renderer.render(frame, &ctx),
        None => node::render_default(frame, &ctx),
    }
}

/// Proportional (offset, length) per weight along an axis, with `gap` cells
/// between slices. Cumulative rounding, so the lengths tile the available
/// span exactly; zero total weight degrades to equal shares.
fn slice_lengths(axis_len: u16, weights: &[f64], gap: u16) -> Vec<(u16, u16)> {
    let n = weights.len();
    if n == 0 {
        return Vec::new();
    }
    let gaps_total = gap * (n as u16 - 1).min(axis_len);
    let avail = axis_len.saturating_sub(gaps_total);
    let sum: f64 = weights.iter().sum();
    let effective: Vec<f64> = if sum > 0.0 {
        weights.to_vec()
    } else {
        vec![1.0; n]
    };
    let total: f64 = effective.iter().sum();

    let mut out = Vec::with_capacity(n);
    let mut acc = 0.0_f64;
    let mut used: u16 = 0;
    for (i, w) in effective.iter().enumerate() {
        acc += w;
        let end = ((acc / total) * avail as f64).round() as u16;
        let len = end.saturating_sub(used);
        let offset = used + gap * i as u16;
        out.push((offset, len));
        used = end;
    }
    out
}

fn first_stop_color(stops: &[String]) -> Color {
    stops
        .first()
        .and_then(|s| parse_hex_color(s))
        .unwrap_or(Color::Gray)
}

/// Background for one cell, the simplest faithful reading of each behavior.
/// Deterministic: the "random" family hashes the node name, so a cell keeps
/// its color across frames.
fn cell_color(
    behavior: ColorBehavior,
    stops: &[String],
    index: usize,
    fraction: f64,
    name: &str,
) -> Option<Color> {
    let first = stops.first().and_then(|s| parse_hex_color(s));
    let last = stops.last().and_then(|s| parse_hex_color(s));
    match behavior {
        ColorBehavior::OneColor => first,
        ColorBehavior::Gradient | ColorBehavior::Heatmap => match (first, last) {
            (Some(a), Some(b)) => Some(lerp_color(a, b, fraction)),
            _ => first.or(last),
        },
        ColorBehavior::Discrete => {
            if stops.is_empty() {
                None
            } else {
                parse_hex_color(&stops[index % stops.len()])
            }
        }
        ColorBehavior::Transparent | ColorBehavior::BorderOnly => None,
        ColorBehavior::Random => {
            let h = name_hash(name);
            Some(Color::Rgb((h >> 16) as u8, (h >> 8) as u8, h as u8))
        }
        ColorBehavior::RandomRangeColor => {
            if stops.is_empty() {
                None
            } else {
                parse_hex_color(&stops[name_hash(name) as usize % stops.len()])
            }
        }
        ColorBehavior::Wild => {
            let h = name_hash(name);
            Some(Color::Rgb(
                (h ^ (h >> 5)) as u8,
                (h >> 11) as u8,
                (h >> 3).wrapping_mul(7) as u8,
            ))
        }
    }
}

fn name_hash(name: &str) -> u32 {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    hasher.finish() as u32
}

fn lerp_color(a: Color, b: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (a, b) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ => a,
    }
}

/// Short text form used by the status bar when a cell is hovered.
pub fn describe_node(node: &TreeNode) -> String {
    match node.value {
        Some(v) => format!("{} ({})", node.name, format_value(v)),
        None => node.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_tree;

    #[test]
    fn test_revision_change_resets_navigation() {
        let mut engine = SliceEngine::new();
        engine.ensure_view("a", 0);
        engine.navigate("a", &[1, 0]);
        assert_eq!(engine.current_path("a"), &[1, 0]);

        // Same revision: state survives.
        engine.ensure_view("a", 0);
        assert_eq!(engine.current_path("a"), &[1, 0]);

        // New revision: state is discarded.
        engine.ensure_view("a", 1);
        assert_eq!(engine.current_path("a"), &[] as &[usize]);
    }

    #[test]
    fn test_navigate_back_pops_one_level() {
        let mut engine = SliceEngine::new();
        engine.ensure_view("a", 0);
        engine.navigate("a", &[2, 1]);
        assert!(engine.navigate_back("a"));
        assert_eq!(engine.current_path("a"), &[2]);
        assert!(engine.navigate_back("a"));
        assert!(!engine.navigate_back("a"));
        assert!(!engine.navigate_back("unknown"));
    }

    #[test]
    fn test_drop_instance_forgets_state() {
        let mut engine = SliceEngine::new();
        engine.ensure_view("a", 3);
        engine.navigate("a", &[0]);
        engine.drop_instance("a");
        assert_eq!(engine.current_path("a"), &[] as &[usize]);
    }

    #[test]
    fn test_slice_lengths_proportional() {
        let slices = slice_lengths(10, &[1.0, 1.0], 0);
        assert_eq!(slices, vec![(0, 5), (5, 5)]);

        let slices = slice_lengths(12, &[1.0, 2.0], 0);
        assert_eq!(slices, vec![(0, 4), (4, 8)]);
    }

    #[test]
    fn test_slice_lengths_zero_weights_split_equally() {
        let slices = slice_lengths(9, &[0.0, 0.0, 0.0], 0);
        let lens: Vec<u16> = slices.iter().map(|(_, l)| *l).collect();
        assert_eq!(lens.iter().sum::<u16>(), 9);
        assert!(lens.iter().all(|&l| l == 3));
    }

    #[test]
    fn test_slice_lengths_respect_gaps() {
        let slices = slice_lengths(11, &[1.0, 1.0], 1);
        assert_eq!(slices, vec![(0, 5), (6, 5)]);
    }

    #[test]
    fn test_cell_color_behaviors() {
        let stops = vec!["#000000".to_string(), "#ffffff".to_string()];
        assert_eq!(
            cell_color(ColorBehavior::OneColor, &stops, 0, 0.5, "x"),
            Some(Color::Rgb(0, 0, 0))
        );
        assert_eq!(
            cell_color(ColorBehavior::Gradient, &stops, 0, 0.0, "x"),
            Some(Color::Rgb(0, 0, 0))
        );
        assert_eq!(
            cell_color(ColorBehavior::Gradient, &stops, 0, 1.0, "x"),
            Some(Color::Rgb(255, 255, 255))
        );
        assert_eq!(
            cell_color(ColorBehavior::Discrete, &stops, 3, 0.0, "x"),
            Some(Color::Rgb(255, 255, 255))
        );
        assert_eq!(cell_color(ColorBehavior::Transparent, &stops, 0, 0.5, "x"), None);
        assert_eq!(cell_color(ColorBehavior::BorderOnly, &stops, 0, 0.5, "x"), None);
        // Deterministic per name.
        assert_eq!(
            cell_color(ColorBehavior::Random, &stops, 0, 0.0, "Asia"),
            cell_color(ColorBehavior::Random, &stops, 5, 0.9, "Asia")
        );
    }

    #[test]
    fn test_describe_node() {
        let leaf = parse_tree(r#"{"name": "Paris", "value": 3}"#).unwrap();
        assert_eq!(describe_node(&leaf), "Paris (3)");
        let bare = parse_tree(r#"{"name": "Europe"}"#).unwrap();
        assert_eq!(describe_node(&bare), "Europe");
    }
}
