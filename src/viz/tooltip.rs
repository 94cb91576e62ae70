//! Inspection tooltip — summarizer output as an overlay, plus anchor math
//!
//! The tooltip body is the TreeSummarizer's structured output: a header with
//! the node's stats, the flattened custom-data properties, and the
//! depth-bounded children tree with count badges. Placement supports all
//! fifteen tooltip positions and clamps into the viewport.

use crate::modules::summary::{self, ChildPreview, NodeSummary, PropertyEntry, PropertyValue};
use crate::types::{format_value, TreeNode};
use crate::viz::{TooltipPosition, TooltipRenderer};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

/// The custom tooltip renderer: full summarizer output.
pub struct SummaryTooltipRenderer;

impl TooltipRenderer for SummaryTooltipRenderer {
    fn render(&self, node: &TreeNode) -> Text<'static> {
        summary_text(&summary::summarize(node))
    }
}

/// Plain tooltip body used when the custom tooltip is switched off:
/// what the external component would show by default.
pub fn basic_text(node: &TreeNode) -> Text<'static> {
    let mut spans = vec![Span::styled(
        node.name.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(value) = node.value {
        spans.push(Span::styled(
            format!("  {}", format_value(value)),
            Style::default().fg(Color::Gray),
        ));
    }
    Text::from(Line::from(spans))
}

pub fn summary_text(summary: &NodeSummary) -> Text<'static> {
    let dim = Style::default().fg(Color::Gray);
    let title = Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD);

    let mut header = vec![Span::styled(
        summary.name.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(value) = summary.value {
        header.push(Span::styled(format!("  {} value", format_value(value)), dim));
    }
    header.push(Span::styled(
        format!("  {} children", summary.child_count),
        dim,
    ));
    if summary.descendant_count > 0 {
        header.push(Span::styled(
            format!("  {} descendants", summary.descendant_count),
            dim,
        ));
    }

    let mut lines = vec![Line::from(header)];

    if !summary.properties.is_empty() {
        lines.push(Line::styled("Properties", title));
        for entry in &summary.properties {
            push_property(&mut lines, entry, 1);
        }
    }

    if summary.child_count > 0 {
        lines.push(Line::styled("Children Tree", title));
        for child in &summary.preview {
            push_preview(&mut lines, child, 1);
        }
    }

    Text::from(lines)
}

fn push_property(lines: &mut Vec<Line<'static>>, entry: &PropertyEntry, depth: usize) {
    let indent = "  ".repeat(depth);
    let key_style = Style::default().add_modifier(Modifier::BOLD);
    match &entry.value {
        PropertyValue::Null => {
            lines.push(Line::from(vec![
                Span::raw(indent),
                Span::styled(format!("{}: ", entry.key), key_style),
                // Distinct literal marker, never confused with an absent key.
                Span::styled("null", Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)),
            ]));
        }
        PropertyValue::Literal(text) => {
            lines.push(Line::from(vec![
                Span::raw(indent),
                Span::styled(format!("{}: ", entry.key), key_style),
                Span::raw(text.clone()),
            ]));
        }
        PropertyValue::Nested(entries) => {
            lines.push(Line::from(vec![
                Span::raw(indent),
                Span::styled(format!("{}:", entry.key), key_style),
            ]));
            for nested in entries {
                push_property(lines, nested, depth + 1);
            }
        }
    }
}

fn push_preview(lines: &mut Vec<Line<'static>>, child: &ChildPreview, depth: usize) {
    let indent = "  ".repeat(depth);
    let mut spans = vec![
        Span::raw(indent),
        Span::styled("─ ", Style::default().fg(Color::DarkGray)),
        Span::raw(child.name.clone()),
    ];
    if let Some(value) = child.value {
        spans.push(Span::styled(
            format!(" ({})", format_value(value)),
            Style::default().fg(Color::Gray),
        ));
    }
    if child.child_count > 0 {
        spans.push(Span::styled(
            format!(" [{}]", child.child_count),
            Style::default().fg(Color::DarkGray),
        ));
    }
    lines.push(Line::from(spans));
    for nested in &child.children {
        push_preview(lines, nested, depth + 1);
    }
}

/// Measure a tooltip body: (width, height) of the text itself; the caller
/// adds its border cells.
pub fn text_size(text: &Text) -> (u16, u16) {
    let width = text.lines.iter().map(Line::width).max().unwrap_or(0) as u16;
    (width, text.lines.len() as u16)
}

/// Compute where a tooltip of `size` goes for the given position mode.
/// `mouse` is the pointer cell, `node_area` the hovered cell, `viewport`
/// the instance's screen area. The result is clamped into the viewport.
pub fn anchor_rect(
    position: TooltipPosition,
    mouse: (u16, u16),
    node_area: Rect,
    viewport: Rect,
    size: (u16, u16),
) -> Rect {
    let (w, h) = (
        size.0.min(viewport.width),
        size.1.min(viewport.height),
    );
    let (mx, my) = (mouse.0 as i32, mouse.1 as i32);
    let (wi, hi) = (w as i32, h as i32);

    let centered_x = |around: i32| around - wi / 2;
    let (x, y) = match position {
        TooltipPosition::MouseRight => (mx + 2, my),
        TooltipPosition::MouseTop => (centered_x(mx), my - hi - 1),
        TooltipPosition::MouseBottom => (centered_x(mx), my + 2),
        TooltipPosition::FixedTopLeft => (viewport.x as i32, viewport.y as i32),
        TooltipPosition::FixedTopRight => (
            viewport.x as i32 + viewport.width as i32 - wi,
            viewport.y as i32,
        ),
        TooltipPosition::FixedBottomLeft => (
            viewport.x as i32,
            viewport.y as i32 + viewport.height as i32 - hi,
        ),
        TooltipPosition::FixedBottomRight => (
            viewport.x as i32 + viewport.width as i32 - wi,
            viewport.y as i32 + viewport.height as i32 - hi,
        ),
        TooltipPosition::FixedTopCenter => (
            centered_x(viewport.x as i32 + viewport.width as i32 / 2),
            viewport.y as i32,
        ),
        TooltipPosition::FixedBottomCenter => (
            centered_x(viewport.x as i32 + viewport.width as i32 / 2),
            viewport.y as i32 + viewport.height as i32 - hi,
        ),
        TooltipPosition::NodeTopLeft => (node_area.x as i32, node_area.y as i32),
        TooltipPosition::NodeTopRight => (
            node_area.x as i32 + node_area.width as i32 - wi,
            node_area.y as i32,
        ),
        TooltipPosition::NodeBottomLeft => (
            node_area.x as i32,
            node_area.y as i32 + node_area.height as i32 - hi,
        ),
        TooltipPosition::NodeBottomRight => (
            node_area.x as i32 + node_area.width as i32 - wi,
            node_area.y as i32 + node_area.height as i32 - hi,
        ),
        TooltipPosition::NodeTopCenter => (
            centered_x(node_area.x as i32 + node_area.width as i32 / 2),
            node_area.y as i32,
        ),
        TooltipPosition::NodeBottomCenter => (
            centered_x(node_area.x as i32 + node_area.width as i32 / 2),
            node_area.y as i32 + node_area.height as i32 - hi,
        ),
    };

    let max_x = viewport.x as i32 + viewport.width as i32 - wi;
    let max_y = viewport.y as i32 + viewport.height as i32 - hi;
    Rect {
        x: x.clamp(viewport.x as i32, max_x.max(viewport.x as i32)) as u16,
        y: y.clamp(viewport.y as i32, max_y.max(viewport.y as i32)) as u16,
        width: w,
        height: h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_tree;

    fn viewport() -> Rect {
        Rect { x: 0, y: 0, width: 80, height: 24 }
    }

    fn node_area() -> Rect {
        Rect { x: 40, y: 10, width: 20, height: 8 }
    }

    #[test]
    fn test_fixed_corners() {
        let size = (10, 4);
        let tl = anchor_rect(TooltipPosition::FixedTopLeft, (0, 0), node_area(), viewport(), size);
        assert_eq!((tl.x, tl.y), (0, 0));
        let br = anchor_rect(TooltipPosition::FixedBottomRight, (0, 0), node_area(), viewport(), size);
        assert_eq!((br.x, br.y), (70, 20));
        let tc = anchor_rect(TooltipPosition::FixedTopCenter, (0, 0), node_area(), viewport(), size);
        assert_eq!((tc.x, tc.y), (35, 0));
    }

    #[test]
    fn test_mouse_right_clamps_at_edge() {
        let size = (10, 4);
        let near_edge = anchor_rect(TooltipPosition::MouseRight, (78, 5), node_area(), viewport(), size);
        assert_eq!(near_edge.x, 70); // shifted back inside
        assert_eq!(near_edge.y, 5);
    }

    #[test]
    fn test_node_anchors() {
        let size = (10, 4);
        let nbc = anchor_rect(TooltipPosition::NodeBottomCenter, (0, 0), node_area(), viewport(), size);
        assert_eq!((nbc.x, nbc.y), (45, 14));
        let ntl = anchor_rect(TooltipPosition::NodeTopLeft, (0, 0), node_area(), viewport(), size);
        assert_eq!((ntl.x, ntl.y), (40, 10));
    }

    #[test]
    fn test_oversized_tooltip_shrinks_to_viewport() {
        let rect = anchor_rect(
            TooltipPosition::MouseTop,
            (5, 5),
            node_area(),
            viewport(),
            (200, 100),
        );
        assert_eq!(rect.width, 80);
        assert_eq!(rect.height, 24);
        assert_eq!((rect.x, rect.y), (0, 0));
    }

    #[test]
    fn test_summary_text_sections() {
        let node = parse_tree(
            r#"{"name": "Asia", "value": 12,
                "customData": {"population": "4.7 billion", "old": null},
                "children": [{"name": "China", "children": [
                    {"name": "Beijing", "value": 20}, {"name": "Shanghai", "value": 15}
                ]}]}"#,
        )
        .unwrap();
        let text = SummaryTooltipRenderer.render(&node);
        let flat: Vec<String> = text
            .lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.clone()).collect::<String>())
            .collect();

        assert!(flat[0].contains("Asia"));
        assert!(flat[0].contains("12 value"));
        assert!(flat[0].contains("1 children"));
        assert!(flat[0].contains("3 descendants"));
        assert!(flat.iter().any(|l| l == "Properties"));
        assert!(flat.iter().any(|l| l.contains("old: null")));
        assert!(flat.iter().any(|l| l == "Children Tree"));
        // China has 2 children: badge plus expanded grandchildren.
        assert!(flat.iter().any(|l| l.contains("China") && l.contains("[2]")));
        assert!(flat.iter().any(|l| l.contains("Beijing") && l.contains("(20)")));
    }

    #[test]
    fn test_basic_text_is_one_line() {
        let node = parse_tree(r#"{"name": "Paris", "value": 3}"#).unwrap();
        let text = basic_text(&node);
        assert_eq!(text.lines.len(), 1);
    }

    #[test]
    fn test_text_size() {
        let node = parse_tree(r#"{"name": "Paris", "value": 3}"#).unwrap();
        let (w, h) = text_size(&basic_text(&node));
        assert_eq!(h, 1);
        assert!(w >= "Paris  3".len() as u16);
    }
}
