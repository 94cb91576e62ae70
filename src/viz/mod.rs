//! External visualization component boundary
//!
//! The treemap layout engine proper (rectangle subdivision, zoom animation)
//! is an external collaborator. This module pins down its configuration
//! surface: the color-behavior and tooltip-position enumerations, the
//! per-instance props bundle, the render-callback seams, and the engine
//! trait itself. `engine.rs` ships a deliberately minimal reference engine
//! behind that trait.

pub mod engine;
pub mod node;
pub mod tooltip;

pub use engine::SliceEngine;

use crate::types::TreeNode;
use anyhow::bail;
use ratatui::{layout::Rect, style::Color, text::Text, Frame};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How an instance's color stops are applied to node rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ColorBehavior {
    OneColor,
    Gradient,
    Discrete,
    Transparent,
    BorderOnly,
    Random,
    RandomRangeColor,
    Wild,
    #[default]
    Heatmap,
}

impl ColorBehavior {
    pub fn all() -> &'static [ColorBehavior] {
        &[
            ColorBehavior::OneColor,
            ColorBehavior::Gradient,
            ColorBehavior::Discrete,
            ColorBehavior::Transparent,
            ColorBehavior::BorderOnly,
            ColorBehavior::Random,
            ColorBehavior::RandomRangeColor,
            ColorBehavior::Wild,
            ColorBehavior::Heatmap,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorBehavior::OneColor => "oneColor",
            ColorBehavior::Gradient => "gradient",
            ColorBehavior::Discrete => "discrete",
            ColorBehavior::Transparent => "transparent",
            ColorBehavior::BorderOnly => "borderOnly",
            ColorBehavior::Random => "random",
            ColorBehavior::RandomRangeColor => "randomRangeColor",
            ColorBehavior::Wild => "wild",
            ColorBehavior::Heatmap => "heatmap",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ColorBehavior::OneColor => "One Color",
            ColorBehavior::Gradient => "Gradient",
            ColorBehavior::Discrete => "Discrete",
            ColorBehavior::Transparent => "Transparent",
            ColorBehavior::BorderOnly => "Border Only",
            ColorBehavior::Random => "Random",
            ColorBehavior::RandomRangeColor => "Random Range Color",
            ColorBehavior::Wild => "Wild",
            ColorBehavior::Heatmap => "Heatmap",
        }
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|b| b == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }
}

impl FromStr for ColorBehavior {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::all().iter().find(|b| b.as_str() == s) {
            Some(b) => Ok(*b),
            None => bail!("unknown color behavior: {s}"),
        }
    }
}

/// Where the inspection tooltip is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TooltipPosition {
    #[default]
    MouseRight,
    MouseTop,
    MouseBottom,
    FixedTopLeft,
    FixedTopRight,
    FixedBottomLeft,
    FixedBottomRight,
    FixedTopCenter,
    FixedBottomCenter,
    NodeTopLeft,
    NodeTopRight,
    NodeBottomLeft,
    NodeBottomRight,
    NodeTopCenter,
    NodeBottomCenter,
}

impl TooltipPosition {
    pub fn all() -> &'static [TooltipPosition] {
        &[
            TooltipPosition::MouseRight,
            TooltipPosition::MouseTop,
            TooltipPosition::MouseBottom,
            TooltipPosition::FixedTopLeft,
            TooltipPosition::FixedTopRight,
            TooltipPosition::FixedBottomLeft,
            TooltipPosition::FixedBottomRight,
            TooltipPosition::FixedTopCenter,
            TooltipPosition::FixedBottomCenter,
            TooltipPosition::NodeTopLeft,
            TooltipPosition::NodeTopRight,
            TooltipPosition::NodeBottomLeft,
            TooltipPosition::NodeBottomRight,
            TooltipPosition::NodeTopCenter,
            TooltipPosition::NodeBottomCenter,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TooltipPosition::MouseRight => "mouseRight",
            TooltipPosition::MouseTop => "mouseTop",
            TooltipPosition::MouseBottom => "mouseBottom",
            TooltipPosition::FixedTopLeft => "fixedTopLeft",
            TooltipPosition::FixedTopRight => "fixedTopRight",
            TooltipPosition::FixedBottomLeft => "fixedBottomLeft",
            TooltipPosition::FixedBottomRight => "fixedBottomRight",
            TooltipPosition::FixedTopCenter => "fixedTopCenter",
            TooltipPosition::FixedBottomCenter => "fixedBottomCenter",
            TooltipPosition::NodeTopLeft => "nodeTopLeft",
            TooltipPosition::NodeTopRight => "nodeTopRight",
            TooltipPosition::NodeBottomLeft => "nodeBottomLeft",
            TooltipPosition::NodeBottomRight => "nodeBottomRight",
            TooltipPosition::NodeTopCenter => "nodeTopCenter",
            TooltipPosition::NodeBottomCenter => "nodeBottomCenter",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TooltipPosition::MouseRight => "Mouse Right",
            TooltipPosition::MouseTop => "Mouse Top",
            TooltipPosition::MouseBottom => "Mouse Bottom",
            TooltipPosition::FixedTopLeft => "Fixed Top Left",
            TooltipPosition::FixedTopRight => "Fixed Top Right",
            TooltipPosition::FixedBottomLeft => "Fixed Bottom Left",
            TooltipPosition::FixedBottomRight => "Fixed Bottom Right",
            TooltipPosition::FixedTopCenter => "Fixed Top Center",
            TooltipPosition::FixedBottomCenter => "Fixed Bottom Center",
            TooltipPosition::NodeTopLeft => "Node Top Left",
            TooltipPosition::NodeTopRight => "Node Top Right",
            TooltipPosition::NodeBottomLeft => "Node Bottom Left",
            TooltipPosition::NodeBottomRight => "Node Bottom Right",
            TooltipPosition::NodeTopCenter => "Node Top Center",
            TooltipPosition::NodeBottomCenter => "Node Bottom Center",
        }
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|p| p == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }
}

impl FromStr for TooltipPosition {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::all().iter().find(|p| p.as_str() == s) {
            Some(p) => Ok(*p),
            None => bail!("unknown tooltip position: {s}"),
        }
    }
}

/// Context handed to a node render callback: the node, its cell, the color
/// the engine picked, and the navigation situation of the hosting viewport.
pub struct NodeRenderCtx<'a> {
    pub node: &'a TreeNode,
    pub area: Rect,
    pub background: Option<Color>,
    /// Whether the viewport currently has somewhere to navigate back to.
    pub can_navigate_back: bool,
    /// Navigation stack of the hosting viewport: names root first, ending
    /// at the current zoom node.
    pub history: &'a [String],
}

/// Override renderer for node bodies.
pub trait NodeRenderer {
    fn render(&self, frame: &mut Frame, ctx: &NodeRenderCtx);
}

/// Override renderer for tooltip bodies.
pub trait TooltipRenderer {
    fn render(&self, node: &TreeNode) -> Text<'static>;
}

/// Per-instance configuration handed to the engine each frame.
pub struct TreeMapProps<'a> {
    pub instance_id: &'a str,
    pub data: &'a TreeNode,
    /// Bumped whenever `data` was structurally replaced. The engine MUST
    /// discard all internal zoom/navigation/animation state for this
    /// instance when it changes.
    pub revision: u64,
    pub color_stops: &'a [String],
    pub color_behavior: ColorBehavior,
    pub tooltip_position: TooltipPosition,
    pub animation_duration_ms: u32,
    pub padding_inner: u16,
    pub border_radius: u16,
    pub breadcrumb_enabled: bool,
    pub back_button_enabled: bool,
    pub tooltip_enabled: bool,
    pub node_renderer: Option<&'a dyn NodeRenderer>,
    pub tooltip_renderer: Option<&'a dyn TooltipRenderer>,
}

/// What a reported screen region maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitKind {
    /// A node cell, addressed by child-index path from the data root.
    Node(Vec<usize>),
    /// The back-navigation control.
    Back,
}

/// A screen region the engine reported for hover- and click-testing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRegion {
    pub area: Rect,
    pub instance_id: String,
    pub kind: HitKind,
}

impl HitRegion {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.area.x
            && col < self.area.x + self.area.width
            && row >= self.area.y
            && row < self.area.y + self.area.height
    }
}

/// The engine boundary. One engine instance serves every viewport; per-
/// viewport state is keyed by instance id.
pub trait TreeMapEngine {
    /// Draw one instance into `area`, appending hit regions for every
    /// interactive cell drawn this frame.
    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        props: &TreeMapProps,
        hits: &mut Vec<HitRegion>,
    );

    /// Zoom the viewport to the node at `path` (from a cell click).
    fn navigate(&mut self, instance_id: &str, path: &[usize]);

    /// Pop one navigation level. Returns false at the root.
    fn navigate_back(&mut self, instance_id: &str) -> bool;

    /// Forget all state for a removed instance.
    fn drop_instance(&mut self, instance_id: &str);
}

/// Parse a `#rrggbb` (or `#rgb`) hex color.
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.trim().strip_prefix('#')?;
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        3 => {
            let expand = |c: &str| u8::from_str_radix(c, 16).ok().map(|v| v * 17);
            Some(Color::Rgb(
                expand(&hex[0..1])?,
                expand(&hex[1..2])?,
                expand(&hex[2..3])?,
            ))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_behavior_cycle_is_closed() {
        let mut b = ColorBehavior::OneColor;
        for _ in 0..ColorBehavior::all().len() {
            b = b.next();
        }
        assert_eq!(b, ColorBehavior::OneColor);
    }

    #[test]
    fn test_color_behavior_wire_names() {
        assert_eq!(ColorBehavior::RandomRangeColor.as_str(), "randomRangeColor");
        assert_eq!(ColorBehavior::default(), ColorBehavior::Heatmap);
        assert_eq!(
            "borderOnly".parse::<ColorBehavior>().unwrap(),
            ColorBehavior::BorderOnly
        );
        assert!("neon".parse::<ColorBehavior>().is_err());
    }

    #[test]
    fn test_tooltip_position_wire_names() {
        assert_eq!(TooltipPosition::all().len(), 15);
        assert_eq!(TooltipPosition::NodeBottomCenter.as_str(), "nodeBottomCenter");
        assert_eq!(
            "fixedTopCenter".parse::<TooltipPosition>().unwrap(),
            TooltipPosition::FixedTopCenter
        );
        assert!("center".parse::<TooltipPosition>().is_err());
    }

    #[test]
    fn test_tooltip_position_cycle_is_closed() {
        let mut p = TooltipPosition::MouseRight;
        for _ in 0..TooltipPosition::all().len() {
            p = p.next();
        }
        assert_eq!(p, TooltipPosition::MouseRight);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#4ecdc4"), Some(Color::Rgb(0x4e, 0xcd, 0xc4)));
        assert_eq!(parse_hex_color("#fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(parse_hex_color("red"), None);
        assert_eq!(parse_hex_color("#12345"), None);
    }

    #[test]
    fn test_hit_region_contains() {
        let region = HitRegion {
            area: Rect { x: 2, y: 3, width: 4, height: 2 },
            instance_id: "a".into(),
            kind: HitKind::Node(vec![0]),
        };
        assert!(region.contains(2, 3));
        assert!(region.contains(5, 4));
        assert!(!region.contains(6, 3));
        assert!(!region.contains(2, 5));
    }
}
