//! Node body rendering — the render callback handed to the engine
//!
//! Ports the original node component's size gates to terminal cells: the
//! icon needs a minimum combined size, the name label and the value line
//! each have their own width/height thresholds.

use crate::modules::icons;
use crate::types::format_value;
use crate::viz::{NodeRenderCtx, NodeRenderer};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Icons are suppressed when the smaller cell dimension is below this.
pub const ICON_MIN_DIM: u16 = 3;
/// Name label thresholds (strictly-greater, like the original's 60x30 px).
pub const NAME_MIN_WIDTH: u16 = 7;
pub const NAME_MIN_HEIGHT: u16 = 2;
/// Value line thresholds (the original's 80x60 px).
pub const VALUE_MIN_WIDTH: u16 = 10;
pub const VALUE_MIN_HEIGHT: u16 = 4;

/// The custom node renderer: marker icon or name label, plus a value line
/// when the cell is large enough.
pub struct IconNodeRenderer {
    pub show_icons: bool,
}

impl NodeRenderer for IconNodeRenderer {
    fn render(&self, frame: &mut Frame, ctx: &NodeRenderCtx) {
        let area = ctx.area;
        if area.width == 0 || area.height == 0 {
            return;
        }
        let bg = ctx.background;

        if self.show_icons {
            if area.width.min(area.height) >= ICON_MIN_DIM {
                let marker = icons::resolve(&ctx.node.name);
                let row = Rect {
                    y: area.y + area.height / 2,
                    height: 1,
                    ..area
                };
                frame.render_widget(
                    Paragraph::new(Line::from(Span::styled(
                        marker,
                        with_bg(Style::default().add_modifier(Modifier::DIM), bg),
                    )))
                    .alignment(Alignment::Center),
                    row,
                );
            }
        } else if area.width > NAME_MIN_WIDTH && area.height > NAME_MIN_HEIGHT {
            let row = Rect {
                y: area.y + area.height / 2,
                height: 1,
                ..area
            };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    truncate(&ctx.node.name, area.width.saturating_sub(2) as usize),
                    with_bg(Style::default().fg(Color::White), bg),
                )))
                .alignment(Alignment::Center),
                row,
            );
        }

        if area.width > VALUE_MIN_WIDTH && area.height > VALUE_MIN_HEIGHT {
            if let Some(value) = ctx.node.value {
                let bottom = Rect {
                    y: area.y + area.height - 1,
                    height: 1,
                    ..area
                };
                frame.render_widget(
                    Paragraph::new(Line::from(Span::styled(
                        format_value(value),
                        with_bg(Style::default().fg(Color::White), bg),
                    )))
                    .alignment(Alignment::Center),
                    bottom,
                );
            }
        }
    }
}

/// Default node body used when the custom renderer is switched off:
/// a centered name with the value in parentheses when there is room. In a
/// zoomed viewport the parent's name is prefixed dimly, so the context
/// survives even with the breadcrumb switched off.
pub fn render_default(frame: &mut Frame, ctx: &NodeRenderCtx) {
    let area = ctx.area;
    if area.width < 4 || area.height == 0 {
        return;
    }
    let mut label = truncate(&ctx.node.name, area.width.saturating_sub(2) as usize);
    if let Some(value) = ctx.node.value {
        let with_value = format!("{} ({})", label, format_value(value));
        if with_value.chars().count() + 2 <= area.width as usize {
            label = with_value;
        }
    }
    if ctx.can_navigate_back && area.height > 2 {
        if let Some(parent) = ctx.history.last() {
            let with_parent = format!("{} ▸ {}", parent, label);
            if with_parent.chars().count() + 2 <= area.width as usize {
                label = with_parent;
            }
        }
    }
    let row = Rect {
        y: area.y + area.height / 2,
        height: 1,
        ..area
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            label,
            with_bg(Style::default().fg(Color::White), ctx.background),
        )))
        .alignment(Alignment::Center),
        row,
    );
}

fn with_bg(style: Style, bg: Option<Color>) -> Style {
    match bg {
        Some(color) => style.bg(color),
        None => style,
    }
}

fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let count = s.chars().count();
    if count <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
