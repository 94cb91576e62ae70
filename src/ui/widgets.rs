//! Reusable UI widgets for treemate
//!
//! Shell chrome shared across the panel and the viewport grid:
//! - Popup dialogs
//! - Flash messages
//! - Status bar
//! - Layout helpers

use crate::ui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render a centered popup dialog
pub fn render_popup(
    frame: &mut Frame,
    title: &str,
    content: Vec<Line>,
    buttons: &[(&str, char)],
    theme: &Theme,
    area: Rect,
) {
    let popup_width = 56.min(area.width.saturating_sub(4));
    let popup_height = (content.len() as u16 + 6).min(area.height.saturating_sub(2));
    let popup_area = centered_rect(popup_width, popup_height, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" {} ", title))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());
    frame.render_widget(block, popup_area);

    let inner = Rect {
        x: popup_area.x + 2,
        y: popup_area.y + 1,
        width: popup_area.width.saturating_sub(4),
        height: popup_area.height.saturating_sub(3),
    };
    frame.render_widget(
        Paragraph::new(content)
            .style(theme.text())
            .wrap(Wrap { trim: false }),
        inner,
    );

    if !buttons.is_empty() && popup_area.height >= 3 {
        let button_area = Rect {
            x: popup_area.x + 2,
            y: popup_area.y + popup_area.height - 2,
            width: popup_area.width.saturating_sub(4),
            height: 1,
        };
        let spans: Vec<Span> = buttons
            .iter()
            .enumerate()
            .flat_map(|(i, (label, key))| {
                let mut s = vec![
                    Span::styled("[", theme.text_dim()),
                    Span::styled(
                        key.to_string(),
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled("] ", theme.text_dim()),
                    Span::styled(*label, theme.text()),
                ];
                if i < buttons.len() - 1 {
                    s.push(Span::raw("    "));
                }
                s
            })
            .collect();
        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            button_area,
        );
    }
}

/// Render an error popup
pub fn render_error_popup(frame: &mut Frame, title: &str, message: &str, theme: &Theme, area: Rect) {
    let content = vec![
        Line::raw(""),
        Line::styled(message.to_string(), theme.error()),
        Line::raw(""),
    ];
    render_popup(frame, title, content, &[("OK", 'o')], theme, area);
}

/// Render a flash message on the bottom line of `area`
pub fn render_flash_message(
    frame: &mut Frame,
    message: &str,
    is_error: bool,
    theme: &Theme,
    area: Rect,
) {
    let style = if is_error { theme.error() } else { theme.success() };
    let prefix = if is_error { "✗ " } else { "✓ " };
    let flash_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };
    frame.render_widget(Clear, flash_area);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(message.to_string(), style),
        ])),
        flash_area,
    );
}

/// Render the status bar: hint spans left, state spans right
pub fn render_status_bar(
    frame: &mut Frame,
    left: Line,
    right: Line,
    theme: &Theme,
    area: Rect,
) {
    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(theme.block_style()), area);

    let right_len = right.width() as u16;
    frame.render_widget(Paragraph::new(left).style(theme.text_dim()), area);
    if area.width > right_len {
        let right_area = Rect {
            x: area.x + area.width - right_len - 1,
            y: area.y,
            width: right_len + 1,
            height: 1,
        };
        frame.render_widget(Paragraph::new(right).style(theme.text_dim()), right_area);
    }
}

/// Helper: Create a centered rect of given size
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect { x: 0, y: 0, width: 80, height: 24 };
        let rect = centered_rect(40, 10, area);
        assert_eq!(rect, Rect { x: 20, y: 7, width: 40, height: 10 });
        // Larger than the area: pinned and shrunk.
        let rect = centered_rect(100, 30, area);
        assert_eq!(rect, Rect { x: 0, y: 0, width: 80, height: 24 });
    }
}
