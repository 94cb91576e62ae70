//! Main rendering module for treemate
//!
//! Renders the complete UI:
//! - Slide-out control panel (left): instance editors + display settings
//! - Viewport grid (right): one treemap per instance
//! - Global status bar (bottom)
//! - Inspection tooltip, popup overlays, flash messages

use crate::app::{
    panel_rows, App, DisplayRow, EditTarget, PanelRow, PanelTab, PopupState,
};
use crate::modules::{layout, shell::DeviceClass};
use crate::ui::theme::Theme;
use crate::ui::widgets;
use crate::viz::{
    node::IconNodeRenderer,
    parse_hex_color,
    tooltip::{self, SummaryTooltipRenderer},
    NodeRenderer, TooltipRenderer, TreeMapEngine, TreeMapProps,
};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const PANEL_WIDTH: u16 = 44;

/// Main render function – entry point for all UI rendering
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let theme = app.theme.clone();

    // Fill entire background
    frame.render_widget(Block::default().style(theme.block_style()), area);

    let vertical = Layout::vertical([
        Constraint::Min(4),    // panel + viewports
        Constraint::Length(1), // status bar
    ])
    .split(area);
    let content = vertical[0];

    app.hit_regions.clear();
    app.viewport_areas.clear();
    app.panel_area = None;
    app.overlay_area = None;

    match (app.shell.panel_open, app.shell.device_class) {
        (true, DeviceClass::Desktop) => {
            let cols = Layout::horizontal([
                Constraint::Length(PANEL_WIDTH.min(content.width / 2)),
                Constraint::Min(20),
            ])
            .split(content);
            render_viewports(frame, app, cols[1]);
            render_panel(frame, app, &theme, cols[0]);
            app.panel_area = Some(cols[0]);
        }
        (true, DeviceClass::Mobile) => {
            // Slide-out: the panel covers most of the width; the strip next
            // to it dims the viewports and closes the panel when clicked.
            render_viewports(frame, app, content);
            let panel_w = (content.width.saturating_mul(4) / 5).max(20).min(content.width);
            let panel_rect = Rect { width: panel_w, ..content };
            let overlay_rect = Rect {
                x: content.x + panel_w,
                width: content.width - panel_w,
                ..content
            };
            if overlay_rect.width > 0 {
                frame.render_widget(
                    Block::default().style(Style::default().add_modifier(Modifier::DIM)),
                    overlay_rect,
                );
                app.overlay_area = Some(overlay_rect);
            }
            render_panel(frame, app, &theme, panel_rect);
            app.panel_area = Some(panel_rect);
        }
        (false, _) => {
            render_viewports(frame, app, content);
        }
    }

    render_tooltip_overlay(frame, app, &theme);
    render_status_bar(frame, app, &theme, vertical[1]);

    if let Some(msg) = &app.flash_message {
        widgets::render_flash_message(frame, &msg.text, msg.is_error, &theme, content);
    }

    if let PopupState::Error { title, message } = &app.popup {
        widgets::render_error_popup(frame, title, message, &theme, area);
    }
}

/// Render the viewport grid: one engine draw per instance.
fn render_viewports(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.store.is_empty() {
        return;
    }
    let device = app.shell.device_class;
    let total = app.store.len();
    let cells = layout::split_area(area, total, device);

    let node_renderer = IconNodeRenderer {
        show_icons: app.settings.show_icons_enabled,
    };
    let tooltip_renderer = SummaryTooltipRenderer;

    let App {
        ref mut engine,
        ref store,
        ref settings,
        ref mut hit_regions,
        ref mut viewport_areas,
        ref theme,
        ..
    } = *app;

    for (i, (inst, cell)) in store.instances().iter().zip(cells).enumerate() {
        if cell.width < 4 || cell.height < 3 {
            continue;
        }
        let title_style = if inst.parse_error.is_some() {
            theme.warning()
        } else {
            theme.title()
        };
        let block = Block::default()
            .style(theme.block_style())
            .borders(Borders::ALL)
            .border_style(theme.border())
            .title(format!(" Map {} ", i + 1))
            .title_style(title_style);
        let inner = block.inner(cell);
        frame.render_widget(block, cell);
        viewport_areas.push((inst.id.clone(), inner));

        let props = TreeMapProps {
            instance_id: &inst.id,
            data: &inst.tree_root,
            revision: inst.revision,
            color_stops: &inst.color_stops,
            color_behavior: inst.color_behavior,
            tooltip_position: settings.tooltip_position,
            animation_duration_ms: settings.animation_duration_ms,
            padding_inner: settings.padding_inner,
            border_radius: settings.border_radius,
            breadcrumb_enabled: settings.breadcrumb_enabled,
            back_button_enabled: settings.back_button_enabled,
            tooltip_enabled: settings.tooltip_enabled,
            node_renderer: if settings.custom_node_enabled {
                Some(&node_renderer as &dyn NodeRenderer)
            } else {
                None
            },
            tooltip_renderer: if settings.custom_tooltip_enabled {
                Some(&tooltip_renderer as &dyn TooltipRenderer)
            } else {
                None
            },
        };
        engine.render(frame, inner, &props, hit_regions);
    }
}

/// Render the control panel with its two sub-tabs.
fn render_panel(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .style(theme.block_style())
        .borders(Borders::RIGHT)
        .border_style(theme.border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 3 {
        return;
    }

    // Title + tab line
    let title = Rect { height: 1, ..inner };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                " treemate",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" v{}", env!("CARGO_PKG_VERSION")),
                Style::default().fg(theme.fg_dim),
            ),
        ]))
        .style(theme.block_style()),
        title,
    );

    let tabs = Rect { y: inner.y + 1, height: 1, ..inner };
    let mut tab_spans: Vec<Span> = Vec::new();
    for tab in PanelTab::all() {
        let style = if *tab == app.panel.active_tab {
            theme.tab_active()
        } else {
            theme.tab_inactive()
        };
        tab_spans.push(Span::styled(
            format!(" [F{}] {} ", tab.index() + 1, tab.label()),
            style,
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(tab_spans)), tabs);

    let body = Rect {
        y: inner.y + 2,
        height: inner.height - 2,
        ..inner
    };

    match app.panel.active_tab {
        PanelTab::Instances => {
            if let EditTarget::Json { instance } = &app.panel.editing {
                render_json_editor(frame, app, theme, body, instance);
            } else {
                render_instances_list(frame, app, theme, body);
            }
        }
        PanelTab::Display => render_display_list(frame, app, theme, body),
    }
}

fn render_instances_list(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let rows = panel_rows(&app.store);
    let mut lines: Vec<Line> = Vec::with_capacity(rows.len());

    for (idx, row) in rows.iter().enumerate() {
        let selected = idx == app.panel.selected;
        let line = match row {
            PanelRow::InstanceHeader(i) => {
                let inst = &app.store.instances()[*i];
                Line::from(vec![
                    Span::styled(
                        format!("Map {} ", i + 1),
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("({}, rev {})", inst.id, inst.revision),
                        Style::default().fg(theme.accent_dim),
                    ),
                ])
            }
            PanelRow::Json(i) => {
                let inst = &app.store.instances()[*i];
                let status = match &inst.parse_error {
                    Some(_) => Span::styled("✗ invalid", theme.error()),
                    None => Span::styled("✓ valid", theme.success()),
                };
                Line::from(vec![
                    Span::styled("  Data JSON  ", theme.text()),
                    status,
                ])
            }
            PanelRow::ColorStop(i, c) => {
                let value = &app.store.instances()[*i].color_stops[*c];
                let editing_this = matches!(
                    &app.panel.editing,
                    EditTarget::ColorStop { instance, index }
                        if *instance == app.store.instances()[*i].id && index == c
                );
                let shown = if editing_this {
                    format!("{}▏", app.panel.edit_buffer)
                } else {
                    value.clone()
                };
                let swatch_style = match parse_hex_color(value) {
                    Some(color) => Style::default().bg(color),
                    None => theme.error(),
                };
                Line::from(vec![
                    Span::styled(format!("  Color {}: ", c + 1), theme.text()),
                    Span::styled(shown, theme.text()),
                    Span::raw(" "),
                    Span::styled("    ", swatch_style),
                ])
            }
            PanelRow::Behavior(i) => {
                let inst = &app.store.instances()[*i];
                Line::from(vec![
                    Span::styled("  Behavior: ", theme.text()),
                    Span::styled(inst.color_behavior.label(), theme.text()),
                ])
            }
            PanelRow::AddInstance => Line::from(Span::styled(
                "+ Add New TreeMap",
                theme.success(),
            )),
        };
        let line = if selected { line.style(theme.selection()) } else { line };
        lines.push(line);
    }

    // Keep the selected row in view.
    let height = area.height as usize;
    let offset = app.panel.selected.saturating_sub(height.saturating_sub(1));
    let visible: Vec<Line> = lines.into_iter().skip(offset).collect();
    frame.render_widget(Paragraph::new(visible).style(theme.block_style()), area);
}

fn render_json_editor(frame: &mut Frame, app: &App, theme: &Theme, area: Rect, instance: &str) {
    let header = Rect { height: 1, ..area };
    frame.render_widget(
        Paragraph::new(Span::styled(
            "Editing Data JSON — Esc to close",
            theme.title(),
        )),
        header,
    );

    let status_line = Rect {
        y: area.y + area.height - 1,
        height: 1,
        ..area
    };
    let editor = Rect {
        y: area.y + 1,
        height: area.height.saturating_sub(2),
        ..area
    };

    let text = format!("{}▏", app.panel.edit_buffer);
    let line_count = text.lines().count() as u16;
    let scroll = line_count.saturating_sub(editor.height);
    frame.render_widget(
        Paragraph::new(text)
            .style(theme.text())
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        editor,
    );

    let status = match app.store.get(instance).and_then(|i| i.parse_error.as_ref()) {
        Some(err) => Span::styled(truncate_line(err, area.width), theme.error()),
        None => Span::styled("✓ parses — tree updated live", theme.success()),
    };
    frame.render_widget(Paragraph::new(status), status_line);
}

fn render_display_list(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let s = &app.settings;
    let on_off = |flag: bool| if flag { "on" } else { "off" };
    let mut lines: Vec<Line> = Vec::new();

    for (idx, row) in DisplayRow::all().iter().enumerate() {
        let value = match row {
            DisplayRow::TooltipPosition => s.tooltip_position.label().to_string(),
            DisplayRow::TooltipEnabled => on_off(s.tooltip_enabled).into(),
            DisplayRow::CustomTooltip => on_off(s.custom_tooltip_enabled).into(),
            DisplayRow::CustomNode => on_off(s.custom_node_enabled).into(),
            DisplayRow::ShowIcons => on_off(s.show_icons_enabled).into(),
            DisplayRow::Breadcrumb => on_off(s.breadcrumb_enabled).into(),
            DisplayRow::BackButton => on_off(s.back_button_enabled).into(),
            DisplayRow::AnimationDuration => s.animation_duration_ms.to_string(),
            DisplayRow::PaddingInner => s.padding_inner.to_string(),
            DisplayRow::BorderRadius => s.border_radius.to_string(),
            DisplayRow::Theme => s.theme.as_str().to_string(),
        };
        let editing_this = matches!(
            (&app.panel.editing, row),
            (EditTarget::Number(crate::app::NumberField::AnimationDuration), DisplayRow::AnimationDuration)
                | (EditTarget::Number(crate::app::NumberField::PaddingInner), DisplayRow::PaddingInner)
                | (EditTarget::Number(crate::app::NumberField::BorderRadius), DisplayRow::BorderRadius)
        );
        let value = if editing_this {
            format!("{}▏", app.panel.edit_buffer)
        } else {
            value
        };

        let selected = idx == app.panel.display_selected;
        let line = Line::from(vec![
            Span::styled(format!("{:<24}", row.label()), theme.text()),
            Span::styled(value, theme.text_dim()),
        ]);
        lines.push(if selected { line.style(theme.selection()) } else { line });
    }

    frame.render_widget(Paragraph::new(lines).style(theme.block_style()), area);
}

/// Inspection overlay for the hovered node.
fn render_tooltip_overlay(frame: &mut Frame, app: &App, theme: &Theme) {
    if !app.settings.tooltip_enabled {
        return;
    }
    let Some(hover) = &app.hover else { return };
    let Some(inst) = app.store.get(&hover.instance_id) else { return };
    let Some(node) = inst.tree_root.descend(&hover.path) else { return };
    let Some(&(_, viewport)) = app
        .viewport_areas
        .iter()
        .find(|(id, _)| *id == hover.instance_id)
    else {
        return;
    };

    let text = if app.settings.custom_tooltip_enabled {
        SummaryTooltipRenderer.render(node)
    } else {
        tooltip::basic_text(node)
    };
    let (w, h) = tooltip::text_size(&text);
    let overlay = tooltip::anchor_rect(
        app.settings.tooltip_position,
        app.mouse,
        hover.area,
        viewport,
        (w + 2, h + 2),
    );
    if overlay.width < 3 || overlay.height < 3 {
        return;
    }

    frame.render_widget(Clear, overlay);
    let block = Block::default()
        .style(theme.block_style())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);
    frame.render_widget(Paragraph::new(text).style(theme.text()), inner);
}

fn render_status_bar(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let left = if app.panel.editing != EditTarget::None {
        Line::from(" Esc close · Enter commit/newline · edits validate live")
    } else {
        Line::from(" q quit · Tab panel · F1/F2 tabs · j/k select · Enter edit · a add · d remove · b back")
    };

    let mut right_parts = vec![
        app.shell.device_class.as_str().to_string(),
        if app.shell.panel_open { "panel open".into() } else { "panel closed".into() },
        format!("{} map{}", app.store.len(), if app.store.len() == 1 { "" } else { "s" }),
    ];
    if let Some(hover) = &app.hover {
        if let Some(node) = app
            .store
            .get(&hover.instance_id)
            .and_then(|i| i.tree_root.descend(&hover.path))
        {
            right_parts.insert(0, crate::viz::engine::describe_node(node));
        }
    }
    let right = Line::from(right_parts.join(" · "));

    widgets::render_status_bar(frame, left, right, theme, area);
}

fn truncate_line(s: &str, max: u16) -> String {
    let max = max as usize;
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
