//! Application state and event handling for treemate

use crate::modules::instances::InstanceStore;
use crate::modules::shell::{DeviceClass, ShellEffect, ShellEvent, ShellState, SWIPE_THRESHOLD};
use crate::settings::DisplaySettings;
use crate::types::FlashMessage;
use crate::ui::theme::Theme;
use crate::viz::{HitKind, HitRegion, SliceEngine, TreeMapEngine};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

/// Control panel sub-tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelTab {
    #[default]
    Instances,
    Display,
}

impl PanelTab {
    pub fn all() -> &'static [PanelTab] {
        &[PanelTab::Instances, PanelTab::Display]
    }

    pub fn index(&self) -> usize {
        match self {
            PanelTab::Instances => 0,
            PanelTab::Display => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PanelTab::Instances => "Instances",
            PanelTab::Display => "Display",
        }
    }
}

/// One selectable row of the Instances sub-tab. The list is dynamic: every
/// instance contributes a header, its JSON editor, one row per color stop,
/// and its behavior row; an add row closes the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelRow {
    InstanceHeader(usize),
    Json(usize),
    ColorStop(usize, usize),
    Behavior(usize),
    AddInstance,
}

pub fn panel_rows(store: &InstanceStore) -> Vec<PanelRow> {
    let mut rows = Vec::new();
    for (i, inst) in store.instances().iter().enumerate() {
        rows.push(PanelRow::InstanceHeader(i));
        rows.push(PanelRow::Json(i));
        for c in 0..inst.color_stops.len() {
            rows.push(PanelRow::ColorStop(i, c));
        }
        rows.push(PanelRow::Behavior(i));
    }
    rows.push(PanelRow::AddInstance);
    rows
}

/// Rows of the Display sub-tab, in panel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayRow {
    TooltipPosition,
    TooltipEnabled,
    CustomTooltip,
    CustomNode,
    ShowIcons,
    Breadcrumb,
    BackButton,
    AnimationDuration,
    PaddingInner,
    BorderRadius,
    Theme,
}

impl DisplayRow {
    pub fn all() -> &'static [DisplayRow] {
        &[
            DisplayRow::TooltipPosition,
            DisplayRow::TooltipEnabled,
            DisplayRow::CustomTooltip,
            DisplayRow::CustomNode,
            DisplayRow::ShowIcons,
            DisplayRow::Breadcrumb,
            DisplayRow::BackButton,
            DisplayRow::AnimationDuration,
            DisplayRow::PaddingInner,
            DisplayRow::BorderRadius,
            DisplayRow::Theme,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            DisplayRow::TooltipPosition => "Tooltip Position",
            DisplayRow::TooltipEnabled => "Tooltip Enabled",
            DisplayRow::CustomTooltip => "Use Custom Tooltip",
            DisplayRow::CustomNode => "Use Custom Nodes",
            DisplayRow::ShowIcons => "Show Icons in Nodes",
            DisplayRow::Breadcrumb => "Breadcrumb Enabled",
            DisplayRow::BackButton => "Back Button Enabled",
            DisplayRow::AnimationDuration => "Animation Duration (ms)",
            DisplayRow::PaddingInner => "Padding Inner",
            DisplayRow::BorderRadius => "Border Radius",
            DisplayRow::Theme => "Theme",
        }
    }
}

/// Numeric Display fields that open a text edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberField {
    AnimationDuration,
    PaddingInner,
    BorderRadius,
}

/// What the edit buffer currently feeds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditTarget {
    #[default]
    None,
    Json {
        instance: String,
    },
    ColorStop {
        instance: String,
        index: usize,
    },
    Number(NumberField),
}

#[derive(Default)]
pub struct PanelState {
    pub active_tab: PanelTab,
    pub selected: usize,
    pub display_selected: usize,
    pub editing: EditTarget,
    pub edit_buffer: String,
}

#[derive(Debug, Clone)]
pub enum PopupState {
    None,
    Error { title: String, message: String },
}

/// The node currently under the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverTarget {
    pub instance_id: String,
    pub path: Vec<usize>,
    pub area: Rect,
}

/// Main application state
pub struct App {
    pub should_quit: bool,
    pub shell: ShellState,
    pub store: InstanceStore,
    pub settings: DisplaySettings,
    pub theme: Theme,
    pub engine: SliceEngine,
    pub panel: PanelState,
    pub popup: PopupState,
    pub flash_message: Option<FlashMessage>,

    // Pointer state
    pub mouse: (u16, u16),
    pub hover: Option<HoverTarget>,

    // Set by the render pass each frame; consumed by mouse routing
    pub hit_regions: Vec<HitRegion>,
    pub viewport_areas: Vec<(String, Rect)>,
    pub panel_area: Option<Rect>,
    pub overlay_area: Option<Rect>,
}

impl App {
    pub fn new(width: u16, piped_input: Option<String>) -> Result<Self> {
        let shell = ShellState::new(width);
        let mut settings = DisplaySettings::default();
        if shell.device_class == DeviceClass::Mobile {
            // First classification straight into mobile gets the same nudge
            // as the edge transition.
            settings.apply_mobile_defaults();
        }
        let theme = Theme::from_name(settings.theme);

        let mut store = InstanceStore::new();
        let mut flash_message = None;
        if let Some(text) = piped_input {
            let id = store.instances()[0].id.clone();
            store.update_raw_text(&id, text);
            flash_message = Some(match &store.instances()[0].parse_error {
                Some(err) => FlashMessage::new(
                    format!("Piped input is not a valid tree ({}); kept sample data", err),
                    true,
                ),
                None => FlashMessage::new("Loaded tree from stdin".into(), false),
            });
        }

        Ok(Self {
            should_quit: false,
            shell,
            store,
            settings,
            theme,
            engine: SliceEngine::new(),
            panel: PanelState::default(),
            popup: PopupState::None,
            flash_message,
            mouse: (0, 0),
            hover: None,
            hit_regions: Vec::new(),
            viewport_areas: Vec::new(),
            panel_area: None,
            overlay_area: None,
        })
    }

    /// Called between event polls: expire the flash message.
    pub fn tick(&mut self) {
        if let Some(msg) = &self.flash_message {
            if msg.is_expired(3) {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: impl Into<String>, is_error: bool) {
        self.flash_message = Some(FlashMessage::new(msg.into(), is_error));
    }

    // ── Keyboard ──

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // App-level popup handling
        if let PopupState::Error { .. } = &self.popup {
            if matches!(key.code, KeyCode::Char('o') | KeyCode::Enter | KeyCode::Esc) {
                self.popup = PopupState::None;
            }
            return Ok(());
        }

        // Edit mode captures ALL keys
        if self.panel.editing != EditTarget::None {
            self.handle_edit_key(key);
            return Ok(());
        }

        // Panel keys (only while the panel is on screen)
        if self.shell.panel_open {
            match key.code {
                KeyCode::F(1) => {
                    self.panel.active_tab = PanelTab::Instances;
                    return Ok(());
                }
                KeyCode::F(2) => {
                    self.panel.active_tab = PanelTab::Display;
                    return Ok(());
                }
                _ => {}
            }
            let consumed = match self.panel.active_tab {
                PanelTab::Instances => self.handle_instances_key(key),
                PanelTab::Display => self.handle_display_key(key),
            };
            if consumed {
                return Ok(());
            }
        }

        // Global keys
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::Char('p') => {
                self.shell.apply(ShellEvent::TogglePanel);
            }
            KeyCode::Char('b') => self.navigate_back_focused(),
            _ => {}
        }
        Ok(())
    }

    /// Back-navigation for the viewport under the pointer, falling back to
    /// the first instance.
    fn navigate_back_focused(&mut self) {
        let id = self
            .hover
            .as_ref()
            .map(|h| h.instance_id.clone())
            .or_else(|| self.store.instances().first().map(|i| i.id.clone()));
        if let Some(id) = id {
            self.engine.navigate_back(&id);
        }
    }

    fn handle_instances_key(&mut self, key: KeyEvent) -> bool {
        let rows = panel_rows(&self.store);
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.panel.selected + 1 < rows.len() {
                    self.panel.selected += 1;
                }
                true
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.panel.selected = self.panel.selected.saturating_sub(1);
                true
            }
            KeyCode::Char('a') => {
                self.store.create_instance();
                self.show_flash("Instance added", false);
                true
            }
            KeyCode::Char('d') => {
                if let Some(row) = rows.get(self.panel.selected) {
                    if let Some(idx) = row_instance(row) {
                        self.remove_instance_at(idx);
                    }
                }
                true
            }
            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
                if let Some(row) = rows.get(self.panel.selected).cloned() {
                    self.activate_instances_row(row);
                }
                true
            }
            _ => false,
        }
    }

    /// The panel is the layer that enforces "at least one instance".
    fn remove_instance_at(&mut self, idx: usize) {
        if self.store.len() <= 1 {
            self.show_flash("At least one instance is required", true);
            return;
        }
        let id = self.store.instances()[idx].id.clone();
        self.store.remove_instance(&id);
        self.engine.drop_instance(&id);
        if self
            .hover
            .as_ref()
            .is_some_and(|h| h.instance_id == id)
        {
            self.hover = None;
        }
        let rows = panel_rows(&self.store);
        self.panel.selected = self.panel.selected.min(rows.len() - 1);
        self.show_flash("Instance removed", false);
    }

    fn activate_instances_row(&mut self, row: PanelRow) {
        match row {
            PanelRow::InstanceHeader(_) => {}
            PanelRow::Json(idx) => {
                let inst = &self.store.instances()[idx];
                self.panel.edit_buffer = inst.raw_text.clone();
                self.panel.editing = EditTarget::Json {
                    instance: inst.id.clone(),
                };
            }
            PanelRow::ColorStop(idx, stop) => {
                let inst = &self.store.instances()[idx];
                self.panel.edit_buffer = inst.color_stops[stop].clone();
                self.panel.editing = EditTarget::ColorStop {
                    instance: inst.id.clone(),
                    index: stop,
                };
            }
            PanelRow::Behavior(idx) => {
                let inst = &self.store.instances()[idx];
                let (id, next) = (inst.id.clone(), inst.color_behavior.next());
                self.store.set_color_behavior(&id, next);
            }
            PanelRow::AddInstance => {
                self.store.create_instance();
                self.show_flash("Instance added", false);
            }
        }
    }

    fn handle_display_key(&mut self, key: KeyEvent) -> bool {
        let rows = DisplayRow::all();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.panel.display_selected + 1 < rows.len() {
                    self.panel.display_selected += 1;
                }
                true
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.panel.display_selected = self.panel.display_selected.saturating_sub(1);
                true
            }
            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
                self.activate_display_row(rows[self.panel.display_selected]);
                true
            }
            _ => false,
        }
    }

    fn activate_display_row(&mut self, row: DisplayRow) {
        let s = &mut self.settings;
        match row {
            DisplayRow::TooltipPosition => s.tooltip_position = s.tooltip_position.next(),
            DisplayRow::TooltipEnabled => s.tooltip_enabled = !s.tooltip_enabled,
            DisplayRow::CustomTooltip => s.custom_tooltip_enabled = !s.custom_tooltip_enabled,
            DisplayRow::CustomNode => s.custom_node_enabled = !s.custom_node_enabled,
            DisplayRow::ShowIcons => s.show_icons_enabled = !s.show_icons_enabled,
            DisplayRow::Breadcrumb => s.breadcrumb_enabled = !s.breadcrumb_enabled,
            DisplayRow::BackButton => s.back_button_enabled = !s.back_button_enabled,
            DisplayRow::AnimationDuration => {
                self.panel.edit_buffer = s.animation_duration_ms.to_string();
                self.panel.editing = EditTarget::Number(NumberField::AnimationDuration);
            }
            DisplayRow::PaddingInner => {
                self.panel.edit_buffer = s.padding_inner.to_string();
                self.panel.editing = EditTarget::Number(NumberField::PaddingInner);
            }
            DisplayRow::BorderRadius => {
                self.panel.edit_buffer = s.border_radius.to_string();
                self.panel.editing = EditTarget::Number(NumberField::BorderRadius);
            }
            DisplayRow::Theme => {
                s.theme = s.theme.next();
                self.theme = Theme::from_name(s.theme);
            }
        }
    }

    /// Handle key events while the edit buffer is live.
    fn handle_edit_key(&mut self, key: KeyEvent) {
        match self.panel.editing.clone() {
            EditTarget::None => {}
            EditTarget::Json { instance } => match key.code {
                KeyCode::Esc => {
                    self.panel.editing = EditTarget::None;
                    self.panel.edit_buffer.clear();
                }
                KeyCode::Enter => {
                    self.panel.edit_buffer.push('\n');
                    self.live_update_json(&instance);
                }
                KeyCode::Backspace => {
                    self.panel.edit_buffer.pop();
                    self.live_update_json(&instance);
                }
                KeyCode::Char(c) => {
                    self.panel.edit_buffer.push(c);
                    self.live_update_json(&instance);
                }
                _ => {}
            },
            EditTarget::ColorStop { instance, index } => match key.code {
                KeyCode::Esc => {
                    self.panel.editing = EditTarget::None;
                    self.panel.edit_buffer.clear();
                }
                KeyCode::Enter => {
                    let value = self.panel.edit_buffer.clone();
                    self.store.set_color_stop(&instance, index, value);
                    self.panel.editing = EditTarget::None;
                    self.panel.edit_buffer.clear();
                }
                KeyCode::Backspace => {
                    self.panel.edit_buffer.pop();
                }
                KeyCode::Char(c) => {
                    self.panel.edit_buffer.push(c);
                }
                _ => {}
            },
            EditTarget::Number(field) => match key.code {
                KeyCode::Esc => {
                    self.panel.editing = EditTarget::None;
                    self.panel.edit_buffer.clear();
                }
                KeyCode::Enter => {
                    self.commit_number(field);
                    self.panel.editing = EditTarget::None;
                    self.panel.edit_buffer.clear();
                }
                KeyCode::Backspace => {
                    self.panel.edit_buffer.pop();
                }
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    self.panel.edit_buffer.push(c);
                }
                _ => {}
            },
        }
    }

    /// Accept the keystroke, defer validation: every edit goes straight to
    /// the store, which keeps the last valid tree on a failed parse.
    fn live_update_json(&mut self, instance: &str) {
        self.store
            .update_raw_text(instance, self.panel.edit_buffer.clone());
    }

    fn commit_number(&mut self, field: NumberField) {
        let Ok(value) = self.panel.edit_buffer.parse::<u32>() else {
            self.popup = PopupState::Error {
                title: "Invalid value".into(),
                message: format!("\"{}\" is not a number", self.panel.edit_buffer),
            };
            return;
        };
        match field {
            NumberField::AnimationDuration => self.settings.animation_duration_ms = value,
            NumberField::PaddingInner => self.settings.padding_inner = value.min(u16::MAX as u32) as u16,
            NumberField::BorderRadius => self.settings.border_radius = value.min(u16::MAX as u32) as u16,
        }
    }

    // ── Pointer ──

    pub fn handle_mouse(&mut self, event: MouseEvent) -> Result<()> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.shell.begin_drag(event.column, event.row);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.mouse = (event.column, event.row);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let origin = self.shell.drag_origin();
                self.shell.finish_drag(event.column);
                // A short drag is a click, not a swipe.
                if let Some((ox, _)) = origin {
                    let dx = (event.column as i32 - ox as i32).abs();
                    if dx < SWIPE_THRESHOLD {
                        self.handle_click(event.column, event.row);
                    }
                }
            }
            MouseEventKind::Moved => {
                self.mouse = (event.column, event.row);
                self.hover = self.hit_test(event.column, event.row);
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_click(&mut self, col: u16, row: u16) {
        // The dimming overlay is only interactive on mobile with the panel
        // open; the shell makes the same check, so a stale area is harmless.
        if let Some(overlay) = self.overlay_area {
            if contains(overlay, col, row) {
                self.shell.apply(ShellEvent::OverlayClick);
                return;
            }
        }
        if let Some(panel) = self.panel_area {
            if contains(panel, col, row) {
                return; // panel is keyboard-driven
            }
        }

        let Some(region) = self
            .hit_regions
            .iter()
            .rev()
            .find(|r| r.contains(col, row))
            .cloned()
        else {
            return;
        };
        match region.kind {
            HitKind::Back => {
                self.engine.navigate_back(&region.instance_id);
            }
            HitKind::Node(path) => {
                // Zoom only into nodes that have something to show.
                let has_children = self
                    .store
                    .get(&region.instance_id)
                    .and_then(|inst| inst.tree_root.descend(&path))
                    .is_some_and(|node| !node.is_leaf());
                let already_there =
                    self.engine.current_path(&region.instance_id) == path.as_slice();
                if has_children && !already_there {
                    self.engine.navigate(&region.instance_id, &path);
                }
            }
        }
    }

    fn hit_test(&self, col: u16, row: u16) -> Option<HoverTarget> {
        if let Some(panel) = self.panel_area {
            if contains(panel, col, row) {
                return None;
            }
        }
        self.hit_regions
            .iter()
            .rev()
            .find(|r| r.contains(col, row))
            .and_then(|r| match &r.kind {
                HitKind::Node(path) => Some(HoverTarget {
                    instance_id: r.instance_id.clone(),
                    path: path.clone(),
                    area: r.area,
                }),
                HitKind::Back => None,
            })
    }

    // ── Resize ──

    pub fn handle_resize(&mut self, width: u16) {
        if let Some(ShellEffect::MobileDefaults) =
            self.shell.apply(ShellEvent::Resize { width })
        {
            self.settings.apply_mobile_defaults();
        }
    }
}

fn contains(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x && col < area.x + area.width && row >= area.y && row < area.y + area.height
}

fn row_instance(row: &PanelRow) -> Option<usize> {
    match row {
        PanelRow::InstanceHeader(i)
        | PanelRow::Json(i)
        | PanelRow::ColorStop(i, _)
        | PanelRow::Behavior(i) => Some(*i),
        PanelRow::AddInstance => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn desktop_app() -> App {
        App::new(120, None).unwrap()
    }

    #[test]
    fn test_new_app_defaults() {
        let app = desktop_app();
        assert!(app.shell.panel_open);
        assert_eq!(app.store.len(), 1);
        assert!(app.settings.tooltip_enabled);
    }

    #[test]
    fn test_new_app_on_mobile_gets_nudged_defaults() {
        let app = App::new(60, None).unwrap();
        assert!(!app.shell.panel_open);
        assert!(!app.settings.breadcrumb_enabled);
        assert!(app.settings.back_button_enabled);
    }

    #[test]
    fn test_piped_input_seeds_first_instance() {
        let app = App::new(120, Some(r#"{"name": "piped", "value": 1}"#.into())).unwrap();
        assert_eq!(app.store.instances()[0].tree_root.name, "piped");
        assert_eq!(app.store.instances()[0].revision, 1);
    }

    #[test]
    fn test_piped_garbage_keeps_sample() {
        let app = App::new(120, Some("not json".into())).unwrap();
        assert_eq!(app.store.instances()[0].tree_root.name, "World");
        assert!(app.flash_message.as_ref().unwrap().is_error);
    }

    #[test]
    fn test_resize_applies_mobile_defaults_once() {
        let mut app = desktop_app();
        app.handle_resize(60);
        assert!(!app.settings.breadcrumb_enabled);
        assert!(!app.shell.panel_open);

        // User re-enables within mobile; a further resize keeps the choice.
        app.settings.breadcrumb_enabled = true;
        app.handle_resize(50);
        assert!(app.settings.breadcrumb_enabled);
    }

    #[test]
    fn test_panel_rows_shape() {
        let app = desktop_app();
        let rows = panel_rows(&app.store);
        // header + json + 2 color stops + behavior + add
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0], PanelRow::InstanceHeader(0));
        assert_eq!(rows[5], PanelRow::AddInstance);
    }

    #[test]
    fn test_add_and_remove_via_keys() {
        let mut app = desktop_app();
        app.handle_key(key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.store.len(), 2);

        // Select the second instance's header and remove it.
        let rows = panel_rows(&app.store);
        app.panel.selected = rows
            .iter()
            .position(|r| *r == PanelRow::InstanceHeader(1))
            .unwrap();
        app.handle_key(key(KeyCode::Char('d'))).unwrap();
        assert_eq!(app.store.len(), 1);
    }

    #[test]
    fn test_last_instance_cannot_be_removed() {
        let mut app = desktop_app();
        app.panel.selected = 0;
        app.handle_key(key(KeyCode::Char('d'))).unwrap();
        assert_eq!(app.store.len(), 1);
        assert!(app.flash_message.as_ref().unwrap().is_error);
    }

    #[test]
    fn test_json_edit_mode_updates_live() {
        let mut app = desktop_app();
        let id = app.store.instances()[0].id.clone();
        app.panel.edit_buffer = String::new();
        app.panel.editing = EditTarget::Json { instance: id.clone() };

        for c in r#"{"name": "x"}"#.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
        let inst = app.store.get(&id).unwrap();
        assert_eq!(inst.tree_root.name, "x");
        assert!(inst.parse_error.is_none());

        // Deleting the closing brace leaves the tree but records the error.
        app.handle_key(key(KeyCode::Backspace)).unwrap();
        let inst = app.store.get(&id).unwrap();
        assert_eq!(inst.tree_root.name, "x");
        assert!(inst.parse_error.is_some());

        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert_eq!(app.panel.editing, EditTarget::None);
    }

    #[test]
    fn test_behavior_row_cycles() {
        use crate::viz::ColorBehavior;
        let mut app = desktop_app();
        let rows = panel_rows(&app.store);
        app.panel.selected = rows
            .iter()
            .position(|r| matches!(r, PanelRow::Behavior(0)))
            .unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        // Heatmap wraps around to the start of the cycle.
        assert_eq!(
            app.store.instances()[0].color_behavior,
            ColorBehavior::OneColor
        );
    }

    #[test]
    fn test_display_toggle_and_number_edit() {
        let mut app = desktop_app();
        app.panel.active_tab = PanelTab::Display;
        app.panel.display_selected = DisplayRow::all()
            .iter()
            .position(|r| *r == DisplayRow::TooltipEnabled)
            .unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(!app.settings.tooltip_enabled);

        app.panel.display_selected = DisplayRow::all()
            .iter()
            .position(|r| *r == DisplayRow::AnimationDuration)
            .unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.panel.edit_buffer, "300"); // seeded with current value
        for _ in 0..3 {
            app.handle_key(key(KeyCode::Backspace)).unwrap();
        }
        for c in "500".chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.settings.animation_duration_ms, 500);
    }

    #[test]
    fn test_empty_number_edit_raises_popup() {
        let mut app = desktop_app();
        app.panel.active_tab = PanelTab::Display;
        app.panel.display_selected = DisplayRow::all()
            .iter()
            .position(|r| *r == DisplayRow::BorderRadius)
            .unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        app.handle_key(key(KeyCode::Backspace)).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap(); // commit empty buffer
        assert!(matches!(app.popup, PopupState::Error { .. }));
        assert_eq!(app.settings.border_radius, 2);

        // Popup dismisses with Esc and the app keeps running.
        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert!(matches!(app.popup, PopupState::None));
    }

    #[test]
    fn test_panel_toggle_key() {
        let mut app = desktop_app();
        assert!(app.shell.panel_open);
        app.handle_key(key(KeyCode::Tab)).unwrap();
        assert!(!app.shell.panel_open);
        app.handle_key(key(KeyCode::Char('p'))).unwrap();
        assert!(app.shell.panel_open);
    }

    #[test]
    fn test_click_zooms_into_branch_only() {
        let mut app = desktop_app();
        let id = app.store.instances()[0].id.clone();
        // Pretend a frame reported the Asia cell and the ocean leaf cell.
        app.hit_regions = vec![
            HitRegion {
                area: Rect { x: 0, y: 0, width: 10, height: 5 },
                instance_id: id.clone(),
                kind: HitKind::Node(vec![0]),
            },
            HitRegion {
                area: Rect { x: 10, y: 0, width: 10, height: 5 },
                instance_id: id.clone(),
                kind: HitKind::Node(vec![3]),
            },
        ];
        app.handle_click(15, 2); // Pacific Ocean is a leaf: no zoom
        assert_eq!(app.engine.current_path(&id), &[] as &[usize]);

        app.handle_click(5, 2); // Asia is a branch: zoom in
        assert_eq!(app.engine.current_path(&id), &[0]);
    }

    #[test]
    fn test_hover_hit_testing() {
        let mut app = desktop_app();
        let id = app.store.instances()[0].id.clone();
        app.hit_regions = vec![HitRegion {
            area: Rect { x: 0, y: 0, width: 10, height: 5 },
            instance_id: id.clone(),
            kind: HitKind::Node(vec![0]),
        }];
        assert_eq!(app.hit_test(5, 2).unwrap().path, vec![0]);
        assert!(app.hit_test(50, 20).is_none());
    }
}
