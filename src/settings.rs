//! Global display settings shared by every treemap instance
//!
//! In-memory only — the tool reconstructs everything from the sample
//! dataset on launch, so there is no config file to load or save.

use crate::ui::theme::ThemeName;
use crate::viz::TooltipPosition;

/// Inner padding the mobile nudge reduces to.
pub const PADDING_MOBILE: u16 = 1;

/// Settings shared across all instances (the per-instance knobs live in the
/// instance store).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySettings {
    pub tooltip_position: TooltipPosition,
    pub animation_duration_ms: u32,
    pub padding_inner: u16,
    pub border_radius: u16,
    pub breadcrumb_enabled: bool,
    pub back_button_enabled: bool,
    pub tooltip_enabled: bool,
    pub custom_tooltip_enabled: bool,
    pub custom_node_enabled: bool,
    pub show_icons_enabled: bool,
    pub theme: ThemeName,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            tooltip_position: TooltipPosition::MouseRight,
            animation_duration_ms: 300,
            padding_inner: 5,
            border_radius: 2,
            breadcrumb_enabled: true,
            back_button_enabled: false,
            tooltip_enabled: true,
            custom_tooltip_enabled: false,
            custom_node_enabled: false,
            show_icons_enabled: true,
            theme: ThemeName::default(),
        }
    }
}

impl DisplaySettings {
    /// The mobile nudge: applied once per desktop→mobile edge. These are
    /// defaults, not locks — the user can re-enable any of them afterwards
    /// and nothing here is reverted on the way back to desktop.
    pub fn apply_mobile_defaults(&mut self) {
        self.breadcrumb_enabled = false;
        self.back_button_enabled = true;
        self.tooltip_enabled = false;
        self.padding_inner = PADDING_MOBILE;
    }
}
