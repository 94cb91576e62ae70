//! Responsive shell — device class and control-panel state machine
//!
//! Two orthogonal axes: `DeviceClass` (derived from terminal width) and
//! `panel_open`. Every input channel that can move either axis (resize,
//! explicit toggle, swipe gesture, overlay click) is translated into a
//! `ShellEvent` and funneled through the single `apply` entry point, so two
//! inputs arriving in the same tick can never interleave mid-mutation.

/// Terminal column count below which the shell is classified as mobile.
pub const MOBILE_BREAKPOINT: u16 = 80;

/// Horizontal drag distance (columns) that counts as a swipe.
pub const SWIPE_THRESHOLD: i32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Desktop,
    Mobile,
}

impl DeviceClass {
    pub fn classify(width: u16) -> Self {
        if width < MOBILE_BREAKPOINT {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceClass::Desktop => "desktop",
            DeviceClass::Mobile => "mobile",
        }
    }
}

/// An input that may move the shell's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellEvent {
    /// Viewport resize; width in terminal columns.
    Resize { width: u16 },
    /// Explicit toggle control or the keyboard shortcut.
    TogglePanel,
    /// A completed horizontal drag; dx > 0 is a right swipe.
    SwipeEnd { dx: i32 },
    /// Click on the dimming overlay next to the panel.
    OverlayClick,
}

/// Side effect the app must carry out after an `apply` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellEffect {
    /// The shell just crossed the desktop→mobile edge: nudge the display
    /// settings to their mobile defaults (once per edge, never re-applied
    /// while the class is unchanged, never reverted on the way back).
    MobileDefaults,
}

pub struct ShellState {
    pub device_class: DeviceClass,
    pub panel_open: bool,
    drag_origin: Option<(u16, u16)>,
}

impl ShellState {
    /// First classification: the panel starts open on desktop, closed on mobile.
    pub fn new(width: u16) -> Self {
        let device_class = DeviceClass::classify(width);
        Self {
            device_class,
            panel_open: device_class == DeviceClass::Desktop,
            drag_origin: None,
        }
    }

    /// The single state-update entry point for both axes.
    pub fn apply(&mut self, event: ShellEvent) -> Option<ShellEffect> {
        match event {
            ShellEvent::Resize { width } => {
                let next = DeviceClass::classify(width);
                if next == self.device_class {
                    return None;
                }
                let was_desktop = self.device_class == DeviceClass::Desktop;
                self.device_class = next;
                if was_desktop && next == DeviceClass::Mobile {
                    // Forced exactly once per edge transition; a reopened
                    // panel survives later resizes within mobile.
                    self.panel_open = false;
                    return Some(ShellEffect::MobileDefaults);
                }
                None
            }
            ShellEvent::TogglePanel => {
                self.panel_open = !self.panel_open;
                None
            }
            ShellEvent::SwipeEnd { dx } => {
                if dx >= SWIPE_THRESHOLD && !self.panel_open {
                    self.panel_open = true;
                } else if dx <= -SWIPE_THRESHOLD && self.panel_open {
                    self.panel_open = false;
                }
                // Swipes in the already-satisfied direction are no-ops.
                None
            }
            ShellEvent::OverlayClick => {
                // The overlay is only interactive while the panel is open on
                // a mobile device class.
                if self.device_class == DeviceClass::Mobile && self.panel_open {
                    self.panel_open = false;
                }
                None
            }
        }
    }

    // ── Swipe tracking ──
    //
    // The pointer press/release pair is tracked here so the app layer only
    // forwards raw mouse events; the distance check lives in `apply`.

    pub fn begin_drag(&mut self, col: u16, row: u16) {
        self.drag_origin = Some((col, row));
    }

    pub fn drag_origin(&self) -> Option<(u16, u16)> {
        self.drag_origin
    }

    /// Finish a drag. Returns the effect of the resulting swipe, if any;
    /// a release without a matching press is ignored.
    pub fn finish_drag(&mut self, col: u16) -> Option<ShellEffect> {
        let (origin_col, _) = self.drag_origin.take()?;
        let dx = col as i32 - origin_col as i32;
        self.apply(ShellEvent::SwipeEnd { dx })
    }
}
