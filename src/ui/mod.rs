//! User Interface layer for treemate
//!
//! Contains all UI-related code:
//! - Theme definitions and colors (global for the whole shell)
//! - Reusable widgets
//! - Main render pass: control panel, viewport grid, overlays, status bar

pub mod render;
pub mod theme;
pub mod widgets;

pub use render::render;
pub use theme::Theme;
