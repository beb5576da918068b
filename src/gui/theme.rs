//! GUI Theme: "Terminal Phosphor" - Retro CRT monitor aesthetic
//!
//! Color constants for the launcher window.

use eframe::egui::{self, Color32};

use crate::RunState;
use crate::session::NoticeLevel;

// ═══════════════════════════════════════════════════════════════════════════
// BACKGROUNDS
// ═══════════════════════════════════════════════════════════════════════════

/// Background: Deep charcoal with subtle blue tint (like a powered-off CRT)
pub const BG_PRIMARY: Color32 = Color32::from_rgb(18, 20, 24);
/// Secondary background for panels
pub const BG_SECONDARY: Color32 = Color32::from_rgb(24, 28, 34);
/// Console background
pub const BG_CONSOLE: Color32 = Color32::from_rgb(12, 14, 17);

// ═══════════════════════════════════════════════════════════════════════════
// TEXT COLORS
// ═══════════════════════════════════════════════════════════════════════════

/// Primary text: Warm amber phosphor glow
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(255, 176, 0);
/// Secondary text: Dimmed amber
pub const TEXT_DIM: Color32 = Color32::from_rgb(180, 130, 50);
/// Muted text
pub const TEXT_MUTED: Color32 = Color32::from_rgb(100, 85, 60);

// ═══════════════════════════════════════════════════════════════════════════
// STATUS / ACCENT COLORS
// ═══════════════════════════════════════════════════════════════════════════

pub const STATUS_STOPPED: Color32 = Color32::from_rgb(150, 150, 150);
pub const STATUS_STARTING: Color32 = Color32::from_rgb(255, 200, 50);
pub const STATUS_RUNNING: Color32 = Color32::from_rgb(80, 255, 120);

pub const ACCENT_CYAN: Color32 = Color32::from_rgb(0, 255, 200);
pub const ACCENT_GREEN: Color32 = Color32::from_rgb(80, 255, 120);
pub const ACCENT_RED: Color32 = Color32::from_rgb(255, 80, 80);
pub const ACCENT_YELLOW: Color32 = Color32::from_rgb(255, 200, 50);

/// Color for the run state indicator
pub fn run_state_color(state: RunState) -> Color32 {
    match state {
        RunState::Stopped => STATUS_STOPPED,
        RunState::Starting => STATUS_STARTING,
        RunState::Running => STATUS_RUNNING,
    }
}

/// Accent used for a toast of the given level
pub fn notice_color(level: NoticeLevel) -> Color32 {
    match level {
        NoticeLevel::Info => ACCENT_CYAN,
        NoticeLevel::Positive => ACCENT_GREEN,
        NoticeLevel::Warning => ACCENT_YELLOW,
        NoticeLevel::Error => ACCENT_RED,
    }
}

/// Dark visuals with the launcher palette
pub fn launcher_visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = BG_PRIMARY;
    visuals.window_fill = BG_SECONDARY;
    visuals.extreme_bg_color = BG_CONSOLE;
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.selection.bg_fill = TEXT_DIM;
    visuals
}
