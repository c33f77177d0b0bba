//! Theme constants for the Ultimate Tic-Tac-Toe GUI

use egui::Color32;

// Board colors
pub const BOARD_BG: Color32 = Color32::from_rgb(236, 232, 220);
pub const GRID_LINE: Color32 = Color32::from_rgb(120, 115, 105);
pub const SUB_BOARD_LINE: Color32 = Color32::from_rgb(40, 38, 35);

// Playable sub-board highlight
pub const TARGET_FILL: Color32 = Color32::from_rgb(255, 244, 190);
pub const TARGET_BORDER: Color32 = Color32::from_rgb(230, 170, 40);

// Piece colors
pub const X_COLOR: Color32 = Color32::from_rgb(200, 60, 60);
pub const O_COLOR: Color32 = Color32::from_rgb(50, 100, 200);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(90, 200, 90);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 220, 50);
pub const DRAWN_OVERLAY: Color32 = Color32::from_rgba_premultiplied(60, 60, 60, 90);

// Functions for colors that can't be const
pub fn hover_valid() -> Color32 {
    Color32::from_rgba_unmultiplied(80, 80, 80, 60)
}

pub fn hover_invalid() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 50, 50, 80)
}

/// Translucent fill over a sub-board won by the given color
pub fn won_overlay(color: Color32) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), 50)
}

// Panel colors - dark modern theme
pub const PANEL_BG: Color32 = Color32::from_rgb(25, 27, 31);
pub const CARD_BG: Color32 = Color32::from_rgb(35, 38, 43);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Timer colors
pub const TIMER_NORMAL: Color32 = Color32::from_rgb(80, 200, 120);
pub const TIMER_WARNING: Color32 = Color32::from_rgb(255, 180, 50);
pub const TIMER_CRITICAL: Color32 = Color32::from_rgb(255, 70, 70);

// Sizes
pub const BOARD_MARGIN: f32 = 20.0;
pub const GRID_LINE_WIDTH: f32 = 1.0;
pub const SUB_BOARD_LINE_WIDTH: f32 = 4.0;
/// Gap between adjacent sub-boards, in cells
pub const SUB_BOARD_GAP_RATIO: f32 = 0.25;
pub const PIECE_RATIO: f32 = 0.32;
pub const PIECE_STROKE: f32 = 3.0;
pub const LAST_MOVE_MARKER_RADIUS: f32 = 4.0;
