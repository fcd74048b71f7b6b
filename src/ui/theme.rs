//! Theme constants for the Tic-Tac-Toe GUI

use egui::Color32;

use crate::Player;

// Window and board colors - light sky tones
pub const BACKGROUND: Color32 = Color32::from_rgb(217, 237, 250);
pub const CELL_BG: Color32 = Color32::WHITE;
pub const BOARD_BORDER: Color32 = Color32::from_rgb(230, 166, 46); // Gold
pub const GRID_LINE: Color32 = Color32::from_rgb(153, 153, 153);

// Marks
pub const X_MARK: Color32 = Color32::from_rgb(115, 31, 179); // Purple
pub const O_MARK: Color32 = Color32::from_rgb(255, 107, 102); // Peach

pub fn mark_color(player: Player) -> Color32 {
    match player {
        Player::X => X_MARK,
        Player::O => O_MARK,
    }
}

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(46, 115, 204);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 200, 80);

pub fn hover_valid() -> Color32 {
    Color32::from_rgba_unmultiplied(46, 115, 204, 40)
}

pub fn hover_invalid() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 50, 50, 60)
}

/// Translucent version of a mark color for previews and hints
pub fn ghost(color: Color32) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), 90)
}

// Text
pub const TEXT_TITLE: Color32 = Color32::from_rgb(20, 51, 102);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(30, 40, 60);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(90, 100, 120);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(130, 140, 155);
pub const TEXT_ON_BUTTON: Color32 = Color32::WHITE;

// Panels and buttons
pub const PANEL_BG: Color32 = Color32::from_rgb(235, 245, 252);
pub const CARD_BG: Color32 = Color32::WHITE;
pub const BUTTON_BG: Color32 = Color32::from_rgb(46, 115, 204);
pub const BUTTON_HOVER: Color32 = Color32::from_rgb(64, 153, 242);

// Result banners
pub const RESULT_TEXT: Color32 = Color32::from_rgb(255, 204, 26);
pub const DRAW_TEXT: Color32 = Color32::from_rgb(255, 153, 51);

// Status colors for the computer's search time
pub const TIMER_NORMAL: Color32 = Color32::from_rgb(60, 170, 100);
pub const TIMER_WARNING: Color32 = Color32::from_rgb(230, 150, 30);

// Sizes
pub const BOARD_MARGIN: f32 = 40.0;
pub const GRID_LINE_WIDTH: f32 = 3.0;
pub const BORDER_WIDTH: f32 = 5.0;
pub const MARK_STROKE: f32 = 6.0;
pub const X_MARK_INSET: f32 = 12.0;
pub const O_RADIUS_RATIO: f32 = 1.0 / 2.8;
pub const LAST_MOVE_MARKER_RADIUS: f32 = 4.0;

/// Scale gained by a fresh mark each frame
pub const ANIM_STEP: f32 = 0.03;
