//! Board rendering for the Tic-Tac-Toe GUI

use crate::{Board, Player, Pos};
use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use super::theme::*;

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
    /// Cells per side of the board last drawn
    size: usize,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 100.0,
            board_rect: Rect::NOTHING,
            size: 3,
        }
    }
}

impl BoardView {
    /// Render the board and return click position if any
    #[allow(clippy::too_many_arguments)]
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        board: &Board,
        mark_scales: &[f32],
        last_move: Option<Pos>,
        suggested_move: Option<Pos>,
        winning_line: Option<&[Pos]>,
        accept_input: bool,
    ) -> Option<Pos> {
        let available_size = ui.available_size();

        // Calculate board size to fit available space
        let board_size = (available_size.x.min(available_size.y) - 20.0).max(2.0 * BOARD_MARGIN + 30.0);
        self.size = board.size();
        self.cell_size = (board_size - 2.0 * BOARD_MARGIN) / self.size as f32;

        let (response, painter) = ui.allocate_painter(Vec2::new(board_size, board_size), Sense::click());

        self.board_rect = response.rect;

        self.draw_cells(&painter);
        self.draw_grid(&painter);
        self.draw_marks(&painter, board, mark_scales);

        if let Some(pos) = last_move {
            self.draw_last_move_marker(&painter, pos);
        }

        if let Some(line) = winning_line {
            self.draw_winning_line(&painter, line);
        }

        if let Some(pos) = suggested_move {
            self.draw_suggestion(&painter, pos, board.current_player());
        }

        // Handle hover preview and click
        let mut clicked_pos = None;

        if accept_input && !board.is_over() {
            if let Some(pointer_pos) = response.hover_pos() {
                if let Some(board_pos) = self.screen_to_board(pointer_pos) {
                    let is_valid = board.is_empty(board_pos);
                    self.draw_hover_preview(&painter, board_pos, board.current_player(), is_valid);

                    if response.clicked() && is_valid {
                        clicked_pos = Some(board_pos);
                    }
                }
            }
        }

        clicked_pos
    }

    /// White squares inside a gold frame
    fn draw_cells(&self, painter: &Painter) {
        let inner = self.inner_rect();
        painter.rect_filled(inner, CornerRadius::ZERO, CELL_BG);

        let stroke = Stroke::new(BORDER_WIDTH, BOARD_BORDER);
        let corners = [
            inner.left_top(),
            inner.right_top(),
            inner.right_bottom(),
            inner.left_bottom(),
        ];
        for i in 0..corners.len() {
            painter.line_segment([corners[i], corners[(i + 1) % corners.len()]], stroke);
        }
    }

    /// Interior grid lines between cells
    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let inner = self.inner_rect();

        for i in 1..self.size {
            let offset = i as f32 * self.cell_size;

            // Vertical line
            let start = inner.min + Vec2::new(offset, 0.0);
            let end = Pos2::new(start.x, inner.max.y);
            painter.line_segment([start, end], stroke);

            // Horizontal line
            let start = inner.min + Vec2::new(0.0, offset);
            let end = Pos2::new(inner.max.x, start.y);
            painter.line_segment([start, end], stroke);
        }
    }

    fn draw_marks(&self, painter: &Painter, board: &Board, mark_scales: &[f32]) {
        for (idx, cell) in board.cells().iter().enumerate() {
            if let Some(player) = cell.player() {
                let pos = Pos::from_index(idx, self.size);
                let scale = mark_scales.get(idx).copied().unwrap_or(1.0);
                self.draw_mark(painter, pos, player, scale, mark_color(player));
            }
        }
    }

    /// Draw an X or O scaled about the cell center
    fn draw_mark(&self, painter: &Painter, pos: Pos, player: Player, scale: f32, color: Color32) {
        let center = self.board_to_screen(pos);
        let half = self.cell_size * 0.5;
        let stroke = Stroke::new(MARK_STROKE, color);

        match player {
            Player::X => {
                // The inset shrinks toward the center while the mark is small
                let inset = X_MARK_INSET.min(half) + (half - X_MARK_INSET.min(half)) * (1.0 - scale);
                let reach = half - inset;
                painter.line_segment(
                    [center + Vec2::new(-reach, -reach), center + Vec2::new(reach, reach)],
                    stroke,
                );
                painter.line_segment(
                    [center + Vec2::new(reach, -reach), center + Vec2::new(-reach, reach)],
                    stroke,
                );
            }
            Player::O => {
                let radius = self.cell_size * O_RADIUS_RATIO * scale;
                painter.circle_stroke(center, radius, stroke);
            }
        }
    }

    fn draw_last_move_marker(&self, painter: &Painter, pos: Pos) {
        let rect = self.cell_rect(pos);
        let corner = rect.right_top() + Vec2::new(-10.0, 10.0);
        painter.circle_filled(corner, LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
    }

    /// Draw winning line highlight
    fn draw_winning_line(&self, painter: &Painter, line: &[Pos]) {
        let stroke = Stroke::new(MARK_STROKE, WIN_HIGHLIGHT);

        if let (Some(first), Some(last)) = (line.first(), line.last()) {
            painter.line_segment([self.board_to_screen(*first), self.board_to_screen(*last)], stroke);
        }

        for pos in line {
            painter.rect_filled(self.cell_rect(*pos).shrink(4.0), CornerRadius::same(4), ghost(WIN_HIGHLIGHT));
        }
    }

    /// Draw move suggestion
    fn draw_suggestion(&self, painter: &Painter, pos: Pos, turn: Player) {
        self.draw_mark(painter, pos, turn, 1.0, ghost(mark_color(turn)));

        painter.text(
            self.board_to_screen(pos),
            egui::Align2::CENTER_CENTER,
            "?",
            egui::FontId::proportional(self.cell_size * 0.25),
            TEXT_PRIMARY,
        );
    }

    fn draw_hover_preview(&self, painter: &Painter, pos: Pos, turn: Player, is_valid: bool) {
        let rect = self.cell_rect(pos).shrink(GRID_LINE_WIDTH);

        if is_valid {
            painter.rect_filled(rect, CornerRadius::ZERO, hover_valid());
            self.draw_mark(painter, pos, turn, 1.0, ghost(mark_color(turn)));
        } else {
            painter.rect_filled(rect, CornerRadius::ZERO, hover_invalid());
        }
    }

    /// Area covered by cells, without the outer margin
    fn inner_rect(&self) -> Rect {
        Rect::from_min_size(
            self.board_rect.min + Vec2::splat(BOARD_MARGIN),
            Vec2::splat(self.cell_size * self.size as f32),
        )
    }

    fn cell_rect(&self, pos: Pos) -> Rect {
        let min = self.inner_rect().min + Vec2::new(pos.col as f32, pos.row as f32) * self.cell_size;
        Rect::from_min_size(min, Vec2::splat(self.cell_size))
    }

    /// Convert screen coordinates to board position
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.inner_rect().min;
        let col = (relative.x / self.cell_size).floor();
        let row = (relative.y / self.cell_size).floor();

        let n = self.size as f32;
        if col >= 0.0 && col < n && row >= 0.0 && row < n {
            Some(Pos::new(row as usize, col as usize))
        } else {
            None
        }
    }

    /// Convert board position to the screen coordinates of the cell center
    pub fn board_to_screen(&self, pos: Pos) -> Pos2 {
        self.cell_rect(pos).center()
    }
}
