//! Board rendering for the Ultimate Tic-Tac-Toe GUI

use crate::board::{Move, Outcome, Player, Position, CELLS, SUB_BOARDS};
use crate::rules::winning_line;
use egui::{Align2, Color32, CornerRadius, FontId, Painter, Pos2, Rect, Sense, Stroke, StrokeKind, Vec2};

use super::theme::*;

/// Board view handles rendering and input for the 9x9 grid
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 40.0,
            board_rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked cell, if any.
    ///
    /// Clicks on illegal cells are returned too so the caller can report why
    /// the move was rejected.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        position: &Position,
        last_move: Option<Move>,
        suggested_move: Option<Move>,
        interactive: bool,
    ) -> Option<Move> {
        let available_size = ui.available_size();

        let board_size = available_size.x.min(available_size.y) - 20.0;
        self.cell_size = (board_size - 2.0 * BOARD_MARGIN) / (9.0 + 2.0 * SUB_BOARD_GAP_RATIO);

        let (response, painter) =
            ui.allocate_painter(Vec2::new(board_size, board_size), Sense::click());

        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BG);

        let game_over = position.global_outcome().is_terminal();

        for s in 0..SUB_BOARDS as u8 {
            if !game_over && position.is_target(s) {
                self.draw_target_highlight(&painter, s);
            }
            self.draw_sub_board_grid(&painter, s);
            self.draw_pieces(&painter, position, s);
            self.draw_sub_board_outcome(&painter, position, s);
        }

        if let Some(mv) = last_move {
            self.draw_last_move_marker(&painter, mv);
        }

        if let Some(mv) = suggested_move {
            self.draw_suggestion(&painter, mv, position.to_move());
        }

        if let Outcome::Win(player) = position.global_outcome() {
            self.draw_meta_winning_line(&painter, position, player);
        }

        let mut clicked = None;

        if interactive && !game_over {
            if let Some(pointer_pos) = response.hover_pos() {
                if let Some(mv) = self.screen_to_move(pointer_pos) {
                    let is_valid = position.is_legal(mv);
                    self.draw_hover_preview(&painter, mv, position.to_move(), is_valid);

                    if response.clicked() {
                        clicked = Some(mv);
                    }
                }
            }
        }

        clicked
    }

    /// Light fill and border on a sub-board the next move may go to
    fn draw_target_highlight(&self, painter: &Painter, s: u8) {
        let rect = self.sub_board_rect(s).expand(self.cell_size * 0.08);
        painter.rect_filled(rect, CornerRadius::same(4), TARGET_FILL);
        painter.rect_stroke(
            rect,
            CornerRadius::same(4),
            Stroke::new(2.0, TARGET_BORDER),
            StrokeKind::Inside,
        );
    }

    /// Draw the inner 3x3 lines of one sub-board
    fn draw_sub_board_grid(&self, painter: &Painter, s: u8) {
        let rect = self.sub_board_rect(s);
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);

        for i in 1..3 {
            let offset = i as f32 * self.cell_size;

            // Vertical line
            painter.line_segment(
                [
                    Pos2::new(rect.min.x + offset, rect.min.y),
                    Pos2::new(rect.min.x + offset, rect.max.y),
                ],
                stroke,
            );

            // Horizontal line
            painter.line_segment(
                [
                    Pos2::new(rect.min.x, rect.min.y + offset),
                    Pos2::new(rect.max.x, rect.min.y + offset),
                ],
                stroke,
            );
        }

        painter.rect_stroke(
            rect.expand(self.cell_size * 0.04),
            CornerRadius::same(2),
            Stroke::new(SUB_BOARD_LINE_WIDTH, SUB_BOARD_LINE),
            StrokeKind::Outside,
        );
    }

    fn draw_pieces(&self, painter: &Painter, position: &Position, s: u8) {
        let sub = position.sub_board(s);
        for cell in 0..CELLS as u8 {
            if let Some(player) = sub.get(cell) {
                let mv = Move::new(s, cell);
                let radius = self.cell_size * PIECE_RATIO;
                self.draw_symbol(painter, self.cell_center(mv), radius, player, piece_color(player));
            }
        }
    }

    /// Overlay and large symbol on decided sub-boards
    fn draw_sub_board_outcome(&self, painter: &Painter, position: &Position, s: u8) {
        let rect = self.sub_board_rect(s);
        match position.sub_board(s).outcome() {
            Outcome::Win(player) => {
                let color = piece_color(player);
                painter.rect_filled(rect, CornerRadius::same(4), won_overlay(color));
                let radius = self.cell_size * 1.2;
                let stroke_color = Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), 170);
                self.draw_symbol(painter, rect.center(), radius, player, stroke_color);
            }
            Outcome::Draw => {
                painter.rect_filled(rect, CornerRadius::same(4), DRAWN_OVERLAY);
            }
            Outcome::Ongoing => {}
        }
    }

    /// X as a cross, O as a ring
    fn draw_symbol(&self, painter: &Painter, center: Pos2, radius: f32, player: Player, color: Color32) {
        let width = PIECE_STROKE * (radius / (self.cell_size * PIECE_RATIO)).max(1.0);
        let stroke = Stroke::new(width, color);
        match player {
            Player::X => {
                let d = radius * std::f32::consts::FRAC_1_SQRT_2;
                painter.line_segment([center + Vec2::new(-d, -d), center + Vec2::new(d, d)], stroke);
                painter.line_segment([center + Vec2::new(-d, d), center + Vec2::new(d, -d)], stroke);
            }
            Player::O => {
                painter.circle_stroke(center, radius * 0.85, stroke);
            }
        }
    }

    /// Draw last move marker
    fn draw_last_move_marker(&self, painter: &Painter, mv: Move) {
        let rect = self.cell_rect(mv);
        let center = rect.min + Vec2::splat(LAST_MOVE_MARKER_RADIUS + 2.0);
        painter.circle_filled(center, LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
    }

    /// Line through the centers of the three sub-boards that won the game
    fn draw_meta_winning_line(&self, painter: &Painter, position: &Position, player: Player) {
        let Some(line) = winning_line(position.global_board().cells(player)) else {
            return;
        };
        let centers: Vec<Pos2> = (0..SUB_BOARDS as u8)
            .filter(|s| line & (1 << s) != 0)
            .map(|s| self.sub_board_rect(s).center())
            .collect();
        if let (Some(&first), Some(&last)) = (centers.first(), centers.last()) {
            painter.line_segment([first, last], Stroke::new(6.0, WIN_HIGHLIGHT));
        }
    }

    /// Draw move suggestion
    fn draw_suggestion(&self, painter: &Painter, mv: Move, turn: Player) {
        let center = self.cell_center(mv);
        let color = piece_color(turn);
        let faded = Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), 90);

        self.draw_symbol(painter, center, self.cell_size * PIECE_RATIO, turn, faded);
        painter.text(center, Align2::CENTER_CENTER, "?", FontId::proportional(14.0), color);
    }

    /// Draw hover preview
    fn draw_hover_preview(&self, painter: &Painter, mv: Move, turn: Player, is_valid: bool) {
        let rect = self.cell_rect(mv).shrink(2.0);
        if is_valid {
            painter.rect_filled(rect, CornerRadius::same(3), hover_valid());
            let color = piece_color(turn);
            let faded = Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), 80);
            self.draw_symbol(painter, rect.center(), self.cell_size * PIECE_RATIO, turn, faded);
        } else {
            painter.rect_filled(rect, CornerRadius::same(3), hover_invalid());
        }
    }

    /// Screen rectangle covered by sub-board `s`
    fn sub_board_rect(&self, s: u8) -> Rect {
        let block = 3.0 * self.cell_size;
        let gap = SUB_BOARD_GAP_RATIO * self.cell_size;
        let (row, col) = ((s / 3) as f32, (s % 3) as f32);
        let min = self.board_rect.min
            + Vec2::new(BOARD_MARGIN + col * (block + gap), BOARD_MARGIN + row * (block + gap));
        Rect::from_min_size(min, Vec2::splat(block))
    }

    fn cell_rect(&self, mv: Move) -> Rect {
        let sub = self.sub_board_rect(mv.sub);
        let (row, col) = ((mv.cell / 3) as f32, (mv.cell % 3) as f32);
        Rect::from_min_size(
            sub.min + Vec2::new(col * self.cell_size, row * self.cell_size),
            Vec2::splat(self.cell_size),
        )
    }

    /// Convert a move to the screen position of its cell center
    pub fn cell_center(&self, mv: Move) -> Pos2 {
        self.cell_rect(mv).center()
    }

    /// Convert screen coordinates to a move, `None` outside the cells
    pub fn screen_to_move(&self, screen_pos: Pos2) -> Option<Move> {
        let relative = screen_pos - self.board_rect.min;
        let (sub_col, cell_col) = self.axis_to_index(relative.x)?;
        let (sub_row, cell_row) = self.axis_to_index(relative.y)?;
        Some(Move::new(sub_row * 3 + sub_col, cell_row * 3 + cell_col))
    }

    /// Map one screen axis to (sub-board index, cell index); gaps map to `None`
    fn axis_to_index(&self, offset: f32) -> Option<(u8, u8)> {
        let block = 3.0 * self.cell_size;
        let gap = SUB_BOARD_GAP_RATIO * self.cell_size;
        let offset = offset - BOARD_MARGIN;
        if offset < 0.0 {
            return None;
        }

        let sub = (offset / (block + gap)).floor();
        if sub >= 3.0 {
            return None;
        }
        let within = offset - sub * (block + gap);
        if within >= block {
            return None;
        }
        let cell = (within / self.cell_size).floor().min(2.0);
        Some((sub as u8, cell as u8))
    }
}

fn piece_color(player: Player) -> Color32 {
    match player {
        Player::X => X_COLOR,
        Player::O => O_COLOR,
    }
}
