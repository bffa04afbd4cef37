//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameStatus, Position, GRID_SIZE, TILE_KINDS};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Front-end state drawn on top of the snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewState<'a> {
    pub cursor: Option<Position>,
    pub hint: Option<(Position, Position)>,
    /// Tiles being removed by the step on screen.
    pub flash: &'a [Position],
    pub stuck: bool,
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const CURSOR_BG: Rgb = Rgb::new(90, 90, 110);
const SELECTED_BG: Rgb = Rgb::new(150, 120, 30);
const HINT_BG: Rgb = Rgb::new(30, 100, 60);

/// Glyph and colour per tile kind.
const TILE_FACES: [(char, Rgb); TILE_KINDS as usize] = [
    ('●', Rgb::new(235, 70, 70)),
    ('◆', Rgb::new(90, 220, 100)),
    ('▲', Rgb::new(90, 130, 240)),
    ('■', Rgb::new(240, 220, 80)),
    ('★', Rgb::new(220, 90, 220)),
    ('♥', Rgb::new(80, 220, 230)),
];

/// A lightweight terminal renderer for the tile board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    /// Cell size in terminal columns and rows, clamped to `1..=MAX_CELL`.
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.clamp(1, MAX_CELL),
            cell_h: cell_h.clamp(1, MAX_CELL),
        }
    }

    /// Outer size of the bordered board.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            GRID_SIZE as u16 * self.cell_w + 2,
            GRID_SIZE as u16 * self.cell_h + 2,
        )
    }

    /// Top-left corner of the board frame inside `viewport`.
    pub fn frame_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        (
            viewport.width.saturating_sub(frame_w + PANEL_W) / 2,
            viewport.height.saturating_sub(frame_h) / 2,
        )
    }

    /// Terminal cell of a board slot's first column.
    pub fn slot_origin(&self, viewport: Viewport, pos: Position) -> (u16, u16) {
        let (x, y) = self.frame_origin(viewport);
        (
            x + 1 + pos.col() as u16 * self.cell_w,
            y + 1 + pos.row() as u16 * self.cell_h,
        )
    }

    /// Render into an existing framebuffer (allocation-free per frame).
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        view: &ViewState<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (start_x, start_y) = self.frame_origin(viewport);
        let (frame_w, frame_h) = self.frame_size();

        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            CellStyle::new(BOARD_BG, BOARD_BG),
        );
        fb.draw_box(
            start_x,
            start_y,
            frame_w,
            frame_h,
            CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0)),
        );

        for pos in Position::all() {
            self.draw_slot(fb, viewport, snap, view, pos);
        }

        self.draw_side_panel(fb, snap, view, viewport, start_x + frame_w + 2, start_y);

        match snap.status {
            GameStatus::Won => self.draw_overlay_text(fb, start_x, start_y, "YOU WIN"),
            GameStatus::Lost => self.draw_overlay_text(fb, start_x, start_y, "GAME OVER"),
            GameStatus::Playing if view.stuck && !snap.busy => {
                self.draw_overlay_text(fb, start_x, start_y, "NO MOVES")
            }
            GameStatus::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, view: &ViewState<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, view, viewport, &mut fb);
        fb
    }

    fn draw_slot(
        &self,
        fb: &mut FrameBuffer,
        viewport: Viewport,
        snap: &GameSnapshot,
        view: &ViewState<'_>,
        pos: Position,
    ) {
        let is_hint = view.hint.is_some_and(|(a, b)| a == pos || b == pos);
        let bg = if snap.selection == Some(pos) {
            SELECTED_BG
        } else if view.cursor == Some(pos) {
            CURSOR_BG
        } else if is_hint {
            HINT_BG
        } else {
            BOARD_BG
        };

        let (ch, style) = if view.flash.contains(&pos) {
            ('✱', CellStyle::new(Rgb::new(255, 255, 255), bg).bold())
        } else {
            match snap.kind_at(pos) {
                Some(kind) => {
                    let (glyph, fg) = TILE_FACES[kind as usize % TILE_FACES.len()];
                    let style = CellStyle::new(fg, bg);
                    (glyph, if snap.selection == Some(pos) { style.bold() } else { style })
                }
                None => ('·', CellStyle::new(Rgb::new(90, 90, 100), bg).dim()),
            }
        };

        let (px, py) = self.slot_origin(viewport, pos);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(px, py, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        view: &ViewState<'_>,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let help = value.dim();

        let mut y = start_y;
        for (name, n) in [
            ("SCORE", snap.score),
            ("TARGET", snap.target_score),
            ("MOVES", snap.moves),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y += 3;
        }

        fb.put_str(panel_x, y, "STATUS", label);
        let status = if snap.busy { "busy" } else { snap.status.as_str() };
        fb.put_str(panel_x, y + 1, status, value);
        y += 3;

        let mut keys: [&str; 5] = ["move  arrows", "pick  space", "hint  ?", "new   r", "quit  q"];
        if view.stuck {
            keys[2] = "mix   x";
        }
        for line in keys {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y += 1;
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, text: &str) {
        let (frame_w, frame_h) = self.frame_size();
        let text_w = text.chars().count() as u16;
        let x = start_x + frame_w.saturating_sub(text_w) / 2;
        let y = start_y + frame_h / 2;
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, y, text, style);
    }
}

/// Width reserved right of the board for the side panel.
const PANEL_W: u16 = 16;

/// Largest cell edge; keeps every frame dimension well inside `u16`.
const MAX_CELL: u16 = 8;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, GameConfig, GameSession};

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    fn snapshot() -> GameSnapshot {
        GameSession::new(GameConfig::default().with_seed(12)).snapshot()
    }

    fn viewport() -> Viewport {
        Viewport::new(60, 20)
    }

    #[test]
    fn test_renders_every_tile() {
        let view = GameView::default();
        let snap = snapshot();
        let fb = view.render(&snap, &ViewState::default(), viewport());

        for p in Position::all() {
            let (x, y) = view.slot_origin(viewport(), p);
            let kind = snap.kind_at(p).unwrap();
            assert_eq!(fb.get(x, y).unwrap().ch, TILE_FACES[kind as usize].0);
        }
    }

    #[test]
    fn test_board_frame_is_centered() {
        let view = GameView::default();
        let fb = view.render(&snapshot(), &ViewState::default(), viewport());
        let (x, y) = view.frame_origin(viewport());
        assert_eq!(view.frame_size(), (18, 10));
        assert_eq!(fb.get(x, y).unwrap().ch, '┌');
        assert_eq!(fb.get(x + 17, y + 9).unwrap().ch, '┘');
    }

    #[test]
    fn test_cursor_selection_and_hint_backgrounds() {
        let view = GameView::default();
        let mut snap = snapshot();
        snap.selection = Some(pos(1, 1));
        let state = ViewState {
            cursor: Some(pos(2, 2)),
            hint: Some((pos(5, 5), pos(5, 6))),
            ..ViewState::default()
        };
        let fb = view.render(&snap, &state, viewport());
        let bg_at = |p: Position| {
            let (x, y) = view.slot_origin(viewport(), p);
            fb.get(x, y).unwrap().style.bg
        };

        assert_eq!(bg_at(pos(1, 1)), SELECTED_BG);
        assert_eq!(bg_at(pos(2, 2)), CURSOR_BG);
        assert_eq!(bg_at(pos(5, 6)), HINT_BG);
        assert_eq!(bg_at(pos(0, 0)), BOARD_BG);
    }

    #[test]
    fn test_empty_and_flashing_slots() {
        let view = GameView::default();
        let mut session = GameSession::new(GameConfig::default().with_seed(1));
        let mut board = Board::new();
        board.set_kind(pos(0, 0), Some(2));
        session.set_board(board);
        let snap = session.snapshot();
        let flash = [pos(0, 0)];
        let state = ViewState {
            flash: &flash,
            ..ViewState::default()
        };

        let fb = view.render(&snap, &state, viewport());
        let (x, y) = view.slot_origin(viewport(), pos(0, 0));
        assert_eq!(fb.get(x, y).unwrap().ch, '✱');
        let (x, y) = view.slot_origin(viewport(), pos(7, 7));
        assert_eq!(fb.get(x, y).unwrap().ch, '·');
    }

    #[test]
    fn test_side_panel_and_overlays() {
        let view = GameView::default();
        let mut snap = snapshot();
        snap.score = 1230;
        snap.moves = 0;
        snap.status = GameStatus::Won;
        let fb = view.render(&snap, &ViewState::default(), viewport());

        let text: String = (0..fb.height()).map(|y| fb.row_text(y)).collect::<Vec<_>>().join("\n");
        assert!(text.contains("SCORE"));
        assert!(text.contains("1230"));
        assert!(text.contains("YOU WIN"));

        snap.status = GameStatus::Playing;
        let stuck = ViewState {
            stuck: true,
            ..ViewState::default()
        };
        let fb = view.render(&snap, &stuck, viewport());
        let text: String = (0..fb.height()).map(|y| fb.row_text(y)).collect::<Vec<_>>().join("\n");
        assert!(text.contains("NO MOVES"));
        assert!(text.contains("mix   x"));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let view = GameView::default();
        let fb = view.render(&snapshot(), &ViewState::default(), Viewport::new(5, 3));
        assert_eq!((fb.width(), fb.height()), (5, 3));
    }

    #[test]
    fn test_cell_size_is_clamped() {
        let view = GameView::new(u16::MAX, 0);
        assert_eq!(view.frame_size(), (8 * MAX_CELL + 2, 10));

        let vp = Viewport::new(120, 40);
        let fb = view.render(&snapshot(), &ViewState::default(), vp);
        let (x, y) = view.frame_origin(vp);
        assert_eq!(fb.get(x, y).unwrap().ch, '┌');
    }
}
