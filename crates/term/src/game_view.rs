//! GameView: draws a [`GameSnapshot`] into a [`FrameBuffer`].
//!
//! Pure; no terminal I/O happens here, so layouts are unit-tested directly.
//!
//! ```text
//!  HOLD        ┌────────────────────┐  NEXT
//! ┌────────┐   │                    │ ┌────────┐┌────────┐
//! │        │   │      board         │ │        ││        │
//! └────────┘   │                    │ └────────┘└────────┘
//!  SCORE       │                    │ ┌────────┐┌────────┐
//!  120         └────────────────────┘ └────────┘└────────┘
//!              status line
//! ```

use std::sync::Arc;

use crate::core::{GameSnapshot, PieceTemplate};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GamePhase, BOARD_WIDTH, MAX_SHAPE_SIDE, PREVIEW_LEN, VISIBLE_HEIGHT};

pub const START_TEXT: &str = "Press <Enter> to start";
pub const GAME_OVER_TEXT: &str = "Game Over!!!";
pub const RESTART_TEXT: &str = "Press <R> to restart";

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const BORDER: Rgb = Rgb::new(200, 200, 200);
const LABEL: Rgb = Rgb::new(220, 220, 220);
const GRID_DOT: Rgb = Rgb::new(90, 90, 100);

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

/// Screen positions of each panel, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub hold: (u16, u16),
    pub board: (u16, u16),
    pub next: (u16, u16),
    pub status_y: u16,
}

#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Terminal columns per board cell.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps blocks roughly square.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    fn mini_box_w(&self) -> u16 {
        MAX_SHAPE_SIDE as u16 * self.cell_w + 2
    }

    fn mini_box_h(&self) -> u16 {
        MAX_SHAPE_SIDE as u16 + 2
    }

    fn board_frame(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            VISIBLE_HEIGHT as u16 + 2,
        )
    }

    /// Total size the view needs; smaller viewports are clipped.
    pub fn required_size(&self) -> (u16, u16) {
        let (frame_w, frame_h) = self.board_frame();
        let w = self.mini_box_w() + 2 + frame_w + 2 + 2 * self.mini_box_w();
        // Board frame plus game-over text and restart hint.
        (w, frame_h + 2)
    }

    /// Centre the layout in `viewport`.
    pub fn layout(&self, viewport: Viewport) -> Layout {
        let (w, h) = self.required_size();
        let x0 = viewport.width.saturating_sub(w) / 2;
        let y0 = viewport.height.saturating_sub(h) / 2;
        let (frame_w, frame_h) = self.board_frame();

        let board_x = x0 + self.mini_box_w() + 2;
        Layout {
            hold: (x0, y0 + 1),
            board: (board_x, y0),
            next: (board_x + frame_w + 2, y0 + 1),
            status_y: y0 + frame_h,
        }
    }

    /// Render into an existing framebuffer, resizing it to `viewport`.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let layout = self.layout(viewport);
        self.draw_board(fb, snap, layout.board);
        self.draw_hold(fb, snap, layout.hold);
        self.draw_next(fb, snap, layout.next);
        self.draw_status(fb, snap, &layout);
    }

    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_board(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, (x0, y0): (u16, u16)) {
        let (frame_w, frame_h) = self.board_frame();
        fb.draw_box(x0, y0, frame_w, frame_h, CellStyle::fg(BORDER));

        for y in 0..VISIBLE_HEIGHT as i8 {
            // y = 0 is the bottom row of the frame.
            let row = y0 + 1 + (VISIBLE_HEIGHT as i8 - 1 - y) as u16;
            for x in 0..BOARD_WIDTH as i8 {
                let col = x0 + 1 + x as u16 * self.cell_w;
                match snap.color_at(x, y) {
                    Some(color) => {
                        let style = CellStyle::fg(Rgb::from_piece(color)).on(PLAYFIELD_BG);
                        fb.fill_rect(col, row, self.cell_w, 1, '█', style);
                    }
                    None => {
                        let style = CellStyle::fg(GRID_DOT).on(PLAYFIELD_BG).dim();
                        fb.fill_rect(col, row, self.cell_w, 1, ' ', style);
                        fb.put_char(col, row, '·', style);
                    }
                }
            }
        }
    }

    fn draw_hold(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, (x, y): (u16, u16)) {
        let mut label = CellStyle::fg(LABEL).bold();
        if !snap.can_hold {
            label = label.dim();
        }
        fb.put_str(x + 1, y, "HOLD", label);
        self.draw_mini(fb, x, y + 1, snap.hold.as_ref(), snap.can_hold);

        let score_y = y + 1 + self.mini_box_h() + 1;
        fb.put_str(x + 1, score_y, "SCORE", CellStyle::fg(LABEL).bold());
        fb.put_u32(x + 1, score_y + 1, snap.score, CellStyle::fg(LABEL));
    }

    fn draw_next(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, (x, y): (u16, u16)) {
        fb.put_str(x + 1, y, "NEXT", CellStyle::fg(LABEL).bold());
        let (w, h) = (self.mini_box_w(), self.mini_box_h());
        for slot in 0..PREVIEW_LEN {
            let bx = x + (slot % 2) as u16 * w;
            let by = y + 1 + (slot / 2) as u16 * h;
            self.draw_mini(fb, bx, by, snap.next_queue.get(slot), true);
        }
    }

    /// Boxed 4x4 grid showing a template in its spawn orientation.
    fn draw_mini(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        piece: Option<&Arc<PieceTemplate>>,
        active: bool,
    ) {
        let mut border = CellStyle::fg(BORDER);
        if !active {
            border = CellStyle::fg(BORDER.darkened()).dim();
        }
        fb.draw_box(x, y, self.mini_box_w(), self.mini_box_h(), border);

        let Some(piece) = piece else {
            return;
        };
        let mut fg = Rgb::from_piece(piece.color());
        if !active {
            fg = fg.darkened();
        }
        let mut style = CellStyle::fg(fg);
        if !active {
            style = style.dim();
        }
        let top = MAX_SHAPE_SIDE as i8 - 1;
        for &(dx, dy) in piece.offsets() {
            let col = x + 1 + dx as u16 * self.cell_w;
            let row = y + 1 + (top - dy) as u16;
            fb.fill_rect(col, row, self.cell_w, 1, '█', style);
        }
    }

    fn draw_status(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &Layout) {
        let (frame_w, _) = self.board_frame();
        let centered = |text_w: u16| layout.board.0 + frame_w.saturating_sub(text_w) / 2;
        let text = CellStyle::fg(Rgb::new(255, 255, 255)).bold();
        let hint = CellStyle::fg(LABEL);

        match snap.phase {
            GamePhase::NotStarted => {
                fb.put_str(
                    centered(START_TEXT.len() as u16),
                    layout.status_y,
                    START_TEXT,
                    text,
                );
            }
            GamePhase::GameOver => {
                let digits = digit_count(snap.score);
                let line_w = GAME_OVER_TEXT.len() as u16 + " Score: ".len() as u16 + digits;
                let x = centered(line_w);
                let x = fb.put_str(x, layout.status_y, GAME_OVER_TEXT, text);
                let x = fb.put_str(x, layout.status_y, " Score: ", text);
                fb.put_u32(x, layout.status_y, snap.score, text);
                fb.put_str(
                    centered(RESTART_TEXT.len() as u16),
                    layout.status_y + 1,
                    RESTART_TEXT,
                    hint,
                );
            }
            GamePhase::Running => {}
        }
    }
}

fn digit_count(mut value: u32) -> u16 {
    let mut n = 1;
    while value >= 10 {
        value /= 10;
        n += 1;
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceColor;

    fn find(fb: &FrameBuffer, needle: &str) -> Option<(u16, u16)> {
        (0..fb.height()).find_map(|y| {
            let row = fb.row_text(y);
            row.find(needle)
                .map(|byte| (row[..byte].chars().count() as u16, y))
        })
    }

    #[test]
    fn test_layout_fits_classic_terminal() {
        let view = GameView::default();
        let (w, h) = view.required_size();
        assert!(w <= 80 && h <= 24, "{w}x{h}");
    }

    #[test]
    fn test_start_prompt_before_start() {
        let view = GameView::default();
        let fb = view.render(&GameSnapshot::default(), Viewport::new(80, 24));
        assert!(find(&fb, START_TEXT).is_some());
        assert!(find(&fb, GAME_OVER_TEXT).is_none());
    }

    #[test]
    fn test_game_over_shows_score_and_hint() {
        let view = GameView::default();
        let snap = GameSnapshot {
            phase: GamePhase::GameOver,
            score: 1240,
            ..GameSnapshot::default()
        };
        let fb = view.render(&snap, Viewport::new(80, 24));
        assert!(find(&fb, "Game Over!!! Score: 1240").is_some());
        assert!(find(&fb, RESTART_TEXT).is_some());
    }

    #[test]
    fn test_bottom_row_is_drawn_last() {
        let view = GameView::default();
        let mut snap = GameSnapshot {
            phase: GamePhase::Running,
            ..GameSnapshot::default()
        };
        snap.board[0][0] = Some(PieceColor::new("#FF0000"));

        let viewport = Viewport::new(80, 24);
        let fb = view.render(&snap, viewport);
        let (bx, by) = view.layout(viewport).board;
        let glyph = fb.get(bx + 1, by + VISIBLE_HEIGHT as u16).unwrap();
        assert_eq!(glyph.ch, '█');
        assert_eq!(glyph.style.fg, Rgb::new(255, 0, 0));
        // Top visible row stays empty.
        assert_eq!(fb.get(bx + 1, by + 1).unwrap().ch, '·');
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let view = GameView::default();
        let fb = view.render(&GameSnapshot::default(), Viewport::new(5, 3));
        assert_eq!((fb.width(), fb.height()), (5, 3));
    }
}
