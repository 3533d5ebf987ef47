//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Layout, left to right: hold preview and HUD, the bordered well, the next
//! queue. Cells are two columns wide when the viewport allows, else one.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Matrix};
use crate::fb::{CellStyle, FrameBuffer};
use crate::palette::Palette;
use crate::types::{Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, NEXT_PREVIEW_LEN};

/// Width of the hold/HUD column.
const SIDE_PANEL_W: u16 = 12;
/// Columns between the well frame and each side column.
const PANEL_GAP: u16 = 2;
/// Preview boxes are four cells wide.
const PREVIEW_CELLS: u16 = 4;
/// Rows used by each next-queue entry (two piece rows and a spacer).
const PREVIEW_PITCH: u16 = 3;

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Positions derived from the viewport for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Board cell width in terminal columns.
    pub cell_w: u16,
    /// Top-left corner of the well frame.
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    pub hold_x: u16,
    pub next_x: u16,
}

impl Layout {
    fn total_width(cell_w: u16) -> u16 {
        SIDE_PANEL_W + PANEL_GAP + frame_width(cell_w) + PANEL_GAP + PREVIEW_CELLS * cell_w
    }

    /// Smallest viewport that fits the one-column layout.
    pub fn min_viewport() -> Viewport {
        Viewport::new(Self::total_width(1), BOARD_HEIGHT as u16 + 2)
    }

    /// Fit the layout into the viewport, or `None` if it is too small.
    pub fn compute(viewport: Viewport, anchor_y: AnchorY) -> Option<Self> {
        let min = Self::min_viewport();
        if viewport.width < min.width || viewport.height < min.height {
            return None;
        }

        let cell_w = if viewport.width >= Self::total_width(2) { 2 } else { 1 };
        let frame_w = frame_width(cell_w);
        let frame_h = BOARD_HEIGHT as u16 + 2;

        let total_w = Self::total_width(cell_w);
        let left = (viewport.width - total_w) / 2;
        let frame_x = left + SIDE_PANEL_W + PANEL_GAP;
        let frame_y = match anchor_y {
            AnchorY::Center => (viewport.height - frame_h) / 2,
            AnchorY::Top => 0,
        };

        Some(Self {
            cell_w,
            frame_x,
            frame_y,
            frame_w,
            frame_h,
            hold_x: left,
            next_x: frame_x + frame_w + PANEL_GAP,
        })
    }

    /// Terminal position of board cell (x, y).
    pub fn cell_origin(&self, x: u16, y: u16) -> (u16, u16) {
        (self.frame_x + 1 + x * self.cell_w, self.frame_y + 1 + y)
    }
}

fn frame_width(cell_w: u16) -> u16 {
    BOARD_WIDTH as u16 * cell_w + 2
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone)]
pub struct GameView {
    palette: Palette,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

impl GameView {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Render a frame into an existing framebuffer.
    ///
    /// `frame` is a monotonically increasing frame counter; it only drives the
    /// idle backdrop animation.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        frame: u64,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(self.palette.screen().into_cell(' '));

        let Some(layout) = Layout::compute(viewport, self.anchor_y) else {
            self.draw_too_small(fb, viewport);
            return;
        };

        self.draw_well(fb, &layout, snap);

        if snap.phase == Phase::Idle {
            self.draw_idle_backdrop(fb, &layout, frame);
        } else {
            self.draw_pieces(fb, &layout, snap);
        }

        self.draw_hold(fb, &layout, snap);
        self.draw_hud(fb, &layout, snap);
        self.draw_next(fb, &layout, snap);
        self.draw_overlay(fb, &layout, snap);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, frame: u64, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, frame, viewport, &mut fb);
        fb
    }

    fn draw_too_small(&self, fb: &mut FrameBuffer, viewport: Viewport) {
        let min = Layout::min_viewport();
        let style = self.palette.heading();
        let mid = viewport.height / 2;
        fb.put_str_centered(0, mid.saturating_sub(1), viewport.width, "Terminal too small", style);

        let value = self.palette.value();
        let mut x = viewport.width.saturating_sub(7) / 2;
        x = fb.put_u32(x, mid, u32::from(min.width), value);
        x = fb.put_str(x, mid, "x", value);
        fb.put_u32(x, mid, u32::from(min.height), value);
    }

    fn draw_well(&self, fb: &mut FrameBuffer, layout: &Layout, snap: &GameSnapshot) {
        let border = self.palette.frame();
        draw_border(
            fb,
            layout.frame_x,
            layout.frame_y,
            layout.frame_w,
            layout.frame_h,
            border,
        );

        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                match snap.cell(x as usize, y as usize) {
                    Some(kind) => self.draw_block(fb, layout, x, y, self.palette.block(kind)),
                    None => self.draw_empty(fb, layout, x, y),
                }
            }
        }
    }

    fn draw_pieces(&self, fb: &mut FrameBuffer, layout: &Layout, snap: &GameSnapshot) {
        let Some(active) = snap.active else {
            return;
        };

        if let Some(ghost_y) = snap.ghost_y {
            if ghost_y != active.y {
                let style = self.palette.ghost(active.kind);
                for (x, y) in active.cells_at(ghost_y) {
                    if let Some((x, y)) = visible(x, y) {
                        self.draw_glyph(fb, layout, x, y, '░', style);
                    }
                }
            }
        }

        let style = self.palette.block(active.kind);
        for (x, y) in active.cells_at(active.y) {
            if let Some((x, y)) = visible(x, y) {
                self.draw_block(fb, layout, x, y, style);
            }
        }
    }

    /// Columns of falling blocks behind the idle title.
    fn draw_idle_backdrop(&self, fb: &mut FrameBuffer, layout: &Layout, frame: u64) {
        let h = BOARD_HEIGHT as u64;
        let trail = 4u64;
        for x in 0..BOARD_WIDTH as u64 {
            let speed = 3 + (x * 5) % 4;
            let offset = (x * 37 + 11) % (h + trail);
            let head = (frame / speed + offset) % (h + trail);
            let kind = PieceKind::ALL[((x + frame / 240) % 7) as usize];
            let color = self.palette.piece(kind);

            for t in 0..trail {
                let Some(y) = head.checked_sub(t) else {
                    break;
                };
                if y >= h {
                    continue;
                }
                let fade = (200 - t * 45) as u8;
                let style = CellStyle::new(self.palette.well.blend(color, fade), self.palette.well);
                self.draw_block(fb, layout, x as u16, y as u16, style);
            }
        }
    }

    fn draw_hold(&self, fb: &mut FrameBuffer, layout: &Layout, snap: &GameSnapshot) {
        let x = layout.hold_x;
        let y = layout.frame_y;
        fb.put_str(x, y, "HOLD", self.palette.heading());
        if let Some(kind) = snap.hold {
            let mut style = self.palette.block(kind);
            if !snap.can_hold {
                style = style.dim();
            }
            self.draw_preview(fb, layout, x, y + 2, kind, style);
        }
    }

    fn draw_hud(&self, fb: &mut FrameBuffer, layout: &Layout, snap: &GameSnapshot) {
        let x = layout.hold_x;
        let mut y = layout.frame_y + 6;
        let label = self.palette.heading();
        let value = self.palette.value();

        for (name, v) in [
            ("SCORE", snap.score),
            ("LINES", snap.lines),
            ("LEVEL", snap.level),
            ("HIGH", snap.high_score),
        ] {
            fb.put_str(x, y, name, label);
            fb.put_u32(x, y + 1, v, value);
            y += 3;
        }

        fb.put_str(x, y, "THEME", label);
        fb.put_str(x, y + 1, self.palette.theme.as_str(), value);
    }

    fn draw_next(&self, fb: &mut FrameBuffer, layout: &Layout, snap: &GameSnapshot) {
        let x = layout.next_x;
        let y = layout.frame_y;
        fb.put_str(x, y, "NEXT", self.palette.heading());
        if snap.phase == Phase::Idle {
            return;
        }
        for (i, kind) in snap.next_queue.iter().take(NEXT_PREVIEW_LEN).enumerate() {
            let py = y + 2 + i as u16 * PREVIEW_PITCH;
            self.draw_preview(fb, layout, x, py, *kind, self.palette.block(*kind));
        }
    }

    /// Draw the filled rows of a piece's spawn matrix, centred in a 4-cell box.
    fn draw_preview(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        x: u16,
        y: u16,
        kind: PieceKind,
        style: CellStyle,
    ) {
        let matrix = Matrix::spawn(kind);
        let (min_x, max_x) = matrix
            .cells()
            .fold((i8::MAX, i8::MIN), |(lo, hi), (cx, _)| (lo.min(cx), hi.max(cx)));
        let width = (max_x - min_x + 1) as u16;
        let pad = (PREVIEW_CELLS.saturating_sub(width) * layout.cell_w) / 2;
        let top = matrix.top_padding() as i8;

        for (cx, cy) in matrix.cells() {
            let px = x + pad + (cx - min_x) as u16 * layout.cell_w;
            let py = y + (cy - top) as u16;
            fb.fill_rect(px, py, layout.cell_w, 1, '█', style);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, layout: &Layout, snap: &GameSnapshot) {
        match snap.phase {
            Phase::Idle => {
                self.draw_banner(
                    fb,
                    layout,
                    &[("BLOCKFALL", "BLOCKFALL"), ("", ""), ("ENTER to start", "ENTER")],
                    None,
                );
            }
            Phase::Paused => {
                self.draw_banner(
                    fb,
                    layout,
                    &[("PAUSED", "PAUSED"), ("", ""), ("P to resume", "P")],
                    None,
                );
            }
            Phase::GameOver => {
                self.draw_banner(
                    fb,
                    layout,
                    &[
                        ("GAME OVER", "GAME OVER"),
                        ("Score", ""),
                        ("Lines", ""),
                        ("", ""),
                        ("ENTER to restart", "ENTER"),
                    ],
                    Some((snap.score, snap.lines)),
                );
            }
            Phase::Running => {}
        }
    }

    /// Centre a block of text lines over the well.
    ///
    /// Each line is a `(long, short)` pair; the short form is used when the
    /// long one does not fit inside the well. With `stats`, the second and
    /// third lines get the score and line count appended. Nothing is drawn
    /// past the well's inner edge.
    fn draw_banner(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        lines: &[(&str, &str)],
        stats: Option<(u32, u32)>,
    ) {
        let inner_x = layout.frame_x + 1;
        let inner_w = layout.frame_w - 2;
        let h = lines.len() as u16 + 2;
        let top = layout.frame_y + (layout.frame_h.saturating_sub(h)) / 2;
        let style = self.palette.overlay();

        fb.fill_rect(inner_x, top, inner_w, h, ' ', style);
        for (i, &(long, short)) in lines.iter().enumerate() {
            let y = top + 1 + i as u16;
            let value = match (stats, i) {
                (Some((score, _)), 1) => Some(score),
                (Some((_, lines)), 2) => Some(lines),
                _ => None,
            };
            match value {
                Some(v) => {
                    let full = long.len() as u16 + 1 + digits(v);
                    let (label, w) = if full <= inner_w {
                        (long, full)
                    } else {
                        (short, digits(v))
                    };
                    let x = inner_x + inner_w.saturating_sub(w) / 2;
                    let x = if label.is_empty() {
                        x
                    } else {
                        fb.put_str(x, y, label, style) + 1
                    };
                    fb.put_u32(x, y, v, style);
                }
                None => {
                    let text = if long.len() as u16 <= inner_w { long } else { short };
                    let line_style = if i == 0 {
                        style
                    } else {
                        CellStyle { bold: false, ..style }
                    };
                    fb.put_str_centered(inner_x, y, inner_w, text, line_style);
                }
            }
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, layout: &Layout, x: u16, y: u16, style: CellStyle) {
        self.draw_glyph(fb, layout, x, y, '█', style);
    }

    fn draw_glyph(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        x: u16,
        y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let (px, py) = layout.cell_origin(x, y);
        fb.fill_rect(px, py, layout.cell_w, 1, ch, style);
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, layout: &Layout, x: u16, y: u16) {
        let (px, py) = layout.cell_origin(x, y);
        let style = self.palette.empty_cell();
        fb.put_char(px, py, '·', style);
        if layout.cell_w == 2 {
            fb.put_char(px + 1, py, ' ', style);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// Board coordinates inside the visible well.
fn visible(x: i8, y: i8) -> Option<(u16, u16)> {
    if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
        Some((x as u16, y as u16))
    } else {
        None
    }
}

fn digits(mut v: u32) -> u16 {
    let mut n = 1;
    while v >= 10 {
        v /= 10;
        n += 1;
    }
    n
}
