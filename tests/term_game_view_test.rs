use blockfall::core::{GameSnapshot, GameState};
use blockfall::term::{AnchorY, FrameBuffer, GameView, Layout, Palette, Viewport};
use blockfall::types::{Phase, PieceKind};

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        all.push_str(&fb.row_text(y));
        all.push('\n');
    }
    all
}

fn running_snapshot(seed: u64) -> GameSnapshot {
    let mut gs = GameState::new(seed);
    gs.start();
    gs.snapshot()
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let layout = Layout::compute(vp, AnchorY::Center).unwrap();
    let fb = view.render(&snap, 0, vp);

    let (x0, y0) = (layout.frame_x, layout.frame_y);
    let (x1, y1) = (x0 + layout.frame_w - 1, y0 + layout.frame_h - 1);
    assert_eq!(fb.get(x0, y0).unwrap().ch, '┌');
    assert_eq!(fb.get(x1, y0).unwrap().ch, '┐');
    assert_eq!(fb.get(x0, y1).unwrap().ch, '└');
    assert_eq!(fb.get(x1, y1).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = running_snapshot(1);
    snap.board[19][0] = PieceKind::I.index() as u8 + 1;
    snap.active = None;
    snap.ghost_y = None;

    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let layout = Layout::compute(vp, AnchorY::Center).unwrap();
    let fb = view.render(&snap, 0, vp);

    let (x, y) = layout.cell_origin(0, 19);
    assert_eq!(fb.get(x, y).unwrap().ch, '█');
    assert_eq!(fb.get(x + 1, y).unwrap().ch, '█');
    assert_eq!(fb.get(x, y).unwrap().style.fg, Palette::dark().piece(PieceKind::I));
}

#[test]
fn narrow_terminal_uses_single_width_cells() {
    let mut snap = running_snapshot(1);
    snap.board[19][0] = PieceKind::T.index() as u8 + 1;
    snap.active = None;

    let vp = Viewport::new(36, 22);
    let layout = Layout::compute(vp, AnchorY::Center).unwrap();
    assert_eq!(layout.cell_w, 1);

    let fb = GameView::default().render(&snap, 0, vp);
    let (x, y) = layout.cell_origin(0, 19);
    assert_eq!(fb.get(x, y).unwrap().ch, '█');
    assert_ne!(fb.get(x + 1, y).unwrap().ch, '█');
}

#[test]
fn hud_shows_counters_and_high_score() {
    let mut snap = running_snapshot(1);
    snap.score = 1234;
    snap.level = 2;
    snap.lines = 21;
    snap.high_score = 98765;
    snap.hold = Some(PieceKind::T);

    let fb = GameView::default().render(&snap, 0, Viewport::new(80, 24));
    let all = screen_text(&fb);
    for needle in ["SCORE", "1234", "LINES", "21", "LEVEL", "HIGH", "98765", "HOLD", "NEXT"] {
        assert!(all.contains(needle), "missing {needle}");
    }
}

#[test]
fn ghost_is_drawn_below_the_active_piece() {
    let snap = running_snapshot(3);
    let active = snap.active.unwrap();
    let ghost_y = snap.ghost_y.unwrap();
    assert!(ghost_y > active.y);

    let vp = Viewport::new(80, 24);
    let layout = Layout::compute(vp, AnchorY::Center).unwrap();
    let fb = GameView::default().render(&snap, 0, vp);

    for (x, y) in active.cells_at(ghost_y) {
        let (px, py) = layout.cell_origin(x as u16, y as u16);
        assert_eq!(fb.get(px, py).unwrap().ch, '░');
    }
    for (x, y) in active.cells_at(active.y).filter(|&(_, y)| y >= 0) {
        let (px, py) = layout.cell_origin(x as u16, y as u16);
        assert_eq!(fb.get(px, py).unwrap().ch, '█');
    }
}

#[test]
fn overlays_follow_the_phase() {
    let view = GameView::default();
    let vp = Viewport::new(80, 24);

    let idle = GameState::new(1).snapshot();
    assert!(screen_text(&view.render(&idle, 0, vp)).contains("ENTER to start"));

    let mut paused = running_snapshot(1);
    paused.phase = Phase::Paused;
    assert!(screen_text(&view.render(&paused, 0, vp)).contains("PAUSED"));

    let mut over = running_snapshot(1);
    over.phase = Phase::GameOver;
    over.score = 4321;
    over.lines = 17;
    let text = screen_text(&view.render(&over, 0, vp));
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("Score 4321"));
    assert!(text.contains("Lines 17"));

    let running = running_snapshot(1);
    let text = screen_text(&view.render(&running, 0, vp));
    assert!(!text.contains("PAUSED"));
    assert!(!text.contains("GAME OVER"));
}

#[test]
fn idle_backdrop_animates() {
    let idle = GameState::new(1).snapshot();
    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let a = view.render(&idle, 0, vp);
    let b = view.render(&idle, 30, vp);
    assert_ne!(a, b);
}

#[test]
fn tiny_terminal_shows_a_hint() {
    let snap = running_snapshot(1);
    let fb = GameView::default().render(&snap, 0, Viewport::new(20, 10));
    assert!(screen_text(&fb).contains("too small"));
}

#[test]
fn term_view_can_anchor_board_to_top() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let vp = Viewport::new(80, 40);
    let layout = Layout::compute(vp, AnchorY::Top).unwrap();
    let fb = view.render(&snap, 0, vp);

    assert_eq!(layout.frame_y, 0);
    assert_eq!(fb.get(layout.frame_x, 0).unwrap().ch, '┌');
}

#[test]
fn light_theme_recolors_the_well() {
    let snap = running_snapshot(1);
    let vp = Viewport::new(80, 24);
    let layout = Layout::compute(vp, AnchorY::Center).unwrap();
    let (x, y) = layout.cell_origin(0, 19);

    let dark = GameView::default().render(&snap, 0, vp);
    let light = GameView::new(Palette::light()).render(&snap, 0, vp);
    assert_eq!(dark.get(x, y).unwrap().style.bg, Palette::dark().well);
    assert_eq!(light.get(x, y).unwrap().style.bg, Palette::light().well);
}

#[test]
fn banners_stay_inside_the_single_width_well() {
    let vp = Layout::min_viewport();
    let layout = Layout::compute(vp, AnchorY::Center).unwrap();
    assert_eq!(layout.cell_w, 1);
    let right = layout.frame_x + layout.frame_w - 1;

    let idle = GameState::new(1).snapshot();
    let mut paused = running_snapshot(1);
    paused.phase = Phase::Paused;
    let mut over = running_snapshot(1);
    over.phase = Phase::GameOver;
    over.score = 4_000_000_000;
    over.lines = 12345;

    let view = GameView::default();
    for snap in [idle, paused, over] {
        let fb = view.render(&snap, 0, vp);
        for y in layout.frame_y + 1..layout.frame_y + layout.frame_h - 1 {
            assert_eq!(
                fb.get(right, y).unwrap().ch,
                '│',
                "{:?} row {y}: {}",
                snap.phase,
                fb.row_text(y)
            );
            assert_eq!(fb.get(layout.frame_x, y).unwrap().ch, '│');
        }
    }
}

#[test]
fn narrow_banners_use_short_hints() {
    let vp = Layout::min_viewport();
    let view = GameView::default();

    let idle = screen_text(&view.render(&GameState::new(1).snapshot(), 0, vp));
    assert!(idle.contains("BLOCKFALL"));
    assert!(idle.contains("ENTER"));
    assert!(!idle.contains("ENTER to start"));

    let mut over = running_snapshot(1);
    over.phase = Phase::GameOver;
    over.score = 4321;
    over.lines = 17;
    let text = screen_text(&view.render(&over, 0, vp));
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("Score 4321"));
    assert!(text.contains("Lines 17"));
}
