//! Paints a [`SessionView`] into a [`DrawList`].
//!
//! Text positions are given by their baseline, the way the board was
//! originally laid out; they are converted to a top-left origin when pushed.

use lights_core::{Bounds, GameState, SessionView, Status};
use lights_engine::coords::{Rect, Vec2};
use lights_engine::paint::Color;
use lights_engine::scene::{DrawList, TextCmd, ZIndex};
use lights_engine::text::FontId;

const LIT: Color = Color::rgb(1.0, 1.0, 0.0);
const UNLIT: Color = Color::rgb(0.5, 0.5, 0.5);
const HOVER: Color = Color::rgb(1.0, 0.0, 0.0);
const PROMPT: Color = Color::rgb(0.0, 0.9, 0.0);

const HOVER_Z: ZIndex = ZIndex(0);
const CELL_Z: ZIndex = ZIndex(1);
const TEXT_Z: ZIndex = ZIndex(2);

/// Full-scale text height in logical pixels.
const BASE_TEXT: f32 = 24.0;

/// One line of screen text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x: f32,
    pub baseline: f32,
    pub size: f32,
    pub color: Color,
}

impl TextLine {
    fn new(text: impl Into<String>, x: f32, baseline: f32, scale: f32, color: Color) -> Self {
        Self {
            text: text.into(),
            x,
            baseline,
            size: BASE_TEXT * scale,
            color,
        }
    }

    fn into_cmd(self, font: FontId) -> TextCmd {
        let origin = Vec2::new(self.x, self.baseline - self.size);
        TextCmd::new(self.text, font, self.size, self.color, origin)
    }
}

/// Text shown for the view's screen.
pub fn text_lines(view: &SessionView) -> Vec<TextLine> {
    match view.state {
        GameState::Start => {
            let x = 158.0;
            vec![
                TextLine::new("Press s to start", x, 350.0, 1.0, PROMPT),
                TextLine::new("Click all of the yellow lights until they", x, 380.0, 0.5, Color::WHITE),
                TextLine::new("all turn gray! Be careful, the surrounding", x, 400.0, 0.5, Color::WHITE),
                TextLine::new("lights turn on or off depending on", x, 420.0, 0.5, Color::WHITE),
                TextLine::new("their state when you click!", x, 440.0, 0.5, Color::WHITE),
            ]
        }
        GameState::Playing => {
            vec![TextLine::new(format!("Moves: {}", view.moves), 25.0, 685.0, 0.6, Color::WHITE)]
        }
        GameState::Won => {
            let x = 254.0;
            vec![
                TextLine::new("You win!", x, 350.0, 1.0, Color::WHITE),
                TextLine::new(
                    format!("You finished in {} seconds", view.elapsed_seconds()),
                    x,
                    380.0,
                    0.6,
                    Color::WHITE,
                ),
                TextLine::new(format!("with {} clicks!", view.moves), x, 410.0, 0.6, Color::WHITE),
            ]
        }
    }
}

/// Pushes the whole frame. Text is skipped when no font is loaded.
pub fn paint(view: &SessionView, font: Option<FontId>, list: &mut DrawList) {
    if view.state == GameState::Playing {
        paint_board(view, list);
    }

    if let Some(font) = font {
        for line in text_lines(view) {
            list.push_text(TEXT_Z, line.into_cmd(font));
        }
    }
}

fn paint_board(view: &SessionView, list: &mut DrawList) {
    for cell in view.cells() {
        if cell.hovered {
            list.push_quad(HOVER_Z, to_rect(cell.highlight), HOVER);
        }
        let color = match cell.status {
            Status::On => LIT,
            Status::Off => UNLIT,
        };
        list.push_quad(CELL_Z, to_rect(cell.bounds), color);
    }
}

fn to_rect(b: Bounds) -> Rect {
    Rect::from_center(Vec2::new(b.center.x, b.center.y), Vec2::new(b.width, b.height))
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use lights_core::{BoardLayout, FrameInput, Grid, Point, Session};

    use super::*;

    fn playing(grid: Grid, pointer: Option<Point>) -> (Session, Instant) {
        let t0 = Instant::now();
        let mut session = Session::new(grid, BoardLayout::default());
        session.update(&FrameInput {
            begin_requested: true,
            ..FrameInput::idle(t0)
        });
        session.update(&FrameInput {
            pointer,
            ..FrameInput::idle(t0)
        });
        (session, t0)
    }

    #[test]
    fn start_screen_has_no_board() {
        let session = Session::new(Grid::with_lit(&[(2, 2)]), BoardLayout::default());
        let view = session.view(Instant::now());

        let mut list = DrawList::new();
        paint(&view, None, &mut list);
        assert!(list.is_empty());

        let lines = text_lines(&view);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].text, "Press s to start");
        assert_eq!(lines[0].color, PROMPT);
        assert_eq!(lines[1].size, 12.0);
    }

    #[test]
    fn board_colors_follow_cell_status() {
        let (session, t0) = playing(Grid::with_lit(&[(0, 0), (4, 4)]), None);
        let view = session.view(t0);

        let mut list = DrawList::new();
        paint(&view, None, &mut list);
        let quads: Vec<_> = list.quads().cloned().collect();
        assert_eq!(quads.len(), 25);
        assert_eq!(quads.iter().filter(|q| q.color == LIT).count(), 2);
        assert_eq!(quads.iter().filter(|q| q.color == UNLIT).count(), 23);

        let first = quads[0].rect;
        assert_eq!(first.origin, Vec2::new(50.0, 50.0));
        assert_eq!(first.size, Vec2::splat(100.0));
    }

    #[test]
    fn hovered_cell_gets_outline_behind_it() {
        let layout = BoardLayout::default();
        let center = layout.cell_bounds(1, 3).center;
        let (session, t0) = playing(Grid::solved(), Some(center));

        let mut list = DrawList::new();
        paint(&session.view(t0), None, &mut list);
        assert_eq!(list.len(), 26);

        let first = list.iter_in_paint_order().next().cloned().unwrap();
        assert_eq!(first.key.z, HOVER_Z);
        match first.cmd {
            lights_engine::scene::DrawCmd::Quad(q) => {
                assert_eq!(q.color, HOVER);
                assert_eq!(q.rect.size, Vec2::splat(110.0));
                assert_eq!(q.rect.center(), Vec2::new(center.x, center.y));
            }
            other => panic!("expected hover quad, got {other:?}"),
        }
    }

    #[test]
    fn move_counter_sits_bottom_left() {
        let (session, t0) = playing(Grid::with_lit(&[(2, 2)]), None);
        let lines = text_lines(&session.view(t0));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Moves: 0");
        assert_eq!(lines[0].x, 25.0);
        assert!(lines[0].baseline > 650.0);
    }

    #[test]
    fn won_screen_reports_time_and_clicks() {
        let layout = BoardLayout::default();
        let (mut session, t0) = playing(Grid::with_lit(&[(0, 0), (0, 1), (1, 0)]), None);
        let corner = layout.cell_bounds(0, 0).center;
        let t1 = t0 + Duration::from_millis(3400);
        session.update(&FrameInput {
            pointer: Some(corner),
            primary_down: true,
            ..FrameInput::idle(t1)
        });
        session.update(&FrameInput {
            pointer: Some(corner),
            ..FrameInput::idle(t1)
        });
        assert_eq!(session.state(), GameState::Won);

        let view = session.view(t1 + Duration::from_secs(60));
        let mut list = DrawList::new();
        paint(&view, None, &mut list);
        assert!(list.is_empty());

        let texts: Vec<String> = text_lines(&view).into_iter().map(|l| l.text).collect();
        assert_eq!(texts, ["You win!", "You finished in 3 seconds", "with 1 clicks!"]);
    }

    #[test]
    fn baseline_converts_to_top_left() {
        let line = TextLine::new("x", 10.0, 100.0, 0.5, Color::WHITE);
        assert_eq!(line.size, 12.0);
        assert_eq!(line.baseline - line.size, 88.0);
    }
}
