use std::time::{Duration, Instant};

use rand::Rng;

use crate::generator::PuzzleGenerator;
use crate::geometry::{BoardLayout, Point};
use crate::grid::Grid;
use crate::input::{FrameInput, ReleaseDetector};
use crate::state::{GameState, StateMachine};
use crate::view::SessionView;

/// Something that happened during [`Session::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// `Start -> Playing`.
    Began,
    /// A click toggled the cross centred on `(row, col)`.
    Toggled { row: usize, col: usize },
    /// `Playing -> Won`, with the frozen score.
    Won { moves: u32, elapsed: Duration },
}

/// One game: the board, its layout, the screen machine and the score.
///
/// Owns all puzzle state. The frame loop feeds it one [`FrameInput`] per frame
/// and reads a [`SessionView`] back for drawing.
#[derive(Debug, Clone)]
pub struct Session {
    grid: Grid,
    layout: BoardLayout,
    machine: StateMachine,
    moves: u32,
    release: ReleaseDetector,
    pointer: Option<Point>,
    /// Board state at the last win check; a win needs a lit -> all-off change.
    was_solved: bool,
}

impl Session {
    /// New session on `grid`, waiting on the start screen.
    pub fn new(grid: Grid, layout: BoardLayout) -> Self {
        Self {
            grid,
            layout,
            machine: StateMachine::new(),
            moves: 0,
            release: ReleaseDetector::new(),
            pointer: None,
            was_solved: false,
        }
    }

    /// New session on a freshly generated solvable board.
    pub fn generate<R: Rng + ?Sized>(
        generator: &PuzzleGenerator,
        layout: BoardLayout,
        rng: &mut R,
    ) -> Self {
        Self::new(generator.generate(rng), layout)
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    #[inline]
    pub fn state(&self) -> GameState {
        self.machine.state()
    }

    #[inline]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[inline]
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.machine.elapsed(now)
    }

    /// Advances the session by one frame.
    ///
    /// - `Start`: only the begin key is looked at. The begin frame then runs
    ///   the `Playing` step too, so a release on that frame is a click.
    /// - `Playing`: a button release toggles every cell under the pointer
    ///   (one move each), then the board is checked for a win.
    /// - `Won`: input is ignored.
    ///
    /// The win fires when the board goes from lit to all-off. A board that
    /// is already all-off at begin does not win until it is lit and cleared.
    ///
    /// The release detector is fed on every frame regardless of state, so an
    /// edge is always measured against the immediately preceding frame.
    pub fn update(&mut self, input: &FrameInput) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        let released = self.release.sample(input.primary_down);
        self.pointer = input.pointer;

        if self.machine.state() == GameState::Start
            && input.begin_requested
            && self.machine.begin(input.now)
        {
            self.was_solved = self.grid.is_solved();
            log::info!("game started, {} lights on", self.grid.lit_count());
            events.push(SessionEvent::Began);
        }

        if self.machine.state() == GameState::Playing {
            if released {
                if let Some(p) = input.pointer {
                    self.click(p, &mut events);
                }
            }
            self.check_win(input.now, &mut events);
        }

        events
    }

    fn check_win(&mut self, now: Instant, events: &mut Vec<SessionEvent>) {
        let solved = self.grid.is_solved();
        let became_solved = solved && !self.was_solved;
        self.was_solved = solved;
        if !became_solved {
            return;
        }

        if let Some(elapsed) = self.machine.finish(now) {
            log::info!(
                "solved in {} move(s), {}s",
                self.moves,
                elapsed.as_secs()
            );
            events.push(SessionEvent::Won {
                moves: self.moves,
                elapsed,
            });
        }
    }

    fn click(&mut self, p: Point, events: &mut Vec<SessionEvent>) {
        let hits: Vec<(usize, usize)> = self.layout.hits(p).collect();
        for (row, col) in hits {
            self.grid.toggle(row, col);
            self.moves += 1;
            log::debug!("toggle ({row}, {col}), move {}", self.moves);
            events.push(SessionEvent::Toggled { row, col });
        }
    }

    /// Read-only snapshot for the renderer.
    pub fn view(&self, now: Instant) -> SessionView {
        let hover = match self.machine.state() {
            GameState::Playing => self.pointer,
            _ => None,
        };
        SessionView::new(
            &self.grid,
            &self.layout,
            hover,
            self.machine.state(),
            self.moves,
            self.machine.elapsed(now),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center_of(session: &Session, row: usize, col: usize) -> Point {
        session.layout().cell_bounds(row, col).center
    }

    fn frame(now: Instant, pointer: Option<Point>, down: bool) -> FrameInput {
        FrameInput {
            pointer,
            primary_down: down,
            begin_requested: false,
            now,
        }
    }

    fn begin(session: &mut Session, now: Instant) {
        let events = session.update(&FrameInput {
            begin_requested: true,
            ..FrameInput::idle(now)
        });
        assert_eq!(events, vec![SessionEvent::Began]);
    }

    /// Press on one frame, release on the next, both over `p`.
    fn click(session: &mut Session, now: Instant, p: Point) -> Vec<SessionEvent> {
        session.update(&frame(now, Some(p), true));
        session.update(&frame(now, Some(p), false))
    }

    #[test]
    fn start_ignores_clicks() {
        let t0 = Instant::now();
        let grid = Grid::with_lit(&[(1, 1)]);
        let mut s = Session::new(grid.clone(), BoardLayout::default());
        let p = center_of(&s, 1, 1);

        assert!(click(&mut s, t0, p).is_empty());
        assert_eq!(s.grid(), &grid);
        assert_eq!(s.moves(), 0);
        assert_eq!(s.state(), GameState::Start);
    }

    #[test]
    fn holding_the_button_toggles_once() {
        let t0 = Instant::now();
        let mut s = Session::new(Grid::with_lit(&[(4, 4)]), BoardLayout::default());
        begin(&mut s, t0);
        let p = center_of(&s, 0, 0);

        for _ in 0..10 {
            assert!(s.update(&frame(t0, Some(p), true)).is_empty());
        }
        let events = s.update(&frame(t0, Some(p), false));
        assert_eq!(events, vec![SessionEvent::Toggled { row: 0, col: 0 }]);
        assert_eq!(s.moves(), 1);
        assert_eq!(s.grid().lit_count(), 4);
    }

    #[test]
    fn release_in_gap_does_nothing() {
        let t0 = Instant::now();
        let grid = Grid::with_lit(&[(2, 2)]);
        let mut s = Session::new(grid.clone(), BoardLayout::default());
        begin(&mut s, t0);

        assert!(click(&mut s, t0, Point::new(162.0, 100.0)).is_empty());
        assert_eq!(s.grid(), &grid);
        assert_eq!(s.moves(), 0);
    }

    #[test]
    fn release_without_pointer_does_nothing() {
        let t0 = Instant::now();
        let mut s = Session::new(Grid::with_lit(&[(2, 2)]), BoardLayout::default());
        begin(&mut s, t0);

        s.update(&frame(t0, None, true));
        assert!(s.update(&frame(t0, None, false)).is_empty());
        assert_eq!(s.moves(), 0);
    }

    #[test]
    fn button_held_through_begin_clicks_on_release() {
        let t0 = Instant::now();
        let grid = Grid::with_lit(&[(3, 3)]);
        let mut s = Session::new(grid.clone(), BoardLayout::default());
        let p = center_of(&s, 0, 0);

        s.update(&frame(t0, Some(p), true));
        s.update(&FrameInput {
            begin_requested: true,
            ..frame(t0, Some(p), true)
        });
        assert_eq!(s.state(), GameState::Playing);

        // Released while playing: this is a genuine click-release edge.
        let events = s.update(&frame(t0, Some(p), false));
        assert_eq!(events, vec![SessionEvent::Toggled { row: 0, col: 0 }]);
    }

    #[test]
    fn shared_edge_click_toggles_both_cells() {
        let t0 = Instant::now();
        let layout = BoardLayout { gap: 0.0, ..BoardLayout::default() };
        let mut s = Session::new(Grid::with_lit(&[(4, 4)]), layout);
        begin(&mut s, t0);

        let events = click(&mut s, t0, Point::new(150.0, 100.0));
        assert_eq!(
            events,
            vec![
                SessionEvent::Toggled { row: 0, col: 0 },
                SessionEvent::Toggled { row: 0, col: 1 },
            ]
        );
        assert_eq!(s.moves(), 2);
    }

    #[test]
    fn solved_start_keeps_playing_until_cleared_again() {
        let t0 = Instant::now();
        let mut s = Session::new(Grid::solved(), BoardLayout::default());
        begin(&mut s, t0);

        let t1 = t0 + Duration::from_millis(16);
        assert!(s.update(&FrameInput::idle(t1)).is_empty());
        assert_eq!(s.state(), GameState::Playing);

        let p = center_of(&s, 0, 0);
        assert_eq!(click(&mut s, t1, p), vec![SessionEvent::Toggled { row: 0, col: 0 }]);
        assert_eq!(s.grid().lit_count(), 3);
        assert_eq!(s.state(), GameState::Playing);

        let t2 = t0 + Duration::from_secs(2);
        let events = click(&mut s, t2, p);
        assert_eq!(
            events,
            vec![
                SessionEvent::Toggled { row: 0, col: 0 },
                SessionEvent::Won { moves: 2, elapsed: Duration::from_secs(2) },
            ]
        );
    }

    #[test]
    fn release_on_begin_frame_is_a_click() {
        let t0 = Instant::now();
        let mut s = Session::new(Grid::with_lit(&[(0, 0), (0, 1), (1, 0)]), BoardLayout::default());
        let p = center_of(&s, 0, 0);

        s.update(&frame(t0, Some(p), true));
        let events = s.update(&FrameInput {
            begin_requested: true,
            ..frame(t0, Some(p), false)
        });
        assert_eq!(
            events,
            vec![
                SessionEvent::Began,
                SessionEvent::Toggled { row: 0, col: 0 },
                SessionEvent::Won { moves: 1, elapsed: Duration::ZERO },
            ]
        );
        assert_eq!(s.moves(), 1);
        assert_eq!(s.state(), GameState::Won);
    }

    #[test]
    fn hover_only_reported_while_playing() {
        let t0 = Instant::now();
        let mut s = Session::new(Grid::with_lit(&[(0, 0)]), BoardLayout::default());
        let p = center_of(&s, 2, 3);

        s.update(&frame(t0, Some(p), false));
        assert!(s.view(t0).cells().all(|c| !c.hovered));

        begin(&mut s, t0);
        s.update(&frame(t0, Some(p), false));
        let hovered: Vec<_> = s.view(t0).cells().filter(|c| c.hovered).map(|c| (c.row, c.col)).collect();
        assert_eq!(hovered, vec![(2, 3)]);
    }
}
