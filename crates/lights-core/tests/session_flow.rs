use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;

use lights_core::{
    BoardLayout, FrameInput, GameState, Grid, Point, PuzzleGenerator, Session, SessionEvent,
    Status,
};

/// Drives a session frame by frame with a fake clock.
struct Driver {
    session: Session,
    now: Instant,
}

impl Driver {
    fn new(grid: Grid) -> Self {
        Self {
            session: Session::new(grid, BoardLayout::default()),
            now: Instant::now(),
        }
    }

    fn step(&mut self, pointer: Option<Point>, down: bool, begin: bool) -> Vec<SessionEvent> {
        self.now += Duration::from_millis(250);
        self.session.update(&FrameInput {
            pointer,
            primary_down: down,
            begin_requested: begin,
            now: self.now,
        })
    }

    fn press_begin(&mut self) -> Vec<SessionEvent> {
        self.step(None, false, true)
    }

    fn click_cell(&mut self, row: usize, col: usize) -> Vec<SessionEvent> {
        let p = self.session.layout().cell_bounds(row, col).center;
        self.step(Some(p), true, false);
        self.step(Some(p), false, false)
    }
}

#[test]
fn center_cross_round_trip_wins() {
    let mut d = Driver::new(Grid::solved());
    assert_eq!(d.press_begin(), vec![SessionEvent::Began]);

    // First click lights the plus shape around the centre.
    let events = d.click_cell(2, 2);
    assert_eq!(events, vec![SessionEvent::Toggled { row: 2, col: 2 }]);
    let lit: Vec<_> = d.session.grid().lit().collect();
    assert_eq!(lit, vec![(1, 2), (2, 1), (2, 2), (2, 3), (3, 2)]);
    assert!(!d.session.grid().is_solved());
    assert_eq!(d.session.state(), GameState::Playing);

    // Second click switches it back off and wins on the same frame.
    let events = d.click_cell(2, 2);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], SessionEvent::Toggled { row: 2, col: 2 });
    match events[1] {
        SessionEvent::Won { moves, elapsed } => {
            assert_eq!(moves, 2);
            // begin frame -> four more frames at 250 ms each
            assert_eq!(elapsed, Duration::from_secs(1));
        }
        ref other => panic!("expected win, got {other:?}"),
    }
    assert!(d.session.grid().is_solved());
    assert_eq!(d.session.state(), GameState::Won);
}

#[test]
fn won_session_ignores_further_clicks() {
    let mut d = Driver::new(Grid::with_lit(&[(0, 0), (0, 1), (1, 0)]));
    d.press_begin();
    d.click_cell(0, 0);
    assert_eq!(d.session.state(), GameState::Won);

    let frozen_at = d.session.elapsed(d.now);
    for (row, col) in [(0, 0), (2, 2), (4, 4)] {
        assert!(d.click_cell(row, col).is_empty());
    }
    assert!(d.session.grid().is_solved());
    assert_eq!(d.session.moves(), 1);
    assert_eq!(d.session.elapsed(d.now), frozen_at);

    let view = d.session.view(d.now);
    assert_eq!(view.state, GameState::Won);
    assert_eq!(view.moves, 1);
    assert!(view.cells().all(|c| !c.hovered));
}

#[test]
fn start_screen_waits_for_begin() {
    let grid = Grid::with_lit(&[(2, 2), (1, 2), (3, 2)]);
    let mut d = Driver::new(grid.clone());

    for _ in 0..3 {
        assert!(d.click_cell(1, 1).is_empty());
    }
    assert_eq!(d.session.grid(), &grid);
    assert_eq!(d.session.moves(), 0);
    assert_eq!(d.session.elapsed(d.now), Duration::ZERO);

    d.press_begin();
    assert_eq!(d.session.state(), GameState::Playing);
    assert_eq!(d.click_cell(1, 1).len(), 1);
    assert_eq!(d.session.moves(), 1);
}

#[test]
fn generated_board_can_be_played_out() {
    let mut rng = StdRng::seed_from_u64(2024);
    let generator = PuzzleGenerator::new().allow_solved(false);
    let session = Session::generate(&generator, BoardLayout::default(), &mut rng);
    assert!(session.grid().is_solvable());
    assert!(!session.grid().is_solved());

    let plan = solve(session.grid()).expect("generated board has a solution");
    let mut d = Driver {
        session,
        now: Instant::now(),
    };
    d.press_begin();
    for &(row, col) in &plan {
        d.click_cell(row, col);
    }
    assert_eq!(d.session.state(), GameState::Won);
    assert_eq!(d.session.moves() as usize, plan.len());
}

/// Light chasing over every top-row press pattern; returns the first press
/// sequence that clears the board.
fn solve(start: &Grid) -> Option<Vec<(usize, usize)>> {
    (0u32..32).find_map(|mask| {
        let mut grid = start.clone();
        let mut presses = Vec::new();
        for col in (0..5).filter(|c| mask & (1 << c) != 0) {
            grid.toggle(0, col);
            presses.push((0, col));
        }
        for row in 0..4 {
            for col in 0..5 {
                if grid.status(row, col) == Status::On {
                    grid.toggle(row + 1, col);
                    presses.push((row + 1, col));
                }
            }
        }
        // A press sequence that passes through the solved board would win
        // early and drop the remaining clicks, so only keep clean plans.
        let clean = replay_stays_unsolved(start, &presses);
        (grid.is_solved() && clean).then_some(presses)
    })
}

fn replay_stays_unsolved(start: &Grid, presses: &[(usize, usize)]) -> bool {
    let mut grid = start.clone();
    let last = presses.len().saturating_sub(1);
    presses.iter().enumerate().all(|(i, &(row, col))| {
        grid.toggle(row, col);
        i == last || !grid.is_solved()
    })
}
