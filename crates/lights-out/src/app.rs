use lights_core::{FrameInput, Point, Session, SessionEvent};
use lights_engine::core::{App, AppControl, FrameCtx};
use lights_engine::input::{InputFrame, InputState, Key, MouseButton};
use lights_engine::paint::Color;
use lights_engine::render::{QuadRenderer, TextRenderer};
use lights_engine::scene::DrawList;
use lights_engine::text::{FontId, FontSystem};

use crate::screens;

/// Starts the game from the start screen.
const BEGIN_KEY: Key = Key::Letter('S');

/// The game as seen by the window runtime.
pub struct LightsOutApp {
    session: Session,
    fonts: FontSystem,
    font: Option<FontId>,
    draw_list: DrawList,
    quads: QuadRenderer,
    text: TextRenderer,
}

impl LightsOutApp {
    pub fn new(session: Session, fonts: FontSystem, font: Option<FontId>) -> Self {
        Self {
            session,
            fonts,
            font,
            draw_list: DrawList::new(),
            quads: QuadRenderer::new(),
            text: TextRenderer::new(),
        }
    }
}

impl App for LightsOutApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_pressed(Key::Escape) {
            log::info!("escape pressed, closing");
            return AppControl::Exit;
        }

        let input = frame_input(ctx.input, ctx.input_frame, ctx.time.now);
        for event in self.session.update(&input) {
            if let SessionEvent::Won { moves, elapsed } = event {
                log::info!("player won: {moves} clicks in {}s", elapsed.as_secs());
            }
        }

        self.draw_list.clear();
        let view = self.session.view(ctx.time.now);
        screens::paint(&view, self.font, &mut self.draw_list);

        let dl = &mut self.draw_list;
        let fonts = &self.fonts;
        let quads = &mut self.quads;
        let text = &mut self.text;

        ctx.render(Color::BLACK, |rctx, target| {
            quads.render(rctx, target, dl);
            text.render(rctx, target, dl, fonts);
        })
    }
}

/// Samples the window input into the session's per-frame form.
///
/// A press and release that land in the same frame still read as held, so the
/// release edge shows up on the next frame instead of being lost.
fn frame_input(state: &InputState, frame: &InputFrame, now: std::time::Instant) -> FrameInput {
    let tapped = frame.buttons_pressed.contains(&MouseButton::Left)
        && frame.button_released(MouseButton::Left);

    FrameInput {
        pointer: state.pointer_pos.map(|(x, y)| Point::new(x, y)),
        primary_down: state.button_down(MouseButton::Left) || tapped,
        begin_requested: frame.key_pressed(BEGIN_KEY),
        now,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use lights_engine::input::{ButtonState, InputEvent};

    use super::*;

    fn apply(state: &mut InputState, frame: &mut InputFrame, events: &[InputEvent]) {
        for ev in events {
            state.apply_event(frame, ev.clone());
        }
    }

    fn left(state: ButtonState) -> InputEvent {
        InputEvent::PointerButton {
            button: MouseButton::Left,
            state,
        }
    }

    #[test]
    fn held_button_and_pointer_pass_through() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        apply(
            &mut state,
            &mut frame,
            &[InputEvent::PointerMoved { x: 120.0, y: 80.0 }, left(ButtonState::Pressed)],
        );

        let input = frame_input(&state, &frame, Instant::now());
        assert_eq!(input.pointer, Some(Point::new(120.0, 80.0)));
        assert!(input.primary_down);
        assert!(!input.begin_requested);
    }

    #[test]
    fn tap_within_one_frame_reads_as_down() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        apply(&mut state, &mut frame, &[left(ButtonState::Pressed), left(ButtonState::Released)]);
        assert!(frame_input(&state, &frame, Instant::now()).primary_down);

        frame.clear();
        assert!(!frame_input(&state, &frame, Instant::now()).primary_down);
    }

    #[test]
    fn s_key_requests_begin() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        apply(
            &mut state,
            &mut frame,
            &[InputEvent::Key {
                key: Key::Letter('S'),
                state: ButtonState::Pressed,
                repeat: false,
            }],
        );
        let input = frame_input(&state, &frame, Instant::now());
        assert!(input.begin_requested);
        assert_eq!(input.pointer, None);
    }
}
