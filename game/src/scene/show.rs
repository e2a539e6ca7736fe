use engine::graphics::Canvas;
use engine::input::InputEvent;

use crate::context::GameContext;
use crate::scene::{Scene, SceneFlow, SceneId};

/// The computer's turn: replays the whole sequence, one tile per blink
/// cycle, then hands off to the play scene.
///
/// The cadence is deliberately asymmetric: `counter` starts at -1 and the
/// index only advances from `counter >= 2`, which holds the first element
/// lit for one extra settling phase. Players read the rhythm from exactly
/// this stagger, so it must not be "simplified" into a plain on/off timer.
pub struct ShowScene {
    flow: SceneFlow,
    blink: bool,
    counter: i32,
    sequence_index: usize,
    timer: u64,
}

impl ShowScene {
    pub fn new() -> Self {
        Self {
            flow: SceneFlow::new(SceneId::Play),
            blink: false,
            counter: -1,
            sequence_index: 0,
            timer: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn state_for_test(&self) -> (bool, i32, usize, u64) {
        (self.blink, self.counter, self.sequence_index, self.timer)
    }
}

impl Default for ShowScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for ShowScene {
    fn flow(&self) -> &SceneFlow {
        &self.flow
    }

    fn flow_mut(&mut self) -> &mut SceneFlow {
        &mut self.flow
    }

    fn handle_input(&mut self, _event: &InputEvent, _ctx: &mut GameContext) {
        // Playback ignores input; the player watches.
    }

    fn update(&mut self, now: u64, ctx: &mut GameContext) {
        self.flow.begin(now);

        // First update of the visit: grow the sequence by one and arm the
        // timer. Nothing blinks until the next phase boundary.
        if self.timer == 0 {
            ctx.sequence.extend_random();
            self.timer = now;
            return;
        }

        let mut cue = false;
        if now.saturating_sub(self.timer) > ctx.config.show_blink_ms {
            self.timer = now;
            self.counter += 1;
            self.blink = !self.blink;
            if self.counter % 2 == 0 {
                // Even phases are the lit half of a cycle; the cue gate keeps
                // a tone from sounding twice within one cycle.
                cue = true;
                if self.counter >= 2 {
                    self.sequence_index += 1;
                }
            }
        }

        // At most one tile lit at a time.
        ctx.tiles.deactivate_all();
        if let Some(id) = ctx.sequence.get(self.sequence_index) {
            if self.blink {
                ctx.tiles.set_lit(id, true);
                if cue {
                    ctx.play_tile_tone(id);
                }
            }
        }

        if self.sequence_index == ctx.sequence.len() {
            self.flow.finish();
        }
    }

    fn draw(&self, canvas: &mut Canvas<'_>, ctx: &GameContext) {
        for tile in ctx.tiles.tiles() {
            canvas.fill_rect(tile.rect(), tile.color());
        }
        let round = format!("ROUND {}", ctx.sequence.len());
        let tx = Canvas::centered_text_x(canvas.width() / 2, &round, 2);
        canvas.draw_text(tx, 2, &round, ctx.config.palette.muted);
    }

    fn reset(&mut self, _ctx: &mut GameContext) {
        self.flow.reset();
        self.blink = false;
        self.counter = -1;
        self.sequence_index = 0;
        self.timer = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::offline_context;
    use crate::tile::TileId;

    #[test]
    fn first_update_generates_one_tile_and_arms_the_timer() {
        let mut ctx = offline_context("show-first-update");
        let mut scene = ShowScene::new();

        scene.update(1_000, &mut ctx);
        assert_eq!(ctx.sequence.len(), 1);
        assert_eq!(scene.state_for_test(), (false, -1, 0, 1_000));
        assert!(!scene.flow().done());
        // No tile lights on the generation frame.
        assert_eq!(ctx.tiles.active_tile(), None);
    }

    #[test]
    fn two_element_sequence_makes_exactly_two_illumination_cycles() {
        let mut ctx = offline_context("show-cadence");
        ctx.sequence.push_for_test(TileId(2));
        let mut scene = ShowScene::new();

        let blink = ctx.config.show_blink_ms;
        let mut now = 1_000;
        scene.update(now, &mut ctx); // generation frame, sequence is now 2 long
        assert_eq!(ctx.sequence.len(), 2);
        let first = ctx.sequence.get(0).expect("first element");
        let second = ctx.sequence.get(1).expect("second element");

        let mut lit_phases = Vec::new();
        for _ in 0..20 {
            if scene.flow().done() {
                break;
            }
            now += blink + 1;
            scene.update(now, &mut ctx);
            if let Some(id) = ctx.tiles.active_tile() {
                lit_phases.push(id);
            }
        }

        assert!(scene.flow().done(), "playback never terminated");
        // One lit phase per element: two illumination cycles in total.
        assert_eq!(lit_phases, vec![first, second]);
    }

    #[test]
    fn at_most_one_tile_is_active_during_playback() {
        let mut ctx = offline_context("show-single-active");
        let mut scene = ShowScene::new();

        let blink = ctx.config.show_blink_ms;
        let mut now = 500;
        scene.update(now, &mut ctx);
        for _ in 0..10 {
            now += blink + 1;
            scene.update(now, &mut ctx);
            let active = ctx
                .tiles
                .tiles()
                .iter()
                .filter(|t| t.is_active())
                .count();
            assert!(active <= 1);
            if scene.flow().done() {
                break;
            }
        }
    }

    #[test]
    fn reset_restores_the_initial_playback_state() {
        let mut ctx = offline_context("show-reset");
        let mut scene = ShowScene::new();

        let blink = ctx.config.show_blink_ms;
        scene.update(1_000, &mut ctx);
        scene.update(1_000 + blink + 1, &mut ctx);
        assert_ne!(scene.state_for_test(), (false, -1, 0, 0));

        scene.reset(&mut ctx);
        assert_eq!(scene.state_for_test(), (false, -1, 0, 0));
        assert!(!scene.flow().started());

        // Idempotent under repeated reset.
        scene.reset(&mut ctx);
        assert_eq!(scene.state_for_test(), (false, -1, 0, 0));
    }

    #[test]
    fn finishing_hands_off_to_the_play_scene() {
        let mut ctx = offline_context("show-handoff");
        let mut scene = ShowScene::new();

        let blink = ctx.config.show_blink_ms;
        let mut now = 1_000;
        scene.update(now, &mut ctx);
        for _ in 0..8 {
            now += blink + 1;
            scene.update(now, &mut ctx);
            if scene.flow().done() {
                break;
            }
        }
        assert!(scene.flow().done());
        assert_eq!(scene.flow().next(), SceneId::Play);
    }
}
