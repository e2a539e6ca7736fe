use engine::graphics::Canvas;
use engine::input::InputEvent;

use crate::context::GameContext;
use crate::scene::{Scene, SceneFlow, SceneId};

/// The player's turn: clicks are validated against the sequence element at
/// the session's click progress. A full correct replay scores the round and
/// loops back to playback; one wrong tile ends the game.
pub struct PlayScene {
    flow: SceneFlow,
    timer: u64,
    was_clicked: bool,
    locked: bool,
}

impl PlayScene {
    pub fn new() -> Self {
        Self {
            flow: SceneFlow::new(SceneId::Show),
            timer: 0,
            was_clicked: false,
            locked: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_locked(&self) -> bool {
        self.locked
    }
}

impl Default for PlayScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for PlayScene {
    fn flow(&self) -> &SceneFlow {
        &self.flow
    }

    fn flow_mut(&mut self) -> &mut SceneFlow {
        &mut self.flow
    }

    fn handle_input(&mut self, event: &InputEvent, ctx: &mut GameContext) {
        let InputEvent::PointerDown { x, y } = *event else {
            return;
        };
        // After the round's last correct click the scene only waits out the
        // light-off cooldown; further clicks are swallowed.
        if self.locked {
            return;
        }

        ctx.tiles.deactivate_all();
        self.was_clicked = true;

        let Some(id) = ctx.tiles.tile_at(x, y) else {
            // Empty space: lights go out, progress is untouched.
            return;
        };

        ctx.tiles.set_lit(id, true);
        ctx.play_tile_tone(id);

        if ctx.sequence.get(ctx.session.click_progress) == Some(id) {
            ctx.session.click_progress += 1;
            if ctx.session.click_progress == ctx.sequence.len() {
                ctx.session.score += 1;
                self.locked = true;
                self.flow.redirect(SceneId::Show);
            }
        } else {
            self.flow.finish_to(SceneId::GameOver);
        }
    }

    fn update(&mut self, now: u64, ctx: &mut GameContext) {
        self.flow.begin(now);

        if self.was_clicked {
            self.timer = now;
            self.was_clicked = false;
        }
        if now.saturating_sub(self.timer) > ctx.config.click_light_ms {
            ctx.tiles.deactivate_all();
            if self.locked {
                // The final click got its moment of light; round complete.
                self.flow.finish();
            }
        }
    }

    fn draw(&self, canvas: &mut Canvas<'_>, ctx: &GameContext) {
        for tile in ctx.tiles.tiles() {
            canvas.fill_rect(tile.rect(), tile.color());
        }
        let score = format!("SCORE {}", ctx.session.score);
        let tx = Canvas::centered_text_x(canvas.width() / 2, &score, 2);
        canvas.draw_text(tx, 2, &score, ctx.config.palette.muted);
    }

    fn reset(&mut self, ctx: &mut GameContext) {
        self.flow.reset();
        self.timer = 0;
        self.was_clicked = false;
        self.locked = false;
        ctx.session.start_round();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::offline_context;
    use crate::tile::TileId;

    fn click_pos(ctx: &GameContext, id: TileId) -> (u32, u32) {
        let rect = ctx.tiles.tile(id).expect("tile exists").rect();
        (rect.x + rect.w / 2, rect.y + rect.h / 2)
    }

    fn click(scene: &mut PlayScene, ctx: &mut GameContext, id: TileId) {
        let (x, y) = click_pos(ctx, id);
        scene.handle_input(&InputEvent::PointerDown { x, y }, ctx);
    }

    #[test]
    fn replaying_a_one_tile_sequence_scores_and_loops_to_show() {
        // Scenario: sequence [2], player clicks tile 2.
        let mut ctx = offline_context("play-single-correct");
        ctx.sequence.push_for_test(TileId(2));
        let mut scene = PlayScene::new();
        scene.update(1_000, &mut ctx);

        click(&mut scene, &mut ctx, TileId(2));
        assert_eq!(ctx.session.click_progress, 1);
        assert_eq!(ctx.session.score, 1);
        assert!(scene.is_locked());
        assert_eq!(scene.flow().next(), SceneId::Show);
        assert!(!scene.flow().done());

        // The click's cooldown starts on the next update; once it elapses
        // the lights go out and the round hands off.
        scene.update(1_100, &mut ctx);
        assert!(!scene.flow().done());
        scene.update(1_100 + ctx.config.click_light_ms + 1, &mut ctx);
        assert!(scene.flow().done());
        assert_eq!(ctx.tiles.active_tile(), None);
    }

    #[test]
    fn wrong_tile_ends_the_game_without_scoring() {
        // Scenario: sequence [2, 4], player clicks 2 then 1.
        let mut ctx = offline_context("play-mismatch");
        ctx.sequence.push_for_test(TileId(2));
        ctx.sequence.push_for_test(TileId(4));
        let mut scene = PlayScene::new();
        scene.update(1_000, &mut ctx);

        click(&mut scene, &mut ctx, TileId(2));
        assert_eq!(ctx.session.click_progress, 1);
        assert_eq!(ctx.session.score, 0);

        click(&mut scene, &mut ctx, TileId(1));
        assert!(scene.flow().done());
        assert_eq!(scene.flow().next(), SceneId::GameOver);
        assert_eq!(ctx.session.score, 0);
        assert_eq!(ctx.session.click_progress, 1);
    }

    #[test]
    fn click_progress_never_exceeds_the_sequence_length() {
        let mut ctx = offline_context("play-progress-bound");
        ctx.sequence.push_for_test(TileId(3));
        let mut scene = PlayScene::new();
        scene.update(1_000, &mut ctx);

        click(&mut scene, &mut ctx, TileId(3));
        // Locked: the extra click must not advance anything.
        click(&mut scene, &mut ctx, TileId(3));
        click(&mut scene, &mut ctx, TileId(1));
        assert_eq!(ctx.session.click_progress, ctx.sequence.len());
        assert_eq!(ctx.session.score, 1);
        assert_eq!(scene.flow().next(), SceneId::Show);
    }

    #[test]
    fn empty_space_click_clears_lights_but_not_progress() {
        let mut ctx = offline_context("play-empty-click");
        ctx.sequence.push_for_test(TileId(2));
        ctx.sequence.push_for_test(TileId(1));
        let mut scene = PlayScene::new();
        scene.update(1_000, &mut ctx);

        click(&mut scene, &mut ctx, TileId(2));
        assert_eq!(ctx.session.click_progress, 1);

        // The exact center of the board is inside the tile gap.
        scene.handle_input(
            &InputEvent::PointerDown { x: 280, y: 280 },
            &mut ctx,
        );
        assert_eq!(ctx.tiles.active_tile(), None);
        assert_eq!(ctx.session.click_progress, 1);
        assert!(!scene.flow().done());
    }

    #[test]
    fn clicked_tile_stays_lit_until_the_cooldown_elapses() {
        let mut ctx = offline_context("play-cooldown");
        ctx.sequence.push_for_test(TileId(4));
        ctx.sequence.push_for_test(TileId(4));
        let mut scene = PlayScene::new();
        scene.update(1_000, &mut ctx);

        click(&mut scene, &mut ctx, TileId(4));
        scene.update(1_050, &mut ctx);
        assert_eq!(ctx.tiles.active_tile(), Some(TileId(4)));

        scene.update(1_050 + ctx.config.click_light_ms + 1, &mut ctx);
        assert_eq!(ctx.tiles.active_tile(), None);
        assert!(!scene.flow().done());
    }

    #[test]
    fn reset_unlocks_and_restarts_the_round() {
        let mut ctx = offline_context("play-reset");
        ctx.sequence.push_for_test(TileId(1));
        let mut scene = PlayScene::new();
        scene.update(1_000, &mut ctx);
        click(&mut scene, &mut ctx, TileId(1));
        assert!(scene.is_locked());

        scene.reset(&mut ctx);
        assert!(!scene.is_locked());
        assert_eq!(ctx.session.click_progress, 0);
        assert!(!scene.flow().started());
        assert_eq!(scene.flow().next(), SceneId::Show);

        scene.reset(&mut ctx);
        assert!(!scene.is_locked());
        assert_eq!(ctx.session.click_progress, 0);
    }
}
