use engine::graphics::Canvas;
use engine::input::InputEvent;

use crate::context::GameContext;
use crate::scene::{Scene, SceneFlow, SceneId};

/// End of a game: submits the final score, reports whether it set a new
/// high score, and waits for any click or key to return to the menu.
pub struct GameOverScene {
    flow: SceneFlow,
    final_score: u32,
    prompt_on: bool,
}

impl GameOverScene {
    pub fn new() -> Self {
        Self {
            flow: SceneFlow::new(SceneId::MainMenu),
            final_score: 0,
            prompt_on: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn final_score_for_test(&self) -> u32 {
        self.final_score
    }
}

impl Default for GameOverScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for GameOverScene {
    fn flow(&self) -> &SceneFlow {
        &self.flow
    }

    fn flow_mut(&mut self) -> &mut SceneFlow {
        &mut self.flow
    }

    fn handle_input(&mut self, event: &InputEvent, _ctx: &mut GameContext) {
        if matches!(
            event,
            InputEvent::PointerDown { .. } | InputEvent::KeyDown(_)
        ) {
            self.flow.finish();
        }
    }

    fn update(&mut self, now: u64, ctx: &mut GameContext) {
        if self.flow.begin(now) {
            self.final_score = ctx.session.score;
            ctx.sequence.clear();
            ctx.tiles.deactivate_all();
            ctx.play_failure_cue();
            ctx.scoreboard.submit_score(self.final_score);
        }

        if let Some(outcome) = ctx.scoreboard.submit_outcome() {
            ctx.session.record_high_score(outcome.high_score);
        }

        // The continue prompt blinks on its own fixed period, independent of
        // any gameplay blink state.
        let since = now.saturating_sub(self.flow.started_at().unwrap_or(now));
        self.prompt_on = (since / ctx.config.prompt_blink_ms.max(1)) % 2 == 0;
    }

    fn draw(&self, canvas: &mut Canvas<'_>, ctx: &GameContext) {
        let palette = &ctx.config.palette;
        let center = canvas.width() / 2;

        let title = "GAME OVER";
        let tx = Canvas::centered_text_x(center, title, 5);
        canvas.draw_text_scaled(tx, 140, title, palette.error, 5);

        let score = format!("SCORE {}", self.final_score);
        let sx = Canvas::centered_text_x(center, &score, 3);
        canvas.draw_text_scaled(sx, 230, &score, palette.text, 3);

        match ctx.scoreboard.submit_outcome() {
            Some(outcome) if outcome.is_high_score => {
                let banner = "NEW HIGH SCORE!";
                let bx = Canvas::centered_text_x(center, banner, 3);
                canvas.draw_text_scaled(bx, 280, banner, palette.title, 3);
            }
            Some(outcome) => {
                let best = format!("BEST {}", outcome.high_score);
                let bx = Canvas::centered_text_x(center, &best, 2);
                canvas.draw_text_scaled(bx, 284, &best, palette.muted, 2);
            }
            None => {}
        }

        if self.prompt_on {
            let prompt = "CLICK TO CONTINUE";
            let px = Canvas::centered_text_x(center, prompt, 2);
            canvas.draw_text(px, 420, prompt, palette.text);
        }
    }

    fn reset(&mut self, ctx: &mut GameContext) {
        self.flow.reset();
        self.prompt_on = false;
        ctx.session.reset_game();
        ctx.scoreboard.refresh_top_scores();
    }
}
