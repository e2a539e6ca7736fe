use engine::graphics::Canvas;
use engine::input::InputEvent;
use engine::ui::Rect;

use crate::config::GameConfig;
use crate::context::GameContext;
use crate::scene::{Scene, SceneFlow, SceneId};
use crate::scores::{Connectivity, now_unix};
use crate::widgets::Button;

fn back_button(config: &GameConfig) -> Button<()> {
    Button::new(
        Rect::new(config.width / 2 - 120, config.height - 84, 240, 44),
        "< BACK",
        (),
    )
}

fn handle_back(flow: &mut SceneFlow, button: &Button<()>, event: &InputEvent) {
    match event {
        InputEvent::PointerDown { x, y } if button.hit(*x, *y) => flow.back(),
        InputEvent::KeyDown(winit::event::VirtualKeyCode::Escape) => flow.back(),
        _ => {}
    }
}

/// Read-only view of the player's own record.
pub struct MyStatsScene {
    flow: SceneFlow,
    back: Button<()>,
    last_played_line: String,
}

impl MyStatsScene {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            flow: SceneFlow::new(SceneId::MainMenu).with_previous(SceneId::MainMenu),
            back: back_button(config),
            last_played_line: String::new(),
        }
    }
}

impl Scene for MyStatsScene {
    fn flow(&self) -> &SceneFlow {
        &self.flow
    }

    fn flow_mut(&mut self) -> &mut SceneFlow {
        &mut self.flow
    }

    fn handle_input(&mut self, event: &InputEvent, _ctx: &mut GameContext) {
        handle_back(&mut self.flow, &self.back, event);
    }

    fn update(&mut self, now: u64, ctx: &mut GameContext) {
        if self.flow.begin(now) {
            self.last_played_line = match ctx.session.last_played {
                0 => String::new(),
                then => {
                    let days = now_unix().saturating_sub(then) / 86_400;
                    match days {
                        0 => "LAST PLAYED TODAY".to_string(),
                        1 => "LAST PLAYED YESTERDAY".to_string(),
                        n => format!("LAST PLAYED {n} DAYS AGO"),
                    }
                }
            };
        }
    }

    fn draw(&self, canvas: &mut Canvas<'_>, ctx: &GameContext) {
        let palette = &ctx.config.palette;
        let center = canvas.width() / 2;

        let title = "MY STATS";
        let tx = Canvas::centered_text_x(center, title, 4);
        canvas.draw_text_scaled(tx, 60, title, palette.title, 4);

        let name = if ctx.session.name.is_empty() {
            "ANONYMOUS".to_string()
        } else {
            ctx.session.name.clone()
        };
        let lines = [
            (format!("NAME: {name}"), palette.text),
            (format!("HIGH SCORE: {}", ctx.session.high_score), palette.text),
            (self.last_played_line.clone(), palette.muted),
        ];
        let mut y = 200;
        for (line, color) in lines {
            if !line.is_empty() {
                let lx = Canvas::centered_text_x(center, &line, 2);
                canvas.draw_text(lx, y, &line, color);
            }
            y += 40;
        }

        self.back.draw(canvas, palette);
    }

    fn reset(&mut self, _ctx: &mut GameContext) {
        self.flow.reset();
        self.last_played_line.clear();
    }
}

/// Read-only leaderboard, refreshed from the score service on entry.
pub struct TopScoresScene {
    flow: SceneFlow,
    back: Button<()>,
}

impl TopScoresScene {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            flow: SceneFlow::new(SceneId::MainMenu).with_previous(SceneId::MainMenu),
            back: back_button(config),
        }
    }
}

impl Scene for TopScoresScene {
    fn flow(&self) -> &SceneFlow {
        &self.flow
    }

    fn flow_mut(&mut self) -> &mut SceneFlow {
        &mut self.flow
    }

    fn handle_input(&mut self, event: &InputEvent, _ctx: &mut GameContext) {
        handle_back(&mut self.flow, &self.back, event);
    }

    fn update(&mut self, now: u64, ctx: &mut GameContext) {
        if self.flow.begin(now) {
            ctx.scoreboard.refresh_top_scores();
        }
    }

    fn draw(&self, canvas: &mut Canvas<'_>, ctx: &GameContext) {
        let palette = &ctx.config.palette;
        let center = canvas.width() / 2;

        let title = "TOP SCORES";
        let tx = Canvas::centered_text_x(center, title, 4);
        canvas.draw_text_scaled(tx, 60, title, palette.title, 4);

        match ctx.scoreboard.top_scores() {
            Some(scores) if scores.is_empty() => {
                let text = "NO SCORES YET";
                let sx = Canvas::centered_text_x(center, text, 2);
                canvas.draw_text(sx, 220, text, palette.muted);
            }
            Some(scores) => {
                let mut y = 160;
                for (rank, entry) in scores.iter().take(8).enumerate() {
                    let line = format!("{}. {} {}", rank + 1, entry.name, entry.score);
                    let lx = Canvas::centered_text_x(center, &line, 2);
                    canvas.draw_text(lx, y, &line, palette.text);
                    y += 32;
                }
            }
            None if ctx.scoreboard.top_scores_pending() => {
                let text = "LOADING...";
                let sx = Canvas::centered_text_x(center, text, 2);
                canvas.draw_text(sx, 220, text, palette.muted);
            }
            None => {
                let text = match ctx.scoreboard.connectivity() {
                    Connectivity::Failed => "NOT CONNECTED",
                    _ => "NO SCORES YET",
                };
                let sx = Canvas::centered_text_x(center, text, 2);
                canvas.draw_text(sx, 220, text, palette.error);
            }
        }

        self.back.draw(canvas, palette);
    }

    fn reset(&mut self, _ctx: &mut GameContext) {
        self.flow.reset();
    }
}
