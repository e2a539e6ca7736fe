use engine::graphics::Canvas;
use engine::input::InputEvent;
use engine::ui::{Rect, Size};

use crate::config::GameConfig;
use crate::context::GameContext;
use crate::scene::{Scene, SceneFlow, SceneId};
use crate::scores::{Connectivity, LocalScoreStore};
use crate::widgets::{Button, InputBox, InputBoxEvent, NAME_MAX_LEN, NAME_MIN_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WelcomeStage {
    /// Typing a name.
    Entering,
    /// Waiting for the score service to answer.
    Connecting,
    /// The service failed; offering retry and offline play.
    Unreachable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WelcomeAction {
    Retry,
    PlayOffline,
}

/// First scene of the session: asks for a name, creates or fetches the
/// player against the score service, and falls back to an offline branch
/// when the service cannot be reached.
pub struct WelcomeScene {
    flow: SceneFlow,
    input: InputBox,
    error_message: String,
    stage: WelcomeStage,
    retry_button: Button<WelcomeAction>,
    offline_button: Button<WelcomeAction>,
}

impl WelcomeScene {
    pub fn new(config: &GameConfig, name_prefill: &str) -> Self {
        let box_rect = Rect::from_size(config.width, config.height).centered(Size::new(280, 48));
        let mut input = InputBox::new(box_rect, NAME_MAX_LEN);
        input.set_value(name_prefill);

        let buttons_y = box_rect.y + box_rect.h + 60;
        let button_size = Size::new(200, 44);
        let retry_rect = Rect::new(
            config.width / 2 - button_size.w - 10,
            buttons_y,
            button_size.w,
            button_size.h,
        );
        let offline_rect = Rect::new(config.width / 2 + 10, buttons_y, button_size.w, button_size.h);

        Self {
            flow: SceneFlow::new(SceneId::MainMenu),
            input,
            error_message: String::new(),
            stage: WelcomeStage::Entering,
            retry_button: Button::new(retry_rect, "RETRY", WelcomeAction::Retry),
            offline_button: Button::new(offline_rect, "PLAY OFFLINE", WelcomeAction::PlayOffline),
        }
    }

    fn submit_name(&mut self, ctx: &mut GameContext) {
        let name = self.input.value().trim().to_string();
        if name.chars().count() < NAME_MIN_LEN {
            self.error_message = format!("NAME NEEDS AT LEAST {NAME_MIN_LEN} CHARACTERS");
            return;
        }

        self.error_message.clear();
        ctx.scoreboard.begin_session(&name);
        self.stage = WelcomeStage::Connecting;
    }

    fn remember_name(&self, ctx: &mut GameContext) {
        let name = ctx.session.name.clone();
        if name.is_empty() || ctx.prefs.last_name == name {
            return;
        }
        ctx.prefs.last_name = name;
        if let Err(err) = ctx.settings.save(&ctx.prefs) {
            eprintln!("could not persist settings: {err}");
        }
    }
}

impl Scene for WelcomeScene {
    fn flow(&self) -> &SceneFlow {
        &self.flow
    }

    fn flow_mut(&mut self) -> &mut SceneFlow {
        &mut self.flow
    }

    fn handle_input(&mut self, event: &InputEvent, ctx: &mut GameContext) {
        match self.stage {
            WelcomeStage::Entering => match event {
                InputEvent::Text(ch) => self.input.handle_text(*ch),
                InputEvent::KeyDown(key) => {
                    if self.input.handle_key(*key) == InputBoxEvent::Submitted {
                        self.submit_name(ctx);
                    }
                }
                _ => {}
            },
            WelcomeStage::Connecting => {}
            WelcomeStage::Unreachable => {
                let InputEvent::PointerDown { x, y } = *event else {
                    return;
                };
                if self.retry_button.hit(x, y) {
                    ctx.scoreboard.retry();
                    self.stage = WelcomeStage::Connecting;
                } else if self.offline_button.hit(x, y) {
                    ctx.scoreboard.go_local(LocalScoreStore::from_env());
                    self.stage = WelcomeStage::Connecting;
                }
            }
        }
    }

    fn update(&mut self, now: u64, ctx: &mut GameContext) {
        self.flow.begin(now);
        self.input.tick(now, ctx.config.prompt_blink_ms);

        if self.stage == WelcomeStage::Connecting {
            match ctx.scoreboard.connectivity() {
                Connectivity::Online | Connectivity::Local => {
                    if let Some(player) = ctx.scoreboard.player() {
                        ctx.session.name = player.name.clone();
                        ctx.session.high_score = player.high_score;
                        ctx.session.last_played = player.last_played;
                    }
                    self.remember_name(ctx);
                    self.flow.finish();
                }
                Connectivity::Failed => {
                    self.stage = WelcomeStage::Unreachable;
                }
                Connectivity::Idle | Connectivity::Connecting => {}
            }
        }
    }

    fn draw(&self, canvas: &mut Canvas<'_>, ctx: &GameContext) {
        let palette = &ctx.config.palette;
        let center = canvas.width() / 2;

        let title = "WELCOME";
        let tx = Canvas::centered_text_x(center, title, 4);
        canvas.draw_text_scaled(tx, 120, title, palette.title, 4);

        match self.stage {
            WelcomeStage::Entering => {
                let prompt = "ENTER YOUR NAME";
                let px = Canvas::centered_text_x(center, prompt, 2);
                canvas.draw_text(px, 200, prompt, palette.text);
                self.input.draw(canvas, palette);

                if !self.error_message.is_empty() {
                    let ex = Canvas::centered_text_x(center, &self.error_message, 2);
                    canvas.draw_text(ex, canvas.height() - 40, &self.error_message, palette.error);
                }
            }
            WelcomeStage::Connecting => {
                let text = "CONNECTING...";
                let cx = Canvas::centered_text_x(center, text, 2);
                canvas.draw_text(cx, canvas.height() / 2, text, palette.text);
            }
            WelcomeStage::Unreachable => {
                let text = "NOT CONNECTED";
                let cx = Canvas::centered_text_x(center, text, 3);
                canvas.draw_text_scaled(cx, 220, text, palette.error, 3);
                self.retry_button.draw(canvas, palette);
                self.offline_button.draw(canvas, palette);
            }
        }
    }

    fn reset(&mut self, _ctx: &mut GameContext) {
        self.flow.reset();
        self.stage = WelcomeStage::Entering;
        self.error_message.clear();
    }
}
