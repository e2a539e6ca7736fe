use engine::graphics::Canvas;
use engine::input::InputEvent;
use engine::ui::Rect;

use crate::config::GameConfig;
use crate::context::GameContext;
use crate::scene::{Scene, SceneFlow, SceneId};
use crate::widgets::Button;

const CREDIT_LINES: [&str; 4] = [
    "A MEMORY GAME",
    "WATCH THE TILES, REPEAT THE TUNE",
    "",
    "BUILT WITH RUST AND FOUR SQUARES",
];

pub struct CreditsScene {
    flow: SceneFlow,
    back: Button<()>,
}

impl CreditsScene {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            flow: SceneFlow::new(SceneId::MainMenu).with_previous(SceneId::MainMenu),
            back: Button::new(
                Rect::new(config.width / 2 - 120, config.height - 84, 240, 44),
                "< BACK",
                (),
            ),
        }
    }
}

impl Scene for CreditsScene {
    fn flow(&self) -> &SceneFlow {
        &self.flow
    }

    fn flow_mut(&mut self) -> &mut SceneFlow {
        &mut self.flow
    }

    fn handle_input(&mut self, event: &InputEvent, _ctx: &mut GameContext) {
        match event {
            InputEvent::PointerDown { x, y } if self.back.hit(*x, *y) => self.flow.back(),
            InputEvent::KeyDown(winit::event::VirtualKeyCode::Escape) => self.flow.back(),
            _ => {}
        }
    }

    fn update(&mut self, now: u64, _ctx: &mut GameContext) {
        self.flow.begin(now);
    }

    fn draw(&self, canvas: &mut Canvas<'_>, ctx: &GameContext) {
        let palette = &ctx.config.palette;
        let center = canvas.width() / 2;

        let title = "CREDITS";
        let tx = Canvas::centered_text_x(center, title, 4);
        canvas.draw_text_scaled(tx, 60, title, palette.title, 4);

        let mut y = 200;
        for line in CREDIT_LINES {
            if !line.is_empty() {
                let lx = Canvas::centered_text_x(center, line, 2);
                canvas.draw_text(lx, y, line, palette.text);
            }
            y += 36;
        }

        self.back.draw(canvas, palette);
    }

    fn reset(&mut self, _ctx: &mut GameContext) {
        self.flow.reset();
    }
}
