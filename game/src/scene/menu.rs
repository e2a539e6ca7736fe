use engine::graphics::Canvas;
use engine::input::InputEvent;

use crate::config::GameConfig;
use crate::context::GameContext;
use crate::scene::{Scene, SceneFlow, SceneId};
use crate::widgets::Menu;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Play,
    MyStats,
    TopScores,
    Credits,
    Exit,
}

/// Hub of the scene graph. PLAY follows the default edge into playback;
/// everything else redirects `next` before finishing.
pub struct MainMenuScene {
    flow: SceneFlow,
    menu: Menu<MenuAction>,
}

impl MainMenuScene {
    pub fn new(config: &GameConfig) -> Self {
        let menu = Menu::new("SIMON")
            .button("PLAY!", MenuAction::Play)
            .button("MY STATS", MenuAction::MyStats)
            .button("TOP SCORES", MenuAction::TopScores)
            .button("CREDITS", MenuAction::Credits)
            .danger_button("EXIT", MenuAction::Exit)
            .layout(config.width, config.height);
        Self {
            flow: SceneFlow::new(SceneId::Show),
            menu,
        }
    }
}

impl Scene for MainMenuScene {
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
        match self.menu.action_at(x, y) {
            Some(MenuAction::Play) => self.flow.finish(),
            Some(MenuAction::MyStats) => self.flow.finish_to(SceneId::MyStats),
            Some(MenuAction::TopScores) => self.flow.finish_to(SceneId::TopScores),
            Some(MenuAction::Credits) => self.flow.finish_to(SceneId::Credits),
            Some(MenuAction::Exit) => ctx.running = false,
            None => {}
        }
    }

    fn update(&mut self, now: u64, _ctx: &mut GameContext) {
        self.flow.begin(now);
    }

    fn draw(&self, canvas: &mut Canvas<'_>, ctx: &GameContext) {
        self.menu.draw(canvas, &ctx.config.palette);
        if !ctx.session.name.is_empty() {
            let greeting = format!("HI {}", ctx.session.name);
            let gx = Canvas::centered_text_x(canvas.width() / 2, &greeting, 2);
            canvas.draw_text(gx, 96, &greeting, ctx.config.palette.muted);
        }
    }

    fn reset(&mut self, _ctx: &mut GameContext) {
        self.flow.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::offline_context;
    use engine::ui::Rect;

    fn center(rect: Rect) -> (u32, u32) {
        (rect.x + rect.w / 2, rect.y + rect.h / 2)
    }

    fn button_centers(config: &GameConfig) -> Vec<(u32, u32)> {
        // Recreate the menu's layout to find the clickable spots.
        let probe = Menu::new("SIMON")
            .button("A", ())
            .button("B", ())
            .button("C", ())
            .button("D", ())
            .button("E", ())
            .layout(config.width, config.height);
        (0..5)
            .map(|i| {
                let rect = probe.button_rect_for_test(i);
                center(rect)
            })
            .collect()
    }

    #[test]
    fn play_follows_the_default_edge_to_show() {
        let mut ctx = offline_context("menu-play");
        let mut scene = MainMenuScene::new(&ctx.config);
        scene.update(100, &mut ctx);

        let (x, y) = button_centers(&ctx.config)[0];
        scene.handle_input(&InputEvent::PointerDown { x, y }, &mut ctx);
        assert!(scene.flow().done());
        assert_eq!(scene.flow().next(), SceneId::Show);
    }

    #[test]
    fn every_menu_entry_routes_to_its_scene() {
        let mut ctx = offline_context("menu-routes");
        let centers = button_centers(&ctx.config);
        let routes = [
            (1, SceneId::MyStats),
            (2, SceneId::TopScores),
            (3, SceneId::Credits),
        ];

        for (index, expected) in routes {
            let mut scene = MainMenuScene::new(&ctx.config);
            scene.update(100, &mut ctx);
            let (x, y) = centers[index];
            scene.handle_input(&InputEvent::PointerDown { x, y }, &mut ctx);
            assert!(scene.flow().done());
            assert_eq!(scene.flow().next(), expected);
        }
    }

    #[test]
    fn exit_clears_the_running_flag_without_finishing() {
        let mut ctx = offline_context("menu-exit");
        let mut scene = MainMenuScene::new(&ctx.config);
        scene.update(100, &mut ctx);

        let (x, y) = button_centers(&ctx.config)[4];
        scene.handle_input(&InputEvent::PointerDown { x, y }, &mut ctx);
        assert!(!ctx.running);
        assert!(!scene.flow().done());
    }

    #[test]
    fn a_redirect_does_not_leak_into_the_next_visit() {
        let mut ctx = offline_context("menu-redirect-reset");
        let mut scene = MainMenuScene::new(&ctx.config);
        scene.update(100, &mut ctx);

        let centers = button_centers(&ctx.config);
        let (x, y) = centers[3];
        scene.handle_input(&InputEvent::PointerDown { x, y }, &mut ctx);
        assert_eq!(scene.flow().next(), SceneId::Credits);

        scene.reset(&mut ctx);
        scene.update(200, &mut ctx);
        let (x, y) = centers[0];
        scene.handle_input(&InputEvent::PointerDown { x, y }, &mut ctx);
        assert_eq!(scene.flow().next(), SceneId::Show);
    }

    #[test]
    fn clicks_outside_the_buttons_are_ignored() {
        let mut ctx = offline_context("menu-miss");
        let mut scene = MainMenuScene::new(&ctx.config);
        scene.update(100, &mut ctx);
        scene.handle_input(&InputEvent::PointerDown { x: 1, y: 1 }, &mut ctx);
        assert!(!scene.flow().done());
        assert!(ctx.running);
    }
}
