//! The scene state machine.
//!
//! Every game screen is a `Scene` with the same four-part lifecycle:
//! `handle_input` consumes one event, `update` runs the timed logic (doing
//! one-time entry work on its first call after a reset), `draw` renders
//! without mutating, and `reset` rolls the scene back for its next visit.
//! The `Director` owns one instance of every scene and swaps the active one
//! when a scene reports it is done.

mod credits;
mod game_over;
mod menu;
mod play;
mod show;
mod stats;
mod welcome;

pub use credits::CreditsScene;
pub use game_over::GameOverScene;
pub use menu::MainMenuScene;
pub use play::PlayScene;
pub use show::ShowScene;
pub use stats::{MyStatsScene, TopScoresScene};
pub use welcome::WelcomeScene;

use engine::graphics::Canvas;
use engine::input::InputEvent;

use crate::config::GameConfig;
use crate::context::GameContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneId {
    Welcome,
    MainMenu,
    MyStats,
    TopScores,
    Credits,
    Show,
    Play,
    GameOver,
}

/// Lifecycle bookkeeping embedded by every scene.
///
/// `next` defaults to the scene's fixed successor; scenes with dynamic
/// routing overwrite it before finishing. `reset` restores the default so a
/// redirect never leaks into the next visit.
#[derive(Debug, Clone)]
pub struct SceneFlow {
    default_next: SceneId,
    next: SceneId,
    previous: Option<SceneId>,
    done: bool,
    started_at: Option<u64>,
}

impl SceneFlow {
    pub fn new(default_next: SceneId) -> Self {
        Self {
            default_next,
            next: default_next,
            previous: None,
            done: false,
            started_at: None,
        }
    }

    pub fn with_previous(mut self, previous: SceneId) -> Self {
        self.previous = Some(previous);
        self
    }

    /// Records the first update since the last reset. Returns true exactly
    /// once per visit, so entry setup runs idempotently.
    pub fn begin(&mut self, now: u64) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(now);
        true
    }

    pub fn started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn started_at(&self) -> Option<u64> {
        self.started_at
    }

    pub fn done(&self) -> bool {
        self.done
    }

    pub fn next(&self) -> SceneId {
        self.next
    }

    /// Finish toward the current `next` target.
    pub fn finish(&mut self) {
        self.done = true;
    }

    /// Redirect and finish in one step.
    pub fn finish_to(&mut self, next: SceneId) {
        self.next = next;
        self.done = true;
    }

    pub fn redirect(&mut self, next: SceneId) {
        self.next = next;
    }

    /// Finish toward the stored back target, when one exists.
    pub fn back(&mut self) {
        if let Some(previous) = self.previous {
            self.finish_to(previous);
        }
    }

    pub fn reset(&mut self) {
        self.done = false;
        self.started_at = None;
        self.next = self.default_next;
    }
}

pub trait Scene {
    fn flow(&self) -> &SceneFlow;
    fn flow_mut(&mut self) -> &mut SceneFlow;

    /// Consumes one input event. Irrelevant events are ignored, never an
    /// error.
    fn handle_input(&mut self, event: &InputEvent, ctx: &mut GameContext);

    /// Runs one frame of scene logic at the given clock sample.
    fn update(&mut self, now: u64, ctx: &mut GameContext);

    /// Pure rendering; only called once the scene has had an update.
    fn draw(&self, canvas: &mut Canvas<'_>, ctx: &GameContext);

    /// Rolls back per-visit state so the scene is replayable.
    fn reset(&mut self, ctx: &mut GameContext);
}

/// One instance of every scene. The id-to-scene mapping is a match over the
/// enum, so an unknown scene name cannot exist past compilation.
pub struct SceneSet {
    welcome: WelcomeScene,
    main_menu: MainMenuScene,
    my_stats: MyStatsScene,
    top_scores: TopScoresScene,
    credits: CreditsScene,
    show: ShowScene,
    play: PlayScene,
    game_over: GameOverScene,
}

impl SceneSet {
    pub fn new(config: &GameConfig, name_prefill: &str) -> Self {
        Self {
            welcome: WelcomeScene::new(config, name_prefill),
            main_menu: MainMenuScene::new(config),
            my_stats: MyStatsScene::new(config),
            top_scores: TopScoresScene::new(config),
            credits: CreditsScene::new(config),
            show: ShowScene::new(),
            play: PlayScene::new(),
            game_over: GameOverScene::new(),
        }
    }

    fn scene(&self, id: SceneId) -> &dyn Scene {
        match id {
            SceneId::Welcome => &self.welcome,
            SceneId::MainMenu => &self.main_menu,
            SceneId::MyStats => &self.my_stats,
            SceneId::TopScores => &self.top_scores,
            SceneId::Credits => &self.credits,
            SceneId::Show => &self.show,
            SceneId::Play => &self.play,
            SceneId::GameOver => &self.game_over,
        }
    }

    fn scene_mut(&mut self, id: SceneId) -> &mut dyn Scene {
        match id {
            SceneId::Welcome => &mut self.welcome,
            SceneId::MainMenu => &mut self.main_menu,
            SceneId::MyStats => &mut self.my_stats,
            SceneId::TopScores => &mut self.top_scores,
            SceneId::Credits => &mut self.credits,
            SceneId::Show => &mut self.show,
            SceneId::Play => &mut self.play,
            SceneId::GameOver => &mut self.game_over,
        }
    }
}

/// Drives the scene graph: input first, then one update, then a transition
/// when the active scene finished, then a gated draw.
pub struct Director {
    scenes: SceneSet,
    current: SceneId,
}

impl Director {
    pub fn new(config: &GameConfig, name_prefill: &str) -> Self {
        Self {
            scenes: SceneSet::new(config, name_prefill),
            current: SceneId::Welcome,
        }
    }

    pub fn current(&self) -> SceneId {
        self.current
    }

    pub fn handle_input(&mut self, event: &InputEvent, ctx: &mut GameContext) {
        if matches!(event, InputEvent::Quit) {
            ctx.running = false;
        }
        self.scenes.scene_mut(self.current).handle_input(event, ctx);
    }

    pub fn update(&mut self, now: u64, ctx: &mut GameContext) {
        ctx.scoreboard.poll();

        let scene = self.scenes.scene_mut(self.current);
        scene.update(now, ctx);
        if !scene.flow().done() {
            return;
        }

        let next = scene.flow().next();
        scene.reset(ctx);
        self.current = next;
        // The incoming scene gets its first update immediately so its entry
        // setup lands before anything is drawn this frame.
        self.scenes.scene_mut(self.current).update(now, ctx);
    }

    pub fn draw(&self, canvas: &mut Canvas<'_>, ctx: &GameContext) {
        let scene = self.scenes.scene(self.current);
        if scene.flow().started() {
            scene.draw(canvas, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_begin_fires_once_per_visit() {
        let mut flow = SceneFlow::new(SceneId::MainMenu);
        assert!(flow.begin(100));
        assert!(!flow.begin(200));
        assert_eq!(flow.started_at(), Some(100));

        flow.reset();
        assert!(flow.begin(300));
        assert_eq!(flow.started_at(), Some(300));
    }

    #[test]
    fn flow_reset_restores_the_default_next() {
        let mut flow = SceneFlow::new(SceneId::Show);
        flow.finish_to(SceneId::GameOver);
        assert!(flow.done());
        assert_eq!(flow.next(), SceneId::GameOver);

        flow.reset();
        assert!(!flow.done());
        assert_eq!(flow.next(), SceneId::Show);

        // Idempotent under repeated reset.
        flow.reset();
        assert!(!flow.done());
        assert_eq!(flow.next(), SceneId::Show);
    }

    #[test]
    fn flow_back_uses_the_stored_previous_target() {
        let mut flow = SceneFlow::new(SceneId::MainMenu).with_previous(SceneId::MainMenu);
        flow.back();
        assert!(flow.done());
        assert_eq!(flow.next(), SceneId::MainMenu);
    }

    #[test]
    fn flow_back_without_previous_is_a_no_op() {
        let mut flow = SceneFlow::new(SceneId::Show);
        flow.back();
        assert!(!flow.done());
    }
}
