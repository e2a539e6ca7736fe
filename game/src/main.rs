use std::error::Error;
use std::time::{SystemTime, UNIX_EPOCH};

use engine::app::{self, WindowApp, WindowConfig};
use engine::graphics::Canvas;
use engine::input::InputEvent;

use simon::config::{DEFAULT_SERVER_URL, GameConfig};
use simon::context::GameContext;
use simon::scene::Director;
use simon::scores::Scoreboard;
use simon::settings::SettingsStore;
use simon::sfx::Sfx;

struct SimonApp {
    director: Director,
    ctx: GameContext,
}

impl WindowApp for SimonApp {
    fn on_input(&mut self, event: InputEvent) {
        self.director.handle_input(&event, &mut self.ctx);
    }

    fn tick(&mut self, now_ms: u64) -> bool {
        self.director.update(now_ms, &mut self.ctx);
        self.ctx.running
    }

    fn draw(&mut self, canvas: &mut Canvas<'_>) {
        canvas.clear(self.ctx.config.palette.background);
        self.director.draw(canvas, &self.ctx);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let settings = SettingsStore::from_env();
    let prefs = settings.load();

    let server_url = prefs
        .server_url
        .clone()
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
    let config = GameConfig::new(server_url);

    let sfx = match Sfx::new(prefs.audio.effective_gain()) {
        Ok(sfx) => Some(sfx),
        Err(err) => {
            eprintln!("audio unavailable, continuing silently: {err}");
            None
        }
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1);
    let scoreboard = Scoreboard::remote(config.server_url.clone());
    let director = Director::new(&config, &prefs.last_name);

    let window = WindowConfig {
        title: "SIMON".to_string(),
        width: config.width,
        height: config.height,
        vsync: true,
        target_fps: config.target_fps,
    };
    let ctx = GameContext::new(config, prefs, settings, scoreboard, sfx, seed);

    app::run(window, SimonApp { director, ctx })
}
