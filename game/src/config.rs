use engine::graphics::Color;

pub const WINDOW_WIDTH: u32 = 560;
pub const WINDOW_HEIGHT: u32 = 560;
pub const TARGET_FPS: u32 = 60;

/// Tile on/off phase length while the computer replays the sequence.
pub const SHOW_BLINK_MS: u64 = 300;
/// How long a clicked tile stays lit.
pub const CLICK_LIGHT_MS: u64 = 200;
/// Blink period for cursors and "continue" prompts.
pub const PROMPT_BLINK_MS: u64 = 500;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8017";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub title: Color,
    pub text: Color,
    pub muted: Color,
    pub error: Color,
    pub panel: Color,
    pub panel_border: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: [18, 32, 47, 255],
            title: [252, 186, 3, 255],
            text: [220, 220, 220, 255],
            muted: [120, 130, 140, 255],
            error: [235, 94, 42, 255],
            panel: [28, 44, 62, 255],
            panel_border: [220, 220, 220, 255],
        }
    }
}

/// Immutable game configuration, built once in `main` and shared by
/// reference. Components never reach for globals.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,
    pub target_fps: u32,
    pub show_blink_ms: u64,
    pub click_light_ms: u64,
    pub prompt_blink_ms: u64,
    pub palette: Palette,
    pub server_url: String,
}

impl GameConfig {
    pub fn new(server_url: String) -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            target_fps: TARGET_FPS,
            show_blink_ms: SHOW_BLINK_MS,
            click_light_ms: CLICK_LIGHT_MS,
            prompt_blink_ms: PROMPT_BLINK_MS,
            palette: Palette::default(),
            server_url,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL.to_string())
    }
}
