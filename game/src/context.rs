use crate::config::GameConfig;
use crate::scores::Scoreboard;
use crate::sequence::Sequence;
use crate::session::PlayerSession;
use crate::settings::{PlayerPrefs, SettingsStore};
use crate::sfx::Sfx;
use crate::tile::{TileBoard, TileId};

/// Everything the scenes share: the tile set, the growing sequence, the
/// player session and the score backend. Only one scene is active at a time,
/// so access needs no further synchronization.
pub struct GameContext {
    pub config: GameConfig,
    pub prefs: PlayerPrefs,
    pub settings: SettingsStore,
    pub tiles: TileBoard,
    pub sequence: Sequence,
    pub session: PlayerSession,
    pub scoreboard: Scoreboard,
    pub sfx: Option<Sfx>,
    pub running: bool,
}

impl GameContext {
    pub fn new(
        config: GameConfig,
        prefs: PlayerPrefs,
        settings: SettingsStore,
        scoreboard: Scoreboard,
        sfx: Option<Sfx>,
        rng_seed: u64,
    ) -> Self {
        let tiles = TileBoard::new(config.width, config.height);
        Self {
            config,
            prefs,
            settings,
            tiles,
            sequence: Sequence::new(rng_seed),
            session: PlayerSession::new(),
            scoreboard,
            sfx,
            running: true,
        }
    }

    pub fn play_tile_tone(&self, id: TileId) {
        if let (Some(sfx), Some(hz)) = (self.sfx.as_ref(), self.tiles.tone_hz(id)) {
            sfx.play_tile_tone(hz);
        }
    }

    pub fn play_failure_cue(&self) {
        if let Some(sfx) = self.sfx.as_ref() {
            sfx.play_failure_cue();
        }
    }
}
