use crate::config::GameConfig;
use crate::context::GameContext;
use crate::scores::{LocalScoreStore, Scoreboard};
use crate::settings::{PlayerPrefs, SettingsStore};

/// A context wired to throwaway on-disk stores; `tag` keeps parallel tests
/// out of each other's files.
pub(crate) fn offline_context(tag: &str) -> GameContext {
    let dir = std::env::temp_dir();
    let scores_path = dir.join(format!("simon-test-{tag}-scores.json"));
    let settings_path = dir.join(format!("simon-test-{tag}-settings.json"));
    let _ = std::fs::remove_file(&scores_path);
    let _ = std::fs::remove_file(&settings_path);

    GameContext::new(
        GameConfig::default(),
        PlayerPrefs::default(),
        SettingsStore::at(settings_path),
        Scoreboard::local(LocalScoreStore::at(scores_path)),
        None,
        1234,
    )
}
