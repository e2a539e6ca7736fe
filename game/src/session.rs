/// Mutable per-player state for the running session.
///
/// `click_progress` counts the correct clicks of the current round; the play
/// scene resets it at every round boundary. `score` counts completed rounds
/// and is zeroed when the game-over scene is left.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerSession {
    pub name: String,
    pub score: u32,
    pub click_progress: usize,
    pub high_score: u32,
    pub last_played: u64,
}

impl PlayerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_round(&mut self) {
        self.click_progress = 0;
    }

    pub fn reset_game(&mut self) {
        self.score = 0;
        self.click_progress = 0;
    }

    pub fn record_high_score(&mut self, high_score: u32) {
        self.high_score = self.high_score.max(high_score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_game_zeroes_round_state_only() {
        let mut session = PlayerSession {
            name: "ADA".to_string(),
            score: 7,
            click_progress: 3,
            high_score: 12,
            last_played: 1_700_000_000,
        };
        session.reset_game();
        assert_eq!(session.score, 0);
        assert_eq!(session.click_progress, 0);
        assert_eq!(session.name, "ADA");
        assert_eq!(session.high_score, 12);
    }

    #[test]
    fn record_high_score_never_lowers() {
        let mut session = PlayerSession::new();
        session.record_high_score(5);
        session.record_high_score(3);
        assert_eq!(session.high_score, 5);
    }
}
