//! Cumulative score across rounds on one board size
//!
//! The engine never touches the score. The front end records each finished
//! round once, and keeps the scoreboard across [`crate::engine::reset_board`].

use tracing::debug;

use crate::board::Player;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    x_wins: u32,
    o_wins: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished round. Draws (`None`) leave the score unchanged.
    pub fn record(&mut self, winner: Option<Player>) {
        match winner {
            Some(Player::X) => self.x_wins += 1,
            Some(Player::O) => self.o_wins += 1,
            None => {}
        }
        debug!(x = self.x_wins, o = self.o_wins, "score updated");
    }

    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x_wins,
            Player::O => self.o_wins,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl std::fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "X: {}   O: {}", self.x_wins, self.o_wins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_wins_and_draws() {
        let mut score = Scoreboard::new();
        score.record(Some(Player::X));
        score.record(None);
        score.record(Some(Player::O));
        score.record(Some(Player::X));

        assert_eq!(score.wins(Player::X), 2);
        assert_eq!(score.wins(Player::O), 1);
        assert_eq!(score.to_string(), "X: 2   O: 1");
    }

    #[test]
    fn test_reset() {
        let mut score = Scoreboard::new();
        score.record(Some(Player::O));
        score.reset();
        assert_eq!(score, Scoreboard::new());
    }
}
