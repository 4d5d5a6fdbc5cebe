use serde::{Deserialize, Serialize};

use crate::consts::GAMES_COUNT;

/// Field position of a pool player.
///
/// Stored as a single byte on the wire. The decoder refuses unknown bytes
/// outright instead of coercing them to a default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Position {
    /// Slot not yet populated.
    #[default]
    Uninitialized = 0,
    RB = 1,
    WR = 2,
    QB = 3,
    TE = 4,
    K = 5,
    DEF = 6,
}

impl Position {
    /// Decode from the wire byte. `None` for undeclared values.
    pub fn from_byte(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Uninitialized),
            1 => Some(Self::RB),
            2 => Some(Self::WR),
            3 => Some(Self::QB),
            4 => Some(Self::TE),
            5 => Some(Self::K),
            6 => Some(Self::DEF),
            _ => None,
        }
    }

    /// The wire byte.
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Every playable position, in wire order.
    pub const PLAYABLE: [Position; 6] = [
        Position::RB,
        Position::WR,
        Position::QB,
        Position::TE,
        Position::K,
        Position::DEF,
    ];
}

/// One player's score for one week.
///
/// A score is written at most once: `is_initialized` flips false→true on
/// the first write and never back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub value: u16,
    pub is_initialized: bool,
}

/// A slot in the season-wide player pool.
///
/// Identity is the slot's 1-based index in [`Root::players`]; `external_id`
/// correlates the slot with the outside statistics source that supplies
/// weekly scores.
///
/// [`Root::players`]: crate::root::Root::players
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub scores: [Score; GAMES_COUNT],
    pub external_id: u16,
    pub position: Position,
    pub is_initialized: bool,
}

impl Player {
    /// A freshly added pool player with no scores yet.
    pub fn new(external_id: u16, position: Position) -> Self {
        Self {
            scores: [Score::default(); GAMES_COUNT],
            external_id,
            position,
            is_initialized: true,
        }
    }

    /// The score slot for a 1-based week, if the week is in range.
    pub fn score(&self, week: u8) -> Option<&Score> {
        let week = week as usize;
        if week == 0 || week > GAMES_COUNT {
            return None;
        }
        Some(&self.scores[week - 1])
    }

    /// Mutable score slot for a 1-based week.
    pub fn score_mut(&mut self, week: u8) -> Option<&mut Score> {
        let week = week as usize;
        if week == 0 || week > GAMES_COUNT {
            return None;
        }
        Some(&mut self.scores[week - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_bytes_roundtrip() {
        for value in 0..=6u8 {
            let position = Position::from_byte(value).unwrap();
            assert_eq!(position.as_byte(), value);
        }
    }

    #[test]
    fn position_rejects_unknown_bytes() {
        assert_eq!(Position::from_byte(7), None);
        assert_eq!(Position::from_byte(255), None);
    }

    #[test]
    fn new_player_is_initialized_with_blank_scores() {
        let player = Player::new(4034, Position::QB);
        assert!(player.is_initialized);
        assert!(player.scores.iter().all(|s| !s.is_initialized));
    }

    #[test]
    fn score_weeks_are_one_based() {
        let mut player = Player::new(1, Position::RB);
        player.score_mut(1).unwrap().value = 12;
        assert_eq!(player.score(1).unwrap().value, 12);
        assert_eq!(player.scores[0].value, 12);
        assert!(player.score(0).is_none());
        assert!(player.score(GAMES_COUNT as u8 + 1).is_none());
    }
}
