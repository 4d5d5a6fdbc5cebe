use serde::{Deserialize, Serialize};

use crate::consts::{LEAGUES_CAPACITY, LEAGUE_USERS_CAPACITY, PLAYERS_CAPACITY};
use crate::identity::PublicIdentity;
use crate::league::League;
use crate::player::Player;

/// Season lifecycle stage of the whole ledger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Stage {
    /// Root record not yet initialized.
    #[default]
    Uninitialized = 0,
    /// Season running: leagues form, drafts run, lineups and swaps apply.
    SeasonOpen = 1,
    /// All weeks played; only reward claims remain.
    SeasonComplete = 2,
}

impl Stage {
    /// Decode from the wire byte. `None` for undeclared values.
    pub fn from_byte(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Uninitialized),
            1 => Some(Self::SeasonOpen),
            2 => Some(Self::SeasonComplete),
            _ => None,
        }
    }

    /// The wire byte.
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

/// The decoded ledger: all state of one multi-league season.
///
/// `players` and `leagues` are fixed arenas — always [`PLAYERS_CAPACITY`]
/// and [`LEAGUES_CAPACITY`] entries with the occupied prefix counted by
/// `players_count` / `leagues_count`. `pick_order` is a season-wide
/// permutation of `1..=LEAGUE_USERS_CAPACITY`, seeded once; each league
/// reduces it to its own `users_limit`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Root {
    pub players_count: u16,
    pub players: Vec<Player>,
    pub leagues_count: u16,
    pub leagues: Vec<League>,
    pub pick_order: [u8; LEAGUE_USERS_CAPACITY],
    pub stage: Stage,
    pub current_week: u8,
    pub oracle_authority: PublicIdentity,
}

impl Default for Root {
    fn default() -> Self {
        Self {
            players_count: 0,
            players: vec![Player::default(); PLAYERS_CAPACITY],
            leagues_count: 0,
            leagues: vec![League::default(); LEAGUES_CAPACITY],
            pick_order: [0; LEAGUE_USERS_CAPACITY],
            stage: Stage::Uninitialized,
            current_week: 0,
            oracle_authority: PublicIdentity::zero(),
        }
    }
}

impl Root {
    /// The pool player with a 1-based id, if that slot is populated.
    pub fn player(&self, player_id: u16) -> Option<&Player> {
        if player_id == 0 || player_id > self.players_count {
            return None;
        }
        let player = &self.players[player_id as usize - 1];
        player.is_initialized.then_some(player)
    }

    /// Mutable access to a pool player by 1-based id.
    pub fn player_mut(&mut self, player_id: u16) -> Option<&mut Player> {
        if player_id == 0 || player_id > self.players_count {
            return None;
        }
        let player = &mut self.players[player_id as usize - 1];
        player.is_initialized.then_some(player)
    }

    /// The league at a 0-based index, if that slot is populated.
    pub fn league(&self, league_index: u16) -> Option<&League> {
        if league_index >= self.leagues_count {
            return None;
        }
        let league = &self.leagues[league_index as usize];
        league.is_initialized.then_some(league)
    }

    /// Mutable access to a league by 0-based index.
    pub fn league_mut(&mut self, league_index: u16) -> Option<&mut League> {
        if league_index >= self.leagues_count {
            return None;
        }
        let league = &mut self.leagues[league_index as usize];
        league.is_initialized.then_some(league)
    }

    /// Returns `true` once the season-wide pick order has been seeded.
    pub fn is_pick_order_seeded(&self) -> bool {
        self.pick_order.iter().any(|&slot| slot != 0)
    }

    /// Returns `true` if any league has recorded a draft pick.
    pub fn any_pick_made(&self) -> bool {
        self.leagues
            .iter()
            .take(self.leagues_count as usize)
            .any(|league| league.current_pick > 0)
    }
}
