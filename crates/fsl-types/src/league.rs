use serde::{Deserialize, Serialize};

use crate::consts::{
    ACTIVE_PLAYERS_COUNT, GAMES_COUNT, LEAGUE_USERS_CAPACITY, SWAP_PROPOSALS_CAPACITY,
    TEAM_PLAYERS_COUNT,
};
use crate::identity::PublicIdentity;
use crate::name::FixedName;

/// An offer to trade one owned player for another user's owned player.
///
/// Proposals live in the proposing user's fixed queue; a cleared slot has
/// `is_initialized == false` and must be skipped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapProposal {
    pub give_player_id: u16,
    pub want_player_id: u16,
    pub is_initialized: bool,
}

/// One user's team within a league.
///
/// `user_players` is the full owned roster as produced by the draft;
/// `lineups[w]` is the active subset for week `w + 1`. Player ids are
/// 1-based pool indices, 0 marks an empty slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserState {
    pub user_players: [u16; TEAM_PLAYERS_COUNT],
    pub lineups: [[u16; ACTIVE_PLAYERS_COUNT]; GAMES_COUNT],
    pub swap_proposals_count: u8,
    pub swap_proposals: [SwapProposal; SWAP_PROPOSALS_CAPACITY],
    pub team_name: FixedName,
    pub owner: PublicIdentity,
    pub is_lineup_set: bool,
    pub is_initialized: bool,
}

impl UserState {
    /// A freshly joined member with an empty roster.
    pub fn new(team_name: FixedName, owner: PublicIdentity) -> Self {
        Self {
            team_name,
            owner,
            is_initialized: true,
            ..Self::default()
        }
    }

    /// Returns `true` if the roster contains `player_id`.
    pub fn owns(&self, player_id: u16) -> bool {
        player_id != 0 && self.user_players.contains(&player_id)
    }

    /// Roster index of `player_id`, if owned.
    pub fn roster_slot(&self, player_id: u16) -> Option<usize> {
        if player_id == 0 {
            return None;
        }
        self.user_players.iter().position(|&id| id == player_id)
    }

    /// The lineup row for a 1-based week, if the week is in range.
    pub fn lineup(&self, week: u8) -> Option<&[u16; ACTIVE_PLAYERS_COUNT]> {
        let week = week as usize;
        if week == 0 || week > GAMES_COUNT {
            return None;
        }
        Some(&self.lineups[week - 1])
    }

    /// Live (initialized) proposals in queue order.
    pub fn live_proposals(&self) -> impl Iterator<Item = &SwapProposal> {
        self.swap_proposals.iter().filter(|p| p.is_initialized)
    }

    /// Queue index of the live proposal with this exact pair.
    pub fn find_proposal(&self, give_player_id: u16, want_player_id: u16) -> Option<usize> {
        self.swap_proposals.iter().position(|p| {
            p.is_initialized
                && p.give_player_id == give_player_id
                && p.want_player_id == want_player_id
        })
    }

    /// Index of the first free proposal slot.
    pub fn free_proposal_slot(&self) -> Option<usize> {
        self.swap_proposals.iter().position(|p| !p.is_initialized)
    }
}

/// One competition instance.
///
/// `user_states` is a fixed arena of [`LEAGUE_USERS_CAPACITY`] slots;
/// members occupy the first `user_state_count` and are addressed by a
/// 1-based user id. `current_pick` counts completed draft picks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    pub user_state_count: u8,
    pub user_states: [UserState; LEAGUE_USERS_CAPACITY],
    pub name: FixedName,
    pub bid: u64,
    pub users_limit: u8,
    pub current_pick: u16,
    pub start_week: u8,
    pub is_reward_claimed: bool,
    pub is_initialized: bool,
}

impl League {
    /// The member with a 1-based user id, if joined.
    pub fn user_state(&self, user_id: u8) -> Option<&UserState> {
        if user_id == 0 || user_id > self.user_state_count {
            return None;
        }
        let state = &self.user_states[user_id as usize - 1];
        state.is_initialized.then_some(state)
    }

    /// Mutable access to a member by 1-based user id.
    pub fn user_state_mut(&mut self, user_id: u8) -> Option<&mut UserState> {
        if user_id == 0 || user_id > self.user_state_count {
            return None;
        }
        let state = &mut self.user_states[user_id as usize - 1];
        state.is_initialized.then_some(state)
    }

    /// Joined members with their 1-based user ids.
    pub fn members(&self) -> impl Iterator<Item = (u8, &UserState)> {
        self.user_states
            .iter()
            .take(self.user_state_count as usize)
            .enumerate()
            .filter(|(_, s)| s.is_initialized)
            .map(|(i, s)| (i as u8 + 1, s))
    }

    /// Returns `true` once every seat is taken.
    pub fn is_full(&self) -> bool {
        self.user_state_count == self.users_limit
    }

    /// Picks needed to complete this league's draft.
    pub fn total_picks(&self) -> u16 {
        self.users_limit as u16 * TEAM_PLAYERS_COUNT as u16
    }

    /// Returns `true` once every roster is fully drafted.
    pub fn is_draft_complete(&self) -> bool {
        self.is_full() && self.current_pick >= self.total_picks()
    }

    /// Returns `true` if any member's roster contains `player_id`.
    pub fn is_player_taken(&self, player_id: u16) -> bool {
        self.members().any(|(_, s)| s.owns(player_id))
    }

    /// User id of the member whose roster contains `player_id`.
    pub fn owner_of(&self, player_id: u16) -> Option<u8> {
        self.members()
            .find(|(_, s)| s.owns(player_id))
            .map(|(id, _)| id)
    }

    /// User id of the member with this identity.
    pub fn member_by_owner(&self, owner: &PublicIdentity) -> Option<u8> {
        self.members()
            .find(|(_, s)| s.owner == *owner)
            .map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(seed: u8) -> UserState {
        UserState::new(
            FixedName::new(&format!("team-{seed}")).unwrap(),
            PublicIdentity::new([seed; 32]),
        )
    }

    fn two_member_league() -> League {
        let mut league = League {
            users_limit: 2,
            is_initialized: true,
            ..League::default()
        };
        league.user_states[0] = member(1);
        league.user_states[1] = member(2);
        league.user_state_count = 2;
        league
    }

    #[test]
    fn user_ids_are_one_based() {
        let league = two_member_league();
        assert!(league.user_state(0).is_none());
        assert_eq!(league.user_state(1).unwrap().owner, PublicIdentity::new([1; 32]));
        assert_eq!(league.user_state(2).unwrap().owner, PublicIdentity::new([2; 32]));
        assert!(league.user_state(3).is_none());
    }

    #[test]
    fn draft_completion_needs_full_league_and_all_picks() {
        let mut league = two_member_league();
        assert_eq!(league.total_picks(), 12);
        assert!(!league.is_draft_complete());
        league.current_pick = 12;
        assert!(league.is_draft_complete());

        league.user_state_count = 1;
        assert!(!league.is_draft_complete());
    }

    #[test]
    fn ownership_lookup_skips_empty_slots() {
        let mut league = two_member_league();
        league.user_states[1].user_players[0] = 42;
        assert!(league.is_player_taken(42));
        assert_eq!(league.owner_of(42), Some(2));
        assert_eq!(league.owner_of(7), None);
        // Id 0 is the empty sentinel, never "owned".
        assert!(!league.is_player_taken(0));
    }

    #[test]
    fn proposal_queue_lookup() {
        let mut user = member(1);
        assert_eq!(user.free_proposal_slot(), Some(0));
        user.swap_proposals[0] = SwapProposal {
            give_player_id: 3,
            want_player_id: 9,
            is_initialized: true,
        };
        user.swap_proposals_count = 1;
        assert_eq!(user.find_proposal(3, 9), Some(0));
        assert_eq!(user.find_proposal(9, 3), None);
        assert_eq!(user.free_proposal_slot(), Some(1));
        assert_eq!(user.live_proposals().count(), 1);
    }
}
