//! The swap handshake: propose, then accept or reject.
//!
//! A proposal lives in the proposing user's fixed queue, keyed by its exact
//! `(give, want)` pair. Resolving a proposal clears its slot, so a second
//! accept or reject of the same pair fails with `NotFound` — a resolved
//! swap can never be spent twice.

use fsl_types::consts::SWAP_PROPOSALS_CAPACITY;
use fsl_types::{League, Root, Stage, SwapProposal, UserState};
use tracing::debug;

use crate::error::{EngineError, EngineResult};

/// Record a swap offer from one user to another.
///
/// Both players must currently be owned by their respective sides, and the
/// offered player must not be in the proposer's active lineup for the
/// current week.
pub fn propose(
    root: &mut Root,
    league_index: u16,
    proposing_user_id: u8,
    accepting_user_id: u8,
    give_player_id: u16,
    want_player_id: u16,
) -> EngineResult<()> {
    require_season_open(root)?;
    if proposing_user_id == accepting_user_id {
        return Err(EngineError::WrongAcceptor {
            user_id: accepting_user_id,
        });
    }

    let current_week = root.current_week;
    let league = root.league(league_index).ok_or(EngineError::NotFound)?;
    if !league.is_draft_complete() {
        return Err(EngineError::DraftInProgress);
    }
    let proposer = league
        .user_state(proposing_user_id)
        .ok_or(EngineError::NotFound)?;
    let acceptor = league
        .user_state(accepting_user_id)
        .ok_or(EngineError::NotFound)?;

    if !proposer.owns(give_player_id) {
        return Err(EngineError::NotOwned {
            player_id: give_player_id,
        });
    }
    if !acceptor.owns(want_player_id) {
        return Err(EngineError::NotOwned {
            player_id: want_player_id,
        });
    }
    if let Some(lineup) = proposer.lineup(current_week) {
        if lineup.contains(&give_player_id) {
            return Err(EngineError::ActivePlayer {
                player_id: give_player_id,
            });
        }
    }
    if proposer.find_proposal(give_player_id, want_player_id).is_some() {
        return Err(EngineError::DuplicateProposal);
    }
    if proposer.swap_proposals_count as usize >= SWAP_PROPOSALS_CAPACITY {
        return Err(EngineError::QueueFull);
    }

    let proposer = root
        .league_mut(league_index)
        .and_then(|league| league.user_state_mut(proposing_user_id))
        .ok_or(EngineError::NotFound)?;
    let slot = proposer.free_proposal_slot().ok_or(EngineError::QueueFull)?;
    proposer.swap_proposals[slot] = SwapProposal {
        give_player_id,
        want_player_id,
        is_initialized: true,
    };
    proposer.swap_proposals_count += 1;

    debug!(
        league = league_index,
        proposer = proposing_user_id,
        acceptor = accepting_user_id,
        give = give_player_id,
        want = want_player_id,
        "swap proposed"
    );
    Ok(())
}

/// Accept a pending proposal, transferring ownership both ways.
///
/// The swapped-away player disappears from every lineup row of its former
/// owner for the current week and beyond; rows for weeks already played
/// keep their history.
pub fn accept(
    root: &mut Root,
    league_index: u16,
    accepting_user_id: u8,
    proposing_user_id: u8,
    give_player_id: u16,
    want_player_id: u16,
) -> EngineResult<()> {
    require_season_open(root)?;
    let current_week = root.current_week;

    let league = root.league(league_index).ok_or(EngineError::NotFound)?;
    let slot = locate(
        league,
        accepting_user_id,
        proposing_user_id,
        give_player_id,
        want_player_id,
    )?;
    let proposer = league
        .user_state(proposing_user_id)
        .ok_or(EngineError::NotFound)?;
    if !proposer.owns(give_player_id) {
        // The proposer traded the offered player away in the meantime.
        return Err(EngineError::NotOwned {
            player_id: give_player_id,
        });
    }

    let league = root.league_mut(league_index).ok_or(EngineError::NotFound)?;
    let (proposer, acceptor) = two_states_mut(league, proposing_user_id, accepting_user_id)
        .ok_or(EngineError::WrongAcceptor {
            user_id: accepting_user_id,
        })?;

    let give_slot = proposer
        .roster_slot(give_player_id)
        .ok_or(EngineError::NotOwned {
            player_id: give_player_id,
        })?;
    let want_slot = acceptor
        .roster_slot(want_player_id)
        .ok_or(EngineError::NotOwned {
            player_id: want_player_id,
        })?;

    proposer.user_players[give_slot] = want_player_id;
    acceptor.user_players[want_slot] = give_player_id;
    scrub_lineups(proposer, give_player_id, current_week);
    scrub_lineups(acceptor, want_player_id, current_week);

    proposer.swap_proposals[slot] = SwapProposal::default();
    proposer.swap_proposals_count -= 1;

    debug!(
        league = league_index,
        proposer = proposing_user_id,
        acceptor = accepting_user_id,
        give = give_player_id,
        want = want_player_id,
        "swap accepted"
    );
    Ok(())
}

/// Decline a pending proposal. Clears the slot, transfers nothing.
pub fn reject(
    root: &mut Root,
    league_index: u16,
    accepting_user_id: u8,
    proposing_user_id: u8,
    give_player_id: u16,
    want_player_id: u16,
) -> EngineResult<()> {
    require_season_open(root)?;

    let league = root.league(league_index).ok_or(EngineError::NotFound)?;
    let slot = locate(
        league,
        accepting_user_id,
        proposing_user_id,
        give_player_id,
        want_player_id,
    )?;

    let proposer = root
        .league_mut(league_index)
        .and_then(|league| league.user_state_mut(proposing_user_id))
        .ok_or(EngineError::NotFound)?;
    proposer.swap_proposals[slot] = SwapProposal::default();
    proposer.swap_proposals_count -= 1;

    debug!(
        league = league_index,
        proposer = proposing_user_id,
        acceptor = accepting_user_id,
        give = give_player_id,
        want = want_player_id,
        "swap rejected"
    );
    Ok(())
}

fn require_season_open(root: &Root) -> EngineResult<()> {
    if root.stage != Stage::SeasonOpen {
        return Err(EngineError::WrongStage {
            expected: Stage::SeasonOpen,
            actual: root.stage,
        });
    }
    Ok(())
}

/// Find the live proposal and authorize the caller.
///
/// The addressed acceptor is whoever owns the wanted player at resolution
/// time; anyone else gets `WrongAcceptor`.
fn locate(
    league: &League,
    accepting_user_id: u8,
    proposing_user_id: u8,
    give_player_id: u16,
    want_player_id: u16,
) -> EngineResult<usize> {
    let proposer = league
        .user_state(proposing_user_id)
        .ok_or(EngineError::NotFound)?;
    let slot = proposer
        .find_proposal(give_player_id, want_player_id)
        .ok_or(EngineError::NotFound)?;

    league
        .user_state(accepting_user_id)
        .ok_or(EngineError::NotFound)?;
    if league.owner_of(want_player_id) != Some(accepting_user_id)
        || accepting_user_id == proposing_user_id
    {
        return Err(EngineError::WrongAcceptor {
            user_id: accepting_user_id,
        });
    }
    Ok(slot)
}

/// Zero out `player_id` wherever it appears in lineup rows from `from_week`
/// (1-based) onward. Week 0 means the season has not started; every row is
/// still ahead.
fn scrub_lineups(state: &mut UserState, player_id: u16, from_week: u8) {
    let start = from_week.max(1) as usize - 1;
    for row in state.lineups.iter_mut().skip(start) {
        for slot in row.iter_mut() {
            if *slot == player_id {
                *slot = 0;
            }
        }
    }
}

/// Mutable access to two distinct members at once.
fn two_states_mut(
    league: &mut League,
    first_user_id: u8,
    second_user_id: u8,
) -> Option<(&mut UserState, &mut UserState)> {
    let first = first_user_id as usize - 1;
    let second = second_user_id as usize - 1;
    if first == second || first >= league.user_states.len() || second >= league.user_states.len() {
        return None;
    }
    if first < second {
        let (left, right) = league.user_states.split_at_mut(second);
        Some((&mut left[first], &mut right[0]))
    } else {
        let (left, right) = league.user_states.split_at_mut(first);
        Some((&mut right[0], &mut left[second]))
    }
}

#[cfg(test)]
mod tests {
    use fsl_types::consts::TEAM_PLAYERS_COUNT;
    use fsl_types::{FixedName, Player, Position, PublicIdentity};

    use super::*;

    /// Three-user league with completed draft: user `u` owns
    /// `(u-1)*6 + 1 ..= u*6`. Current week 1, no lineups set.
    fn drafted_root() -> Root {
        let mut root = Root {
            stage: Stage::SeasonOpen,
            current_week: 1,
            ..Root::default()
        };
        root.players_count = 18;
        for i in 0..18u16 {
            root.players[i as usize] = Player::new(300 + i, Position::PLAYABLE[i as usize % 6]);
        }
        for (i, slot) in root.pick_order.iter_mut().enumerate() {
            *slot = i as u8 + 1;
        }

        let mut league = League {
            name: FixedName::new("swaps").unwrap(),
            users_limit: 3,
            current_pick: 3 * TEAM_PLAYERS_COUNT as u16,
            start_week: 1,
            is_initialized: true,
            ..League::default()
        };
        for user in 0..3u16 {
            let mut state = UserState::new(
                FixedName::new(&format!("team-{user}")).unwrap(),
                PublicIdentity::new([user as u8 + 1; 32]),
            );
            for (i, slot) in state.user_players.iter_mut().enumerate() {
                *slot = user * TEAM_PLAYERS_COUNT as u16 + i as u16 + 1;
            }
            league.user_states[user as usize] = state;
        }
        league.user_state_count = 3;
        root.leagues[0] = league;
        root.leagues_count = 1;
        root
    }

    #[test]
    fn propose_enqueues_a_live_proposal() {
        let mut root = drafted_root();
        propose(&mut root, 0, 1, 2, 3, 9).unwrap();
        let proposer = root.league(0).unwrap().user_state(1).unwrap();
        assert_eq!(proposer.swap_proposals_count, 1);
        assert_eq!(proposer.find_proposal(3, 9), Some(0));
    }

    #[test]
    fn propose_requires_ownership_on_both_sides() {
        let mut root = drafted_root();
        // User 1 does not own 9.
        let err = propose(&mut root, 0, 1, 2, 9, 3).unwrap_err();
        assert_eq!(err, EngineError::NotOwned { player_id: 9 });
        // User 2 does not own 15.
        let err = propose(&mut root, 0, 1, 2, 3, 15).unwrap_err();
        assert_eq!(err, EngineError::NotOwned { player_id: 15 });
    }

    #[test]
    fn propose_refuses_active_player() {
        let mut root = drafted_root();
        crate::lineup::set_lineup(&mut root, 0, 1, 2, &[1, 2, 3]).unwrap();
        root.current_week = 2;
        let err = propose(&mut root, 0, 1, 2, 3, 9).unwrap_err();
        assert_eq!(err, EngineError::ActivePlayer { player_id: 3 });
        // A benched player remains swappable.
        propose(&mut root, 0, 1, 2, 4, 9).unwrap();
    }

    #[test]
    fn propose_refuses_duplicates_and_overflow() {
        let mut root = drafted_root();
        propose(&mut root, 0, 1, 2, 3, 9).unwrap();
        let err = propose(&mut root, 0, 1, 2, 3, 9).unwrap_err();
        assert_eq!(err, EngineError::DuplicateProposal);

        // Fill the queue with distinct pairs.
        let mut pairs = Vec::new();
        for give in 1u16..=6 {
            for want in 7u16..=12 {
                if !(give == 3 && want == 9) {
                    pairs.push((give, want));
                }
            }
        }
        for &(give, want) in pairs.iter().take(SWAP_PROPOSALS_CAPACITY - 1) {
            propose(&mut root, 0, 1, 2, give, want).unwrap();
        }
        let (give, want) = pairs[SWAP_PROPOSALS_CAPACITY - 1];
        let err = propose(&mut root, 0, 1, 2, give, want).unwrap_err();
        assert_eq!(err, EngineError::QueueFull);
    }

    #[test]
    fn accept_transfers_ownership_atomically() {
        let mut root = drafted_root();
        propose(&mut root, 0, 1, 2, 3, 9).unwrap();
        accept(&mut root, 0, 2, 1, 3, 9).unwrap();

        let league = root.league(0).unwrap();
        let proposer = league.user_state(1).unwrap();
        let acceptor = league.user_state(2).unwrap();
        assert!(!proposer.owns(3));
        assert!(proposer.owns(9));
        assert!(acceptor.owns(3));
        assert!(!acceptor.owns(9));
        assert_eq!(proposer.swap_proposals_count, 0);
        assert_eq!(proposer.live_proposals().count(), 0);
    }

    #[test]
    fn accept_scrubs_current_and_future_lineups_only() {
        let mut root = drafted_root();
        root.current_week = 0;
        crate::lineup::set_lineup(&mut root, 0, 1, 1, &[1, 3, 4]).unwrap();
        crate::lineup::set_lineup(&mut root, 0, 1, 3, &[1, 3, 4]).unwrap();
        crate::lineup::set_lineup(&mut root, 0, 2, 3, &[9, 10, 11]).unwrap();
        root.current_week = 2;

        propose(&mut root, 0, 1, 2, 3, 9).unwrap();
        accept(&mut root, 0, 2, 1, 3, 9).unwrap();

        let league = root.league(0).unwrap();
        // Week 1 is already played: its row keeps the swapped-away player.
        assert_eq!(league.user_state(1).unwrap().lineups[0], [1, 3, 4]);
        // Week 3 is ahead: the swapped-away ids are gone.
        assert_eq!(league.user_state(1).unwrap().lineups[2], [1, 0, 4]);
        assert_eq!(league.user_state(2).unwrap().lineups[2], [0, 10, 11]);
    }

    #[test]
    fn resolved_proposal_cannot_be_spent_twice() {
        let mut root = drafted_root();
        propose(&mut root, 0, 1, 2, 3, 9).unwrap();
        accept(&mut root, 0, 2, 1, 3, 9).unwrap();
        assert_eq!(accept(&mut root, 0, 2, 1, 3, 9).unwrap_err(), EngineError::NotFound);
        assert_eq!(reject(&mut root, 0, 2, 1, 3, 9).unwrap_err(), EngineError::NotFound);
    }

    #[test]
    fn only_the_addressed_acceptor_may_resolve() {
        let mut root = drafted_root();
        propose(&mut root, 0, 1, 2, 3, 9).unwrap();
        // User 3 does not own player 9.
        let err = accept(&mut root, 0, 3, 1, 3, 9).unwrap_err();
        assert_eq!(err, EngineError::WrongAcceptor { user_id: 3 });
        let err = reject(&mut root, 0, 3, 1, 3, 9).unwrap_err();
        assert_eq!(err, EngineError::WrongAcceptor { user_id: 3 });
    }

    #[test]
    fn reject_clears_without_transferring() {
        let mut root = drafted_root();
        propose(&mut root, 0, 1, 2, 3, 9).unwrap();
        reject(&mut root, 0, 2, 1, 3, 9).unwrap();

        let league = root.league(0).unwrap();
        assert!(league.user_state(1).unwrap().owns(3));
        assert!(league.user_state(2).unwrap().owns(9));
        assert_eq!(league.user_state(1).unwrap().swap_proposals_count, 0);
    }

    #[test]
    fn accept_refuses_when_offered_player_was_traded_away() {
        let mut root = drafted_root();
        propose(&mut root, 0, 1, 2, 3, 9).unwrap();
        // The same give goes to user 3 first.
        propose(&mut root, 0, 1, 3, 3, 15).unwrap();
        accept(&mut root, 0, 3, 1, 3, 15).unwrap();

        let err = accept(&mut root, 0, 2, 1, 3, 9).unwrap_err();
        assert_eq!(err, EngineError::NotOwned { player_id: 3 });
    }

    #[test]
    fn self_swap_is_refused() {
        let mut root = drafted_root();
        let err = propose(&mut root, 0, 1, 1, 3, 4).unwrap_err();
        assert_eq!(err, EngineError::WrongAcceptor { user_id: 1 });
    }
}
