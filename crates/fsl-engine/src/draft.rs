//! Snake-draft scheduling.
//!
//! The season root carries one pick-order permutation over every possible
//! user slot; each league reduces it to its own member count. Within a
//! league, round `r` pick `p` is taken by the user at reduced position `p`
//! when `r` is even and `users_limit - p - 1` when `r` is odd.

use fsl_types::consts::LEAGUE_USERS_CAPACITY;
use fsl_types::{League, Root, Stage};
use tracing::debug;

use crate::error::{EngineError, EngineResult};

/// The season pick order reduced to one league: only entries addressing a
/// seat this league actually has, in season order.
pub fn reduced_pick_order(
    pick_order: &[u8; LEAGUE_USERS_CAPACITY],
    users_limit: u8,
) -> Vec<u8> {
    pick_order
        .iter()
        .copied()
        .filter(|&slot| slot >= 1 && slot <= users_limit)
        .collect()
}

/// The user id whose turn the current global pick is.
///
/// Fails with [`EngineError::LeagueNotFull`] while seats remain open (the
/// draft has not started), [`EngineError::DraftComplete`] once every roster
/// slot is filled, and [`EngineError::InvalidPickOrder`] when the season
/// order has not been seeded.
pub fn acting_user(root: &Root, league: &League) -> EngineResult<u8> {
    if !league.is_full() {
        return Err(EngineError::LeagueNotFull);
    }
    if league.is_draft_complete() {
        return Err(EngineError::DraftComplete);
    }

    let order = reduced_pick_order(&root.pick_order, league.users_limit);
    if order.len() != league.users_limit as usize {
        return Err(EngineError::InvalidPickOrder {
            reason: "season pick order is not seeded".into(),
        });
    }

    let users = league.users_limit as u16;
    let round = league.current_pick / users;
    let slot = league.current_pick % users;
    let position = if round % 2 == 0 {
        slot
    } else {
        users - slot - 1
    };
    Ok(order[position as usize])
}

/// Apply one draft pick.
///
/// On success the picked player id lands in the acting user's roster at the
/// index of the current round, and `current_pick` advances by exactly one.
/// Nothing else changes.
pub fn pick_player(
    root: &mut Root,
    league_index: u16,
    user_id: u8,
    player_id: u16,
) -> EngineResult<()> {
    if root.stage != Stage::SeasonOpen {
        return Err(EngineError::WrongStage {
            expected: Stage::SeasonOpen,
            actual: root.stage,
        });
    }
    // Only an initialized pool slot may ever enter a roster.
    root.player(player_id).ok_or(EngineError::NotFound)?;

    let league = root.league(league_index).ok_or(EngineError::NotFound)?;
    let on_the_clock = acting_user(root, league)?;
    if user_id != on_the_clock {
        return Err(EngineError::WrongTurn {
            expected_user: on_the_clock,
        });
    }
    if league.is_player_taken(player_id) {
        return Err(EngineError::PlayerAlreadyTaken { player_id });
    }
    let round = (league.current_pick / league.users_limit as u16) as usize;

    let league = root.league_mut(league_index).ok_or(EngineError::NotFound)?;
    let state = league.user_state_mut(user_id).ok_or(EngineError::NotFound)?;
    state.user_players[round] = player_id;
    league.current_pick += 1;

    debug!(
        league = league_index,
        user = user_id,
        player = player_id,
        pick = league.current_pick,
        "draft pick applied"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use fsl_types::consts::TEAM_PLAYERS_COUNT;
    use fsl_types::{FixedName, Player, Position, PublicIdentity, UserState};

    use super::*;

    /// A two-user league over a 16-player pool, draft not yet started.
    fn draft_ready_root() -> Root {
        let mut root = Root {
            stage: Stage::SeasonOpen,
            ..Root::default()
        };
        root.players_count = 16;
        for i in 0..16u16 {
            root.players[i as usize] = Player::new(100 + i, Position::PLAYABLE[i as usize % 6]);
        }
        for (i, slot) in root.pick_order.iter_mut().enumerate() {
            *slot = i as u8 + 1;
        }

        let mut league = League {
            name: FixedName::new("snake").unwrap(),
            users_limit: 2,
            is_initialized: true,
            ..League::default()
        };
        for seed in [1u8, 2] {
            league.user_states[seed as usize - 1] = UserState::new(
                FixedName::new(&format!("team-{seed}")).unwrap(),
                PublicIdentity::new([seed; 32]),
            );
        }
        league.user_state_count = 2;
        root.leagues[0] = league;
        root.leagues_count = 1;
        root
    }

    #[test]
    fn reduced_order_keeps_only_league_seats() {
        let mut order = [0u8; LEAGUE_USERS_CAPACITY];
        for (i, slot) in order.iter_mut().enumerate() {
            *slot = (LEAGUE_USERS_CAPACITY - i) as u8;
        }
        assert_eq!(reduced_pick_order(&order, 3), vec![3, 2, 1]);
        assert_eq!(reduced_pick_order(&order, 1), vec![1]);
    }

    #[test]
    fn snake_sequence_for_two_users() {
        let mut root = draft_ready_root();
        let mut sequence = Vec::new();
        for pick in 0..(2 * TEAM_PLAYERS_COUNT as u16) {
            let user = acting_user(&root, root.league(0).unwrap()).unwrap();
            sequence.push(user);
            pick_player(&mut root, 0, user, pick + 1).unwrap();
        }
        assert_eq!(sequence, vec![1, 2, 2, 1, 1, 2, 2, 1, 1, 2, 2, 1]);
        assert!(root.league(0).unwrap().is_draft_complete());
    }

    #[test]
    fn picks_fill_roster_in_round_order() {
        let mut root = draft_ready_root();
        pick_player(&mut root, 0, 1, 9).unwrap();
        pick_player(&mut root, 0, 2, 5).unwrap();
        pick_player(&mut root, 0, 2, 6).unwrap();
        let league = root.league(0).unwrap();
        assert_eq!(league.user_state(1).unwrap().user_players[0], 9);
        assert_eq!(league.user_state(2).unwrap().user_players[0], 5);
        assert_eq!(league.user_state(2).unwrap().user_players[1], 6);
        assert_eq!(league.current_pick, 3);
    }

    #[test]
    fn out_of_turn_pick_is_rejected() {
        let mut root = draft_ready_root();
        let err = pick_player(&mut root, 0, 2, 1).unwrap_err();
        assert_eq!(err, EngineError::WrongTurn { expected_user: 1 });
        assert_eq!(root.league(0).unwrap().current_pick, 0);
    }

    #[test]
    fn taken_player_is_rejected() {
        let mut root = draft_ready_root();
        pick_player(&mut root, 0, 1, 7).unwrap();
        let err = pick_player(&mut root, 0, 2, 7).unwrap_err();
        assert_eq!(err, EngineError::PlayerAlreadyTaken { player_id: 7 });
    }

    #[test]
    fn unknown_player_is_rejected() {
        let mut root = draft_ready_root();
        assert_eq!(pick_player(&mut root, 0, 1, 0).unwrap_err(), EngineError::NotFound);
        assert_eq!(pick_player(&mut root, 0, 1, 17).unwrap_err(), EngineError::NotFound);
    }

    #[test]
    fn draft_refuses_before_league_fills() {
        let mut root = draft_ready_root();
        root.leagues[0].users_limit = 3;
        let err = pick_player(&mut root, 0, 1, 1).unwrap_err();
        assert_eq!(err, EngineError::LeagueNotFull);
    }

    #[test]
    fn completed_draft_refuses_further_picks() {
        let mut root = draft_ready_root();
        for pick in 0..12u16 {
            let user = acting_user(&root, root.league(0).unwrap()).unwrap();
            pick_player(&mut root, 0, user, pick + 1).unwrap();
        }
        let err = pick_player(&mut root, 0, 1, 13).unwrap_err();
        assert_eq!(err, EngineError::DraftComplete);
    }

    #[test]
    fn unseeded_order_is_rejected() {
        let mut root = draft_ready_root();
        root.pick_order = [0; LEAGUE_USERS_CAPACITY];
        let err = pick_player(&mut root, 0, 1, 1).unwrap_err();
        assert!(matches!(err, EngineError::InvalidPickOrder { .. }));
    }
}
