//! Weekly active-lineup selection.

use fsl_types::consts::{ACTIVE_PLAYERS_COUNT, GAMES_COUNT};
use fsl_types::{Root, Stage};
use tracing::debug;

use crate::error::{EngineError, EngineResult};

/// Set one user's active lineup for a future week.
///
/// The week must lie strictly after the current week — past and present
/// rows are immutable once the week counter has reached them. The selection
/// must hold exactly [`ACTIVE_PLAYERS_COUNT`] distinct ids, all from the
/// user's own roster. On success the whole row for that week is
/// overwritten.
pub fn set_lineup(
    root: &mut Root,
    league_index: u16,
    user_id: u8,
    week: u8,
    players: &[u16],
) -> EngineResult<()> {
    if root.stage != Stage::SeasonOpen {
        return Err(EngineError::WrongStage {
            expected: Stage::SeasonOpen,
            actual: root.stage,
        });
    }
    let current_week = root.current_week;

    let league = root.league(league_index).ok_or(EngineError::NotFound)?;
    if !league.is_draft_complete() {
        return Err(EngineError::DraftInProgress);
    }
    let state = league.user_state(user_id).ok_or(EngineError::NotFound)?;

    if week <= current_week {
        return Err(EngineError::PastWeek { week, current_week });
    }
    if week as usize > GAMES_COUNT {
        return Err(EngineError::WeekOutOfRange { week });
    }
    if players.len() != ACTIVE_PLAYERS_COUNT {
        return Err(EngineError::WrongSize {
            expected: ACTIVE_PLAYERS_COUNT,
            actual: players.len(),
        });
    }
    for (i, &player_id) in players.iter().enumerate() {
        if players[..i].contains(&player_id) {
            return Err(EngineError::DuplicatePlayer { player_id });
        }
    }
    for &player_id in players {
        if !state.owns(player_id) {
            return Err(EngineError::NotOwned { player_id });
        }
    }

    let state = root
        .league_mut(league_index)
        .and_then(|league| league.user_state_mut(user_id))
        .ok_or(EngineError::NotFound)?;
    let row = &mut state.lineups[week as usize - 1];
    for (slot, &player_id) in row.iter_mut().zip(players) {
        *slot = player_id;
    }
    state.is_lineup_set = true;

    debug!(league = league_index, user = user_id, week, "lineup set");
    Ok(())
}

#[cfg(test)]
mod tests {
    use fsl_types::consts::TEAM_PLAYERS_COUNT;
    use fsl_types::{FixedName, League, Player, Position, PublicIdentity, UserState};

    use super::*;

    /// Two-user league with completed draft: user 1 owns 1..=6, user 2
    /// owns 7..=12.
    fn drafted_root() -> Root {
        let mut root = Root {
            stage: Stage::SeasonOpen,
            current_week: 1,
            ..Root::default()
        };
        root.players_count = 12;
        for i in 0..12u16 {
            root.players[i as usize] = Player::new(200 + i, Position::PLAYABLE[i as usize % 6]);
        }
        for (i, slot) in root.pick_order.iter_mut().enumerate() {
            *slot = i as u8 + 1;
        }

        let mut league = League {
            name: FixedName::new("lineups").unwrap(),
            users_limit: 2,
            current_pick: 2 * TEAM_PLAYERS_COUNT as u16,
            start_week: 1,
            is_initialized: true,
            ..League::default()
        };
        for user in 0..2u16 {
            let mut state = UserState::new(
                FixedName::new(&format!("team-{user}")).unwrap(),
                PublicIdentity::new([user as u8 + 1; 32]),
            );
            for (i, slot) in state.user_players.iter_mut().enumerate() {
                *slot = user * TEAM_PLAYERS_COUNT as u16 + i as u16 + 1;
            }
            league.user_states[user as usize] = state;
        }
        league.user_state_count = 2;
        root.leagues[0] = league;
        root.leagues_count = 1;
        root
    }

    #[test]
    fn valid_lineup_is_stored_unchanged() {
        let mut root = drafted_root();
        set_lineup(&mut root, 0, 1, 3, &[1, 4, 6]).unwrap();
        let state = root.league(0).unwrap().user_state(1).unwrap();
        assert_eq!(state.lineups[2], [1, 4, 6]);
        assert!(state.is_lineup_set);
        // Other weeks untouched.
        assert_eq!(state.lineups[3], [0, 0, 0]);
    }

    #[test]
    fn lineup_can_be_revised_before_the_week_arrives() {
        let mut root = drafted_root();
        set_lineup(&mut root, 0, 1, 5, &[1, 2, 3]).unwrap();
        set_lineup(&mut root, 0, 1, 5, &[4, 5, 6]).unwrap();
        let state = root.league(0).unwrap().user_state(1).unwrap();
        assert_eq!(state.lineups[4], [4, 5, 6]);
    }

    #[test]
    fn past_and_present_weeks_are_immutable() {
        let mut root = drafted_root();
        root.current_week = 4;
        for week in [1u8, 4] {
            let err = set_lineup(&mut root, 0, 1, week, &[1, 2, 3]).unwrap_err();
            assert_eq!(
                err,
                EngineError::PastWeek {
                    week,
                    current_week: 4
                }
            );
        }
        set_lineup(&mut root, 0, 1, 5, &[1, 2, 3]).unwrap();
    }

    #[test]
    fn week_beyond_season_is_rejected() {
        let mut root = drafted_root();
        let err = set_lineup(&mut root, 0, 1, GAMES_COUNT as u8 + 1, &[1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            EngineError::WeekOutOfRange {
                week: GAMES_COUNT as u8 + 1
            }
        );
    }

    #[test]
    fn wrong_size_is_rejected() {
        let mut root = drafted_root();
        let err = set_lineup(&mut root, 0, 1, 2, &[1, 2]).unwrap_err();
        assert_eq!(
            err,
            EngineError::WrongSize {
                expected: ACTIVE_PLAYERS_COUNT,
                actual: 2
            }
        );
    }

    #[test]
    fn duplicate_player_is_rejected() {
        let mut root = drafted_root();
        let err = set_lineup(&mut root, 0, 1, 2, &[1, 2, 1]).unwrap_err();
        assert_eq!(err, EngineError::DuplicatePlayer { player_id: 1 });
    }

    #[test]
    fn foreign_player_is_rejected() {
        let mut root = drafted_root();
        // Player 7 belongs to user 2.
        let err = set_lineup(&mut root, 0, 1, 2, &[1, 2, 7]).unwrap_err();
        assert_eq!(err, EngineError::NotOwned { player_id: 7 });
    }

    #[test]
    fn lineup_requires_completed_draft() {
        let mut root = drafted_root();
        root.leagues[0].current_pick -= 1;
        let err = set_lineup(&mut root, 0, 1, 2, &[1, 2, 3]).unwrap_err();
        assert_eq!(err, EngineError::DraftInProgress);
    }
}
