//! League creation and joining.

use fsl_types::consts::{LEAGUES_CAPACITY, LEAGUE_USERS_CAPACITY, TEAM_PLAYERS_COUNT};
use fsl_types::{FixedName, League, Position, PublicIdentity, Root, UserState};
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::season::require_season_open;

/// Per-position roster quota requested at league creation, indexed like
/// [`Position::PLAYABLE`].
///
/// The wire format has no slot for it, so it is validated for basic sanity
/// and then discarded; roster legality is governed by ownership alone.
pub type PositionOptions = [u8; Position::PLAYABLE.len()];

/// Create a league; the creator takes seat 1.
///
/// Scoring starts the week after creation: `start_week = current_week + 1`.
pub fn create_league(
    root: &mut Root,
    name: &str,
    bid: u64,
    users_limit: u8,
    team_name: &str,
    owner: PublicIdentity,
    position_options: &PositionOptions,
) -> EngineResult<u16> {
    require_season_open(root)?;
    if root.leagues_count as usize >= LEAGUES_CAPACITY {
        return Err(EngineError::CapacityExceeded {
            limit: LEAGUES_CAPACITY,
        });
    }
    if users_limit == 0 || users_limit as usize > LEAGUE_USERS_CAPACITY {
        return Err(EngineError::CapacityExceeded {
            limit: LEAGUE_USERS_CAPACITY,
        });
    }
    let quota: usize = position_options.iter().map(|&n| n as usize).sum();
    if quota != TEAM_PLAYERS_COUNT {
        return Err(EngineError::WrongSize {
            expected: TEAM_PLAYERS_COUNT,
            actual: quota,
        });
    }
    let name = FixedName::new(name)?;
    let team_name = FixedName::new(team_name)?;

    let league_index = root.leagues_count;
    let mut league = League {
        name,
        bid,
        users_limit,
        start_week: root.current_week + 1,
        is_initialized: true,
        ..League::default()
    };
    league.user_states[0] = UserState::new(team_name, owner);
    league.user_state_count = 1;

    root.leagues[league_index as usize] = league;
    root.leagues_count += 1;

    info!(league = league_index, owner = %owner, users_limit, "league created");
    Ok(league_index)
}

/// Take the next open seat in a league.
pub fn join_league(
    root: &mut Root,
    league_index: u16,
    team_name: &str,
    owner: PublicIdentity,
) -> EngineResult<u8> {
    require_season_open(root)?;
    let league = root.league(league_index).ok_or(EngineError::NotFound)?;
    if league.is_full() {
        return Err(EngineError::CapacityExceeded {
            limit: league.users_limit as usize,
        });
    }
    if league.member_by_owner(&owner).is_some() {
        return Err(EngineError::AlreadyJoined);
    }
    let team_name = FixedName::new(team_name)?;

    let league = root.league_mut(league_index).ok_or(EngineError::NotFound)?;
    let user_id = league.user_state_count + 1;
    league.user_states[user_id as usize - 1] = UserState::new(team_name, owner);
    league.user_state_count = user_id;

    info!(league = league_index, user = user_id, owner = %owner, "user joined");
    Ok(user_id)
}
