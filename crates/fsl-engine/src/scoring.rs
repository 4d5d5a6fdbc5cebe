//! Score aggregation and winner computation. Pure reads, no mutation.

use fsl_types::consts::GAMES_COUNT;
use fsl_types::Root;

use crate::error::{EngineError, EngineResult};

/// One user's score for one week: the sum of that week's scores over the
/// lineup row. Empty slots (id 0) and never-written score cells contribute
/// nothing.
pub fn week_score(root: &Root, league_index: u16, user_id: u8, week: u8) -> EngineResult<u32> {
    if week == 0 || week as usize > GAMES_COUNT {
        return Err(EngineError::WeekOutOfRange { week });
    }
    let league = root.league(league_index).ok_or(EngineError::NotFound)?;
    let state = league.user_state(user_id).ok_or(EngineError::NotFound)?;

    let mut total = 0u32;
    for &player_id in &state.lineups[week as usize - 1] {
        let Some(player) = root.player(player_id) else {
            continue;
        };
        total += player.scores[week as usize - 1].value as u32;
    }
    Ok(total)
}

/// One user's cumulative score from the league's start week through the
/// current week (capped at the last week of the season).
pub fn total_score(root: &Root, league_index: u16, user_id: u8) -> EngineResult<u32> {
    let league = root.league(league_index).ok_or(EngineError::NotFound)?;
    let start_week = league.start_week;
    let last_week = root.current_week.min(GAMES_COUNT as u8);

    let mut total = 0u32;
    let mut week = start_week.max(1);
    while week <= last_week {
        total += week_score(root, league_index, user_id, week)?;
        week += 1;
    }
    Ok(total)
}

/// User ids of every member whose total score equals the league maximum.
/// Ties produce multiple winners; an empty league produces none.
pub fn winners(root: &Root, league_index: u16) -> EngineResult<Vec<u8>> {
    let league = root.league(league_index).ok_or(EngineError::NotFound)?;

    let mut best = 0u32;
    let mut leaders: Vec<u8> = Vec::new();
    for (user_id, _) in league.members() {
        let total = total_score(root, league_index, user_id)?;
        if leaders.is_empty() || total > best {
            best = total;
            leaders.clear();
            leaders.push(user_id);
        } else if total == best {
            leaders.push(user_id);
        }
    }
    Ok(leaders)
}
