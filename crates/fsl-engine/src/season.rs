//! Root lifecycle: season initialization, the player pool, the season-wide
//! pick order, weekly score writes, the week counter, and reward claims.

use fsl_types::consts::{
    GAMES_COUNT, LEAGUE_USERS_CAPACITY, MAX_PLAYERS_PER_OP, PLAYERS_CAPACITY,
};
use fsl_types::{Player, Position, PublicIdentity, Root, Stage};
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::scoring;

/// A pool entry supplied by [`add_players`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerEntry {
    pub external_id: u16,
    pub position: Position,
}

/// A score write supplied by [`update_player_scores`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScoreEntry {
    pub player_id: u16,
    pub score: u16,
}

/// Bring an uninitialized root to life.
pub fn initialize_root(
    root: &mut Root,
    oracle_authority: PublicIdentity,
    current_week: u8,
) -> EngineResult<()> {
    if root.stage != Stage::Uninitialized {
        return Err(EngineError::AlreadyInitialized);
    }
    root.stage = Stage::SeasonOpen;
    root.oracle_authority = oracle_authority;
    root.current_week = current_week;

    info!(oracle = %oracle_authority, current_week, "root initialized");
    Ok(())
}

/// Append a batch of players to the pool.
///
/// Slot indices are permanent: the `n`-th added player is referenced as id
/// `n` (1-based) from rosters, lineups, and swaps forever after.
pub fn add_players(root: &mut Root, players: &[PlayerEntry]) -> EngineResult<()> {
    require_season_open(root)?;
    if players.len() > MAX_PLAYERS_PER_OP {
        return Err(EngineError::WrongSize {
            expected: MAX_PLAYERS_PER_OP,
            actual: players.len(),
        });
    }
    if root.players_count as usize + players.len() > PLAYERS_CAPACITY {
        return Err(EngineError::CapacityExceeded {
            limit: PLAYERS_CAPACITY,
        });
    }
    if players.iter().any(|p| p.position == Position::Uninitialized) {
        return Err(EngineError::InvalidPosition);
    }

    for entry in players {
        let slot = root.players_count as usize;
        root.players[slot] = Player::new(entry.external_id, entry.position);
        root.players_count += 1;
    }

    debug!(added = players.len(), pool = root.players_count, "players added");
    Ok(())
}

/// Seed the season-wide pick-order permutation.
///
/// The order must be a permutation of `1..=LEAGUE_USERS_CAPACITY` and can
/// only be written while no league has drafted — re-seeding mid-draft would
/// silently reshuffle every remaining pick.
pub fn seed_draft_order(root: &mut Root, pick_order: &[u8]) -> EngineResult<()> {
    require_season_open(root)?;
    if root.any_pick_made() {
        return Err(EngineError::InvalidPickOrder {
            reason: "draft already started".into(),
        });
    }
    if pick_order.len() != LEAGUE_USERS_CAPACITY {
        return Err(EngineError::InvalidPickOrder {
            reason: format!(
                "expected {LEAGUE_USERS_CAPACITY} entries, got {}",
                pick_order.len()
            ),
        });
    }
    let mut seen = [false; LEAGUE_USERS_CAPACITY];
    for &slot in pick_order {
        if slot == 0 || slot as usize > LEAGUE_USERS_CAPACITY {
            return Err(EngineError::InvalidPickOrder {
                reason: format!("entry {slot} out of range"),
            });
        }
        if seen[slot as usize - 1] {
            return Err(EngineError::InvalidPickOrder {
                reason: format!("entry {slot} repeated"),
            });
        }
        seen[slot as usize - 1] = true;
    }

    root.pick_order.copy_from_slice(pick_order);
    info!("pick order seeded");
    Ok(())
}

/// Write one player's score for the current week.
///
/// A cell is written exactly once: the first write flips its validity flag
/// and any later write for the same player-week fails.
pub fn update_player_score(root: &mut Root, player_id: u16, score: u16) -> EngineResult<()> {
    require_season_open(root)?;
    let week = root.current_week;
    if week == 0 || week as usize > GAMES_COUNT {
        return Err(EngineError::WeekOutOfRange { week });
    }

    let player = root.player(player_id).ok_or(EngineError::NotFound)?;
    if player.scores[week as usize - 1].is_initialized {
        return Err(EngineError::ScoreAlreadySet { player_id, week });
    }

    let cell = root
        .player_mut(player_id)
        .and_then(|p| p.score_mut(week))
        .ok_or(EngineError::NotFound)?;
    cell.value = score;
    cell.is_initialized = true;

    debug!(player = player_id, week, score, "score written");
    Ok(())
}

/// Write a batch of scores for the current week.
///
/// The whole batch is validated before any cell is written, so a bad entry
/// rejects the batch without partial effects.
pub fn update_player_scores(root: &mut Root, scores: &[ScoreEntry]) -> EngineResult<()> {
    require_season_open(root)?;
    let week = root.current_week;
    if week == 0 || week as usize > GAMES_COUNT {
        return Err(EngineError::WeekOutOfRange { week });
    }
    if scores.len() > MAX_PLAYERS_PER_OP {
        return Err(EngineError::WrongSize {
            expected: MAX_PLAYERS_PER_OP,
            actual: scores.len(),
        });
    }
    for (i, entry) in scores.iter().enumerate() {
        if scores[..i].iter().any(|e| e.player_id == entry.player_id) {
            return Err(EngineError::DuplicatePlayer {
                player_id: entry.player_id,
            });
        }
        let player = root.player(entry.player_id).ok_or(EngineError::NotFound)?;
        if player.scores[week as usize - 1].is_initialized {
            return Err(EngineError::ScoreAlreadySet {
                player_id: entry.player_id,
                week,
            });
        }
    }

    for entry in scores {
        update_player_score(root, entry.player_id, entry.score)?;
    }
    Ok(())
}

/// Advance the week counter by one.
///
/// Advancing past the last game week closes the season; claims become
/// legal and nothing else can move.
pub fn increment_week(root: &mut Root) -> EngineResult<()> {
    require_season_open(root)?;
    root.current_week += 1;
    if root.current_week as usize > GAMES_COUNT {
        root.stage = Stage::SeasonComplete;
    }

    info!(current_week = root.current_week, stage = ?root.stage, "week advanced");
    Ok(())
}

/// Mark a league's reward as claimed.
///
/// The submitted winner list must exactly match the recomputed one — the
/// decision of who won is made here, from ledger state, not by the caller.
pub fn claim_reward(root: &mut Root, league_index: u16, winners: &[u8]) -> EngineResult<()> {
    if root.stage != Stage::SeasonComplete {
        return Err(EngineError::SeasonNotComplete);
    }
    let league = root.league(league_index).ok_or(EngineError::NotFound)?;
    if league.is_reward_claimed {
        return Err(EngineError::AlreadyClaimed);
    }

    let mut computed = scoring::winners(root, league_index)?;
    let mut submitted = winners.to_vec();
    computed.sort_unstable();
    submitted.sort_unstable();
    submitted.dedup();
    if computed.is_empty() || computed != submitted {
        return Err(EngineError::WrongWinners);
    }

    let league = root.league_mut(league_index).ok_or(EngineError::NotFound)?;
    league.is_reward_claimed = true;

    info!(league = league_index, winners = ?computed, "reward claimed");
    Ok(())
}

pub(crate) fn require_season_open(root: &Root) -> EngineResult<()> {
    if root.stage != Stage::SeasonOpen {
        return Err(EngineError::WrongStage {
            expected: Stage::SeasonOpen,
            actual: root.stage,
        });
    }
    Ok(())
}
