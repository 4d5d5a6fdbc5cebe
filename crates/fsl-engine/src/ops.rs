//! The operation surface: one closed request enum and an atomic transform.
//!
//! The transport decodes a request off its own wire, decodes the current
//! ledger bytes, calls [`apply`], and re-encodes the returned root. The
//! input root is never mutated — on error there is nothing to roll back.

use fsl_types::{PublicIdentity, Root};
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::membership::PositionOptions;
use crate::season::{PlayerEntry, ScoreEntry};
use crate::{draft, lineup, membership, season, swap};

/// Every mutation the ledger supports.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    InitializeRoot {
        oracle_authority: PublicIdentity,
        current_week: u8,
    },
    AddPlayers {
        players: Vec<PlayerEntry>,
    },
    SeedDraftOrder {
        pick_order: Vec<u8>,
    },
    CreateLeague {
        name: String,
        bid: u64,
        users_limit: u8,
        team_name: String,
        owner: PublicIdentity,
        position_options: PositionOptions,
    },
    JoinLeague {
        league_index: u16,
        team_name: String,
        owner: PublicIdentity,
    },
    PickPlayer {
        league_index: u16,
        user_id: u8,
        player_id: u16,
    },
    UpdateLineup {
        league_index: u16,
        user_id: u8,
        week: u8,
        players: Vec<u16>,
    },
    ProposeSwap {
        league_index: u16,
        proposing_user_id: u8,
        accepting_user_id: u8,
        give_player_id: u16,
        want_player_id: u16,
    },
    AcceptSwap {
        league_index: u16,
        accepting_user_id: u8,
        proposing_user_id: u8,
        give_player_id: u16,
        want_player_id: u16,
    },
    RejectSwap {
        league_index: u16,
        accepting_user_id: u8,
        proposing_user_id: u8,
        give_player_id: u16,
        want_player_id: u16,
    },
    UpdatePlayerScore {
        player_id: u16,
        score: u16,
    },
    UpdatePlayerScores {
        scores: Vec<ScoreEntry>,
    },
    IncrementWeek,
    ClaimReward {
        league_index: u16,
        winners: Vec<u8>,
    },
}

/// Apply one operation to a root, producing the next root.
///
/// All-or-nothing: the input is cloned up front and every validation runs
/// against the clone before any field moves, so an error returns with the
/// caller's root untouched and no partial state anywhere.
pub fn apply(root: &Root, operation: &Operation) -> EngineResult<Root> {
    let mut next = root.clone();
    match operation {
        Operation::InitializeRoot {
            oracle_authority,
            current_week,
        } => season::initialize_root(&mut next, *oracle_authority, *current_week)?,
        Operation::AddPlayers { players } => season::add_players(&mut next, players)?,
        Operation::SeedDraftOrder { pick_order } => season::seed_draft_order(&mut next, pick_order)?,
        Operation::CreateLeague {
            name,
            bid,
            users_limit,
            team_name,
            owner,
            position_options,
        } => {
            membership::create_league(
                &mut next,
                name,
                *bid,
                *users_limit,
                team_name,
                *owner,
                position_options,
            )?;
        }
        Operation::JoinLeague {
            league_index,
            team_name,
            owner,
        } => {
            membership::join_league(&mut next, *league_index, team_name, *owner)?;
        }
        Operation::PickPlayer {
            league_index,
            user_id,
            player_id,
        } => draft::pick_player(&mut next, *league_index, *user_id, *player_id)?,
        Operation::UpdateLineup {
            league_index,
            user_id,
            week,
            players,
        } => lineup::set_lineup(&mut next, *league_index, *user_id, *week, players)?,
        Operation::ProposeSwap {
            league_index,
            proposing_user_id,
            accepting_user_id,
            give_player_id,
            want_player_id,
        } => swap::propose(
            &mut next,
            *league_index,
            *proposing_user_id,
            *accepting_user_id,
            *give_player_id,
            *want_player_id,
        )?,
        Operation::AcceptSwap {
            league_index,
            accepting_user_id,
            proposing_user_id,
            give_player_id,
            want_player_id,
        } => swap::accept(
            &mut next,
            *league_index,
            *accepting_user_id,
            *proposing_user_id,
            *give_player_id,
            *want_player_id,
        )?,
        Operation::RejectSwap {
            league_index,
            accepting_user_id,
            proposing_user_id,
            give_player_id,
            want_player_id,
        } => swap::reject(
            &mut next,
            *league_index,
            *accepting_user_id,
            *proposing_user_id,
            *give_player_id,
            *want_player_id,
        )?,
        Operation::UpdatePlayerScore { player_id, score } => {
            season::update_player_score(&mut next, *player_id, *score)?
        }
        Operation::UpdatePlayerScores { scores } => season::update_player_scores(&mut next, scores)?,
        Operation::IncrementWeek => season::increment_week(&mut next)?,
        Operation::ClaimReward {
            league_index,
            winners,
        } => season::claim_reward(&mut next, *league_index, winners)?,
    }
    Ok(next)
}
