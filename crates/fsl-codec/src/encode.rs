use fsl_types::consts::{LEAGUES_CAPACITY, MAX_NAME_SYMBOLS, PLAYERS_CAPACITY};
use fsl_types::{FixedName, League, Player, Root, Score, SwapProposal, UserState};

use crate::error::{CodecError, CodecResult};
use crate::layout::ROOT_LEN;

/// Encode a ledger record into its exact fixed span.
///
/// The output is always [`ROOT_LEN`] bytes. Fails with
/// [`CodecError::StringTooLong`] when a name holds more code units than the
/// format reserves, and with [`CodecError::CorruptField`] when an arena
/// `Vec` does not have its pinned capacity length.
pub fn encode(root: &Root) -> CodecResult<Vec<u8>> {
    if root.players.len() != PLAYERS_CAPACITY {
        return Err(arena_length("players", root.players.len(), PLAYERS_CAPACITY));
    }
    if root.leagues.len() != LEAGUES_CAPACITY {
        return Err(arena_length("leagues", root.leagues.len(), LEAGUES_CAPACITY));
    }

    let mut writer = Writer {
        buf: Vec::with_capacity(ROOT_LEN),
    };

    writer.u16(root.players_count);
    for player in &root.players {
        write_player(&mut writer, player);
    }
    writer.u16(root.leagues_count);
    for league in &root.leagues {
        write_league(&mut writer, league)?;
    }
    writer.bytes(&root.pick_order);
    writer.u8(root.stage.as_byte());
    writer.u8(root.current_week);
    writer.bytes(root.oracle_authority.as_bytes());

    debug_assert_eq!(writer.buf.len(), ROOT_LEN);
    Ok(writer.buf)
}

fn arena_length(field: &'static str, actual: usize, capacity: usize) -> CodecError {
    CodecError::CorruptField {
        field,
        reason: format!("arena holds {actual} entries, format requires {capacity}"),
    }
}

fn write_score(writer: &mut Writer, score: &Score) {
    writer.u16(score.value);
    writer.flag(score.is_initialized);
}

fn write_player(writer: &mut Writer, player: &Player) {
    for score in &player.scores {
        write_score(writer, score);
    }
    writer.u16(player.external_id);
    writer.u8(player.position.as_byte());
    writer.flag(player.is_initialized);
}

fn write_proposal(writer: &mut Writer, proposal: &SwapProposal) {
    writer.u16(proposal.give_player_id);
    writer.u16(proposal.want_player_id);
    writer.flag(proposal.is_initialized);
}

fn write_user_state(writer: &mut Writer, state: &UserState) -> CodecResult<()> {
    for &id in &state.user_players {
        writer.u16(id);
    }
    for week in &state.lineups {
        for &id in week {
            writer.u16(id);
        }
    }
    writer.u8(state.swap_proposals_count);
    for proposal in &state.swap_proposals {
        write_proposal(writer, proposal);
    }
    writer.name(&state.team_name)?;
    writer.bytes(state.owner.as_bytes());
    writer.flag(state.is_lineup_set);
    writer.flag(state.is_initialized);
    Ok(())
}

fn write_league(writer: &mut Writer, league: &League) -> CodecResult<()> {
    writer.u8(league.user_state_count);
    for state in &league.user_states {
        write_user_state(writer, state)?;
    }
    writer.name(&league.name)?;
    writer.u64(league.bid);
    writer.u8(league.users_limit);
    writer.u16(league.current_pick);
    writer.u8(league.start_week);
    writer.flag(league.is_reward_claimed);
    writer.flag(league.is_initialized);
    Ok(())
}

/// Sequential little-endian writer.
struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    fn u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    fn flag(&mut self, value: bool) {
        self.buf.push(value as u8);
    }

    fn u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    fn u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    fn bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    fn name(&mut self, name: &FixedName) -> CodecResult<()> {
        let units = name.as_units();
        if units.len() > MAX_NAME_SYMBOLS {
            return Err(CodecError::StringTooLong {
                max: MAX_NAME_SYMBOLS,
                actual: units.len(),
            });
        }
        for &unit in units {
            self.u16(unit);
        }
        for _ in units.len()..MAX_NAME_SYMBOLS {
            self.u16(0);
        }
        Ok(())
    }
}
