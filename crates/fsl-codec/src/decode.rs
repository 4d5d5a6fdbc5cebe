use fsl_types::consts::{
    ACTIVE_PLAYERS_COUNT, GAMES_COUNT, LEAGUES_CAPACITY, LEAGUE_USERS_CAPACITY, MAX_NAME_SYMBOLS,
    PLAYERS_CAPACITY, PUBLIC_IDENTITY_LEN, SWAP_PROPOSALS_CAPACITY, TEAM_PLAYERS_COUNT,
};
use fsl_types::{
    FixedName, League, Player, Position, PublicIdentity, Root, Score, Stage, SwapProposal,
    UserState,
};

use crate::error::{CodecError, CodecResult};
use crate::layout::ROOT_LEN;

/// Decode a complete ledger record.
///
/// Total over any input: the length is checked up front against the fixed
/// span and decoding never reads past it. Fails with
/// [`CodecError::MalformedLedger`] on a wrong span, with
/// [`CodecError::UnknownEnumValue`] on an undeclared `position`/`stage`
/// byte, and with [`CodecError::CorruptField`] on out-of-range counts or
/// non-0/1 boolean bytes. Nothing is ever coerced to a default.
pub fn decode(bytes: &[u8]) -> CodecResult<Root> {
    if bytes.len() != ROOT_LEN {
        return Err(CodecError::MalformedLedger {
            expected: ROOT_LEN,
            actual: bytes.len(),
        });
    }

    let mut reader = Reader { buf: bytes, pos: 0 };

    let players_count = reader.u16();
    if players_count as usize > PLAYERS_CAPACITY {
        return Err(count_over_capacity("players_count", players_count as usize, PLAYERS_CAPACITY));
    }
    let mut players = Vec::with_capacity(PLAYERS_CAPACITY);
    for _ in 0..PLAYERS_CAPACITY {
        players.push(read_player(&mut reader)?);
    }

    let leagues_count = reader.u16();
    if leagues_count as usize > LEAGUES_CAPACITY {
        return Err(count_over_capacity("leagues_count", leagues_count as usize, LEAGUES_CAPACITY));
    }
    let mut leagues = Vec::with_capacity(LEAGUES_CAPACITY);
    for _ in 0..LEAGUES_CAPACITY {
        leagues.push(read_league(&mut reader)?);
    }

    let mut pick_order = [0u8; LEAGUE_USERS_CAPACITY];
    for slot in &mut pick_order {
        *slot = reader.u8();
    }

    let stage_byte = reader.u8();
    let stage = Stage::from_byte(stage_byte).ok_or(CodecError::UnknownEnumValue {
        field: "stage",
        value: stage_byte,
    })?;
    let current_week = reader.u8();
    let oracle_authority = PublicIdentity::new(reader.array::<PUBLIC_IDENTITY_LEN>());

    debug_assert_eq!(reader.pos, ROOT_LEN);

    Ok(Root {
        players_count,
        players,
        leagues_count,
        leagues,
        pick_order,
        stage,
        current_week,
        oracle_authority,
    })
}

fn count_over_capacity(field: &'static str, value: usize, capacity: usize) -> CodecError {
    CodecError::CorruptField {
        field,
        reason: format!("count {value} exceeds capacity {capacity}"),
    }
}

fn read_score(reader: &mut Reader<'_>) -> CodecResult<Score> {
    Ok(Score {
        value: reader.u16(),
        is_initialized: reader.bool("score.is_initialized")?,
    })
}

fn read_player(reader: &mut Reader<'_>) -> CodecResult<Player> {
    let mut scores = [Score::default(); GAMES_COUNT];
    for score in &mut scores {
        *score = read_score(reader)?;
    }
    let external_id = reader.u16();
    let position_byte = reader.u8();
    let position = Position::from_byte(position_byte).ok_or(CodecError::UnknownEnumValue {
        field: "position",
        value: position_byte,
    })?;
    Ok(Player {
        scores,
        external_id,
        position,
        is_initialized: reader.bool("player.is_initialized")?,
    })
}

fn read_proposal(reader: &mut Reader<'_>) -> CodecResult<SwapProposal> {
    Ok(SwapProposal {
        give_player_id: reader.u16(),
        want_player_id: reader.u16(),
        is_initialized: reader.bool("swap_proposal.is_initialized")?,
    })
}

fn read_user_state(reader: &mut Reader<'_>) -> CodecResult<UserState> {
    let mut user_players = [0u16; TEAM_PLAYERS_COUNT];
    for slot in &mut user_players {
        *slot = reader.u16();
    }

    let mut lineups = [[0u16; ACTIVE_PLAYERS_COUNT]; GAMES_COUNT];
    for week in &mut lineups {
        for slot in week.iter_mut() {
            *slot = reader.u16();
        }
    }

    let swap_proposals_count = reader.u8();
    if swap_proposals_count as usize > SWAP_PROPOSALS_CAPACITY {
        return Err(count_over_capacity(
            "swap_proposals_count",
            swap_proposals_count as usize,
            SWAP_PROPOSALS_CAPACITY,
        ));
    }
    let mut swap_proposals = [SwapProposal::default(); SWAP_PROPOSALS_CAPACITY];
    for proposal in &mut swap_proposals {
        *proposal = read_proposal(reader)?;
    }

    let team_name = reader.name();
    let owner = PublicIdentity::new(reader.array::<PUBLIC_IDENTITY_LEN>());
    let is_lineup_set = reader.bool("user_state.is_lineup_set")?;
    let is_initialized = reader.bool("user_state.is_initialized")?;

    Ok(UserState {
        user_players,
        lineups,
        swap_proposals_count,
        swap_proposals,
        team_name,
        owner,
        is_lineup_set,
        is_initialized,
    })
}

fn read_league(reader: &mut Reader<'_>) -> CodecResult<League> {
    let user_state_count = reader.u8();
    if user_state_count as usize > LEAGUE_USERS_CAPACITY {
        return Err(count_over_capacity(
            "user_state_count",
            user_state_count as usize,
            LEAGUE_USERS_CAPACITY,
        ));
    }

    let mut user_states: [UserState; LEAGUE_USERS_CAPACITY] = Default::default();
    for state in &mut user_states {
        *state = read_user_state(reader)?;
    }

    let name = reader.name();
    let bid = reader.u64();
    let users_limit = reader.u8();
    if users_limit as usize > LEAGUE_USERS_CAPACITY {
        return Err(count_over_capacity(
            "users_limit",
            users_limit as usize,
            LEAGUE_USERS_CAPACITY,
        ));
    }
    let current_pick = reader.u16();
    let start_week = reader.u8();
    let is_reward_claimed = reader.bool("league.is_reward_claimed")?;
    let is_initialized = reader.bool("league.is_initialized")?;

    Ok(League {
        user_state_count,
        user_states,
        name,
        bid,
        users_limit,
        current_pick,
        start_week,
        is_reward_claimed,
        is_initialized,
    })
}

/// Sequential little-endian reader over a span-checked buffer.
///
/// `decode` validates the total length before any read, so the fixed-width
/// accessors below cannot run off the end.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn u8(&mut self) -> u8 {
        let value = self.buf[self.pos];
        self.pos += 1;
        value
    }

    fn bool(&mut self, field: &'static str) -> CodecResult<bool> {
        match self.u8() {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(CodecError::CorruptField {
                field,
                reason: format!("invalid boolean byte {value}"),
            }),
        }
    }

    fn u16(&mut self) -> u16 {
        let value = u16::from_le_bytes(self.buf[self.pos..self.pos + 2].try_into().unwrap());
        self.pos += 2;
        value
    }

    fn u64(&mut self) -> u64 {
        let value = u64::from_le_bytes(self.buf[self.pos..self.pos + 8].try_into().unwrap());
        self.pos += 8;
        value
    }

    fn array<const N: usize>(&mut self) -> [u8; N] {
        let value: [u8; N] = self.buf[self.pos..self.pos + N].try_into().unwrap();
        self.pos += N;
        value
    }

    fn name(&mut self) -> FixedName {
        let mut units = [0u16; MAX_NAME_SYMBOLS];
        for unit in &mut units {
            *unit = self.u16();
        }
        FixedName::from_units(&units)
    }
}
