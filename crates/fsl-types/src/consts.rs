//! Capacity constants baked into the ledger wire format.
//!
//! Every constant here determines the encoded span of some entity, so any
//! change is a breaking change to the binary format.

/// Player slots in the season-wide pool.
pub const PLAYERS_CAPACITY: usize = 100;

/// Scoring periods (weeks) in a season.
pub const GAMES_COUNT: usize = 17;

/// Roster slots scored each week.
pub const ACTIVE_PLAYERS_COUNT: usize = 3;

/// Roster slots held in reserve.
pub const BENCH_PLAYERS_COUNT: usize = 3;

/// Full roster size per user.
pub const TEAM_PLAYERS_COUNT: usize = ACTIVE_PLAYERS_COUNT + BENCH_PLAYERS_COUNT;

/// League slots in the root.
pub const LEAGUES_CAPACITY: usize = 10;

/// Most users one league can hold: the pool must cover every full roster.
pub const LEAGUE_USERS_CAPACITY: usize = PLAYERS_CAPACITY / TEAM_PLAYERS_COUNT;

/// Live swap proposals one user may hold at a time.
pub const SWAP_PROPOSALS_CAPACITY: usize = 20;

/// 16-bit code units reserved for each stored name.
pub const MAX_NAME_SYMBOLS: usize = 128;

/// Bytes in a public identity.
pub const PUBLIC_IDENTITY_LEN: usize = 32;

/// Upper bound on a single batch request (player additions, score writes).
pub const MAX_PLAYERS_PER_OP: usize = 255;
