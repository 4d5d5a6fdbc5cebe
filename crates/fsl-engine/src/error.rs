use thiserror::Error;

use fsl_types::{Stage, TypeError};

/// Errors returned by state-machine operations.
///
/// All of these are deterministic: retrying the same operation against an
/// unchanged root yields the same error. A failed operation leaves the root
/// byte-for-byte unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("root already initialized")]
    AlreadyInitialized,

    #[error("operation requires stage {expected:?}, ledger is in {actual:?}")]
    WrongStage { expected: Stage, actual: Stage },

    #[error("capacity exceeded: limit is {limit}")]
    CapacityExceeded { limit: usize },

    #[error("league has open seats, draft has not started")]
    LeagueNotFull,

    #[error("draft already complete")]
    DraftComplete,

    #[error("draft still in progress")]
    DraftInProgress,

    #[error("user {expected_user} is on the clock")]
    WrongTurn { expected_user: u8 },

    #[error("player {player_id} already taken in this league")]
    PlayerAlreadyTaken { player_id: u16 },

    #[error("week {week} is not after current week {current_week}")]
    PastWeek { week: u8, current_week: u8 },

    #[error("week {week} is out of range")]
    WeekOutOfRange { week: u8 },

    #[error("wrong size: expected {expected}, got {actual}")]
    WrongSize { expected: usize, actual: usize },

    #[error("duplicate player {player_id}")]
    DuplicatePlayer { player_id: u16 },

    #[error("player {player_id} is not owned by this user")]
    NotOwned { player_id: u16 },

    #[error("player {player_id} is in the current week's active lineup")]
    ActivePlayer { player_id: u16 },

    #[error("an identical proposal is already pending")]
    DuplicateProposal,

    #[error("swap proposal queue is full")]
    QueueFull,

    #[error("not found")]
    NotFound,

    #[error("user {user_id} is not the addressed acceptor")]
    WrongAcceptor { user_id: u8 },

    #[error("reward already claimed")]
    AlreadyClaimed,

    #[error("score already set for player {player_id} in week {week}")]
    ScoreAlreadySet { player_id: u16, week: u8 },

    #[error("season is not complete")]
    SeasonNotComplete,

    #[error("invalid pick order: {reason}")]
    InvalidPickOrder { reason: String },

    #[error("submitted winners do not match the computed winners")]
    WrongWinners,

    #[error("identity already joined this league")]
    AlreadyJoined,

    #[error("position is not a playable position")]
    InvalidPosition,

    #[error("invalid name: {0}")]
    Name(#[from] TypeError),
}

pub type EngineResult<T> = Result<T, EngineError>;
