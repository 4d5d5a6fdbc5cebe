//! Foundation types for the Fantasy Sports Ledger (FSL).
//!
//! This crate provides the decoded in-memory model of the ledger — the
//! single fixed-size binary record that holds all season state — together
//! with the capacity constants baked into its wire format and the small
//! invariant helpers the state machine relies on.
//!
//! # Key Types
//!
//! - [`Root`] — the whole season: player pool, leagues, pick order, stage
//! - [`League`] — one competition instance with a bounded member set
//! - [`UserState`] — one user's team: roster, weekly lineups, swap queue
//! - [`Player`] / [`Score`] — a pool slot and its per-week scores
//! - [`PublicIdentity`] — 32-byte externally-verified caller identity
//! - [`FixedName`] — bounded, null-padded UTF-16 name storage

pub mod consts;
pub mod error;
pub mod identity;
pub mod league;
pub mod name;
pub mod player;
pub mod root;

pub use error::TypeError;
pub use identity::PublicIdentity;
pub use league::{League, SwapProposal, UserState};
pub use name::FixedName;
pub use player::{Player, Position, Score};
pub use root::{Root, Stage};
