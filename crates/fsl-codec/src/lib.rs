//! Fixed-capacity binary codec for the Fantasy Sports Ledger.
//!
//! The whole season state serializes into a single record of exactly
//! [`layout::ROOT_LEN`] bytes: every slot array is materialized to its
//! declared capacity with per-slot validity flags, integers are
//! little-endian, names are null-padded 16-bit code units. [`decode`] and
//! [`encode`] are exact inverses:
//!
//! - `decode(encode(r)) == r` for every valid `Root` `r`
//! - `encode(decode(b)) == b` for every well-formed buffer `b`
//!
//! `decode` never partially decodes and never coerces undeclared bytes to
//! defaults — unknown enum values, non-boolean flag bytes, and counts over
//! capacity are hard failures.

pub mod decode;
pub mod encode;
pub mod error;
pub mod layout;

pub use decode::decode;
pub use encode::encode;
pub use error::{CodecError, CodecResult};
