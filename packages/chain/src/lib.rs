#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Decoding of encoded trip-chain strings and assembly of capture events.
//!
//! A chain is the compact per-trip encoding the survey spreadsheets use to
//! record one vehicle's route past a sequence of cameras, e.g.
//! `X07_N>12_S(4.5)>15_E(10)`: the text before the first `>` carries the
//! direction at the starting camera, and each following segment names the
//! next camera, the direction past it, and the minutes elapsed since the
//! previous sighting.
//!
//! Decoding ([`decode::decode`]) is a pure string operation; assembly
//! ([`assemble::assemble`]) turns decoded segments into absolute-timestamped
//! capture events. Neither touches the database.

pub mod assemble;
pub mod decode;

/// Errors produced while decoding a chain string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    /// The chain has no `_<DIRECTION>` marker before its first `>`.
    #[error("chain {chain:?} has no leading direction marker")]
    Malformed {
        /// The offending chain string.
        chain: String,
    },

    /// The chain contains no destination segments at all.
    #[error("chain {chain:?} contains no destination segments")]
    Empty {
        /// The offending chain string.
        chain: String,
    },
}
