//! Chain-string decoding.
//!
//! The decoder scans for per-segment patterns rather than validating the
//! whole string: historical exports contain irregular spacer text between
//! segments, and rejecting it would drop rows the surveys consider valid.
//! Only two conditions are fatal — a missing leading direction marker and
//! a chain with zero destination segments.

use std::sync::LazyLock;

use anpr_map_anpr_models::Direction;
use regex::Regex;

use crate::ChainError;

/// Matches the `_<DIRECTION>` marker immediately preceding the chain's
/// first `>`. The text before the marker (the starting camera's label) is
/// not captured — the starting camera is identified by the worksheet, not
/// the chain.
static INITIAL_DIRECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^>]*_(IN|OUT|N|S|E|W)>").expect("valid regex"));

/// Matches one destination segment: `>{camera}_{direction}({minutes})`.
static SEGMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r">([0-9A-Za-z]+)_(IN|OUT|N|S|E|W)\((\d+(?:\.\d+)?)\)").expect("valid regex")
});

/// One decoded hop of a chain: the next camera reached, the direction past
/// it, and the minutes elapsed since the previous sighting.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainSegment {
    /// Camera identifier, e.g. `"12"` or `"35A"`.
    pub camera: String,
    /// Direction of travel past the camera.
    pub direction: Direction,
    /// Minutes since the previous sighting. May be fractional.
    pub elapsed_minutes: f64,
}

/// A fully decoded chain.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedChain {
    /// Direction past the starting camera.
    pub initial_direction: Direction,
    /// The destination hops, in chain order. Never empty.
    pub segments: Vec<ChainSegment>,
}

/// Decodes an encoded chain string.
///
/// # Errors
///
/// * [`ChainError::Malformed`] if the leading direction marker is missing.
/// * [`ChainError::Empty`] if no destination segments are found — every
///   recorded trip covers at least two cameras.
pub fn decode(chain: &str) -> Result<DecodedChain, ChainError> {
    let caps = INITIAL_DIRECTION_RE
        .captures(chain)
        .ok_or_else(|| malformed(chain))?;
    let initial_direction: Direction = caps[1].parse().map_err(|_| malformed(chain))?;

    let mut segments = Vec::new();
    for caps in SEGMENT_RE.captures_iter(chain) {
        let direction: Direction = caps[2].parse().map_err(|_| malformed(chain))?;
        let elapsed_minutes: f64 = caps[3].parse().map_err(|_| malformed(chain))?;
        segments.push(ChainSegment {
            camera: caps[1].to_string(),
            direction,
            elapsed_minutes,
        });
    }

    if segments.is_empty() {
        return Err(ChainError::Empty {
            chain: chain.to_string(),
        });
    }

    Ok(DecodedChain {
        initial_direction,
        segments,
    })
}

fn malformed(chain: &str) -> ChainError {
    ChainError::Malformed {
        chain: chain.to_string(),
    }
}
