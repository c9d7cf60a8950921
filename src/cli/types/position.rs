//! Squad position types.

use crate::error::OptimiserError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fantasy Premier League squad positions.
///
/// The declaration order is the display order used for starting line-ups
/// (goalkeeper first, forwards last).
///
/// # Examples
///
/// ```rust
/// use fpl_optimiser::Position;
///
/// let pos: Position = "M".parse().unwrap();
/// assert_eq!(pos, Position::MID);
/// assert_eq!(pos.to_string(), "MID");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    GK,
    DEF,
    MID,
    FWD,
}

impl Position {
    pub const ALL: [Position; 4] = [Position::GK, Position::DEF, Position::MID, Position::FWD];

    /// Index into per-position tables.
    pub fn index(&self) -> usize {
        match self {
            Position::GK => 0,
            Position::DEF => 1,
            Position::MID => 2,
            Position::FWD => 3,
        }
    }

    /// Single-letter code used by projection files.
    pub fn code(&self) -> char {
        match self {
            Position::GK => 'G',
            Position::DEF => 'D',
            Position::MID => 'M',
            Position::FWD => 'F',
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::GK => "GK",
            Position::DEF => "DEF",
            Position::MID => "MID",
            Position::FWD => "FWD",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Position {
    type Err = OptimiserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "G" | "GK" | "GKP" | "GOALKEEPER" | "GOALKEEPERS" => Ok(Position::GK),
            "D" | "DEF" | "DEFENDER" | "DEFENDERS" => Ok(Position::DEF),
            "M" | "MID" | "MIDFIELDER" | "MIDFIELDERS" => Ok(Position::MID),
            "F" | "FWD" | "FORWARD" | "FORWARDS" => Ok(Position::FWD),
            _ => Err(OptimiserError::InvalidPosition {
                position: s.to_string(),
            }),
        }
    }
}
