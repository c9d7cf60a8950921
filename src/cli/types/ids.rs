//! ID and gameweek types for Fantasy Premier League.

use crate::error::{OptimiserError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for catalog player IDs.
///
/// # Examples
///
/// ```rust
/// use fpl_optimiser::PlayerId;
///
/// let id = PlayerId::new(302);
/// assert_eq!(id.as_u32(), 302);
/// assert_eq!(id.to_string(), "302");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = OptimiserError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Type-safe wrapper for FPL entry (manager) IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub u32);

impl EntryId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = OptimiserError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}

/// Type-safe wrapper for gameweek numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Gameweek(pub u16);

impl Gameweek {
    pub fn new(gw: u16) -> Self {
        Self(gw)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// The gameweek `periods` steps after this one, saturating at `u16::MAX`.
    pub fn offset(&self, periods: usize) -> Gameweek {
        let step = u16::try_from(periods).unwrap_or(u16::MAX);
        Gameweek(self.0.saturating_add(step))
    }

    /// The gameweek before this one, if there is one.
    pub fn previous(&self) -> Option<Gameweek> {
        self.0.checked_sub(1).filter(|gw| *gw > 0).map(Gameweek)
    }
}

impl Default for Gameweek {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for Gameweek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Gameweek {
    type Err = OptimiserError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}
