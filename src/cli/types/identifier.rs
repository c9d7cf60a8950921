//! User-supplied player identifiers.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A player reference as typed by the user: either a catalog id or a name.
///
/// Parsing treats any all-digit string as an id, so `"302"` is `ById(302)`
/// and `"Salah"` is `ByName("Salah")`. In JSON config files either a number
/// or a string is accepted.
///
/// ```rust
/// use fpl_optimiser::Identifier;
///
/// assert_eq!("302".parse::<Identifier>().unwrap(), Identifier::ById(302));
/// assert_eq!(
///     "van Dijk".parse::<Identifier>().unwrap(),
///     Identifier::ByName("van Dijk".to_string())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    ById(u32),
    ByName(String),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::ById(id) => write!(f, "id {}", id),
            Identifier::ByName(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for Identifier {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<u32> for Identifier {
    fn from(id: u32) -> Self {
        Identifier::ById(id)
    }
}

/// Same rule as [`FromStr`]; clap picks this impl for CLI values.
impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.parse::<u32>() {
            Ok(id) => Identifier::ById(id),
            Err(_) => Identifier::ByName(trimmed.to_string()),
        }
    }
}
