//! Player resolution: user identifiers to catalog rows.

use serde::{Deserialize, Serialize};
use tracing::debug;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use super::Catalog;
use crate::cli::types::{Identifier, PlayerId};
use crate::error::{OptimiserError, Result};

/// Stable position of a row within one [`Catalog`].
///
/// Indices are only meaningful for the catalog that produced them; a
/// filtered copy from [`Catalog::without`] renumbers its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerIndex(pub usize);

/// Lowercase and strip diacritics so `"Núñez"` compares equal to `"nunez"`.
pub fn normalize_name(name: &str) -> String {
    name.trim()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

impl Catalog {
    /// Resolve one identifier to exactly one row.
    ///
    /// Names match when their normalized forms are equal. Zero matches is
    /// `NotFound`; more than one is `Ambiguous`, listing every candidate.
    pub fn resolve(&self, identifier: &Identifier) -> Result<PlayerIndex> {
        match identifier {
            Identifier::ById(id) => {
                self.index_of(PlayerId::new(*id))
                    .ok_or_else(|| OptimiserError::NotFound {
                        identifier: identifier.to_string(),
                    })
            }
            Identifier::ByName(name) => {
                let query = normalize_name(name);
                let matches: Vec<PlayerIndex> = self
                    .iter()
                    .filter(|(_, player)| normalize_name(&player.name) == query)
                    .map(|(idx, _)| idx)
                    .collect();

                match matches.as_slice() {
                    [] => Err(OptimiserError::NotFound {
                        identifier: name.clone(),
                    }),
                    [only] => {
                        debug!(query = %name, id = %self.get(*only).id, "resolved player");
                        Ok(*only)
                    }
                    _ => Err(OptimiserError::Ambiguous {
                        query: name.clone(),
                        candidates: matches
                            .iter()
                            .map(|idx| {
                                let player = self.get(*idx);
                                (player.id, player.name.clone())
                            })
                            .collect(),
                    }),
                }
            }
        }
    }

    /// Resolve a list of identifiers, dropping repeats of the same row.
    pub fn resolve_all(&self, identifiers: &[Identifier]) -> Result<Vec<PlayerIndex>> {
        let mut resolved = Vec::with_capacity(identifiers.len());
        for identifier in identifiers {
            let idx = self.resolve(identifier)?;
            if !resolved.contains(&idx) {
                resolved.push(idx);
            }
        }
        Ok(resolved)
    }
}
