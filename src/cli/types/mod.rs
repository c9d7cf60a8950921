//! Type-safe wrappers and enums for Fantasy Premier League data.

pub mod identifier;
pub mod ids;
pub mod position;

pub use identifier::Identifier;
pub use ids::{EntryId, Gameweek, PlayerId};
pub use position::Position;
