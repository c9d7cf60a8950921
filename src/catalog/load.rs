//! CSV ingestion of projection files.
//!
//! Expected columns (case-insensitive): `id`, `team`, `pos`, `name`,
//! `cost` or `buy_cost`, optional `sale_value`, and one `<gw>_pts` column per
//! gameweek. A lone `points` column is read as a single-gameweek catalog.

use std::{fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{info, warn};

use super::{Catalog, Player};
use crate::cli::types::{Gameweek, PlayerId, Position};
use crate::error::{OptimiserError, Result};

/// Load a catalog from a CSV file on disk.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let file = File::open(path)?;
    read_catalog(file)
}

/// Load a catalog from any CSV source.
///
/// Rows with a missing or unparseable required field are skipped with a
/// warning rather than reaching the catalog.
pub fn read_catalog<R: Read>(reader: R) -> Result<Catalog> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let layout = ColumnLayout::from_headers(&headers)?;

    let mut players = Vec::new();
    let mut skipped = 0usize;
    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        match layout.parse_row(&record) {
            Ok(player) => players.push(player),
            Err(reason) => {
                skipped += 1;
                // +2: one for the header, one for 1-based line numbers
                warn!(line = row + 2, %reason, "skipping catalog row");
            }
        }
    }

    info!(
        players = players.len(),
        skipped,
        first_gameweek = layout.first_gameweek.as_u16(),
        periods = layout.points.len(),
        "catalog loaded"
    );

    Catalog::new(players, layout.first_gameweek, layout.points.len())
}

/// Column positions resolved from the header row.
#[derive(Debug)]
struct ColumnLayout {
    id: usize,
    team: usize,
    pos: usize,
    name: usize,
    cost: usize,
    sale_value: Option<usize>,
    /// Points columns in gameweek order.
    points: Vec<usize>,
    first_gameweek: Gameweek,
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let names: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |column: &str| names.iter().position(|h| h == column);
        let require = |column: &str| {
            find(column).ok_or_else(|| OptimiserError::MissingColumn {
                column: column.to_string(),
            })
        };

        let cost = match find("cost").or_else(|| find("buy_cost")) {
            Some(idx) => idx,
            None => {
                return Err(OptimiserError::MissingColumn {
                    column: "cost".to_string(),
                })
            }
        };

        let mut gameweeks: Vec<(u16, usize)> = names
            .iter()
            .enumerate()
            .filter_map(|(idx, h)| {
                let gw = h.strip_suffix("_pts")?.parse::<u16>().ok()?;
                Some((gw, idx))
            })
            .collect();
        gameweeks.sort_by_key(|(gw, _)| *gw);

        let (first_gameweek, points) = if gameweeks.is_empty() {
            let idx = require("points").map_err(|_| OptimiserError::MissingColumn {
                column: "<gw>_pts".to_string(),
            })?;
            (Gameweek::default(), vec![idx])
        } else {
            for pair in gameweeks.windows(2) {
                if pair[0].0.checked_add(1) != Some(pair[1].0) {
                    return Err(OptimiserError::invalid(
                        "catalog",
                        format!(
                            "points columns must cover consecutive gameweeks, found {}_pts then {}_pts",
                            pair[0].0, pair[1].0
                        ),
                    ));
                }
            }
            (
                Gameweek::new(gameweeks[0].0),
                gameweeks.iter().map(|(_, idx)| *idx).collect(),
            )
        };

        Ok(Self {
            id: require("id")?,
            team: require("team")?,
            pos: require("pos")?,
            name: require("name")?,
            cost,
            sale_value: find("sale_value"),
            points,
            first_gameweek,
        })
    }

    fn parse_row(&self, record: &StringRecord) -> std::result::Result<Player, String> {
        let field = |idx: usize, column: &str| {
            record
                .get(idx)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| format!("missing {}", column))
        };
        let number = |idx: usize, column: &str| -> std::result::Result<f64, String> {
            let raw = field(idx, column)?;
            raw.parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| format!("invalid {} {:?}", column, raw))
        };

        let id = field(self.id, "id")?
            .parse::<PlayerId>()
            .map_err(|e| format!("invalid id: {}", e))?;
        let position = field(self.pos, "pos")?
            .parse::<Position>()
            .map_err(|e| e.to_string())?;
        let cost = number(self.cost, "cost")?;
        let sale_value = match self.sale_value {
            Some(idx) if record.get(idx).is_some_and(|v| !v.is_empty()) => {
                number(idx, "sale_value")?
            }
            _ => cost,
        };
        let points = self
            .points
            .iter()
            .map(|idx| number(*idx, "points"))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Player {
            id,
            name: field(self.name, "name")?.to_string(),
            team: field(self.team, "team")?.to_string(),
            position,
            cost,
            sale_value,
            points,
        })
    }
}
