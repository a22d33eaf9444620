use std::collections::{BTreeMap, BTreeSet};

use super::columns;
use super::error::{AggregateError, SchemaGap};
use super::filter::FilteredView;
use super::model::{CellValue, Dataset, Table};

/// Smallest and largest accepted top-N.
pub const TOP_N_RANGE: std::ops::RangeInclusive<usize> = 5..=20;

/// Metrics compared between regular season and playoffs, in display order.
pub const COMPARISON_METRICS: [&str; 7] = [
    columns::POINTS,
    columns::ASSISTS,
    columns::REBOUNDS,
    columns::STEALS,
    columns::BLOCKS,
    columns::GAMES,
    columns::MINUTES,
];

pub const STAT_COLUMN: &str = "Stat";
pub const REGULAR_COLUMN: &str = "Regular Season";
pub const PLAYOFFS_COLUMN: &str = "Playoffs";

// ---------------------------------------------------------------------------
// Means
// ---------------------------------------------------------------------------

/// Result of averaging a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeanStat {
    /// The column does not exist; the metric is not shown at all.
    ColumnAbsent,
    /// The column exists but has no numeric value to average.
    Unavailable,
    Value(f64),
}

impl MeanStat {
    pub fn value(self) -> Option<f64> {
        match self {
            MeanStat::Value(v) => Some(v),
            _ => None,
        }
    }

    fn into_cell(self) -> CellValue {
        self.value().map_or(CellValue::Null, CellValue::Float)
    }
}

/// Mean of the non-missing cells. Text that is not a number is an error.
fn mean_of<'a>(cells: impl Iterator<Item = &'a CellValue>, column: &str) -> Result<MeanStat, AggregateError> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for cell in cells {
        if cell.is_null() {
            continue;
        }
        let v = cell.as_f64().ok_or_else(|| {
            AggregateError::Computation(format!("'{column}' holds non-numeric value '{cell}'"))
        })?;
        sum += v;
        count += 1;
    }
    Ok(if count == 0 {
        MeanStat::Unavailable
    } else {
        MeanStat::Value(sum / count as f64)
    })
}

fn column_mean(table: &Table, column: &str) -> Result<MeanStat, AggregateError> {
    match table.column(column) {
        Some(cells) => mean_of(cells, column),
        None => Ok(MeanStat::ColumnAbsent),
    }
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub rows: usize,
    /// Distinct players, or the row count when there is no Player column.
    pub unique_players: usize,
    pub mean_points: MeanStat,
    pub mean_assists: MeanStat,
}

pub fn overview(view: &FilteredView) -> Overview {
    let table = &view.table;
    let unique_players = table
        .distinct_keys(columns::PLAYER)
        .map_or(table.len(), |players| players.len());

    let mean = |column: &str| {
        column_mean(table, column).unwrap_or_else(|e| {
            log::warn!("Overview mean of {column} unavailable: {e}");
            MeanStat::Unavailable
        })
    };

    Overview {
        rows: table.len(),
        unique_players,
        mean_points: mean(columns::POINTS),
        mean_assists: mean(columns::ASSISTS),
    }
}

// ---------------------------------------------------------------------------
// Top scorers
// ---------------------------------------------------------------------------

/// Mean PTS per player, best first, at most `n` rows (`n` clamped to 5..=20).
///
/// Players are grouped in name order and the sort is stable, so ties keep
/// alphabetical order. Players without any PTS value sort last.
pub fn top_scorers(view: &FilteredView, n: usize) -> Result<Table, AggregateError> {
    let table = &view.table;
    let n = n.clamp(*TOP_N_RANGE.start(), *TOP_N_RANGE.end());

    let missing = |column: &str| SchemaGap {
        column: column.to_string(),
        dataset: "selected".to_string(),
    };
    let pts_idx = table
        .column_index(columns::POINTS)
        .ok_or_else(|| missing(columns::POINTS))?;
    let player_idx = table
        .column_index(columns::PLAYER)
        .ok_or_else(|| missing(columns::PLAYER))?;

    let mut groups: BTreeMap<String, Vec<&CellValue>> = BTreeMap::new();
    for row in &table.rows {
        if let Some(player) = row[player_idx].as_key() {
            groups.entry(player).or_default().push(&row[pts_idx]);
        }
    }

    let mut ranked = Vec::with_capacity(groups.len());
    for (player, cells) in groups {
        let mean = mean_of(cells.into_iter(), columns::POINTS)?;
        ranked.push((player, mean.value()));
    }
    ranked.sort_by(|a, b| match (a.1, b.1) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    let mut out = Table::new(vec![columns::PLAYER.to_string(), columns::POINTS.to_string()]);
    for (player, mean) in ranked.into_iter().take(n) {
        out.push_row(vec![
            CellValue::String(player),
            mean.map_or(CellValue::Null, CellValue::Float),
        ]);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Regular season vs playoffs
// ---------------------------------------------------------------------------

/// Players present in both raw datasets, sorted.
pub fn common_players(regular: &Dataset, playoffs: &Dataset) -> Result<Vec<String>, AggregateError> {
    let players = |ds: &Dataset| -> Result<BTreeSet<String>, AggregateError> {
        ds.table.distinct_keys(columns::PLAYER).ok_or_else(|| {
            AggregateError::MissingColumn(SchemaGap {
                column: columns::PLAYER.to_string(),
                dataset: ds.source.label().to_string(),
            })
        })
    };
    let regular = players(regular)?;
    let playoffs = players(playoffs)?;

    let common: Vec<String> = regular.intersection(&playoffs).cloned().collect();
    if common.is_empty() {
        return Err(AggregateError::NoCommonPlayers);
    }
    Ok(common)
}

/// Average of every comparison metric for `player`, one row per metric.
///
/// Always reads the full datasets, never a filtered view. Metrics a dataset
/// lacks (or cannot average) come out as `Null`.
pub fn compare_player(
    regular: &Dataset,
    playoffs: &Dataset,
    player: &str,
) -> Result<Table, AggregateError> {
    let common = common_players(regular, playoffs)?;
    if common.binary_search_by(|p| p.as_str().cmp(player)).is_err() {
        return Err(AggregateError::NotCommon(player.to_string()));
    }

    let player_rows = |ds: &Dataset| {
        ds.table.filter_rows(|row| {
            ds.table
                .column_index(columns::PLAYER)
                .is_some_and(|idx| row[idx].as_key().as_deref() == Some(player))
        })
    };
    let regular_rows = player_rows(regular);
    let playoff_rows = player_rows(playoffs);

    let metric_mean = |table: &Table, metric: &str| {
        column_mean(table, metric).unwrap_or_else(|e| {
            log::debug!("{metric} skipped for {player}: {e}");
            MeanStat::Unavailable
        })
    };

    let mut out = Table::new(vec![
        STAT_COLUMN.to_string(),
        REGULAR_COLUMN.to_string(),
        PLAYOFFS_COLUMN.to_string(),
    ]);
    for metric in COMPARISON_METRICS {
        out.push_row(vec![
            CellValue::String(metric.to_string()),
            metric_mean(&regular_rows, metric).into_cell(),
            metric_mean(&playoff_rows, metric).into_cell(),
        ]);
    }
    Ok(out)
}
