use std::collections::BTreeSet;

use super::columns;
use super::error::SchemaGap;
use super::model::{Dataset, Table};

// ---------------------------------------------------------------------------
// Filter criteria: what the side panel currently selects
// ---------------------------------------------------------------------------

/// Which competition(s) the view is built from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SourceChoice {
    #[default]
    RegularSeason,
    Playoffs,
    /// Regular season rows followed by playoff rows.
    Combined,
}

impl SourceChoice {
    pub const ALL: [SourceChoice; 3] = [
        SourceChoice::RegularSeason,
        SourceChoice::Playoffs,
        SourceChoice::Combined,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SourceChoice::RegularSeason => "Regular Season",
            SourceChoice::Playoffs => "Playoffs",
            SourceChoice::Combined => "Both",
        }
    }
}

/// Team multi-select state. `All` follows whatever teams the source has.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum TeamSelection {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl TeamSelection {
    pub fn contains(&self, team: &str) -> bool {
        match self {
            TeamSelection::All => true,
            TeamSelection::Only(set) => set.contains(team),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterCriteria {
    pub source: SourceChoice,
    pub teams: TeamSelection,
    /// `None` means the lower bound of the games slider.
    pub min_games: Option<i64>,
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView {
    pub table: Table,
    /// Sorted distinct teams of the source-selected data; `None` without a Team column.
    pub team_options: Option<Vec<String>>,
    /// `(min, max)` of G after the team stage; `None` when there is nothing to bound.
    pub games_bounds: Option<(i64, i64)>,
    /// Games threshold actually applied.
    pub min_games: Option<i64>,
    pub notices: Vec<SchemaGap>,
}

/// Run the pipeline: source selection → team filter → games filter.
pub fn apply(regular: &Dataset, playoffs: &Dataset, criteria: &FilterCriteria) -> FilteredView {
    let (table, dataset_name) = match criteria.source {
        SourceChoice::RegularSeason => (regular.table.clone(), regular.source.label()),
        SourceChoice::Playoffs => (playoffs.table.clone(), playoffs.source.label()),
        SourceChoice::Combined => (regular.table.concat(&playoffs.table), "combined"),
    };

    let mut notices = Vec::new();

    // ---- Team stage ----
    let (table, team_options) = match table.column_index(columns::TEAM) {
        Some(idx) => {
            let options: Vec<String> = table
                .distinct_keys(columns::TEAM)
                .unwrap_or_default()
                .into_iter()
                .collect();
            let filtered = table.filter_rows(|row| {
                row[idx]
                    .as_key()
                    .is_some_and(|team| criteria.teams.contains(&team))
            });
            (filtered, Some(options))
        }
        None => {
            let gap = SchemaGap {
                column: columns::TEAM.to_string(),
                dataset: dataset_name.to_string(),
            };
            log::warn!("{gap}; team filter skipped");
            notices.push(gap);
            (table, None)
        }
    };

    // ---- Games stage ----
    let (table, games_bounds, min_games) = match table.column_index(columns::GAMES) {
        Some(idx) => match games_bounds(&table) {
            Some((lo, hi)) => {
                let threshold = criteria.min_games.unwrap_or(lo);
                let filtered = table.filter_rows(|row| {
                    row[idx].as_f64().is_some_and(|g| g >= threshold as f64)
                });
                (filtered, Some((lo, hi)), Some(threshold))
            }
            None => (table, None, None),
        },
        None => (table, None, None),
    };

    log::debug!(
        "Filtered {} view: {} rows (teams: {:?}, min games: {:?})",
        criteria.source.label(),
        table.len(),
        criteria.teams,
        min_games
    );

    FilteredView {
        table,
        team_options,
        games_bounds,
        min_games,
        notices,
    }
}

/// Slider bounds for the games filter: truncated min and max of numeric G.
pub fn games_bounds(table: &Table) -> Option<(i64, i64)> {
    let values = table.column(columns::GAMES)?.filter_map(|c| c.as_f64());
    let (lo, hi) = values.fold(None, |acc: Option<(f64, f64)>, g| match acc {
        None => Some((g, g)),
        Some((lo, hi)) => Some((lo.min(g), hi.max(g))),
    })?;
    Some((lo.trunc() as i64, hi.trunc() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Source};

    fn dataset(source: Source, columns: &[&str], rows: Vec<Vec<CellValue>>) -> Dataset {
        Dataset::tagged(
            source,
            Table {
                columns: columns.iter().map(|c| c.to_string()).collect(),
                rows,
            },
        )
    }

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    fn i(v: i64) -> CellValue {
        CellValue::Integer(v)
    }

    fn sample() -> (Dataset, Dataset) {
        let r = dataset(
            Source::RegularSeason,
            &["Player", "Team", "G"],
            vec![
                vec![s("A"), s("LAL"), i(70)],
                vec![s("B"), s("BOS"), i(20)],
                vec![s("C"), CellValue::Null, i(50)],
                vec![s("D"), s("LAL"), CellValue::Null],
            ],
        );
        let p = dataset(
            Source::Playoffs,
            &["Player", "Team", "G"],
            vec![vec![s("A"), s("LAL"), i(12)], vec![s("B"), s("BOS"), i(4)]],
        );
        (r, p)
    }

    #[test]
    fn default_criteria_drops_missing_team_and_games() {
        let (r, p) = sample();
        let view = apply(&r, &p, &FilterCriteria::default());
        assert_eq!(view.table.len(), 2);
        assert_eq!(
            view.team_options,
            Some(vec!["BOS".to_string(), "LAL".to_string()])
        );
        assert_eq!(view.games_bounds, Some((20, 70)));
        assert_eq!(view.min_games, Some(20));
        assert!(view.notices.is_empty());
    }

    #[test]
    fn team_then_games() {
        let (r, p) = sample();
        let criteria = FilterCriteria {
            source: SourceChoice::RegularSeason,
            teams: TeamSelection::Only(BTreeSet::from(["LAL".to_string()])),
            min_games: Some(60),
        };
        let view = apply(&r, &p, &criteria);
        assert_eq!(view.table.len(), 1);
        assert_eq!(view.table.rows[0][0], s("A"));
        // bounds are computed after the team stage
        assert_eq!(view.games_bounds, Some((70, 70)));
    }

    #[test]
    fn playoffs_source() {
        let (r, p) = sample();
        let criteria = FilterCriteria {
            source: SourceChoice::Playoffs,
            ..Default::default()
        };
        let view = apply(&r, &p, &criteria);
        assert_eq!(view.table.len(), 2);
        assert_eq!(view.games_bounds, Some((4, 12)));
    }

    #[test]
    fn missing_team_column_gives_one_notice() {
        let r = dataset(Source::RegularSeason, &["Player", "G"], vec![vec![s("A"), i(3)]]);
        let p = dataset(Source::Playoffs, &["Player", "G"], vec![]);
        let view = apply(&r, &p, &FilterCriteria::default());
        assert_eq!(view.table.len(), 1);
        assert_eq!(view.team_options, None);
        assert_eq!(view.notices.len(), 1);
        assert_eq!(view.notices[0].column, "Team");
    }

    #[test]
    fn missing_games_column_is_silent() {
        let r = dataset(Source::RegularSeason, &["Player", "Team"], vec![vec![s("A"), s("X")]]);
        let p = dataset(Source::Playoffs, &["Player", "Team"], vec![]);
        let criteria = FilterCriteria {
            min_games: Some(50),
            ..Default::default()
        };
        let view = apply(&r, &p, &criteria);
        assert_eq!(view.table.len(), 1);
        assert_eq!(view.games_bounds, None);
        assert!(view.notices.is_empty());
    }

    #[test]
    fn float_games_truncate_bounds() {
        let mut t = Table::new(vec!["G".to_string()]);
        t.push_row(vec![CellValue::Float(3.7)]);
        t.push_row(vec![CellValue::Float(9.9)]);
        assert_eq!(games_bounds(&t), Some((3, 9)));
    }
}
