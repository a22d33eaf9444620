use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::data::aggregate::{self, Overview, TOP_N_RANGE};
use crate::data::cache::DatasetCache;
use crate::data::error::{AggregateError, ExportError, LoadError};
use crate::data::export::{self, ExportFormat, ExportScope};
use crate::data::filter::{self, FilterCriteria, FilteredView, SourceChoice, TeamSelection};
use crate::data::model::{Datasets, Table};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Overview,
    TopScorers,
    Comparison,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Overview, Tab::TopScorers, Tab::Comparison];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::TopScorers => "Top Scorers",
            Tab::Comparison => "Player Comparison",
        }
    }
}

/// One user's session, independent of rendering. Every control maps to a
/// method here; derived tables are recomputed from the shared datasets.
pub struct AppState {
    pub cache: DatasetCache,

    /// Loaded datasets (None until the first successful load).
    pub datasets: Option<Arc<Datasets>>,

    /// Current side-panel selections.
    pub criteria: FilterCriteria,

    /// Filtered view for `view_key` (memoized).
    view: Option<FilteredView>,
    view_key: Option<FilterCriteria>,

    pub top_n: usize,
    pub selected_player: Option<String>,
    pub tab: Tab,

    /// Starting directory for export dialogs.
    pub export_dir: PathBuf,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Last load failure reported by disk polling.
    last_load_error: Option<String>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            cache: DatasetCache::new(&config.regular_path, &config.playoffs_path),
            datasets: None,
            criteria: FilterCriteria::default(),
            view: None,
            view_key: None,
            top_n: config.default_top_n,
            selected_player: None,
            tab: Tab::default(),
            export_dir: config.export_dir.clone(),
            status_message: None,
            last_load_error: None,
        }
    }

    /// Initial load through the cache.
    pub fn load(&mut self) -> Result<(), LoadError> {
        let datasets = self.cache.get()?;
        self.set_datasets(datasets);
        Ok(())
    }

    /// Ingest newly loaded datasets and reset the filters.
    pub fn set_datasets(&mut self, datasets: Arc<Datasets>) {
        self.criteria.teams = TeamSelection::All;
        self.criteria.min_games = None;
        self.invalidate_view();

        self.selected_player = match aggregate::common_players(&datasets.regular, &datasets.playoffs) {
            Ok(players) => match self.selected_player.take() {
                Some(p) if players.contains(&p) => Some(p),
                _ => players.into_iter().next(),
            },
            Err(_) => None,
        };

        self.datasets = Some(datasets);
        self.status_message = None;
        self.last_load_error = None;
    }

    /// Explicit refresh from disk. On failure the previous data stays.
    pub fn reload(&mut self) {
        match self.cache.refresh() {
            Ok(datasets) => {
                log::info!("Reloaded data files");
                self.set_datasets(datasets);
            }
            Err(e) => self.report_load_error(e),
        }
    }

    /// Load other files. On failure the cache keeps pointing at the new
    /// paths but the previous data stays on screen.
    pub fn open_files(&mut self, regular: PathBuf, playoffs: PathBuf) {
        self.cache.set_paths(regular, playoffs);
        self.reload();
    }

    /// Pick up files modified on disk since the last load. A failure is
    /// reported once until it changes or a load succeeds.
    pub fn sync_with_disk(&mut self) {
        let Some(current) = self.datasets.clone() else {
            return;
        };
        match self.cache.get() {
            Ok(datasets) if !Arc::ptr_eq(&datasets, &current) => self.set_datasets(datasets),
            Ok(_) => {}
            Err(e) if self.last_load_error.as_deref() == Some(e.to_string().as_str()) => {
                log::debug!("Data files still unreadable: {e}");
            }
            Err(e) => self.report_load_error(e),
        }
    }

    fn report_load_error(&mut self, e: LoadError) {
        log::error!("Failed to load data: {e}");
        let message = e.to_string();
        self.status_message = Some(format!("Error: {message}"));
        self.last_load_error = Some(message);
    }

    // -- Filters --

    fn invalidate_view(&mut self) {
        self.view = None;
        self.view_key = None;
    }

    /// The filtered view for the current criteria, recomputed only when the
    /// criteria changed.
    pub fn view(&mut self) -> Option<&FilteredView> {
        let datasets = self.datasets.as_ref()?;
        if self.view_key.as_ref() != Some(&self.criteria) {
            self.view = Some(filter::apply(
                &datasets.regular,
                &datasets.playoffs,
                &self.criteria,
            ));
            self.view_key = Some(self.criteria.clone());
        }
        self.view.as_ref()
    }

    /// Switching competition resets the team and games selections.
    pub fn set_source(&mut self, source: SourceChoice) {
        if self.criteria.source != source {
            self.criteria = FilterCriteria {
                source,
                ..FilterCriteria::default()
            };
        }
    }

    /// Toggle a single team in the multi-select.
    pub fn toggle_team(&mut self, team: &str) {
        let options = self.team_options();
        let mut selected: BTreeSet<String> = match &self.criteria.teams {
            TeamSelection::All => options.iter().cloned().collect(),
            TeamSelection::Only(set) => set.clone(),
        };
        if !selected.remove(team) {
            selected.insert(team.to_string());
        }
        self.criteria.teams = if selected.len() == options.len()
            && options.iter().all(|t| selected.contains(t))
        {
            TeamSelection::All
        } else {
            TeamSelection::Only(selected)
        };
        self.clamp_min_games();
    }

    pub fn select_all_teams(&mut self) {
        self.criteria.teams = TeamSelection::All;
        self.clamp_min_games();
    }

    pub fn select_no_teams(&mut self) {
        self.criteria.teams = TeamSelection::Only(BTreeSet::new());
        self.clamp_min_games();
    }

    /// Keep the games threshold inside the slider range of the current team
    /// selection.
    fn clamp_min_games(&mut self) {
        let Some(min_games) = self.criteria.min_games else {
            return;
        };
        let bounds = self.view().and_then(|v| v.games_bounds);
        self.criteria.min_games = bounds.map(|(lo, hi)| min_games.clamp(lo, hi));
    }

    pub fn set_min_games(&mut self, min_games: i64) {
        self.criteria.min_games = Some(min_games);
    }

    pub fn team_options(&mut self) -> Vec<String> {
        self.view()
            .and_then(|v| v.team_options.clone())
            .unwrap_or_default()
    }

    pub fn set_top_n(&mut self, n: usize) {
        self.top_n = n.clamp(*TOP_N_RANGE.start(), *TOP_N_RANGE.end());
    }

    // -- Aggregates --

    pub fn overview(&mut self) -> Option<Overview> {
        self.view().map(aggregate::overview)
    }

    pub fn top_scorers(&mut self) -> Option<Result<Table, AggregateError>> {
        let n = self.top_n;
        self.view().map(|v| aggregate::top_scorers(v, n))
    }

    pub fn common_players(&self) -> Option<Result<Vec<String>, AggregateError>> {
        let ds = self.datasets.as_ref()?;
        Some(aggregate::common_players(&ds.regular, &ds.playoffs))
    }

    /// Comparison table for the selected player (bypasses the filters).
    pub fn comparison(&self) -> Option<Result<Table, AggregateError>> {
        let ds = self.datasets.as_ref()?;
        let player = self.selected_player.as_deref()?;
        Some(aggregate::compare_player(&ds.regular, &ds.playoffs, player))
    }

    // -- Export --

    /// The table behind an export button, if it can currently be built.
    pub fn export_table(&mut self, scope: &ExportScope) -> Option<Table> {
        match scope {
            ExportScope::Filtered => self.view().map(|v| v.table.clone()),
            ExportScope::TopScorers => self.top_scorers()?.ok(),
            ExportScope::Comparison(player) => {
                let ds = self.datasets.as_ref()?;
                aggregate::compare_player(&ds.regular, &ds.playoffs, player).ok()
            }
        }
    }

    /// Write `scope` to `path`; the outcome is also left in `status_message`.
    pub fn export(
        &mut self,
        scope: &ExportScope,
        format: ExportFormat,
        path: &Path,
    ) -> Result<(), ExportError> {
        let Some(table) = self.export_table(scope) else {
            self.status_message = Some("Nothing to export".to_string());
            return Ok(());
        };
        match export::write_export(path, &table, format) {
            Ok(()) => {
                self.status_message = Some(format!("Saved {}", path.display()));
                Ok(())
            }
            Err(e) => {
                log::error!("Export to {} failed: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn state_with(regular: &str, playoffs: &str, tag: &str) -> AppState {
        let dir = std::env::temp_dir();
        let r = dir.join(format!("courtview_state_{}_{tag}_r.csv", std::process::id()));
        let p = dir.join(format!("courtview_state_{}_{tag}_p.csv", std::process::id()));
        std::fs::write(&r, regular).unwrap();
        std::fs::write(&p, playoffs).unwrap();
        let config = Config {
            regular_path: r,
            playoffs_path: p,
            ..Config::default()
        };
        let mut state = AppState::new(&config);
        state.load().unwrap();
        state
    }

    const REGULAR: &str = "Player,Team,G,PTS\nA,LAL,70,25\nB,BOS,60,20\nC,BOS,10,5\n";
    const PLAYOFFS: &str = "Player,Team,G,PTS\nB,BOS,12,22\nA,LAL,4,30\n";

    #[test]
    fn load_selects_first_common_player() {
        let state = state_with(REGULAR, PLAYOFFS, "first");
        assert_eq!(state.selected_player.as_deref(), Some("A"));
    }

    #[test]
    fn toggling_teams_round_trips_to_all() {
        let mut state = state_with(REGULAR, PLAYOFFS, "toggle");
        state.toggle_team("BOS");
        assert_eq!(
            state.criteria.teams,
            TeamSelection::Only(BTreeSet::from(["LAL".to_string()]))
        );
        assert_eq!(state.view().unwrap().table.len(), 1);
        state.toggle_team("BOS");
        assert_eq!(state.criteria.teams, TeamSelection::All);
        assert_eq!(state.view().unwrap().table.len(), 3);
    }

    #[test]
    fn source_switch_resets_filters() {
        let mut state = state_with(REGULAR, PLAYOFFS, "switch");
        state.set_min_games(50);
        assert_eq!(state.view().unwrap().table.len(), 2);
        state.set_source(SourceChoice::Playoffs);
        assert_eq!(state.criteria.min_games, None);
        let view = state.view().unwrap();
        assert_eq!(view.games_bounds, Some((4, 12)));
        assert_eq!(view.table.len(), 2);
    }

    #[test]
    fn export_writes_top_scorers() {
        let mut state = state_with(REGULAR, PLAYOFFS, "export");
        let path = std::env::temp_dir().join(format!(
            "courtview_state_{}_out/{}",
            std::process::id(),
            ExportScope::TopScorers.file_name(ExportFormat::Csv)
        ));
        state
            .export(&ExportScope::TopScorers, ExportFormat::Csv, &path)
            .unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Player,PTS"));
        assert!(text.contains("A,25.0"));
    }

    #[test]
    fn comparison_for_selected_player() {
        let state = state_with(REGULAR, PLAYOFFS, "cmp");
        let table = state.comparison().unwrap().unwrap();
        assert_eq!(table.rows[0][1], CellValue::Float(25.0));
        assert_eq!(table.rows[0][2], CellValue::Float(30.0));
    }

    #[test]
    fn team_change_pulls_threshold_into_range() {
        let mut state = state_with(REGULAR, PLAYOFFS, "clamp");
        state.set_min_games(70);
        assert_eq!(state.view().unwrap().table.len(), 1);

        state.toggle_team("LAL");
        assert_eq!(state.criteria.min_games, Some(60));
        let view = state.view().unwrap();
        assert_eq!(view.games_bounds, Some((10, 60)));
        assert_eq!(view.table.len(), 1);

        state.select_no_teams();
        assert_eq!(state.criteria.min_games, None);
        state.select_all_teams();
        assert_eq!(state.view().unwrap().table.len(), 3);
    }

    #[test]
    fn failing_disk_sync_reports_once() {
        let mut state = state_with(REGULAR, PLAYOFFS, "sync");
        std::fs::remove_file(state.cache.regular_path()).unwrap();

        state.sync_with_disk();
        assert!(state.status_message.as_deref().unwrap().starts_with("Error"));
        assert!(state.datasets.is_some());

        state.status_message = Some("Saved out.csv".to_string());
        state.sync_with_disk();
        assert_eq!(state.status_message.as_deref(), Some("Saved out.csv"));
    }
}
