use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use courtview::data::filter::SourceChoice;
use courtview::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Snapshot what the widgets need so we can mutate state below.
    let Some(view) = state.view() else {
        ui.label("No dataset loaded.");
        return;
    };
    let team_options = view.team_options.clone();
    let games_bounds = view.games_bounds;
    let min_games = view.min_games;
    let notices = view.notices.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Competition ----
            ui.strong("Competition");
            for choice in SourceChoice::ALL {
                if ui
                    .radio(state.criteria.source == choice, choice.label())
                    .clicked()
                {
                    state.set_source(choice);
                }
            }
            ui.separator();

            // ---- Minimum games played ----
            if let Some((lo, hi)) = games_bounds {
                ui.strong("Minimum games played (G)");
                let mut value = min_games.unwrap_or(lo);
                if ui.add(egui::Slider::new(&mut value, lo..=hi)).changed() {
                    state.set_min_games(value);
                }
                ui.separator();
            }

            // ---- Teams ----
            match team_options {
                Some(teams) => {
                    let n_selected = teams
                        .iter()
                        .filter(|t| state.criteria.teams.contains(t))
                        .count();
                    let header_text = format!("Teams  ({n_selected}/{})", teams.len());

                    egui::CollapsingHeader::new(RichText::new(header_text).strong())
                        .id_salt("teams")
                        .default_open(true)
                        .show(ui, |ui: &mut Ui| {
                            ui.horizontal(|ui: &mut Ui| {
                                if ui.small_button("All").clicked() {
                                    state.select_all_teams();
                                }
                                if ui.small_button("None").clicked() {
                                    state.select_no_teams();
                                }
                            });

                            for team in &teams {
                                let mut checked = state.criteria.teams.contains(team);
                                if ui.checkbox(&mut checked, team).changed() {
                                    state.toggle_team(team);
                                }
                            }
                        });
                }
                None => {
                    for notice in &notices {
                        ui.label(RichText::new(format!("⚠ {notice}")).color(Color32::YELLOW));
                    }
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data files…").clicked() {
                open_files_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = state.datasets.clone() {
            let visible = state.view().map_or(0, |v| v.table.len());
            ui.label(format!(
                "{} regular season rows, {} playoff rows, {visible} visible",
                ds.regular.len(),
                ds.playoffs.len(),
            ))
            .on_hover_text(format!(
                "{}\n{}",
                state.cache.regular_path().display(),
                state.cache.playoffs_path().display()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::LIGHT_GREEN
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

const SUPPORTED: &[&str] = &["csv", "txt", "json", "parquet", "pq"];

fn pick(title: &str) -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .set_title(title)
        .add_filter("Supported files", SUPPORTED)
        .add_filter("CSV", &["csv", "txt"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file()
}

pub fn open_files_dialog(state: &mut AppState) {
    let Some(regular) = pick("Open regular season data") else {
        return;
    };
    let Some(playoffs) = pick("Open playoffs data") else {
        return;
    };
    state.open_files(regular, playoffs);
}
