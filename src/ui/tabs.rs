use eframe::egui::{self, Color32, RichText, Ui};

use courtview::data::aggregate::{MeanStat, TOP_N_RANGE};
use courtview::data::error::AggregateError;
use courtview::data::export::{ExportFormat, ExportScope};
use courtview::state::AppState;

use super::plot;
use super::table::data_table;

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

pub fn overview(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Overview of the filtered data");

    let Some(stats) = state.overview() else {
        ui.label("No dataset loaded.");
        return;
    };

    ui.horizontal(|ui: &mut Ui| {
        metric(ui, "Rows", &stats.rows.to_string());
        metric(ui, "Unique players", &stats.unique_players.to_string());
        mean_metric(ui, "Mean PTS", stats.mean_points);
        mean_metric(ui, "Mean AST", stats.mean_assists);
    });
    ui.separator();

    export_buttons(ui, state, ExportScope::Filtered, "filtered data");

    ui.label("Full table");
    if let Some(view) = state.view() {
        let max_height = ui.available_height();
        data_table(ui, "filtered_table", &view.table, max_height);
    }
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.group(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label(label);
            ui.label(RichText::new(value).size(22.0).strong());
        });
    });
}

fn mean_metric(ui: &mut Ui, label: &str, stat: MeanStat) {
    match stat {
        MeanStat::ColumnAbsent => {}
        MeanStat::Unavailable => metric(ui, label, "n/a"),
        MeanStat::Value(v) => metric(ui, label, &format!("{v:.2}")),
    }
}

// ---------------------------------------------------------------------------
// Top scorers
// ---------------------------------------------------------------------------

pub fn top_scorers(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Top scorers");

    let mut n = state.top_n;
    if ui
        .add(egui::Slider::new(&mut n, TOP_N_RANGE).text("players shown"))
        .changed()
    {
        state.set_top_n(n);
    }

    match state.top_scorers() {
        None => {
            ui.label("No dataset loaded.");
        }
        Some(Err(e)) => aggregate_message(ui, &e),
        Some(Ok(top)) => {
            plot::top_scorers_chart(ui, &top);
            export_buttons(ui, state, ExportScope::TopScorers, "top scorers");
            let max_height = ui.available_height();
            data_table(ui, "top_scorers_table", &top, max_height);
        }
    }
}

// ---------------------------------------------------------------------------
// Regular season vs playoffs
// ---------------------------------------------------------------------------

pub fn comparison(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🆚 Regular season vs playoffs");

    let players = match state.common_players() {
        None => {
            ui.label("No dataset loaded.");
            return;
        }
        Some(Err(e)) => {
            aggregate_message(ui, &e);
            return;
        }
        Some(Ok(players)) => players,
    };

    let current = state.selected_player.clone().unwrap_or_default();
    egui::ComboBox::from_label("Player")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for player in &players {
                if ui.selectable_label(current == *player, player).clicked() {
                    state.selected_player = Some(player.clone());
                }
            }
        });

    let Some(player) = state.selected_player.clone() else {
        return;
    };

    match state.comparison() {
        None => {}
        Some(Err(e)) => aggregate_message(ui, &e),
        Some(Ok(table)) => {
            ui.label(format!("Average stats for {player}"));
            data_table(ui, "comparison_table", &table, 200.0);
            export_buttons(
                ui,
                state,
                ExportScope::Comparison(player.clone()),
                &format!("comparison for {player}"),
            );

            let pts = table.rows.first().map(|row| {
                (
                    row.get(1).and_then(|c| c.as_f64()),
                    row.get(2).and_then(|c| c.as_f64()),
                )
            });
            if let Some((Some(regular), Some(playoffs))) = pts {
                plot::points_comparison_chart(ui, regular, playoffs);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Shared widgets
// ---------------------------------------------------------------------------

/// Schema gaps and "no data" cases are informational, computation failures are errors.
fn aggregate_message(ui: &mut Ui, e: &AggregateError) {
    match e {
        AggregateError::Computation(_) => {
            ui.label(RichText::new(format!("An error occurred: {e}")).color(Color32::RED));
        }
        _ => {
            ui.label(RichText::new(format!("ℹ {e}")).color(Color32::LIGHT_BLUE));
        }
    }
}

fn export_buttons(ui: &mut Ui, state: &mut AppState, scope: ExportScope, what: &str) {
    ui.horizontal(|ui: &mut Ui| {
        for format in [ExportFormat::Csv, ExportFormat::Xlsx] {
            if ui
                .button(format!("📥 Download {what} ({})", format.label()))
                .clicked()
            {
                save_dialog(state, &scope, format);
            }
        }
    });
}

fn save_dialog(state: &mut AppState, scope: &ExportScope, format: ExportFormat) {
    let file = rfd::FileDialog::new()
        .set_title("Export")
        .set_directory(&state.export_dir)
        .set_file_name(scope.file_name(format))
        .add_filter(format.label(), &[format.ext()])
        .save_file();

    if let Some(path) = file {
        // Failures are reported through the status message.
        let _ = state.export(scope, format, &path);
    }
}
