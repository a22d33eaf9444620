use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use courtview::data::aggregate::{PLAYOFFS_COLUMN, REGULAR_COLUMN};
use courtview::data::model::{Source, Table};

use crate::color::{generate_palette, source_color};

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Top scorers bar chart
// ---------------------------------------------------------------------------

/// One bar per player, best scorer first. Hover a bar for the player name.
pub fn top_scorers_chart(ui: &mut Ui, top: &Table) {
    let palette = generate_palette(top.len());
    let bars: Vec<Bar> = top
        .rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| {
            let value = row.get(1)?.as_f64()?;
            let name = row.first()?.to_string();
            Some(Bar::new(i as f64, value).name(name).fill(palette[i]))
        })
        .collect();

    Plot::new("top_scorers_plot")
        .height(CHART_HEIGHT)
        .y_axis_label("Mean PTS")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).width(0.7));
        });
}

// ---------------------------------------------------------------------------
// Regular season vs playoffs PTS chart
// ---------------------------------------------------------------------------

/// Two bars comparing mean PTS. Drawn only when both values exist.
pub fn points_comparison_chart(ui: &mut Ui, regular_pts: f64, playoffs_pts: f64) {
    let regular = BarChart::new(vec![Bar::new(0.0, regular_pts).name(REGULAR_COLUMN)])
        .name(REGULAR_COLUMN)
        .color(source_color(Source::RegularSeason))
        .width(0.6);
    let playoffs = BarChart::new(vec![Bar::new(1.0, playoffs_pts).name(PLAYOFFS_COLUMN)])
        .name(PLAYOFFS_COLUMN)
        .color(source_color(Source::Playoffs))
        .width(0.6);

    Plot::new("pts_comparison_plot")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .y_axis_label("Mean PTS")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(regular);
            plot_ui.bar_chart(playoffs);
        });
}
