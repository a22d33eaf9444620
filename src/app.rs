use std::time::Duration;

use eframe::egui;

use courtview::state::{AppState, Tab};

use crate::ui::{panels, tabs};

/// How often the data files are checked for changes on disk.
const DISK_POLL_INTERVAL: Duration = Duration::from_secs(2);

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CourtviewApp {
    pub state: AppState,
    last_disk_poll: f64,
}

impl CourtviewApp {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            last_disk_poll: 0.0,
        }
    }
}

impl eframe::App for CourtviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        if now - self.last_disk_poll >= DISK_POLL_INTERVAL.as_secs_f64() {
            self.last_disk_poll = now;
            self.state.sync_with_disk();
        }
        ctx.request_repaint_after(DISK_POLL_INTERVAL);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tabs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("🏀 NBA stats: regular season & playoffs");
            ui.horizontal(|ui| {
                for tab in Tab::ALL {
                    ui.selectable_value(&mut self.state.tab, tab, tab.label());
                }
            });
            ui.separator();

            match self.state.tab {
                Tab::Overview => tabs::overview(ui, &mut self.state),
                Tab::TopScorers => tabs::top_scorers(ui, &mut self.state),
                Tab::Comparison => tabs::comparison(ui, &mut self.state),
            }
        });
    }
}
