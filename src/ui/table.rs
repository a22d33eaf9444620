use eframe::egui::{Align, Layout, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use courtview::data::model::{CellValue, Table};

const ROW_HEIGHT: f32 = 18.0;

/// Render a data table with a sticky header. `id` keeps scroll state apart
/// when several tables are on screen.
pub fn data_table(ui: &mut Ui, id: &str, table: &Table, max_height: f32) {
    if table.columns.is_empty() {
        return;
    }

    ui.push_id(id, |ui: &mut Ui| {
        ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .max_scroll_height(max_height)
                .cell_layout(Layout::left_to_right(Align::Center))
                .columns(Column::auto().at_least(60.0), table.columns.len())
                .header(ROW_HEIGHT + 2.0, |mut header| {
                    for name in &table.columns {
                        header.col(|ui: &mut Ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, table.len(), |mut row| {
                        let cells = &table.rows[row.index()];
                        for cell in cells {
                            row.col(|ui: &mut Ui| {
                                if matches!(cell, CellValue::Integer(_) | CellValue::Float(_)) {
                                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                        ui.label(cell.to_string());
                                    });
                                } else {
                                    ui.label(cell.to_string());
                                }
                            });
                        }
                    });
                });
        });
    });
}
