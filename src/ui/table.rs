use eframe::egui::{self, Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Transactions table (central panel)
// ---------------------------------------------------------------------------

/// Render the visible rows, newest first, one column per base-table column.
pub fn transactions_table(ui: &mut Ui, state: &AppState) {
    if state.visible_indices.is_empty() {
        let message = if state.dataset.table.is_empty() {
            "No transactions loaded  (File → Open data folder…)"
        } else {
            "No transactions match the selected filters"
        };
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(message);
        });
        return;
    }

    let columns = &state.dataset.table.column_names;

    egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .columns(Column::auto().at_least(70.0), columns.len())
            .header(20.0, |mut header| {
                for name in columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, state.visible_indices.len(), |mut row| {
                    let Some(record) = state.visible_record(row.index()) else {
                        return;
                    };
                    for name in columns {
                        row.col(|ui: &mut Ui| {
                            ui.label(record.cell(name));
                        });
                    }
                });
            });
    });
}
