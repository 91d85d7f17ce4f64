use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::loader::{load_dataset, DataPaths};
use crate::state::AppState;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

fn month_label(month: &u32) -> String {
    MONTH_NAMES
        .get((*month as usize).wrapping_sub(1))
        .map(|name| name.to_string())
        .unwrap_or_else(|| month.to_string())
}

// ---------------------------------------------------------------------------
// Side panel – filter pickers
// ---------------------------------------------------------------------------

/// Render the filter panel: one picker per dimension, "All" meaning unset.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Hold our own handle so the lists stay borrowed while `state` changes.
    let dataset = Arc::clone(&state.dataset);
    let candidates = &dataset.candidates;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if let Some(zip) = picker(
                ui,
                "Zip code",
                state.selection.zip.as_ref(),
                &candidates.zip_codes,
                |z| z.to_string(),
            ) {
                state.set_zip(zip);
            }
            ui.add_space(6.0);

            if let Some(month) = picker(
                ui,
                "Month",
                state.selection.month.as_ref(),
                &candidates.months,
                month_label,
            ) {
                state.set_month(month);
            }
            ui.add_space(6.0);

            if let Some(year) = picker(
                ui,
                "Year",
                state.selection.year.as_ref(),
                &candidates.years,
                |y| y.to_string(),
            ) {
                state.set_year(year);
            }
            ui.add_space(6.0);

            ui.add_enabled_ui(!state.selection.is_unset(), |ui: &mut Ui| {
                if ui.button("Clear filters").clicked() {
                    state.clear_filters();
                }
            });
        });
}

/// A combo box over `values` plus an "All" entry. Returns the new value when
/// the user picks something different.
fn picker<T: PartialEq + Clone>(
    ui: &mut Ui,
    label: &str,
    current: Option<&T>,
    values: &[T],
    format: impl Fn(&T) -> String,
) -> Option<Option<T>> {
    let mut picked = None;
    ui.strong(label);
    let selected_text = current.map(&format).unwrap_or_else(|| "All".to_string());

    egui::ComboBox::from_id_salt(label)
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_none(), "All").clicked() {
                picked = Some(None);
            }
            for value in values {
                if ui
                    .selectable_label(current == Some(value), format(value))
                    .clicked()
                {
                    picked = Some(Some(value.clone()));
                }
            }
        });

    picked.filter(|p: &Option<T>| p.as_ref() != current)
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} transactions loaded, {} shown",
            state.dataset.table.len(),
            state.visible_indices.len()
        ));

        ui.separator();
        ui.label(state.source_label()).on_hover_text(format!(
            "{}\n{}",
            state.source.customers.display(),
            state.source.transactions.display()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

/// Pick a folder holding `cleaned_customer.csv` and `cleaned_credit.csv` and
/// rebuild the dataset from it. On failure the current dataset stays.
pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open transaction data folder")
        .pick_folder();

    if let Some(dir) = folder {
        let paths = DataPaths::from_dir(&dir);
        match load_dataset(&paths) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} transactions from {}",
                    dataset.table.len(),
                    dir.display()
                );
                state.set_dataset(dataset, paths);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", dir.display());
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
