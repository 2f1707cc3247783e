use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::{cache, model::FilteredView};
use crate::export;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: model checkboxes plus price-category and
/// postcode selectors.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds.clone(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Model multi-select ----
            ui.strong("Models");
            for model in dataset.models.iter() {
                let mut checked = state.selected_models.contains(model);
                let text = RichText::new(model.to_string())
                    .color(state.color_map.color_for(model));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_model(model);
                }
            }
            ui.separator();

            // ---- Price category selector ----
            ui.strong("Price category");
            let current_category = state.price_category.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("price_category")
                .selected_text(&current_category)
                .show_ui(ui, |ui: &mut Ui| {
                    for category in dataset.price_categories.iter() {
                        if ui
                            .selectable_label(current_category == *category, category)
                            .clicked()
                        {
                            state.set_price_category(category.clone());
                        }
                    }
                });
            ui.separator();

            // ---- Postcode selector ----
            ui.strong("Postcode");
            let current_postcode = state.postcode.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("postcode")
                .selected_text(&current_postcode)
                .show_ui(ui, |ui: &mut Ui| {
                    for postcode in dataset.postcodes.iter() {
                        if ui
                            .selectable_label(current_postcode == *postcode, postcode)
                            .clicked()
                        {
                            state.set_postcode(postcode.clone());
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar: open, reload, export, row counts.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                reload(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if ui.button("Export CSV").clicked() {
            export_csv(state);
        }
        if ui.button("Export PDF").clicked() {
            export_pdf(state);
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} observations loaded, {} in view",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs and export actions
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open price dataset")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        load_into_state(state, &path);
    }
}

pub fn load_into_state(state: &mut AppState, path: &Path) {
    match cache::load_cached(path) {
        Ok(dataset) => {
            log::info!(
                "loaded {} observations across {} postcodes",
                dataset.len(),
                dataset.postcodes.len()
            );
            state.set_dataset(path.to_path_buf(), dataset);
        }
        Err(e) => {
            log::error!("failed to load dataset: {e}");
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}

/// Invalidate the cache entry for the current source and load it again.
fn reload(state: &mut AppState) {
    if let Some(path) = state.source_path.clone() {
        cache::invalidate(&path);
        load_into_state(state, &path);
    }
}

fn export_csv(state: &mut AppState) {
    export_with(state, "CSV", export::csv_filename, |view| {
        export::csv::to_csv(view).map_err(|e| e.to_string())
    });
}

fn export_pdf(state: &mut AppState) {
    export_with(state, "PDF", export::pdf_filename, |view| {
        export::pdf::to_pdf(view).map_err(|e| e.to_string())
    });
}

/// Shared save-dialog plumbing for both encoders. An empty view still
/// exports (header-only output); only a missing dataset blocks the action.
fn export_with(
    state: &mut AppState,
    kind: &str,
    default_name: fn(&str) -> String,
    encode: impl Fn(&FilteredView<'_>) -> Result<Vec<u8>, String>,
) {
    let Some(dataset) = state.dataset.clone() else {
        state.status_message = Some("Nothing to export: no dataset loaded".to_string());
        return;
    };
    let postcode = state.postcode.clone().unwrap_or_default();

    let Some(path) = rfd::FileDialog::new()
        .set_title(&format!("Export filtered data as {kind}"))
        .set_file_name(&default_name(&postcode))
        .save_file()
    else {
        return;
    };

    let view = state.view(&dataset);
    let result = encode(&view).and_then(|bytes| {
        std::fs::write(&path, bytes).map_err(|e| e.to_string())
    });

    match result {
        Ok(()) => {
            log::info!("exported {} rows to {}", view.len(), path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("{kind} export failed: {e}");
            state.status_message = Some(format!("{kind} export failed: {e}"));
        }
    }
}
