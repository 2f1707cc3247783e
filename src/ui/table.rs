use eframe::egui::{self, ScrollArea, Ui};

use crate::data::model::COLUMNS;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Filtered-data table (collapsible, below the chart)
// ---------------------------------------------------------------------------

/// Render the current view as an inspectable table. Collapsed by default;
/// cells come from the same rendering the export encoders use, so what
/// the user inspects here is exactly what a download will contain.
pub fn data_table(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let view = state.view(dataset);

    let header = format!("View filtered data  ({} rows)", view.len());
    egui::CollapsingHeader::new(header)
        .id_salt("filtered_data_table")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if view.is_empty() {
                ui.label("No observations match the current selection.");
                return;
            }

            ScrollArea::vertical()
                .max_height(240.0)
                .auto_shrink([false, true])
                .show(ui, |ui: &mut Ui| {
                    egui::Grid::new("filtered_data_grid")
                        .striped(true)
                        .min_col_width(70.0)
                        .show(ui, |ui: &mut Ui| {
                            for column in COLUMNS {
                                ui.strong(column);
                            }
                            ui.end_row();

                            for obs in view.rows() {
                                for cell in obs.display_cells() {
                                    ui.label(cell);
                                }
                                ui.end_row();
                            }
                        });
                });
        });
}
