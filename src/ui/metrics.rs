use eframe::egui::{RichText, Ui};

use crate::data::latest::latest_value;
use crate::data::model::CANONICAL_MODELS;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Latest-value metric cards (bottom panel)
// ---------------------------------------------------------------------------

/// Render one card per canonical model with the latest value in the
/// current view. A model with no rows in the selection shows "n/a"
/// instead of a number.
pub fn metrics_bar(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let view = state.view(dataset);
    let postcode = state.postcode.as_deref().unwrap_or("–");

    ui.add_space(4.0);
    ui.strong(format!("Latest price metrics for {postcode}"));
    ui.add_space(2.0);

    ui.columns(CANONICAL_MODELS.len(), |columns| {
        for (column, model) in columns.iter_mut().zip(CANONICAL_MODELS.iter()) {
            let label = match model {
                crate::data::model::Model::Actual => "Actual Price",
                crate::data::model::Model::Prophet => "Prophet Forecast",
                _ => "Regressor Forecast",
            };
            let value_text = match latest_value(&view, model) {
                Ok(value) => format!("£{value:.2}"),
                Err(e) => {
                    log::debug!("metric unavailable: {e}");
                    "n/a".to_string()
                }
            };

            column.group(|ui: &mut Ui| {
                ui.vertical_centered(|ui: &mut Ui| {
                    ui.label(label);
                    ui.label(
                        RichText::new(value_text)
                            .size(20.0)
                            .strong()
                            .color(state.color_map.color_for(model)),
                    );
                });
            });
        }
    });
    ui.add_space(4.0);
}
