use chrono::{Datelike, NaiveDate};
use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Trend plot (central panel)
// ---------------------------------------------------------------------------

/// Render the price-trend chart: one line per selected model, x = date,
/// y = value. Points are sorted by date per model so lines read left to
/// right even when the source rows are unordered.
pub fn trend_plot(ui: &mut Ui, state: &AppState) {
    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a dataset to view price trends  (File → Open…)");
            });
            return;
        }
    };

    let view = state.view(dataset);
    let title = format!(
        "Price Trend – {} | {}",
        state.postcode.as_deref().unwrap_or("–"),
        state.price_category.as_deref().unwrap_or("–"),
    );
    ui.strong(title);

    Plot::new("trend_plot")
        .legend(Legend::default())
        .x_axis_label("Date")
        .y_axis_label("Price")
        .x_axis_formatter(|mark, _range| format_day_number(mark.value))
        .label_formatter(|name, point| {
            let date = format_day_number(point.x);
            if name.is_empty() {
                format!("{date}\n{:.2}", point.y)
            } else {
                format!("{name}\n{date}\n{:.2}", point.y)
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for model in state.selected_models.iter() {
                let mut series: Vec<(NaiveDate, f64)> = view
                    .rows()
                    .filter(|obs| obs.model == *model)
                    .map(|obs| (obs.date, obs.value))
                    .collect();
                if series.is_empty() {
                    continue;
                }
                series.sort_by_key(|(date, _)| *date);

                let points: PlotPoints = series
                    .iter()
                    .map(|&(date, value)| [date.num_days_from_ce() as f64, value])
                    .collect();

                let line = Line::new(points)
                    .name(model.to_string())
                    .color(state.color_map.color_for(model))
                    .width(1.5);

                plot_ui.line(line);
            }
        });
}

/// Map a day number (days since CE, the plot's x unit) back to an
/// ISO-8601 label for axis ticks and hover text.
fn format_day_number(days: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(days.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
