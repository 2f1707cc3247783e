use thiserror::Error;

use super::model::{FilteredView, Model};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetricError {
    /// The view holds no rows for the requested model. Recoverable: the UI
    /// shows a placeholder metric instead of a value.
    #[error("no data for model '{0}' in the current selection")]
    NoDataForModel(Model),
}

// ---------------------------------------------------------------------------
// Latest-value resolver
// ---------------------------------------------------------------------------

/// Value of the chronologically last row for `model` within the view.
///
/// Equivalent to a stable ascending sort by date followed by taking the
/// last row: when several rows share the maximum date, the last one in
/// view order wins. The source should not contain duplicate (model, date)
/// pairs, but the resolver stays deterministic if it does.
pub fn latest_value(view: &FilteredView<'_>, model: &Model) -> Result<f64, MetricError> {
    let mut latest: Option<(chrono::NaiveDate, f64)> = None;

    for obs in view.rows().filter(|o| o.model == *model) {
        match latest {
            // `>=` keeps the later-encountered row on a date tie, matching
            // the stable-sort contract.
            Some((date, _)) if obs.date < date => {}
            _ => latest = Some((obs.date, obs.value)),
        }
    }

    latest
        .map(|(_, value)| value)
        .ok_or_else(|| MetricError::NoDataForModel(model.clone()))
}
