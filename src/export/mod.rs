/// Export layer: pure encoders from a [`FilteredView`] to downloadable
/// bytes. Both encoders are deterministic: identical views produce
/// byte-identical output, with no timestamps or generated ids embedded.
///
/// [`FilteredView`]: crate::data::model::FilteredView
pub mod csv;
pub mod pdf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("PDF encoding failed: {0}")]
    Pdf(#[from] lopdf::Error),
}

/// Download name for a CSV export of the given postcode's view.
pub fn csv_filename(postcode: &str) -> String {
    format!("filtered_data_{postcode}.csv")
}

/// Download name for a PDF export of the given postcode's view.
pub fn pdf_filename(postcode: &str) -> String {
    format!("filtered_data_{postcode}.pdf")
}
