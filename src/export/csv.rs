use crate::data::model::{FilteredView, COLUMNS};

use super::ExportError;

// ---------------------------------------------------------------------------
// CSV encoder
// ---------------------------------------------------------------------------

/// Encode a view as UTF-8 CSV bytes.
///
/// The header is the canonical column order; cells render via
/// [`Observation::display_cells`] (ISO-8601 dates, shortest round-trip
/// decimals, no currency symbol). Rows appear in view order. An empty
/// view yields a header-only file.
///
/// [`Observation::display_cells`]: crate::data::model::Observation::display_cells
pub fn to_csv(view: &FilteredView<'_>) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(COLUMNS)?;
    for obs in view.rows() {
        writer.write_record(obs.display_cells())?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Csv(csv::Error::from(e.into_error())))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::filter::filter;
    use crate::data::model::tests::obs;
    use crate::data::model::{Dataset, FilterCriteria, Model};

    fn everything(dataset: &Dataset) -> FilterCriteria {
        FilterCriteria {
            models: dataset.models.iter().cloned().collect(),
            price_category: "A".to_string(),
            postcode: "SW1".to_string(),
        }
    }

    #[test]
    fn header_matches_canonical_column_order() {
        let ds = Dataset::from_rows(vec![]);
        let view = filter(&ds, &everything(&ds));
        let bytes = to_csv(&view).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "date,Model,Price Category,postcode,Value\n"
        );
    }

    #[test]
    fn rows_render_in_view_order_with_iso_dates() {
        let ds = Dataset::from_rows(vec![
            obs("2024-01-02", Model::Prophet, "A", "SW1", 105.5),
            obs("2024-01-01", Model::Actual, "A", "SW1", 98.0),
        ]);
        let view = filter(&ds, &everything(&ds));
        let text = String::from_utf8(to_csv(&view).unwrap()).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        // view order is dataset order, not date order
        assert_eq!(lines[1], "2024-01-02,Prophet,A,SW1,105.5");
        assert_eq!(lines[2], "2024-01-01,Actual,A,SW1,98");
    }

    #[test]
    fn output_round_trips_through_a_csv_reader() {
        let ds = Dataset::from_rows(vec![
            obs("2024-01-01", Model::Prophet, "A", "SW1", 100.0),
            obs("2024-01-02", Model::Regressor, "A", "SW1", 101.25),
        ]);
        let view = filter(&ds, &everything(&ds));
        let bytes = to_csv(&view).unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let parsed: Vec<crate::data::model::Observation> = reader
            .records()
            .map(|r| {
                let rec = r.unwrap();
                obs(
                    rec.get(0).unwrap(),
                    rec.get(1).unwrap().parse().unwrap(),
                    rec.get(2).unwrap(),
                    rec.get(3).unwrap(),
                    rec.get(4).unwrap().parse().unwrap(),
                )
            })
            .collect();

        let original: Vec<_> = view.rows().cloned().collect();
        assert_eq!(parsed, original);
    }

    #[test]
    fn encoding_is_deterministic() {
        let ds = Dataset::from_rows(vec![obs("2024-01-01", Model::Actual, "A", "SW1", 99.0)]);
        let view = filter(&ds, &everything(&ds));
        assert_eq!(to_csv(&view).unwrap(), to_csv(&view).unwrap());
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let ds = Dataset::from_rows(vec![obs(
            "2024-01-01",
            Model::Actual,
            "Flats, purpose-built",
            "SW1",
            99.0,
        )]);
        let criteria = FilterCriteria {
            models: BTreeSet::from([Model::Actual]),
            price_category: "Flats, purpose-built".to_string(),
            postcode: "SW1".to_string(),
        };
        let view = filter(&ds, &criteria);
        let text = String::from_utf8(to_csv(&view).unwrap()).unwrap();
        assert!(text.contains("\"Flats, purpose-built\""));
    }
}
