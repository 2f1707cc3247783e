use super::model::{Dataset, FilterCriteria, FilteredView};

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Return the subset of dataset rows matching the criteria.
///
/// A row is included iff all three conditions hold:
/// * its model is in `criteria.models`
/// * its price category equals `criteria.price_category`
/// * its postcode equals `criteria.postcode`
///
/// Comparison is exact equality; an empty model set or an unknown
/// category/postcode simply yields an empty view. Pure and deterministic;
/// row order in the view is dataset order.
pub fn filter<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> FilteredView<'a> {
    let indices = dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, obs)| {
            criteria.models.contains(&obs.model)
                && obs.price_category == criteria.price_category
                && obs.postcode == criteria.postcode
        })
        .map(|(i, _)| i)
        .collect();

    FilteredView::from_indices(dataset, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::obs;
    use crate::data::model::Model;

    fn sample_dataset() -> Dataset {
        Dataset::from_rows(vec![
            obs("2024-01-01", Model::Prophet, "A", "SW1", 100.0),
            obs("2024-01-02", Model::Prophet, "A", "SW1", 105.0),
            obs("2024-01-01", Model::Actual, "A", "SW1", 98.0),
            obs("2024-01-01", Model::Actual, "B", "SW1", 300.0),
            obs("2024-01-01", Model::Actual, "A", "E2", 200.0),
            obs("2024-01-03", Model::Regressor, "A", "SW1", 103.0),
        ])
    }

    fn criteria(models: &[Model], category: &str, postcode: &str) -> FilterCriteria {
        FilterCriteria {
            models: models.iter().cloned().collect(),
            price_category: category.to_string(),
            postcode: postcode.to_string(),
        }
    }

    #[test]
    fn every_matching_row_is_included_exactly_once() {
        let ds = sample_dataset();
        let c = criteria(&[Model::Prophet, Model::Actual], "A", "SW1");
        let view = filter(&ds, &c);

        // soundness: each output row satisfies all three conditions
        for obs in view.rows() {
            assert!(c.models.contains(&obs.model));
            assert_eq!(obs.price_category, c.price_category);
            assert_eq!(obs.postcode, c.postcode);
        }

        // completeness: exactly the three matching dataset rows appear
        assert_eq!(view.len(), 3);
        let values: Vec<f64> = view.rows().map(|o| o.value).collect();
        assert_eq!(values, vec![100.0, 105.0, 98.0]);
    }

    #[test]
    fn empty_model_selection_yields_empty_view() {
        let ds = sample_dataset();
        let view = filter(&ds, &criteria(&[], "A", "SW1"));
        assert!(view.is_empty());
    }

    #[test]
    fn unknown_category_or_postcode_yields_empty_view() {
        let ds = sample_dataset();
        assert!(filter(&ds, &criteria(&[Model::Actual], "Z", "SW1")).is_empty());
        assert!(filter(&ds, &criteria(&[Model::Actual], "A", "XX9")).is_empty());
    }

    #[test]
    fn conditions_are_conjunctive() {
        let ds = sample_dataset();
        // Actual rows exist for category B and for postcode E2, but only the
        // (A, SW1) one may pass.
        let view = filter(&ds, &criteria(&[Model::Actual], "A", "SW1"));
        assert_eq!(view.len(), 1);
        assert_eq!(view.rows().next().unwrap().value, 98.0);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let ds = sample_dataset();
        assert!(filter(&ds, &criteria(&[Model::Actual], "a", "SW1")).is_empty());
        assert!(filter(&ds, &criteria(&[Model::Actual], "A", "sw1")).is_empty());
    }
}
