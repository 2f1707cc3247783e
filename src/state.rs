use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::filter::filter;
use crate::data::model::{Dataset, FilterCriteria, FilteredView, Model, CANONICAL_MODELS};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. The dataset is the shared
/// read-only table from the cache; selections and the cached view indices
/// are this session's alone.
pub struct AppState {
    /// Loaded dataset (None until a source has been opened).
    pub dataset: Option<Arc<Dataset>>,

    /// Where the dataset was loaded from; used for cache invalidation.
    pub source_path: Option<PathBuf>,

    /// Currently selected models.
    pub selected_models: BTreeSet<Model>,

    /// Currently selected price category (None only before a load).
    pub price_category: Option<String>,

    /// Currently selected postcode (None only before a load).
    pub postcode: Option<String>,

    /// Indices of rows passing the current criteria (cached per interaction).
    pub visible_indices: Vec<usize>,

    /// Line colour per model.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            source_path: None,
            selected_models: BTreeSet::new(),
            price_category: None,
            postcode: None,
            visible_indices: Vec::new(),
            color_map: ColorMap::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset and reset selections to their
    /// defaults: all canonical models present in the data, plus the first
    /// category and postcode.
    pub fn set_dataset(&mut self, path: PathBuf, dataset: Arc<Dataset>) {
        self.selected_models = CANONICAL_MODELS
            .iter()
            .filter(|m| dataset.models.contains(*m))
            .cloned()
            .collect();
        self.price_category = dataset.price_categories.iter().next().cloned();
        self.postcode = dataset.postcodes.iter().next().cloned();
        self.color_map = ColorMap::new(&dataset.models);

        self.dataset = Some(dataset);
        self.source_path = Some(path);
        self.status_message = None;
        self.refilter();
    }

    /// The criteria for the current selections.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            models: self.selected_models.clone(),
            price_category: self.price_category.clone().unwrap_or_default(),
            postcode: self.postcode.clone().unwrap_or_default(),
        }
    }

    /// Recompute `visible_indices` after a selection change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filter(ds, &self.criteria()).into_indices();
        } else {
            self.visible_indices.clear();
        }
    }

    /// The current view, rebuilt from the cached indices.
    pub fn view<'a>(&self, dataset: &'a Dataset) -> FilteredView<'a> {
        FilteredView::from_indices(dataset, self.visible_indices.clone())
    }

    /// Toggle one model in the selection.
    pub fn toggle_model(&mut self, model: &Model) {
        if !self.selected_models.remove(model) {
            self.selected_models.insert(model.clone());
        }
        self.refilter();
    }

    /// Switch the price category.
    pub fn set_price_category(&mut self, category: String) {
        self.price_category = Some(category);
        self.refilter();
    }

    /// Switch the postcode.
    pub fn set_postcode(&mut self, postcode: String) {
        self.postcode = Some(postcode);
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::obs;

    fn demo_dataset() -> Arc<Dataset> {
        Arc::new(Dataset::from_rows(vec![
            obs("2024-01-01", Model::Prophet, "A", "SW1", 100.0),
            obs("2024-01-02", Model::Actual, "A", "SW1", 98.0),
            obs("2024-01-03", Model::Other("Ensemble".into()), "A", "SW1", 97.0),
            obs("2024-01-01", Model::Actual, "B", "E2", 50.0),
        ]))
    }

    #[test]
    fn defaults_select_canonical_models_and_first_values() {
        let mut state = AppState::default();
        state.set_dataset(PathBuf::from("demo.csv"), demo_dataset());

        // canonical models only; the opaque tag is not selected by default
        assert!(state.selected_models.contains(&Model::Actual));
        assert!(state.selected_models.contains(&Model::Prophet));
        assert!(!state.selected_models.contains(&Model::Other("Ensemble".into())));
        // Regressor has no rows in this dataset, so it is not offered
        assert!(!state.selected_models.contains(&Model::Regressor));

        assert_eq!(state.price_category.as_deref(), Some("A"));
        // first postcode in sorted order
        assert_eq!(state.postcode.as_deref(), Some("E2"));
    }

    #[test]
    fn toggling_a_model_refilters() {
        let mut state = AppState::default();
        state.set_dataset(PathBuf::from("demo.csv"), demo_dataset());
        state.set_postcode("SW1".to_string());
        assert_eq!(state.visible_indices, vec![0, 1]);

        state.toggle_model(&Model::Prophet);
        assert_eq!(state.visible_indices, vec![1]);

        state.toggle_model(&Model::Prophet);
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    #[test]
    fn deselecting_everything_yields_an_empty_view() {
        let mut state = AppState::default();
        state.set_dataset(PathBuf::from("demo.csv"), demo_dataset());
        state.set_postcode("SW1".to_string());
        for model in CANONICAL_MODELS {
            state.selected_models.remove(&model);
        }
        state.refilter();
        assert!(state.visible_indices.is_empty());
    }
}
