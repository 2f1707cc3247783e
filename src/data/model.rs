use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Model – which series an observation belongs to
// ---------------------------------------------------------------------------

/// The model that produced an observation. The three canonical tags are
/// recognised; anything else passes through as an opaque string so loading
/// never rejects a row, it just won't match a canonical filter default.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Model {
    Actual,
    Prophet,
    Regressor,
    Other(String),
}

/// The canonical models, in metric-card display order.
pub const CANONICAL_MODELS: [Model; 3] = [Model::Actual, Model::Prophet, Model::Regressor];

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        match s {
            "Actual" => Model::Actual,
            "Prophet" => Model::Prophet,
            "Regressor" => Model::Regressor,
            other => Model::Other(other.to_string()),
        }
    }
}

impl FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Model::from(s))
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Actual => write!(f, "Actual"),
            Model::Prophet => write!(f, "Prophet"),
            Model::Regressor => write!(f, "Regressor"),
            Model::Other(s) => write!(f, "{s}"),
        }
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from(s.as_str()))
    }
}

// ---------------------------------------------------------------------------
// Observation – one row of the dataset
// ---------------------------------------------------------------------------

/// A single price observation (one row of the source table). The date has
/// already been shifted by the loader's fixed offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub model: Model,
    pub price_category: String,
    pub postcode: String,
    pub value: f64,
}

/// Canonical column order of the source table, used verbatim by the
/// loader's schema check and by both export encoders.
pub const COLUMNS: [&str; 5] = ["date", "Model", "Price Category", "postcode", "Value"];

impl Observation {
    /// The row as display strings, in canonical column order. Dates render
    /// as ISO-8601; values use Rust's shortest round-trip float form
    /// (`98`, not `98.0`), with no currency symbol. The data table and
    /// both export encoders share this rendering so a row always reads
    /// the same on screen, in CSV, and in PDF.
    pub fn display_cells(&self) -> [String; 5] {
        [
            self.date.format("%Y-%m-%d").to_string(),
            self.model.to_string(),
            self.price_category.clone(),
            self.postcode.clone(),
            self.value.to_string(),
        ]
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed unique-value indices for the
/// three filterable columns. Built once by the loader, read-only thereafter.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All observations (rows), in source order.
    pub rows: Vec<Observation>,
    /// Sorted set of distinct model tags.
    pub models: BTreeSet<Model>,
    /// Sorted set of distinct price categories.
    pub price_categories: BTreeSet<String>,
    /// Sorted set of distinct postcodes.
    pub postcodes: BTreeSet<String>,
}

impl Dataset {
    /// Build the unique-value indices from the loaded rows.
    pub fn from_rows(rows: Vec<Observation>) -> Self {
        let mut models = BTreeSet::new();
        let mut price_categories = BTreeSet::new();
        let mut postcodes = BTreeSet::new();

        for obs in &rows {
            models.insert(obs.model.clone());
            price_categories.insert(obs.price_category.clone());
            postcodes.insert(obs.postcode.clone());
        }

        Dataset {
            rows,
            models,
            price_categories,
            postcodes,
        }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// FilterCriteria – one interaction's worth of selections
// ---------------------------------------------------------------------------

/// The user's current selections. Rebuilt fresh on every interaction,
/// never persisted.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Selected models. Empty set is legal and selects nothing.
    pub models: BTreeSet<Model>,
    pub price_category: String,
    pub postcode: String,
}

// ---------------------------------------------------------------------------
// FilteredView – the matching subset, borrowed from the dataset
// ---------------------------------------------------------------------------

/// The subset of dataset rows matching one set of criteria. Holds indices
/// into the dataset rather than cloned rows; iteration preserves dataset
/// order (post-filter, not re-sorted).
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// Rebuild a view from previously computed indices (e.g. the ones the
    /// UI caches between interactions). Indices must come from `filter` on
    /// the same dataset.
    pub fn from_indices(dataset: &'a Dataset, indices: Vec<usize>) -> Self {
        debug_assert!(indices.iter().all(|&i| i < dataset.len()));
        FilteredView { dataset, indices }
    }

    /// Iterate the matching rows in view order.
    pub fn rows(&self) -> impl Iterator<Item = &'a Observation> + '_ {
        let dataset = self.dataset;
        self.indices.iter().map(move |&i| &dataset.rows[i])
    }

    /// Number of matching rows.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the view matched nothing.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Give up the view, keeping only the indices.
    pub fn into_indices(self) -> Vec<usize> {
        self.indices
    }
}
