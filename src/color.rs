use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Model;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: model → Color32
// ---------------------------------------------------------------------------

/// Maps the dataset's model tags to distinct line colours. Rebuilt when a
/// new dataset is loaded.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<Model, Color32>,
}

impl ColorMap {
    /// Build a colour map for the given set of model tags.
    pub fn new(models: &BTreeSet<Model>) -> Self {
        let palette = generate_palette(models.len());
        let mapping: BTreeMap<Model, Color32> = models
            .iter()
            .zip(palette.into_iter())
            .map(|(m, c): (&Model, Color32)| (m.clone(), c))
            .collect();

        ColorMap { mapping }
    }

    /// Look up the colour for a model.
    pub fn color_for(&self, model: &Model) -> Color32 {
        self.mapping.get(model).copied().unwrap_or(Color32::GRAY)
    }
}
