use std::collections::HashMap;

use eframe::egui::{Pos2, Rect, Vec2};

use super::layout::compute_draw_model;

#[derive(Clone, Debug)]
pub struct SeriesDatum {
    pub id: String,
    pub label: String,
    pub short_label: String,
    pub value: f64,
    pub display_value: f64,
    pub error_value: f64,
    pub error_message: Option<String>,
    pub chords: Vec<f64>,
}

impl SeriesDatum {
    pub fn usable(&self) -> bool {
        self.error_message.is_none()
    }
}

#[derive(Clone, Debug)]
pub struct RawModel {
    pub series: Vec<SeriesDatum>,
    pub index_by_id: HashMap<String, usize>,
    pub revision: u64,
}

impl RawModel {
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    /// Every correlation row must have one entry per series, and the id map
    /// must agree with list order. Violations mean the series list changed
    /// without an atomic rebuild of all rows.
    pub fn is_coherent(&self) -> bool {
        let count = self.series.len();
        if self.index_by_id.len() != count {
            return false;
        }

        self.series.iter().enumerate().all(|(index, datum)| {
            datum.chords.len() == count && self.index_by_id.get(&datum.id) == Some(&index)
        })
    }

    pub fn chord_value(&self, a: usize, b: usize) -> f64 {
        self.series
            .get(a)
            .and_then(|datum| datum.chords.get(b))
            .copied()
            .unwrap_or(0.0)
    }
}

#[derive(Clone, Debug)]
pub struct DrawNode {
    pub series_index: usize,
    pub position: Pos2,
    pub label_rect: Rect,
    pub radius: f32,
    pub value_fraction: f32,
    pub error_fraction: f32,
}

#[derive(Clone, Debug)]
pub struct DrawModel {
    pub nodes: Vec<DrawNode>,
    pub max_chord_magnitude: f64,
    pub viewport: Vec2,
}

impl DrawModel {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

pub struct DrawModelCache {
    model: Option<DrawModel>,
    revision: u64,
    viewport: Vec2,
    dirty: bool,
}

impl DrawModelCache {
    pub fn new() -> Self {
        Self {
            model: None,
            revision: 0,
            viewport: Vec2::ZERO,
            dirty: true,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn clear(&mut self) {
        self.model = None;
        self.dirty = true;
    }

    /// Recomputes the draw model only when the raw-model revision, the
    /// viewport, or the dirty flag changed; otherwise this is a comparison.
    pub fn ensure(&mut self, raw: &RawModel, viewport: Vec2) -> &DrawModel {
        let stale = self.dirty
            || self.model.is_none()
            || self.revision != raw.revision
            || self.viewport != viewport;

        if stale {
            debug_assert!(raw.is_coherent(), "raw model rows out of sync with series list");
            self.model = Some(compute_draw_model(raw, viewport));
            self.revision = raw.revision;
            self.viewport = viewport;
            self.dirty = false;
        }

        self.model.as_ref().expect("draw model computed above")
    }

    pub fn model(&self) -> Option<&DrawModel> {
        self.model.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::vec2;

    fn datum(id: &str, value: f64, chords: Vec<f64>) -> SeriesDatum {
        SeriesDatum {
            id: id.to_owned(),
            label: id.to_owned(),
            short_label: id.to_owned(),
            value,
            display_value: value,
            error_value: 0.0,
            error_message: None,
            chords,
        }
    }

    fn raw_model(revision: u64) -> RawModel {
        let series = vec![
            datum("a", 0.6, vec![0.0, 0.8]),
            datum("b", 0.4, vec![0.8, 0.0]),
        ];
        let index_by_id = series
            .iter()
            .enumerate()
            .map(|(index, datum)| (datum.id.clone(), index))
            .collect();
        RawModel {
            series,
            index_by_id,
            revision,
        }
    }

    #[test]
    fn coherence_check_detects_unrebuilt_rows() {
        let mut raw = raw_model(1);
        assert!(raw.is_coherent());

        // A third series appended without recomputing any rows must trip the
        // invariant rather than silently misindex every chord.
        raw.series.push(datum("c", 0.2, vec![0.0, 0.0, 0.0]));
        raw.index_by_id.insert("c".to_owned(), 2);
        assert!(!raw.is_coherent());
    }

    #[test]
    fn coherence_check_detects_reordered_series() {
        let mut raw = raw_model(1);
        raw.series.swap(0, 1);
        assert!(!raw.is_coherent());
    }

    #[test]
    fn cache_recomputes_only_on_change() {
        let raw = raw_model(1);
        let viewport = vec2(400.0, 400.0);
        let mut cache = DrawModelCache::new();

        let first = cache.ensure(&raw, viewport).nodes.clone();
        let again = cache.ensure(&raw, viewport);
        assert_eq!(first.len(), again.nodes.len());

        // Unchanged inputs keep the same snapshot object alive.
        let before = cache.model().map(|model| model.nodes.len());
        cache.ensure(&raw, viewport);
        assert_eq!(before, cache.model().map(|model| model.nodes.len()));

        // A viewport change invalidates the snapshot.
        let resized = cache.ensure(&raw, vec2(200.0, 200.0));
        assert_eq!(resized.viewport, vec2(200.0, 200.0));

        // A revision bump invalidates it as well.
        let raw = raw_model(2);
        let rebuilt = cache.ensure(&raw, vec2(200.0, 200.0));
        assert_eq!(rebuilt.nodes.len(), 2);
    }

    #[test]
    fn dirty_flag_forces_recompute() {
        let raw = raw_model(1);
        let viewport = vec2(400.0, 400.0);
        let mut cache = DrawModelCache::new();

        cache.ensure(&raw, viewport);
        cache.mark_dirty();
        let model = cache.ensure(&raw, viewport);
        assert_eq!(model.nodes.len(), 2);
    }
}
