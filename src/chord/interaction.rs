use eframe::egui::Pos2;

use super::layout::MAX_CHORD_WIDTH;
use super::model::{DrawModel, RawModel};
use super::policy::{ThresholdConfig, chord_stroke_width};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Move(Pos2),
    Up(Pos2),
    Leave,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorHint {
    #[default]
    Default,
    Pointer,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionOutcome {
    pub redraw: bool,
    pub chord_clicked: Option<(String, String)>,
    pub cursor: CursorHint,
}

/// Hover and selection are independent axes: a node can stay selected while
/// another node or a chord is hovered. All indices refer to the draw-model
/// node list, which shares its order with the raw series list.
#[derive(Clone, Debug, Default)]
pub struct InteractionState {
    hover_node: Option<usize>,
    hover_chord: Option<(usize, usize)>,
    selected: Option<usize>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hover_node(&self) -> Option<usize> {
        self.hover_node
    }

    pub fn hover_chord(&self) -> Option<(usize, usize)> {
        self.hover_chord
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Selection driven from outside the canvas (ranking rows, detail links).
    /// Returns whether the state actually changed.
    pub fn select(&mut self, index: Option<usize>) -> bool {
        if self.selected == index {
            return false;
        }
        self.selected = index;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn handle_event(
        &mut self,
        event: PointerEvent,
        raw: &RawModel,
        model: &DrawModel,
        config: &ThresholdConfig,
    ) -> InteractionOutcome {
        let mut outcome = InteractionOutcome::default();

        match event {
            PointerEvent::Move(point) => {
                if let Some(index) = node_at(model, point) {
                    // A node under the pointer suppresses chord hit-testing.
                    if self.hover_node != Some(index) {
                        self.hover_node = Some(index);
                        outcome.redraw = true;
                    }
                    if self.hover_chord.take().is_some() {
                        outcome.redraw = true;
                    }
                } else {
                    if self.hover_node.take().is_some() {
                        outcome.redraw = true;
                    }
                    let chord = chord_at(raw, model, config, point);
                    if self.hover_chord != chord {
                        self.hover_chord = chord;
                        outcome.redraw = true;
                    }
                }

                if self.hover_chord.is_some() {
                    outcome.cursor = CursorHint::Pointer;
                }
            }
            PointerEvent::Up(point) => {
                if let Some(index) = node_at(model, point) {
                    if self.selected != Some(index) {
                        self.selected = Some(index);
                        outcome.redraw = true;
                    }
                } else if let Some((a, b)) = chord_at(raw, model, config, point) {
                    let first = model.nodes[a].series_index;
                    let second = model.nodes[b].series_index;
                    outcome.chord_clicked = Some((
                        raw.series[first].id.clone(),
                        raw.series[second].id.clone(),
                    ));
                } else if self.selected.take().is_some() {
                    outcome.redraw = true;
                }

                // Clicking never leaves a highlighted-but-unselected chord.
                if self.hover_chord.take().is_some() {
                    outcome.redraw = true;
                }
            }
            PointerEvent::Leave => {
                if self.hover_node.take().is_some() {
                    outcome.redraw = true;
                }
                if self.hover_chord.take().is_some() {
                    outcome.redraw = true;
                }
            }
        }

        outcome
    }
}

fn node_at(model: &DrawModel, point: Pos2) -> Option<usize> {
    model
        .nodes
        .iter()
        .position(|node| node.label_rect.contains(point))
}

/// First qualifying pair in iteration order wins; no closest-of-several
/// resolution when chords overlap.
fn chord_at(
    raw: &RawModel,
    model: &DrawModel,
    config: &ThresholdConfig,
    point: Pos2,
) -> Option<(usize, usize)> {
    let count = model.nodes.len();
    for a in 0..count {
        for b in (a + 1)..count {
            let start = model.nodes[a].position;
            let end = model.nodes[b].position;

            let segment = end - start;
            let length_sq = segment.length_sq();
            if length_sq <= f32::EPSILON {
                continue;
            }

            let along = (point - start).dot(segment) / length_sq;
            if !(0.0..=1.0).contains(&along) {
                continue;
            }

            let distance =
                (segment.x * (point.y - start.y) - segment.y * (point.x - start.x)).abs()
                    / length_sq.sqrt();
            if distance >= MAX_CHORD_WIDTH {
                continue;
            }

            let first = model.nodes[a].series_index;
            let second = model.nodes[b].series_index;
            let forward = raw.chord_value(first, second);
            let backward = raw.chord_value(second, first);
            let value = if backward.abs() > forward.abs() {
                backward
            } else {
                forward
            };

            if !config.chord_visible(value, model.max_chord_magnitude) {
                continue;
            }

            let stroke = chord_stroke_width(value, model.max_chord_magnitude);
            if distance < stroke.min(2.0) {
                return Some((a, b));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use eframe::egui::{Rect, pos2, vec2};

    use crate::chord::model::{DrawNode, SeriesDatum};
    use crate::chord::policy::DrawMode;

    fn datum(id: &str, chords: Vec<f64>) -> SeriesDatum {
        SeriesDatum {
            id: id.to_owned(),
            label: id.to_owned(),
            short_label: id.to_owned(),
            value: 0.5,
            display_value: 0.1,
            error_value: 0.0,
            error_message: None,
            chords,
        }
    }

    fn node(series_index: usize, position: Pos2) -> DrawNode {
        DrawNode {
            series_index,
            position,
            label_rect: Rect::from_center_size(position, vec2(30.0, 16.0)),
            radius: 8.0,
            value_fraction: 0.5,
            error_fraction: 0.0,
        }
    }

    // Two nodes on a horizontal line with a strong positive chord, plus a
    // third far away so pair iteration order matters.
    fn fixture() -> (RawModel, DrawModel) {
        let series = vec![
            datum("iron", vec![0.0, 0.9, 0.1]),
            datum("nickel", vec![0.9, 0.0, -0.2]),
            datum("zinc", vec![0.1, -0.2, 0.0]),
        ];
        let index_by_id = series
            .iter()
            .enumerate()
            .map(|(index, datum)| (datum.id.clone(), index))
            .collect::<HashMap<_, _>>();
        let raw = RawModel {
            series,
            index_by_id,
            revision: 1,
        };

        let model = DrawModel {
            nodes: vec![
                node(0, pos2(100.0, 200.0)),
                node(1, pos2(300.0, 200.0)),
                node(2, pos2(200.0, 400.0)),
            ],
            max_chord_magnitude: 0.9,
            viewport: vec2(400.0, 500.0),
        };
        (raw, model)
    }

    #[test]
    fn hover_fires_once_per_node_entered() {
        let (raw, model) = fixture();
        let config = ThresholdConfig::default();
        let mut state = InteractionState::new();

        let center = model.nodes[0].label_rect.center();
        let first = state.handle_event(PointerEvent::Move(center), &raw, &model, &config);
        assert!(first.redraw);
        assert_eq!(state.hover_node(), Some(0));

        let repeat = state.handle_event(PointerEvent::Move(center), &raw, &model, &config);
        assert!(!repeat.redraw, "stationary pointer must not re-fire");

        let other = model.nodes[1].label_rect.center();
        let entered = state.handle_event(PointerEvent::Move(other), &raw, &model, &config);
        assert!(entered.redraw);
        assert_eq!(state.hover_node(), Some(1));
    }

    #[test]
    fn chord_hover_sets_pointer_cursor() {
        let (raw, model) = fixture();
        let config = ThresholdConfig::default();
        let mut state = InteractionState::new();

        let on_chord = pos2(200.0, 200.5);
        let outcome = state.handle_event(PointerEvent::Move(on_chord), &raw, &model, &config);
        assert_eq!(state.hover_chord(), Some((0, 1)));
        assert!(outcome.redraw);
        assert_eq!(outcome.cursor, CursorHint::Pointer);

        let repeat = state.handle_event(PointerEvent::Move(on_chord), &raw, &model, &config);
        assert!(!repeat.redraw);
        assert_eq!(repeat.cursor, CursorHint::Pointer);
    }

    #[test]
    fn pointer_beyond_stroke_width_misses_the_chord() {
        let (raw, model) = fixture();
        let config = ThresholdConfig::default();
        let mut state = InteractionState::new();

        // The 0-1 chord has full stroke width, so the hit window is the
        // 2-pixel cap, not MAX_CHORD_WIDTH.
        let near_miss = pos2(200.0, 203.0);
        state.handle_event(PointerEvent::Move(near_miss), &raw, &model, &config);
        assert_eq!(state.hover_chord(), None);
    }

    #[test]
    fn node_hover_suppresses_chord_hit_testing() {
        let (raw, mut model) = fixture();
        let config = ThresholdConfig::default();
        let mut state = InteractionState::new();

        // Stretch node 0's label so its rect covers a point on the chord.
        model.nodes[0].label_rect = Rect::from_center_size(pos2(150.0, 200.0), vec2(120.0, 20.0));
        let outcome = state.handle_event(PointerEvent::Move(pos2(150.0, 200.0)), &raw, &model, &config);
        assert_eq!(state.hover_node(), Some(0));
        assert_eq!(state.hover_chord(), None);
        assert_eq!(outcome.cursor, CursorHint::Default);
    }

    #[test]
    fn full_threshold_removes_chords_from_hit_testing() {
        let (raw, model) = fixture();
        let config = ThresholdConfig::new(1.0, DrawMode::Both);
        let mut state = InteractionState::new();

        state.handle_event(PointerEvent::Move(pos2(200.0, 200.5)), &raw, &model, &config);
        assert_eq!(state.hover_chord(), None);
    }

    #[test]
    fn draw_mode_constrains_hit_testing_polarity() {
        let (raw, model) = fixture();
        let config = ThresholdConfig::new(0.0, DrawMode::Negative);
        let mut state = InteractionState::new();

        // The 0-1 chord is positive, so it is not hoverable in negative mode.
        state.handle_event(PointerEvent::Move(pos2(200.0, 200.5)), &raw, &model, &config);
        assert_eq!(state.hover_chord(), None);
    }

    #[test]
    fn click_on_node_selects_it() {
        let (raw, model) = fixture();
        let config = ThresholdConfig::default();
        let mut state = InteractionState::new();

        let center = model.nodes[1].label_rect.center();
        let outcome = state.handle_event(PointerEvent::Up(center), &raw, &model, &config);
        assert!(outcome.redraw);
        assert_eq!(state.selected(), Some(1));
        assert_eq!(outcome.chord_clicked, None);

        // Clicking the already-selected node is a no-op transition.
        let repeat = state.handle_event(PointerEvent::Up(center), &raw, &model, &config);
        assert!(!repeat.redraw);
        assert_eq!(state.selected(), Some(1));
    }

    #[test]
    fn click_on_chord_emits_event_and_keeps_selection() {
        let (raw, model) = fixture();
        let config = ThresholdConfig::default();
        let mut state = InteractionState::new();
        state.select(Some(2));

        let outcome =
            state.handle_event(PointerEvent::Up(pos2(200.0, 200.5)), &raw, &model, &config);
        assert_eq!(
            outcome.chord_clicked,
            Some(("iron".to_owned(), "nickel".to_owned()))
        );
        assert_eq!(state.selected(), Some(2));
    }

    #[test]
    fn click_on_empty_space_clears_selection_and_chord_highlight() {
        let (raw, model) = fixture();
        let config = ThresholdConfig::default();
        let mut state = InteractionState::new();

        state.select(Some(0));
        state.handle_event(PointerEvent::Move(pos2(200.0, 200.5)), &raw, &model, &config);
        assert!(state.hover_chord().is_some());

        let outcome =
            state.handle_event(PointerEvent::Up(pos2(50.0, 50.0)), &raw, &model, &config);
        assert!(outcome.redraw);
        assert_eq!(state.selected(), None);
        assert_eq!(state.hover_chord(), None);
    }

    #[test]
    fn leave_clears_hover_state() {
        let (raw, model) = fixture();
        let config = ThresholdConfig::default();
        let mut state = InteractionState::new();

        state.handle_event(
            PointerEvent::Move(model.nodes[0].label_rect.center()),
            &raw,
            &model,
            &config,
        );
        let outcome = state.handle_event(PointerEvent::Leave, &raw, &model, &config);
        assert!(outcome.redraw);
        assert_eq!(state.hover_node(), None);

        let repeat = state.handle_event(PointerEvent::Leave, &raw, &model, &config);
        assert!(!repeat.redraw);
    }

    #[test]
    fn empty_model_never_matches() {
        let (raw, _) = fixture();
        let empty = DrawModel {
            nodes: Vec::new(),
            max_chord_magnitude: 0.9,
            viewport: vec2(10.0, 10.0),
        };
        let config = ThresholdConfig::default();
        let mut state = InteractionState::new();

        let moved =
            state.handle_event(PointerEvent::Move(pos2(5.0, 5.0)), &raw, &empty, &config);
        assert!(!moved.redraw);
        let clicked = state.handle_event(PointerEvent::Up(pos2(5.0, 5.0)), &raw, &empty, &config);
        assert_eq!(clicked.chord_clicked, None);
    }

    #[test]
    fn projection_outside_the_segment_is_rejected() {
        let (raw, model) = fixture();
        let config = ThresholdConfig::default();
        let mut state = InteractionState::new();

        // Collinear with the 0-1 chord but past node 1's endpoint.
        state.handle_event(PointerEvent::Move(pos2(340.0, 200.0)), &raw, &model, &config);
        assert_eq!(state.hover_chord(), None);
    }
}
