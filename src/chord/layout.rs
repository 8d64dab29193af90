use std::f64::consts::PI;

use eframe::egui::{Pos2, Rect, Vec2, pos2, vec2};

use super::model::{DrawModel, DrawNode, RawModel};

/// Radial band outside the node ring reserved for per-node value bars.
pub const VALUE_DRAW_LENGTH: f32 = 40.0;
pub const OUTER_PADDING: f32 = 12.0;
pub const MAX_CHORD_WIDTH: f32 = 10.0;

pub const LABEL_FONT_SIZE: f32 = 12.0;
const LABEL_CHAR_WIDTH: f32 = 7.0;
const LABEL_PAD_X: f32 = 4.0;
const LABEL_PAD_Y: f32 = 2.0;

/// Lays the series out evenly around a circle, starting just past the top and
/// proceeding clockwise. Node area (not diameter) tracks the value share.
/// A viewport too small for the ring yields an empty node list.
pub fn compute_draw_model(raw: &RawModel, viewport: Vec2) -> DrawModel {
    let max_chord_magnitude = raw
        .series
        .iter()
        .flat_map(|datum| datum.chords.iter())
        .fold(0.0f64, |max, value| max.max(value.abs()));

    let count = raw.series.len();
    let diagram_radius = viewport.x.min(viewport.y) / 2.0;
    let node_pos_radius = diagram_radius - VALUE_DRAW_LENGTH - OUTER_PADDING;

    if count == 0 || node_pos_radius < 0.0 {
        return DrawModel {
            nodes: Vec::new(),
            max_chord_magnitude,
            viewport,
        };
    }

    let center_x = (viewport.x / 2.0) as f64;
    let center_y = (viewport.y / 2.0) as f64;
    let pos_radius = node_pos_radius as f64;
    let max_node_radius = pos_radius / 2.0;

    let max_value = raw
        .series
        .iter()
        .fold(0.0f64, |max, datum| max.max(datum.value));
    let max_display = raw
        .series
        .iter()
        .fold(0.0f64, |max, datum| max.max(datum.display_value));

    let step = -2.0 * PI / count as f64;
    let mut angle = PI + step;

    let mut nodes = Vec::with_capacity(count);
    for (series_index, datum) in raw.series.iter().enumerate() {
        let position = pos2(
            (angle.sin() * pos_radius + center_x).floor() as f32,
            (angle.cos() * pos_radius + center_y).floor() as f32,
        );

        let value_fraction = if max_value > 0.0 {
            datum.value / max_value
        } else {
            0.0
        };
        let radius = (value_fraction * max_node_radius * max_node_radius).sqrt() as f32;

        let error_fraction = if max_display > 0.0 {
            (datum.error_value / max_display).clamp(0.0, 1.0) as f32
        } else {
            0.0
        };

        nodes.push(DrawNode {
            series_index,
            position,
            label_rect: label_rect(&datum.short_label, position),
            radius,
            value_fraction: value_fraction as f32,
            error_fraction,
        });

        angle += step;
    }

    DrawModel {
        nodes,
        max_chord_magnitude,
        viewport,
    }
}

fn label_rect(short_label: &str, position: Pos2) -> Rect {
    let size = vec2(
        short_label.len() as f32 * LABEL_CHAR_WIDTH + 2.0 * LABEL_PAD_X,
        LABEL_FONT_SIZE + 2.0 * LABEL_PAD_Y,
    );
    Rect::from_min_size(position - size / 2.0, size)
}
