use eframe::egui::{Color32, Painter, Rect, Stroke};

use crate::chord::ChordPolarity;

pub(super) const POSITIVE_CHORD_COLOR: Color32 = Color32::from_rgb(96, 170, 255);
pub(super) const NEGATIVE_CHORD_COLOR: Color32 = Color32::from_rgb(239, 118, 94);
pub(super) const HIGHLIGHT_COLOR: Color32 = Color32::from_rgb(245, 206, 93);
pub(super) const ERROR_COLOR: Color32 = Color32::from_rgb(232, 93, 93);
pub(super) const LABEL_TEXT_COLOR: Color32 = Color32::from_gray(235);

pub(super) fn polarity_color(polarity: ChordPolarity) -> Color32 {
    match polarity {
        ChordPolarity::Positive => POSITIVE_CHORD_COLOR,
        ChordPolarity::Negative => NEGATIVE_CHORD_COLOR,
    }
}

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

pub(super) fn share_color(fraction: f32) -> Color32 {
    let t = fraction.clamp(0.0, 1.0);
    let r = (60.0 + (185.0 * t)) as u8;
    let g = (145.0 - (60.0 * t)) as u8;
    let b = (210.0 - (140.0 * t)) as u8;
    Color32::from_rgb(r, g, b)
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, ring_radius: Option<f32>) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    if let Some(radius) = ring_radius {
        painter.circle_stroke(
            rect.center(),
            radius,
            Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 90)),
        );
    }
}
