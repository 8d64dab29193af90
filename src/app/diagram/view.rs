use eframe::egui::{Align2, Color32, CursorIcon, FontId, Sense, Stroke, Ui, vec2};

use crate::chord::{
    CursorHint, LABEL_FONT_SIZE, OUTER_PADDING, PointerEvent, VALUE_DRAW_LENGTH, chord_polarity,
    chord_stroke_width,
};
use crate::util::{format_share, format_value};

use super::super::ViewModel;
use super::super::render_utils::{
    ERROR_COLOR, HIGHLIGHT_COLOR, LABEL_TEXT_COLOR, blend_color, dim_color, draw_background,
    polarity_color, share_color,
};

impl ViewModel {
    pub(in crate::app) fn draw_diagram(&mut self, ui: &mut Ui) {
        if self.model_dirty {
            self.rebuild_raw_model();
        }

        let pseudo_matches = self.cached_search_matches();

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
        let painter = ui.painter_at(rect);

        let ring_radius = rect.size().min_elem() / 2.0 - VALUE_DRAW_LENGTH - OUTER_PADDING;
        draw_background(&painter, rect, (ring_radius > 0.0).then_some(ring_radius));

        let Some(raw) = self.raw.as_ref() else {
            let message = self
                .raw_error
                .as_deref()
                .unwrap_or("No series data loaded.");
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                message,
                FontId::proportional(14.0),
                LABEL_TEXT_COLOR,
            );
            return;
        };

        let config = self.config;
        let model = self.draw_cache.ensure(raw, rect.size());
        let origin = rect.min.to_vec2();

        // Pointer positions are translated into model space; the layout and
        // hit-testing never see the panel offset.
        let mut outcome = match response.hover_pos() {
            Some(pointer) => self.interaction.handle_event(
                PointerEvent::Move(pointer - origin),
                raw,
                model,
                &config,
            ),
            None => self
                .interaction
                .handle_event(PointerEvent::Leave, raw, model, &config),
        };

        if response.clicked()
            && let Some(pointer) = response.interact_pointer_pos()
        {
            let up = self.interaction.handle_event(
                PointerEvent::Up(pointer - origin),
                raw,
                model,
                &config,
            );
            outcome.redraw |= up.redraw;
            if up.chord_clicked.is_some() {
                outcome.chord_clicked = up.chord_clicked;
            }
        }

        if outcome.redraw {
            ui.ctx().request_repaint();
        }
        if outcome.cursor == CursorHint::Pointer {
            ui.output_mut(|output| output.cursor_icon = CursorIcon::PointingHand);
        }

        let selected_index = self.interaction.selected();
        self.selected_id = selected_index
            .and_then(|index| raw.series.get(index))
            .map(|datum| datum.id.clone());

        if let Some((first, second)) = outcome.chord_clicked {
            log::info!("chord clicked: {first} <-> {second}");
            self.last_chord_clicked = Some((first, second));
        }

        if model.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "Viewport is too small to lay out the diagram.",
                FontId::proportional(13.0),
                Color32::from_gray(170),
            );
            return;
        }

        let hover_node = self.interaction.hover_node();
        let hover_chord = self.interaction.hover_chord();
        let selection_active = selected_index.is_some();
        let pseudo_active = pseudo_matches
            .as_ref()
            .is_some_and(|matches| !matches.is_empty());

        for a in 0..model.nodes.len() {
            for b in (a + 1)..model.nodes.len() {
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

                let width = chord_stroke_width(value, model.max_chord_magnitude);
                let is_hovered = hover_chord == Some((a, b));
                let touches_selection =
                    selected_index == Some(a) || selected_index == Some(b);

                let mut color = polarity_color(chord_polarity(value));
                if is_hovered {
                    color = blend_color(color, HIGHLIGHT_COLOR, 0.6);
                } else if selection_active && !touches_selection {
                    color = dim_color(color, 0.45);
                }

                painter.line_segment(
                    [
                        rect.min + model.nodes[a].position.to_vec2(),
                        rect.min + model.nodes[b].position.to_vec2(),
                    ],
                    Stroke::new(width.max(0.8), color),
                );
            }
        }

        let center = rect.center();
        for (index, node) in model.nodes.iter().enumerate() {
            let position = rect.min + node.position.to_vec2();
            let datum = &raw.series[node.series_index];
            let is_selected = selected_index == Some(index);
            let is_hovered = hover_node == Some(index);
            let is_match = pseudo_matches
                .as_ref()
                .is_some_and(|matches| matches.contains(&index));

            if datum.error_message.is_some() {
                painter.circle_stroke(position, 6.0, Stroke::new(1.5, ERROR_COLOR));
                painter.text(
                    position,
                    Align2::CENTER_CENTER,
                    "!",
                    FontId::proportional(11.0),
                    ERROR_COLOR,
                );
            } else {
                let mut fill = share_color(node.value_fraction);
                if is_hovered {
                    fill = blend_color(fill, HIGHLIGHT_COLOR, 0.5);
                } else if is_match {
                    fill = blend_color(fill, Color32::from_rgb(103, 196, 255), 0.6);
                } else if selection_active && !is_selected {
                    fill = dim_color(fill, 0.55);
                } else if pseudo_active {
                    fill = dim_color(fill, 0.4);
                }

                let radius = node.radius.max(1.5);
                painter.circle_filled(position, radius, fill);
                painter.circle_stroke(
                    position,
                    radius,
                    Stroke::new(1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190)),
                );

                let offset = position - center;
                if offset.length() > f32::EPSILON && node.value_fraction > 0.0 {
                    let direction = offset.normalized();
                    let bar_start = position + direction * (radius + 2.0);
                    let bar_end =
                        bar_start + direction * (node.value_fraction * (VALUE_DRAW_LENGTH - 4.0));
                    painter.line_segment([bar_start, bar_end], Stroke::new(3.0, fill));

                    if node.error_fraction > 0.0 {
                        let whisker =
                            direction * node.error_fraction * (VALUE_DRAW_LENGTH - 4.0) * 0.5;
                        painter.line_segment(
                            [bar_end - whisker, bar_end + whisker],
                            Stroke::new(1.0, LABEL_TEXT_COLOR),
                        );
                    }
                }
            }

            if is_selected {
                painter.circle_stroke(
                    position,
                    node.radius.max(4.0) + 4.0,
                    Stroke::new(1.5, HIGHLIGHT_COLOR),
                );
            }

            let label_rect = node.label_rect.translate(origin);
            painter.rect_filled(
                label_rect,
                2.0,
                Color32::from_rgba_unmultiplied(12, 14, 18, 200),
            );
            let text_color = if is_selected || is_hovered {
                HIGHLIGHT_COLOR
            } else if datum.error_message.is_some() {
                ERROR_COLOR
            } else {
                LABEL_TEXT_COLOR
            };
            painter.text(
                label_rect.center(),
                Align2::CENTER_CENTER,
                &datum.short_label,
                FontId::proportional(LABEL_FONT_SIZE),
                text_color,
            );
        }

        if let Some(hovered_index) = hover_node
            && let Some(node) = model.nodes.get(hovered_index)
        {
            let datum = &raw.series[node.series_index];
            let info = match &datum.error_message {
                Some(message) => format!("{}  |  {message}", datum.label),
                None => format!(
                    "{}  |  mean {} ± {}  |  share {}",
                    datum.label,
                    format_value(datum.display_value),
                    format_value(datum.error_value),
                    format_share(datum.value),
                ),
            };
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                info,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }
    }
}
