use eframe::egui::{self, RichText, Ui};

use crate::util::{format_correlation, format_share, format_value};

use super::super::ViewModel;
use super::super::render_utils::ERROR_COLOR;

struct PartnerRow {
    id: String,
    label: String,
    value: f64,
}

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Selection Details");
        ui.add_space(6.0);

        if let Some((first, second)) = self.last_chord_clicked.clone() {
            let value = self.raw.as_ref().and_then(|raw| {
                let a = raw.index_of(&first)?;
                let b = raw.index_of(&second)?;
                Some(raw.chord_value(a, b))
            });
            let line = match value {
                Some(value) => format!(
                    "Last chord: {first} <-> {second} ({})",
                    format_correlation(value)
                ),
                None => format!("Last chord: {first} <-> {second}"),
            };
            ui.label(line);
            ui.separator();
        }

        let Some(selected_id) = self.selected_id.clone() else {
            ui.label("Select a node from the diagram or the series list.");
            return;
        };

        // Clone what the panel needs up front; selection changes below need
        // the raw model borrow released.
        let selected = self.raw.as_ref().and_then(|raw| {
            raw.index_of(&selected_id)
                .map(|index| (index, raw.series[index].clone()))
        });
        let Some((selected_index, datum)) = selected else {
            ui.label("Selected series is not part of the current model.");
            return;
        };

        let partners = self
            .raw
            .as_ref()
            .map(|raw| {
                let mut partners = raw
                    .series
                    .iter()
                    .enumerate()
                    .filter(|(other, partner)| *other != selected_index && partner.usable())
                    .map(|(other, partner)| PartnerRow {
                        id: partner.id.clone(),
                        label: partner.label.clone(),
                        value: raw.chord_value(selected_index, other),
                    })
                    .collect::<Vec<_>>();
                partners.sort_by(|a, b| b.value.abs().total_cmp(&a.value.abs()));
                partners
            })
            .unwrap_or_default();

        ui.label(RichText::new(datum.label.clone()).strong());
        ui.small(datum.id.clone());
        ui.add_space(6.0);

        if let Some(message) = &datum.error_message {
            ui.colored_label(ERROR_COLOR, message.as_str());
            ui.label("This series is drawn flagged and takes no part in correlation.");
        } else {
            ui.label(format!(
                "Mean value: {} ± {}",
                format_value(datum.display_value),
                format_value(datum.error_value)
            ));
            ui.label(format!("Share of total: {}", format_share(datum.value)));
        }

        ui.separator();
        ui.label(RichText::new("Strongest correlations").strong());

        let mut pending_selection = None;
        if partners.is_empty() {
            ui.label("No other usable series to correlate against.");
        } else {
            egui::ScrollArea::vertical()
                .id_salt("correlation_ranking_scroll")
                .max_height(320.0)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for partner in &partners {
                        let label =
                            format!("{}  ({})", partner.label, format_correlation(partner.value));
                        if ui.link(label).on_hover_text(partner.id.as_str()).clicked() {
                            pending_selection = Some(partner.id.clone());
                        }
                    }
                });
        }

        if let Some(id) = pending_selection {
            self.set_selected(Some(id));
        }
    }
}
