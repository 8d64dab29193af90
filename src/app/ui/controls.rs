use eframe::egui::{self, Align, Layout, Ui};

use crate::chord::DrawMode;
use crate::util::format_share;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Diagram Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Search (series label)");
        ui.text_edit_singleline(&mut self.search)
            .on_hover_text("Fuzzy-highlight matching nodes without changing the diagram.");

        ui.separator();

        let mut policy_changed = false;
        let threshold_slider = ui
            .add(
                egui::Slider::new(&mut self.config.threshold, 0.0..=1.0)
                    .step_by(0.01)
                    .text("Chord threshold"),
            )
            .on_hover_text(
                "Hide chords whose magnitude falls below this fraction of the strongest correlation.",
            );
        policy_changed |= threshold_slider.changed();

        ui.horizontal_wrapped(|ui| {
            for mode in [DrawMode::Both, DrawMode::Positive, DrawMode::Negative] {
                policy_changed |= ui
                    .selectable_value(&mut self.config.draw_mode, mode, mode.label())
                    .changed();
            }
        });

        if policy_changed {
            self.draw_cache.mark_dirty();
        }

        ui.separator();

        let mut model_changed = false;
        if self.table.selection.is_some() {
            model_changed |= ui
                .checkbox(&mut self.show_only_selection, "Only selected points")
                .on_hover_text(
                    "Correlate over the document's point selection instead of all points.",
                )
                .changed();
            ui.label(format!(
                "{} of {} points in selection",
                self.table.selected_point_count(),
                self.table.point_count
            ));
            ui.separator();
        }

        ui.label(format!(
            "{} of {} series shown",
            self.table.column_count() - self.hidden.len(),
            self.table.column_count()
        ));
        if !self.hidden.is_empty() && ui.button("Show all series").clicked() {
            self.hidden.clear();
            model_changed = true;
        }
        ui.add_space(4.0);

        let mut toggled = None;
        egui::ScrollArea::vertical()
            .id_salt("series_visibility_scroll")
            .max_height(320.0)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for column in &self.table.columns {
                    let share = self.raw.as_ref().and_then(|raw| {
                        raw.index_of(&column.id)
                            .map(|index| raw.series[index].value)
                    });

                    ui.horizontal(|ui| {
                        let mut visible = !self.hidden.contains(&column.id);
                        if ui.checkbox(&mut visible, column.label.as_str()).changed() {
                            toggled = Some(column.id.clone());
                        }
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            if let Some(share) = share {
                                ui.label(format_share(share));
                            }
                        });
                    });
                }
            });

        if let Some(id) = toggled {
            if !self.hidden.remove(&id) {
                self.hidden.insert(id);
            }
            model_changed = true;
        }

        if model_changed {
            self.model_dirty = true;
        }
    }
}
