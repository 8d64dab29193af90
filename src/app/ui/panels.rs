use std::collections::HashSet;

use eframe::egui::{self, Align, Context, Layout};

use crate::chord::{DrawModelCache, InteractionState, ThresholdConfig};
use crate::data::SeriesTable;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(
        table: SeriesTable,
        config: ThresholdConfig,
        show_only_selection: bool,
    ) -> Self {
        Self {
            config,
            show_only_selection: show_only_selection && table.selection.is_some(),
            table,
            hidden: HashSet::new(),
            search: String::new(),
            raw: None,
            raw_error: None,
            model_revision: 0,
            model_dirty: true,
            draw_cache: DrawModelCache::new(),
            interaction: InteractionState::new(),
            selected_id: None,
            last_chord_clicked: None,
            search_match_cache: None,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        data_path: &str,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        if self.model_dirty {
            self.rebuild_raw_model();
        }

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("chordview");
                    ui.separator();
                    ui.label(format!("document: {data_path}"));
                    ui.label(format!("series: {}", self.table.column_count()));
                    ui.label(format!("points: {}", self.table.point_count));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload document"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    if ui.button("Rebuild model").clicked() {
                        self.model_dirty = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(model) = self.draw_cache.model() {
                            ui.label(format!("nodes: {}", model.nodes.len()));
                        }
                        if let Some(raw) = &self.raw {
                            ui.label(format!("correlated series: {}", raw.series_count()));
                        } else if self.raw_error.is_some() {
                            ui.label("correlation unavailable");
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Reloading series document...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_diagram(ui);
            }
        });
    }
}
