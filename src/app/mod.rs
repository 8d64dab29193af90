use std::collections::HashSet;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};

use crate::chord::{DrawModelCache, DrawMode, InteractionState, RawModel, ThresholdConfig};
use crate::data::{SeriesTable, load_series_table};

mod diagram;
mod render_utils;
mod ui;

pub struct ChordViewApp {
    data_path: String,
    initial_config: ThresholdConfig,
    initial_show_only_selection: bool,
    state: AppState,
    reload_rx: Option<Receiver<Result<SeriesTable, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<SeriesTable, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    table: SeriesTable,
    config: ThresholdConfig,
    show_only_selection: bool,
    hidden: HashSet<String>,
    search: String,
    raw: Option<RawModel>,
    raw_error: Option<String>,
    model_revision: u64,
    model_dirty: bool,
    draw_cache: DrawModelCache,
    interaction: InteractionState,
    selected_id: Option<String>,
    last_chord_clicked: Option<(String, String)>,
    search_match_cache: Option<SearchMatchCache>,
}

struct SearchMatchCache {
    query: String,
    revision: u64,
    matches: Arc<HashSet<usize>>,
}

impl ChordViewApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        data_path: String,
        threshold: f64,
        show_only_selection: bool,
    ) -> Self {
        let state = AppState::Loading {
            rx: Self::spawn_load(data_path.clone()),
        };
        Self {
            data_path,
            initial_config: ThresholdConfig::new(threshold, DrawMode::Both),
            initial_show_only_selection: show_only_selection,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(data_path: String) -> Receiver<Result<SeriesTable, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_series_table(&data_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }
}

impl eframe::App for ChordViewApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(table) => AppState::Ready(Box::new(ViewModel::new(
                            table,
                            self.initial_config,
                            self.initial_show_only_selection,
                        ))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading series document...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load series document");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(AppState::Loading {
                            rx: Self::spawn_load(self.data_path.clone()),
                        });
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.data_path, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.data_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            // Keep the user's threshold and selection toggle
                            // across a reload; everything else rebuilds.
                            let config = model.config;
                            let show_only_selection = model.show_only_selection;
                            transition = Some(match result {
                                Ok(table) => AppState::Ready(Box::new(ViewModel::new(
                                    table,
                                    config,
                                    show_only_selection,
                                ))),
                                Err(error) => AppState::Error(error),
                            });
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
