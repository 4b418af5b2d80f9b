use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};

use crate::pipeline::{PipelineOptions, QueryOutcome};
use crate::ppi::{self, DataSource, LoadedDataset, Query};

mod graph;
mod render_utils;
mod ui;

/// Startup settings handed over from the command line.
#[derive(Clone, Debug)]
pub struct ViewerSettings {
    pub source: DataSource,
    pub pipeline: PipelineOptions,
    pub export_dir: PathBuf,
    pub initial_protein: String,
    pub initial_proteins: String,
}

pub struct PpiExplorerApp {
    settings: ViewerSettings,
    state: AppState,
}

enum AppState {
    Loading {
        rx: Receiver<&'static LoadedDataset>,
    },
    Ready(Box<ViewModel>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Page {
    Home,
    Data,
    Visualization,
}

impl Page {
    const ALL: [Self; 3] = [Self::Home, Self::Data, Self::Visualization];

    fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Data => "Data",
            Self::Visualization => "Visualization",
        }
    }
}

struct StatusMessage {
    text: String,
    is_error: bool,
}

/// Per-session view state. Only the query inputs and what was derived from
/// the last query live here; the dataset itself belongs to the process cache.
struct ViewModel {
    loaded: &'static LoadedDataset,
    protein_count: usize,
    options: PipelineOptions,
    export_dir: PathBuf,
    page: Page,
    single_input: String,
    multi_input: String,
    query: Query,
    outcome: QueryOutcome<'static>,
    query_dirty: bool,
    laid_out: bool,
    protein_search: String,
    selected: Option<String>,
    pan: Vec2,
    zoom: f32,
    status: Option<StatusMessage>,
}

impl PpiExplorerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: ViewerSettings) -> Self {
        let state = AppState::Loading {
            rx: Self::spawn_load(settings.source.clone()),
        };
        Self { settings, state }
    }

    fn spawn_load(source: DataSource) -> Receiver<&'static LoadedDataset> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let _ = tx.send(ppi::load(&source));
        });

        rx
    }
}

impl eframe::App for PpiExplorerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(loaded) => {
                        transition = Some(AppState::Ready(Box::new(ViewModel::new(
                            loaded,
                            &self.settings,
                        ))));
                    }
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => {
                        let loaded = ppi::settle_with_failure(ppi::LoadError::Fetch {
                            url: self.settings.source.to_string(),
                            reason: "background load worker disconnected".to_owned(),
                        });
                        transition = Some(AppState::Ready(Box::new(ViewModel::new(
                            loaded,
                            &self.settings,
                        ))));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading interaction data...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppState::Ready(model) => model.show(ctx),
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
