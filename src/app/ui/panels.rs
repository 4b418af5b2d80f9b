use eframe::egui::{self, Align, Color32, Context, Layout, RichText, Vec2};

use crate::pipeline::QueryOutcome;
use crate::ppi::{DATA_EDIT_URL, LoadedDataset, Query};

use super::super::{Page, ViewModel, ViewerSettings};

impl ViewModel {
    pub(in crate::app) fn new(loaded: &'static LoadedDataset, settings: &ViewerSettings) -> Self {
        let mut model = Self {
            loaded,
            protein_count: loaded.dataset.protein_count(),
            options: settings.pipeline,
            export_dir: settings.export_dir.clone(),
            page: Page::Home,
            single_input: settings.initial_protein.clone(),
            multi_input: settings.initial_proteins.clone(),
            query: Query::Empty,
            outcome: QueryOutcome::Empty,
            query_dirty: true,
            laid_out: false,
            protein_search: String::new(),
            selected: None,
            pan: Vec2::ZERO,
            zoom: 1.0,
            status: None,
        };
        model.refresh_query();
        model
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        if self.query_dirty || self.layout_pending() {
            self.refresh_query();
        }

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Protein-Protein Interaction Database");
                    ui.separator();
                    ui.label(format!("interactions: {}", self.loaded.dataset.len()));
                    ui.label(format!("proteins: {}", self.protein_count));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(view) = self.outcome.view() {
                            ui.label(format!(
                                "showing {} rows, {} nodes, {} edges",
                                view.rows.len(),
                                view.graph.node_count(),
                                view.graph.edge_count()
                            ));
                        }
                    });
                });

                if let Some(error) = &self.loaded.error {
                    ui.colored_label(
                        Color32::from_rgb(200, 50, 50),
                        format!("Error loading data: {error}"),
                    );
                }
            });

        egui::SidePanel::left("navigation")
            .resizable(false)
            .default_width(160.0)
            .show(ctx, |ui| {
                ui.heading("Navigation");
                ui.separator();
                for page in Page::ALL {
                    ui.radio_value(&mut self.page, page, page.label());
                }
            });

        if self.page == Page::Visualization {
            egui::SidePanel::right("details")
                .resizable(true)
                .default_width(300.0)
                .show(ctx, |ui| self.draw_details(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.page {
            Page::Home => Self::draw_home(ui),
            Page::Data => {
                ui.heading("Protein-Protein Interaction Data");
                self.draw_query_inputs(ui);
                self.draw_status(ui);
                ui.separator();
                if self.outcome.view().is_none() {
                    Self::draw_no_match(ui);
                } else {
                    self.draw_csv_export(ui);
                    self.draw_table(ui);
                }
            }
            Page::Visualization => {
                ui.heading("Protein-Protein Interaction Network");
                self.draw_query_inputs(ui);
                self.draw_status(ui);
                ui.separator();
                if self.outcome.view().is_none() {
                    Self::draw_no_match(ui);
                    return;
                }
                ui.label(RichText::new("Interaction Score Distribution").strong());
                self.draw_score_chart(ui);
                ui.separator();
                self.draw_network_controls(ui);
                egui::TopBottomPanel::bottom("interaction_details")
                    .resizable(true)
                    .default_height(220.0)
                    .show_inside(ui, |ui| {
                        ui.label(RichText::new("Interaction Details").strong());
                        self.draw_table(ui);
                    });
                self.draw_graph(ui);
            }
        });

        if self.query_dirty || self.layout_pending() {
            ctx.request_repaint();
        }
    }

    fn draw_home(ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.heading("Protein-Protein Interaction Database for Human Diseases");
        });
        ui.add_space(16.0);
        ui.columns(3, |columns| {
            let boxes = [
                (
                    "Why this database?",
                    "Explore disease-specific protein-protein interactions, understand \
                     molecular mechanisms and support drug discovery.",
                ),
                (
                    "About the visualization",
                    "The network graph highlights interactions with edges colored by \
                     interaction strength.",
                ),
                (
                    "How to search",
                    "Search for a single protein or a comma-separated list of proteins \
                     on the Data and Visualization pages.",
                ),
            ];
            for (column, (title, body)) in columns.iter_mut().zip(boxes) {
                egui::Frame::group(column.style()).show(column, |ui| {
                    ui.set_min_height(140.0);
                    ui.label(RichText::new(title).strong().size(16.0));
                    ui.add_space(6.0);
                    ui.label(body);
                });
            }
        });
        ui.add_space(16.0);
        ui.vertical_centered(|ui| {
            ui.hyperlink_to("Edit or Add Data on GitHub", DATA_EDIT_URL);
        });
    }

    fn draw_no_match(ui: &mut egui::Ui) {
        let notice = RichText::new("No interactions found.").color(Color32::from_rgb(200, 130, 0));
        ui.label(notice);
    }

    fn draw_status(&self, ui: &mut egui::Ui) {
        if let Some(status) = &self.status {
            let color = if status.is_error {
                Color32::from_rgb(200, 50, 50)
            } else {
                Color32::from_rgb(40, 140, 60)
            };
            ui.colored_label(color, status.text.as_str());
        }
    }
}
