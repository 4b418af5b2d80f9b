use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, Ui};
use tracing::{info, warn};

use crate::encode::{ColorBucket, NodeColoring};
use crate::pipeline::handle_query;
use crate::ppi::{Query, to_csv_bytes};
use crate::render::{RenderOptions, render_network_png, render_score_chart_png};

use super::super::{Page, StatusMessage, ViewModel};

const CSV_EXPORT_NAME: &str = "filtered_ppi_data.csv";
const NETWORK_EXPORT_NAME: &str = "ppi_network.png";
const CHART_EXPORT_NAME: &str = "ppi_scores.png";

fn write_export(dir: &Path, name: &str, bytes: &[u8]) -> Result<String> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(name);
    fs::write(&path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path.display().to_string())
}

impl ViewModel {
    /// Re-runs the pipeline for the current inputs. The spring layout only runs
    /// while the network page is open.
    pub(in crate::app) fn refresh_query(&mut self) {
        let loaded = self.loaded;
        let needs_layout = self.page == Page::Visualization;
        let options = if needs_layout {
            self.options
        } else {
            self.options.without_layout()
        };
        self.query = Query::from_inputs(&self.single_input, &self.multi_input);
        self.outcome = handle_query(&loaded.dataset, &self.query, &options);
        self.query_dirty = false;
        self.laid_out = needs_layout;

        let still_present = self.outcome.view().is_some_and(|view| {
            self.selected
                .as_deref()
                .is_some_and(|id| view.graph.contains_node(id))
        });
        if !still_present {
            self.selected = None;
        }
        self.reset_view();
    }

    /// The network page is open but the current outcome was built without layout.
    pub(in crate::app) fn layout_pending(&self) -> bool {
        self.page == Page::Visualization && !self.laid_out
    }

    pub(in crate::app) fn draw_query_inputs(&mut self, ui: &mut Ui) {
        ui.label("Search for a single protein:");
        let single = ui.text_edit_singleline(&mut self.single_input);
        ui.label("Search for multiple proteins (comma-separated):");
        let multi = ui.add(
            egui::TextEdit::multiline(&mut self.multi_input)
                .desired_rows(2)
                .hint_text("TP53, MDM2, BRCA1"),
        );
        if !self.multi_input.trim().is_empty() && !self.single_input.trim().is_empty() {
            ui.small("The protein list takes precedence over the single protein search.");
        }

        if single.changed() || multi.changed() {
            self.query_dirty = true;
        }
        ui.small(format!("Showing {}", self.query.describe()));
    }

    pub(in crate::app) fn draw_csv_export(&mut self, ui: &mut Ui) {
        if !ui.button("Download data as CSV").clicked() {
            return;
        }

        let Some(view) = self.outcome.view() else {
            return;
        };
        let result = to_csv_bytes(self.loaded.dataset.headers(), &view.rows)
            .and_then(|bytes| write_export(&self.export_dir, CSV_EXPORT_NAME, &bytes));
        self.set_export_status("CSV", result);
    }

    pub(in crate::app) fn draw_network_controls(&mut self, ui: &mut Ui) {
        let mut export_network = false;
        let mut export_chart = false;

        ui.horizontal_wrapped(|ui| {
            let decorative = ui
                .selectable_value(
                    &mut self.options.coloring,
                    NodeColoring::Uniform,
                    "Uniform nodes",
                )
                .on_hover_text("Draw every node in the same color.")
                .changed()
                | ui.selectable_value(
                    &mut self.options.coloring,
                    NodeColoring::Decorative,
                    "Pastel nodes",
                )
                .on_hover_text("Give each node a random pastel color. Changes on every query.")
                .changed();
            if decorative {
                self.query_dirty = true;
            }

            ui.separator();
            if ui.button("Reset view").clicked() {
                self.reset_view();
            }
            export_network = ui.button("Download network graph").clicked();
            export_chart = ui.button("Download score chart").clicked();
        });

        ui.horizontal_wrapped(|ui| {
            for bucket in [ColorBucket::High, ColorBucket::Medium, ColorBucket::Low] {
                ui.colored_label(bucket.color(), "■");
                ui.label(bucket.label());
            }
        });

        if export_network {
            self.export_png(NETWORK_EXPORT_NAME, true);
        }
        if export_chart {
            self.export_png(CHART_EXPORT_NAME, false);
        }
    }

    fn export_png(&mut self, name: &str, network: bool) {
        let Some(view) = self.outcome.view() else {
            return;
        };

        let rendered = if network {
            render_network_png(&view.visual, &RenderOptions::NETWORK)
        } else {
            render_score_chart_png(&view.visual, &RenderOptions::CHART)
        };
        let result = rendered.and_then(|outcome| match outcome.into_png() {
            Some(bytes) => write_export(&self.export_dir, name, &bytes),
            None => Err(anyhow::anyhow!("nothing to draw for the current query")),
        });
        self.set_export_status("PNG", result);
    }

    fn set_export_status(&mut self, kind: &str, result: Result<String>) {
        self.status = Some(match result {
            Ok(path) => {
                info!(%path, "{kind} export written");
                StatusMessage {
                    text: format!("{kind} saved to {path}"),
                    is_error: false,
                }
            }
            Err(error) => {
                warn!("{kind} export failed: {error:#}");
                StatusMessage {
                    text: format!("{kind} export failed: {error:#}"),
                    is_error: true,
                }
            }
        });
    }
}
