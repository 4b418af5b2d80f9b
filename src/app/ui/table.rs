use eframe::egui::{self, RichText, Ui};

use super::super::ViewModel;

const ROW_HEIGHT: f32 = 20.0;

impl ViewModel {
    pub(in crate::app) fn draw_table(&self, ui: &mut Ui) {
        let Some(view) = self.outcome.view() else {
            return;
        };
        let headers = self.loaded.dataset.headers();
        let rows = view.rows.rows();

        egui::ScrollArea::both()
            .id_salt("interaction_table")
            .auto_shrink([false, false])
            .show_rows(ui, ROW_HEIGHT, rows.len(), |ui, row_range| {
                egui::Grid::new("interaction_grid")
                    .striped(true)
                    .num_columns(headers.len())
                    .min_row_height(ROW_HEIGHT)
                    .show(ui, |ui| {
                        for header in headers {
                            ui.label(RichText::new(header).strong());
                        }
                        ui.end_row();

                        for row in &rows[row_range] {
                            for field in &row.fields {
                                ui.label(field.as_str());
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}
