use eframe::egui::{self, RichText, Ui};

use crate::encode::score_label;
use crate::ppi::{matching_proteins, uniprot_url};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Protein Details");
        ui.add_space(6.0);

        let Some(view) = self.outcome.view() else {
            ui.label("No proteins in the current result.");
            return;
        };

        if let Some(selected) = self.selected.as_deref() {
            ui.label(RichText::new(selected).strong());
            ui.hyperlink_to("View on UniProt", uniprot_url(selected));
            ui.add_space(4.0);

            let partners = view
                .rows
                .iter()
                .filter(|row| row.involves(selected))
                .map(|row| {
                    let partner = if row.protein_a == selected {
                        row.protein_b.as_str()
                    } else {
                        row.protein_a.as_str()
                    };
                    (partner, row.score)
                })
                .collect::<Vec<_>>();
            ui.label(format!("{} interactions in view", partners.len()));
            egui::ScrollArea::vertical()
                .id_salt("partners_scroll")
                .max_height(180.0)
                .show(ui, |ui| {
                    for (partner, score) in partners {
                        ui.label(format!("{partner}  ({})", score_label(score)));
                    }
                });
            ui.separator();
        } else {
            ui.label("Click a node to inspect its interactions.");
            ui.separator();
        }

        ui.label("Search UniProt details by protein name:");
        ui.text_edit_singleline(&mut self.protein_search);
        ui.add_space(4.0);

        let proteins = view.rows.proteins();
        let matches = matching_proteins(&proteins, &self.protein_search);
        if matches.is_empty() {
            ui.label("No matching proteins found.");
            return;
        }

        let mut pending_selection = None;
        egui::ScrollArea::vertical()
            .id_salt("protein_links_scroll")
            .auto_shrink([false, false])
            .show_rows(ui, 22.0, matches.len(), |ui, row_range| {
                for protein in &matches[row_range] {
                    ui.horizontal(|ui| {
                        let link = ui.link(*protein).on_hover_text("Select in the network");
                        if link.clicked() {
                            pending_selection = Some((*protein).to_owned());
                        }
                        ui.hyperlink_to("UniProt", uniprot_url(protein));
                    });
                }
            });

        if let Some(protein) = pending_selection {
            self.selected = Some(protein);
        }
    }
}
