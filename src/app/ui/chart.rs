use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Ui, vec2};

use crate::encode::score_label;

use super::super::ViewModel;

const CHART_HEIGHT: f32 = 240.0;
const MIN_BAR_SLOT: f32 = 6.0;

impl ViewModel {
    pub(in crate::app) fn draw_score_chart(&self, ui: &mut Ui) {
        let Some(view) = self.outcome.view() else {
            return;
        };
        let bars = &view.visual.bars;
        if bars.is_empty() {
            return;
        }

        let width = (ui.available_width()).max(bars.len() as f32 * MIN_BAR_SLOT);
        egui::ScrollArea::horizontal()
            .id_salt("score_chart")
            .max_height(CHART_HEIGHT + 24.0)
            .show(ui, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(vec2(width, CHART_HEIGHT), Sense::hover());
                let painter = ui.painter_at(rect);
                painter.rect_filled(rect, 0.0, Color32::from_rgb(250, 250, 252));

                let plot = Rect::from_min_max(
                    rect.left_top() + vec2(36.0, 8.0),
                    rect.right_bottom() - vec2(8.0, 16.0),
                );
                let axis = Stroke::new(1.0, Color32::from_gray(120));
                painter.line_segment([plot.left_bottom(), plot.right_bottom()], axis);
                painter.line_segment([plot.left_top(), plot.left_bottom()], axis);
                for tick in [0.0_f32, 0.5, 1.0] {
                    let y = plot.bottom() - tick * plot.height();
                    painter.text(
                        Pos2::new(plot.left() - 4.0, y),
                        Align2::RIGHT_CENTER,
                        format!("{tick:.1}"),
                        FontId::proportional(10.0),
                        Color32::from_gray(80),
                    );
                }

                let slot = plot.width() / bars.len() as f32;
                let gap = (slot * 0.2).min(6.0);
                let pointer = response.hover_pos();
                let mut hovered = None;
                for (index, bar) in bars.iter().enumerate() {
                    let score = bar.score.unwrap_or(0.0).clamp(0.0, 1.0) as f32;
                    let left = plot.left() + slot * index as f32 + gap * 0.5;
                    let bar_rect = Rect::from_min_max(
                        Pos2::new(left, plot.bottom() - score * plot.height()),
                        Pos2::new(left + (slot - gap).max(1.0), plot.bottom()),
                    );
                    painter.rect_filled(bar_rect, 0.0, bar.bucket.color());

                    let column = Rect::from_x_y_ranges(bar_rect.x_range(), plot.y_range());
                    if pointer.is_some_and(|pointer| column.contains(pointer)) {
                        hovered = Some(bar);
                    }
                }

                painter.text(
                    rect.center_bottom(),
                    Align2::CENTER_BOTTOM,
                    "Protein interactions",
                    FontId::proportional(11.0),
                    Color32::from_gray(80),
                );

                if let Some(bar) = hovered {
                    response.on_hover_text(format!("{}: {}", bar.label, score_label(bar.score)));
                }
            });
    }
}
