use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, vec2};

use super::super::ViewModel;
use super::super::render_utils::{circle_visible, draw_background, world_to_screen};

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect, self.pan, self.zoom);

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);

        let Some(view) = self.outcome.view() else {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No interactions found.",
                FontId::proportional(16.0),
                Color32::from_gray(90),
            );
            return;
        };
        let visual = &view.visual;

        let zoom_sqrt = self.zoom.sqrt();
        let screen_positions = visual
            .nodes
            .iter()
            .map(|node| world_to_screen(rect, self.pan, self.zoom, node.position))
            .collect::<Vec<_>>();
        let screen_radius = visual
            .nodes
            .first()
            .map(|node| (node.radius * zoom_sqrt).clamp(4.0, 40.0))
            .unwrap_or(8.0);

        let hovered = Self::hovered_index(ui, &screen_positions, screen_radius);
        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let show_edge_labels = self.zoom > 0.6 || visual.edges.len() <= 40;
        for edge in &visual.edges {
            let start = screen_positions.get(edge.from);
            let end = screen_positions.get(edge.to);
            let (Some(&start), Some(&end)) = (start, end) else {
                continue;
            };

            let touches_hover = hovered.is_some_and(|index| index == edge.from || index == edge.to);
            let hover_boost = if touches_hover { 1.2 } else { 0.0 };
            let width = (edge.width * zoom_sqrt).clamp(0.6, 8.0) + hover_boost;
            painter.line_segment([start, end], Stroke::new(width, edge.bucket.color()));

            if show_edge_labels {
                let mid = start + (end - start) * 0.5;
                painter.text(
                    mid,
                    Align2::CENTER_CENTER,
                    edge.label.as_str(),
                    FontId::proportional(10.0),
                    Color32::from_gray(60),
                );
            }
        }

        for (index, node) in visual.nodes.iter().enumerate() {
            let position = screen_positions[index];
            if !circle_visible(rect, position, screen_radius) {
                continue;
            }

            let is_selected = self.selected.as_deref() == Some(node.id.as_str());
            let is_hovered = hovered == Some(index);
            let fill = if is_hovered {
                Color32::from_rgb(255, 164, 101)
            } else {
                node.color
            };

            painter.circle_filled(position, screen_radius, fill);
            painter.circle_stroke(
                position,
                screen_radius,
                Stroke::new(
                    if is_selected { 2.6 } else { 1.0 },
                    if is_selected {
                        Color32::from_rgb(230, 160, 20)
                    } else {
                        Color32::from_rgba_unmultiplied(15, 15, 15, 190)
                    },
                ),
            );
            painter.text(
                position + vec2(screen_radius + 4.0, 0.0),
                Align2::LEFT_CENTER,
                node.id.as_str(),
                FontId::proportional(12.0),
                Color32::BLACK,
            );
        }

        if let Some(index) = hovered
            && let Some(node) = visual.nodes.get(index)
        {
            let degree = visual
                .edges
                .iter()
                .filter(|edge| edge.from == index || edge.to == index)
                .count();
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                format!("{}  |  {degree} interactions", node.id),
                FontId::proportional(13.0),
                Color32::from_gray(30),
            );
        }

        if response.clicked_by(egui::PointerButton::Primary) {
            self.selected =
                hovered.and_then(|index| visual.nodes.get(index).map(|node| node.id.clone()));
        }
    }
}
