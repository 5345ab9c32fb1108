use eframe::egui::{self, Align2, Color32, FontId, Sense, Shape, Stroke, Ui, vec2};

use super::super::highlight::{edge_emphasis, node_emphasis};
use super::super::render_utils::{
    LABEL_COLOR, circle_visible, draw_background, edge_color, edge_visible, fade, node_fill,
    world_to_screen,
};
use super::super::{EdgeKind, ViewModel, derive_graph_height};

const SEARCH_RING_COLOR: Color32 = Color32::from_rgb(103, 166, 196);

impl ViewModel {
    /// One frame of the graph canvas: rebuild if needed, run interaction,
    /// advance the engine, paint. Repaints are only requested while the
    /// layout is moving or a drag is live; a settled graph costs nothing.
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let width = ui.available_width();
        let height = derive_graph_height(width);
        self.ensure_graph(vec2(width, height));

        let (rect, response) =
            ui.allocate_exact_size(vec2(width, height), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        draw_background(&painter, rect, self.pan, self.zoom);

        if self.graph.nodes.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "Nothing to map yet.",
                FontId::proportional(14.0),
                LABEL_COLOR,
            );
            return;
        }

        self.handle_graph_zoom(ui, rect, &response);
        let hovered = self.hovered_node(ui, rect);
        self.handle_node_drag(ui, rect, &response, hovered);
        self.handle_graph_pan(&response);

        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        // One shared highlight drives both the canvas and the sidebar; the
        // pointer-over-node pick wins over a hovered sidebar row.
        self.highlighted = hovered
            .map(|index| self.graph.nodes[index].id.clone())
            .or_else(|| self.sidebar_hover.clone());
        let highlighted_index = self
            .highlighted
            .as_ref()
            .and_then(|id| self.graph.index_by_id.get(id).copied());

        let dt = ui
            .ctx()
            .input(|input| input.stable_dt)
            .clamp(1.0 / 240.0, 1.0 / 20.0);
        let tuning = self.tuning;
        let layout_moving = self.sim.step(&tuning, dt);
        if layout_moving || self.dragged.is_some() {
            ui.ctx().request_repaint();
        }

        let search_matches = self.cached_search_matches();

        for edge in &self.graph.edges {
            let start = world_to_screen(rect, self.pan, self.zoom, self.sim.position(edge.source));
            let end = world_to_screen(rect, self.pan, self.zoom, self.sim.position(edge.target));
            if !edge_visible(rect, start, end, 3.0) {
                continue;
            }

            let emphasis = edge_emphasis(highlighted_index, edge);
            let is_tag = edge.kind == EdgeKind::Tag;
            let stroke = Stroke::new(emphasis.width, fade(edge_color(is_tag), emphasis.opacity));
            if is_tag {
                painter.extend(Shape::dashed_line(&[start, end], stroke, 5.0, 4.0));
            } else {
                painter.line_segment([start, end], stroke);
            }
        }

        // Draw order puts hubs last so they sit on top of their spokes.
        for &index in &self.graph.draw_order {
            let node = &self.graph.nodes[index];
            let position = world_to_screen(rect, self.pan, self.zoom, self.sim.position(index));
            let emphasis = node_emphasis(&self.graph, highlighted_index, index);
            let radius = node.radius * emphasis.radius_scale * self.zoom;
            if !circle_visible(rect, position, radius + 20.0) {
                continue;
            }

            let fill = node_fill(node.connection_count);
            if emphasis.glow > 0.0 {
                painter.circle_filled(
                    position,
                    radius + 3.0 + (emphasis.glow * 5.0),
                    fade(fill, 0.25 * emphasis.glow),
                );
            }
            painter.circle_filled(position, radius, fade(fill, emphasis.opacity));
            painter.circle_stroke(
                position,
                radius,
                Stroke::new(1.0, fade(Color32::WHITE, emphasis.opacity)),
            );

            if search_matches
                .as_ref()
                .is_some_and(|matches| matches.contains(&index))
            {
                painter.circle_stroke(
                    position,
                    radius + 3.5,
                    Stroke::new(1.5, SEARCH_RING_COLOR),
                );
            }

            if emphasis.label_opacity > 0.02 {
                painter.text(
                    position + vec2(0.0, radius + 4.0),
                    Align2::CENTER_TOP,
                    &node.label,
                    FontId::proportional(12.0),
                    fade(LABEL_COLOR, emphasis.label_opacity),
                );
            }
        }

        if let Some(index) = hovered {
            painter.text(
                rect.left_top() + vec2(10.0, 8.0),
                Align2::LEFT_TOP,
                self.hover_card_text(index),
                FontId::proportional(13.0),
                LABEL_COLOR,
            );
        } else {
            painter.text(
                rect.left_bottom() + vec2(10.0, -8.0),
                Align2::LEFT_BOTTOM,
                "drag nodes to rearrange · scroll to zoom · click a node to navigate",
                FontId::proportional(11.0),
                fade(LABEL_COLOR, 0.6),
            );
        }

        if response.clicked()
            && let Some(index) = hovered
        {
            self.navigate_to(ui, index);
        }
    }

    fn hover_card_text(&self, index: usize) -> String {
        let node = &self.graph.nodes[index];
        let mut text = format!("{}  ·  {} connections", node.title, node.connection_count);

        let reasons = self
            .graph
            .edges
            .iter()
            .filter(|edge| edge.source == index || edge.target == index)
            .filter_map(|edge| edge.reason.as_deref())
            .take(2)
            .collect::<Vec<_>>();
        if !reasons.is_empty() {
            text.push_str("  ·  ");
            text.push_str(&reasons.join("; "));
        }
        text
    }
}
