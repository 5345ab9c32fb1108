use eframe::egui::{self, Rect, Ui, Vec2};

use super::super::render_utils::{screen_to_world, world_to_screen};
use super::super::{NodeKind, ViewModel};

const MIN_ZOOM: f32 = 0.3;
const MAX_ZOOM: f32 = 3.0;
const HOVER_SLOP: f32 = 4.0;

/// Claim this frame's wheel input: read the vertical delta and zero both
/// scroll fields, so no enclosing scroll container acts on the same event.
fn take_scroll_delta(input: &mut egui::InputState) -> f32 {
    let scroll = input.raw_scroll_delta.y;
    input.raw_scroll_delta = Vec2::ZERO;
    input.smooth_scroll_delta = Vec2::ZERO;
    scroll
}

impl ViewModel {
    /// Wheel (and trackpad pinch, which egui folds into scroll) zooms about
    /// the pointer so the point under the cursor stays put.
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.ctx().input_mut(take_scroll_delta);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.pan, self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan = (pointer - rect.min) - (world_before * self.zoom);
    }

    /// Panning moves the camera only; node layout positions never change.
    /// Primary-button drags pan only when they started on empty canvas.
    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        let background_drag =
            response.dragged_by(egui::PointerButton::Primary) && self.dragged.is_none();
        if background_drag
            || response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }
    }

    /// Nearest node whose drawn circle (plus a small slop) contains the
    /// pointer, in screen space so the pick feel does not change with zoom.
    pub(in crate::app) fn hovered_node(&self, ui: &Ui, rect: Rect) -> Option<usize> {
        if !ui.rect_contains_pointer(rect) {
            return None;
        }
        let pointer = ui.input(|input| input.pointer.hover_pos())?;

        self.graph
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let position =
                    world_to_screen(rect, self.pan, self.zoom, self.sim.position(index));
                let radius = node.radius * self.zoom + HOVER_SLOP;
                let distance = position.distance(pointer);
                (distance <= radius).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    /// Drag lifecycle: press over a node pins it and reheats the layout, the
    /// pin follows the pointer every frame, release unpins and lets the
    /// energy decay. The pin is cleared on release no matter where the
    /// pointer ends up.
    pub(in crate::app) fn handle_node_drag(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
        hovered: Option<usize>,
    ) {
        if response.drag_started_by(egui::PointerButton::Primary)
            && let Some(index) = hovered
        {
            self.dragged = Some(index);
            self.sim.reheat();
        }

        if let Some(index) = self.dragged
            && let Some(pointer) = ui.input(|input| input.pointer.interact_pos())
        {
            self.sim
                .pin(index, screen_to_world(rect, self.pan, self.zoom, pointer));
        }

        if response.drag_stopped() && self.dragged.take().is_some() {
            self.sim.unpin();
            self.sim.cool();
        }
    }

    /// Click navigation: section nodes scroll the page to their anchor
    /// block, post nodes open their URL. egui's click/drag displacement
    /// threshold keeps a real drag from also firing this.
    pub(in crate::app) fn navigate_to(&mut self, ui: &Ui, index: usize) {
        let Some(node) = self.graph.nodes.get(index) else {
            return;
        };
        match node.kind {
            NodeKind::Section => {
                log::debug!("navigating to section {}", node.id);
                self.pending_scroll = Some(node.id.clone());
            }
            NodeKind::Post => {
                if let Some(url) = &node.url {
                    log::debug!("opening post {}", node.id);
                    ui.ctx().open_url(egui::OpenUrl::new_tab(url));
                }
            }
        }
    }
}
