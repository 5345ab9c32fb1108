use std::collections::{HashMap, VecDeque};

use eframe::egui::{self, Align, Context, Layout, Vec2};

use crate::registry::{POSTS_CATEGORY_KEY, Registry};

use super::super::physics::{SimPhase, Simulation};
use super::super::{GraphVariant, LayoutTuning, SectionGraph, ViewModel};

impl ViewModel {
    pub(in crate::app) fn new(registry: Registry, variant: GraphVariant) -> Self {
        // Every category starts expanded, including the synthesized posts
        // category, so the sidebar opens showing the whole registry.
        let expanded = registry
            .categories
            .iter()
            .map(|category| category.key.clone())
            .chain(std::iter::once(POSTS_CATEGORY_KEY.to_string()))
            .collect();

        Self {
            registry,
            variant,
            graph: SectionGraph::default(),
            sim: Simulation::new(&SectionGraph::default(), Vec2::ZERO, &HashMap::new()),
            graph_size: Vec2::ZERO,
            pan: Vec2::ZERO,
            zoom: 0.9,
            highlighted: None,
            sidebar_hover: None,
            dragged: None,
            pending_scroll: None,
            sidebar_open: true,
            expanded,
            search: String::new(),
            search_match_cache: None,
            graph_revision: 0,
            graph_dirty: true,
            tuning: LayoutTuning::default(),
            show_fps: false,
            fps_current: 0.0,
            fps_samples: VecDeque::new(),
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        self.update_fps_counter(ctx);
        // Sidebar hover is re-asserted every frame by the row under the
        // pointer; clearing here is the stale-hover guard.
        self.sidebar_hover = None;

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("folio-graph");
                    ui.separator();
                    ui.toggle_value(&mut self.sidebar_open, "Sections");

                    let mut variant = self.variant;
                    ui.selectable_value(&mut variant, GraphVariant::SectionsOnly, "Sections only");
                    ui.selectable_value(&mut variant, GraphVariant::WithPosts, "With posts");
                    self.set_variant(variant);

                    if ui.button("Reset view").clicked() {
                        self.reset_camera();
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.toggle_value(&mut self.show_fps, "fps");
                        if let Some(fps_text) = self.fps_display_text() {
                            ui.label(fps_text);
                        }
                        ui.label(self.layout_phase_text());
                        ui.separator();
                        ui.label(format!(
                            "{} nodes / {} edges",
                            self.graph.nodes.len(),
                            self.graph.edges.len()
                        ));
                    });
                });
            });

        egui::SidePanel::left("sections_sidebar")
            .resizable(true)
            .default_width(260.0)
            .show_animated(ctx, self.sidebar_open, |ui| self.draw_sidebar(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_page(ui));
    }

    fn layout_phase_text(&self) -> &'static str {
        match self.sim.phase() {
            SimPhase::Idle => "empty",
            SimPhase::Running => "layout running",
            SimPhase::Settling => "layout settled",
            SimPhase::Stopped => "layout stopped",
        }
    }
}
