use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use eframe::egui::{self, Context, Vec2};

use crate::registry::{Registry, load_registry};

mod graph;
mod highlight;
mod physics;
mod render_utils;
mod ui;

use graph::build_section_graph;
use physics::Simulation;

pub struct FolioGraphApp {
    state: AppState,
}

enum AppState {
    Ready(Box<ViewModel>),
    Error(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GraphVariant {
    SectionsOnly,
    WithPosts,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NodeKind {
    Section,
    Post,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EdgeKind {
    Content,
    Tag,
}

struct GraphNode {
    id: String,
    title: String,
    label: String,
    category: String,
    kind: NodeKind,
    url: Option<String>,
    connection_count: usize,
    radius: f32,
}

struct GraphEdge {
    source: usize,
    target: usize,
    kind: EdgeKind,
    weight: f32,
    reason: Option<String>,
}

#[derive(Default)]
struct SectionGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    index_by_id: HashMap<String, usize>,
    adjacent: Vec<Vec<usize>>,
    draw_order: Vec<usize>,
}

impl SectionGraph {
    fn connected(&self, a: usize, b: usize) -> bool {
        self.adjacent
            .get(a)
            .is_some_and(|neighbors| neighbors.contains(&b))
    }
}

#[derive(Clone, Copy)]
struct LayoutTuning {
    repulsion_scale: f32,
    spring_scale: f32,
    center_scale: f32,
    collision_scale: f32,
}

impl Default for LayoutTuning {
    fn default() -> Self {
        Self {
            repulsion_scale: 1.0,
            spring_scale: 1.0,
            center_scale: 1.0,
            collision_scale: 1.0,
        }
    }
}

struct SearchMatchCache {
    query: String,
    graph_revision: u64,
    matches: Arc<HashSet<usize>>,
}

struct ViewModel {
    registry: Registry,
    variant: GraphVariant,
    graph: SectionGraph,
    sim: Simulation,
    graph_size: Vec2,
    pan: Vec2,
    zoom: f32,
    highlighted: Option<String>,
    sidebar_hover: Option<String>,
    dragged: Option<usize>,
    pending_scroll: Option<String>,
    sidebar_open: bool,
    expanded: HashSet<String>,
    search: String,
    search_match_cache: Option<SearchMatchCache>,
    graph_revision: u64,
    graph_dirty: bool,
    tuning: LayoutTuning,
    show_fps: bool,
    fps_current: f32,
    fps_samples: VecDeque<f32>,
}

/// Canvas height follows the page width at a fixed aspect, capped.
fn derive_graph_height(width: f32) -> f32 {
    (width * 0.6).min(500.0)
}

impl FolioGraphApp {
    pub fn new(cc: &eframe::CreationContext<'_>, with_posts: bool) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let variant = if with_posts {
            GraphVariant::WithPosts
        } else {
            GraphVariant::SectionsOnly
        };

        let state = match load_registry() {
            Ok(registry) => {
                log::info!(
                    "registry loaded: {} sections, {} posts",
                    registry.section_count(),
                    registry.post_count()
                );
                AppState::Ready(Box::new(ViewModel::new(registry, variant)))
            }
            Err(error) => AppState::Error(format!("{error:#}")),
        };

        Self { state }
    }
}

impl eframe::App for FolioGraphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        match &mut self.state {
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load portfolio content");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                });
            }
            AppState::Ready(model) => model.show(ctx),
        }
    }
}

impl ViewModel {
    fn set_variant(&mut self, variant: GraphVariant) {
        if self.variant != variant {
            self.variant = variant;
            self.graph_dirty = true;
        }
    }

    fn reset_camera(&mut self) {
        self.zoom = 0.9;
        self.pan = self.graph_size * ((1.0 - self.zoom) * 0.5);
    }

    /// Rebuild the graph and its engine when the variant changed or the
    /// canvas size moved. A variant toggle carries surviving node positions
    /// over; a resize changes the centering target, so those layouts start
    /// from a fresh scatter and a re-centered camera.
    fn ensure_graph(&mut self, size: Vec2) {
        let resized = (size.x - self.graph_size.x).abs() > 0.5
            || (size.y - self.graph_size.y).abs() > 0.5;
        if !self.graph_dirty && !resized {
            return;
        }

        let carried = if resized {
            HashMap::new()
        } else {
            self.sim.bodies_by_id(&self.graph)
        };

        self.sim.stop();
        self.graph = build_section_graph(&self.registry, self.variant);
        self.graph_size = size;
        self.sim = Simulation::new(&self.graph, size, &carried);
        self.graph_revision = self.graph_revision.wrapping_add(1);
        self.search_match_cache = None;
        self.highlighted = None;
        self.sidebar_hover = None;
        self.dragged = None;
        if resized {
            self.reset_camera();
        }
        self.graph_dirty = false;

        log::debug!(
            "graph rebuilt: {} nodes, {} edges, {:?}, {}x{}",
            self.graph.nodes.len(),
            self.graph.edges.len(),
            self.variant,
            size.x as i32,
            size.y as i32
        );
    }
}
