mod forces;

use std::collections::HashMap;

use eframe::egui::{Vec2, vec2};

use crate::util::stable_pair;

use super::{EdgeKind, LayoutTuning, SectionGraph};
use forces::{accumulate_centering, accumulate_collisions, accumulate_repulsion};

const REPULSION_STRENGTH: f32 = 250.0;
const REPULSION_SOFTENING: f32 = 60.0;
const CENTER_PULL: f32 = 0.03;
const COLLISION_MARGIN: f32 = 30.0;
const COLLISION_STRENGTH: f32 = 0.5;
const SPRING_DAMPING: f32 = 0.2;
const VELOCITY_DECAY: f32 = 0.6;
const MAX_FORCE: f32 = 60.0;
const MAX_SPEED: f32 = 40.0;

const ALPHA_DECAY: f32 = 0.05;
const ALPHA_REHEAT_TARGET: f32 = 0.3;
const ALPHA_SETTLE: f32 = 0.02;
const SETTLE_KINETIC_ENERGY: f32 = 0.01;

/// Lifecycle of one layout run. `Settling` still accepts perturbation
/// (a reheat resumes `Running`); `Stopped` is terminal and idempotent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum SimPhase {
    Idle,
    Running,
    Settling,
    Stopped,
}

/// Mutable per-node layout state, owned exclusively by the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct Body {
    pub(in crate::app) position: Vec2,
    pub(in crate::app) velocity: Vec2,
    radius: f32,
}

struct Spring {
    source: usize,
    target: usize,
    rest_length: f32,
    strength: f32,
}

/// Force-directed layout over an arena of bodies parallel to the built node
/// list. Coordinates are layout space: origin at the canvas top-left,
/// centering target at `size / 2`, so a viewport change is a genuinely
/// different engine and forces a rebuild rather than a rescale.
pub(in crate::app) struct Simulation {
    bodies: Vec<Body>,
    springs: Vec<Spring>,
    center: Vec2,
    alpha: f32,
    alpha_target: f32,
    phase: SimPhase,
    pinned: Option<(usize, Vec2)>,
    force_scratch: Vec<Vec2>,
}

impl Simulation {
    /// Build bodies for the graph. Ids found in `carried` keep their previous
    /// position and velocity (variant toggles); everything else starts on a
    /// deterministic center-biased scatter.
    pub(in crate::app) fn new(
        graph: &SectionGraph,
        size: Vec2,
        carried: &HashMap<String, Body>,
    ) -> Self {
        let center = size * 0.5;
        let bodies = graph
            .nodes
            .iter()
            .map(|node| {
                carried
                    .get(&node.id)
                    .map(|body| Body {
                        radius: node.radius,
                        ..*body
                    })
                    .unwrap_or_else(|| {
                        let (jx, jy) = stable_pair(&node.id);
                        Body {
                            position: center + vec2(jx * size.x, jy * size.y) * 0.18,
                            velocity: Vec2::ZERO,
                            radius: node.radius,
                        }
                    })
            })
            .collect::<Vec<_>>();

        let springs = graph
            .edges
            .iter()
            .map(|edge| {
                let (rest_length, base_strength) = match edge.kind {
                    EdgeKind::Content => (80.0, 0.4),
                    EdgeKind::Tag => (120.0, 0.15),
                };
                Spring {
                    source: edge.source,
                    target: edge.target,
                    rest_length,
                    strength: base_strength * edge.weight,
                }
            })
            .collect();

        let phase = if bodies.is_empty() {
            SimPhase::Idle
        } else {
            SimPhase::Running
        };

        Self {
            force_scratch: vec![Vec2::ZERO; bodies.len()],
            bodies,
            springs,
            center,
            alpha: 1.0,
            alpha_target: 0.0,
            phase,
            pinned: None,
        }
    }

    pub(in crate::app) fn phase(&self) -> SimPhase {
        self.phase
    }

    pub(in crate::app) fn position(&self, index: usize) -> Vec2 {
        self.bodies
            .get(index)
            .map(|body| body.position)
            .unwrap_or(Vec2::ZERO)
    }

    /// Snapshot of body state keyed by node id, for carrying positions across
    /// a rebuild. The graph supplies the ids; bodies are index-parallel.
    pub(in crate::app) fn bodies_by_id(&self, graph: &SectionGraph) -> HashMap<String, Body> {
        graph
            .nodes
            .iter()
            .zip(&self.bodies)
            .map(|(node, body)| (node.id.clone(), *body))
            .collect()
    }

    /// Terminal and idempotent; a stopped engine ignores every later call.
    pub(in crate::app) fn stop(&mut self) {
        self.phase = SimPhase::Stopped;
        self.pinned = None;
    }

    /// Raise the cooling target so the layout relaxes around a perturbation,
    /// waking the engine if it had settled.
    pub(in crate::app) fn reheat(&mut self) {
        if self.phase == SimPhase::Stopped || self.bodies.is_empty() {
            return;
        }
        self.alpha_target = ALPHA_REHEAT_TARGET;
        self.alpha = self.alpha.max(ALPHA_REHEAT_TARGET);
        self.phase = SimPhase::Running;
    }

    /// Let the energy decay naturally after a perturbation ends.
    pub(in crate::app) fn cool(&mut self) {
        self.alpha_target = 0.0;
    }

    /// Force a body to the pointer position with zero velocity; it is held
    /// there on every tick until `unpin`.
    pub(in crate::app) fn pin(&mut self, index: usize, position: Vec2) {
        if self.phase == SimPhase::Stopped || index >= self.bodies.len() {
            return;
        }
        self.pinned = Some((index, position));
        self.bodies[index].position = position;
        self.bodies[index].velocity = Vec2::ZERO;
    }

    pub(in crate::app) fn unpin(&mut self) {
        self.pinned = None;
    }

    /// Advance the layout by one tick. Returns whether anything moved, so
    /// the caller knows to keep requesting frames. A settled or stopped
    /// engine is a cheap no-op.
    pub(in crate::app) fn step(&mut self, tuning: &LayoutTuning, dt: f32) -> bool {
        if !matches!(self.phase, SimPhase::Running) {
            return false;
        }

        // Normalize to a 60 Hz step so frame-rate swings do not change the
        // layout's behavior, clamped like any fixed-timestep integrator.
        let time_step_scale = (dt * 60.0).clamp(0.25, 3.0);
        self.alpha += (self.alpha_target - self.alpha) * ALPHA_DECAY * time_step_scale;

        let node_count = self.bodies.len();
        self.force_scratch.resize(node_count, Vec2::ZERO);
        self.force_scratch.fill(Vec2::ZERO);
        let forces = &mut self.force_scratch;

        if node_count > 1 {
            let positions = self
                .bodies
                .iter()
                .map(|body| body.position)
                .collect::<Vec<_>>();
            let radii = self.bodies.iter().map(|body| body.radius).collect::<Vec<_>>();

            accumulate_repulsion(
                &positions,
                REPULSION_STRENGTH * tuning.repulsion_scale * self.alpha,
                REPULSION_SOFTENING,
                forces,
            );
            accumulate_collisions(
                &positions,
                &radii,
                COLLISION_MARGIN,
                COLLISION_STRENGTH * tuning.collision_scale,
                forces,
            );
        }

        for spring in &self.springs {
            let delta = self.bodies[spring.source].position - self.bodies[spring.target].position;
            let direction = forces::separation_direction(delta, spring.source, spring.target);
            let distance = delta.length();

            let stretch = (distance - spring.rest_length)
                * spring.strength
                * tuning.spring_scale
                * self.alpha;
            let relative_velocity =
                self.bodies[spring.source].velocity - self.bodies[spring.target].velocity;
            let damping = relative_velocity.dot(direction) * SPRING_DAMPING;
            let correction = direction * (stretch + damping);

            forces[spring.source] -= correction;
            forces[spring.target] += correction;
        }

        {
            let positions = self
                .bodies
                .iter()
                .map(|body| body.position)
                .collect::<Vec<_>>();
            accumulate_centering(
                &positions,
                self.center,
                CENTER_PULL * tuning.center_scale * self.alpha,
                forces,
            );
        }

        let damping_factor = VELOCITY_DECAY.powf(time_step_scale);
        let pinned = self.pinned;
        let mut kinetic_energy = 0.0;
        for (index, body) in self.bodies.iter_mut().enumerate() {
            if let Some((pinned_index, target)) = pinned
                && pinned_index == index
            {
                body.position = target;
                body.velocity = Vec2::ZERO;
                continue;
            }

            let mut force = forces[index];
            let force_length = force.length();
            if force_length > MAX_FORCE {
                force *= MAX_FORCE / force_length;
            }

            let mut velocity = (body.velocity + force * time_step_scale) * damping_factor;
            let speed = velocity.length();
            if speed > MAX_SPEED {
                velocity *= MAX_SPEED / speed;
            }

            body.velocity = velocity;
            body.position += velocity * time_step_scale;
            kinetic_energy += velocity.length_sq();
        }

        if self.alpha < ALPHA_SETTLE
            && self.alpha_target < ALPHA_SETTLE
            && kinetic_energy < SETTLE_KINETIC_ENERGY
            && self.pinned.is_none()
        {
            self.phase = SimPhase::Settling;
            return false;
        }

        true
    }
}
