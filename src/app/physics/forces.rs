use eframe::egui::{Vec2, vec2};

/// Direction between two coincident bodies, derived from their indices so
/// overlapping pairs peel apart instead of oscillating through each other.
pub(super) fn separation_direction(delta: Vec2, from: usize, to: usize) -> Vec2 {
    let distance = delta.length();
    if distance > 0.0001 {
        delta / distance
    } else {
        let angle =
            ((from as f32) * 0.618_034 + (to as f32) * 0.414_214 + 0.17) * std::f32::consts::TAU;
        vec2(angle.cos(), angle.sin())
    }
}

/// Pairwise repulsion between every body, inverse to squared distance with a
/// softening term so near-coincident bodies stay finite. Direct O(n²); the
/// node counts here are tens, not hundreds.
pub(super) fn accumulate_repulsion(
    positions: &[Vec2],
    strength: f32,
    softening: f32,
    forces: &mut [Vec2],
) {
    for from in 0..positions.len() {
        for to in (from + 1)..positions.len() {
            let delta = positions[from] - positions[to];
            let direction = separation_direction(delta, from, to);
            let push = direction * (strength / (delta.length_sq() + softening));
            forces[from] += push;
            forces[to] -= push;
        }
    }
}

/// Hard overlap correction: when two circles (radius + margin) intersect,
/// push both apart in proportion to the overlap. Not scaled by the cooling
/// schedule, so settled layouts stay separated.
pub(super) fn accumulate_collisions(
    positions: &[Vec2],
    radii: &[f32],
    margin: f32,
    strength: f32,
    forces: &mut [Vec2],
) {
    for from in 0..positions.len() {
        for to in (from + 1)..positions.len() {
            let delta = positions[from] - positions[to];
            let min_distance = radii[from] + radii[to] + margin;
            let distance_sq = delta.length_sq();
            if distance_sq >= min_distance * min_distance {
                continue;
            }

            let direction = separation_direction(delta, from, to);
            let overlap = min_distance - distance_sq.sqrt();
            let push = direction * (overlap * strength);
            forces[from] += push;
            forces[to] -= push;
        }
    }
}

/// Weak independent pull toward the layout center on both axes.
pub(super) fn accumulate_centering(
    positions: &[Vec2],
    center: Vec2,
    pull: f32,
    forces: &mut [Vec2],
) {
    for (position, force) in positions.iter().zip(forces.iter_mut()) {
        *force += (center - *position) * pull;
    }
}
