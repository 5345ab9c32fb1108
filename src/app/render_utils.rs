use eframe::egui::{Color32, Painter, Pos2, Rect, Vec2};

const BASE_RADIUS: f32 = 6.0;
const RADIUS_PER_CONNECTION: f32 = 2.0;
const RADIUS_BONUS_CAP: f32 = 10.0;

/// Node radius grows with connection count but is bounded, so hubs stay
/// readable instead of swallowing the layout.
pub(super) fn node_radius(connection_count: usize) -> f32 {
    BASE_RADIUS + (connection_count as f32 * RADIUS_PER_CONNECTION).min(RADIUS_BONUS_CAP)
}

/// Fill tiers by connection count, darkest for the best-connected nodes.
pub(super) fn node_fill(connection_count: usize) -> Color32 {
    match connection_count {
        0 => Color32::from_rgb(183, 205, 214),
        1..=2 => Color32::from_rgb(142, 177, 194),
        3..=4 => Color32::from_rgb(106, 154, 173),
        _ => Color32::from_rgb(77, 127, 148),
    }
}

pub(super) fn edge_color(tag_edge: bool) -> Color32 {
    if tag_edge {
        Color32::from_rgb(167, 200, 212)
    } else {
        Color32::from_rgb(142, 177, 194)
    }
}

pub(super) const LABEL_COLOR: Color32 = Color32::from_rgb(58, 66, 71);
pub(super) const CANVAS_FILL: Color32 = Color32::from_rgb(250, 250, 248);

/// Scale a color's alpha; emphasis opacities arrive in [0, 1].
pub(super) fn fade(color: Color32, opacity: f32) -> Color32 {
    let opacity = opacity.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (color.a() as f32 * opacity) as u8,
    )
}

/// Dotted backdrop lattice that pans and zooms with the camera, so dragging
/// reads as moving the world rather than the nodes.
pub(super) fn draw_background(painter: &Painter, rect: Rect, pan: Vec2, zoom: f32) {
    painter.rect_filled(rect, 0.0, CANVAS_FILL);

    let step = (24.0 * zoom.clamp(0.6, 1.8)).max(14.0);
    let origin = rect.min + pan;
    let dot = Color32::from_rgba_unmultiplied(120, 130, 136, 60);

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
        while y < rect.bottom() {
            painter.circle_filled(Pos2::new(x, y), 1.0, dot);
            y += step;
        }
        x += step;
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn edge_visible(rect: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    let min_x = start.x.min(end.x) - padding;
    let max_x = start.x.max(end.x) + padding;
    let min_y = start.y.min(end.y) - padding;
    let max_y = start.y.max(end.y) + padding;

    !(max_x < rect.left() || min_x > rect.right() || max_y < rect.top() || min_y > rect.bottom())
}

/// Layout space has its origin at the canvas top-left; the camera is a pan
/// translation plus a uniform zoom about that origin.
pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.min + pan + world * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.min - pan) / zoom
}

#[cfg(test)]
mod tests {
    use eframe::egui::{Pos2, Rect, pos2, vec2};

    use super::{circle_visible, edge_visible, node_radius, screen_to_world, world_to_screen};

    #[test]
    fn radius_is_monotonic_and_capped() {
        let radii = (0..10).map(node_radius).collect::<Vec<_>>();
        for pair in radii.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert_eq!(radii[0], 6.0);
        assert_eq!(radii[1], 8.0);
        assert_eq!(radii[5], 16.0);
        assert_eq!(radii[9], 16.0);
    }

    #[test]
    fn world_screen_transforms_round_trip() {
        let rect = Rect::from_min_size(pos2(40.0, 20.0), vec2(800.0, 480.0));
        let pan = vec2(12.0, -7.0);
        let zoom = 1.7;

        let world = vec2(310.0, 95.0);
        let screen = world_to_screen(rect, pan, zoom, world);
        let back = screen_to_world(rect, pan, zoom, screen);
        assert!((back - world).length() < 0.001);
    }

    #[test]
    fn camera_centered_layout_lands_on_rect_center() {
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(800.0, 480.0));
        let size = vec2(800.0, 480.0);
        let zoom = 0.9;
        let pan = size * ((1.0 - zoom) * 0.5);

        let screen = world_to_screen(rect, pan, zoom, size * 0.5);
        assert!((screen - rect.center()).length() < 0.001);
    }

    #[test]
    fn offscreen_shapes_are_culled() {
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(100.0, 100.0));

        assert!(circle_visible(rect, pos2(50.0, 50.0), 5.0));
        assert!(circle_visible(rect, pos2(-3.0, 50.0), 5.0));
        assert!(!circle_visible(rect, pos2(-20.0, 50.0), 5.0));

        assert!(edge_visible(rect, pos2(-50.0, 50.0), pos2(150.0, 50.0), 2.0));
        assert!(!edge_visible(rect, pos2(-50.0, -40.0), pos2(150.0, -30.0), 2.0));
    }
}
