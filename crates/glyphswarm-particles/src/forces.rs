//! Per-mode force shapes and point-source falloff

use glyphswarm_core::{ForcePoint, InteractionMode, Vec2};

/// Squared-distance floor guarding the direction normalization
pub const MIN_DIST_SQ: f32 = 1e-4;
/// Attraction is weaker than repulsion so particles do not pile onto a fingertip
pub const ATTRACT_SCALE: f32 = 0.65;
/// Velocity retained per frame while a particle is held in freeze mode
pub const FREEZE_DAMPING: f32 = 0.5;

/// Maps a unit direction (source → particle) and magnitude to a force
pub type ForceShape = fn(Vec2, f32) -> Vec2;

fn repulse(dir: Vec2, magnitude: f32) -> Vec2 {
    dir * magnitude
}

fn attract(dir: Vec2, magnitude: f32) -> Vec2 {
    dir * (-magnitude * ATTRACT_SCALE)
}

/// Counter-clockwise tangent in canvas space
fn vortex(dir: Vec2, magnitude: f32) -> Vec2 {
    Vec2::new(-dir.y, dir.x) * magnitude
}

/// Shape for `mode`, chosen once per frame. Freeze applies no force; it
/// damps and pins particles instead.
pub fn force_shape(mode: InteractionMode) -> Option<ForceShape> {
    match mode {
        InteractionMode::Repulse => Some(repulse),
        InteractionMode::Attract => Some(attract),
        InteractionMode::Vortex => Some(vortex),
        InteractionMode::Freeze => None,
    }
}

/// Unit direction from `origin` to `position`, zero when they coincide
pub fn direction(origin: Vec2, position: Vec2) -> (Vec2, f32) {
    let rel = position - origin;
    let dist = rel.length_squared().max(MIN_DIST_SQ).sqrt();
    (rel * (1.0 / dist), dist)
}

/// Direction and linear-falloff magnitude if `position` is inside the source
pub fn influence(source: &ForcePoint, position: Vec2) -> Option<(Vec2, f32)> {
    if source.radius <= 0.0 {
        return None;
    }
    let rel = position - source.position();
    if rel.length_squared() >= source.radius * source.radius {
        return None;
    }
    let (dir, dist) = direction(source.position(), position);
    let magnitude = (1.0 - dist / source.radius) * source.strength;
    Some((dir, magnitude))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn source() -> ForcePoint {
        ForcePoint::new(0.0, 0.0, 100.0, 10.0)
    }

    #[test]
    fn outside_radius_has_no_influence() {
        assert!(influence(&source(), Vec2::new(100.0, 0.0)).is_none());
        assert!(influence(&source(), Vec2::new(80.0, 80.0)).is_none());
        let dead = ForcePoint::new(0.0, 0.0, 0.0, 10.0);
        assert!(influence(&dead, Vec2::ZERO).is_none());
    }

    #[test]
    fn falloff_is_linear() {
        let (_, m) = influence(&source(), Vec2::new(25.0, 0.0)).unwrap();
        assert!((m - 7.5).abs() < 1e-5);
        let (_, m) = influence(&source(), Vec2::new(0.0, 75.0)).unwrap();
        assert!((m - 2.5).abs() < 1e-5);
    }

    #[test]
    fn coincident_point_yields_zero_direction() {
        let (dir, m) = influence(&source(), Vec2::ZERO).unwrap();
        assert_eq!(dir, Vec2::ZERO);
        assert!(m.is_finite());
        let shape = force_shape(InteractionMode::Repulse).unwrap();
        assert_eq!(shape(dir, m), Vec2::ZERO);
    }

    #[test]
    fn attract_points_inward_and_weaker() {
        let shape = force_shape(InteractionMode::Attract).unwrap();
        let f = shape(Vec2::new(1.0, 0.0), 10.0);
        assert!((f.x + 6.5).abs() < 1e-5);
        assert_eq!(f.y, 0.0);
    }

    #[test]
    fn vortex_is_tangential() {
        let shape = force_shape(InteractionMode::Vortex).unwrap();
        let dir = Vec2::new(0.6, 0.8);
        let f = shape(dir, 5.0);
        assert!(f.dot(&dir).abs() < 1e-5);
        assert!((f.length() - 5.0).abs() < 1e-5);
    }

    #[test]
    fn freeze_has_no_shape() {
        assert!(force_shape(InteractionMode::Freeze).is_none());
    }

    proptest! {
        #[test]
        fn repulse_is_colinear_and_outward(
            sx in -500.0f32..500.0,
            sy in -500.0f32..500.0,
            angle in 0.0f32..std::f32::consts::TAU,
            dist in 0.5f32..99.0,
        ) {
            let src = ForcePoint::new(sx, sy, 100.0, 20.0);
            let pos = Vec2::new(sx + angle.cos() * dist, sy + angle.sin() * dist);
            let (dir, m) = influence(&src, pos).unwrap();
            let f = force_shape(InteractionMode::Repulse).unwrap()(dir, m);
            let rel = pos - src.position();
            prop_assert!(f.dot(&rel) > 0.0);
            prop_assert!(f.perp_dot(&rel).abs() <= 1e-3 * f.length() * rel.length());
        }
    }
}
