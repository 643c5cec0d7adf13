//! Lerped visual and transform aggregates.
//!
//! Both aggregates follow the same shape: a plain value tuple, a `current`
//! that is what the animator reads, a `target` that the engine writes, and
//! a single field-by-field step between them.

use glam::Vec2;
use nebula_signal::{smooth, TRANSFORM_FACTOR, VISUAL_FACTOR};

// ══════════════════════════════════════════════════════════════════════════════
//  Wave influence
// ══════════════════════════════════════════════════════════════════════════════

/// Blend factor between the stable and dynamic deformation fields.
/// Saturates at half the wave range so a full wave is all-dynamic well
/// before the layout value tops out.
pub fn wave_influence(wave_amount: f32) -> f32 {
    (wave_amount * 2.0).clamp(0.0, 1.0)
}

// ══════════════════════════════════════════════════════════════════════════════
//  Visual state
// ══════════════════════════════════════════════════════════════════════════════

/// An object's appearance channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visual {
    /// Base hue, degrees on the color wheel.
    pub hue:          f32,
    pub wave_amount:  f32,
    pub radius_scale: f32,
    /// Multiplier on autonomous spin and point-size pulse.
    pub spin_mult:    f32,
    pub opacity:      f32,
}

impl Visual {
    /// One smoothing step toward `target`, every field by the same factor.
    pub fn lerp_toward(&mut self, target: &Visual, factor: f32) {
        self.hue = smooth(self.hue, target.hue, factor);
        self.wave_amount = smooth(self.wave_amount, target.wave_amount, factor);
        self.radius_scale = smooth(self.radius_scale, target.radius_scale, factor);
        self.spin_mult = smooth(self.spin_mult, target.spin_mult, factor);
        self.opacity = smooth(self.opacity, target.opacity, factor);
    }
}

/// Current appearance chasing a settable target.
///
/// Hue is the one channel that does not chase: it drifts with time (see
/// [`advance_hue`](VisualState::advance_hue)) and the target is kept in
/// sync so the uniform lerp leaves it alone.
#[derive(Debug, Clone, Copy)]
pub struct VisualState {
    pub current: Visual,
    pub target:  Visual,
}

impl VisualState {
    pub fn new(hue: f32) -> Self {
        let start = Visual {
            hue,
            wave_amount:  0.0,
            radius_scale: 0.5,
            spin_mult:    1.0,
            opacity:      0.0,
        };
        VisualState { current: start, target: start }
    }

    /// One per-frame step of `current` toward `target`.
    pub fn step(&mut self) {
        self.current.lerp_toward(&self.target, VISUAL_FACTOR);
    }

    /// Drift the hue: a slow base cycle plus a wave-scaled boost.
    /// `degrees_per_sec` is the calm-state rate.
    pub fn advance_hue(&mut self, degrees_per_sec: f32, influence: f32, dt: f32) {
        let rate = degrees_per_sec * (1.0 + influence * 2.0);
        self.current.hue = (self.current.hue + rate * dt).rem_euclid(360.0);
        self.target.hue = self.current.hue;
    }
}

// ══════════════════════════════════════════════════════════════════════════════
//  Transform state
// ══════════════════════════════════════════════════════════════════════════════

/// An object's group-level transform channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale:    f32,
    /// User rotation (roll, tilt), radians.
    pub rotation: Vec2,
    /// User depth offset, world units.
    pub zoom:     f32,
}

impl Transform {
    pub const REST: Transform = Transform {
        scale:    1.0,
        rotation: Vec2::ZERO,
        zoom:     0.0,
    };

    /// One smoothing step toward `target`, every field by the same factor.
    pub fn lerp_toward(&mut self, target: &Transform, factor: f32) {
        self.scale = smooth(self.scale, target.scale, factor);
        self.rotation.x = smooth(self.rotation.x, target.rotation.x, factor);
        self.rotation.y = smooth(self.rotation.y, target.rotation.y, factor);
        self.zoom = smooth(self.zoom, target.zoom, factor);
    }
}

/// Current transform chasing a settable target. Heavier smoothing than
/// the visual channels; the whole group glides.
#[derive(Debug, Clone, Copy)]
pub struct TransformState {
    pub current: Transform,
    pub target:  Transform,
}

impl TransformState {
    pub fn new() -> Self {
        TransformState {
            current: Transform::REST,
            target:  Transform::REST,
        }
    }

    /// One per-frame step of `current` toward `target`.
    pub fn step(&mut self) {
        self.current.lerp_toward(&self.target, TRANSFORM_FACTOR);
    }
}

impl Default for TransformState {
    fn default() -> Self {
        TransformState::new()
    }
}

// ══════════════════════════════════════════════════════════════════════════════
//  Color
// ══════════════════════════════════════════════════════════════════════════════

/// HSV to packed ARGB (`0xAARRGGBB`, opaque). Hue in degrees, any range;
/// saturation and value in `[0, 1]`.
pub fn hsv_to_argb(h: f32, s: f32, v: f32) -> u32 {
    let h = h.rem_euclid(360.0) / 60.0;
    let c = v * s.clamp(0.0, 1.0);
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let byte = |f: f32| (((f + m).clamp(0.0, 1.0)) * 255.0) as u32;
    0xFF00_0000 | (byte(r) << 16) | (byte(g) << 8) | byte(b)
}

// ══════════════════════════════════════════════════════════════════════════════
//  Tests
// ══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ── Wave influence ────────────────────────────────────────────────────

    #[test]
    fn wave_influence_saturates_at_half_wave() {
        assert_eq!(wave_influence(0.0), 0.0);
        assert_relative_eq!(wave_influence(0.25), 0.5);
        assert_eq!(wave_influence(0.5), 1.0);
        assert_eq!(wave_influence(1.0), 1.0);
    }

    #[test]
    fn wave_influence_is_clamped_for_wild_input() {
        assert_eq!(wave_influence(-3.0), 0.0);
        assert_eq!(wave_influence(40.0), 1.0);
    }

    // ── Aggregates ────────────────────────────────────────────────────────

    #[test]
    fn visual_state_chases_its_target() {
        let mut vis = VisualState::new(200.0);
        vis.target.opacity = 1.0;
        vis.target.radius_scale = 1.0;
        for _ in 0..200 {
            vis.step();
        }
        assert_relative_eq!(vis.current.opacity, 1.0, epsilon = 1e-4);
        assert_relative_eq!(vis.current.radius_scale, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn one_visual_step_is_partial() {
        let mut vis = VisualState::new(0.0);
        vis.target.opacity = 1.0;
        vis.step();
        assert!(vis.current.opacity > 0.0 && vis.current.opacity < 1.0);
    }

    #[test]
    fn hue_drift_wraps_and_keeps_target_synced() {
        let mut vis = VisualState::new(350.0);
        vis.advance_hue(30.0, 0.0, 1.0);
        assert_relative_eq!(vis.current.hue, 20.0, epsilon = 1e-3);
        assert_eq!(vis.current.hue, vis.target.hue);
    }

    #[test]
    fn hue_drifts_faster_under_wave_influence() {
        let mut calm = VisualState::new(0.0);
        let mut wavy = VisualState::new(0.0);
        calm.advance_hue(30.0, 0.0, 0.1);
        wavy.advance_hue(30.0, 1.0, 0.1);
        assert!(wavy.current.hue > calm.current.hue);
    }

    #[test]
    fn transform_state_glides_slower_than_visuals() {
        let mut vis = VisualState::new(0.0);
        let mut xf = TransformState::new();
        vis.target.opacity = 1.0;
        xf.target.zoom = 1.0;
        vis.step();
        xf.step();
        assert!(xf.current.zoom < vis.current.opacity);
    }

    // ── Color ─────────────────────────────────────────────────────────────

    #[test]
    fn hsv_primaries_land_on_pure_channels() {
        assert_eq!(hsv_to_argb(0.0, 1.0, 1.0), 0xFFFF0000);
        assert_eq!(hsv_to_argb(120.0, 1.0, 1.0), 0xFF00FF00);
        assert_eq!(hsv_to_argb(240.0, 1.0, 1.0), 0xFF0000FF);
    }

    #[test]
    fn hsv_is_opaque_and_periodic() {
        for h in [-360.0, 0.0, 47.0, 360.0, 720.0] {
            let c = hsv_to_argb(h, 0.8, 0.9);
            assert_eq!(c >> 24, 0xFF);
        }
        assert_eq!(hsv_to_argb(90.0, 0.7, 0.8), hsv_to_argb(450.0, 0.7, 0.8));
    }

    #[test]
    fn zero_saturation_is_grey() {
        let c = hsv_to_argb(123.0, 0.0, 0.5);
        let r = (c >> 16) & 0xFF;
        let g = (c >> 8) & 0xFF;
        let b = c & 0xFF;
        assert_eq!(r, g);
        assert_eq!(g, b);
    }
}
