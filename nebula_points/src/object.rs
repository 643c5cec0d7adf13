//! The procedural point animator.
//!
//! A [`PointCloudObject`] owns one spherical particle cluster and a few
//! concentric rings, all with immutable rest positions, and recomputes
//! every rendered position and color each frame. Two deformation fields
//! act on the cluster: a uniform breathing scale (stable) and a pair of
//! orthogonal traveling waves evaluated at each rest coordinate
//! (dynamic). The current wave amount blends between them.

use glam::{Mat3, Vec3};

use crate::sphere::{ring_angle, ring_points, sphere_points};
use crate::visual::{hsv_to_argb, wave_influence, TransformState, VisualState};

// ══════════════════════════════════════════════════════════════════════════════
//  Animation tuning
// ══════════════════════════════════════════════════════════════════════════════
// Frequencies in rad/s, wave frequency per world unit, amplitudes as
// fractions of the rest radius.

/// Stable field: breathing oscillation.
pub const BREATH_FREQ: f32 = 1.2;
pub const BREATH_AMP: f32 = 0.06;

/// Dynamic field: two orthogonal traveling waves over rest coordinates.
pub const WAVE_FREQ: f32 = 2.4;
pub const WAVE_SPEED: f32 = 1.8;
pub const WAVE_AMP: f32 = 0.12;

/// Autonomous group spin, scaled by the spin multiplier.
pub const SPIN_SPEED: f32 = 0.25;

/// Point sprite size: base pixels plus a spin-scaled sinusoidal pulse.
pub const POINT_SIZE: f32 = 3.0;
pub const PULSE_AMP: f32 = 1.2;
pub const PULSE_FREQ: f32 = 3.0;

/// Ring displacement amplitude at zero and full wave influence.
pub const RING_STABLE_CHAOS: f32 = 0.04;
pub const RING_DYNAMIC_CHAOS: f32 = 0.25;

/// Whole-ring rotation rate; direction alternates by ring index.
pub const RING_SPIN: f32 = 0.4;

/// Calm-state hue drift, degrees per second.
pub const HUE_DRIFT: f32 = 12.0;

/// Below this opacity the object is culled from rendering.
pub const VISIBLE_OPACITY: f32 = 0.01;

// ══════════════════════════════════════════════════════════════════════════════
//  Configuration
// ══════════════════════════════════════════════════════════════════════════════

/// Geometry parameters, fixed at object creation.
#[derive(Debug, Clone, Copy)]
pub struct ObjectConfig {
    pub cluster_points: usize,
    pub cluster_radius: f32,
    pub rings:          usize,
    pub ring_points:    usize,
    /// Innermost ring radius; each further ring adds `ring_gap`.
    pub ring_radius:    f32,
    pub ring_gap:       f32,
    /// Starting hue, degrees.
    pub base_hue:       f32,
}

impl Default for ObjectConfig {
    fn default() -> Self {
        ObjectConfig {
            cluster_points: 900,
            cluster_radius: 1.4,
            rings:          3,
            ring_points:    96,
            ring_radius:    2.0,
            ring_gap:       0.45,
            base_hue:       210.0,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
//  Rings
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
struct Ring {
    rest: Vec<Vec3>,
    /// Accumulated rotation about x and y; signs alternate by index.
    tilt: f32,
    turn: f32,
    dir:  f32,
}

// ══════════════════════════════════════════════════════════════════════════════
//  Point-cloud object
// ══════════════════════════════════════════════════════════════════════════════

/// Per-frame render snapshot: deformed local-space buffers plus the
/// group transform the renderer applies once.
#[derive(Debug)]
pub struct ObjectFrame<'a> {
    pub positions:  &'a [Vec3],
    pub colors:     &'a [u32],
    pub point_size: f32,
    pub translation: Vec3,
    /// Effective group rotation (about x, about y) after blending the
    /// autonomous spin with the user's rotation.
    pub rot_x:      f32,
    pub rot_y:      f32,
    pub scale:      f32,
    pub opacity:    f32,
    pub visible:    bool,
}

/// One controlled object: immutable rest geometry, lerped visual and
/// transform state, and the derived buffers rewritten every tick.
#[derive(Debug, Clone)]
pub struct PointCloudObject {
    rest:  Vec<Vec3>,
    rings: Vec<Ring>,

    pub visual:    VisualState,
    pub transform: TransformState,

    /// Layout-interpolated horizontal offset, applied as-is.
    x_offset:   f32,
    spin_angle: f32,

    // Derived per frame; never read back.
    positions:  Vec<Vec3>,
    colors:     Vec<u32>,
    point_size: f32,
}

impl PointCloudObject {
    pub fn new(cfg: &ObjectConfig) -> Self {
        let rest = sphere_points(cfg.cluster_points, cfg.cluster_radius);
        let rings: Vec<Ring> = (0..cfg.rings)
            .map(|k| Ring {
                rest: ring_points(cfg.ring_points, cfg.ring_radius + cfg.ring_gap * k as f32),
                tilt: 0.0,
                turn: 0.0,
                dir:  if k % 2 == 0 { 1.0 } else { -1.0 },
            })
            .collect();

        let total = rest.len() + rings.iter().map(|r| r.rest.len()).sum::<usize>();
        PointCloudObject {
            rest,
            rings,
            visual: VisualState::new(cfg.base_hue),
            transform: TransformState::new(),
            x_offset: 0.0,
            spin_angle: 0.0,
            positions: vec![Vec3::ZERO; total],
            colors: vec![0; total],
            point_size: POINT_SIZE,
        }
    }

    /// Total particle count, cluster plus rings.
    pub fn point_count(&self) -> usize {
        self.positions.len()
    }

    /// The immutable cluster rest positions.
    pub fn rest_positions(&self) -> &[Vec3] {
        &self.rest
    }

    /// Feed this frame's interpolated layout values. The offset is used
    /// directly (already smoothed upstream); the rest become visual
    /// targets so appearance keeps its own glide.
    pub fn apply_layout(&mut self, x_offset: f32, opacity: f32, radius_scale: f32, wave: f32) {
        self.x_offset = x_offset;
        self.visual.target.opacity = opacity;
        self.visual.target.radius_scale = radius_scale;
        self.visual.target.wave_amount = wave;
    }

    /// Advance all animation state and rewrite the derived buffers.
    /// `elapsed` is wall-clock seconds since session start.
    pub fn tick(&mut self, dt: f32, elapsed: f32) {
        self.visual.step();
        self.transform.step();

        let vis = self.visual.current;
        let influence = wave_influence(vis.wave_amount);
        self.visual.advance_hue(HUE_DRIFT, influence, dt);
        self.spin_angle += SPIN_SPEED * vis.spin_mult * dt;

        self.animate_cluster(elapsed, influence);
        self.animate_rings(dt, elapsed, influence);

        self.point_size =
            (POINT_SIZE + (elapsed * PULSE_FREQ).sin() * PULSE_AMP * vis.spin_mult).max(0.5);
    }

    /// Borrow the current render snapshot.
    pub fn frame(&self) -> ObjectFrame<'_> {
        let vis = self.visual.current;
        let xf = self.transform.current;
        let influence = wave_influence(vis.wave_amount);

        // Calm objects autorotate; wavy ones hand rotation to the user.
        let rot_y = self.spin_angle * (1.0 - influence) + xf.rotation.x * influence;
        let rot_x = xf.rotation.y * influence;

        ObjectFrame {
            positions: &self.positions,
            colors: &self.colors,
            point_size: self.point_size,
            translation: Vec3::new(self.x_offset, 0.0, xf.zoom),
            rot_x,
            rot_y,
            scale: xf.scale * vis.radius_scale,
            opacity: vis.opacity,
            visible: vis.opacity >= VISIBLE_OPACITY,
        }
    }

    // ── Cluster ───────────────────────────────────────────────────────────

    fn animate_cluster(&mut self, elapsed: f32, influence: f32) {
        let hue = self.visual.current.hue;
        let stable = 1.0 + (elapsed * BREATH_FREQ).sin() * BREATH_AMP;
        let value = 0.78 + influence * 0.22;

        for (i, rest) in self.rest.iter().enumerate() {
            let dynamic = 1.0
                + ((rest.x * WAVE_FREQ + elapsed * WAVE_SPEED).sin()
                    + (rest.y * WAVE_FREQ + elapsed * WAVE_SPEED * 1.3).sin())
                    * WAVE_AMP;
            let factor = stable + (dynamic - stable) * influence;
            self.positions[i] = *rest * factor;
            self.colors[i] = hsv_to_argb(hue + rest.y * 18.0, 0.75, value);
        }
    }

    // ── Rings ─────────────────────────────────────────────────────────────

    fn animate_rings(&mut self, dt: f32, elapsed: f32, influence: f32) {
        let hue = self.visual.current.hue;
        let chaos =
            RING_STABLE_CHAOS + (RING_DYNAMIC_CHAOS - RING_STABLE_CHAOS) * influence;

        let mut cursor = self.rest.len();
        for (k, ring) in self.rings.iter_mut().enumerate() {
            ring.tilt += RING_SPIN * 0.6 * ring.dir * dt;
            ring.turn += RING_SPIN * ring.dir * dt;
            let spin = Mat3::from_rotation_y(ring.turn) * Mat3::from_rotation_x(ring.tilt);
            let phase = k as f32 * 1.9;
            let ring_hue = hue + 40.0 + k as f32 * 25.0;

            let n = ring.rest.len();
            for (i, rest) in ring.rest.iter().enumerate() {
                let a = ring_angle(i, n);
                let lift = (a * 3.0 + elapsed * 2.1 + phase).sin() * chaos;
                let swell = 1.0 + (a * 2.0 - elapsed * 1.7 + phase).sin() * chaos;
                let displaced = Vec3::new(rest.x * swell, lift, rest.z * swell);
                self.positions[cursor] = spin * displaced;
                self.colors[cursor] = hsv_to_argb(ring_hue, 0.6, 0.85);
                cursor += 1;
            }
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
//  Tests
// ══════════════════════════════════════════════════════════════════════════════
