//! Exponential smoothing primitives.
//!
//! Every continuously-varying quantity in the engine (hand position, pinch,
//! rotation, layout values, visual and transform channels) converges through
//! the same one-step form: `smoothed += (incoming − smoothed) × factor`.

use glam::{Vec2, Vec3};

// ══════════════════════════════════════════════════════════════════════════════
//  Tuned smoothing factors
// ══════════════════════════════════════════════════════════════════════════════
// Per-frame blend weights, found by feel on live input: 0 freezes, 1 tracks
// the incoming value instantly.

/// Hand-center position. Responsive, but steady enough to damp jitter.
pub const POSITION_FACTOR: f32 = 0.30;

/// Pinch and rotation. Heavier than position; gesture noise reads worse.
pub const GESTURE_FACTOR: f32 = 0.20;

/// Visual channels (wave, radius, spin, opacity).
pub const VISUAL_FACTOR: f32 = 0.25;

/// Group transform (scale, rotation, zoom). Slowest; large masses glide.
pub const TRANSFORM_FACTOR: f32 = 0.08;

/// Ceiling for frame-rate-derived factors. Kept below 1 so a long frame
/// stall can never make an interpolated state land exactly on its target.
pub const MAX_RATE_STEP: f32 = 0.95;

// ══════════════════════════════════════════════════════════════════════════════
//  Smoothing steps
// ══════════════════════════════════════════════════════════════════════════════

/// One exponential smoothing step: move `prev` toward `next` by `factor`.
///
/// `factor` is clamped to `[0, 1]`: `0` keeps `prev`, `1` returns `next`
/// exactly, anything between glides.
///
/// # Example
/// ```
/// use nebula_signal::smooth;
///
/// assert_eq!(smooth(0.0, 10.0, 0.5), 5.0);
/// assert_eq!(smooth(3.0, 3.0, 0.7), 3.0);  // already at the target
/// assert_eq!(smooth(1.0, 9.0, 1.0), 9.0);  // full step
/// ```
pub fn smooth(prev: f32, next: f32, factor: f32) -> f32 {
    prev + (next - prev) * factor.clamp(0.0, 1.0)
}

/// [`smooth`] applied per component.
pub fn smooth_vec2(prev: Vec2, next: Vec2, factor: f32) -> Vec2 {
    Vec2::new(
        smooth(prev.x, next.x, factor),
        smooth(prev.y, next.y, factor),
    )
}

/// [`smooth`] applied per component.
pub fn smooth_vec3(prev: Vec3, next: Vec3, factor: f32) -> Vec3 {
    Vec3::new(
        smooth(prev.x, next.x, factor),
        smooth(prev.y, next.y, factor),
        smooth(prev.z, next.z, factor),
    )
}

/// Frame-rate-independent smoothing factor for a convergence `rate` (per
/// second) over an elapsed frame time `dt` (seconds). Linear in `dt` for
/// ordinary frame times, capped at [`MAX_RATE_STEP`].
pub fn rate_factor(rate: f32, dt: f32) -> f32 {
    (rate * dt).clamp(0.0, MAX_RATE_STEP)
}

// ══════════════════════════════════════════════════════════════════════════════
//  Tests
// ══════════════════════════════════════════════════════════════════════════════
