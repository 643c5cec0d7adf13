//! Rest-position generation.
//!
//! Every particle's base coordinate is computed exactly once, at object
//! creation, and never touched again; animation only ever derives from
//! these. The cluster uses a golden-angle spiral so points spread
//! near-uniformly over the sphere with no clustering at the poles, and the
//! rings are flat circles indexed by their fixed angle.

use glam::Vec3;

/// Golden ratio, the spiral's angular stride.
pub const PHI: f32 = 1.618_034;

/// Rest positions for a cluster of `count` points on a sphere of `radius`.
///
/// Point `i` sits at spiral longitude `2π·i/φ` and colatitude
/// `acos(1 − 2(i+0.5)/count)`; every point lies exactly on the radius.
pub fn sphere_points(count: usize, radius: f32) -> Vec<Vec3> {
    let mut points = Vec::with_capacity(count);
    for i in 0..count {
        let theta = std::f32::consts::TAU * i as f32 / PHI;
        let phi = (1.0 - 2.0 * (i as f32 + 0.5) / count as f32).acos();
        points.push(Vec3::new(
            phi.sin() * theta.cos(),
            phi.sin() * theta.sin(),
            phi.cos(),
        ) * radius);
    }
    points
}

/// Rest positions for a flat ring of `count` points at `radius`, lying in
/// the xz plane. Point `i`'s fixed angle is [`ring_angle`]`(i, count)`.
pub fn ring_points(count: usize, radius: f32) -> Vec<Vec3> {
    let mut points = Vec::with_capacity(count);
    for i in 0..count {
        let a = ring_angle(i, count);
        points.push(Vec3::new(a.cos() * radius, 0.0, a.sin() * radius));
    }
    points
}

/// The fixed angular position of ring point `i` of `count`.
pub fn ring_angle(i: usize, count: usize) -> f32 {
    std::f32::consts::TAU * i as f32 / count.max(1) as f32
}

// ══════════════════════════════════════════════════════════════════════════════
//  Tests
// ══════════════════════════════════════════════════════════════════════════════
