//! # nebula_points
//!
//! Back half of the hand-nebula engine: procedural point-cloud objects.
//! Rest positions are generated once (a golden-angle sphere plus flat
//! rings) and every rendered position and color is re-derived from them
//! each frame, blending a breathing field with traveling waves by the
//! current wave amount.
//!
//! | Module     | Job                                               |
//! |------------|---------------------------------------------------|
//! | [`sphere`] | rest-position generation                          |
//! | [`visual`] | lerped visual/transform aggregates, color helpers |
//! | [`object`] | the per-frame animator and its render snapshot    |
//!
//! ## Quick start
//!
//! ```
//! use nebula_points::{ObjectConfig, PointCloudObject};
//!
//! let mut object = PointCloudObject::new(&ObjectConfig::default());
//! object.apply_layout(0.0, 1.0, 1.0, 0.0); // center stage, calm
//! for i in 0..60 {
//!     object.tick(1.0 / 60.0, i as f32 / 60.0);
//! }
//! let frame = object.frame();
//! assert!(frame.visible);
//! assert_eq!(frame.positions.len(), object.point_count());
//! ```

pub mod object;
pub mod sphere;
pub mod visual;

pub use object::{ObjectConfig, ObjectFrame, PointCloudObject, VISIBLE_OPACITY};
pub use sphere::{ring_angle, ring_points, sphere_points};
pub use visual::{hsv_to_argb, wave_influence, Transform, TransformState, Visual, VisualState};
