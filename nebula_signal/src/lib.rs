//! # nebula_signal
//!
//! Front half of the hand-nebula engine: turns raw 21-point hand landmark
//! frames into a pair of steady, role-assigned control signals.
//!
//! Stages, in order:
//!
//! | Stage      | Module       | Job                                        |
//! |------------|--------------|--------------------------------------------|
//! | Landmarks  | [`landmark`] | hand/frame model, landmark index constants |
//! | Roles      | [`roles`]    | leftmost hand on screen drives the left role |
//! | Filtering  | [`filter`]   | exponential smoothing, tuned factors       |
//! | Extraction | [`extract`]  | pinch / rotation / zoom / curl signals     |
//!
//! ## Quick start
//!
//! ```
//! use glam::Vec3;
//! use nebula_signal::{HandLabel, LandmarkFrame, RawHand, RolePipeline};
//!
//! // A synthetic hand on the left side of the image.
//! let points = vec![Vec3::new(0.25, 0.6, 0.0); 21];
//! let frame = LandmarkFrame::one(RawHand::new(points, HandLabel::Left));
//!
//! let mut pipeline = RolePipeline::new();
//! let signals = pipeline.process(&frame);
//! assert!(signals.left.detected);
//! assert!(!signals.right.detected);
//! ```

pub mod extract;
pub mod filter;
pub mod landmark;
pub mod roles;

pub use extract::{
    ControlSignal, HandFilterState, DEPTH_SENSITIVITY, PINCH_MAX_EXTENT, ROTATION_SENSITIVITY,
};
pub use filter::{
    rate_factor, smooth, smooth_vec2, smooth_vec3, GESTURE_FACTOR, MAX_RATE_STEP,
    POSITION_FACTOR, TRANSFORM_FACTOR, VISUAL_FACTOR,
};
pub use landmark::{HandLabel, LandmarkFrame, RawHand, LANDMARK_COUNT};
pub use roles::{assign_roles, RoleAssignment, RoleFrame, RolePipeline};
