//! # nebula_layout
//!
//! The engine's layout stage: which hands are detected selects one of
//! four named layouts, and an interpolated per-object state glides toward
//! the selected layout's targets every frame.
//!
//! | Module     | Job                                                   |
//! |------------|-------------------------------------------------------|
//! | [`layout`] | layout enum, target presets, interpolated layout state |
//! | [`hold`]   | optional detection debounce (default off)              |
//!
//! ## Quick start
//!
//! ```
//! use nebula_layout::{Layout, LayoutState};
//!
//! let mut state = LayoutState::new();
//! // Left hand alone, 60 fps, for one second.
//! for _ in 0..60 {
//!     state.advance(Layout::from_detection(true, false), 1.0 / 60.0);
//! }
//! assert_eq!(state.selected(), Layout::LeftSolo);
//! assert!(state.object(0).opacity > 0.9);
//! assert!(state.object(1).opacity < 0.1);
//! ```

pub mod hold;
pub mod layout;

pub use hold::DetectionHold;
pub use layout::{Layout, LayoutState, ObjectLayout, DUAL_X_OFFSET, LAYOUT_RATE};
