//! Per-role signal extraction.
//!
//! Folds one raw 21-point hand into the smoothing state that survives
//! between frames and reports the result as a [`ControlSignal`]. One
//! [`HandFilterState`] exists per logical role; the role assigner decides
//! which raw hand feeds which state.

use glam::{Vec2, Vec3};
use log::warn;

use crate::filter::{smooth, smooth_vec2, smooth_vec3, GESTURE_FACTOR, POSITION_FACTOR};
use crate::landmark::{RawHand, CURL_FINGERS, INDEX_TIP, MIDDLE_TIP, THUMB_TIP, WRIST};

// ══════════════════════════════════════════════════════════════════════════════
//  Extraction constants
// ══════════════════════════════════════════════════════════════════════════════
// Tuned against normalized landmark coordinates (image span = 1.0).

/// Thumb-to-index span treated as a fully open pinch.
pub const PINCH_MAX_EXTENT: f32 = 0.25;

/// Output radians per unit of palm-direction angle.
pub const ROTATION_SENSITIVITY: f32 = 2.0;

/// Zoom units per unit of depth change off the baseline.
pub const DEPTH_SENSITIVITY: f32 = 8.0;

// ══════════════════════════════════════════════════════════════════════════════
//  Control signal
// ══════════════════════════════════════════════════════════════════════════════

/// Everything one frame of one role's hand reading boils down to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSignal {
    /// Smoothed hand-center (wrist) position, normalized image coords.
    pub position: Vec3,
    /// Thumb-to-index pinch: 0 = touching, 1 = fully open.
    pub pinch:    f32,
    /// Palm-direction angles (roll, tilt), sensitivity-scaled radians.
    pub rotation: Vec2,
    /// Depth offset from the baseline captured at (re-)detection.
    /// Positive when the hand is closer to the camera than where it
    /// first appeared.
    pub zoom:     f32,
    /// Finger-curl score: 0 = open palm, 1 = closed fist.
    pub curl:     f32,
    /// Whether this role saw a usable hand this frame.
    pub detected: bool,
}

impl ControlSignal {
    /// The signal a role reports when no hand is assigned to it.
    pub fn absent() -> Self {
        ControlSignal {
            position: Vec3::ZERO,
            pinch:    0.0,
            rotation: Vec2::ZERO,
            zoom:     0.0,
            curl:     0.0,
            detected: false,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
//  Per-role filter state
// ══════════════════════════════════════════════════════════════════════════════

/// Smoothing state for one role, persistent across frames.
///
/// Carries the exponentially-smoothed position, pinch, and rotation, plus
/// the baseline depth that anchors the zoom signal. During a detection gap
/// the smoothed values stay put (stale but steady), and the baseline is
/// re-armed so zoom reads exactly zero on the frame the hand comes back.
#[derive(Debug, Clone)]
pub struct HandFilterState {
    position:       Vec3,
    pinch:          f32,
    rotation:       Vec2,
    baseline_depth: f32,
    /// False until the first usable hand ever; that reading snaps instead
    /// of smoothing up from the origin.
    initialized:    bool,
    /// True while the role is continuously detected.
    tracking:       bool,
}

impl HandFilterState {
    pub fn new() -> Self {
        HandFilterState {
            position:       Vec3::ZERO,
            pinch:          0.0,
            rotation:       Vec2::ZERO,
            baseline_depth: 0.0,
            initialized:    false,
            tracking:       false,
        }
    }

    /// Drop all smoothed values and start over.
    pub fn reset(&mut self) {
        *self = HandFilterState::new();
    }

    /// Note a frame with no hand for this role. Smoothed values are kept;
    /// the next detection re-captures the zoom baseline.
    pub fn mark_missing(&mut self) {
        self.tracking = false;
    }

    /// Whether the role was detected on the most recent frame.
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Fold one raw hand into the running state and report the signals.
    ///
    /// An incomplete hand is treated as no detection at all.
    pub fn update(&mut self, hand: &RawHand) -> ControlSignal {
        if !hand.is_complete() {
            warn!(
                "hand with {} landmarks treated as not detected",
                hand.points.len()
            );
            self.mark_missing();
            return ControlSignal::absent();
        }

        let wrist = hand.points[WRIST];

        // The first reading ever snaps; afterwards the filter glides.
        if self.initialized {
            self.position = smooth_vec3(self.position, wrist, POSITION_FACTOR);
        } else {
            self.position = wrist;
            self.initialized = true;
        }

        // Re-arm the zoom baseline on the first frame after a gap. Taken
        // from the *smoothed* depth so zoom is zero right now and measures
        // movement relative to where the hand reappeared.
        if !self.tracking {
            self.baseline_depth = self.position.z;
            self.tracking = true;
        }

        // Pinch: thumb-tip to index-tip span, normalized and clamped.
        let span = hand.points[THUMB_TIP].distance(hand.points[INDEX_TIP]);
        let pinch_now = (span / PINCH_MAX_EXTENT).clamp(0.0, 1.0);
        self.pinch = smooth(self.pinch, pinch_now, GESTURE_FACTOR);

        // Palm direction: middle fingertip relative to the wrist. Straight
        // up (y grows downward) is the zero pose for both angles.
        let dir = hand.points[MIDDLE_TIP] - wrist;
        let rot_now = Vec2::new(
            dir.x.atan2(-dir.y) * ROTATION_SENSITIVITY,
            dir.z.atan2(-dir.y) * ROTATION_SENSITIVITY,
        );
        self.rotation = smooth_vec2(self.rotation, rot_now, GESTURE_FACTOR);

        // Curl: how far each non-thumb tip has pulled in toward the wrist,
        // relative to its own knuckle distance. Derived fresh per frame.
        let mut curl_sum = 0.0;
        for (tip, mcp) in CURL_FINGERS {
            let tip_d = hand.points[tip].distance(wrist);
            let mcp_d = hand.points[mcp].distance(wrist).max(1e-4);
            curl_sum += (1.0 - tip_d / mcp_d).max(0.0);
        }
        let curl = (curl_sum / CURL_FINGERS.len() as f32).clamp(0.0, 1.0);

        ControlSignal {
            position: self.position,
            pinch:    self.pinch,
            rotation: self.rotation,
            zoom:     (self.baseline_depth - self.position.z) * DEPTH_SENSITIVITY,
            curl,
            detected: true,
        }
    }
}

impl Default for HandFilterState {
    fn default() -> Self {
        HandFilterState::new()
    }
}

// ══════════════════════════════════════════════════════════════════════════════
//  Tests
// ══════════════════════════════════════════════════════════════════════════════
