//! Hand-to-role assignment and the per-frame signal pipeline.
//!
//! The engine steers two objects from two logical roles, "left" and
//! "right". Which raw hand feeds which role is decided fresh every frame
//! by [`assign_roles`]; [`RolePipeline`] owns the per-role filter states
//! and turns a whole [`LandmarkFrame`] into a [`RoleFrame`].

use log::warn;

use crate::extract::{ControlSignal, HandFilterState};
use crate::landmark::{HandLabel, LandmarkFrame, RawHand, LANDMARK_COUNT};

// ══════════════════════════════════════════════════════════════════════════════
//  Role assignment
// ══════════════════════════════════════════════════════════════════════════════

/// Hands assigned to roles for one frame, before signal extraction.
#[derive(Debug, Default)]
pub struct RoleAssignment<'a> {
    pub left:  Option<&'a RawHand>,
    pub right: Option<&'a RawHand>,
}

/// Assign raw hands to the two roles for one frame.
///
/// With two usable hands, screen position outranks the detector's labels:
/// the hand with the smaller wrist x takes the left role, the other the
/// right role. Labels flicker between frames; wrist order does not. With a
/// single hand there is nothing to compare against, so its label is
/// trusted as-is. Incomplete hands are dropped up front (with a warning)
/// and read as "not present".
pub fn assign_roles(frame: &LandmarkFrame) -> RoleAssignment<'_> {
    let mut usable: Vec<&RawHand> = Vec::with_capacity(2);
    for hand in &frame.hands {
        if hand.is_complete() {
            usable.push(hand);
        } else {
            warn!(
                "dropping hand with {} of {} landmarks",
                hand.points.len(),
                LANDMARK_COUNT
            );
        }
    }

    match usable.len() {
        0 => RoleAssignment::default(),
        1 => match usable[0].label {
            HandLabel::Left => RoleAssignment {
                left:  Some(usable[0]),
                right: None,
            },
            HandLabel::Right => RoleAssignment {
                left:  None,
                right: Some(usable[0]),
            },
        },
        // Two or more: order the first two by wrist x, ignore the labels.
        _ => {
            let (a, b) = (usable[0], usable[1]);
            if a.wrist().x <= b.wrist().x {
                RoleAssignment { left: Some(a), right: Some(b) }
            } else {
                RoleAssignment { left: Some(b), right: Some(a) }
            }
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
//  Per-frame pipeline
// ══════════════════════════════════════════════════════════════════════════════

/// Signal record for both roles, one per processed frame.
#[derive(Debug, Clone, Copy)]
pub struct RoleFrame {
    pub left:          ControlSignal,
    pub right:         ControlSignal,
    pub both_detected: bool,
}

impl RoleFrame {
    /// Frame in which neither role saw a hand.
    pub fn absent() -> Self {
        RoleFrame {
            left:          ControlSignal::absent(),
            right:         ControlSignal::absent(),
            both_detected: false,
        }
    }
}

/// Owns the two per-role filter states and runs assignment + extraction.
#[derive(Debug, Clone, Default)]
pub struct RolePipeline {
    left:  HandFilterState,
    right: HandFilterState,
}

impl RolePipeline {
    pub fn new() -> Self {
        RolePipeline {
            left:  HandFilterState::new(),
            right: HandFilterState::new(),
        }
    }

    /// Drop both roles' smoothing history.
    pub fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
    }

    /// Process one landmark frame into a pair of role signals.
    pub fn process(&mut self, frame: &LandmarkFrame) -> RoleFrame {
        let assigned = assign_roles(frame);

        let left = match assigned.left {
            Some(hand) => self.left.update(hand),
            None => {
                self.left.mark_missing();
                ControlSignal::absent()
            }
        };
        let right = match assigned.right {
            Some(hand) => self.right.update(hand),
            None => {
                self.right.mark_missing();
                ControlSignal::absent()
            }
        };

        RoleFrame {
            left,
            right,
            both_detected: left.detected && right.detected,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
//  Tests
// ══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    /// Minimal complete hand: all 21 landmarks piled on the wrist.
    fn hand_at(x: f32, label: HandLabel) -> RawHand {
        RawHand::new(vec![Vec3::new(x, 0.5, 0.0); 21], label)
    }

    // ── Assignment rules ──────────────────────────────────────────────────

    #[test]
    fn two_hands_are_ordered_by_wrist_x_not_by_label() {
        // Labels are deliberately swapped relative to screen position.
        let frame = LandmarkFrame::two(
            hand_at(0.8, HandLabel::Left),
            hand_at(0.2, HandLabel::Right),
        );
        let roles = assign_roles(&frame);
        assert_eq!(roles.left.map(|h| h.wrist().x), Some(0.2));
        assert_eq!(roles.right.map(|h| h.wrist().x), Some(0.8));
    }

    #[test]
    fn two_hands_in_either_input_order_assign_identically() {
        let a = hand_at(0.2, HandLabel::Right);
        let b = hand_at(0.8, HandLabel::Left);
        for frame in [
            LandmarkFrame::two(a.clone(), b.clone()),
            LandmarkFrame::two(b, a),
        ] {
            let roles = assign_roles(&frame);
            assert_eq!(roles.left.map(|h| h.wrist().x), Some(0.2));
            assert_eq!(roles.right.map(|h| h.wrist().x), Some(0.8));
        }
    }

    #[test]
    fn single_hand_trusts_the_detector_label() {
        let frame = LandmarkFrame::one(hand_at(0.1, HandLabel::Right));
        let roles = assign_roles(&frame);
        assert!(roles.left.is_none());
        assert_eq!(roles.right.map(|h| h.wrist().x), Some(0.1));

        let frame = LandmarkFrame::one(hand_at(0.9, HandLabel::Left));
        let roles = assign_roles(&frame);
        assert_eq!(roles.left.map(|h| h.wrist().x), Some(0.9));
        assert!(roles.right.is_none());
    }

    #[test]
    fn empty_frame_assigns_nothing() {
        let frame = LandmarkFrame::empty();
        let roles = assign_roles(&frame);
        assert!(roles.left.is_none());
        assert!(roles.right.is_none());
    }

    #[test]
    fn incomplete_hand_is_invisible_to_assignment() {
        // A malformed second hand must not force the two-hand sort.
        let stub = RawHand::new(vec![Vec3::new(0.1, 0.5, 0.0); 7], HandLabel::Left);
        let frame = LandmarkFrame::two(stub, hand_at(0.9, HandLabel::Right));
        let roles = assign_roles(&frame);
        assert!(roles.left.is_none());
        assert_eq!(roles.right.map(|h| h.wrist().x), Some(0.9));
    }

    // ── Pipeline ──────────────────────────────────────────────────────────

    #[test]
    fn pipeline_reports_both_detected_only_with_two_hands() {
        let mut pipeline = RolePipeline::new();

        let none = pipeline.process(&LandmarkFrame::empty());
        assert!(!none.left.detected && !none.right.detected);
        assert!(!none.both_detected);

        let solo = pipeline.process(&LandmarkFrame::one(hand_at(0.3, HandLabel::Left)));
        assert!(solo.left.detected && !solo.right.detected);
        assert!(!solo.both_detected);

        let dual = pipeline.process(&LandmarkFrame::two(
            hand_at(0.3, HandLabel::Left),
            hand_at(0.7, HandLabel::Right),
        ));
        assert!(dual.both_detected);
    }

    #[test]
    fn undetected_role_reports_absent_but_keeps_its_filter_warm() {
        let mut pipeline = RolePipeline::new();
        for _ in 0..10 {
            pipeline.process(&LandmarkFrame::one(hand_at(0.3, HandLabel::Left)));
        }

        let gone = pipeline.process(&LandmarkFrame::empty());
        assert!(!gone.left.detected);
        assert_eq!(gone.left.position, Vec3::ZERO);

        // On return the filter continues from its stale value: the
        // reported position cannot jump past the smoothing step.
        let back = pipeline.process(&LandmarkFrame::one(hand_at(0.5, HandLabel::Left)));
        assert!(back.left.detected);
        assert!(back.left.position.x < 0.5);
        assert!(back.left.position.x > 0.3);
    }

    #[test]
    fn role_swap_follows_hands_crossing() {
        let mut pipeline = RolePipeline::new();
        pipeline.process(&LandmarkFrame::two(
            hand_at(0.2, HandLabel::Left),
            hand_at(0.8, HandLabel::Right),
        ));
        // The hands cross; roles stay glued to screen order.
        let crossed = pipeline.process(&LandmarkFrame::two(
            hand_at(0.75, HandLabel::Left),
            hand_at(0.25, HandLabel::Right),
        ));
        assert!(crossed.left.position.x < crossed.right.position.x);
    }
}
