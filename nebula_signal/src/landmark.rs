//! 21-point hand landmark frames.
//!
//! A detector emits up to two [`RawHand`]s per frame, each carrying the
//! standard 21-landmark hand topology in normalized image coordinates:
//! `x` and `y` in `[0, 1]` (y grows downward), `z` in the same scale with
//! more negative values closer to the camera.

use glam::Vec3;

// ══════════════════════════════════════════════════════════════════════════════
//  Landmark indices (21-point hand topology)
// ══════════════════════════════════════════════════════════════════════════════

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_TIP: usize = 20;

/// Landmarks in a complete hand.
pub const LANDMARK_COUNT: usize = 21;

/// `(tip, knuckle)` index pairs for the four non-thumb fingers; the curl
/// score averages over these.
pub const CURL_FINGERS: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_MCP),
    (MIDDLE_TIP, MIDDLE_MCP),
    (RING_TIP, RING_MCP),
    (PINKY_TIP, PINKY_MCP),
];

// ══════════════════════════════════════════════════════════════════════════════
//  Frame model
// ══════════════════════════════════════════════════════════════════════════════

/// Which hand the detector believes it saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandLabel {
    Left,
    Right,
}

/// One detected hand: landmark points plus the detector's own label.
#[derive(Debug, Clone)]
pub struct RawHand {
    pub points: Vec<Vec3>,
    pub label:  HandLabel,
}

impl RawHand {
    pub fn new(points: Vec<Vec3>, label: HandLabel) -> Self {
        RawHand { points, label }
    }

    /// A hand is usable only when every landmark is present.
    pub fn is_complete(&self) -> bool {
        self.points.len() == LANDMARK_COUNT
    }

    /// Wrist landmark, the anchor for position and distance measures.
    /// Zero for a hand with no points at all.
    pub fn wrist(&self) -> Vec3 {
        self.points.get(WRIST).copied().unwrap_or(Vec3::ZERO)
    }
}

/// One detector emission: zero, one, or two hands, in detector order.
#[derive(Debug, Clone, Default)]
pub struct LandmarkFrame {
    pub hands: Vec<RawHand>,
}

impl LandmarkFrame {
    /// Frame in which the detector saw nothing.
    pub fn empty() -> Self {
        LandmarkFrame { hands: Vec::new() }
    }

    pub fn one(hand: RawHand) -> Self {
        LandmarkFrame { hands: vec![hand] }
    }

    pub fn two(first: RawHand, second: RawHand) -> Self {
        LandmarkFrame { hands: vec![first, second] }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
//  Tests
// ══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_hand_has_exactly_21_points() {
        let full = RawHand::new(vec![Vec3::ZERO; 21], HandLabel::Left);
        assert!(full.is_complete());

        let short = RawHand::new(vec![Vec3::ZERO; 20], HandLabel::Left);
        assert!(!short.is_complete());

        let long = RawHand::new(vec![Vec3::ZERO; 22], HandLabel::Right);
        assert!(!long.is_complete());
    }

    #[test]
    fn wrist_reads_landmark_zero() {
        let mut points = vec![Vec3::ZERO; 21];
        points[WRIST] = Vec3::new(0.4, 0.7, -0.1);
        let hand = RawHand::new(points, HandLabel::Right);
        assert_eq!(hand.wrist(), Vec3::new(0.4, 0.7, -0.1));
    }

    #[test]
    fn wrist_of_empty_hand_is_zero() {
        let hand = RawHand::new(Vec::new(), HandLabel::Left);
        assert_eq!(hand.wrist(), Vec3::ZERO);
    }

    #[test]
    fn frame_constructors_carry_hand_count() {
        assert_eq!(LandmarkFrame::empty().hands.len(), 0);

        let h = RawHand::new(vec![Vec3::ZERO; 21], HandLabel::Left);
        assert_eq!(LandmarkFrame::one(h.clone()).hands.len(), 1);
        assert_eq!(LandmarkFrame::two(h.clone(), h).hands.len(), 2);
    }

    #[test]
    fn curl_finger_pairs_skip_the_thumb() {
        for (tip, mcp) in CURL_FINGERS {
            assert!(tip > THUMB_TIP);
            assert_eq!(tip, mcp + 3);
        }
    }
}
