//! Optional detection debounce.
//!
//! Layout selection is deliberately memoryless, so one missed detection
//! flips the layout for one frame. [`DetectionHold`] is the explicit
//! opt-in smoother: it keeps a recently seen role "detected" for up to a
//! configured number of missing frames. Hold 0 (the default) passes the
//! raw pattern straight through.

// ══════════════════════════════════════════════════════════════════════════════
//  Per-role hold counter
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy)]
struct RoleHold {
    /// Frames since the role was last seen; saturates, starts unseen.
    missing: u32,
}

impl RoleHold {
    fn new() -> Self {
        RoleHold { missing: u32::MAX }
    }

    fn observe(&mut self, detected: bool, hold_frames: u32) -> bool {
        if detected {
            self.missing = 0;
            true
        } else {
            self.missing = self.missing.saturating_add(1);
            self.missing <= hold_frames
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
//  Detection hold
// ══════════════════════════════════════════════════════════════════════════════

/// Debounces the per-frame `(left, right)` detection pattern.
///
/// A role that disappears stays reported as detected for up to
/// `hold_frames` further frames; a dropout longer than that switches. A
/// role that was never seen is never held.
#[derive(Debug, Clone)]
pub struct DetectionHold {
    hold_frames: u32,
    left:        RoleHold,
    right:       RoleHold,
}

impl DetectionHold {
    pub fn new(hold_frames: u32) -> Self {
        DetectionHold {
            hold_frames,
            left: RoleHold::new(),
            right: RoleHold::new(),
        }
    }

    /// Fold in one frame's raw pattern and report the debounced one.
    pub fn apply(&mut self, left: bool, right: bool) -> (bool, bool) {
        (
            self.left.observe(left, self.hold_frames),
            self.right.observe(right, self.hold_frames),
        )
    }

    /// Forget all detection history.
    pub fn reset(&mut self) {
        self.left = RoleHold::new();
        self.right = RoleHold::new();
    }
}

// ══════════════════════════════════════════════════════════════════════════════
//  Tests
// ══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_hold_passes_the_raw_pattern_through() {
        let mut hold = DetectionHold::new(0);
        assert_eq!(hold.apply(true, false), (true, false));
        assert_eq!(hold.apply(false, false), (false, false));
        assert_eq!(hold.apply(true, true), (true, true));
        assert_eq!(hold.apply(false, true), (false, true));
    }

    #[test]
    fn a_never_seen_role_is_not_held() {
        let mut hold = DetectionHold::new(5);
        for _ in 0..10 {
            assert_eq!(hold.apply(false, false), (false, false));
        }
    }

    #[test]
    fn dropout_within_the_hold_is_suppressed() {
        let mut hold = DetectionHold::new(3);
        hold.apply(true, false);
        // Three missing frames: still reported detected.
        for _ in 0..3 {
            assert_eq!(hold.apply(false, false), (true, false));
        }
        // The fourth releases it.
        assert_eq!(hold.apply(false, false), (false, false));
    }

    #[test]
    fn redetection_rearms_the_hold() {
        let mut hold = DetectionHold::new(2);
        hold.apply(true, true);
        hold.apply(false, false);
        hold.apply(false, false);
        // Seen again: counter restarts.
        hold.apply(true, true);
        assert_eq!(hold.apply(false, false), (true, true));
        assert_eq!(hold.apply(false, false), (true, true));
        assert_eq!(hold.apply(false, false), (false, false));
    }

    #[test]
    fn roles_are_held_independently() {
        let mut hold = DetectionHold::new(2);
        hold.apply(true, true);
        // Left drops, right stays live.
        assert_eq!(hold.apply(false, true), (true, true));
        assert_eq!(hold.apply(false, true), (true, true));
        assert_eq!(hold.apply(false, true), (false, true));
    }

    #[test]
    fn reset_forgets_history() {
        let mut hold = DetectionHold::new(5);
        hold.apply(true, true);
        hold.reset();
        assert_eq!(hold.apply(false, false), (false, false));
    }
}
