//! Layout selection and the interpolated layout state.
//!
//! Which hands are on screen picks one of four named layouts; the
//! [`LayoutState`] then chases that layout's per-object targets a little
//! each frame. Selection is instant, presentation is continuous: switching
//! layouts mid-glide simply re-aims the interpolation, so crossfades
//! overlap instead of cutting.

use log::debug;
use nebula_signal::{rate_factor, smooth};

// ══════════════════════════════════════════════════════════════════════════════
//  Tuning
// ══════════════════════════════════════════════════════════════════════════════

/// Layout convergence rate, per second. Frame-rate independent: the
/// per-frame factor is `rate × dt`, capped below 1.
pub const LAYOUT_RATE: f32 = 4.0;

/// Dual-layout horizontal push, world units. Left object goes negative.
pub const DUAL_X_OFFSET: f32 = 2.2;

// ══════════════════════════════════════════════════════════════════════════════
//  Layout selection
// ══════════════════════════════════════════════════════════════════════════════

/// The four presentation layouts, one per detection combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// No hands. Both objects fade out centered.
    Idle,
    /// Only the left role. Its object takes the stage.
    LeftSolo,
    /// Only the right role.
    RightSolo,
    /// Both roles. Objects split to opposite sides, waves up.
    Dual,
}

impl Layout {
    /// Pure transition function from this frame's detection pattern.
    /// No history: one frame of dropout re-selects immediately.
    pub fn from_detection(left: bool, right: bool) -> Layout {
        match (left, right) {
            (true, true)   => Layout::Dual,
            (true, false)  => Layout::LeftSolo,
            (false, true)  => Layout::RightSolo,
            (false, false) => Layout::Idle,
        }
    }

    /// Display name for the status line.
    pub fn name(self) -> &'static str {
        match self {
            Layout::Idle      => "idle",
            Layout::LeftSolo  => "left solo",
            Layout::RightSolo => "right solo",
            Layout::Dual      => "dual",
        }
    }

    /// Target tuples for the two controlled objects, `[left, right]`.
    pub fn targets(self) -> [ObjectLayout; 2] {
        match self {
            Layout::Idle => [ObjectLayout::FADED, ObjectLayout::FADED],
            Layout::LeftSolo => [ObjectLayout::SOLO, ObjectLayout::FADED],
            Layout::RightSolo => [ObjectLayout::FADED, ObjectLayout::SOLO],
            Layout::Dual => [
                ObjectLayout {
                    x_offset: -DUAL_X_OFFSET,
                    ..ObjectLayout::DUAL_SIDE
                },
                ObjectLayout {
                    x_offset: DUAL_X_OFFSET,
                    ..ObjectLayout::DUAL_SIDE
                },
            ],
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
//  Per-object layout tuple
// ══════════════════════════════════════════════════════════════════════════════

/// The four layout-driven values of one controlled object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectLayout {
    pub x_offset:     f32,
    pub opacity:      f32,
    pub radius_scale: f32,
    pub wave_amount:  f32,
}

impl ObjectLayout {
    /// Parked: centered, invisible, half size, calm.
    pub const FADED: ObjectLayout = ObjectLayout {
        x_offset:     0.0,
        opacity:      0.0,
        radius_scale: 0.5,
        wave_amount:  0.0,
    };

    /// Center stage: full presence, calm surface.
    pub const SOLO: ObjectLayout = ObjectLayout {
        x_offset:     0.0,
        opacity:      1.0,
        radius_scale: 1.0,
        wave_amount:  0.0,
    };

    /// One side of the dual split; `x_offset` is filled in per object.
    pub const DUAL_SIDE: ObjectLayout = ObjectLayout {
        x_offset:     0.0,
        opacity:      1.0,
        radius_scale: 0.85,
        wave_amount:  1.0,
    };

    /// One smoothing step toward `target`, every field by the same factor.
    pub fn lerp_toward(&mut self, target: &ObjectLayout, factor: f32) {
        self.x_offset = smooth(self.x_offset, target.x_offset, factor);
        self.opacity = smooth(self.opacity, target.opacity, factor);
        self.radius_scale = smooth(self.radius_scale, target.radius_scale, factor);
        self.wave_amount = smooth(self.wave_amount, target.wave_amount, factor);
    }
}

// ══════════════════════════════════════════════════════════════════════════════
//  Interpolated layout state
// ══════════════════════════════════════════════════════════════════════════════

/// The machine's only persistent state: one interpolated [`ObjectLayout`]
/// per controlled object. Starts parked (both faded), and every call to
/// [`advance`](LayoutState::advance) glides both toward the selected
/// layout's targets.
#[derive(Debug, Clone)]
pub struct LayoutState {
    objects:  [ObjectLayout; 2],
    selected: Layout,
}

impl LayoutState {
    pub fn new() -> Self {
        LayoutState {
            objects:  [ObjectLayout::FADED; 2],
            selected: Layout::Idle,
        }
    }

    /// Layout selected on the most recent advance.
    pub fn selected(&self) -> Layout {
        self.selected
    }

    /// Interpolated values for object `index` (0 = left, 1 = right).
    pub fn object(&self, index: usize) -> &ObjectLayout {
        &self.objects[index]
    }

    /// Select `layout` and move both objects one rate-scaled step toward
    /// its targets. `dt` is the frame time in seconds.
    pub fn advance(&mut self, layout: Layout, dt: f32) {
        if layout != self.selected {
            debug!("layout {} -> {}", self.selected.name(), layout.name());
            self.selected = layout;
        }
        let factor = rate_factor(LAYOUT_RATE, dt);
        let targets = layout.targets();
        for (object, target) in self.objects.iter_mut().zip(&targets) {
            object.lerp_toward(target, factor);
        }
    }
}

impl Default for LayoutState {
    fn default() -> Self {
        LayoutState::new()
    }
}

// ══════════════════════════════════════════════════════════════════════════════
//  Tests
// ══════════════════════════════════════════════════════════════════════════════
