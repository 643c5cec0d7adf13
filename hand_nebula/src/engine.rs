//! The per-frame engine: signals → layout → animated objects.
//!
//! [`NebulaEngine`] owns the whole pipeline state — the role pipeline,
//! the detection hold, the layout state, and the two point-cloud objects
//! — and advances all of it in one `tick` per rendered frame.

use log::debug;

use nebula_layout::{DetectionHold, Layout, LayoutState};
use nebula_points::{ObjectConfig, ObjectFrame, PointCloudObject};
use nebula_signal::{ControlSignal, LandmarkFrame, RoleFrame, RolePipeline};

// ══════════════════════════════════════════════════════════════════════════════
//  Gesture → target mapping
// ══════════════════════════════════════════════════════════════════════════════
// Tuned on the simulator: a closed pinch shrinks, a fist spins, moving
// the hand off its baseline depth pushes the object through the scene.

/// Object scale at pinch 0 plus range up to pinch 1.
pub const SCALE_BASE: f32 = 0.6;
pub const SCALE_RANGE: f32 = 0.9;

/// Spin multiplier at open palm plus range up to a full fist.
pub const SPIN_BASE: f32 = 1.0;
pub const SPIN_RANGE: f32 = 3.0;

/// Zoom signal clamp, world units.
pub const ZOOM_MIN: f32 = -2.0;
pub const ZOOM_MAX: f32 = 3.0;

/// Base hues for the two objects, degrees.
const LEFT_HUE: f32 = 210.0;
const RIGHT_HUE: f32 = 330.0;

// ══════════════════════════════════════════════════════════════════════════════
//  Engine
// ══════════════════════════════════════════════════════════════════════════════

/// Geometry and behavior knobs for a session.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub cluster_points: usize,
    pub rings:          usize,
    /// Detection debounce frames; 0 keeps selection memoryless.
    pub hold_frames:    u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            cluster_points: 900,
            rings:          3,
            hold_frames:    0,
        }
    }
}

pub struct NebulaEngine {
    pipeline: RolePipeline,
    hold:     DetectionHold,
    layout:   LayoutState,
    objects:  [PointCloudObject; 2],
    status:   String,
}

impl NebulaEngine {
    pub fn new(cfg: &EngineConfig) -> Self {
        let object = |hue: f32| {
            PointCloudObject::new(&ObjectConfig {
                cluster_points: cfg.cluster_points,
                rings: cfg.rings,
                base_hue: hue,
                ..ObjectConfig::default()
            })
        };
        NebulaEngine {
            pipeline: RolePipeline::new(),
            hold:     DetectionHold::new(cfg.hold_frames),
            layout:   LayoutState::new(),
            objects:  [object(LEFT_HUE), object(RIGHT_HUE)],
            status:   "no hand".to_string(),
        }
    }

    /// Advance one frame. `dt` is the frame time, `elapsed` wall-clock
    /// seconds since session start; both come from the host loop.
    pub fn tick(&mut self, frame: &LandmarkFrame, dt: f32, elapsed: f32) {
        let signals = self.pipeline.process(frame);

        let (left, right) = self.hold.apply(signals.left.detected, signals.right.detected);
        let layout = Layout::from_detection(left, right);
        self.layout.advance(layout, dt);

        for (index, object) in self.objects.iter_mut().enumerate() {
            let values = self.layout.object(index);
            object.apply_layout(
                values.x_offset,
                values.opacity,
                values.radius_scale,
                values.wave_amount,
            );

            let signal = if index == 0 { &signals.left } else { &signals.right };
            if signal.detected {
                steer(object, signal);
            }
            object.tick(dt, elapsed);
        }

        self.status = status_line(&signals, left, right, layout);
        debug!("tick: {}", self.status);
    }

    /// Drop all filter and detection history; layout and objects keep
    /// gliding from where they are.
    pub fn reset_tracking(&mut self) {
        self.pipeline.reset();
        self.hold.reset();
    }

    // ── Accessors for the render loop ─────────────────────────────────────

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn layout(&self) -> Layout {
        self.layout.selected()
    }

    pub fn object(&self, index: usize) -> &PointCloudObject {
        &self.objects[index]
    }

    /// Interpolated layout values for object `index` (0 = left, 1 = right).
    pub fn layout_values(&self, index: usize) -> &nebula_layout::ObjectLayout {
        self.layout.object(index)
    }

    /// Render snapshots for both objects, left then right.
    pub fn frames(&self) -> [ObjectFrame<'_>; 2] {
        [self.objects[0].frame(), self.objects[1].frame()]
    }
}

/// Map one role's live signal onto its object's transform/visual targets.
fn steer(object: &mut PointCloudObject, signal: &ControlSignal) {
    object.transform.target.scale = SCALE_BASE + signal.pinch * SCALE_RANGE;
    object.transform.target.rotation = signal.rotation;
    object.transform.target.zoom = signal.zoom.clamp(ZOOM_MIN, ZOOM_MAX);
    object.visual.target.spin_mult = SPIN_BASE + signal.curl * SPIN_RANGE;
}

/// `left`/`right` are the held detection pattern, the same one that
/// selected `layout`, so the hand text and the layout name never
/// disagree across a debounced dropout frame.
fn status_line(signals: &RoleFrame, left: bool, right: bool, layout: Layout) -> String {
    let hands = match (left, right) {
        (false, false) => "no hand".to_string(),
        (true, false) => format!("left hand  pinch {:.2}", signals.left.pinch),
        (false, true) => format!("right hand  pinch {:.2}", signals.right.pinch),
        (true, true) => format!(
            "both hands  pinch {:.2}/{:.2}",
            signals.left.pinch, signals.right.pinch
        ),
    };
    format!("{hands}  [{}]", layout.name())
}

// ══════════════════════════════════════════════════════════════════════════════
//  Tests
// ══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use nebula_signal::landmark::{
        HandLabel, RawHand, INDEX_MCP, INDEX_TIP, MIDDLE_MCP, MIDDLE_TIP, PINKY_MCP, PINKY_TIP,
        RING_MCP, RING_TIP, THUMB_TIP,
    };

    const DT: f32 = 1.0 / 60.0;

    fn small_engine(hold_frames: u32) -> NebulaEngine {
        NebulaEngine::new(&EngineConfig {
            cluster_points: 60,
            rings:          1,
            hold_frames,
        })
    }

    /// Open upright hand with the pinch fully open.
    fn open_hand(x: f32, label: HandLabel) -> RawHand {
        let wrist = Vec3::new(x, 0.6, 0.0);
        let mut points = vec![wrist; 21];
        points[THUMB_TIP] = wrist + Vec3::new(-0.2, -0.2, 0.0);
        points[INDEX_TIP] = wrist + Vec3::new(0.05, -0.25, 0.0);
        points[MIDDLE_TIP] = wrist + Vec3::new(0.0, -0.28, 0.0);
        points[RING_TIP] = wrist + Vec3::new(-0.05, -0.26, 0.0);
        points[PINKY_TIP] = wrist + Vec3::new(-0.09, -0.2, 0.0);
        points[INDEX_MCP] = wrist + Vec3::new(0.03, -0.11, 0.0);
        points[MIDDLE_MCP] = wrist + Vec3::new(0.0, -0.12, 0.0);
        points[RING_MCP] = wrist + Vec3::new(-0.03, -0.11, 0.0);
        points[PINKY_MCP] = wrist + Vec3::new(-0.05, -0.09, 0.0);
        RawHand::new(points, label)
    }

    fn run(engine: &mut NebulaEngine, frame: &LandmarkFrame, ticks: usize, t0: f32) -> f32 {
        let mut t = t0;
        for _ in 0..ticks {
            engine.tick(frame, DT, t);
            t += DT;
        }
        t
    }

    #[test]
    fn empty_session_settles_idle_and_invisible() {
        let mut engine = small_engine(0);
        run(&mut engine, &LandmarkFrame::empty(), 10, 0.0);
        assert_eq!(engine.layout(), Layout::Idle);
        assert_eq!(engine.status(), "no hand  [idle]");
        let [l, r] = engine.frames();
        assert!(l.opacity < 0.05 && r.opacity < 0.05);
    }

    #[test]
    fn scenario_idle_solo_dual() {
        let mut engine = small_engine(0);

        // 10 ticks of nothing: idle, both faded.
        let t = run(&mut engine, &LandmarkFrame::empty(), 10, 0.0);
        assert_eq!(engine.layout(), Layout::Idle);
        assert!(engine.frames()[0].opacity < 0.05);

        // Left hand for a while: left object takes the stage, calm.
        let solo = LandmarkFrame::one(open_hand(0.3, HandLabel::Left));
        let t = run(&mut engine, &solo, 240, t);
        assert_eq!(engine.layout(), Layout::LeftSolo);
        let left = engine.object(0);
        assert!(left.frame().opacity > 0.9);
        assert!((left.visual.current.radius_scale - 1.0).abs() < 0.05);
        assert!(left.visual.current.wave_amount < 0.05);
        assert!(engine.frames()[1].opacity < 0.1);

        // Right hand joins: dual, opposite sides, waves up.
        let dual = LandmarkFrame::two(
            open_hand(0.3, HandLabel::Left),
            open_hand(0.7, HandLabel::Right),
        );
        run(&mut engine, &dual, 400, t);
        assert_eq!(engine.layout(), Layout::Dual);
        let [l, r] = engine.frames();
        assert!(l.translation.x < -1.5);
        assert!(r.translation.x > 1.5);
        assert!(l.opacity > 0.9 && r.opacity > 0.9);
        assert!(engine.object(0).visual.current.wave_amount > 0.9);
    }

    #[test]
    fn one_tick_dropout_flips_selection_but_not_the_state() {
        let mut engine = small_engine(0);
        let dual = LandmarkFrame::two(
            open_hand(0.3, HandLabel::Left),
            open_hand(0.7, HandLabel::Right),
        );
        let t = run(&mut engine, &dual, 300, 0.0);
        let before = *engine.layout_values(1);

        // Right hand misses one frame.
        let solo = LandmarkFrame::one(open_hand(0.3, HandLabel::Left));
        engine.tick(&solo, DT, t);
        assert_eq!(engine.layout(), Layout::LeftSolo);
        let during = *engine.layout_values(1);

        // Bounded step: nothing snaps on the flip.
        let max_step = nebula_signal::rate_factor(nebula_layout::LAYOUT_RATE, DT);
        assert!((during.opacity - before.opacity).abs() <= max_step + 1e-6);
        assert!(
            (during.x_offset - before.x_offset).abs()
                <= nebula_layout::DUAL_X_OFFSET * max_step + 1e-6
        );

        engine.tick(&dual, DT, t + DT);
        assert_eq!(engine.layout(), Layout::Dual);
    }

    #[test]
    fn hold_frames_suppress_short_dropouts() {
        let mut engine = small_engine(3);
        let dual = LandmarkFrame::two(
            open_hand(0.3, HandLabel::Left),
            open_hand(0.7, HandLabel::Right),
        );
        let mut t = run(&mut engine, &dual, 60, 0.0);

        // A three-frame dropout never leaves dual.
        let solo = LandmarkFrame::one(open_hand(0.3, HandLabel::Left));
        for _ in 0..3 {
            engine.tick(&solo, DT, t);
            t += DT;
            assert_eq!(engine.layout(), Layout::Dual);
        }
        // The fourth frame switches.
        engine.tick(&solo, DT, t);
        assert_eq!(engine.layout(), Layout::LeftSolo);
    }

    #[test]
    fn pinch_drives_the_scale_target() {
        let mut engine = small_engine(0);
        let solo = LandmarkFrame::one(open_hand(0.3, HandLabel::Left));
        run(&mut engine, &solo, 120, 0.0);
        // Fully open pinch reads 1: scale target at the top of the range.
        let target = engine.object(0).transform.target.scale;
        assert!((target - (SCALE_BASE + SCALE_RANGE)).abs() < 0.05);
        // The undetected right object keeps its rest target.
        assert_eq!(engine.object(1).transform.target.scale, 1.0);
    }

    #[test]
    fn fist_raises_the_spin_target() {
        let mut engine = small_engine(0);
        let mut fist = open_hand(0.3, HandLabel::Left);
        let wrist = fist.points[0];
        fist.points[INDEX_TIP] = wrist;
        fist.points[MIDDLE_TIP] = wrist;
        fist.points[RING_TIP] = wrist;
        fist.points[PINKY_TIP] = wrist;
        run(&mut engine, &LandmarkFrame::one(fist), 30, 0.0);
        let target = engine.object(0).visual.target.spin_mult;
        assert!((target - (SPIN_BASE + SPIN_RANGE)).abs() < 0.05);
    }

    #[test]
    fn status_tracks_detection_and_layout() {
        let mut engine = small_engine(0);
        engine.tick(
            &LandmarkFrame::one(open_hand(0.7, HandLabel::Right)),
            DT,
            0.0,
        );
        assert!(engine.status().starts_with("right hand"));
        assert!(engine.status().ends_with("[right solo]"));
    }

    #[test]
    fn status_follows_the_held_pattern_across_a_dropout() {
        let mut engine = small_engine(3);
        let dual = LandmarkFrame::two(
            open_hand(0.3, HandLabel::Left),
            open_hand(0.7, HandLabel::Right),
        );
        let t = run(&mut engine, &dual, 60, 0.0);

        // Right hand misses one frame: the hold keeps dual selected, so
        // the hand text must not fall back to "left hand".
        let solo = LandmarkFrame::one(open_hand(0.3, HandLabel::Left));
        engine.tick(&solo, DT, t);
        assert_eq!(engine.layout(), Layout::Dual);
        assert!(engine.status().starts_with("both hands"));
        assert!(engine.status().ends_with("[dual]"));
    }

    #[test]
    fn reset_tracking_rearms_but_keeps_the_scene() {
        let mut engine = small_engine(0);
        let solo = LandmarkFrame::one(open_hand(0.3, HandLabel::Left));
        let t = run(&mut engine, &solo, 240, 0.0);
        let opacity_before = engine.frames()[0].opacity;

        engine.reset_tracking();
        // The scene does not blank; only filter history restarts.
        engine.tick(&solo, DT, t);
        assert!(engine.frames()[0].opacity >= opacity_before - 0.05);
    }
}
