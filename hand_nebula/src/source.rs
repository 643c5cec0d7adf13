//! Landmark frame sources — simulated hands and an external tracker.
//!
//! The public interface is [`LandmarkFrame`]s delivered over an `mpsc`
//! channel. The engine never knows whether frames came from the keyboard
//! simulator or a real detector process.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use glam::Vec3;
#[cfg(feature = "tracker")]
use log::{info, warn};
use thiserror::Error;

use nebula_signal::landmark::{
    HandLabel, LandmarkFrame, RawHand, INDEX_MCP, INDEX_TIP, MIDDLE_MCP, MIDDLE_TIP, PINKY_MCP,
    PINKY_TIP, RING_MCP, RING_TIP, THUMB_TIP,
};

// ══════════════════════════════════════════════════════════════════════════════
//  Errors
// ══════════════════════════════════════════════════════════════════════════════

/// Session-fatal source failures. Everything after a source has started
/// is a per-frame condition, not an error.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to launch tracker `{command}`: {source}")]
    TrackerSpawn {
        command: String,
        source:  std::io::Error,
    },

    #[error("tracker `{command}` exposed no output stream")]
    TrackerNoOutput { command: String },
}

// ══════════════════════════════════════════════════════════════════════════════
//  LandmarkSource trait + spawn helper
// ══════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`LandmarkFrame`]s over a channel.
pub trait LandmarkSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<LandmarkFrame>);
}

/// Spawn a landmark source on its own thread and return the receiving end.
pub fn spawn_landmark_source<S: LandmarkSource>(source: S) -> Receiver<LandmarkFrame> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ══════════════════════════════════════════════════════════════════════════════
//  SimLandmarkSource — keyboard/mouse simulation (always available)
// ══════════════════════════════════════════════════════════════════════════════

/// Raw input event from the simulation window.
#[derive(Clone, Debug, PartialEq)]
pub enum SimInput {
    /// Pointer position, normalized to the window (`[0, 1]` per axis).
    Pointer { x: f32, y: f32 },
    /// P held: thumb and index tips close onto each other.
    Pinch(bool),
    /// F held: all four fingers fold onto the wrist.
    Fist(bool),
    /// R held: the palm leans sideways.
    Tilt(bool),
    /// Scroll: push the simulated hand along the depth axis.
    DepthDelta(f32),
    /// Tab: toggle a mirrored second hand.
    ToggleSecondHand,
    /// H: toggle whether any hand is visible at all.
    ToggleHidden,
    Quit,
}

/// Landmark source driven by [`SimInput`] events from the viewer window.
///
/// Synthesizes plausible 21-point hands at display cadence: the pointer
/// carries the wrist, held keys pose the fingers, and Tab mirrors a
/// second hand across the image center.
pub struct SimLandmarkSource {
    pub rx: Receiver<SimInput>,
}

/// Frame cadence for the synthesized stream.
const SIM_FRAME: Duration = Duration::from_millis(16);

/// Pose the simulator holds between inputs.
struct SimPose {
    x:       f32,
    y:       f32,
    z:       f32,
    pinch:   bool,
    fist:    bool,
    tilt:    bool,
    second:  bool,
    hidden:  bool,
    started: bool,
}

impl SimPose {
    fn new() -> Self {
        SimPose {
            x:       0.5,
            y:       0.5,
            z:       0.0,
            pinch:   false,
            fist:    false,
            tilt:    false,
            second:  false,
            hidden:  false,
            started: false,
        }
    }

    /// Fold one input in. Returns false on quit.
    fn apply(&mut self, input: SimInput) -> bool {
        match input {
            SimInput::Pointer { x, y } => {
                self.x = x.clamp(0.0, 1.0);
                self.y = y.clamp(0.0, 1.0);
                self.started = true;
            }
            SimInput::Pinch(held) => self.pinch = held,
            SimInput::Fist(held) => self.fist = held,
            SimInput::Tilt(held) => self.tilt = held,
            SimInput::DepthDelta(d) => self.z = (self.z - d * 0.05).clamp(-0.6, 0.6),
            SimInput::ToggleSecondHand => self.second = !self.second,
            SimInput::ToggleHidden => self.hidden = !self.hidden,
            SimInput::Quit => return false,
        }
        true
    }

    fn frame(&self) -> LandmarkFrame {
        if self.hidden || !self.started {
            return LandmarkFrame::empty();
        }
        let first_label = if self.x <= 0.5 { HandLabel::Left } else { HandLabel::Right };
        let first = self.hand_at(self.x, first_label);
        if self.second {
            let mirror_label = match first_label {
                HandLabel::Left => HandLabel::Right,
                HandLabel::Right => HandLabel::Left,
            };
            LandmarkFrame::two(first, self.hand_at(1.0 - self.x, mirror_label))
        } else {
            LandmarkFrame::one(first)
        }
    }

    /// One synthetic upright hand with its wrist at `(x, self.y, self.z)`.
    fn hand_at(&self, x: f32, label: HandLabel) -> RawHand {
        let wrist = Vec3::new(x, self.y, self.z);
        let mut points = vec![wrist; 21];

        let lean = if self.tilt { 0.18 } else { 0.0 };
        points[INDEX_MCP] = wrist + Vec3::new(0.03 + lean * 0.4, -0.11, 0.0);
        points[MIDDLE_MCP] = wrist + Vec3::new(lean * 0.4, -0.12, 0.0);
        points[RING_MCP] = wrist + Vec3::new(-0.03 + lean * 0.4, -0.11, 0.0);
        points[PINKY_MCP] = wrist + Vec3::new(-0.05 + lean * 0.4, -0.09, 0.0);

        if self.fist {
            // Tips folded back onto the wrist.
            points[INDEX_TIP] = wrist;
            points[MIDDLE_TIP] = wrist;
            points[RING_TIP] = wrist;
            points[PINKY_TIP] = wrist;
            points[THUMB_TIP] = wrist + Vec3::new(-0.04, -0.02, 0.0);
        } else {
            points[INDEX_TIP] = wrist + Vec3::new(0.05 + lean, -0.25, 0.0);
            points[MIDDLE_TIP] = wrist + Vec3::new(lean, -0.28, 0.0);
            points[RING_TIP] = wrist + Vec3::new(-0.05 + lean, -0.26, 0.0);
            points[PINKY_TIP] = wrist + Vec3::new(-0.09 + lean, -0.2, 0.0);
            points[THUMB_TIP] = if self.pinch {
                points[INDEX_TIP]
            } else {
                wrist + Vec3::new(-0.2, -0.2, 0.0)
            };
        }
        RawHand::new(points, label)
    }
}

impl LandmarkSource for SimLandmarkSource {
    fn run(self: Box<Self>, tx: Sender<LandmarkFrame>) {
        let mut pose = SimPose::new();
        loop {
            // Drain whatever input arrived, then emit one frame.
            match self.rx.recv_timeout(SIM_FRAME) {
                Ok(input) => {
                    if !pose.apply(input) {
                        return;
                    }
                    for input in self.rx.try_iter() {
                        if !pose.apply(input) {
                            return;
                        }
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return,
            }
            if tx.send(pose.frame()).is_err() {
                return;
            }
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
//  TrackerSource — external detector process (feature = "tracker")
// ══════════════════════════════════════════════════════════════════════════════

/// Landmark source backed by an external detector process that prints
/// one JSON frame per line:
///
/// ```json
/// {"hands":[{"label":"Left","points":[[0.3,0.6,0.0], ...21 total]}]}
/// ```
///
/// Spawning happens in the constructor so a missing detector fails the
/// session up front; malformed lines after startup are skipped with a
/// warning.
#[cfg(feature = "tracker")]
pub struct TrackerSource {
    command: String,
    child:   std::process::Child,
    stdout:  std::process::ChildStdout,
}

#[cfg(feature = "tracker")]
mod wire {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct WireFrame {
        pub hands: Vec<WireHand>,
    }

    #[derive(Deserialize)]
    pub struct WireHand {
        pub label:  String,
        pub points: Vec<[f32; 3]>,
    }
}

#[cfg(feature = "tracker")]
impl TrackerSource {
    pub fn new(command: &str) -> Result<Self, SourceError> {
        use std::process::{Command, Stdio};

        let mut parts = command.split_whitespace();
        let program = parts.next().unwrap_or(command);
        let mut child = Command::new(program)
            .args(parts)
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|source| SourceError::TrackerSpawn {
                command: command.to_string(),
                source,
            })?;
        let stdout = child.stdout.take().ok_or(SourceError::TrackerNoOutput {
            command: command.to_string(),
        })?;
        info!("tracker `{command}` started");
        Ok(TrackerSource {
            command: command.to_string(),
            child,
            stdout,
        })
    }

    fn parse_line(line: &str) -> Option<LandmarkFrame> {
        let wire: wire::WireFrame = serde_json::from_str(line).ok()?;
        let mut frame = LandmarkFrame::empty();
        for hand in wire.hands.into_iter().take(2) {
            let label = match hand.label.as_str() {
                "Left" => HandLabel::Left,
                "Right" => HandLabel::Right,
                _ => return None,
            };
            let points = hand
                .points
                .into_iter()
                .map(|[x, y, z]| Vec3::new(x, y, z))
                .collect();
            frame.hands.push(RawHand::new(points, label));
        }
        Some(frame)
    }
}

#[cfg(feature = "tracker")]
impl LandmarkSource for TrackerSource {
    fn run(mut self: Box<Self>, tx: Sender<LandmarkFrame>) {
        use std::io::{BufRead, BufReader};

        let reader = BufReader::new(self.stdout);
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    warn!("tracker `{}` read failed: {err}", self.command);
                    break;
                }
            };
            match Self::parse_line(&line) {
                Some(frame) => {
                    if tx.send(frame).is_err() {
                        break;
                    }
                }
                None => warn!("tracker `{}`: dropping malformed line", self.command),
            }
        }
        info!("tracker `{}` stream ended", self.command);
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

// ══════════════════════════════════════════════════════════════════════════════
//  Tests
// ══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use nebula_signal::RolePipeline;

    fn pose_after(inputs: &[SimInput]) -> SimPose {
        let mut pose = SimPose::new();
        for input in inputs {
            assert!(pose.apply(input.clone()));
        }
        pose
    }

    #[test]
    fn no_frame_until_the_pointer_has_moved() {
        let pose = SimPose::new();
        assert!(pose.frame().hands.is_empty());

        let pose = pose_after(&[SimInput::Pointer { x: 0.3, y: 0.5 }]);
        assert_eq!(pose.frame().hands.len(), 1);
    }

    #[test]
    fn synthesized_hands_are_complete() {
        let pose = pose_after(&[
            SimInput::Pointer { x: 0.3, y: 0.5 },
            SimInput::ToggleSecondHand,
        ]);
        let frame = pose.frame();
        assert_eq!(frame.hands.len(), 2);
        for hand in &frame.hands {
            assert!(hand.is_complete());
        }
    }

    #[test]
    fn second_hand_mirrors_across_center() {
        let pose = pose_after(&[
            SimInput::Pointer { x: 0.2, y: 0.5 },
            SimInput::ToggleSecondHand,
        ]);
        let frame = pose.frame();
        assert_eq!(frame.hands[0].wrist().x, 0.2);
        assert_eq!(frame.hands[1].wrist().x, 0.8);
        assert_ne!(frame.hands[0].label, frame.hands[1].label);
    }

    #[test]
    fn hidden_pose_emits_empty_frames() {
        let pose = pose_after(&[
            SimInput::Pointer { x: 0.5, y: 0.5 },
            SimInput::ToggleHidden,
        ]);
        assert!(pose.frame().hands.is_empty());
    }

    #[test]
    fn pinch_key_closes_the_simulated_pinch() {
        let mut pipeline = RolePipeline::new();
        let open = pose_after(&[SimInput::Pointer { x: 0.3, y: 0.5 }]);
        let mut last = pipeline.process(&open.frame());
        for _ in 0..40 {
            last = pipeline.process(&open.frame());
        }
        assert!(last.left.pinch > 0.9, "open hand should read open");

        let pinched = pose_after(&[
            SimInput::Pointer { x: 0.3, y: 0.5 },
            SimInput::Pinch(true),
        ]);
        for _ in 0..40 {
            last = pipeline.process(&pinched.frame());
        }
        assert!(last.left.pinch < 0.1, "pinch key should close the pinch");
    }

    #[test]
    fn fist_key_curls_the_simulated_hand() {
        let mut pipeline = RolePipeline::new();
        let fist = pose_after(&[
            SimInput::Pointer { x: 0.3, y: 0.5 },
            SimInput::Fist(true),
        ]);
        let last = pipeline.process(&fist.frame());
        assert!(last.left.curl > 0.9);
    }

    #[test]
    fn depth_scroll_is_clamped() {
        let pose = pose_after(&[
            SimInput::Pointer { x: 0.5, y: 0.5 },
            SimInput::DepthDelta(1000.0),
        ]);
        assert!(pose.z >= -0.6 && pose.z <= 0.6);
    }

    #[test]
    fn quit_input_stops_the_pose() {
        let mut pose = SimPose::new();
        assert!(!pose.apply(SimInput::Quit));
    }

    #[test]
    fn spawned_sim_source_delivers_frames() {
        let (tx, rx) = mpsc::channel();
        let frames = spawn_landmark_source(SimLandmarkSource { rx });
        tx.send(SimInput::Pointer { x: 0.4, y: 0.5 }).unwrap();
        let frame = frames
            .recv_timeout(Duration::from_secs(2))
            .expect("sim source should emit");
        // The first frame may predate the pointer input; one of the next
        // few must carry the hand.
        let mut hands = frame.hands.len();
        for _ in 0..10 {
            if hands > 0 {
                break;
            }
            hands = frames
                .recv_timeout(Duration::from_secs(2))
                .expect("sim source should keep emitting")
                .hands
                .len();
        }
        assert_eq!(hands, 1);
        tx.send(SimInput::Quit).unwrap();
    }

    #[cfg(feature = "tracker")]
    #[test]
    fn tracker_lines_parse_and_reject() {
        let good = r#"{"hands":[{"label":"Left","points":[[0.1,0.2,0.0],[0,0,0],[0,0,0],[0,0,0],[0,0,0],[0,0,0],[0,0,0],[0,0,0],[0,0,0],[0,0,0],[0,0,0],[0,0,0],[0,0,0],[0,0,0],[0,0,0],[0,0,0],[0,0,0],[0,0,0],[0,0,0],[0,0,0],[0,0,0]]}]}"#;
        let frame = TrackerSource::parse_line(good).expect("valid frame");
        assert_eq!(frame.hands.len(), 1);
        assert_eq!(frame.hands[0].label, HandLabel::Left);
        assert!(frame.hands[0].is_complete());

        assert!(TrackerSource::parse_line("not json").is_none());
        assert!(TrackerSource::parse_line(r#"{"hands":[{"label":"Up","points":[]}]}"#).is_none());
    }

    #[cfg(feature = "tracker")]
    #[test]
    fn missing_tracker_binary_fails_up_front() {
        let err = TrackerSource::new("definitely-not-a-real-tracker-binary")
            .err()
            .expect("spawn must fail");
        assert!(matches!(err, SourceError::TrackerSpawn { .. }));
    }
}
