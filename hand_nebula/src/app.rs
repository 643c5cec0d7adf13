//! Session setup and the main loop.
//!
//! `run` wires the landmark source, the engine, and the viewer together
//! and drives one engine tick per rendered frame. Timing comes from
//! wall-clock instants, so a stalled loop (window dragged, laptop lid)
//! resumes mid-glide with one long `dt` instead of a pile of stale ticks.

use std::sync::mpsc::{self, TryRecvError};
use std::time::Instant;

use anyhow::Context;
use log::info;

use crate::engine::{EngineConfig, NebulaEngine};
use crate::source::{spawn_landmark_source, SimLandmarkSource};
use crate::viewer::Viewer;
use nebula_signal::LandmarkFrame;

// ══════════════════════════════════════════════════════════════════════════════
//  AppConfig
// ══════════════════════════════════════════════════════════════════════════════

/// Configuration for a full session.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Cluster particles per object.
    pub points:      usize,
    /// Secondary rings per object.
    pub rings:       usize,
    /// Detection debounce frames; 0 keeps layout selection memoryless.
    pub hold_frames: u32,
    /// External tracker command (`tracker` feature); None = simulator.
    pub tracker_cmd: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            points:      900,
            rings:       3,
            hold_frames: 0,
            tracker_cmd: None,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
//  run() — the main application loop
// ══════════════════════════════════════════════════════════════════════════════

/// Run the full application. Entry point called from `main.rs`.
pub fn run(cfg: AppConfig) -> anyhow::Result<()> {
    // ── Landmark source ───────────────────────────────────────────────────
    let (sim_tx, sim_rx) = mpsc::channel();
    let frame_rx = match cfg.tracker_cmd.as_deref() {
        #[cfg(feature = "tracker")]
        Some(command) => {
            let source = crate::source::TrackerSource::new(command)
                .context("starting the external tracker")?;
            spawn_landmark_source(source)
        }
        #[cfg(not(feature = "tracker"))]
        Some(_) => anyhow::bail!("built without the `tracker` feature"),
        None => spawn_landmark_source(SimLandmarkSource { rx: sim_rx }),
    };

    // ── Viewer (owns the window and the sim input sender) ────────────────
    let mut viewer = Viewer::new(sim_tx).context("opening the viewer")?;

    // ── Engine ────────────────────────────────────────────────────────────
    let mut engine = NebulaEngine::new(&EngineConfig {
        cluster_points: cfg.points,
        rings:          cfg.rings,
        hold_frames:    cfg.hold_frames,
    });
    info!(
        "session start: {} points, {} rings, hold {}",
        cfg.points, cfg.rings, cfg.hold_frames
    );

    // ── Main loop ─────────────────────────────────────────────────────────
    let start = Instant::now();
    let mut last_tick = start;
    // Detector frames outpace or lag the display; keep the freshest one
    // and re-feed it on frames where nothing new arrived.
    let mut latest = LandmarkFrame::empty();

    while viewer.is_open() {
        // 1. Poll window input → SimInput to the source.
        if !viewer.poll_input() {
            break;
        }

        // 2. Drain landmark frames, keeping only the freshest.
        loop {
            match frame_rx.try_recv() {
                Ok(frame) => latest = frame,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    info!("landmark source closed; ending session");
                    return Ok(());
                }
            }
        }

        // 3. Tick with wall-clock timing.
        let now = Instant::now();
        let dt = now.duration_since(last_tick).as_secs_f32();
        last_tick = now;
        engine.tick(&latest, dt, start.elapsed().as_secs_f32());

        // 4. Render.
        viewer.render(&engine.frames(), engine.status());
    }

    Ok(())
}
