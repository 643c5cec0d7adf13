//! # hand_nebula
//!
//! Gesture-driven particle nebula: hand landmark frames steer two
//! point-cloud objects through a layout state machine, rendered in a
//! software viewer.
//!
//! ## Signal → Object mapping
//!
//! | Signal | Range | Effect |
//! |---|---|---|
//! | Hand present | — | Selects layout: idle / left solo / right solo / dual |
//! | Pinch | 0–1 | Object scale (closed pinch shrinks) |
//! | Palm direction | radians | Object rotation — takes over as waves ramp up |
//! | Depth off baseline | world units | Object zoom toward/away from camera |
//! | Finger curl | 0–1 | Spin multiplier and point-size pulse |
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: the mouse carries a synthetic hand,
//!   keys pose it.
//! * `tracker` — **Hardware mode**: spawns an external detector process
//!   and reads one JSON landmark frame per line from its stdout.
//!
//! ### Simulation controls
//!
//! | Input | Effect |
//! |---|---|
//! | Mouse | Move the hand (left half of the window = left role) |
//! | `P` hold | Pinch closed |
//! | `F` hold | Fist (curl) |
//! | `R` hold | Tilt the palm |
//! | Scroll | Push the hand along the depth axis |
//! | `Tab` | Toggle a mirrored second hand |
//! | `H` | Hide the hand entirely |
//! | `Q` | Quit |

pub mod app;
pub mod engine;
pub mod source;
pub mod viewer;
