//! Software-rendered viewer using `minifb`.
//!
//! Consumes the engine's per-frame output (deformed point buffers plus a
//! group transform per object), perspective-projects everything into a
//! `u32` framebuffer, and paints square point sprites far-to-near. Also
//! the input side of the simulator: keys and the mouse are translated to
//! [`SimInput`] events for the landmark source.

use std::sync::mpsc::Sender;

use anyhow::anyhow;
use glam::Mat3;
use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

use crate::source::SimInput;
use nebula_points::ObjectFrame;

// ══════════════════════════════════════════════════════════════════════════════
//  Layout constants
// ══════════════════════════════════════════════════════════════════════════════

pub const WIN_W: usize = 960;
pub const WIN_H: usize = 600;
const STATUS_Y: usize = WIN_H - 40;
const BG_COLOR: u32 = 0xFF0B0B18;
const TEXT_BG: u32 = 0xFF151530;
const STATUS_COLOR: u32 = 0xFFE8E8F0;
const LEGEND_COLOR: u32 = 0xFF8888A0;

/// Camera distance from the scene origin along +z.
const CAM_DIST: f32 = 7.0;
/// Projection focal length, pixels per world unit at unit depth.
const FOCAL: f32 = 420.0;

// ══════════════════════════════════════════════════════════════════════════════
//  Viewer
// ══════════════════════════════════════════════════════════════════════════════

pub struct Viewer {
    window: Window,
    buf:    Vec<u32>,
    sim_tx: Sender<SimInput>,

    // Previous held-key state, so the source only sees transitions.
    pinch_held: bool,
    fist_held:  bool,
    tilt_held:  bool,
    pointer:    (f32, f32),

    // Scratch for painter-order sorting, reused across frames.
    sprites: Vec<Sprite>,
}

#[derive(Clone, Copy)]
struct Sprite {
    depth: f32,
    x:     f32,
    y:     f32,
    size:  f32,
    color: u32,
}

impl Viewer {
    pub fn new(sim_tx: Sender<SimInput>) -> anyhow::Result<Self> {
        let mut window = Window::new(
            "Hand Nebula",
            WIN_W,
            WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| anyhow!("failed to open viewer window: {e}"))?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Viewer {
            window,
            buf: vec![BG_COLOR; WIN_W * WIN_H],
            sim_tx,
            pinch_held: false,
            fist_held: false,
            tilt_held: false,
            pointer: (-1.0, -1.0),
            sprites: Vec::new(),
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Poll window input and forward it as [`SimInput`]. Returns false
    /// when the session should end.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() {
            return false;
        }

        if self.window.is_key_pressed(Key::Q, KeyRepeat::No) {
            let _ = self.sim_tx.send(SimInput::Quit);
            return false;
        }
        if self.window.is_key_pressed(Key::Tab, KeyRepeat::No) {
            let _ = self.sim_tx.send(SimInput::ToggleSecondHand);
        }
        if self.window.is_key_pressed(Key::H, KeyRepeat::No) {
            let _ = self.sim_tx.send(SimInput::ToggleHidden);
        }

        // Held pose keys: forward only the transitions.
        let pinch = self.window.is_key_down(Key::P);
        if pinch != self.pinch_held {
            self.pinch_held = pinch;
            let _ = self.sim_tx.send(SimInput::Pinch(pinch));
        }
        let fist = self.window.is_key_down(Key::F);
        if fist != self.fist_held {
            self.fist_held = fist;
            let _ = self.sim_tx.send(SimInput::Fist(fist));
        }
        let tilt = self.window.is_key_down(Key::R);
        if tilt != self.tilt_held {
            self.tilt_held = tilt;
            let _ = self.sim_tx.send(SimInput::Tilt(tilt));
        }

        if let Some((mx, my)) = self.window.get_mouse_pos(MouseMode::Clamp) {
            let pointer = (mx / WIN_W as f32, my / WIN_H as f32);
            if pointer != self.pointer {
                self.pointer = pointer;
                let _ = self.sim_tx.send(SimInput::Pointer {
                    x: pointer.0,
                    y: pointer.1,
                });
            }
        }

        if let Some((_, wheel_y)) = self.window.get_scroll_wheel() {
            if wheel_y != 0.0 {
                let _ = self.sim_tx.send(SimInput::DepthDelta(wheel_y));
            }
        }

        true
    }

    /// Render one frame: both objects plus the status bar.
    pub fn render(&mut self, frames: &[ObjectFrame<'_>; 2], status: &str) {
        self.buf.fill(BG_COLOR);

        self.sprites.clear();
        for frame in frames {
            if frame.visible {
                self.project_object(frame);
            }
        }
        // Painter's order: far sprites first so near ones overdraw.
        self.sprites
            .sort_unstable_by(|a, b| b.depth.total_cmp(&a.depth));

        for i in 0..self.sprites.len() {
            let Sprite { x, y, size, color, .. } = self.sprites[i];
            self.fill_square(x, y, size, color);
        }

        // ── Status bar + key legend ───────────────────────────────────────
        self.fill_rect(0, STATUS_Y, WIN_W, WIN_H - STATUS_Y, TEXT_BG);
        self.draw_label(status, 10, STATUS_Y + 6, STATUS_COLOR);
        self.draw_label(
            "mouse=move hand  p=pinch  f=fist  r=tilt  scroll=depth  tab=second hand  h=hide  q=quit",
            10,
            STATUS_Y + 22,
            LEGEND_COLOR,
        );

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    // ── Projection ────────────────────────────────────────────────────────

    fn project_object(&mut self, frame: &ObjectFrame<'_>) {
        let rot = Mat3::from_rotation_x(frame.rot_x) * Mat3::from_rotation_y(frame.rot_y);
        let cx = WIN_W as f32 / 2.0;
        let cy = (STATUS_Y as f32) / 2.0;

        for (p, &color) in frame.positions.iter().zip(frame.colors) {
            let world = rot * (*p * frame.scale) + frame.translation;
            let depth = world.z + CAM_DIST;
            if depth < 0.2 {
                continue;
            }
            let inv = FOCAL / depth;
            // Depth fade on top of the object's opacity.
            let fade = (CAM_DIST / depth).clamp(0.3, 1.3);
            self.sprites.push(Sprite {
                depth,
                x: cx + world.x * inv,
                y: cy - world.y * inv,
                size: (frame.point_size * CAM_DIST / depth).max(1.0),
                color: scale_argb(color, frame.opacity * fade),
            });
        }
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn fill_square(&mut self, x: f32, y: f32, size: f32, color: u32) {
        let half = size / 2.0;
        let x0 = (x - half).max(0.0) as usize;
        let y0 = (y - half).max(0.0) as usize;
        let x1 = ((x + half) as usize).min(WIN_W);
        let y1 = ((y + half) as usize).min(STATUS_Y);
        for row in y0..y1 {
            for col in x0..x1 {
                self.buf[row * WIN_W + col] = color;
            }
        }
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(WIN_H) {
            for col in x..(x + w).min(WIN_W) {
                self.buf[row * WIN_W + col] = color;
            }
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < WIN_W && y < WIN_H {
            self.buf[y * WIN_W + x] = color;
        }
    }

    /// Minimal 4×6 bitmap font for the status bar and legend.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..4usize {
                    if bits & (1 << (3 - col)) != 0 {
                        self.set_pixel(cx + col, y + row, color);
                    }
                }
            }
            cx += 5; // 4 wide + 1 gap
            if cx + 5 > WIN_W {
                break;
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 4×6 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 6] {
    match c.to_ascii_lowercase() {
        '0' => [0b0110, 0b1001, 0b1011, 0b1101, 0b1001, 0b0110],
        '1' => [0b0010, 0b0110, 0b0010, 0b0010, 0b0010, 0b0111],
        '2' => [0b0110, 0b1001, 0b0001, 0b0010, 0b0100, 0b1111],
        '3' => [0b1110, 0b0001, 0b0110, 0b0001, 0b0001, 0b1110],
        '4' => [0b1001, 0b1001, 0b1111, 0b0001, 0b0001, 0b0001],
        '5' => [0b1111, 0b1000, 0b1110, 0b0001, 0b0001, 0b1110],
        '6' => [0b0110, 0b1000, 0b1110, 0b1001, 0b1001, 0b0110],
        '7' => [0b1111, 0b0001, 0b0010, 0b0010, 0b0100, 0b0100],
        '8' => [0b0110, 0b1001, 0b0110, 0b1001, 0b1001, 0b0110],
        '9' => [0b0110, 0b1001, 0b1001, 0b0111, 0b0001, 0b0110],
        'a' => [0b0110, 0b1001, 0b1001, 0b1111, 0b1001, 0b1001],
        'b' => [0b1110, 0b1001, 0b1110, 0b1001, 0b1001, 0b1110],
        'c' => [0b0111, 0b1000, 0b1000, 0b1000, 0b1000, 0b0111],
        'd' => [0b1110, 0b1001, 0b1001, 0b1001, 0b1001, 0b1110],
        'e' => [0b1111, 0b1000, 0b1110, 0b1000, 0b1000, 0b1111],
        'f' => [0b1111, 0b1000, 0b1110, 0b1000, 0b1000, 0b1000],
        'g' => [0b0111, 0b1000, 0b1000, 0b1011, 0b1001, 0b0111],
        'h' => [0b1001, 0b1001, 0b1111, 0b1001, 0b1001, 0b1001],
        'i' => [0b0111, 0b0010, 0b0010, 0b0010, 0b0010, 0b0111],
        'j' => [0b0001, 0b0001, 0b0001, 0b0001, 0b1001, 0b0110],
        'k' => [0b1001, 0b1010, 0b1100, 0b1100, 0b1010, 0b1001],
        'l' => [0b1000, 0b1000, 0b1000, 0b1000, 0b1000, 0b1111],
        'm' => [0b1001, 0b1111, 0b1111, 0b1001, 0b1001, 0b1001],
        'n' => [0b1001, 0b1101, 0b1101, 0b1011, 0b1011, 0b1001],
        'o' => [0b0110, 0b1001, 0b1001, 0b1001, 0b1001, 0b0110],
        'p' => [0b1110, 0b1001, 0b1001, 0b1110, 0b1000, 0b1000],
        'q' => [0b0110, 0b1001, 0b1001, 0b1001, 0b1011, 0b0111],
        'r' => [0b1110, 0b1001, 0b1001, 0b1110, 0b1010, 0b1001],
        's' => [0b0111, 0b1000, 0b0110, 0b0001, 0b0001, 0b1110],
        't' => [0b1111, 0b0010, 0b0010, 0b0010, 0b0010, 0b0010],
        'u' => [0b1001, 0b1001, 0b1001, 0b1001, 0b1001, 0b0110],
        'v' => [0b1001, 0b1001, 0b1001, 0b1001, 0b0110, 0b0110],
        'w' => [0b1001, 0b1001, 0b1001, 0b1111, 0b1111, 0b1001],
        'x' => [0b1001, 0b1001, 0b0110, 0b0110, 0b1001, 0b1001],
        'y' => [0b1001, 0b1001, 0b0110, 0b0010, 0b0010, 0b0010],
        'z' => [0b1111, 0b0001, 0b0010, 0b0100, 0b1000, 0b1111],
        '-' => [0b0000, 0b0000, 0b1111, 0b0000, 0b0000, 0b0000],
        '+' => [0b0000, 0b0010, 0b0111, 0b0010, 0b0000, 0b0000],
        '/' => [0b0001, 0b0001, 0b0010, 0b0010, 0b0100, 0b0100],
        '.' => [0b0000, 0b0000, 0b0000, 0b0000, 0b0000, 0b0010],
        ':' => [0b0000, 0b0010, 0b0000, 0b0000, 0b0010, 0b0000],
        '=' => [0b0000, 0b1111, 0b0000, 0b1111, 0b0000, 0b0000],
        '[' => [0b0110, 0b0100, 0b0100, 0b0100, 0b0100, 0b0110],
        ']' => [0b0110, 0b0010, 0b0010, 0b0010, 0b0010, 0b0110],
        ' ' => [0b0000; 6],
        _ => [0b0000, 0b0000, 0b0110, 0b0110, 0b0000, 0b0000], // fallback dot
    }
}

/// Scale an ARGB color's channels by `f`, keeping it opaque.
fn scale_argb(color: u32, f: f32) -> u32 {
    let f = f.clamp(0.0, 1.0);
    let ch = |shift: u32| ((((color >> shift) & 0xFF) as f32 * f) as u32) << shift;
    0xFF00_0000 | ch(16) | ch(8) | ch(0)
}

// ══════════════════════════════════════════════════════════════════════════════
//  Tests
// ══════════════════════════════════════════════════════════════════════════════
