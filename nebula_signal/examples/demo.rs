//! Walks a synthetic pair of hands through the signal pipeline.

use glam::Vec3;
use nebula_signal::landmark::{INDEX_TIP, MIDDLE_TIP, THUMB_TIP};
use nebula_signal::{HandLabel, LandmarkFrame, RawHand, RolePipeline};

/// Upright open hand with its wrist at `(x, 0.6, z)`.
fn open_hand(x: f32, z: f32, label: HandLabel) -> RawHand {
    let wrist = Vec3::new(x, 0.6, z);
    let mut points = vec![wrist; 21];
    points[THUMB_TIP] = wrist + Vec3::new(-0.15, -0.15, 0.0);
    points[INDEX_TIP] = wrist + Vec3::new(0.05, -0.25, 0.0);
    points[MIDDLE_TIP] = wrist + Vec3::new(0.0, -0.28, 0.0);
    RawHand::new(points, label)
}

fn show(tag: &str, frame: &nebula_signal::RoleFrame) {
    println!(
        "   {:<18} L[det {:5} pinch {:.2} zoom {:+.2}]  R[det {:5} pinch {:.2} zoom {:+.2}]  both={}",
        tag,
        frame.left.detected,
        frame.left.pinch,
        frame.left.zoom,
        frame.right.detected,
        frame.right.pinch,
        frame.right.zoom,
        frame.both_detected,
    );
}

fn main() {
    println!("\n=== Signal Pipeline Demo ===\n");
    let mut pipeline = RolePipeline::new();

    // ── 1. Nothing detected ───────────────────────────────────────────────
    println!("1. Empty frames");
    show("empty:", &pipeline.process(&LandmarkFrame::empty()));
    println!();

    // ── 2. One hand appears and settles ───────────────────────────────────
    println!("2. Left hand alone (pinch opens over a few frames)");
    for i in 0..5 {
        let frame = LandmarkFrame::one(open_hand(0.3, 0.0, HandLabel::Left));
        let out = pipeline.process(&frame);
        show(&format!("frame {i}:"), &out);
    }
    println!();

    // ── 3. Labels lie, positions do not ───────────────────────────────────
    println!("3. Two hands with swapped detector labels");
    let frame = LandmarkFrame::two(
        open_hand(0.8, 0.0, HandLabel::Left),
        open_hand(0.2, 0.0, HandLabel::Right),
    );
    let out = pipeline.process(&frame);
    show("swapped:", &out);
    println!(
        "   left role sits at x={:.2}, right role at x={:.2}",
        out.left.position.x, out.right.position.x
    );
    println!();

    // ── 4. The left hand pushes toward the camera ─────────────────────────
    println!("4. Zoom builds as depth drops below the baseline");
    for i in 0..4 {
        let z = -0.08 * i as f32;
        let frame = LandmarkFrame::two(
            open_hand(0.2, z, HandLabel::Left),
            open_hand(0.8, 0.0, HandLabel::Right),
        );
        show(&format!("z={z:+.2}:"), &pipeline.process(&frame));
    }
    println!();

    // ── 5. Dropout and return ─────────────────────────────────────────────
    println!("5. Both hands vanish, left returns (zoom re-baselined)");
    show("gone:", &pipeline.process(&LandmarkFrame::empty()));
    let frame = LandmarkFrame::one(open_hand(0.25, -0.3, HandLabel::Left));
    show("back:", &pipeline.process(&frame));
}
