//! Animates one point-cloud object from parked to full wave.

use nebula_points::{ObjectConfig, PointCloudObject};

const DT: f32 = 1.0 / 60.0;

fn show(tag: &str, object: &PointCloudObject) {
    let frame = object.frame();
    println!(
        "   {:<16} visible {:<5}  opacity {:.2}  scale {:.2}  size {:.1}  rot_y {:+.2}",
        tag, frame.visible, frame.opacity, frame.scale, frame.point_size, frame.rot_y,
    );
}

fn main() {
    println!("\n=== Point Animator Demo ===\n");
    let mut object = PointCloudObject::new(&ObjectConfig::default());
    println!("   {} particles (cluster + rings)\n", object.point_count());

    println!("1. Parked (idle layout)");
    object.apply_layout(0.0, 0.0, 0.5, 0.0);
    object.tick(DT, 0.0);
    show("parked:", &object);
    println!();

    println!("2. One second center stage, calm");
    object.apply_layout(0.0, 1.0, 1.0, 0.0);
    for i in 0..60 {
        object.tick(DT, 1.0 + i as f32 * DT);
    }
    show("staged:", &object);
    println!();

    println!("3. Two seconds at full wave, user steering");
    object.transform.target.rotation = glam::Vec2::new(0.8, 0.3);
    object.apply_layout(-2.2, 1.0, 0.85, 1.0);
    for i in 0..120 {
        object.tick(DT, 2.0 + i as f32 * DT);
    }
    show("dual side:", &object);

    let spread: Vec<f32> = object
        .frame()
        .positions
        .iter()
        .take(5)
        .map(|p| p.length())
        .collect();
    println!("   first cluster radii: {spread:.2?} (rippling, not rigid)");
    println!();
}
