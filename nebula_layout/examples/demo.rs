//! Walks the layout state through a detection scenario.

use nebula_layout::{DetectionHold, Layout, LayoutState};

const DT: f32 = 1.0 / 60.0;

fn show(tag: &str, state: &LayoutState) {
    let l = state.object(0);
    let r = state.object(1);
    println!(
        "   {:<22} [{:<10}]  L[x {:+.2} op {:.2} wave {:.2}]  R[x {:+.2} op {:.2} wave {:.2}]",
        tag,
        state.selected().name(),
        l.x_offset,
        l.opacity,
        l.wave_amount,
        r.x_offset,
        r.opacity,
        r.wave_amount,
    );
}

fn main() {
    println!("\n=== Layout State Demo ===\n");
    let mut state = LayoutState::new();

    println!("1. One second of each detection pattern");
    for (left, right) in [(false, false), (true, false), (true, true), (false, true)] {
        let layout = Layout::from_detection(left, right);
        for _ in 0..60 {
            state.advance(layout, DT);
        }
        show(&format!("left={left} right={right}:"), &state);
    }
    println!();

    println!("2. Single-frame dropout mid-dual (no hold)");
    state.advance(Layout::from_detection(true, false), DT);
    show("dropout frame:", &state);
    state.advance(Layout::from_detection(true, true), DT);
    show("recovered:", &state);
    println!();

    println!("3. Same dropout through a 3-frame hold");
    let mut hold = DetectionHold::new(3);
    hold.apply(true, true);
    let (l, r) = hold.apply(true, false);
    state.advance(Layout::from_detection(l, r), DT);
    show("held frame:", &state);
    println!();
}
