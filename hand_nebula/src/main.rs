//! hand_nebula — interactive entry point.

use std::io::{self, Write};

use hand_nebula::app::{run, AppConfig};

fn main() {
    env_logger::init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Hand Nebula — gesture-driven particle clouds          ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "tracker")]
    println!("  Mode: external tracker available  (--tracker <cmd>)");
    #[cfg(not(feature = "tracker"))]
    println!("  Mode: mouse/keyboard simulation  (build with --features tracker for hardware)");
    println!();

    let args: Vec<String> = std::env::args().collect();
    let cfg = if args.iter().any(|a| a == "--quick") {
        println!("  Quick-start: 900 points, 3 rings, no detection hold\n");
        parse_flags(&args, AppConfig::default())
    } else if args.len() > 1 {
        parse_flags(&args, AppConfig::default())
    } else {
        configure_interactively()
    };

    println!();
    println!("  Opening viewer window…");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// `--points N  --rings N  --hold-frames N  --tracker CMD` on top of `base`.
fn parse_flags(args: &[String], mut base: AppConfig) -> AppConfig {
    let mut it = args.iter().skip(1);
    while let Some(flag) = it.next() {
        match flag.as_str() {
            "--points" => {
                if let Some(v) = it.next().and_then(|s| s.parse().ok()) {
                    base.points = clamp_points(v);
                }
            }
            "--rings" => {
                if let Some(v) = it.next().and_then(|s| s.parse().ok()) {
                    base.rings = v;
                }
            }
            "--hold-frames" => {
                if let Some(v) = it.next().and_then(|s| s.parse().ok()) {
                    base.hold_frames = v;
                }
            }
            "--tracker" => base.tracker_cmd = it.next().cloned(),
            "--quick" => {}
            other => eprintln!("  ⚠  Ignoring unknown flag {other}"),
        }
    }
    base
}

fn configure_interactively() -> AppConfig {
    let points = clamp_points(
        read_line("  Cluster points per object (default 900): ")
            .trim()
            .parse()
            .unwrap_or(900),
    );
    let rings: usize = read_line("  Rings per object 0–6 (default 3): ")
        .trim()
        .parse()
        .unwrap_or(3)
        .min(6);
    let hold_frames: u32 = read_line("  Detection hold frames (default 0 = off): ")
        .trim()
        .parse()
        .unwrap_or(0);

    AppConfig {
        points,
        rings,
        hold_frames,
        tracker_cmd: None,
    }
}

fn clamp_points(n: usize) -> usize {
    n.clamp(50, 20_000)
}

fn read_line(prompt: &str) -> String {
    print!("{prompt}");
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
