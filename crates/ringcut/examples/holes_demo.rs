//! Triangulate a few sample shapes and print counts and area deviation.
//!
//! Usage:
//!   cargo run -p ringcut --example holes_demo
//!   cargo run -p ringcut --example holes_demo -- 12

use ringcut::prelude::*;

fn main() {
    let grid = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(3);

    let shapes = [
        ("regular(8)", regular(8, 1.0)),
        ("star(12)", star(12, 2.0, 0.8)),
        ("holes", square_with_holes(100.0, grid, 0.5)),
        (
            "radial(500)",
            draw_radial(
                RadialCfg {
                    vertex_count: VertexCount::Fixed(500),
                    ..RadialCfg::default()
                },
                ReplayToken { seed: 2025, index: 0 },
            ),
        ),
    ];
    for (name, p) in shapes {
        match p.triangulate() {
            Ok(tri) => {
                let dev = p.deviation(&tri).unwrap_or(f64::NAN);
                println!(
                    "{name:>12}: points={:<6} holes={:<4} triangles={:<6} expected={:<6} deviation={dev:.3e}",
                    p.len(),
                    p.holes(),
                    tri.len() / 3,
                    p.expected_triangles(),
                );
            }
            Err(e) => eprintln!("{name}: {e}"),
        }
    }
}
