/// Example: Drive the view pipeline without a terminal
///
/// Usage: cargo run --example headless -- [frames]
///
/// Simulates a short orbit and zoom, then prints the matrices a renderer
/// would upload and a few generated vertices.

use std::env;
use wavegl_core::{FrameDriver, MeshResolution, VertexStrategy, ViewControl, ViewSession};

fn print_matrix(name: &str, m: &[f32; 16]) {
    println!("{}:", name);
    for row in m.chunks(4) {
        println!("  {:9.4} {:9.4} {:9.4} {:9.4}", row[0], row[1], row[2], row[3]);
    }
}

fn main() {
    let frames: u32 = env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(100);

    let mut driver = FrameDriver::new(
        ViewSession::default(),
        MeshResolution::new(16, 16),
        VertexStrategy::Host,
    );
    driver.on_resize(1280, 720);

    let mut last = None;
    for frame in 0..frames {
        // Orbit for a while, then back away from the mesh
        if frame < frames / 2 {
            driver.on_drag(2.0, 0.0, false, true);
        } else {
            driver.on_scroll(-0.1);
        }
        match driver.tick() {
            Ok(output) => last = Some(output),
            Err(e) => {
                eprintln!("Frame {} failed: {}", frame, e);
                return;
            }
        }
    }

    let Some(output) = last else {
        println!("No frames rendered");
        return;
    };
    println!("After {} frames (phase {:.2})", frames, output.animation_phase);
    print_matrix("modelview", &output.model_view);
    print_matrix("projection", &output.projection);

    println!("first vertices:");
    for vertex in driver.vertices().chunks(4).take(4) {
        println!("  ({:.3}, {:.3}, {:.3})", vertex[0], vertex[1], vertex[2]);
    }
}
