//! Scene transition example for scene-singleton.
//!
//! Demonstrates:
//! - Lazily creating a manager the first time it is requested
//! - The manager surviving level loads while everything else is torn down
//! - Structured warnings emitted through `tracing`
//!
//! Run with: `RUST_LOG=debug cargo run --example scene_transition`

use scene_singleton::{define_registry, Handle, Scene};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

// Create an isolated registry for this example
define_registry!(managers);

/// Keeps score across levels.
#[derive(Debug, Default)]
struct ScoreKeeper {
    points: Mutex<u32>,
}

impl ScoreKeeper {
    fn add(&self, points: u32) -> u32 {
        let mut total = self.points.lock().unwrap_or_else(|p| p.into_inner());
        *total += points;
        *total
    }
}

fn load_level(scene: &mut Scene, number: u32) {
    let removed = scene.transition();
    println!("   Level {number}: tore down {removed} container(s)");

    for i in 0..3 {
        scene.spawn(format!("Level {number} prop {i}"));
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    println!("=== scene-singleton: Scene Transitions ===\n");

    let mut scene = Scene::new();

    // -------------------------------------------------------------------------
    // 1. First access creates the manager (and logs a warning)
    // -------------------------------------------------------------------------
    println!("1. Requesting ScoreKeeper from an empty scene...");

    let keeper: Handle<ScoreKeeper> = managers::get(&mut scene).unwrap();
    println!(
        "   Created on container {} ({:?})",
        keeper.container(),
        scene.name(keeper.container())
    );

    // -------------------------------------------------------------------------
    // 2. Play a few levels
    // -------------------------------------------------------------------------
    println!("\n2. Playing through three levels...");

    for level in 1..=3 {
        load_level(&mut scene, level);

        let keeper: Handle<ScoreKeeper> = managers::get(&mut scene).unwrap();
        let total = keeper.add(level * 100);
        println!("   Level {level}: score is now {total}");
    }

    // -------------------------------------------------------------------------
    // Summary
    // -------------------------------------------------------------------------
    println!("\n=== Example Complete ===");
    println!(
        "The scene holds {} container(s); the ScoreKeeper on {} survived every load.",
        scene.len(),
        keeper.container()
    );
}
