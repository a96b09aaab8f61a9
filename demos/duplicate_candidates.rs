//! Duplicate candidates example for scene-singleton.
//!
//! Demonstrates:
//! - A scene authored with several copies of the same manager
//! - The world reporting each copy to an explicit `SingletonRegistry`
//! - Duplicates losing only their manager component
//! - Auditing the outcome with the trace callback
//!
//! Run with: `cargo run --example duplicate_candidates`

use scene_singleton::{RegistryEvent, Scene, SingletonRegistry};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct AudioManager {
    source: &'static str,
}

#[derive(Debug)]
struct Transform {
    x: f32,
    y: f32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    println!("=== scene-singleton: Duplicate Candidates ===\n");

    let mut scene = Scene::new();
    let mut registry = SingletonRegistry::new();

    registry.set_trace_callback(|event| {
        if let RegistryEvent::Adopt { container, .. } | RegistryEvent::Reject { container, .. } =
            event
        {
            println!("   [trace] {event} (container {container})");
        }
    });

    // -------------------------------------------------------------------------
    // 1. Build a scene with three audio managers
    // -------------------------------------------------------------------------
    println!("1. Loading a scene with three AudioManagers...");

    let sources = ["main menu", "level prefab", "debug overlay"];
    let mut containers = Vec::new();

    for (i, source) in sources.into_iter().enumerate() {
        let id = scene.spawn(format!("Audio {i}"));
        scene
            .attach(
                id,
                Transform {
                    x: i as f32,
                    y: 0.0,
                },
            )
            .unwrap();

        let (_, outcome) = scene
            .attach_observed(id, AudioManager { source }, &mut registry)
            .unwrap();
        println!("   {source}: {outcome:?}");
        containers.push(id);
    }

    // -------------------------------------------------------------------------
    // 2. Inspect the survivors
    // -------------------------------------------------------------------------
    println!("\n2. Inspecting containers...");

    for id in &containers {
        let transform = scene.component::<Transform>(*id).unwrap();
        println!(
            "   {id}: persistent={}, has AudioManager={}, transform=({}, {})",
            scene.is_persistent(*id),
            scene.has_component::<AudioManager>(*id),
            transform.x,
            transform.y
        );
    }

    let audio = registry.instance::<AudioManager>().unwrap();
    println!("\n   Registered AudioManager came from the {}", audio.source);

    // -------------------------------------------------------------------------
    // 3. Transition
    // -------------------------------------------------------------------------
    println!("\n3. Transitioning to the next scene...");

    let removed = scene.transition();
    println!("   Removed {removed} container(s), {} left", scene.len());

    println!("\n=== Example Complete ===");
}
