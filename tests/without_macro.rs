//! Integration tests demonstrating how to use a global registry WITHOUT the macro.
//!
//! This shows the manual implementation approach, which gives you full control
//! over the registry setup. This is useful when you need custom behavior or
//! want to understand how the macro works under the hood.
//!
//! NOTE: All tests use #[serial] because they share the same static registry (MY_REGISTRY).
//! Running them in parallel would cause interference and non-deterministic failures.

use serial_test::serial;
use scene_singleton::{
    Enforcement, Handle, RegistryApi, RegistryStorage, Scene, SingletonRegistry,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock, Mutex};

// ============================================================================
// Manual Registry Implementation (Without Macro)
// ============================================================================

/// Define the static storage for our registry
static MY_STORAGE: RegistryStorage = LazyLock::new(|| Mutex::new(SingletonRegistry::new()));

/// Our custom registry API implementation
struct MyRegistry;

impl RegistryApi for MyRegistry {
    fn storage() -> &'static RegistryStorage {
        &MY_STORAGE
    }
}

/// Constant instance of our registry
const MY_REGISTRY: MyRegistry = MyRegistry;

#[derive(Debug, Default)]
struct SaveSystem {
    slot: u8,
}

// ============================================================================
// Tests Using Manual Implementation
// ============================================================================

#[test]
#[serial]
fn test_basic_get() {
    MY_REGISTRY.clear();
    let mut scene = Scene::new();

    let save: Handle<SaveSystem> = MY_REGISTRY.get(&mut scene).unwrap();

    assert_eq!(save.slot, 0);
    assert!(scene.is_persistent(save.container()));
}

#[test]
#[serial]
fn test_contains_check() {
    MY_REGISTRY.clear();
    let mut scene = Scene::new();

    assert!(!MY_REGISTRY.contains::<SaveSystem>());
    let _: Handle<SaveSystem> = MY_REGISTRY.get(&mut scene).unwrap();
    assert!(MY_REGISTRY.contains::<SaveSystem>());
    assert!(!MY_REGISTRY.contains::<u8>());
}

#[test]
#[serial]
fn test_candidates() {
    MY_REGISTRY.clear();
    let mut scene = Scene::new();
    let a = scene.spawn("Save A");
    let b = scene.spawn("Save B");
    let first = scene.attach(a, SaveSystem { slot: 1 }).unwrap();
    let second = scene.attach(b, SaveSystem { slot: 2 }).unwrap();

    assert_eq!(
        MY_REGISTRY.on_candidate_created(&mut scene, first),
        Enforcement::Accepted
    );
    assert_eq!(
        MY_REGISTRY.on_candidate_created(&mut scene, second),
        Enforcement::Rejected
    );

    let save = MY_REGISTRY.instance::<SaveSystem>().unwrap();
    assert_eq!(save.slot, 1);
}

#[test]
#[serial]
fn test_with_tracing() {
    MY_REGISTRY.clear();

    // Counter for trace events
    let event_count = Arc::new(AtomicUsize::new(0));
    let event_count_clone = Arc::clone(&event_count);

    MY_REGISTRY.set_trace_callback(move |_event| {
        event_count_clone.fetch_add(1, Ordering::SeqCst);
    });

    let mut scene = Scene::new();
    let _: Handle<SaveSystem> = MY_REGISTRY.get(&mut scene).unwrap(); // +2 events (get, create)
    MY_REGISTRY.contains::<SaveSystem>(); // +1 event

    assert_eq!(event_count.load(Ordering::SeqCst), 3);

    MY_REGISTRY.clear_trace_callback();
}

#[test]
#[serial]
fn test_lock_as_observer() {
    MY_REGISTRY.clear();
    let mut scene = Scene::new();
    let id = scene.spawn("Save");

    let (handle, enforcement) = scene
        .attach_observed(id, SaveSystem { slot: 3 }, &mut *MY_REGISTRY.lock())
        .unwrap();

    assert_eq!(enforcement, Enforcement::Accepted);
    assert!(MY_REGISTRY.instance::<SaveSystem>().unwrap().ptr_eq(&handle));
}

#[test]
#[serial]
fn test_clear_then_readopt() {
    MY_REGISTRY.clear();
    let mut scene = Scene::new();
    let original: Handle<SaveSystem> = MY_REGISTRY.get(&mut scene).unwrap();

    MY_REGISTRY.clear();

    // The component is still in the scene, so it is found again
    let again: Handle<SaveSystem> = MY_REGISTRY.get(&mut scene).unwrap();
    assert!(again.ptr_eq(&original));
    assert_eq!(scene.len(), 1);
}
