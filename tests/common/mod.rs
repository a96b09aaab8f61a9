//! Shared helpers for integration tests.

#![allow(dead_code)]

use scene_singleton::{Component, ContainerId, Handle, RegistryEvent, Scene, World, WorldError};
use std::sync::{Arc, Mutex};

/// A [`Scene`] that counts every call the registry makes into it.
#[derive(Default)]
pub struct RecordingWorld {
    pub scene: Scene,
    pub spawned: Vec<ContainerId>,
    pub persisted: Vec<ContainerId>,
    pub removed: Vec<ContainerId>,
}

impl RecordingWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `container` was marked persistent.
    pub fn persist_count(&self, container: ContainerId) -> usize {
        self.persisted.iter().filter(|&&id| id == container).count()
    }

    /// How many times a component was removed from `container`.
    pub fn removal_count(&self, container: ContainerId) -> usize {
        self.removed.iter().filter(|&&id| id == container).count()
    }
}

impl World for RecordingWorld {
    fn find_any<T: Component>(&self) -> Option<Handle<T>> {
        self.scene.find_any()
    }

    fn is_live<T: Component>(&self, handle: &Handle<T>) -> bool {
        self.scene.is_live(handle)
    }

    fn spawn_container(&mut self, name: &str) -> Result<ContainerId, WorldError> {
        let id = self.scene.spawn_container(name)?;
        self.spawned.push(id);
        Ok(id)
    }

    fn attach<T: Component>(
        &mut self,
        container: ContainerId,
        component: T,
    ) -> Result<Handle<T>, WorldError> {
        self.scene.attach(container, component)
    }

    fn mark_persistent(&mut self, container: ContainerId) {
        self.persisted.push(container);
        self.scene.mark_persistent(container);
    }

    fn remove_component<T: Component>(&mut self, container: ContainerId) {
        self.removed.push(container);
        self.scene.remove_component::<T>(container);
    }
}

/// Collect formatted trace events into a shared vector.
pub fn collect_events() -> (
    Arc<Mutex<Vec<String>>>,
    impl Fn(&RegistryEvent) + Send + Sync + 'static,
) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();
    let callback = move |event: &RegistryEvent| {
        events_clone.lock().unwrap().push(format!("{}", event));
    };
    (events, callback)
}

/// Count `WARN` level `tracing` events emitted while `f` runs on this thread.
pub fn count_warnings<R>(f: impl FnOnce() -> R) -> (R, usize) {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    let count = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(WarnCounter(count.clone()));
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, count.load(Ordering::SeqCst))
}
