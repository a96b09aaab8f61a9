//! A small in-memory [`World`].
//!
//! `Scene` keeps containers in creation order, each holding a name, a
//! persistence flag and at most one component per type. Calling
//! [`Scene::transition`] tears down every container that was not marked
//! persistent, the way an engine unloads a level.

use std::any::{type_name, Any, TypeId};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tracing::debug;

use crate::{CandidateObserver, Component, ContainerId, Enforcement, Handle, World, WorldError};

struct Container {
    name: String,
    persistent: bool,
    components: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Container {
    fn component<T: Component>(&self) -> Option<Arc<T>> {
        self.components
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|any| any.downcast::<T>().ok())
    }
}

/// In-memory world of containers and components.
#[derive(Default)]
pub struct Scene {
    next_id: u64,
    containers: BTreeMap<ContainerId, Container>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty, non-persistent container.
    pub fn spawn(&mut self, name: impl Into<String>) -> ContainerId {
        self.next_id += 1;
        let id = ContainerId::new(self.next_id);
        self.containers.insert(
            id,
            Container {
                name: name.into(),
                persistent: false,
                components: HashMap::new(),
            },
        );
        id
    }

    /// Attach `component` to `container` without notifying anyone.
    ///
    /// # Errors
    ///
    /// - `container` does not exist
    /// - `container` already hosts a `T`
    pub fn attach<T: Component>(
        &mut self,
        container: ContainerId,
        component: T,
    ) -> Result<Handle<T>, WorldError> {
        let record = self
            .containers
            .get_mut(&container)
            .ok_or(WorldError::UnknownContainer(container))?;

        if record.components.contains_key(&TypeId::of::<T>()) {
            return Err(WorldError::DuplicateComponent {
                container,
                type_name: type_name::<T>(),
            });
        }

        let component = Arc::new(component);
        record
            .components
            .insert(TypeId::of::<T>(), component.clone());

        Ok(Handle::new(container, component))
    }

    /// Attach `component` and report it to `observer`, as an engine does when
    /// a component finishes initializing.
    pub fn attach_observed<T, O>(
        &mut self,
        container: ContainerId,
        component: T,
        observer: &mut O,
    ) -> Result<(Handle<T>, Enforcement), WorldError>
    where
        T: Component,
        O: CandidateObserver<T>,
    {
        let handle = self.attach(container, component)?;
        let enforcement = observer.on_candidate_created(self, handle.clone());
        Ok((handle, enforcement))
    }

    pub fn component<T: Component>(&self, container: ContainerId) -> Option<Handle<T>> {
        self.containers
            .get(&container)
            .and_then(Container::component::<T>)
            .map(|component| Handle::new(container, component))
    }

    pub fn has_component<T: Component>(&self, container: ContainerId) -> bool {
        self.containers
            .get(&container)
            .is_some_and(|record| record.components.contains_key(&TypeId::of::<T>()))
    }

    pub fn contains(&self, container: ContainerId) -> bool {
        self.containers.contains_key(&container)
    }

    pub fn name(&self, container: ContainerId) -> Option<&str> {
        self.containers
            .get(&container)
            .map(|record| record.name.as_str())
    }

    pub fn is_persistent(&self, container: ContainerId) -> bool {
        self.containers
            .get(&container)
            .is_some_and(|record| record.persistent)
    }

    /// Destroy a container and everything on it. Returns `false` if it did
    /// not exist.
    pub fn despawn(&mut self, container: ContainerId) -> bool {
        self.containers.remove(&container).is_some()
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Tear down every non-persistent container. Returns how many were removed.
    pub fn transition(&mut self) -> usize {
        let before = self.containers.len();
        self.containers.retain(|id, record| {
            if !record.persistent {
                debug!(container = %id, name = %record.name, "despawning on scene transition");
            }
            record.persistent
        });
        before - self.containers.len()
    }
}

/// Containers are scanned oldest first, so `find_any` returns the component
/// on the earliest-spawned container that has one.
impl World for Scene {
    fn find_any<T: Component>(&self) -> Option<Handle<T>> {
        self.containers.iter().find_map(|(id, record)| {
            record
                .component::<T>()
                .map(|component| Handle::new(*id, component))
        })
    }

    fn is_live<T: Component>(&self, handle: &Handle<T>) -> bool {
        self.component::<T>(handle.container())
            .is_some_and(|current| current.ptr_eq(handle))
    }

    fn spawn_container(&mut self, name: &str) -> Result<ContainerId, WorldError> {
        Ok(self.spawn(name))
    }

    fn attach<T: Component>(
        &mut self,
        container: ContainerId,
        component: T,
    ) -> Result<Handle<T>, WorldError> {
        Scene::attach(self, container, component)
    }

    fn mark_persistent(&mut self, container: ContainerId) {
        if let Some(record) = self.containers.get_mut(&container) {
            record.persistent = true;
        }
    }

    fn remove_component<T: Component>(&mut self, container: ContainerId) {
        let removed = self
            .containers
            .get_mut(&container)
            .and_then(|record| record.components.remove(&TypeId::of::<T>()));

        if removed.is_none() {
            debug!(
                container = %container,
                component = type_name::<T>(),
                "nothing to remove"
            );
        }
    }
}
