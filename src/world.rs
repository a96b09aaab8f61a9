//! The boundary between the registry and the engine that owns the objects.
//!
//! The registry never touches an engine object model directly. Everything it
//! needs from the host (finding live components, building a fresh container,
//! exempting a container from scene teardown and disposing of a rejected
//! component) goes through the [`World`] trait.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use thiserror::Error;

use crate::Enforcement;

/// Marker for types that can live on a container and be guarded by a registry.
pub trait Component: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Component for T {}

/// Identifier of an engine-managed container (an entity or game object).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContainerId(u64);

impl ContainerId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A component of type `T` together with the container that hosts it.
///
/// Cloning a handle is cheap and yields a handle to the same object.
pub struct Handle<T> {
    container: ContainerId,
    component: Arc<T>,
}

impl<T> Handle<T> {
    pub fn new(container: ContainerId, component: Arc<T>) -> Self {
        Self {
            container,
            component,
        }
    }

    /// The container hosting the component.
    pub fn container(&self) -> ContainerId {
        self.container
    }

    /// The shared component itself.
    pub fn component(&self) -> &Arc<T> {
        &self.component
    }

    /// Returns `true` if both handles refer to the same object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.container == other.container && Arc::ptr_eq(&self.component, &other.component)
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self {
            container: self.container,
            component: Arc::clone(&self.component),
        }
    }
}

impl<T> Deref for Handle<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.component
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("type_name", &std::any::type_name::<T>())
            .field("container", &self.container)
            .finish()
    }
}

/// Errors reported by a [`World`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("container {0} does not exist")]
    UnknownContainer(ContainerId),

    #[error("container {container} already hosts a {type_name}")]
    DuplicateComponent {
        container: ContainerId,
        type_name: &'static str,
    },

    #[error("world refused the request: {0}")]
    Refused(String),
}

/// Operations the registry requires from the host engine.
///
/// Implementations must notify the registry of every newly attached component
/// through [`CandidateObserver`] themselves; attaching through this trait does
/// not imply a notification.
pub trait World {
    /// Find any live component of type `T`. Which one is returned when several
    /// exist is up to the implementation.
    fn find_any<T: Component>(&self) -> Option<Handle<T>>;

    /// Returns `true` while `handle`'s container still hosts that exact
    /// component. A registered handle that is no longer live counts as unset.
    fn is_live<T: Component>(&self, handle: &Handle<T>) -> bool;

    /// Create a new, empty container.
    fn spawn_container(&mut self, name: &str) -> Result<ContainerId, WorldError>;

    /// Attach `component` to an existing container.
    ///
    /// Must not report the component to the registry that is calling it. A
    /// global registry holds its lock for the whole call, so reporting from
    /// inside `attach` deadlocks. Report after the registry call returns.
    fn attach<T: Component>(
        &mut self,
        container: ContainerId,
        component: T,
    ) -> Result<Handle<T>, WorldError>;

    /// Exempt `container` from teardown on scene transitions.
    fn mark_persistent(&mut self, container: ContainerId);

    /// Remove the `T` component from `container`, leaving the rest of it intact.
    fn remove_component<T: Component>(&mut self, container: ContainerId);
}

/// Listener invoked by a world when a component of type `T` is initialized.
///
/// A world must report every attached `T` exactly once, before the component
/// is otherwise used.
pub trait CandidateObserver<T: Component> {
    fn on_candidate_created<W: World>(
        &mut self,
        world: &mut W,
        candidate: Handle<T>,
    ) -> Enforcement;
}
