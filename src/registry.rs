//! A type-keyed registry of singleton instances.
//!
//! [`SingletonRegistry`] holds one [`InstanceRegistry<T>`] per component type,
//! created the first time that type is requested or reported. Build one per
//! process (or per test) and pass it wherever instances are needed; for a
//! process-wide registry behind a static, see [`define_registry!`](crate::define_registry).
//!
//! # Examples
//!
//! ```
//! use scene_singleton::{Scene, SingletonRegistry};
//!
//! #[derive(Default)]
//! struct AudioManager;
//!
//! let mut scene = Scene::new();
//! let mut registry = SingletonRegistry::new();
//!
//! let first = registry.get::<AudioManager, _>(&mut scene).unwrap();
//! let again = registry.get::<AudioManager, _>(&mut scene).unwrap();
//! assert!(first.ptr_eq(&again));
//! ```

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    CandidateObserver, Component, Enforcement, Handle, InstanceRegistry, RegistryError,
    RegistryEvent, Resolution, World,
};

/// Type alias for the user-supplied tracing callback.
///
/// The callback receives a reference to a `RegistryEvent` every time the registry is
/// interacted with. It must be thread-safe because global registries are shared.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

/// One [`InstanceRegistry`] per component type.
#[derive(Default)]
pub struct SingletonRegistry {
    entries: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
    trace: Option<Arc<TraceCallback>>,
}

impl SingletonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Set a tracing callback for registry operations.
    ///
    /// The callback must not call back into this registry.
    pub fn set_trace_callback(
        &mut self,
        callback: impl Fn(&RegistryEvent) + Send + Sync + 'static,
    ) {
        self.trace = Some(Arc::new(callback));
    }

    pub fn clear_trace_callback(&mut self) {
        self.trace = None;
    }

    fn emit_event(&self, event: &RegistryEvent) {
        if let Some(callback) = self.trace.as_ref() {
            callback(event);
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------------------------------

    /// Return the instance of `T`, adopting a live one from `world` or creating
    /// it with `T::default()` when none is registered.
    ///
    /// # Errors
    ///
    /// Fails only if `world` cannot build the fallback container.
    pub fn get<T, W>(&mut self, world: &mut W) -> Result<Handle<T>, RegistryError>
    where
        T: Component + Default,
        W: World,
    {
        self.get_with(world, T::default)
    }

    /// Like [`get`](Self::get), building the fallback instance with `init`.
    pub fn get_with<T, W, F>(&mut self, world: &mut W, init: F) -> Result<Handle<T>, RegistryError>
    where
        T: Component,
        W: World,
        F: FnOnce() -> T,
    {
        let resolved = self.entry_mut::<T>().resolve(world, init);

        self.emit_event(&RegistryEvent::Get {
            type_name: type_name::<T>(),
            found: matches!(resolved, Ok((_, Resolution::Registered))),
        });

        let (handle, resolution) = resolved?;
        let container = handle.container();
        match resolution {
            Resolution::Registered => {}
            Resolution::Adopted => self.emit_event(&RegistryEvent::Adopt {
                type_name: type_name::<T>(),
                container,
            }),
            Resolution::Created => self.emit_event(&RegistryEvent::Create {
                type_name: type_name::<T>(),
                container,
            }),
        }

        Ok(handle)
    }

    /// The registered instance of `T`, if any. Never creates one.
    pub fn instance<T: Component>(&self) -> Option<Handle<T>> {
        self.entry::<T>()
            .and_then(InstanceRegistry::instance)
            .cloned()
    }

    /// Check whether an instance of `T` is registered.
    pub fn contains<T: Component>(&self) -> bool {
        let found = self.entry::<T>().is_some_and(InstanceRegistry::is_set);

        self.emit_event(&RegistryEvent::Contains {
            type_name: type_name::<T>(),
            found,
        });

        found
    }

    /// Forget every registered instance. Components stay in their worlds.
    ///
    /// Does NOT affect the tracing callback.
    #[doc(hidden)]
    pub fn clear(&mut self) {
        self.emit_event(&RegistryEvent::Clear {});
        self.entries.clear();
    }

    fn entry<T: Component>(&self) -> Option<&InstanceRegistry<T>> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast_ref::<InstanceRegistry<T>>())
    }

    fn entry_mut<T: Component>(&mut self) -> &mut InstanceRegistry<T> {
        let slot = self
            .entries
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(InstanceRegistry::<T>::new()));

        match slot.downcast_mut::<InstanceRegistry<T>>() {
            Some(entry) => entry,
            None => unreachable!("registry entry for {} has the wrong type", type_name::<T>()),
        }
    }
}

impl<T: Component> CandidateObserver<T> for SingletonRegistry {
    fn on_candidate_created<W: World>(
        &mut self,
        world: &mut W,
        candidate: Handle<T>,
    ) -> Enforcement {
        let container = candidate.container();
        let enforcement = self.entry_mut::<T>().on_candidate_created(world, candidate);

        match enforcement {
            Enforcement::Accepted => self.emit_event(&RegistryEvent::Adopt {
                type_name: type_name::<T>(),
                container,
            }),
            Enforcement::Rejected => self.emit_event(&RegistryEvent::Reject {
                type_name: type_name::<T>(),
                container,
            }),
            Enforcement::AlreadyRegistered => {}
        }

        enforcement
    }
}

impl std::fmt::Debug for SingletonRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingletonRegistry")
            .field("entries", &self.entries.len())
            .field("traced", &self.trace.is_some())
            .finish()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
