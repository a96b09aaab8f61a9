//! Per-type singleton state machine.
//!
//! An [`InstanceRegistry<T>`] is either UNSET (no instance) or SET (holding
//! exactly one [`Handle<T>`]). It moves to SET the first time an instance is
//! requested through [`InstanceRegistry::get`] or the first time a candidate
//! is reported through [`CandidateObserver::on_candidate_created`], and stays
//! there until the registry is torn down or the world no longer holds the
//! registered component. A destroyed instance is noticed the next time the
//! registry is consulted with a world, which drops it and starts over.

use std::any::type_name;

use tracing::{debug, warn};

use crate::{CandidateObserver, Component, Handle, RegistryError, World, WorldError};

/// How [`InstanceRegistry::resolve`] obtained its instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The instance was already registered.
    Registered,
    /// A live component found in the world was adopted.
    Adopted,
    /// No component existed, so a new container was built.
    Created,
}

/// What [`CandidateObserver::on_candidate_created`] did with a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enforcement {
    /// The candidate became the registered instance.
    Accepted,
    /// The candidate already was the registered instance.
    AlreadyRegistered,
    /// Another instance was registered; the candidate's component was removed.
    Rejected,
}

/// Holder of at most one instance of `T`.
pub struct InstanceRegistry<T> {
    instance: Option<Handle<T>>,
}

impl<T> Default for InstanceRegistry<T> {
    fn default() -> Self {
        Self { instance: None }
    }
}

impl<T> std::fmt::Debug for InstanceRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstanceRegistry")
            .field("instance", &self.instance)
            .finish()
    }
}

impl<T: Component> InstanceRegistry<T> {
    pub const fn new() -> Self {
        Self { instance: None }
    }

    /// The registered instance, without resolving one. May be stale if the
    /// world destroyed it since the last call that was given the world.
    pub fn instance(&self) -> Option<&Handle<T>> {
        self.instance.as_ref()
    }

    pub fn is_set(&self) -> bool {
        self.instance.is_some()
    }

    /// Return the instance, adopting a live one or creating it with
    /// `T::default()` if none is registered yet.
    ///
    /// # Errors
    ///
    /// Fails only if the world cannot build the fallback container.
    pub fn get<W: World>(&mut self, world: &mut W) -> Result<Handle<T>, RegistryError>
    where
        T: Default,
    {
        self.get_with(world, T::default)
    }

    /// Like [`get`](Self::get), building the fallback instance with `init`.
    pub fn get_with<W, F>(&mut self, world: &mut W, init: F) -> Result<Handle<T>, RegistryError>
    where
        W: World,
        F: FnOnce() -> T,
    {
        self.resolve(world, init).map(|(handle, _)| handle)
    }

    /// Resolve the instance and report which path produced it.
    ///
    /// `init` is only called when the world holds no live `T`.
    pub fn resolve<W, F>(
        &mut self,
        world: &mut W,
        init: F,
    ) -> Result<(Handle<T>, Resolution), RegistryError>
    where
        W: World,
        F: FnOnce() -> T,
    {
        self.forget_destroyed(world);

        if let Some(instance) = &self.instance {
            return Ok((instance.clone(), Resolution::Registered));
        }

        if let Some(found) = world.find_any::<T>() {
            debug!(
                component = short_type_name::<T>(),
                container = %found.container(),
                "adopting instance found in the scene"
            );
            return Ok((self.adopt(world, found), Resolution::Adopted));
        }

        let name = short_type_name::<T>();
        let created =
            construct(world, name, init).map_err(|source| RegistryError::Construction {
                type_name: type_name::<T>(),
                source,
            })?;

        warn!(
            component = name,
            container = %created.container(),
            "No instance of {} found in the scene. Creating a new one.",
            name
        );

        Ok((self.adopt(world, created), Resolution::Created))
    }

    fn forget_destroyed<W: World>(&mut self, world: &W) {
        if let Some(stale) = self.instance.take_if(|handle| !world.is_live(handle)) {
            debug!(
                component = short_type_name::<T>(),
                container = %stale.container(),
                "registered instance was destroyed"
            );
        }
    }

    fn adopt<W: World>(&mut self, world: &mut W, handle: Handle<T>) -> Handle<T> {
        world.mark_persistent(handle.container());
        self.instance = Some(handle.clone());
        handle
    }
}

impl<T: Component> CandidateObserver<T> for InstanceRegistry<T> {
    fn on_candidate_created<W: World>(
        &mut self,
        world: &mut W,
        candidate: Handle<T>,
    ) -> Enforcement {
        self.forget_destroyed(world);

        let registered = match &self.instance {
            None => {
                debug!(
                    component = short_type_name::<T>(),
                    container = %candidate.container(),
                    "accepting candidate as instance"
                );
                self.adopt(world, candidate);
                return Enforcement::Accepted;
            }
            Some(registered) if registered.ptr_eq(&candidate) => {
                return Enforcement::AlreadyRegistered;
            }
            Some(registered) => registered.container(),
        };

        let name = short_type_name::<T>();
        warn!(
            component = name,
            container = %candidate.container(),
            registered = %registered,
            "Another instance of {} already exists. Destroying this one.",
            name
        );
        // Only the component goes; the container may host unrelated state.
        world.remove_component::<T>(candidate.container());

        Enforcement::Rejected
    }
}

fn construct<T, W, F>(world: &mut W, name: &str, init: F) -> Result<Handle<T>, WorldError>
where
    T: Component,
    W: World,
    F: FnOnce() -> T,
{
    let container = world.spawn_container(name)?;
    world.attach(container, init())
}

/// `T`'s type name without its module path, e.g. `AudioManager` or `Vec<u8>`.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    // Tuples, arrays and slices start with a bracket and are left whole.
    let path_end = full.find(['<', '(', '[']).unwrap_or(full.len());
    let start = full[..path_end].rfind("::").map_or(0, |i| i + 2);
    &full[start..]
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
