//! Core trait for process-wide registries.
//!
//! This module provides the `RegistryApi` trait with default implementations
//! that lock a static [`SingletonRegistry`] and delegate to it.
//!
//! Every operation holds the lock for its whole check-then-set sequence,
//! including the calls it makes into the world, so two threads racing to
//! resolve or report the same type can never both register an instance.

use std::sync::{LazyLock, Mutex, MutexGuard};

use crate::{
    CandidateObserver, Component, Enforcement, Handle, RegistryError, RegistryEvent,
    SingletonRegistry, World,
};

/// Type alias for the registry storage static.
///
/// Note: This type is also spelled out in the `define_registry!` macro.
/// Keep both definitions in sync.
pub type RegistryStorage = LazyLock<Mutex<SingletonRegistry>>;

/// Core trait defining global registry behavior.
///
/// Provides default implementations for all registry operations, requiring only
/// the `storage` accessor to be implemented by the implementor.
pub trait RegistryApi {
    /// Access the storage static.
    ///
    /// This method must be implemented to provide access to the registry's storage.
    fn storage() -> &'static RegistryStorage;

    /// Lock the underlying registry.
    ///
    /// # Lock Poisoning Recovery
    ///
    /// If the lock is poisoned (due to a panic while holding it), this method
    /// recovers by extracting the inner value. A panic can only interrupt a
    /// world call or a trace callback, neither of which leaves an entry half
    /// written.
    fn lock(&self) -> MutexGuard<'static, SingletonRegistry> {
        Self::storage().lock().unwrap_or_else(|p| p.into_inner())
    }

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Set a tracing callback for registry operations.
    ///
    /// # Safety Restrictions
    ///
    /// The callback must NOT call any registry methods on the same registry,
    /// as this will cause a deadlock. The callback is invoked while holding
    /// the registry lock.
    fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        self.lock().set_trace_callback(callback);
    }

    /// Clear the tracing callback.
    ///
    /// Note: This does not affect registered instances, only the tracing callback.
    fn clear_trace_callback(&self) {
        self.lock().clear_trace_callback();
    }

    // -------------------------------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------------------------------

    /// Return the instance of `T`, adopting or creating it if necessary.
    ///
    /// # Errors
    ///
    /// Fails only if `world` cannot build the fallback container.
    fn get<T, W>(&self, world: &mut W) -> Result<Handle<T>, RegistryError>
    where
        T: Component + Default,
        W: World,
    {
        self.lock().get(world)
    }

    /// Like `get`, building the fallback instance with `init`.
    fn get_with<T, W, F>(&self, world: &mut W, init: F) -> Result<Handle<T>, RegistryError>
    where
        T: Component,
        W: World,
        F: FnOnce() -> T,
    {
        self.lock().get_with(world, init)
    }

    /// Enforce uniqueness for a freshly initialized component.
    fn on_candidate_created<T, W>(&self, world: &mut W, candidate: Handle<T>) -> Enforcement
    where
        T: Component,
        W: World,
    {
        self.lock().on_candidate_created(world, candidate)
    }

    /// The registered instance of `T`, if any.
    fn instance<T: Component>(&self) -> Option<Handle<T>> {
        self.lock().instance()
    }

    /// Check if an instance of `T` is registered.
    fn contains<T: Component>(&self) -> bool {
        self.lock().contains::<T>()
    }

    /// Forget all registered instances.
    ///
    /// This method is primarily intended for testing. It does NOT affect:
    /// - Already-retrieved handles (they remain valid)
    /// - Components living in worlds
    /// - The tracing callback (use `clear_trace_callback()` to clear that)
    #[doc(hidden)]
    fn clear(&self) {
        self.lock().clear();
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
