//! Macros for creating process-wide singleton registries.
//!
//! This module provides a simple macro-based approach to create isolated,
//! thread-safe registries stored in statics.

/// Creates a complete global singleton registry with a single macro invocation.
///
/// The macro generates a module containing:
/// - Storage static (hidden)
/// - An `Api` struct that implements `RegistryApi`
/// - Free functions delegating to it
///
/// # Examples
///
/// ```rust
/// use scene_singleton::{define_registry, Handle, Scene};
///
/// #[derive(Default)]
/// struct AudioManager {
///     volume: u8,
/// }
///
/// define_registry!(managers);
///
/// let mut scene = Scene::new();
///
/// // First access creates the instance, later ones return it
/// let audio: Handle<AudioManager> = managers::get(&mut scene).unwrap();
/// let again: Handle<AudioManager> = managers::get(&mut scene).unwrap();
///
/// assert!(audio.ptr_eq(&again));
/// assert_eq!(audio.volume, 0);
/// ```
///
/// # Multiple Registries
///
/// Each invocation creates an isolated registry:
///
/// ```rust
/// use scene_singleton::{define_registry, Scene};
///
/// #[derive(Default)]
/// struct Score(u32);
///
/// define_registry!(menu);
/// define_registry!(level);
///
/// let mut scene = Scene::new();
/// menu::get::<Score, _>(&mut scene).unwrap();
///
/// assert!(menu::contains::<Score>());
/// assert!(!level::contains::<Score>());
/// ```
///
/// # Trait-Based Usage
///
/// The `API` constant gives access through the `RegistryApi` trait:
///
/// ```rust
/// use scene_singleton::{define_registry, Handle, RegistryApi, Scene};
///
/// define_registry!(app);
///
/// let mut scene = Scene::new();
/// let value: Handle<u64> = app::API.get(&mut scene).unwrap();
/// assert_eq!(*value, 0);
/// ```
#[macro_export]
macro_rules! define_registry {
    ($name:ident) => {
        pub mod $name {
            use std::sync::{LazyLock, Mutex, MutexGuard};

            // Storage for the registry (module-private)
            static STORAGE: LazyLock<Mutex<$crate::SingletonRegistry>> =
                LazyLock::new(|| Mutex::new($crate::SingletonRegistry::new()));

            /// Zero-sized type that implements the registry API.
            ///
            /// All registry operations are provided by the `RegistryApi` trait's
            /// default implementations. This struct only provides access to the static.
            pub struct Api;

            impl $crate::RegistryApi for Api {
                fn storage() -> &'static LazyLock<Mutex<$crate::SingletonRegistry>> {
                    &STORAGE
                }
            }

            /// Convenient constant for accessing the registry API.
            pub const API: Api = Api;

            // Free functions for ergonomic usage - they delegate to API

            /// Return the instance of `T`, adopting or creating it if necessary.
            pub fn get<T, W>(world: &mut W) -> Result<$crate::Handle<T>, $crate::RegistryError>
            where
                T: $crate::Component + Default,
                W: $crate::World,
            {
                use $crate::RegistryApi;
                API.get(world)
            }

            /// Like `get`, building the fallback instance with `init`.
            pub fn get_with<T, W, F>(
                world: &mut W,
                init: F,
            ) -> Result<$crate::Handle<T>, $crate::RegistryError>
            where
                T: $crate::Component,
                W: $crate::World,
                F: FnOnce() -> T,
            {
                use $crate::RegistryApi;
                API.get_with(world, init)
            }

            /// Enforce uniqueness for a freshly initialized component.
            pub fn on_candidate_created<T, W>(
                world: &mut W,
                candidate: $crate::Handle<T>,
            ) -> $crate::Enforcement
            where
                T: $crate::Component,
                W: $crate::World,
            {
                use $crate::RegistryApi;
                API.on_candidate_created(world, candidate)
            }

            /// The registered instance of `T`, if any.
            pub fn instance<T: $crate::Component>() -> Option<$crate::Handle<T>> {
                use $crate::RegistryApi;
                API.instance()
            }

            /// Check if an instance of `T` is registered.
            pub fn contains<T: $crate::Component>() -> bool {
                use $crate::RegistryApi;
                API.contains::<T>()
            }

            /// Lock the registry, e.g. to pass it as an observer to a world.
            ///
            /// Do not call any other function of this registry while holding the guard.
            pub fn lock() -> MutexGuard<'static, $crate::SingletonRegistry> {
                use $crate::RegistryApi;
                API.lock()
            }

            /// Set a tracing callback for registry operations.
            pub fn set_trace_callback(
                callback: impl Fn(&$crate::RegistryEvent) + Send + Sync + 'static,
            ) {
                use $crate::RegistryApi;
                API.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                use $crate::RegistryApi;
                API.clear_trace_callback()
            }

            /// Forget all registered instances.
            #[doc(hidden)]
            pub fn clear() {
                use $crate::RegistryApi;
                API.clear()
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Handle, Scene};
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Default)]
    struct Music {
        track: u8,
    }

    #[test]
    fn test_define_registry_macro() {
        define_registry!(test_reg);
        let mut scene = Scene::new();

        assert!(!test_reg::contains::<Music>());

        let music: Handle<Music> = test_reg::get(&mut scene).unwrap();
        assert_eq!(music.track, 0);

        assert!(test_reg::contains::<Music>());
        assert!(!test_reg::contains::<u8>());
    }

    #[test]
    fn test_multiple_registries() {
        define_registry!(reg_a);
        define_registry!(reg_b);
        let mut scene = Scene::new();

        let a = reg_a::get_with(&mut scene, || Music { track: 1 }).unwrap();
        let b = reg_b::get_with(&mut scene, || Music { track: 2 }).unwrap();

        // reg_b adopts the component reg_a created, since both see the same scene
        assert!(a.ptr_eq(&b));
        assert_eq!(b.track, 1);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_tracing() {
        define_registry!(trace_test);

        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();

        trace_test::set_trace_callback(move |event| {
            events_clone.lock().unwrap().push(format!("{}", event));
        });

        let mut scene = Scene::new();
        let _: Handle<Music> = trace_test::get(&mut scene).unwrap();
        let _ = trace_test::contains::<Music>();

        let recorded = events.lock().unwrap();
        assert_eq!(recorded.len(), 3);
        assert!(recorded[0].contains("get"));
        assert!(recorded[1].contains("create"));
        assert!(recorded[2].contains("contains"));
    }
}
