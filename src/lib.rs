//! # Scene Singleton
//!
//! Guarantees that at most one instance of a component type lives in a running
//! scene, creates one on demand when none exists, and keeps it alive across
//! scene transitions.
//!
//! The engine is abstracted behind the [`World`] trait; [`Scene`] is a small
//! in-memory implementation of it.
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_singleton::{Handle, Scene};
//!
//! #[derive(Default)]
//! struct GameManager {
//!     lives: u32,
//! }
//!
//! let mut scene = Scene::new();
//!
//! // No GameManager in the scene yet: one is created and marked persistent
//! let manager: Handle<GameManager> = scene_singleton::get(&mut scene).unwrap();
//! assert_eq!(manager.lives, 0);
//!
//! // Loading the next level keeps it
//! scene.transition();
//! let again: Handle<GameManager> = scene_singleton::get(&mut scene).unwrap();
//! assert!(manager.ptr_eq(&again));
//! ```
//!
//! ## Duplicates
//!
//! Worlds report every newly initialized component through
//! [`CandidateObserver::on_candidate_created`]. The first one reported becomes
//! the instance; later ones lose their component (the rest of their container
//! is left alone) and a warning is logged through `tracing`.
//!
//! ## Main Items
//!
//! - [`SingletonRegistry`] - explicit, type-keyed registry object
//! - [`InstanceRegistry`] - the per-type state machine behind it
//! - [`define_registry!`] - declare an isolated process-wide registry
//! - [`get`], [`on_candidate_created`], [`instance`], [`contains`] - the
//!   built-in process-wide registry
//! - [`set_trace_callback`] - set up tracing for registry operations

mod instance;
mod macros;
mod registry;
mod registry_error;
mod registry_event;
mod registry_trait;
mod scene;
mod world;

pub use instance::{Enforcement, InstanceRegistry, Resolution};
pub use registry::{SingletonRegistry, TraceCallback};
pub use registry_error::RegistryError;
pub use registry_event::RegistryEvent;
pub use registry_trait::{RegistryApi, RegistryStorage};
pub use scene::Scene;
pub use world::{CandidateObserver, Component, ContainerId, Handle, World, WorldError};

crate::define_registry!(global);

// Re-export the built-in registry's API
pub use global::{
    clear_trace_callback, contains, get, get_with, instance, on_candidate_created,
    set_trace_callback,
};
