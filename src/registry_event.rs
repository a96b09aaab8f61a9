use crate::ContainerId;

/// Events emitted by the registry during operations.
///
/// These events are passed to the tracing callback set via `set_trace_callback`.
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use scene_singleton::{ContainerId, RegistryEvent};
///
/// let event = RegistryEvent::Create {
///     type_name: "game::AudioManager",
///     container: ContainerId::new(1),
/// };
/// assert_eq!(event.to_string(), "create { type_name: game::AudioManager, container: #1 }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// An instance was requested from the registry.
    Get {
        type_name: &'static str,
        /// Whether an instance was already registered before the call.
        found: bool,
    },

    /// An existing component was accepted as the instance.
    Adopt {
        type_name: &'static str,
        container: ContainerId,
    },

    /// No component existed, so a new container was built for the instance.
    Create {
        type_name: &'static str,
        container: ContainerId,
    },

    /// A duplicate candidate was rejected and its component disposed of.
    Reject {
        type_name: &'static str,
        container: ContainerId,
    },

    /// A registration check was performed.
    Contains { type_name: &'static str, found: bool },

    /// The registry was cleared.
    Clear {},
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Get { type_name, found } => {
                write!(f, "get {{ type_name: {}, found: {} }}", type_name, found)
            }
            RegistryEvent::Adopt {
                type_name,
                container,
            } => write!(
                f,
                "adopt {{ type_name: {}, container: {} }}",
                type_name, container
            ),
            RegistryEvent::Create {
                type_name,
                container,
            } => write!(
                f,
                "create {{ type_name: {}, container: {} }}",
                type_name, container
            ),
            RegistryEvent::Reject {
                type_name,
                container,
            } => write!(
                f,
                "reject {{ type_name: {}, container: {} }}",
                type_name, container
            ),
            RegistryEvent::Contains { type_name, found } => {
                write!(
                    f,
                    "contains {{ type_name: {}, found: {} }}",
                    type_name, found
                )
            }
            RegistryEvent::Clear {} => write!(f, "Clearing the Registry"),
        }
    }
}
