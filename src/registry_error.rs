use thiserror::Error;

use crate::WorldError;

/// Failures surfaced by registry operations.
///
/// Missing instances and duplicate candidates are not errors; they are
/// resolved by policy and only logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The world could not build the fallback instance.
    #[error("failed to construct an instance of {type_name}")]
    Construction {
        type_name: &'static str,
        #[source]
        source: WorldError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContainerId;

    #[test]
    fn test_construction_display() {
        let err = RegistryError::Construction {
            type_name: "AudioManager",
            source: WorldError::Refused("out of slots".into()),
        };
        assert_eq!(
            err.to_string(),
            "failed to construct an instance of AudioManager"
        );
    }

    #[test]
    fn test_construction_source() {
        use std::error::Error;

        let err = RegistryError::Construction {
            type_name: "AudioManager",
            source: WorldError::UnknownContainer(ContainerId::new(4)),
        };
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("container #4 does not exist"));
    }

    #[test]
    fn test_equality() {
        let err = RegistryError::Construction {
            type_name: "u8",
            source: WorldError::Refused("full".into()),
        };
        assert_eq!(err.clone(), err);
        assert_ne!(
            err,
            RegistryError::Construction {
                type_name: "u16",
                source: WorldError::Refused("full".into()),
            }
        );
    }
}
