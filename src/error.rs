//! Error types for the orrery.
//!
//! Configuration loading and scene startup are the only operations that
//! can fail. Stopping a body worker is cooperative and never an error.

use thiserror::Error;

/// Errors that can occur while loading, saving or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or write the configuration file.
    #[error("failed to access configuration file: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid configuration JSON.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// The configuration parsed but describes an impossible system.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors that can occur when starting a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The operating system refused to create a body worker thread.
    #[error("failed to spawn worker for body '{name}': {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },
    /// `start` was called on a scene whose workers are already running.
    #[error("scene is already running")]
    AlreadyRunning,
    /// The configuration used to build the scene was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_message() {
        let err = ConfigError::Invalid("no bodies".into());
        assert_eq!(err.to_string(), "invalid configuration: no bodies");
    }

    #[test]
    fn test_config_error_is_transparent_in_scene_error() {
        let err = SceneError::from(ConfigError::Invalid("tick interval is zero".into()));
        assert_eq!(err.to_string(), "invalid configuration: tick interval is zero");
    }

    #[test]
    fn test_spawn_error_names_body() {
        let err = SceneError::Spawn {
            name: "Mars".into(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "out of threads"),
        };
        assert!(err.to_string().contains("'Mars'"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
