//! # stylemap
//!
//! Bootstraps a style-driven tiled map session.
//!
//! A style descriptor and a handful of runtime parameters (auth token,
//! style index, optional camera program) are turned into a running session
//! on an external tile/style engine. The crate owns the policy around that
//! launch: token validation, URL rewriting, cache directory selection and a
//! scripted camera zoom sequence. Fetching, decoding and rendering belong to
//! the engine behind [`engine::TileEngine`].

pub mod animation;
pub mod core;
pub mod engine;
pub mod prelude;
pub mod runtime;
pub mod session;
pub mod style;
pub mod tiles;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{MapKind, SessionConfig},
    geo::LatLng,
};

pub use animation::{
    program::{build_schedule, parse_program, CameraKeyframe, CameraProgram},
    runner::{CameraDriver, CameraProgramRunner, RunnerState},
};

pub use engine::{DryRunEngine, EngineRequest, TileEngine};

pub use session::{
    bootstrap::{SessionHandle, StyleBootstrapper},
    map_session::MapSession,
};

pub use style::{StyleDescriptor, StyleDocument, StyleSheet};

pub use tiles::{
    cache_dir::{resolve_cache_directory, CacheRoot},
    rewrite::{validate_token, AuthToken, UrlRewriteRule},
};

pub use crate::core::config::ConfigError;
pub use animation::program::ParseError;
pub use style::StyleError;
pub use tiles::rewrite::{Notice, TokenError};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Style(#[from] StyleError),

    #[error(transparent)]
    Program(#[from] ParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Engine error: {0}")]
    Engine(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Install `env_logger` as the `log` backend. Safe to call more than once.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_convert_into_map_error() {
        let err: MapError = TokenError::Missing.into();
        assert!(matches!(err, MapError::Token(TokenError::Missing)));
        assert_eq!(err.to_string(), TokenError::Missing.to_string());

        let err: MapError = StyleError::IndexOutOfRange { index: 7, len: 3 }.into();
        assert!(matches!(err, MapError::Style(StyleError::IndexOutOfRange { index: 7, .. })));

        let err: MapError = parse_program("1,2").unwrap_err().into();
        assert!(matches!(err, MapError::Program(ParseError::FieldCount { found: 2, .. })));

        let err: MapError = SessionConfig::from_json("{").unwrap_err().into();
        assert!(matches!(err, MapError::Config(ConfigError::Json(_))));
    }
}
