//! Prelude module for common stylemap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use stylemap::prelude::*;`

pub use crate::core::{
    config::{MapKind, SessionConfig},
    constants::{PLACEHOLDER_TOKEN, TOKEN_MARKER},
    geo::LatLng,
};

pub use crate::animation::{
    program::{build_schedule, parse_program, CameraKeyframe, CameraProgram, ParseError},
    runner::{CameraDriver, CameraProgramRunner, RunnerState},
};

pub use crate::engine::{DryRunEngine, EngineRequest, EngineSessionId, PostSetup, TileEngine};

pub use crate::runtime::{ManualScheduler, Scheduler, TimerCallback, TimerHandle};

#[cfg(feature = "tokio-runtime")]
pub use crate::runtime::TokioScheduler;

pub use crate::session::{
    bootstrap::{SessionHandle, StyleBootstrapper},
    map_session::{MapSession, MapSessionBuilder},
};

pub use crate::style::{
    DirectoryResources, InMemoryResources, StyleDescriptor, StyleDocument, StyleError,
    StyleResourceProvider, StyleSheet,
};

pub use crate::tiles::{
    cache_dir::{resolve_cache_directory, CacheRoot},
    rewrite::{build_rewrite_rule, validate_token, AuthToken, Notice, TokenError, UrlRewriteRule},
};

pub use crate::{Error as MapError, Result};

pub use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
