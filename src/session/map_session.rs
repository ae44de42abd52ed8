//! One bootstrapped map or globe, from configuration to teardown
//!
//! ```text
//! SessionConfig ──► StyleBootstrapper ──► TileEngine::start
//!                                             │
//!                                             └─► post-setup (legend)
//!              └──► CameraProgramRunner (flat maps only, optional)
//! ```
//!
//! Token and style problems abort the launch. A bad camera program only skips
//! the animation.

use super::bootstrap::{SessionHandle, StyleBootstrapper};
use crate::animation::{parse_program, CameraDriver, CameraProgramRunner, RunnerState};
use crate::core::config::{MapKind, SessionConfig};
use crate::core::constants::DEFAULT_STYLE_INDEX;
use crate::engine::PostSetup;
use crate::prelude::Arc;
use crate::runtime::Scheduler;
use crate::style::{StyleDescriptor, StyleSheet};
use crate::Result;
use std::path::Path;

pub struct MapSessionBuilder {
    name: String,
    kind: MapKind,
    bootstrapper: StyleBootstrapper,
    post_setup: Option<PostSetup>,
    camera: Option<(Arc<dyn Scheduler>, Arc<dyn CameraDriver>)>,
}

impl MapSessionBuilder {
    pub fn kind(mut self, kind: MapKind) -> Self {
        self.kind = kind;
        self
    }

    /// Receives the parsed style sheet once the engine is set up
    pub fn on_ready<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&StyleSheet) + Send + 'static,
    {
        self.post_setup = Some(Box::new(callback));
        self
    }

    /// Camera used to play the configured program, if any
    pub fn camera(mut self, scheduler: Arc<dyn Scheduler>, driver: Arc<dyn CameraDriver>) -> Self {
        self.camera = Some((scheduler, driver));
        self
    }

    pub fn launch(self, config: &SessionConfig) -> Result<MapSession> {
        let Self {
            name,
            kind,
            bootstrapper,
            post_setup,
            camera,
        } = self;

        // Globes always show the default style.
        let style_index = match kind {
            MapKind::Map => config.style_index,
            MapKind::Globe => DEFAULT_STYLE_INDEX,
        };
        let descriptor = StyleDescriptor::by_index(style_index)?;
        let token = bootstrapper.validate_token(config.token()).map_err(|e| {
            let notice = e.notice();
            log::warn!("{}: {}", notice.title, notice.message);
            e
        })?;
        let rewrite = bootstrapper.build_rewrite_rule(&token);
        let cache_dir = bootstrapper.resolve_cache_directory(&name);

        let handle = bootstrapper.start(
            descriptor,
            cache_dir,
            rewrite,
            kind.render_all_polygons(),
            post_setup.unwrap_or_else(|| Box::new(|_| {})),
        )?;

        let mut session = MapSession {
            name,
            kind,
            bootstrapper,
            handle: Some(handle),
            runner: None,
        };

        if let Some((scheduler, driver)) = camera {
            session.start_camera_program(config, scheduler.as_ref(), driver);
        }
        Ok(session)
    }
}

pub struct MapSession {
    name: String,
    kind: MapKind,
    bootstrapper: StyleBootstrapper,
    handle: Option<SessionHandle>,
    runner: Option<CameraProgramRunner>,
}

impl MapSession {
    pub fn builder(name: impl Into<String>, bootstrapper: StyleBootstrapper) -> MapSessionBuilder {
        MapSessionBuilder {
            name: name.into(),
            kind: MapKind::default(),
            bootstrapper,
            post_setup: None,
            camera: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MapKind {
        self.kind
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle(&self) -> Option<&SessionHandle> {
        self.handle.as_ref()
    }

    pub fn cache_dir(&self) -> Option<&Path> {
        self.handle.as_ref().map(SessionHandle::cache_dir)
    }

    /// State of the camera program, `None` when no program was started
    pub fn camera_state(&self) -> Option<RunnerState> {
        self.runner.as_ref().map(CameraProgramRunner::state)
    }

    fn start_camera_program(
        &mut self,
        config: &SessionConfig,
        scheduler: &dyn Scheduler,
        driver: Arc<dyn CameraDriver>,
    ) {
        let Some(raw) = config.camera_program.as_deref() else {
            return;
        };
        if !self.kind.runs_camera_program() {
            log::debug!("camera programs are not played on {:?} sessions", self.kind);
            return;
        }

        let program = match parse_program(raw) {
            Ok(program) => program,
            Err(e) => {
                log::warn!("skipping camera program: {}", e);
                return;
            }
        };

        let runner = CameraProgramRunner::new();
        if runner.load(program) && runner.run(scheduler, driver) {
            self.runner = Some(runner);
        }
    }

    /// Cancel pending keyframes and release the engine session. Idempotent.
    pub fn stop(&mut self) {
        if let Some(runner) = self.runner.as_ref() {
            runner.stop();
        }
        self.bootstrapper.stop(&mut self.handle);
    }
}

impl Drop for MapSession {
    fn drop(&mut self) {
        self.stop();
    }
}
