use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use stylemap::{
    runtime::TokioScheduler, style::DirectoryResources, CameraDriver, DryRunEngine, LatLng,
    MapError, MapSession, RunnerState, SessionConfig, StyleBootstrapper,
};

/// Camera that only reports what it would do
struct LogDriver;

impl CameraDriver for LogDriver {
    fn set_position(&self, center: LatLng, height: f64) {
        log::info!("camera at {:.4},{:.4} height {}", center.lat, center.lng, height);
    }

    fn animate_to(&self, _center: LatLng, height: f64, duration: Duration) {
        log::info!("camera -> height {} over {:?}", height, duration);
    }
}

/// Bootstrap a dry-run session from `MAPTILER_*` environment variables.
///
/// Usage: `stylemap-app [STYLE_DIR]` (defaults to `./styles`)
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stylemap::init_logging();

    let style_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("styles"));
    let config = SessionConfig::from_env();

    let engine = Arc::new(DryRunEngine::new());
    let resources = Arc::new(DirectoryResources::new(&style_dir));
    let bootstrapper = StyleBootstrapper::new(engine, resources);
    let scheduler = TokioScheduler::try_current().context("no tokio runtime")?;

    let launched = MapSession::builder("stylemap-app", bootstrapper)
        .on_ready(|sheet| {
            let layers: Vec<_> = sheet.layer_ids().collect();
            log::info!("legend: {} layers: {}", layers.len(), layers.join(", "));
        })
        .camera(Arc::new(scheduler), Arc::new(LogDriver))
        .launch(&config);

    let mut session = match launched {
        Ok(session) => session,
        Err(MapError::Token(e)) => {
            let notice = e.notice();
            eprintln!("{}\n{}", notice.title, notice.message);
            std::process::exit(2);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("starting session from {}", style_dir.display()))
        }
    };

    if let Some(dir) = session.cache_dir() {
        log::info!("cache directory {}", dir.display());
    }

    // Wait for the camera program, or Ctrl-C.
    loop {
        if session.camera_state() != Some(RunnerState::Running) {
            break;
        }
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                log::info!("interrupted");
                break;
            }
            _ = tokio::time::sleep(Duration::from_millis(250)) => {}
        }
    }

    session.stop();
    Ok(())
}
