//! Seam to the external tile/style engine
//!
//! The engine fetches, caches, parses and renders. This crate only hands it a
//! fully resolved [`EngineRequest`] and gets a session id back.

use crate::prelude::{HashMap, Mutex};
use crate::style::{StyleDocument, StyleError, StyleSheet};
use crate::tiles::rewrite::UrlRewriteRule;
use crate::{MapError, Result};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

pub type EngineSessionId = u64;

/// Called once the engine has parsed the style sheet and set up its layers
pub type PostSetup = Box<dyn FnOnce(&StyleSheet) + Send + 'static>;

/// Everything the engine needs to start a session
#[derive(Debug, Clone)]
pub struct EngineRequest {
    pub style: StyleDocument,
    pub cache_dir: PathBuf,
    pub rewrite: UrlRewriteRule,
    /// Rasterize every polygon layer into an image (globes)
    pub render_all_polygons: bool,
}

impl EngineRequest {
    /// Remote endpoints of the style sheet with the token applied.
    pub fn resolved_source_urls(&self) -> std::result::Result<Vec<String>, StyleError> {
        let sheet = self.style.parse()?;
        Ok(sheet
            .source_urls()
            .into_iter()
            .map(|url| self.rewrite.rewrite_str(url))
            .collect())
    }
}

pub trait TileEngine: Send + Sync {
    /// Start loading the style. `post_setup` runs once the sheet is parsed.
    fn start(&self, request: EngineRequest, post_setup: PostSetup) -> Result<EngineSessionId>;

    /// Tear the session down. Unknown ids are ignored.
    fn stop(&self, session: EngineSessionId);
}

/// Engine that validates and resolves a request without fetching anything.
///
/// Useful for checking a style/token/cache setup end to end, and as the engine
/// behind the headless launcher.
#[derive(Default)]
pub struct DryRunEngine {
    next_id: AtomicU64,
    sessions: Mutex<HashMap<EngineSessionId, EngineRequest>>,
}

impl DryRunEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn request(&self, session: EngineSessionId) -> Option<EngineRequest> {
        self.sessions.lock().ok()?.get(&session).cloned()
    }
}

impl TileEngine for DryRunEngine {
    fn start(&self, request: EngineRequest, post_setup: PostSetup) -> Result<EngineSessionId> {
        let sheet = request.style.parse()?;
        let urls = request.resolved_source_urls()?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        log::info!(
            "dry-run session {} for {:?}: {} layers, {} endpoints, cache {}",
            id,
            request.style.sheet_id,
            sheet.layers.len(),
            urls.len(),
            request.cache_dir.display()
        );
        // Rewritten URLs carry the token, log the originals.
        for url in sheet.source_urls() {
            log::debug!("  endpoint {}", url);
        }

        self.sessions
            .lock()
            .map_err(|_| MapError::Engine("session table poisoned".to_string()))?
            .insert(id, request);

        post_setup(&sheet);
        Ok(id)
    }

    fn stop(&self, session: EngineSessionId) {
        if let Ok(mut sessions) = self.sessions.lock() {
            if sessions.remove(&session).is_some() {
                log::info!("dry-run session {} stopped", session);
            }
        }
    }
}
