use crate::engine::{EngineRequest, EngineSessionId, PostSetup, TileEngine};
use crate::prelude::Arc;
use crate::style::{StyleDescriptor, StyleError, StyleResourceProvider};
use crate::tiles::cache_dir::{self, CacheRoot};
use crate::tiles::rewrite::{self, AuthToken, TokenError, UrlRewriteRule};
use crate::Result;
use std::path::{Path, PathBuf};

/// A running engine session. Give it back to [`StyleBootstrapper::stop`].
#[derive(Debug)]
pub struct SessionHandle {
    id: EngineSessionId,
    style: StyleDescriptor,
    cache_dir: PathBuf,
}

impl SessionHandle {
    pub fn id(&self) -> EngineSessionId {
        self.id
    }

    pub fn style(&self) -> &StyleDescriptor {
        &self.style
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }
}

/// Turns a style descriptor and a token into an engine session.
///
/// Owns the launch policy only: token validation, URL rewriting, cache
/// placement and the polygon pre-render flag. Fetching and caching happen in
/// the [`TileEngine`].
pub struct StyleBootstrapper {
    engine: Arc<dyn TileEngine>,
    resources: Arc<dyn StyleResourceProvider>,
    cache_root: CacheRoot,
}

impl StyleBootstrapper {
    pub fn new(engine: Arc<dyn TileEngine>, resources: Arc<dyn StyleResourceProvider>) -> Self {
        Self {
            engine,
            resources,
            cache_root: CacheRoot::platform(),
        }
    }

    pub fn with_cache_root(mut self, cache_root: CacheRoot) -> Self {
        self.cache_root = cache_root;
        self
    }

    pub fn cache_root(&self) -> &CacheRoot {
        &self.cache_root
    }

    pub fn validate_token(&self, token: &str) -> std::result::Result<AuthToken, TokenError> {
        rewrite::validate_token(token)
    }

    pub fn build_rewrite_rule(&self, token: &AuthToken) -> UrlRewriteRule {
        rewrite::build_rewrite_rule(token)
    }

    pub fn resolve_cache_directory(&self, session_name: &str) -> PathBuf {
        cache_dir::resolve_cache_directory(&self.cache_root, session_name)
    }

    /// Locate the style sheet and start an engine session for it.
    ///
    /// Nothing reaches the engine when the sheet cannot be found.
    pub fn start(
        &self,
        descriptor: &StyleDescriptor,
        cache_dir: PathBuf,
        rewrite: UrlRewriteRule,
        render_all_polygons: bool,
        post_setup: PostSetup,
    ) -> Result<SessionHandle> {
        let Some(style) = self.resources.locate(&descriptor.sheet_id) else {
            log::warn!("style sheet missing: {}", descriptor.sheet_id);
            return Err(StyleError::ResourceMissing {
                sheet_id: descriptor.sheet_id.clone(),
            }
            .into());
        };

        let request = EngineRequest {
            style,
            cache_dir: cache_dir.clone(),
            rewrite,
            render_all_polygons,
        };
        let id = self.engine.start(request, post_setup)?;
        log::info!(
            "started {:?} session {} (all polygons: {})",
            descriptor.name,
            id,
            render_all_polygons
        );

        Ok(SessionHandle {
            id,
            style: descriptor.clone(),
            cache_dir,
        })
    }

    /// Release the session in `handle`, leaving `None` behind.
    pub fn stop(&self, handle: &mut Option<SessionHandle>) {
        if let Some(handle) = handle.take() {
            self.engine.stop(handle.id);
            log::info!("stopped {:?} session {}", handle.style.name, handle.id);
        }
    }
}
