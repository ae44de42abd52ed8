use crate::core::constants::CACHE_NAMESPACE;
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};

/// Per-user cache directory of the current platform, looked up once.
static PLATFORM_CACHE_ROOT: Lazy<PathBuf> = Lazy::new(|| {
    platform_cache_dir(|key| std::env::var_os(key).map(PathBuf::from))
        .unwrap_or_else(std::env::temp_dir)
});

fn platform_cache_dir<F>(var: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<PathBuf>,
{
    if cfg!(target_os = "macos") || cfg!(target_os = "ios") {
        var("HOME").map(|home| home.join("Library").join("Caches"))
    } else if cfg!(windows) {
        var("LOCALAPPDATA")
    } else {
        var("XDG_CACHE_HOME")
            .filter(|p| p.is_absolute())
            .or_else(|| var("HOME").map(|home| home.join(".cache")))
    }
}

/// Directory under which every session gets its own tile cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRoot {
    path: PathBuf,
}

impl CacheRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The platform's per-user cache directory, falling back to the temp dir.
    pub fn platform() -> Self {
        Self::new(PLATFORM_CACHE_ROOT.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for CacheRoot {
    fn default() -> Self {
        Self::platform()
    }
}

/// Map a session name to its cache directory under `root`.
///
/// The last path component is a readable slug of the name followed by a hash
/// of the exact name, so names that slug identically still get distinct
/// directories. The mapping is stable across runs.
pub fn resolve_cache_directory(root: &CacheRoot, session_name: &str) -> PathBuf {
    let dir = format!("{}-{:016x}", slugify(session_name), fxhash::hash64(session_name));
    root.path().join(CACHE_NAMESPACE).join(dir)
}

fn slugify(name: &str) -> String {
    const MAX_SLUG_LEN: usize = 48;

    let mut slug = String::with_capacity(name.len().min(MAX_SLUG_LEN));
    for c in name.chars() {
        if slug.len() >= MAX_SLUG_LEN {
            break;
        }
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    let trimmed = slug.trim_end_matches('-');

    if trimmed.is_empty() {
        "session".to_string()
    } else {
        trimmed.to_string()
    }
}
