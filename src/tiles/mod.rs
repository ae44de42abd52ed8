pub mod cache_dir;
pub mod rewrite;

// Re-exports for convenience
pub use cache_dir::{resolve_cache_directory, CacheRoot};
pub use rewrite::{build_rewrite_rule, validate_token, AuthToken, UrlRewriteRule};
