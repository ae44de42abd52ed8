//! Constants shared by the bootstrap pipeline

/// Environment key holding the tile service token
pub const TOKEN_ENV_VAR: &str = "MAPTILER_TOKEN";
/// Environment key holding the style catalog index
pub const STYLE_ENV_VAR: &str = "MAPTILER_STYLE";
/// Environment key holding the camera program
pub const PROGRAM_ENV_VAR: &str = "MAPTILER_PROGRAM";

/// Token value shipped in sample configuration. Never valid.
pub const PLACEHOLDER_TOKEN: &str = "GetYerOwnToken";

/// Marker inside style URLs that stands in for the real token
pub const TOKEN_MARKER: &str = "MapTilerKey";

/// Query parameter used when a URL carries no marker
pub const TOKEN_QUERY_KEY: &str = "key";

/// Style selected when configuration names none
pub const DEFAULT_STYLE_INDEX: usize = 0;

/// Extension of style documents in a resource directory
pub const STYLE_EXTENSION: &str = "json";

/// Number of comma separated fields in a camera program
pub const PROGRAM_FIELD_COUNT: usize = 6;

/// Directory under the platform cache root that holds session caches
pub const CACHE_NAMESPACE: &str = "stylemap";
