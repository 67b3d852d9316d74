// platform-switch - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "platform-switch";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "platform-switch";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Discovery
// =============================================================================

/// Name of the directory that holds the switchable configuration files.
pub const DEFAULT_SUBDIR_NAME: &str = ".vscode";

/// File names (exact match) eligible for rewriting.
pub const DEFAULT_TARGET_FILES: &[&str] = &["settings.json", "c_cpp_properties.json", "launch.json"];

/// Directory names never descended into.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[".git", "target", "node_modules"];

/// Maximum directory recursion depth during discovery.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Hard upper bound on max depth (prevents runaway traversal).
pub const ABSOLUTE_MAX_DEPTH: usize = 64;

/// Maximum number of matching files processed in a single run.
pub const DEFAULT_MAX_FILES: usize = 1_000;

/// Minimum sensible value for the max-files limit.
pub const MIN_MAX_FILES: usize = 1;

/// Hard upper bound on max files.
pub const ABSOLUTE_MAX_FILES: usize = 100_000;

// =============================================================================
// Markers and comments
// =============================================================================

/// Literal that opens a switchable region.
pub const DEFAULT_START_MARKER: &str = "PLATFORM_SWITCH_START";

/// Literal that closes a switchable region.
pub const DEFAULT_END_MARKER: &str = "PLATFORM_SWITCH_END";

/// Generic token shared by both markers. Lines carrying it are always
/// kept active by the label-match outside-region policy.
pub const GENERIC_MARKER_TOKEN: &str = "PLATFORM_SWITCH";

/// Line comment token used by JSON-with-comments files.
pub const DEFAULT_COMMENT_TOKEN: &str = "//";

/// Maximum length of a marker or comment token from config.
pub const MAX_TOKEN_LENGTH: usize = 64;

/// Maximum number of structural warnings recorded per file.
pub const MAX_WARNINGS_PER_FILE: usize = 100;

// =============================================================================
// Logging
// =============================================================================

/// Default log level. Progress lines go to stdout regardless.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
