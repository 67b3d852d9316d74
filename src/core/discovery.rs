// platform-switch - core/discovery.rs
//
// Recursive directory traversal and target file discovery.
//
// A file is a target when its name matches one of the target patterns AND
// its parent directory is named like the configured subdirectory (".vscode"
// by default). Only metadata is read here; file contents are owned by the
// app layer.
//
//   - Per-entry I/O errors are non-fatal and collected as warnings.
//   - max_files is clamped to a named-constant upper bound.
//   - Excluded directory names short-circuit descent via filter_entry.

use crate::util::constants;
use crate::util::error::DiscoveryError;
use std::path::{Path, PathBuf};

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for a discovery operation.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Name of the directory that must directly contain a target file.
    pub subdir_name: String,

    /// Glob patterns (filename-only) a target file must match. The defaults
    /// are literal names, so they behave as an exact-match allow-list.
    pub target_files: Vec<String>,

    /// Directory names never descended into.
    pub exclude_patterns: Vec<String>,

    /// Skip `<root>/<subdir_name>` itself, i.e. the tool's own workspace
    /// settings. Nested project directories are still searched.
    pub exclude_root_config_dir: bool,

    /// Maximum directory recursion depth.
    pub max_depth: usize,

    /// Maximum number of matching files to return.
    pub max_files: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            subdir_name: constants::DEFAULT_SUBDIR_NAME.to_string(),
            target_files: constants::DEFAULT_TARGET_FILES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            exclude_patterns: constants::DEFAULT_EXCLUDE_PATTERNS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            exclude_root_config_dir: false,
            max_depth: constants::DEFAULT_MAX_DEPTH,
            max_files: constants::DEFAULT_MAX_FILES,
        }
    }
}

// =============================================================================
// Discovery
// =============================================================================

/// Discover target configuration files under `root`.
///
/// Returns the matching paths sorted lexicographically, plus non-fatal
/// warnings (inaccessible entries, truncation). Zero matches is not an
/// error.
///
/// # Fatal errors
/// Returns `Err` only if the root path is invalid (`RootNotFound`,
/// `NotADirectory`, `PermissionDenied`).
pub fn discover_files(
    root: &Path,
    config: &DiscoveryConfig,
) -> Result<(Vec<PathBuf>, Vec<String>), DiscoveryError> {
    // fs::metadata rather than Path::is_dir so that permission problems are
    // not reported as a missing path.
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(DiscoveryError::NotADirectory {
                path: root.to_path_buf(),
            })
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(DiscoveryError::PermissionDenied {
                path: root.to_path_buf(),
                source: e,
            })
        }
        Err(_) => {
            return Err(DiscoveryError::RootNotFound {
                path: root.to_path_buf(),
            })
        }
    }

    let max_files = config.max_files.min(constants::ABSOLUTE_MAX_FILES);
    let max_depth = config.max_depth.min(constants::ABSOLUTE_MAX_DEPTH);

    tracing::debug!(
        root = %root.display(),
        subdir = %config.subdir_name,
        max_depth,
        max_files,
        targets = ?config.target_files,
        exclude = ?config.exclude_patterns,
        "Discovery starting"
    );

    let target_pats = compile_patterns(&config.target_files, "target");
    let exclude_pats = compile_patterns(&config.exclude_patterns, "exclude");

    let mut files: Vec<PathBuf> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    let walker = walkdir::WalkDir::new(root)
        .max_depth(max_depth)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            if !e.file_type().is_dir() || e.depth() == 0 {
                return true;
            }
            let name = e.file_name().to_str().unwrap_or("");
            if config.exclude_root_config_dir && e.depth() == 1 && name == config.subdir_name {
                tracing::debug!(dir = %e.path().display(), "Skipping root config directory");
                return false;
            }
            !is_excluded_component(name, &exclude_pats)
        });

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                let path_str = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<unknown>".to_string());
                let msg = format!("Cannot access '{path_str}': {e}");
                tracing::debug!(warning = %msg, "Discovery warning");
                warnings.push(msg);
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();

        let in_subdir = path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .is_some_and(|n| n == config.subdir_name);
        if !in_subdir {
            continue;
        }

        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n,
            None => {
                warnings.push(format!("Skipping '{}': non-UTF-8 filename", path.display()));
                continue;
            }
        };

        if !target_pats.iter().any(|p| p.matches(file_name)) {
            tracing::trace!(file = file_name, "Not a target file");
            continue;
        }

        tracing::trace!(file = %path.display(), "Target file found");
        files.push(path.to_path_buf());
    }

    files.sort();

    let total_found = files.len();
    if total_found > max_files {
        files.truncate(max_files);
        warnings.push(format!(
            "{total_found} configuration files were found but the limit is {max_files}. \
             Only the first {max_files} (by path) will be processed. \
             Raise [discovery] max_files in config.toml if you need more."
        ));
        tracing::info!(total_found, limit = max_files, "File list truncated");
    }

    tracing::debug!(
        total_found,
        files = files.len(),
        warnings = warnings.len(),
        "Discovery complete"
    );

    Ok((files, warnings))
}

// =============================================================================
// Glob helpers
// =============================================================================

/// Compile a list of glob pattern strings into `glob::Pattern` objects.
/// Patterns that fail to compile are logged as warnings and skipped.
fn compile_patterns(patterns: &[String], kind: &str) -> Vec<glob::Pattern> {
    patterns
        .iter()
        .filter_map(|p| match glob::Pattern::new(p) {
            Ok(compiled) => Some(compiled),
            Err(e) => {
                tracing::warn!(pattern = p, kind, error = %e, "Invalid glob pattern, skipping");
                None
            }
        })
        .collect()
}

/// Returns true if `dir_name` matches any exclude pattern.
fn is_excluded_component(dir_name: &str, exclude_pats: &[glob::Pattern]) -> bool {
    exclude_pats.iter().any(|p| p.matches(dir_name))
}

// =============================================================================
// Tests
// =============================================================================
