// platform-switch - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::util::constants;
use crate::util::error::PlatformError;
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;

// =============================================================================
// Platform
// =============================================================================

/// The closed set of platforms a switchable region can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Platform {
    Windows,
    MacOS,
    Linux,
}

impl Platform {
    /// Returns all variants in display order.
    pub fn all() -> &'static [Platform] {
        &[Platform::Windows, Platform::MacOS, Platform::Linux]
    }

    /// Canonical label as written in `<Label> Configuration` headers.
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::MacOS => "MacOS",
            Platform::Linux => "Linux",
        }
    }

    /// Parse a section or CLI label, case-insensitively, including common
    /// aliases (`mac`, `osx`, `darwin`, `win32`, ...).
    pub fn from_label(label: &str) -> Option<Platform> {
        match label.trim().to_ascii_lowercase().as_str() {
            "windows" | "win" | "win32" | "win64" => Some(Platform::Windows),
            "macos" | "mac" | "osx" | "darwin" => Some(Platform::MacOS),
            "linux" => Some(Platform::Linux),
            _ => None,
        }
    }

    /// Map a host OS identifier (as in `std::env::consts::OS`) to a platform.
    pub fn from_os_id(os: &str) -> Option<Platform> {
        match os {
            "windows" => Some(Platform::Windows),
            "macos" => Some(Platform::MacOS),
            "linux" => Some(Platform::Linux),
            _ => None,
        }
    }

    /// True when a section header label names this platform.
    pub fn matches_label(&self, label: &str) -> bool {
        Platform::from_label(label) == Some(*self)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Platform {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::from_label(s).ok_or_else(|| PlatformError::UnknownLabel {
            label: s.to_string(),
        })
    }
}

// =============================================================================
// Switch syntax
// =============================================================================

/// The in-file protocol: marker literals and the line comment token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchSyntax {
    /// Literal that opens a switchable region when found anywhere in a line.
    pub start_marker: String,

    /// Literal that closes a switchable region.
    pub end_marker: String,

    /// Line comment token toggled on body lines.
    pub comment_token: String,
}

impl Default for SwitchSyntax {
    fn default() -> Self {
        Self {
            start_marker: constants::DEFAULT_START_MARKER.to_string(),
            end_marker: constants::DEFAULT_END_MARKER.to_string(),
            comment_token: constants::DEFAULT_COMMENT_TOKEN.to_string(),
        }
    }
}

// =============================================================================
// Line classification
// =============================================================================

/// Classification tag assigned to each line by the classifier.
///
/// Tags are context-free: whether a header or body line sits inside a
/// switchable region is decided by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    MarkerStart,
    MarkerEnd,
    /// `<Label> Configuration` header; `label` is the captured word.
    SectionHeader {
        label: &'a str,
    },
    Body,
}

/// A single source line with its terminator split off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number.
    pub number: usize,

    /// Line content without the terminator.
    pub text: &'a str,

    /// `"\n"`, `"\r\n"`, or `""` for a final unterminated line.
    pub terminator: &'a str,

    pub kind: LineKind<'a>,
}

// =============================================================================
// Rewrite policy and results
// =============================================================================

/// How lines outside any switchable region are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutsideRegionPolicy {
    /// Copy verbatim.
    #[default]
    Preserve,
    /// Strip the comment token from every non-blank line.
    Uncomment,
    /// Uncomment lines naming the active platform or the generic marker
    /// token; comment everything else.
    LabelMatch,
}

impl OutsideRegionPolicy {
    /// Parse the `[rewrite] outside_region` config value.
    pub fn from_config_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preserve" => Some(Self::Preserve),
            "uncomment" => Some(Self::Uncomment),
            "label" | "label_match" => Some(Self::LabelMatch),
            _ => None,
        }
    }
}

/// Per-file counters produced by the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RewriteStats {
    /// Total lines seen.
    pub lines: usize,
    /// Number of start markers encountered.
    pub regions: usize,
    /// Lines that gained a comment token.
    pub commented: usize,
    /// Lines that lost their comment token.
    pub uncommented: usize,
    /// Lines copied verbatim.
    pub unchanged: usize,
    /// Structural problems (unterminated region, stray end marker, ...).
    pub warnings: Vec<String>,
}

impl RewriteStats {
    /// True when the rewrite altered at least one line.
    pub fn changed(&self) -> bool {
        self.commented + self.uncommented > 0
    }
}

/// What happened to a single discovered file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Content changed and was written back.
    Updated,
    /// Content already matched the active platform.
    Unchanged,
    /// Content would change, but the run is a dry run.
    WouldUpdate,
}

impl FileStatus {
    /// Progress-line verb shown on the console.
    pub fn label(&self) -> &'static str {
        match self {
            FileStatus::Updated => "Updated",
            FileStatus::Unchanged => "Unchanged",
            FileStatus::WouldUpdate => "Would update",
        }
    }
}

/// Result of processing one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub status: FileStatus,
    pub stats: RewriteStats,
}

/// Result of a whole run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub platform: Platform,
    pub root: PathBuf,
    pub dry_run: bool,
    /// Files returned by discovery (before processing).
    pub files_discovered: usize,
    pub outcomes: Vec<FileOutcome>,
    /// Non-fatal discovery warnings.
    pub warnings: Vec<String>,
}

impl RunSummary {
    /// Number of files written (or that would be written in a dry run).
    pub fn changed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status != FileStatus::Unchanged)
            .count()
    }
}
