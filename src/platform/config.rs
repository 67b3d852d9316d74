// platform-switch - platform/config.rs
//
// Config directory resolution and config.toml loading with validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::discovery::DiscoveryConfig;
use crate::core::model::{OutsideRegionPolicy, SwitchSyntax};
use crate::util::constants;
use crate::util::error::{ConfigError, SwitchError};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for platform-switch configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/platform-switch/ or
    /// %APPDATA%\platform-switch\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be
    /// determined.
    pub fn resolve() -> Self {
        match ProjectDirs::from("", "", constants::APP_ID) {
            Some(proj_dirs) => Self {
                config_dir: proj_dirs.config_dir().to_path_buf(),
            },
            None => Self {
                config_dir: PathBuf::from("."),
            },
        }
    }

    /// Full path of the default config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub discovery: DiscoverySection,
    pub markers: MarkersSection,
    pub rewrite: RewriteSection,
    pub logging: LoggingSection,
}

/// `[discovery]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DiscoverySection {
    pub subdir_name: Option<String>,
    pub target_files: Option<Vec<String>>,
    pub exclude_patterns: Option<Vec<String>>,
    pub exclude_root_config_dir: Option<bool>,
    pub max_depth: Option<usize>,
    pub max_files: Option<usize>,
}

/// `[markers]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct MarkersSection {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// `[rewrite]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RewriteSection {
    pub comment_token: Option<String>,
    /// "preserve", "uncomment" or "label".
    pub outside_region: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub discovery: DiscoveryConfig,
    pub syntax: SwitchSyntax,
    pub outside_region: OutsideRegionPolicy,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

/// Load config.toml from the platform config directory.
///
/// A missing file yields defaults with no warnings. An unreadable or
/// unparseable file yields defaults plus a warning, so a broken user config
/// never blocks a run.
pub fn load_config(paths: &PlatformPaths) -> (AppConfig, Vec<String>) {
    let config_path = paths.config_file();

    if !config_path.exists() {
        return (AppConfig::default(), Vec::new());
    }

    match load_config_file(&config_path) {
        Ok(result) => result,
        Err(e) => (
            AppConfig::default(),
            vec![format!("{e}. Using defaults.")],
        ),
    }
}

/// Load a config file that the user asked for explicitly. Read and parse
/// failures are errors; out-of-range values are still warnings.
pub fn load_config_file(path: &Path) -> Result<(AppConfig, Vec<String>), SwitchError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "Loaded config.toml");
    Ok(validate(raw))
}

/// Validate each field against named constants, accumulating warnings.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    // -- Discovery --
    if let Some(name) = raw.discovery.subdir_name {
        if is_plain_dir_name(&name) {
            config.discovery.subdir_name = name;
        } else {
            warnings.push(format!(
                "[discovery] subdir_name = \"{name}\" must be a single directory name. \
                 Using default (\"{}\").",
                constants::DEFAULT_SUBDIR_NAME
            ));
        }
    }

    if let Some(targets) = raw.discovery.target_files {
        if targets.is_empty() {
            warnings.push(
                "[discovery] target_files is empty; nothing would be processed. Using defaults."
                    .to_string(),
            );
        } else {
            config.discovery.target_files = targets;
        }
    }

    if let Some(excludes) = raw.discovery.exclude_patterns {
        config.discovery.exclude_patterns = excludes;
    }

    if let Some(flag) = raw.discovery.exclude_root_config_dir {
        config.discovery.exclude_root_config_dir = flag;
    }

    if let Some(depth) = raw.discovery.max_depth {
        if (1..=constants::ABSOLUTE_MAX_DEPTH).contains(&depth) {
            config.discovery.max_depth = depth;
        } else {
            warnings.push(out_of_range(ConfigError::ValueOutOfRange {
                field: "[discovery] max_depth".to_string(),
                value: depth.to_string(),
                expected: format!("1-{}", constants::ABSOLUTE_MAX_DEPTH),
            }));
        }
    }

    if let Some(files) = raw.discovery.max_files {
        if (constants::MIN_MAX_FILES..=constants::ABSOLUTE_MAX_FILES).contains(&files) {
            config.discovery.max_files = files;
        } else {
            warnings.push(out_of_range(ConfigError::ValueOutOfRange {
                field: "[discovery] max_files".to_string(),
                value: files.to_string(),
                expected: format!(
                    "{}-{}",
                    constants::MIN_MAX_FILES,
                    constants::ABSOLUTE_MAX_FILES
                ),
            }));
        }
    }

    // -- Markers --
    if let Some(start) = raw.markers.start {
        match check_token("[markers] start", &start) {
            Ok(()) => config.syntax.start_marker = start,
            Err(w) => warnings.push(w),
        }
    }

    if let Some(end) = raw.markers.end {
        match check_token("[markers] end", &end) {
            Ok(()) => config.syntax.end_marker = end,
            Err(w) => warnings.push(w),
        }
    }

    // A start marker that contains the end marker (or the reverse) would
    // make every marker line ambiguous.
    let start = &config.syntax.start_marker;
    let end = &config.syntax.end_marker;
    if start.contains(end.as_str()) || end.contains(start.as_str()) {
        warnings.push(format!(
            "[markers] start (\"{start}\") and end (\"{end}\") overlap. Using defaults."
        ));
        config.syntax.start_marker = constants::DEFAULT_START_MARKER.to_string();
        config.syntax.end_marker = constants::DEFAULT_END_MARKER.to_string();
    }

    // -- Rewrite --
    if let Some(token) = raw.rewrite.comment_token {
        match check_token("[rewrite] comment_token", &token) {
            Ok(()) => config.syntax.comment_token = token,
            Err(w) => warnings.push(w),
        }
    }

    if let Some(ref policy) = raw.rewrite.outside_region {
        match OutsideRegionPolicy::from_config_str(policy) {
            Some(p) => config.outside_region = p,
            None => warnings.push(format!(
                "[rewrite] outside_region = \"{policy}\" is not recognised. \
                 Valid values: preserve, uncomment, label. Using default (preserve).",
            )),
        }
    }

    // -- Logging --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default ({}).",
                constants::DEFAULT_LOG_LEVEL
            ));
        }
    }

    (config, warnings)
}

fn out_of_range(e: ConfigError) -> String {
    format!("{e}. Using default.")
}

fn is_plain_dir_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Markers and comment tokens must be non-empty, single-line, and short.
fn check_token(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() || value.contains(['\n', '\r']) {
        return Err(format!(
            "{field} must be a non-empty single-line string. Using default."
        ));
    }
    if value.len() > constants::MAX_TOKEN_LENGTH {
        return Err(out_of_range(ConfigError::ValueOutOfRange {
            field: field.to_string(),
            value: value.to_string(),
            expected: format!("at most {} bytes", constants::MAX_TOKEN_LENGTH),
        }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_text: &str) -> (AppConfig, Vec<String>) {
        validate(toml::from_str(toml_text).expect("valid toml"))
    }

    #[test]
    fn test_empty_config_yields_defaults() {
        let (config, warnings) = parse("");
        assert!(warnings.is_empty());
        assert_eq!(config.discovery.subdir_name, ".vscode");
        assert_eq!(config.discovery.target_files.len(), 3);
        assert_eq!(config.syntax, SwitchSyntax::default());
        assert_eq!(config.outside_region, OutsideRegionPolicy::Preserve);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_valid_values_applied() {
        let (config, warnings) = parse(
            r##"
            [discovery]
            subdir_name = ".idea"
            target_files = ["workspace.xml"]
            exclude_root_config_dir = true
            max_depth = 4
            max_files = 10

            [markers]
            start = "SWITCH_BEGIN"
            end = "SWITCH_FINISH"

            [rewrite]
            comment_token = "#"
            outside_region = "label"

            [logging]
            level = "DEBUG"
            "##,
        );
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.discovery.subdir_name, ".idea");
        assert_eq!(config.discovery.target_files, vec!["workspace.xml"]);
        assert!(config.discovery.exclude_root_config_dir);
        assert_eq!(config.discovery.max_depth, 4);
        assert_eq!(config.discovery.max_files, 10);
        assert_eq!(config.syntax.start_marker, "SWITCH_BEGIN");
        assert_eq!(config.syntax.comment_token, "#");
        assert_eq!(config.outside_region, OutsideRegionPolicy::LabelMatch);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_out_of_range_values_warn_and_fall_back() {
        let (config, warnings) = parse(
            r#"
            [discovery]
            max_depth = 0
            max_files = 0
            "#,
        );
        assert_eq!(warnings.len(), 2, "{warnings:?}");
        assert_eq!(config.discovery.max_depth, constants::DEFAULT_MAX_DEPTH);
        assert_eq!(config.discovery.max_files, constants::DEFAULT_MAX_FILES);
    }

    #[test]
    fn test_bad_strings_warn() {
        let (config, warnings) = parse(
            r#"
            [discovery]
            subdir_name = "a/b"
            target_files = []

            [rewrite]
            comment_token = "  "
            outside_region = "flip"

            [logging]
            level = "loud"
            "#,
        );
        assert_eq!(warnings.len(), 5, "{warnings:?}");
        assert_eq!(config.discovery.subdir_name, ".vscode");
        assert_eq!(config.syntax.comment_token, "//");
    }

    #[test]
    fn test_overlapping_markers_revert_to_defaults() {
        let (config, warnings) = parse(
            r#"
            [markers]
            start = "SWITCH"
            end = "SWITCH_END"
            "#,
        );
        assert_eq!(warnings.len(), 1);
        assert_eq!(config.syntax, SwitchSyntax::default());
    }

    #[test]
    fn test_load_config_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            load_config_file(&missing),
            Err(SwitchError::Config(ConfigError::Io { .. }))
        ));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[discovery\n").unwrap();
        assert!(matches!(
            load_config_file(&broken),
            Err(SwitchError::Config(ConfigError::TomlParse { .. }))
        ));
    }

    #[test]
    fn test_load_config_is_lenient() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PlatformPaths {
            config_dir: dir.path().to_path_buf(),
        };
        let (_, warnings) = load_config(&paths);
        assert!(warnings.is_empty(), "missing file is silent");

        std::fs::write(paths.config_file(), "not = [valid").unwrap();
        let (config, warnings) = load_config(&paths);
        assert_eq!(warnings.len(), 1);
        assert_eq!(config.syntax, SwitchSyntax::default());
    }
}
