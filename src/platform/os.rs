// platform-switch - platform/os.rs
//
// Host platform detection. Computed once at startup and passed explicitly
// into the rewrite options.

use crate::core::model::Platform;
use crate::util::error::PlatformError;

/// Detect the active platform from the host OS identifier.
pub fn detect_platform() -> Result<Platform, PlatformError> {
    platform_for_os(std::env::consts::OS)
}

/// Map an OS identifier to a platform, rejecting anything outside the
/// closed set.
pub fn platform_for_os(os: &str) -> Result<Platform, PlatformError> {
    let platform = Platform::from_os_id(os).ok_or_else(|| PlatformError::Unsupported {
        os: os.to_string(),
    })?;
    tracing::debug!(os, platform = %platform, "Host platform detected");
    Ok(platform)
}

/// Resolve the active platform: an explicit label wins over detection.
pub fn resolve_platform(override_label: Option<&str>) -> Result<Platform, PlatformError> {
    match override_label {
        Some(label) => {
            let platform = label.parse::<Platform>()?;
            tracing::info!(platform = %platform, "Platform overridden on the command line");
            Ok(platform)
        }
        None => detect_platform(),
    }
}
