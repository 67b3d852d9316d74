// platform-switch - app/switch.rs
//
// Run orchestration: discover target files, then rewrite each one in turn.
//
// Files are processed sequentially. Each file is read fully into memory,
// rewritten, and written back only if its content changed. The first I/O
// or encoding error aborts the run.

use crate::core::classify::Classifier;
use crate::core::discovery::{self, DiscoveryConfig};
use crate::core::model::{FileOutcome, FileStatus, RunSummary};
use crate::core::rewrite::{self, RewriteOptions};
use crate::platform::fs;
use crate::util::error::Result;
use std::path::Path;

/// Everything a run needs, resolved from config and CLI.
#[derive(Debug, Clone)]
pub struct SwitchOptions {
    pub discovery: DiscoveryConfig,
    pub rewrite: RewriteOptions,
    /// Report what would change without writing anything.
    pub dry_run: bool,
}

/// Discover and rewrite every target file under `root`.
///
/// `on_file` is called once per processed file, in processing order, so
/// the caller can print progress as it happens.
pub fn run_switch<F>(root: &Path, options: &SwitchOptions, mut on_file: F) -> Result<RunSummary>
where
    F: FnMut(&FileOutcome),
{
    let (files, warnings) = discovery::discover_files(root, &options.discovery)?;

    for w in &warnings {
        tracing::warn!(warning = %w, "Discovery warning");
    }

    tracing::info!(
        root = %root.display(),
        platform = %options.rewrite.platform,
        files = files.len(),
        dry_run = options.dry_run,
        "Switching configuration files"
    );

    let classifier = Classifier::new(&options.rewrite.syntax);
    let mut outcomes = Vec::with_capacity(files.len());

    for path in &files {
        let outcome = process_file(path, &classifier, options)?;
        on_file(&outcome);
        outcomes.push(outcome);
    }

    Ok(RunSummary {
        platform: options.rewrite.platform,
        root: root.to_path_buf(),
        dry_run: options.dry_run,
        files_discovered: files.len(),
        outcomes,
        warnings,
    })
}

/// Rewrite a single file for the configured platform.
pub fn process_file(
    path: &Path,
    classifier: &Classifier,
    options: &SwitchOptions,
) -> Result<FileOutcome> {
    let content = fs::read_text(path)?;
    let lines = classifier.classify(&content);
    let (rewritten, stats) = rewrite::render(&lines, &options.rewrite);

    for w in &stats.warnings {
        tracing::warn!(file = %path.display(), warning = %w, "Switch region problem");
    }

    let status = if rewritten == content {
        FileStatus::Unchanged
    } else if options.dry_run {
        FileStatus::WouldUpdate
    } else {
        fs::write_text(path, &rewritten)?;
        FileStatus::Updated
    };

    tracing::debug!(
        file = %path.display(),
        status = status.label(),
        commented = stats.commented,
        uncommented = stats.uncommented,
        regions = stats.regions,
        "File processed"
    );

    Ok(FileOutcome {
        path: path.to_path_buf(),
        status,
        stats,
    })
}
