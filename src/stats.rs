//! File statistics over a working tree
//!
//! Counts files per extension and lines of text across a checkout,
//! skipping everything under `.git`.

use std::collections::BTreeMap;
use std::path::Path;

use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};

/// Maximum file size for line counting (5MB).
const MAX_FILE_SIZE_FOR_LINES: u64 = 5_000_000;

/// Bucket for files without an extension.
const NO_EXTENSION: &str = "no extension";

/// Aggregate file statistics for a working tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStats {
    /// Maps extension (with leading dot) to file count.
    pub file_types: BTreeMap<String, usize>,
    pub total_files: usize,
    pub total_lines: usize,
}

/// Configuration for statistics collection.
#[derive(Debug, Clone, Copy)]
pub struct StatsConfig {
    /// Whether to count lines (skippable for speed on large trees).
    pub count_lines: bool,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self { count_lines: true }
    }
}

/// Walk `root` and collect per-extension file counts and line totals.
pub fn collect_file_stats(root: &Path, config: StatsConfig) -> FileStats {
    let mut stats = FileStats::default();

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .build();

    for entry in walker.flatten() {
        let path = entry.path();
        if path == root || in_git_dir(path) || !path.is_file() {
            continue;
        }
        record_file(&mut stats, path, config);
    }

    stats
}

fn in_git_dir(path: &Path) -> bool {
    path.components()
        .any(|c| c.as_os_str().to_string_lossy() == ".git")
}

fn record_file(stats: &mut FileStats, path: &Path, config: StatsConfig) {
    let key = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_else(|| NO_EXTENSION.to_string());

    *stats.file_types.entry(key).or_insert(0) += 1;
    stats.total_files += 1;

    if config.count_lines {
        if let Some(lines) = count_lines(path) {
            stats.total_lines += lines;
        }
    }
}

/// Count lines in a file by scanning for newlines. Oversized files are
/// skipped entirely.
fn count_lines(path: &Path) -> Option<usize> {
    if let Ok(metadata) = path.metadata() {
        if metadata.len() > MAX_FILE_SIZE_FOR_LINES {
            return None;
        }
    }

    let content = std::fs::read(path).ok()?;
    let newlines = content.iter().filter(|&&b| b == b'\n').count();

    // Count a trailing partial line.
    Some(if content.is_empty() || content.last() == Some(&b'\n') {
        newlines
    } else {
        newlines + 1
    })
}
