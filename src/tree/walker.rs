//! Recursive directory walker with depth truncation and regex exclusion

use std::path::{Path, PathBuf};

use regex::Regex;
use thiserror::Error;

use super::node::TreeNode;

/// Errors fatal to tree construction. Per-directory failures during the
/// walk never surface here; they degrade to [`TreeNode::Unreadable`].
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("invalid exclusion pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
    #[error("path not found: {0}")]
    RootNotFound(PathBuf),
    #[error("root path matches an exclusion pattern: {0}")]
    RootExcluded(PathBuf),
}

/// Configuration for tree building.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Maximum recursion depth; `None` for unlimited. The root is depth 0,
    /// so `Some(0)` lists the root's immediate children by name and marks
    /// every child directory as truncated.
    pub max_depth: Option<usize>,
    /// Regex patterns matched anywhere within a node's full path string.
    /// A match drops the node and its whole subtree from the output.
    pub exclude_patterns: Vec<String>,
}

/// Builds a [`TreeNode`] tree for a directory.
///
/// Patterns compile once at construction; each `walk` call reads the file
/// system fresh and allocates a new tree owned by the caller.
pub struct TreeWalker {
    config: WalkerConfig,
    patterns: Vec<Regex>,
}

impl TreeWalker {
    pub fn new(config: WalkerConfig) -> Result<Self, WalkError> {
        let patterns = config
            .exclude_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| WalkError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { config, patterns })
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Build the tree rooted at `root`.
    ///
    /// Fails only when the root is missing or itself excluded; everything
    /// below degrades locally (unreadable directories become markers).
    pub fn walk(&self, root: &Path) -> Result<TreeNode, WalkError> {
        if !root.exists() {
            return Err(WalkError::RootNotFound(root.to_path_buf()));
        }
        self.walk_path(root, 0)
            .ok_or_else(|| WalkError::RootExcluded(root.to_path_buf()))
    }

    /// Recursive step. `None` means the node is excluded and must be
    /// dropped from its parent entirely.
    fn walk_path(&self, path: &Path, depth: usize) -> Option<TreeNode> {
        // Exclusion wins over everything, including truncation: an excluded
        // path never appears, not even as a marker.
        if self.is_excluded(path) {
            return None;
        }

        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| ".".to_string());

        // Skip symlinks to prevent traversal loops.
        if path.is_symlink() {
            return None;
        }

        if path.is_file() {
            return Some(TreeNode::File { name });
        }

        if !path.is_dir() {
            return None;
        }

        // Only directories truncate; files at the boundary keep their names.
        if self.config.max_depth.is_some_and(|max| depth > max) {
            return Some(TreeNode::Truncated { name });
        }

        let entries = match std::fs::read_dir(path) {
            Ok(entries) => entries,
            Err(_) => return Some(TreeNode::Unreadable { name }),
        };

        let mut entries: Vec<_> = entries.filter_map(|e| e.ok()).collect();
        entries.sort_by_key(|e| e.file_name());

        let children = entries
            .iter()
            .filter_map(|entry| self.walk_path(&entry.path(), depth + 1))
            .collect();

        Some(TreeNode::Dir { name, children })
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.patterns.iter().any(|p| p.is_match(&path_str))
    }
}
