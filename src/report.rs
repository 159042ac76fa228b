//! Serializable report records
//!
//! A report is built fresh per request, never mutated afterwards, and
//! owned by the caller until discarded.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::activity::RecentActivity;
use crate::history::CommitEntry;
use crate::stats::FileStats;
use crate::tree::TreeNode;

/// Headline repository numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicStats {
    pub total_commits: usize,
    pub active_branches: usize,
    pub contributors: usize,
    /// Timestamp of the newest commit; `None` for an unborn HEAD.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_commit: Option<DateTime<FixedOffset>>,
    pub repo_size_mb: f64,
}

/// The built directory tree together with how it was built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileStructure {
    pub structure: TreeNode,
    /// Pre-rendered outline lines; a pure function of `structure`.
    pub rendered: Vec<String>,
    pub excluded_patterns: Vec<String>,
    pub max_depth: Option<usize>,
}

/// A complete analysis snapshot for one repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoReport {
    pub repository: String,
    pub repository_url: String,
    pub generated_at: DateTime<Utc>,
    pub basic_stats: BasicStats,
    pub file_stats: FileStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_activity: Option<RecentActivity>,
    pub commit_history: Vec<CommitEntry>,
    pub file_structure: FileStructure,
}
