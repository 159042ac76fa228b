//! Repograde - repository analytics and rubric scoring for project evaluation

pub mod activity;
pub mod fetch;
pub mod history;
pub mod output;
pub mod repo;
pub mod report;
pub mod rubric;
pub mod stats;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use activity::{RecentActivity, summarize};
pub use history::{CommitData, CommitEntry, CommitWindow, StopRule, collect_window};
pub use output::{print_json, print_report, print_scores, print_tree};
pub use repo::{RepoError, RepoStats, ReportOptions};
pub use report::{BasicStats, FileStructure, RepoReport};
pub use rubric::{Evaluation, Evaluator, RubricError, Scores};
pub use stats::{FileStats, StatsConfig, collect_file_stats};
pub use tree::{TreeNode, TreeWalker, WalkError, WalkerConfig, render_tree};
