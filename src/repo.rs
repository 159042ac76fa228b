//! Git repository access and report assembly

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, Offset, Utc};
use git2::{BranchType, Repository, Sort};
use ignore::WalkBuilder;
use log::debug;
use thiserror::Error;

use crate::activity;
use crate::history::{
    CommitData, CommitEntry, CommitWindow, StopRule, UNKNOWN_AUTHOR, collect_window,
};
use crate::report::{BasicStats, FileStructure, RepoReport};
use crate::stats::{StatsConfig, collect_file_stats};
use crate::tree::{TreeWalker, WalkError, WalkerConfig, render_tree};

/// Fallback when the repository has no `origin` remote.
const NO_ORIGIN: &str = "no origin";

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("repository path not found: {0}")]
    PathNotFound(PathBuf),
    #[error("not a git repository: {0}")]
    NotARepository(PathBuf),
    #[error("repository has no working tree: {0}")]
    NoWorkingTree(PathBuf),
    #[error(transparent)]
    Walk(#[from] WalkError),
    #[error("git operation failed: {0}")]
    Git(#[from] git2::Error),
}

/// Options controlling one report generation.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub window: CommitWindow,
    pub stop_rule: StopRule,
    pub max_depth: Option<usize>,
    pub exclude_patterns: Vec<String>,
    pub count_lines: bool,
}

/// Read-only view over one local repository checkout.
pub struct RepoStats {
    repo: Repository,
    workdir: PathBuf,
    name: String,
}

impl RepoStats {
    /// Open a repository at `path`. Missing paths, non-repositories, and
    /// bare repositories are each a distinguished fatal error.
    pub fn open(path: &Path) -> Result<Self, RepoError> {
        if !path.exists() {
            return Err(RepoError::PathNotFound(path.to_path_buf()));
        }
        let repo = Repository::open(path)
            .map_err(|_| RepoError::NotARepository(path.to_path_buf()))?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| RepoError::NoWorkingTree(path.to_path_buf()))?
            .to_path_buf();
        let name = workdir
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "repository".to_string());
        Ok(Self {
            repo,
            workdir,
            name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Commit count, branch count, distinct contributors, newest commit
    /// timestamp, and working-tree size. An unborn HEAD yields zeros.
    pub fn basic_stats(&self) -> Result<BasicStats, RepoError> {
        let mut total_commits = 0;
        let mut contributors: HashSet<String> = HashSet::new();
        let mut last_commit: Option<DateTime<FixedOffset>> = None;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;
        if revwalk.push_head().is_ok() {
            for oid in revwalk.flatten() {
                let Ok(commit) = self.repo.find_commit(oid) else {
                    continue;
                };
                total_commits += 1;
                contributors.insert(
                    commit
                        .author()
                        .email()
                        .unwrap_or(UNKNOWN_AUTHOR)
                        .to_string(),
                );
                if last_commit.is_none() {
                    last_commit = Some(commit_timestamp(&commit));
                }
            }
        }

        let active_branches = self.repo.branches(Some(BranchType::Local))?.count();

        Ok(BasicStats {
            total_commits,
            active_branches,
            contributors: contributors.len(),
            last_commit,
            repo_size_mb: self.repo_size_mb(),
        })
    }

    /// Collect commit history newest-first until the window's stop rule
    /// fires. The revwalk is consumed lazily, so an early stop avoids
    /// diffing the rest of history.
    pub fn commit_history(
        &self,
        window: CommitWindow,
        rule: StopRule,
    ) -> Result<Vec<CommitEntry>, RepoError> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;
        if revwalk.push_head().is_err() {
            // Unborn HEAD: no history yet.
            return Ok(Vec::new());
        }

        let commits = revwalk
            .filter_map(|oid| oid.ok())
            .filter_map(|oid| self.repo.find_commit(oid).ok())
            .map(|commit| self.commit_data(&commit));

        Ok(collect_window(commits, &window, rule))
    }

    /// URL of the `origin` remote, or a fixed fallback.
    pub fn origin_url(&self) -> String {
        self.repo
            .find_remote("origin")
            .ok()
            .and_then(|remote| remote.url().map(str::to_owned))
            .unwrap_or_else(|| NO_ORIGIN.to_string())
    }

    /// Assemble a full report: stats, windowed history, activity summary,
    /// and the file-structure tree.
    pub fn generate_report(&self, options: &ReportOptions) -> Result<RepoReport, RepoError> {
        debug!("generating report for {}", self.name);

        let commit_history = self.commit_history(options.window, options.stop_rule)?;
        let recent_activity = activity::summarize(&commit_history);

        let walker = TreeWalker::new(WalkerConfig {
            max_depth: options.max_depth,
            exclude_patterns: options.exclude_patterns.clone(),
        })?;
        let structure = walker.walk(&self.workdir)?;
        let rendered = render_tree(&structure);

        let file_stats = collect_file_stats(
            &self.workdir,
            StatsConfig {
                count_lines: options.count_lines,
            },
        );

        Ok(RepoReport {
            repository: self.name.clone(),
            repository_url: self.origin_url(),
            generated_at: Utc::now(),
            basic_stats: self.basic_stats()?,
            file_stats,
            recent_activity,
            commit_history,
            file_structure: FileStructure {
                structure,
                rendered,
                excluded_patterns: options.exclude_patterns.clone(),
                max_depth: options.max_depth,
            },
        })
    }

    fn commit_data(&self, commit: &git2::Commit) -> CommitData {
        let author = commit.author();
        CommitData {
            timestamp: commit_timestamp(commit),
            author_email: author.email().map(str::to_owned),
            author_name: author.name().map(str::to_owned),
            message: commit.message_bytes().to_vec(),
            files_changed: self.files_changed(commit),
        }
    }

    /// Count of distinct files touched, diffed against the first parent
    /// (or the empty tree for a root commit).
    fn files_changed(&self, commit: &git2::Commit) -> usize {
        let Ok(tree) = commit.tree() else {
            return 0;
        };
        let parent_tree = commit.parent(0).ok().and_then(|parent| parent.tree().ok());
        self.repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)
            .map(|diff| diff.deltas().len())
            .unwrap_or(0)
    }

    /// Working-tree size in megabytes, `.git` included, rounded to two
    /// decimals.
    fn repo_size_mb(&self) -> f64 {
        let walker = WalkBuilder::new(&self.workdir)
            .hidden(false)
            .ignore(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .build();

        let total_bytes: u64 = walker
            .flatten()
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.metadata().ok())
            .map(|metadata| metadata.len())
            .sum();

        let mb = total_bytes as f64 / (1024.0 * 1024.0);
        (mb * 100.0).round() / 100.0
    }
}

fn commit_timestamp(commit: &git2::Commit) -> DateTime<FixedOffset> {
    let time = commit.time();
    let offset =
        FixedOffset::east_opt(time.offset_minutes() * 60).unwrap_or_else(|| Utc.fix());
    DateTime::<Utc>::from_timestamp(time.seconds(), 0)
        .unwrap_or_default()
        .with_timezone(&offset)
}
