//! Recent-activity aggregation over collected commit history

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::history::CommitEntry;

/// How many authors to report in the leaderboard.
const TOP_AUTHORS: usize = 5;

/// Aggregated activity over a collected commit window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentActivity {
    pub total_recent_commits: usize,
    /// Mean commits per day, over days that saw at least one commit.
    pub avg_commits_per_day: f64,
    pub max_commits_in_day: usize,
    /// Top authors by commit count, most active first.
    pub most_active_authors: Vec<(String, usize)>,
}

/// Summarize a commit history; `None` when the history is empty.
pub fn summarize(commits: &[CommitEntry]) -> Option<RecentActivity> {
    if commits.is_empty() {
        return None;
    }

    let mut by_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    let mut by_author: HashMap<&str, usize> = HashMap::new();
    for commit in commits {
        let day = commit.timestamp.with_timezone(&Utc).date_naive();
        *by_day.entry(day).or_insert(0) += 1;
        *by_author.entry(commit.author_name.as_str()).or_insert(0) += 1;
    }

    let max_commits_in_day = by_day.values().copied().max().unwrap_or(0);
    let avg = commits.len() as f64 / by_day.len() as f64;

    let mut authors: Vec<(String, usize)> = by_author
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    // Count descending, then name for a stable leaderboard.
    authors.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    authors.truncate(TOP_AUTHORS);

    Some(RecentActivity {
        total_recent_commits: commits.len(),
        avg_commits_per_day: round2(avg),
        max_commits_in_day,
        most_active_authors: authors,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
