//! Edge-case tests exercising the library surface end to end

mod harness;

use chrono::{Duration, TimeZone, Utc};
use harness::TestRepo;
use repograde::history::{CommitData, CommitWindow, StopRule, collect_window};
use repograde::repo::{RepoError, RepoStats, ReportOptions};
use repograde::tree::{TreeNode, TreeWalker, WalkerConfig, render_tree};

fn walker(max_depth: Option<usize>, patterns: &[&str]) -> TreeWalker {
    TreeWalker::new(WalkerConfig {
        max_depth,
        exclude_patterns: patterns.iter().map(|s| s.to_string()).collect(),
    })
    .unwrap()
}

/// The canonical scenario: `a.py`, `b.txt`, `sub/c.md`.
fn scenario_repo() -> TestRepo {
    let repo = TestRepo::new();
    repo.add_untracked("a.py", "print()");
    repo.add_untracked("b.txt", "text");
    repo.add_untracked("sub/c.md", "# c");
    repo
}

#[test]
fn test_depth_zero_scenario() {
    let repo = scenario_repo();
    let tree = walker(Some(0), &[]).walk(repo.path()).unwrap();

    let TreeNode::Dir { children, .. } = &tree else {
        panic!("root must be a directory");
    };
    let summary: Vec<(&str, &str)> = children
        .iter()
        .map(|c| {
            let kind = match c {
                TreeNode::File { .. } => "file",
                TreeNode::Dir { .. } => "dir",
                TreeNode::Truncated { .. } => "truncated",
                TreeNode::Unreadable { .. } => "unreadable",
            };
            (c.name(), kind)
        })
        .collect();
    assert_eq!(
        summary,
        vec![("a.py", "file"), ("b.txt", "file"), ("sub", "truncated")]
    );
}

#[test]
fn test_python_exclusion_scenario() {
    let repo = scenario_repo();
    for depth in [None, Some(0), Some(1), Some(5)] {
        let tree = walker(depth, &[r"\.py$"]).walk(repo.path()).unwrap();
        let rendered = render_tree(&tree).join("\n");
        assert!(
            !rendered.contains("a.py"),
            "a.py must be absent at depth {depth:?}:\n{rendered}"
        );
    }
}

#[test]
fn test_deeply_nested_structure() {
    let repo = TestRepo::new();
    repo.add_untracked("a/b/c/d/e/f/leaf.txt", "deep");

    let full = walker(None, &[]).walk(repo.path()).unwrap();
    assert_eq!(full.file_names(), vec!["leaf.txt"]);

    // Root is depth 0, so `c` at depth 3 is the truncation boundary.
    let shallow = walker(Some(2), &[]).walk(repo.path()).unwrap();
    let rendered = render_tree(&shallow).join("\n");
    assert!(rendered.contains("c/ ..."), "{rendered}");
    assert!(!rendered.contains("leaf.txt"));
}

#[test]
fn test_unicode_file_names_survive_round_trip() {
    let repo = TestRepo::new();
    repo.add_untracked("héllo wörld.txt", "");
    repo.add_untracked("日本語/ファイル.md", "");

    let tree = walker(None, &[]).walk(repo.path()).unwrap();
    let json = serde_json::to_string(&tree).unwrap();
    let copy: TreeNode = serde_json::from_str(&json).unwrap();
    assert_eq!(render_tree(&tree), render_tree(&copy));

    let rendered = render_tree(&tree).join("\n");
    assert!(rendered.contains("héllo wörld.txt"));
    assert!(rendered.contains("ファイル.md"));
}

#[test]
fn test_many_siblings_render_with_single_last_branch() {
    let repo = TestRepo::new();
    for i in 0..20 {
        repo.add_untracked(&format!("file{i:02}.txt"), "");
    }
    let tree = walker(None, &[]).walk(repo.path()).unwrap();
    let lines = render_tree(&tree);
    // Root line plus 20 children; exactly two `└── ` lines: the root and
    // the final sibling.
    assert_eq!(lines.len(), 21);
    let closers = lines.iter().filter(|l| l.contains("└── ")).count();
    assert_eq!(closers, 2);
}

#[test]
fn test_future_window_legacy_walks_all_history() {
    let repo = TestRepo::with_git();
    repo.add_file("a.rs", "fn a() {}");
    repo.commit("one");
    repo.add_file("b.rs", "fn b() {}");
    repo.commit("two");
    repo.add_file("c.rs", "fn c() {}");
    repo.commit("three");

    let stats = RepoStats::open(repo.path()).unwrap();
    // A window entirely in the future, conventionally ordered. The legacy
    // conjunction cannot hold when start <= end, so the whole history
    // comes back despite the window containing none of it.
    let window = CommitWindow {
        start: Utc::now() + Duration::days(365),
        end: Utc::now() + Duration::days(730),
    };
    let legacy = stats.commit_history(window, StopRule::Legacy).unwrap();
    assert_eq!(legacy.len(), 3);

    // The corrected rule stops immediately for the same window.
    let corrected = stats.commit_history(window, StopRule::BeforeStart).unwrap();
    assert!(corrected.is_empty());
}

#[test]
fn test_synthetic_five_commit_window_policies() {
    let ts = |day: u32| {
        Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0)
            .unwrap()
            .fixed_offset()
    };
    let commits: Vec<CommitData> = [20, 16, 12, 8, 4]
        .into_iter()
        .map(|d| CommitData {
            timestamp: ts(d),
            author_email: Some("dev@example.com".to_string()),
            author_name: Some("Dev".to_string()),
            message: b"work".to_vec(),
            files_changed: 1,
        })
        .collect();

    let window = CommitWindow {
        start: Utc.with_ymd_and_hms(2025, 3, 14, 0, 0, 0).unwrap(),
        end: Utc.with_ymd_and_hms(2025, 3, 22, 0, 0, 0).unwrap(),
    };

    // Legacy mode documents the quirk: the window has no limiting effect
    // and all five commits come back.
    let legacy = collect_window(commits.clone(), &window, StopRule::Legacy);
    assert_eq!(legacy.len(), 5);

    // Default mode keeps only commits at or after the start bound:
    // days 20 and 16.
    let corrected = collect_window(commits, &window, StopRule::BeforeStart);
    assert_eq!(corrected.len(), 2);
    assert!(
        corrected
            .iter()
            .all(|e| e.timestamp.with_timezone(&Utc) >= window.start)
    );
}

#[test]
fn test_report_excludes_and_truncates_together() {
    let repo = TestRepo::with_git();
    repo.add_file("src/main.rs", "fn main() {}\n");
    repo.add_file("target/debug/artifact.bin", "binary");
    repo.add_file("docs/deep/nested/page.md", "# page");
    repo.commit("layout");

    let stats = RepoStats::open(repo.path()).unwrap();
    let report = stats
        .generate_report(&ReportOptions {
            window: CommitWindow {
                start: Utc::now() - Duration::days(7),
                end: Utc::now() + Duration::days(1),
            },
            stop_rule: StopRule::default(),
            max_depth: Some(1),
            exclude_patterns: vec!["target".to_string(), r"\.git\b".to_string()],
            count_lines: true,
        })
        .unwrap();

    let rendered = report.file_structure.rendered.join("\n");
    assert!(!rendered.contains("target"), "excluded even at the boundary:\n{rendered}");
    assert!(rendered.contains("src/"));
    assert!(rendered.contains("deep/ ..."), "{rendered}");
    assert!(!rendered.contains("page.md"));

    // File stats ignore the tree's depth limit and exclusions.
    assert!(report.file_stats.total_files >= 3);
}

#[test]
fn test_open_errors_are_distinguished() {
    let missing = RepoStats::open(std::path::Path::new("/no/such/place"));
    assert!(matches!(missing, Err(RepoError::PathNotFound(_))));

    let plain = TestRepo::new();
    plain.add_untracked("file.txt", "not a repo");
    let not_repo = RepoStats::open(plain.path());
    assert!(matches!(not_repo, Err(RepoError::NotARepository(_))));
}
