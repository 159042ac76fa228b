//! Commit history collection over a date window
//!
//! The collector is pure: it consumes any newest-first sequence of raw
//! commit records and applies the window's stop rule. The git2 adapter
//! that produces those records lives in [`crate::repo`], which keeps the
//! windowing logic testable without a repository on disk.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder for absent or empty author metadata.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// One collected commit, immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitEntry {
    pub timestamp: DateTime<FixedOffset>,
    pub author_email: String,
    pub author_name: String,
    pub message: String,
    pub files_changed: usize,
}

/// Requested [start, end] timestamp range. No start <= end invariant is
/// enforced; callers may legitimately invert the bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Early-stop policy for the newest-first traversal.
///
/// Neither rule filters: every commit visited before the stop fires is
/// emitted, even when it falls outside the nominal window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StopRule {
    /// Stop once a commit is older than the window start. With a
    /// newest-first source this bounds the traversal at the window edge.
    #[default]
    BeforeStart,
    /// Historical rule: stop only when the timestamp is earlier than
    /// `start` *and* later than `end`. With the conventional orientation
    /// (`start <= end`) that conjunction is unsatisfiable, so the
    /// traversal never stops early and walks the entire history; it only
    /// stops when the bounds are inverted and a commit falls strictly
    /// between them.
    Legacy,
}

/// Raw commit record as delivered by the version-control layer, before
/// author defaulting and message decoding.
#[derive(Debug, Clone)]
pub struct CommitData {
    pub timestamp: DateTime<FixedOffset>,
    pub author_email: Option<String>,
    pub author_name: Option<String>,
    pub message: Vec<u8>,
    pub files_changed: usize,
}

/// Collect commits from a newest-first source until the stop rule fires.
pub fn collect_window<I>(commits: I, window: &CommitWindow, rule: StopRule) -> Vec<CommitEntry>
where
    I: IntoIterator<Item = CommitData>,
{
    let mut entries = Vec::new();
    for commit in commits {
        let ts = commit.timestamp.with_timezone(&Utc);
        let stop = match rule {
            StopRule::BeforeStart => ts < window.start,
            StopRule::Legacy => ts < window.start && ts > window.end,
        };
        if stop {
            break;
        }
        entries.push(CommitEntry {
            timestamp: commit.timestamp,
            author_email: author_or_unknown(commit.author_email),
            author_name: author_or_unknown(commit.author_name),
            message: decode_message(&commit.message),
            files_changed: commit.files_changed,
        });
    }
    entries
}

fn author_or_unknown(field: Option<String>) -> String {
    match field {
        Some(value) if !value.is_empty() => value,
        _ => UNKNOWN_AUTHOR.to_string(),
    }
}

/// Decode a commit message as UTF-8; invalid bytes yield an empty string
/// rather than an error.
pub fn decode_message(bytes: &[u8]) -> String {
    std::str::from_utf8(bytes).map(str::to_owned).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn utc(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap()
    }

    fn commit(day: u32, message: &str) -> CommitData {
        CommitData {
            timestamp: utc(day).fixed_offset(),
            author_email: Some(format!("dev{day}@example.com")),
            author_name: Some(format!("Dev {day}")),
            message: message.as_bytes().to_vec(),
            files_changed: 1,
        }
    }

    /// Five commits, newest first: days 20, 16, 12, 8, 4.
    fn five_commits() -> Vec<CommitData> {
        [20, 16, 12, 8, 4]
            .into_iter()
            .map(|d| commit(d, &format!("commit day {d}")))
            .collect()
    }

    #[test]
    fn test_before_start_stops_at_window_edge() {
        let window = CommitWindow {
            start: utc(10),
            end: utc(18),
        };
        let entries = collect_window(five_commits(), &window, StopRule::BeforeStart);
        // Days 20, 16, 12 are >= start; day 8 triggers the stop.
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.timestamp.with_timezone(&Utc) >= window.start));
    }

    #[test]
    fn test_before_start_emits_commits_newer_than_end() {
        // Day 20 is outside [10, 18] but is still visited before the stop
        // fires: there is a stopping rule but no filtering rule.
        let window = CommitWindow {
            start: utc(10),
            end: utc(18),
        };
        let entries = collect_window(five_commits(), &window, StopRule::BeforeStart);
        assert_eq!(entries[0].message, "commit day 20");
    }

    #[test]
    fn test_legacy_stops_only_between_inverted_bounds() {
        // The legacy conjunction fires only when the bounds are inverted
        // and a commit lands strictly between them: day 16 sits inside
        // (10, 18), so only day 20 is emitted.
        let window = CommitWindow {
            start: utc(18),
            end: utc(10),
        };
        let entries = collect_window(five_commits(), &window, StopRule::Legacy);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "commit day 20");
    }

    #[test]
    fn test_legacy_normal_window_walks_everything() {
        // With start < end, `ts < start && ts > end` is unsatisfiable too:
        // the legacy rule only ever stops on an inverted-bound call pattern.
        let window = CommitWindow {
            start: utc(10),
            end: utc(18),
        };
        let entries = collect_window(five_commits(), &window, StopRule::Legacy);
        assert_eq!(entries.len(), 5);
    }

    #[test]
    fn test_before_start_inverted_window_still_bounds() {
        let window = CommitWindow {
            start: utc(18),
            end: utc(10),
        };
        let entries = collect_window(five_commits(), &window, StopRule::BeforeStart);
        // Only day 20 is >= the (late) start bound.
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_missing_author_defaults_to_unknown() {
        let mut data = commit(12, "msg");
        data.author_email = None;
        data.author_name = Some(String::new());
        let window = CommitWindow {
            start: utc(1),
            end: utc(28),
        };
        let entries = collect_window([data], &window, StopRule::BeforeStart);
        assert_eq!(entries[0].author_email, UNKNOWN_AUTHOR);
        assert_eq!(entries[0].author_name, UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_invalid_utf8_message_becomes_empty() {
        let mut data = commit(12, "");
        data.message = vec![0xff, 0xfe, b'h', b'i'];
        data.files_changed = 7;
        let window = CommitWindow {
            start: utc(1),
            end: utc(28),
        };
        let entries = collect_window([data], &window, StopRule::BeforeStart);
        assert_eq!(entries[0].message, "");
        assert_eq!(entries[0].files_changed, 7);
    }

    #[test]
    fn test_decode_message() {
        assert_eq!(decode_message(b"Hello, World!"), "Hello, World!");
        assert_eq!(decode_message(b""), "");
        // UTF-8 encoded CJK survives decoding.
        assert_eq!(
            decode_message("Hello, 世界!".as_bytes()),
            "Hello, 世界!"
        );
        assert_eq!(decode_message(&[0xc3, 0x28]), "");
    }

    #[test]
    fn test_empty_source_yields_empty_history() {
        let window = CommitWindow {
            start: utc(1),
            end: utc(28),
        };
        let entries = collect_window(Vec::new(), &window, StopRule::default());
        assert!(entries.is_empty());
    }
}
