//! Console and JSON output for reports, trees, and scores

use std::io::{self, Write};

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::report::{FileStructure, RepoReport};
use crate::rubric::Scores;

/// Print any serializable value as pretty-printed JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}

/// Print a full report to stdout with optional color.
pub fn print_report(report: &RepoReport, use_color: bool) -> io::Result<()> {
    let mut stdout = stream(use_color);
    let bold = bold_spec();
    let mut label = ColorSpec::new();
    label.set_fg(Some(Color::Cyan));

    stdout.set_color(&bold)?;
    writeln!(stdout, "Repository Report: {}", report.repository)?;
    stdout.reset()?;
    writeln!(stdout, "───────────────────")?;
    writeln!(stdout, "URL:          {}", report.repository_url)?;
    writeln!(
        stdout,
        "Generated:    {}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(stdout)?;

    stdout.set_color(&bold)?;
    writeln!(stdout, "Basic Stats")?;
    stdout.reset()?;
    let basic = &report.basic_stats;
    writeln!(stdout, "  Commits:      {}", format_number(basic.total_commits))?;
    writeln!(stdout, "  Branches:     {}", basic.active_branches)?;
    writeln!(stdout, "  Contributors: {}", basic.contributors)?;
    match &basic.last_commit {
        Some(ts) => writeln!(stdout, "  Last commit:  {}", ts.format("%Y-%m-%d %H:%M:%S %z"))?,
        None => writeln!(stdout, "  Last commit:  (no commits)")?,
    }
    writeln!(stdout, "  Size:         {} MB", basic.repo_size_mb)?;
    writeln!(stdout)?;

    stdout.set_color(&bold)?;
    writeln!(stdout, "Files")?;
    stdout.reset()?;
    writeln!(
        stdout,
        "  {} files, {} lines",
        format_number(report.file_stats.total_files),
        format_number(report.file_stats.total_lines)
    )?;
    for (ext, count) in &report.file_stats.file_types {
        write!(stdout, "  ")?;
        stdout.set_color(&label)?;
        write!(stdout, "{:<14}", ext)?;
        stdout.reset()?;
        writeln!(stdout, "{:>5} files", count)?;
    }
    writeln!(stdout)?;

    if let Some(activity) = &report.recent_activity {
        stdout.set_color(&bold)?;
        writeln!(stdout, "Recent Activity")?;
        stdout.reset()?;
        writeln!(
            stdout,
            "  {} commits in window, avg {}/day, max {} in a day",
            activity.total_recent_commits,
            activity.avg_commits_per_day,
            activity.max_commits_in_day
        )?;
        for (author, count) in &activity.most_active_authors {
            write!(stdout, "  ")?;
            stdout.set_color(&label)?;
            write!(stdout, "{:<20}", author)?;
            stdout.reset()?;
            writeln!(stdout, "{:>4} commits", count)?;
        }
        writeln!(stdout)?;
    }

    stdout.set_color(&bold)?;
    writeln!(stdout, "File Structure")?;
    stdout.reset()?;
    print_structure(&mut stdout, &report.file_structure)?;

    Ok(())
}

/// Print just the rendered tree outline.
pub fn print_tree(structure: &FileStructure, use_color: bool) -> io::Result<()> {
    let mut stdout = stream(use_color);
    print_structure(&mut stdout, structure)
}

fn print_structure(stdout: &mut StandardStream, structure: &FileStructure) -> io::Result<()> {
    for line in &structure.rendered {
        writeln!(stdout, "{}", line)?;
    }
    if !structure.excluded_patterns.is_empty() {
        writeln!(stdout)?;
        writeln!(
            stdout,
            "excluded patterns: {}",
            structure.excluded_patterns.join(", ")
        )?;
    }
    Ok(())
}

/// Print a rubric score breakdown.
pub fn print_scores(scores: &Scores, use_color: bool) -> io::Result<()> {
    let mut stdout = stream(use_color);
    stdout.set_color(&bold_spec())?;
    writeln!(stdout, "Evaluation Scores")?;
    stdout.reset()?;
    writeln!(stdout, "{}", scores.summary())?;
    Ok(())
}

fn stream(use_color: bool) -> StandardStream {
    let choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

fn bold_spec() -> ColorSpec {
    let mut bold = ColorSpec::new();
    bold.set_bold(true);
    bold
}

/// Format a number with thousand separators.
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::new();

    for (i, c) in chars.iter().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, *c);
    }

    result
}
