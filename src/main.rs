//! CLI entry point for repograde

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use log::warn;
use repograde::history::{CommitWindow, StopRule};
use repograde::repo::{RepoStats, ReportOptions};
use repograde::rubric::{Evaluation, Evaluator, Scores};
use repograde::tree::{TreeWalker, WalkerConfig, render_tree};
use repograde::{FileStructure, fetch, output};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "repograde")]
#[command(about = "Repository analytics and rubric scoring for project evaluation")]
#[command(version)]
struct Args {
    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto", global = true)]
    color: ColorMode,

    #[command(subcommand)]
    command: CommandKind,
}

#[derive(Subcommand, Debug)]
enum CommandKind {
    /// Generate a full analytics report for a repository
    Report {
        /// Repository to analyze
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Window start: YYYY-MM-DD, RFC 3339, or a duration ago (e.g. 14d)
        #[arg(long = "since", value_name = "DATE|DURATION", default_value = "14d")]
        since: String,

        /// Window end: same formats as --since (default: now)
        #[arg(long = "until", value_name = "DATE|DURATION")]
        until: Option<String>,

        /// Descend only N levels deep when building the file structure
        #[arg(short = 'L', long = "depth")]
        depth: Option<usize>,

        /// Exclude paths matching a regex (can be used multiple times)
        #[arg(short = 'e', long = "exclude")]
        exclude: Vec<String>,

        /// Skip line counting (faster on large trees)
        #[arg(long = "no-lines")]
        no_lines: bool,

        /// Use the historical window stop rule (walks the entire history
        /// for a conventionally ordered window)
        #[arg(long = "legacy-window")]
        legacy_window: bool,

        /// Output in JSON format
        #[arg(long = "json")]
        json: bool,
    },

    /// Build and print only the directory tree
    Tree {
        /// Directory to display
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Descend only N levels deep
        #[arg(short = 'L', long = "depth")]
        depth: Option<usize>,

        /// Exclude paths matching a regex (can be used multiple times)
        #[arg(short = 'e', long = "exclude")]
        exclude: Vec<String>,

        /// Output in JSON format
        #[arg(long = "json")]
        json: bool,
    },

    /// Show or initialize a repository's evaluation rubric
    Grade {
        /// Repository holding the evaluation
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Write a default all-zero evaluation file
        #[arg(long = "init")]
        init: bool,

        /// Output scores in JSON format
        #[arg(long = "json")]
        json: bool,
    },

    /// Clone or update every repository in a list file
    Fetch {
        /// File with one repository URL per line (# comments allowed)
        list: PathBuf,

        /// Directory to clone into
        dest: PathBuf,
    },
}

/// Parse a window bound: a calendar date, an RFC 3339 timestamp, or a
/// humantime duration meaning "that long before now".
fn parse_date_or_duration(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .context("invalid calendar date")?;
        return Ok(midnight.and_utc());
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(duration) = humantime::parse_duration(s) {
        let duration = chrono::Duration::from_std(duration)
            .context("duration too large")?;
        return Ok(Utc::now() - duration);
    }
    bail!("cannot parse '{s}' as a date (YYYY-MM-DD), RFC 3339 timestamp, or duration (e.g. 7d)")
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let use_color = should_use_color(args.color);

    match args.command {
        CommandKind::Report {
            path,
            since,
            until,
            depth,
            exclude,
            no_lines,
            legacy_window,
            json,
        } => {
            let start = parse_date_or_duration(&since)
                .with_context(|| format!("invalid --since '{since}'"))?;
            let end = match until {
                Some(ref s) => parse_date_or_duration(s)
                    .with_context(|| format!("invalid --until '{s}'"))?,
                None => Utc::now(),
            };

            let repo = RepoStats::open(&path)?;
            let report = repo.generate_report(&ReportOptions {
                window: CommitWindow { start, end },
                stop_rule: if legacy_window {
                    StopRule::Legacy
                } else {
                    StopRule::BeforeStart
                },
                max_depth: depth,
                exclude_patterns: exclude,
                count_lines: !no_lines,
            })?;

            if json {
                output::print_json(&report)?;
            } else {
                output::print_report(&report, use_color)?;
            }
        }

        CommandKind::Tree {
            path,
            depth,
            exclude,
            json,
        } => {
            let walker = TreeWalker::new(WalkerConfig {
                max_depth: depth,
                exclude_patterns: exclude.clone(),
            })?;
            let structure = walker.walk(&path)?;

            if json {
                output::print_json(&structure)?;
            } else {
                let rendered = render_tree(&structure);
                output::print_tree(
                    &FileStructure {
                        structure,
                        rendered,
                        excluded_patterns: exclude,
                        max_depth: depth,
                    },
                    use_color,
                )?;
            }
        }

        CommandKind::Grade { path, init, json } => {
            let evaluator = Evaluator::new(&path);
            if init {
                if evaluator.file_path().exists() {
                    bail!(
                        "refusing to overwrite existing {}",
                        evaluator.file_path().display()
                    );
                }
                evaluator.save(&Evaluation::default())?;
                println!("created {}", evaluator.file_path().display());
                return Ok(());
            }

            let evaluation = evaluator.load()?;
            let scores = Scores::from_evaluation(&evaluation);
            if json {
                output::print_json(&scores)?;
            } else {
                output::print_scores(&scores, use_color)?;
            }
        }

        CommandKind::Fetch { list, dest } => {
            std::fs::create_dir_all(&dest)
                .with_context(|| format!("cannot create {}", dest.display()))?;
            let repos = fetch::read_repo_list(&list)?;
            let mut failures = 0;
            for (folder, url) in &repos {
                if let Err(e) = fetch::clone_or_update(url, &dest.join(folder)) {
                    warn!("{e}");
                    failures += 1;
                }
            }
            println!("fetched {} repositories", repos.len() - failures);
            if failures > 0 {
                bail!("{failures} repositories failed to fetch");
            }
        }
    }

    Ok(())
}
