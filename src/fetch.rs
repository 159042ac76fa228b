//! Repository list parsing and clone/update via the git CLI

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::info;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("repository list not found: {0}")]
    ListNotFound(PathBuf),
    #[error("failed to read repository list: {0}")]
    Io(#[from] std::io::Error),
    #[error("git {operation} failed for {target}: {stderr}")]
    GitCommand {
        operation: &'static str,
        target: String,
        stderr: String,
    },
}

/// Parse a repository list: one URL per line, blank lines and `#` comments
/// skipped. Each URL gets a stable `repoNN` folder name by line position.
pub fn read_repo_list(path: &Path) -> Result<BTreeMap<String, String>, FetchError> {
    if !path.is_file() {
        return Err(FetchError::ListNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let repos = content
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                None
            } else {
                Some((format!("repo{:02}", i + 1), line.to_string()))
            }
        })
        .collect();
    Ok(repos)
}

/// Clone a repository into `folder`, or pull if it already exists.
pub fn clone_or_update(url: &str, folder: &Path) -> Result<(), FetchError> {
    let folder_str = folder.to_string_lossy();
    if folder.is_dir() {
        info!("repository {} already exists, updating", folder.display());
        run_git("pull", url, &["-C", folder_str.as_ref(), "pull"])
    } else {
        info!("cloning {} into {}", url, folder.display());
        run_git("clone", url, &["clone", url, folder_str.as_ref()])
    }
}

fn run_git(operation: &'static str, target: &str, args: &[&str]) -> Result<(), FetchError> {
    let output = Command::new("git").args(args).output()?;
    if output.status.success() {
        Ok(())
    } else {
        Err(FetchError::GitCommand {
            operation,
            target: target.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_read_repo_list_skips_blanks_and_comments() {
        let dir = TempDir::new().unwrap();
        let list = dir.path().join("repos");
        fs::write(
            &list,
            "# class of 2025\n\
             https://example.com/a.git\n\
             \n\
             https://example.com/b.git\n\
             # trailing comment\n",
        )
        .unwrap();

        let repos = read_repo_list(&list).unwrap();
        assert_eq!(repos.len(), 2);
        // Keys follow line positions, so gaps from skipped lines remain.
        assert_eq!(repos.get("repo02").unwrap(), "https://example.com/a.git");
        assert_eq!(repos.get("repo04").unwrap(), "https://example.com/b.git");
    }

    #[test]
    fn test_read_repo_list_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = read_repo_list(&dir.path().join("absent"));
        assert!(matches!(result, Err(FetchError::ListNotFound(_))));
    }

    #[test]
    fn test_clone_from_local_path() {
        // A local bare-ish source repo is enough to exercise the clone path.
        let source = TempDir::new().unwrap();
        let run = |args: &[&str]| {
            Command::new("git")
                .args(args)
                .current_dir(source.path())
                .output()
                .unwrap()
        };
        run(&["init"]);
        run(&["config", "user.email", "test@test.com"]);
        run(&["config", "user.name", "Test"]);
        fs::write(source.path().join("f.txt"), "hello").unwrap();
        run(&["add", "f.txt"]);
        run(&["commit", "-m", "init"]);

        let dest_root = TempDir::new().unwrap();
        let dest = dest_root.path().join("clone");
        clone_or_update(&source.path().to_string_lossy(), &dest).unwrap();
        assert!(dest.join("f.txt").exists());

        // Second call takes the update path.
        clone_or_update(&source.path().to_string_lossy(), &dest).unwrap();
    }

    #[test]
    fn test_clone_failure_reports_stderr() {
        let dest_root = TempDir::new().unwrap();
        let dest = dest_root.path().join("clone");
        let result = clone_or_update("/definitely/not/a/repo", &dest);
        assert!(matches!(result, Err(FetchError::GitCommand { .. })));
    }
}
