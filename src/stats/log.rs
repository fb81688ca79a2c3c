#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{ffi::OsString, path::Path};

use anyhow::Context;

use crate::{config, process::run_collect, util::git_path};

/// Errors while retrieving the commit log.
#[derive(thiserror::Error, Debug)]
pub enum LogError {
    /// `git log` exited unsuccessfully.
    #[error(
        "Git returned with a nonzero return code ({code}). Exiting and propagating return code.\n{stderr}"
    )]
    GitFailed {
        /// exit code of git, 1 if it was killed by a signal
        code:   i32,
        /// what git wrote to stderr
        stderr: String,
    },
    /// Anything else, e.g. git missing from `PATH`
    #[error(transparent)]
    Unknown(#[from] anyhow::Error),
}

impl LogError {
    /// Exit code the process should terminate with.
    pub fn exit_code(&self) -> i32 {
        match self {
            LogError::GitFailed { code, .. } => *code,
            LogError::Unknown(_) => 1,
        }
    }
}

/// Runs `git log --format=oneline` in `repo` (or the current directory) and
/// returns its output, newest commit first. Invalid UTF-8 is replaced.
pub async fn git_log(repo: Option<&Path>) -> Result<String, LogError> {
    let git = git_path()?;
    let args: Vec<OsString> = ["log", "--format=oneline"]
        .into_iter()
        .map(OsString::from)
        .collect();

    tracing::debug!("running git log in {:?}", repo);
    let collected = run_collect(git, &args, repo, Some(config::git_timeout())).await?;

    if !collected.status.success() {
        return Err(LogError::GitFailed {
            code:   collected.status.code().unwrap_or(1),
            stderr: String::from_utf8_lossy(&collected.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&collected.stdout).into_owned())
}

/// Reads a saved `git log --format=oneline` output. Invalid UTF-8 is
/// replaced.
pub fn read_log_file(path: &Path) -> anyhow::Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Could not read log file {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
