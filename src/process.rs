#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    ffi::{OsStr, OsString},
    path::Path,
    process::{Output, Stdio},
    time::Duration,
};

use anyhow::{Context, Result};
use tokio::{process::Command, time::timeout};

/// Runs `program` with a closed stdin and collects its exit status, stdout
/// and stderr.
///
/// * `cwd`: directory to run in, the current one if `None`
/// * `deadline`: kill the process if it has not finished in time
///
/// The child is killed when the returned future is dropped early.
pub async fn run_collect(
    program: impl AsRef<OsStr>,
    args: &[OsString],
    cwd: Option<&Path>,
    deadline: Option<Duration>,
) -> Result<Output> {
    let program = program.as_ref();
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let child = cmd
        .spawn()
        .with_context(|| format!("failed to spawn {}", program.to_string_lossy()))?;
    let output = child.wait_with_output();

    let output = match deadline {
        Some(limit) => timeout(limit, output).await.with_context(|| {
            format!("{} timed out after {}s", program.to_string_lossy(), limit.as_secs())
        })?,
        None => output.await,
    };

    output.with_context(|| format!("failed to wait on {}", program.to_string_lossy()))
}
