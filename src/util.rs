#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    time::SystemTime,
};

use anyhow::{Context, Result};
use glob::{Pattern, glob};
use which::which;

/// Finds and returns the path to the git binary
pub fn git_path() -> Result<OsString> {
    which("git")
        .map(PathBuf::into_os_string)
        .context("Cannot find git on path")
}

/// Lists every entry directly inside `dir`, files and directories alike.
pub fn list_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pattern = PathBuf::from(Pattern::escape(
        dir.to_str()
            .context("Could not convert directory path to string")?,
    ));
    pattern.push("*");
    let pattern = pattern
        .to_str()
        .context("Could not convert glob pattern to string")?
        .to_string();

    Ok(glob(&pattern)
        .context("Could not create glob")?
        .filter_map(Result::ok)
        .collect())
}

/// Last modification time of `path`.
pub fn file_timestamp(path: &Path) -> Result<SystemTime> {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .with_context(|| format!("Could not read modification time of {}", path.display()))
}

/// Sets the modification time of `path`.
pub fn set_file_timestamp(path: &Path, time: SystemTime) -> Result<()> {
    std::fs::File::options()
        .write(true)
        .open(path)
        .and_then(|f| f.set_modified(time))
        .with_context(|| format!("Could not set modification time of {}", path.display()))
}

/// Formats a float the way `repr` does in most scripting languages: always
/// with a fractional part, shortest round-trip digits.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        "nan".into()
    } else if value.is_infinite() {
        if value > 0.0 { "inf".into() } else { "-inf".into() }
    } else {
        format!("{value:?}")
    }
}

/// Formats a float with `precision` significant digits.
///
/// Fixed notation keeps at least one digit after the decimal point and drops
/// other trailing zeros; very small or large values switch to scientific
/// notation (`1e+02`).
pub fn format_general(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return format_float(value);
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 - 1 {
        let mantissa = trim_fraction(mantissa);
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        let fixed = format!("{value:.decimals$}");
        let fixed = trim_fraction(&fixed);
        if fixed.contains('.') {
            fixed.to_string()
        } else {
            format!("{fixed}.0")
        }
    }
}

/// Drops trailing zeros of a fractional part, and the point if nothing is
/// left after it.
fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
