#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    cell::Cell,
    collections::HashSet,
    str::FromStr,
    time::Duration,
};

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Environment variable holding a comma separated list of exempt commit ids.
pub const EXEMPT_COMMITS_ENV: &str = "COURSEKIT_EXEMPT_COMMITS";

/// Thresholds that decide whether a student passes the course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(doc)]
pub struct GradingPolicy {
    /// Number of graded submissions required to pass.
    #[builder(default = 9)]
    min_submissions:     usize,
    /// First unit that is graded; earlier units are recorded without points.
    #[builder(default = 3)]
    min_unit:            u32,
    /// Last unit of the course.
    #[builder(default = 13)]
    max_unit:            u32,
    /// Maximum number of points a single submission can earn.
    #[builder(default = 6.0)]
    max_points_per_unit: f64,
    /// Maximum number of points reachable over the whole course.
    #[builder(default = 55.0)]
    max_points:          f64,
    /// Share of `max_points` needed to pass.
    #[builder(default = 0.6)]
    pass_ratio:          f64,
}

impl Default for GradingPolicy {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GradingPolicy {
    /// Builds a policy from `COURSEKIT_*` environment variables, falling back
    /// to the defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_submissions:     read_env("COURSEKIT_MIN_SUBMISSIONS", defaults.min_submissions),
            min_unit:            read_env("COURSEKIT_MIN_UNIT", defaults.min_unit),
            max_unit:            read_env("COURSEKIT_MAX_UNIT", defaults.max_unit),
            max_points_per_unit: read_env(
                "COURSEKIT_MAX_POINTS_PER_UNIT",
                defaults.max_points_per_unit,
            ),
            max_points:          read_env("COURSEKIT_MAX_POINTS", defaults.max_points),
            pass_ratio:          read_env("COURSEKIT_PASS_RATIO", defaults.pass_ratio),
        }
    }

    /// Number of graded submissions required to pass.
    pub fn min_submissions(&self) -> usize {
        self.min_submissions
    }

    /// First unit that carries points.
    pub fn min_unit(&self) -> u32 {
        self.min_unit
    }

    /// Last unit of the course.
    pub fn max_unit(&self) -> u32 {
        self.max_unit
    }

    /// Maximum number of points per submission.
    pub fn max_points_per_unit(&self) -> f64 {
        self.max_points_per_unit
    }

    /// Maximum number of points over the whole course.
    pub fn max_points(&self) -> f64 {
        self.max_points
    }

    /// Points required to pass.
    pub fn min_points(&self) -> f64 {
        self.max_points * self.pass_ratio
    }

    /// Units left after `current_unit`. Negative when the current unit lies
    /// beyond the configured last unit.
    pub fn remaining_units(&self, current_unit: u32) -> i64 {
        i64::from(self.max_unit) - i64::from(current_unit)
    }
}

/// Commits whose grading messages are skipped without a warning.
///
/// Ids are compared case-insensitively. Every hit is counted so a single
/// summary can be reported once a parse run is over.
#[derive(Debug, Default, Clone)]
pub struct Exemptions {
    /// Lowercased 40 character commit ids.
    commits: HashSet<String>,
    /// Number of lines skipped because of this list.
    hits:    Cell<usize>,
}

impl Exemptions {
    /// Creates an exemption list from commit ids.
    pub fn new<I, S>(commits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let commits = commits
            .into_iter()
            .map(|c| c.as_ref().trim().to_ascii_lowercase())
            .filter(|c| !c.is_empty())
            .collect();
        Self {
            commits,
            hits: Cell::new(0),
        }
    }

    /// Reads the comma separated list from [`EXEMPT_COMMITS_ENV`] and merges
    /// in `extra` ids, typically given on the command line.
    pub fn from_env_with(extra: &[String]) -> Self {
        let from_env = std::env::var(EXEMPT_COMMITS_ENV).unwrap_or_default();
        Self::new(from_env.split(',').map(str::to_owned).chain(extra.iter().cloned()))
    }

    /// Returns true and records a hit if `commit` is exempt.
    pub fn check(&self, commit: &str) -> bool {
        let exempt = self.contains(commit);
        if exempt {
            self.hits.set(self.hits.get() + 1);
        }
        exempt
    }

    /// Returns whether `commit` is on the list without recording a hit.
    pub fn contains(&self, commit: &str) -> bool {
        self.commits.contains(&commit.to_ascii_lowercase())
    }

    /// Number of lines skipped so far.
    pub fn hits(&self) -> usize {
        self.hits.get()
    }

    /// Number of commit ids on the list.
    pub fn len(&self) -> usize {
        self.commits.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

/// Timeout applied to the `git log` call.
pub fn git_timeout() -> Duration {
    Duration::from_secs(read_env("COURSEKIT_GIT_TIMEOUT_SECS", 60))
}

/// Parses an environment variable, falling back to `default` when parsing
/// fails or the variable is missing.
fn read_env<T: FromStr>(env: &str, default: T) -> T {
    std::env::var(env)
        .ok()
        .and_then(|value| value.trim().parse::<T>().ok())
        .unwrap_or(default)
}
