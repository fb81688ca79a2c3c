#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::Display;

use serde::Serialize;

use crate::{config::GradingPolicy, stats::aggregate::PersonTotals};

/// Where a student stands. Checked in declaration order: a student who passed
/// is never reported as failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    /// Enough points and enough submissions.
    Passed,
    /// Can no longer pass, whatever happens in the remaining units.
    Failed,
    /// Will not pass by keeping up the current average.
    Unlikely,
    /// On track.
    Okay,
}

impl Display for Standing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Standing::Passed => "passed",
            Standing::Failed => "failed",
            Standing::Unlikely => "unlikely",
            Standing::Okay => "okay",
        };
        f.write_str(label)
    }
}

impl PersonTotals {
    /// Whether both the point and the submission threshold are reached.
    pub fn passed(&self, policy: &GradingPolicy) -> bool {
        self.point_sum() >= policy.min_points()
            && self.submission_count() >= policy.min_submissions()
    }

    /// Whether passing is still possible, as `(by_submissions, by_points)`.
    ///
    /// Assumes full marks in every remaining unit.
    pub fn can_pass(&self, policy: &GradingPolicy, current_unit: u32) -> (bool, bool) {
        let remaining = policy.remaining_units(current_unit);
        let submissions = self.submission_count() as i64;
        let by_submissions = policy.min_submissions() as i64 - (submissions + remaining) <= 0;
        let by_points = (self.point_sum() - policy.min_points())
            + remaining as f64 * policy.max_points_per_unit()
            >= 0.0;
        (by_submissions, by_points)
    }

    /// Average points per submission, and whether keeping that average over
    /// the remaining units closes the gap to the point threshold.
    pub fn may_pass(&self, policy: &GradingPolicy, current_unit: u32) -> (f64, bool) {
        let remaining = policy.remaining_units(current_unit);
        let average = self.average();
        let closes_gap = policy.min_points() - self.point_sum() <= remaining as f64 * average;
        (average, closes_gap)
    }
}

/// Forward-looking assessment of one student at a given unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projection {
    /// Both thresholds reached.
    pub passed:             bool,
    /// Enough units left to reach the submission threshold.
    pub can_pass_by_subs:   bool,
    /// Enough points left to reach the point threshold.
    pub can_pass_by_points: bool,
    /// Average points per submission so far.
    pub average:            f64,
    /// The current average is enough to reach the point threshold.
    pub may_pass_by_points: bool,
    /// Resulting standing.
    pub standing:           Standing,
}

impl Projection {
    /// Projects `totals` after `current_unit` units.
    pub fn new(totals: &PersonTotals, policy: &GradingPolicy, current_unit: u32) -> Self {
        let passed = totals.passed(policy);
        let (can_pass_by_subs, can_pass_by_points) = totals.can_pass(policy, current_unit);
        let (average, may_pass_by_points) = totals.may_pass(policy, current_unit);

        let standing = if passed {
            Standing::Passed
        } else if !(can_pass_by_subs && can_pass_by_points) {
            Standing::Failed
        } else if !may_pass_by_points {
            Standing::Unlikely
        } else {
            Standing::Okay
        };

        Self {
            passed,
            can_pass_by_subs,
            can_pass_by_points,
            average,
            may_pass_by_points,
            standing,
        }
    }
}
