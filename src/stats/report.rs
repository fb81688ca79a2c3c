#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::Write as _;

use colored::Colorize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Columns},
};

use crate::{
    config::GradingPolicy,
    stats::{
        aggregate::Roster,
        projection::{Projection, Standing},
    },
    util::{format_float, format_general},
};

/// Header of the CSV listing.
pub const CSV_HEADER: &str = r#""Nachname","Punkte","Abgaben","bestanden""#;

/// Meaning of a highlighted value, independent of how it is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// No highlighting.
    Plain,
    /// Threshold reached.
    Passed,
    /// Threshold out of reach.
    CannotPass,
    /// Threshold unlikely to be reached.
    Warning,
    /// On track.
    Okay,
    /// Emphasised figure in running text.
    Emphasis,
}

impl From<Standing> for Tone {
    fn from(standing: Standing) -> Self {
        match standing {
            Standing::Passed => Tone::Passed,
            Standing::Failed => Tone::CannotPass,
            Standing::Unlikely => Tone::Warning,
            Standing::Okay => Tone::Okay,
        }
    }
}

/// Maps tones to ANSI styles, or to nothing at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// whether ANSI styles are emitted
    enabled: bool,
}

impl Palette {
    /// A palette that colors when `enabled` is set.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// A palette that never colors.
    pub fn plain() -> Self {
        Self::new(false)
    }

    /// Renders `text` in `tone`.
    pub fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.enabled {
            return text.to_string();
        }
        match tone {
            Tone::Plain => text.to_string(),
            Tone::Passed => text.green().bold().to_string(),
            Tone::CannotPass => text.red().bold().to_string(),
            Tone::Warning => text.bright_yellow().to_string(),
            Tone::Okay => text.bright_blue().to_string(),
            Tone::Emphasis => text.bold().to_string(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Settings of the human readable report.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Add a column with the standing of every student.
    pub show_state:   bool,
    /// Colors to use.
    pub palette:      Palette,
    /// Units concluded so far. Defaults to the highest unit in the log.
    pub current_unit: Option<u32>,
}

/// Renders the CSV listing: name, points, submissions and whether the
/// student passed.
pub fn render_csv(roster: &Roster, policy: &GradingPolicy) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{CSV_HEADER}");
    for person in roster.people() {
        let passed = if person.passed(policy) { "True" } else { "False" };
        let _ = writeln!(
            out,
            r#""{}","{}","{}","{}""#,
            person.person(),
            format_float(person.point_sum()),
            person.submission_count(),
            passed
        );
    }
    out
}

/// Running sums for the `total` row.
#[derive(Default)]
struct Totals {
    /// points of everyone
    points:         f64,
    /// sum of the averages
    average:        f64,
    /// submissions of everyone
    submissions:    usize,
    /// points missing, counting only students who can still pass by points
    missing_points: f64,
    /// submissions missing, counting only students who can still pass by
    /// submissions
    missing_subs:   usize,
    /// sum of the averages needed
    needed_average: f64,
    /// style points of everyone
    style:          f64,
}

/// Renders the human readable report: a short preamble, one row per student,
/// a total row and the average style points.
pub fn render_table(roster: &Roster, policy: &GradingPolicy, options: &ReportOptions) -> String {
    let palette = options.palette;
    let current_unit = options.current_unit.unwrap_or_else(|| roster.max_unit());
    let remaining = policy.remaining_units(current_unit);
    let min_points = policy.min_points();
    let min_subs = policy.min_submissions();
    let emph = |text: String| palette.paint(&text, Tone::Emphasis);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "The {}th unit out of {} has passed. Thus, {} are remaining.",
        emph(current_unit.to_string()),
        emph(policy.max_unit().to_string()),
        emph(remaining.to_string())
    );
    let _ = writeln!(
        out,
        "Currently, {} more points can be reached.",
        emph(format!("{:4.1}", remaining as f64 * policy.max_points_per_unit()))
    );
    let _ = writeln!(out, "Current results:");

    let mut header: Vec<String> = ["name", "pts", "rel", "avg", "miss", "avgneed", "units", "rel", "miss"]
        .into_iter()
        .map(String::from)
        .collect();
    if options.show_state {
        header.push("state".to_string());
    }

    let mut builder = Builder::default();
    builder.push_record(header);

    let mut totals = Totals::default();
    for person in roster.people() {
        let projection = Projection::new(person, policy, current_unit);
        let points = person.point_sum();
        let subs = person.submission_count();
        let state_tone = Tone::from(projection.standing);

        let mut points_tone = Tone::Plain;
        let mut missing_points_tone = Tone::Plain;
        if points >= min_points {
            points_tone = Tone::Passed;
        } else if !projection.can_pass_by_points {
            missing_points_tone = Tone::CannotPass;
        } else if !projection.may_pass_by_points {
            points_tone = Tone::Warning;
        }

        let mut subs_tone = Tone::Plain;
        let mut missing_subs_tone = Tone::Plain;
        if subs >= min_subs {
            subs_tone = Tone::Passed;
        } else if !projection.can_pass_by_subs {
            missing_subs_tone = Tone::CannotPass;
        }

        let missing_points = (min_points - points).max(0.0);
        let missing_subs = min_subs.saturating_sub(subs);
        let needed_average = if remaining > 0 {
            missing_points / remaining as f64
        } else {
            f64::NAN
        };

        let mut row = vec![
            palette.paint(person.person(), state_tone),
            palette.paint(&format_general(points, 4), points_tone),
            format_general(points / min_points, 2),
            format_general(projection.average, 3),
            palette.paint(&format_float(missing_points), missing_points_tone),
            palette.paint(&format_general(needed_average, 3), missing_points_tone),
            palette.paint(&subs.to_string(), subs_tone),
            format_general(subs as f64 / min_subs as f64, 2),
            palette.paint(&missing_subs.to_string(), missing_subs_tone),
        ];
        if options.show_state {
            row.push(palette.paint(&projection.standing.to_string(), state_tone));
        }
        builder.push_record(row);

        totals.points += points;
        totals.submissions += subs;
        totals.average += projection.average;
        if projection.can_pass_by_points {
            totals.missing_points += missing_points;
        }
        if projection.can_pass_by_subs {
            totals.missing_subs += missing_subs;
        }
        totals.needed_average += needed_average;
        totals.style += person.style();
    }

    if !roster.is_empty() {
        totals.average /= roster.len() as f64;
        totals.needed_average /= roster.len() as f64;
    }
    let needed_tone = if totals.needed_average > policy.max_points_per_unit() {
        Tone::CannotPass
    } else {
        Tone::Plain
    };

    let mut total_row = vec![
        "total".to_string(),
        format_general(totals.points, 4),
        format_float(f64::NAN),
        format_general(totals.average, 3),
        format_float(totals.missing_points),
        palette.paint(&format_general(totals.needed_average, 3), needed_tone),
        totals.submissions.to_string(),
        format_float(f64::NAN),
        totals.missing_subs.to_string(),
    ];
    if options.show_state {
        total_row.push(String::new());
    }
    builder.push_record(total_row);

    let table = builder
        .build()
        .with(Modify::new(Columns::new(1..9)).with(Alignment::right()))
        .with(Style::modern())
        .to_string();
    let _ = writeln!(out, "{table}");

    if totals.submissions > 0 {
        let _ = writeln!(
            out,
            "Average style points: {}",
            format_float(totals.style / totals.submissions as f64)
        );
    }

    out
}
