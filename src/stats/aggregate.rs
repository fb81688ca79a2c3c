#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::collections::BTreeMap;

use serde::Serialize;

use crate::stats::record::Acknowledgement;

/// Running totals of one student.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PersonTotals {
    /// Name of the student.
    person:      String,
    /// Sum of all acknowledged points.
    point_sum:   f64,
    /// Graded submissions as `(unit, points)`, in log order.
    submissions: Vec<(u32, f64)>,
    /// Sum of all style points.
    style:       f64,
}

impl PersonTotals {
    /// Creates empty totals for `person`.
    pub fn new(person: impl Into<String>) -> Self {
        Self {
            person: person.into(),
            ..Self::default()
        }
    }

    /// Adds an acknowledgement. Ungraded acknowledgements change nothing.
    pub fn add(&mut self, ack: &Acknowledgement) {
        if let Some(points) = ack.points {
            self.point_sum += points;
            self.style += ack.style;
            self.submissions.push((ack.unit, points));
        }
    }

    /// Name of the student.
    pub fn person(&self) -> &str {
        &self.person
    }

    /// Sum of all acknowledged points.
    pub fn point_sum(&self) -> f64 {
        self.point_sum
    }

    /// Graded submissions as `(unit, points)`.
    pub fn submissions(&self) -> &[(u32, f64)] {
        &self.submissions
    }

    /// Number of graded submissions.
    pub fn submission_count(&self) -> usize {
        self.submissions.len()
    }

    /// Sum of all style points.
    pub fn style(&self) -> f64 {
        self.style
    }

    /// Average points per submission, 0 without submissions.
    pub fn average(&self) -> f64 {
        if self.submissions.is_empty() {
            0.0
        } else {
            self.submissions.iter().map(|(_, points)| points).sum::<f64>()
                / self.submissions.len() as f64
        }
    }
}

/// Totals of every student found in the log, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Roster {
    /// Totals keyed by the exact name used in commit messages.
    people:       BTreeMap<String, PersonTotals>,
    /// Highest unit any acknowledgement refers to.
    max_unit:     u32,
    /// Length of the longest name, in characters.
    max_name_len: usize,
}

impl Roster {
    /// Folds deduplicated acknowledgements into per-person totals.
    pub fn from_acknowledgements<I>(acknowledgements: I) -> Self
    where
        I: IntoIterator<Item = Acknowledgement>,
    {
        let mut roster = Self::default();
        for ack in acknowledgements {
            roster.add(&ack);
        }
        roster
    }

    /// Adds one acknowledgement, creating the person if needed.
    pub fn add(&mut self, ack: &Acknowledgement) {
        self.max_unit = self.max_unit.max(ack.unit);
        self.max_name_len = self.max_name_len.max(ack.person.chars().count());
        self.people
            .entry(ack.person.clone())
            .or_insert_with(|| PersonTotals::new(ack.person.as_str()))
            .add(ack);
    }

    /// Totals of every person, ordered by name.
    pub fn people(&self) -> impl Iterator<Item = &PersonTotals> {
        self.people.values()
    }

    /// Totals of `person`, if they appear in the log.
    pub fn get(&self, person: &str) -> Option<&PersonTotals> {
        self.people.get(person)
    }

    /// Number of people.
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// Whether no one appears in the log.
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Highest unit seen, 0 for an empty log.
    pub fn max_unit(&self) -> u32 {
        self.max_unit
    }

    /// Length of the longest name, in characters.
    pub fn max_name_len(&self) -> usize {
        self.max_name_len
    }
}

impl FromIterator<Acknowledgement> for Roster {
    fn from_iter<T: IntoIterator<Item = Acknowledgement>>(iter: T) -> Self {
        Self::from_acknowledgements(iter)
    }
}
