#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// One grading event read from a commit message: a correction, an amended
/// correction or an imported grade for one unit of one person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acknowledgement {
    /// Unit that was graded.
    pub unit:   u32,
    /// Name of the student, as written in the commit message.
    pub person: String,
    /// Points awarded. `None` for units that are not graded.
    pub points: Option<f64>,
    /// Style bonus contained in `points`.
    pub style:  f64,
}

impl Acknowledgement {
    /// Creates a new acknowledgement.
    pub fn new(unit: u32, person: impl Into<String>, points: Option<f64>, style: f64) -> Self {
        Self {
            unit,
            person: person.into(),
            points,
            style,
        }
    }

    /// Key used to find superseded acknowledgements.
    pub fn key(&self) -> (u32, &str) {
        (self.unit, self.person.as_str())
    }
}

impl Display for Acknowledgement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.points {
            Some(points) => write!(f, "{}/{}: {} pts", self.unit, self.person, points),
            None => write!(f, "{}/{}: ungraded", self.unit, self.person),
        }
    }
}
