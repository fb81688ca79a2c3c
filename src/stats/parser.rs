#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use crate::{
    config::{Exemptions, GradingPolicy},
    stats::record::Acknowledgement,
};

/// Grading verb at the start of a commit message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `Corrected 4/Name: ...`
    Corrected,
    /// `Amended correction of 4/Name: ...`
    AmendedCorrection,
    /// `Imported 4/Name: ...`
    Imported,
}

/// Fields of a strictly formatted grading commit, borrowed from the log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradingLine<'a> {
    /// 40 character commit id.
    pub commit:  &'a str,
    /// Grading verb.
    pub action:  Action,
    /// Unit that was graded.
    pub unit:    u32,
    /// Name of the student.
    pub person:  &'a str,
    /// Base points and style points of an `A + B =` expression, unparsed.
    pub addends: Option<(&'a str, &'a str)>,
    /// Final point total, unparsed.
    pub total:   Option<&'a str>,
}

peg::parser! {
    /// grammars for lines of `git log --format=oneline` in a grading repository.
    pub grammar parser() for str {
        /// matches one character that may be part of a word
        rule word_char() = [c if c.is_alphanumeric() || c == '_']

        /// matches one character that may not be part of a word
        rule non_word_char() = [c if !(c.is_alphanumeric() || c == '_')]

        /// matches one whitespace character
        rule space() = quiet!{[c if c.is_whitespace()]}

        /// matches a 40 character hex commit id
        rule commit_id() -> &'input str
            = $(['0'..='9' | 'a'..='f' | 'A'..='F']*<40>)

        /// matches a run of letters equal to `lit`, ignoring case
        rule keyword(lit: &'static str)
            = w:$(['a'..='z' | 'A'..='Z']+)
            {? if w.eq_ignore_ascii_case(lit) { Ok(()) } else { Err(lit) } }

        /// matches a run of letters starting with `lit`, ignoring case
        rule keyword_prefix(lit: &'static str)
            = w:$(['a'..='z' | 'A'..='Z']+)
            {?
                if w.len() >= lit.len() && w[..lit.len()].eq_ignore_ascii_case(lit) {
                    Ok(())
                } else {
                    Err(lit)
                }
            }

        /// "Amended", including its common misspelling
        rule amended() = keyword("amended") / keyword("ammended")

        /// matches the grading verb of a strictly formatted commit
        rule action() -> Action
            = amended() " " keyword("correction") (" " keyword("of"))? { Action::AmendedCorrection }
            / keyword("corrected") { Action::Corrected }
            / keyword("imported") { Action::Imported }

        /// matches a one or two digit unit number
        rule unit() -> u32
            = n:$(['0'..='9']*<1,2>) {? n.parse().or(Err("unit")) }

        /// matches a single word naming a student
        rule person() -> &'input str
            = $(word_char()+)

        /// matches `UNIT/NAME` as well as `NAME/UNIT`
        rule target() -> (u32, &'input str)
            = unit:unit() "/" person:person() { (unit, person) }
            / person:person() "/" unit:unit() { (unit, person) }

        /// matches a decimal number, validated later
        rule number() -> &'input str
            = $(['0'..='9' | '.']+)

        /// matches `A + B =`
        rule addends() -> (&'input str, &'input str)
            = base:number() space()* "+" space()* style:number() space()* "="
            { (base, style) }

        /// parses a strictly formatted grading commit
        pub rule grading_line() -> GradingLine<'input>
            = commit:commit_id() " " action:action() ":"? " " target:target()
              non_word_char()? space()*
              addends:addends()? space()*
              total:number()?
              [_]*
            {
                GradingLine {
                    commit,
                    action,
                    unit: target.0,
                    person: target.1,
                    addends,
                    total,
                }
            }

        /// matches anything that looks like a grading commit
        pub rule looks_like_grading()
            = commit_id() " "
              (
                  amended() " " keyword_prefix("correction")
                  / keyword_prefix("corrected")
                  / keyword_prefix("imported")
              )
              [_]*

        /// matches merges, plain submissions and commits marked `[ignore]`
        pub rule ignored()
            = commit_id() " "
              (
                  keyword_prefix("merge")
                  / (amended() " ")? keyword_prefix("submission")
                  / "[" keyword("ignore") "]"
              )
              [_]*

        /// returns the commit id a line starts with
        pub rule leading_commit() -> &'input str
            = c:commit_id() [_]* { c }
    }
}

/// A grading commit that cannot be turned into an acknowledgement. Statistics
/// are not trustworthy until the commit message is fixed.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The line looks like a grading commit but does not follow the grammar.
    #[error("No match on required line: {line}")]
    Malformed {
        /// offending log line
        line: String,
    },
    /// The line names neither a total nor an `A + B =` expression.
    #[error("No points given for {unit}/{person}: {line}")]
    MissingPoints {
        /// unit named in the line
        unit:   u32,
        /// person named in the line
        person: String,
        /// offending log line
        line:   String,
    },
    /// A point value is not a number.
    #[error("Could not read `{value}` as points: {line}")]
    InvalidPoints {
        /// text that failed to parse
        value: String,
        /// offending log line
        line:  String,
    },
}

/// What a single log line contributes to the statistics.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// Blank lines, merges, submissions and `[ignore]` commits.
    Noise,
    /// The commit is on the exemption list.
    Exempt {
        /// exempt commit id
        commit: String,
    },
    /// Not a grading commit, not noise either. Worth a warning.
    Unrecognized,
    /// A grading commit awarding exactly zero points.
    ZeroPoints {
        /// commit id of the acknowledgement
        commit: String,
    },
    /// A grading commit.
    Parsed(Acknowledgement),
}

/// Turns commit log lines into acknowledgements.
pub struct CommitRecordParser<'a> {
    /// thresholds, used to find ungraded units
    policy:     &'a GradingPolicy,
    /// commits to skip silently
    exemptions: &'a Exemptions,
}

impl<'a> CommitRecordParser<'a> {
    /// Creates a parser using `policy` and `exemptions`.
    pub fn new(policy: &'a GradingPolicy, exemptions: &'a Exemptions) -> Self {
        Self { policy, exemptions }
    }

    /// Classifies a single log line.
    ///
    /// Grading commits are tried first, then exemptions, then the ignore
    /// grammar. Only a line that looks like a grading commit but does not
    /// parse is an error.
    pub fn parse_line(&self, line: &str) -> Result<LineOutcome, ParseError> {
        if line.trim().is_empty() {
            return Ok(LineOutcome::Noise);
        }

        if parser::looks_like_grading(line).is_ok() {
            if let Some(commit) = self.exempt_commit(line) {
                return Ok(LineOutcome::Exempt { commit });
            }
            let grading = parser::grading_line(line).map_err(|_| ParseError::Malformed {
                line: line.to_string(),
            })?;
            return self.acknowledge(grading, line);
        }

        if parser::ignored(line).is_ok() {
            return Ok(LineOutcome::Noise);
        }

        match self.exempt_commit(line) {
            Some(commit) => Ok(LineOutcome::Exempt { commit }),
            None => Ok(LineOutcome::Unrecognized),
        }
    }

    /// Parses a complete newest-first log, reporting skipped lines as it
    /// goes. Stops at the first malformed grading commit.
    pub fn parse_log(&self, log: &str) -> Result<Vec<Acknowledgement>, ParseError> {
        let hits_before = self.exemptions.hits();
        let mut acknowledgements = Vec::new();

        for line in log.lines() {
            match self.parse_line(line)? {
                LineOutcome::Parsed(ack) => acknowledgements.push(ack),
                LineOutcome::Unrecognized => {
                    tracing::warn!("Line does not match loose match, ignoring:\n{line}")
                }
                LineOutcome::ZeroPoints { commit } => {
                    tracing::info!("Not acknowledging {commit}. Zero points.")
                }
                LineOutcome::Noise | LineOutcome::Exempt { .. } => {}
            }
        }

        let exempt = self.exemptions.hits() - hits_before;
        if exempt > 0 {
            tracing::info!("Ignored {exempt} commits which were on the whitelist.");
        }

        Ok(acknowledgements)
    }

    /// Returns the commit id of `line` if it is exempt, counting the hit.
    fn exempt_commit(&self, line: &str) -> Option<String> {
        parser::leading_commit(line)
            .ok()
            .filter(|commit| self.exemptions.check(commit))
            .map(str::to_string)
    }

    /// Resolves the point expression of a grading line.
    fn acknowledge(&self, grading: GradingLine<'_>, line: &str) -> Result<LineOutcome, ParseError> {
        if grading.unit < self.policy.min_unit() {
            return Ok(LineOutcome::Parsed(Acknowledgement::new(
                grading.unit,
                grading.person,
                None,
                0.0,
            )));
        }

        let (points, style) = match (grading.addends, grading.total) {
            (Some((base, style)), total) => {
                let base = read_points(base, line)?;
                let style = read_points(style, line)?;
                let points = match total {
                    Some(total) => {
                        let total = read_points(total, line)?;
                        if (base + style - total).abs() > f64::EPSILON * total.abs().max(1.0) {
                            tracing::warn!(
                                "{}/{}: {base} + {style} does not add up to {total}, using {total}",
                                grading.unit,
                                grading.person
                            );
                        }
                        total
                    }
                    None => base + style,
                };
                (points, style)
            }
            (None, Some(total)) => (read_points(total, line)?, 0.0),
            (None, None) => {
                return Err(ParseError::MissingPoints {
                    unit:   grading.unit,
                    person: grading.person.to_string(),
                    line:   line.to_string(),
                });
            }
        };

        if points == 0.0 {
            return Ok(LineOutcome::ZeroPoints {
                commit: grading.commit.to_string(),
            });
        }

        Ok(LineOutcome::Parsed(Acknowledgement::new(
            grading.unit,
            grading.person,
            Some(points),
            style,
        )))
    }
}

/// Parses a point value captured by the grammar.
fn read_points(value: &str, line: &str) -> Result<f64, ParseError> {
    value.parse::<f64>().map_err(|_| ParseError::InvalidPoints {
        value: value.to_string(),
        line:  line.to_string(),
    })
}
