#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use itertools::Itertools;

use crate::stats::record::Acknowledgement;

/// Keeps only the first acknowledgement for every (unit, person) pair.
///
/// `git log` lists the newest commit first, so the first acknowledgement seen
/// is the one that superseded all others. Order is preserved and nothing is
/// consumed before the returned iterator is advanced.
pub fn latest_acknowledgements<I>(acknowledgements: I) -> impl Iterator<Item = Acknowledgement>
where
    I: IntoIterator<Item = Acknowledgement>,
{
    acknowledgements
        .into_iter()
        .unique_by(|ack| (ack.unit, ack.person.clone()))
}
