//! Partitioning cases into per-status buckets.

use crate::case::Case;
use crate::status::AutomationStatus;

/// Cases grouped by automation status.
///
/// Storage is a fixed table indexed by status code, so every status always
/// has a (possibly empty) bucket. Within a bucket, cases keep their input
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Buckets {
    slots: [Vec<Case>; 5],
    dropped: usize,
}

impl Buckets {
    /// Cases classified under `status`.
    pub fn get(&self, status: AutomationStatus) -> &[Case] {
        &self.slots[status.index()]
    }

    /// Number of cases classified under `status`.
    pub fn count(&self, status: AutomationStatus) -> usize {
        self.slots[status.index()].len()
    }

    /// Number of cases that landed in some bucket.
    pub fn classified(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }

    /// Number of input cases with a missing or unrecognised status.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Iterate `(status, cases)` pairs in status code order.
    pub fn iter(&self) -> impl Iterator<Item = (AutomationStatus, &[Case])> + '_ {
        AutomationStatus::ALL
            .into_iter()
            .map(move |status| (status, self.get(status)))
    }

    fn push(&mut self, status: AutomationStatus, case: Case) {
        self.slots[status.index()].push(case);
    }
}

/// Classify cases by their automation status in a single pass.
///
/// Cases whose status is missing or outside `1..=5` are not placed in any
/// bucket; they are only counted in [`Buckets::dropped`].
pub fn classify<I>(cases: I) -> Buckets
where
    I: IntoIterator<Item = Case>,
{
    let mut buckets = Buckets::default();
    for case in cases {
        match case.automation_status() {
            Some(status) => buckets.push(status, case),
            None => buckets.dropped += 1,
        }
    }
    buckets
}
