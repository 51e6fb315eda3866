use crate::canonical::{sweep, CanonicalSet};
use crate::intervals::Interval;
use crate::timestamps::Timestamp;
use itertools::Itertools;

/// Which intervals get merged when normalizing a set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Adjacency {
    /// Intervals that overlap or share a boundary point are merged, so
    /// `[1, 3]` and `[3, 5]` become `[1, 5]`.  This is what the set algebra
    /// uses.
    #[default]
    Merge,

    /// Only intervals with some time in common are merged.  `[1, 3]` and
    /// `[3, 5]` stay separate.
    Separate,
}

impl Adjacency {
    /// Merge the two intervals if this policy allows it
    pub(crate) fn join<T: Timestamp>(
        self,
        current: &Interval<T>,
        next: &Interval<T>,
    ) -> Option<Interval<T>> {
        match self {
            Adjacency::Merge => current.merge(next),
            Adjacency::Separate => {
                current.overlaps(next).then(|| current.hull(next))
            }
        }
    }
}

/// An arbitrary collection of intervals.
///
/// No invariant is imposed: intervals may overlap, be duplicated or come in
/// any order.  [`IntervalSet::normalize`] returns the equivalent
/// [`CanonicalSet`], and all the set operations below work on that canonical
/// form.
///
/// Two sets are equal when their canonical forms are equal, even if the
/// intervals they were built from differ.
#[derive(Clone, Debug)]
pub struct IntervalSet<T> {
    intervals: Vec<Interval<T>>,
}

impl<T> IntervalSet<T> {
    /// An empty set
    #[must_use]
    pub fn new() -> Self {
        Self {
            intervals: Vec::new(),
        }
    }

    /// Hold the given intervals as is
    #[must_use]
    pub fn from_intervals(intervals: Vec<Interval<T>>) -> Self {
        Self { intervals }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Number of intervals, before normalization
    #[must_use]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval<T>> {
        self.intervals.iter()
    }

    #[must_use]
    pub fn intervals(&self) -> &[Interval<T>] {
        &self.intervals
    }

    /// Add one more interval, without normalizing
    pub fn push(&mut self, interval: Interval<T>) {
        self.intervals.push(interval);
    }

    /// Same as [`IntervalSet::push`], but returns a new set
    #[must_use]
    pub fn with(mut self, interval: Interval<T>) -> Self {
        self.intervals.push(interval);
        self
    }

    /// All intervals from both sets, without normalizing
    #[must_use]
    pub fn concat(mut self, other: Self) -> Self {
        self.intervals.extend(other.intervals);
        self
    }
}

impl<T: Timestamp> IntervalSet<T> {
    /// Merge the intervals into their canonical form: sorted by start then
    /// end, with no two intervals overlapping or touching.
    /// ```
    /// use timeset_lib::{Interval, IntervalSet};
    /// let set = IntervalSet::from_intervals(vec![
    ///     Interval::new(5, 8).unwrap(),
    ///     Interval::new(1, 3).unwrap(),
    ///     Interval::new(3, 4).unwrap(),
    /// ]);
    /// let canonical = set.normalize();
    /// assert_eq!(
    ///     canonical.intervals(),
    ///     [Interval::new(1, 4).unwrap(), Interval::new(5, 8).unwrap()],
    /// );
    /// ```
    #[must_use]
    pub fn normalize(&self) -> CanonicalSet<T> {
        let result =
            CanonicalSet::from_sorted(self.intervals.iter().cloned().sorted());
        log::debug!(
            "normalized {} intervals into {}",
            self.intervals.len(),
            result.len()
        );
        result
    }

    /// Sort the intervals and merge them as the policy allows.
    ///
    /// With [`Adjacency::Separate`] the result may still hold intervals that
    /// share a boundary, so it is not a [`CanonicalSet`].  It is sorted and
    /// has no overlap, and compares equal to the original set.
    #[must_use]
    pub fn normalize_with(&self, adjacency: Adjacency) -> Self {
        Self {
            intervals: sweep(self.intervals.iter().cloned().sorted(), adjacency),
        }
    }

    /// All time covered by either set
    #[must_use]
    pub fn union(&self, other: &Self) -> CanonicalSet<T> {
        self.clone().concat(other.clone()).normalize()
    }

    /// All time covered by both sets
    #[must_use]
    pub fn intersection(&self, other: &Self) -> CanonicalSet<T> {
        self.normalize().intersection(&other.normalize())
    }

    /// All time covered by self but not by other
    #[must_use]
    pub fn difference(&self, other: &Self) -> CanonicalSet<T> {
        self.normalize().difference(&other.normalize())
    }

    /// The time shared by every interval in the set.  This is None when the
    /// set is empty, or when two of its intervals have no time in common.
    #[must_use]
    pub fn common_intersection(&self) -> Option<Interval<T>> {
        let mut iter = self.intervals.iter();
        let first = iter.next()?.clone();
        iter.try_fold(first, |acc, intv| acc.intersect(intv))
    }

    /// Restrict every interval to the given window.  A bound of None leaves
    /// that side unconstrained.  Intervals that end up empty are dropped, and
    /// the result is not normalized.
    #[must_use]
    pub fn clamp_to(&self, start: Option<&T>, end: Option<&T>) -> Self {
        Self {
            intervals: self
                .intervals
                .iter()
                .filter_map(|intv| intv.clamp_to(start, end))
                .collect(),
        }
    }
}

impl<T> Default for IntervalSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Timestamp> PartialEq for IntervalSet<T> {
    /// True if the two sets cover the same time
    fn eq(&self, other: &Self) -> bool {
        self.normalize() == other.normalize()
    }
}

impl<T: Timestamp> Eq for IntervalSet<T> {}

impl<T> From<Interval<T>> for IntervalSet<T> {
    fn from(interval: Interval<T>) -> Self {
        Self {
            intervals: vec![interval],
        }
    }
}

impl<T> From<Vec<Interval<T>>> for IntervalSet<T> {
    fn from(intervals: Vec<Interval<T>>) -> Self {
        Self { intervals }
    }
}

impl<T> FromIterator<Interval<T>> for IntervalSet<T> {
    fn from_iter<I: IntoIterator<Item = Interval<T>>>(iter: I) -> Self {
        Self {
            intervals: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<Interval<T>> for IntervalSet<T> {
    fn extend<I: IntoIterator<Item = Interval<T>>>(&mut self, iter: I) {
        self.intervals.extend(iter);
    }
}

impl<T> IntoIterator for IntervalSet<T> {
    type Item = Interval<T>;
    type IntoIter = std::vec::IntoIter<Interval<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a IntervalSet<T> {
    type Item = &'a Interval<T>;
    type IntoIter = std::slice::Iter<'a, Interval<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

///   IntervalSet + Interval
impl<T> std::ops::Add<Interval<T>> for IntervalSet<T> {
    type Output = IntervalSet<T>;

    /// Same as [`IntervalSet::with()`]
    fn add(self, rhs: Interval<T>) -> Self::Output {
        self.with(rhs)
    }
}

///   IntervalSet + IntervalSet
impl<T> std::ops::Add for IntervalSet<T> {
    type Output = IntervalSet<T>;

    /// Same as [`IntervalSet::concat()`]
    fn add(self, rhs: IntervalSet<T>) -> Self::Output {
        self.concat(rhs)
    }
}

impl<T: std::fmt::Display> std::fmt::Display for IntervalSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.intervals.iter().join(", "))
    }
}
