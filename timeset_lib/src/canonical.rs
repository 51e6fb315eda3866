use crate::interval_sets::{Adjacency, IntervalSet};
use crate::intervals::{Interval, Remainder};
use crate::timestamps::Timestamp;
use itertools::Itertools;
use std::cmp::Ordering;

/// A set of intervals in canonical form.
///
/// The intervals are sorted by start, each has a positive duration and
/// there is a gap between any two of them: they neither overlap nor share a
/// boundary.
///
/// Such a set can only be obtained by normalizing an [`IntervalSet`], or as
/// the result of a set operation, so code receiving one can rely on that
/// invariant without checking.  Two canonical sets are equal when they
/// contain the same intervals, in the same order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CanonicalSet<T> {
    intervals: Vec<Interval<T>>,
}

/// Merge consecutive intervals, which must be sorted by start.
pub(crate) fn sweep<T: Timestamp>(
    sorted: impl Iterator<Item = Interval<T>>,
    adjacency: Adjacency,
) -> Vec<Interval<T>> {
    sorted
        .coalesce(|current, next| match adjacency.join(&current, &next) {
            Some(merged) => Ok(merged),
            None => Err((current, next)),
        })
        .collect()
}

impl<T> CanonicalSet<T> {
    /// The empty set
    #[must_use]
    pub fn new() -> Self {
        Self {
            intervals: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

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

    /// The earliest interval
    #[must_use]
    pub fn first(&self) -> Option<&Interval<T>> {
        self.intervals.first()
    }

    /// The latest interval
    #[must_use]
    pub fn last(&self) -> Option<&Interval<T>> {
        self.intervals.last()
    }

    /// Forget about the invariant, for instance to add more intervals
    #[must_use]
    pub fn into_set(self) -> IntervalSet<T> {
        IntervalSet::from_intervals(self.intervals)
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Interval<T>> {
        self.intervals
    }
}

impl<T: Timestamp> CanonicalSet<T> {
    /// The canonical form of intervals sorted by start
    pub(crate) fn from_sorted(sorted: impl Iterator<Item = Interval<T>>) -> Self {
        Self {
            intervals: sweep(sorted, Adjacency::Merge),
        }
    }

    /// Whether the point is in one of the intervals
    #[must_use]
    pub fn contains(&self, point: &T) -> bool {
        let idx = self.intervals.partition_point(|intv| intv.end() < point);
        self.intervals
            .get(idx)
            .is_some_and(|intv| intv.contains(point))
    }

    /// The sum of the durations of all intervals.  Since they do not
    /// overlap, this is the total time covered by the set.
    #[must_use]
    pub fn total_duration(&self) -> T::Duration {
        self.intervals
            .iter()
            .fold(T::zero_duration(), |total, intv| total + intv.duration())
    }

    /// The interval from the first start to the last end, including any gap
    #[must_use]
    pub fn span(&self) -> Option<Interval<T>> {
        self.intervals
            .first()
            .zip(self.intervals.last())
            .map(|(first, last)| first.hull(last))
    }

    /// All time covered by either set.
    /// Both sets are already sorted, so this only merges them and sweeps
    /// once.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::from_sorted(
            self.intervals.iter().merge(other.intervals.iter()).cloned(),
        )
    }

    /// All time covered by both sets.
    ///
    /// Walks both sets in parallel.  At each step, the interval that ends
    /// first cannot intersect anything further in the other set, so it is
    /// dropped.  A shared boundary point is not part of the result.
    /// ```txt
    ///     self:   [-----]   [---------]
    ///     other:     [--------]   [--]    [--]
    ///     result:    [--]   [-]   [--]
    /// ```
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut left = self.intervals.iter().peekable();
        let mut right = other.intervals.iter().peekable();
        let mut result = Vec::new();

        while let (Some(a), Some(b)) = (left.peek(), right.peek()) {
            if let Some(common) = a.intersect(b) {
                result.push(common);
            }
            let order = a.end().cmp(b.end());
            match order {
                Ordering::Less => {
                    left.next();
                }
                Ordering::Greater => {
                    right.next();
                }
                Ordering::Equal => {
                    left.next();
                    right.next();
                }
            }
        }

        Self { intervals: result }
    }

    /// All time covered by self but not by other.
    ///
    /// Each interval of self is cut by the intervals of other that overlap
    /// it, in order.  Intervals of other that end before the current one
    /// starts can never matter again, and are skipped for good.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        let mut fragments = Vec::new();
        let mut rest = other.intervals.as_slice();

        for a in &self.intervals {
            while let Some((b, tail)) = rest.split_first() {
                if b.end() > a.start() {
                    break;
                }
                rest = tail;
            }

            // The part of `a` not yet compared with later intervals of other
            let mut remaining = Some(a.clone());
            for b in rest.iter().take_while(|b| b.start() < a.end()) {
                let Some(current) = remaining.take() else {
                    break;
                };
                match current.subtract(b) {
                    Remainder::Empty => {}
                    Remainder::One(piece) if piece.end() <= b.start() => {
                        log::trace!("fragment {piece:?}");
                        fragments.push(piece);
                    }
                    Remainder::One(piece) => remaining = Some(piece),
                    Remainder::Two(before, after) => {
                        log::trace!("fragment {before:?}");
                        fragments.push(before);
                        remaining = Some(after);
                    }
                }
            }
            if let Some(piece) = remaining {
                log::trace!("fragment {piece:?}");
                fragments.push(piece);
            }
        }

        IntervalSet::from_intervals(fragments).normalize()
    }

    /// Remove a single interval from the set
    #[must_use]
    pub fn subtract_interval(&self, interval: &Interval<T>) -> Self {
        self.difference(&Self {
            intervals: vec![interval.clone()],
        })
    }

    /// Restrict the set to the window `[start, end]`.  A bound of None leaves
    /// that side unconstrained.
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

impl<T> Default for CanonicalSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Timestamp> From<Interval<T>> for CanonicalSet<T> {
    /// A single interval is always canonical
    fn from(interval: Interval<T>) -> Self {
        Self {
            intervals: vec![interval],
        }
    }
}

impl<T> From<CanonicalSet<T>> for IntervalSet<T> {
    fn from(set: CanonicalSet<T>) -> Self {
        set.into_set()
    }
}

impl<T> IntoIterator for CanonicalSet<T> {
    type Item = Interval<T>;
    type IntoIter = std::vec::IntoIter<Interval<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a CanonicalSet<T> {
    type Item = &'a Interval<T>;
    type IntoIter = std::slice::Iter<'a, Interval<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

///  &CanonicalSet | &CanonicalSet
impl<T: Timestamp> std::ops::BitOr<&CanonicalSet<T>> for &CanonicalSet<T> {
    type Output = CanonicalSet<T>;

    /// Same as [`CanonicalSet::union()`]
    fn bitor(self, rhs: &CanonicalSet<T>) -> Self::Output {
        self.union(rhs)
    }
}

///  &CanonicalSet & &CanonicalSet
impl<T: Timestamp> std::ops::BitAnd<&CanonicalSet<T>> for &CanonicalSet<T> {
    type Output = CanonicalSet<T>;

    /// Same as [`CanonicalSet::intersection()`]
    fn bitand(self, rhs: &CanonicalSet<T>) -> Self::Output {
        self.intersection(rhs)
    }
}

///  &CanonicalSet - &CanonicalSet
impl<T: Timestamp> std::ops::Sub<&CanonicalSet<T>> for &CanonicalSet<T> {
    type Output = CanonicalSet<T>;

    /// Same as [`CanonicalSet::difference()`]
    fn sub(self, rhs: &CanonicalSet<T>) -> Self::Output {
        self.difference(rhs)
    }
}

impl<T: std::fmt::Display> std::fmt::Display for CanonicalSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.intervals.iter().join(", "))
    }
}
