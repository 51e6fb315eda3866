use crate::errors::{Error, Result};
use crate::timestamps::{ParseTimestamp, Timestamp};

/// A closed range of time `[start, end]`, with `start < end`.
///
/// Intervals are values: none of the operations below modify self, they
/// all return new intervals.  The invariant is checked once, when the
/// interval is created, so every interval has a positive duration.
///
/// The derived ordering compares starts first, then ends.  This is the
/// order used for normalization.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        try_from = "RawInterval<T>",
        bound(deserialize = "T: Timestamp + serde::Deserialize<'de>")
    )
)]
pub struct Interval<T> {
    start: T,
    end: T,
}

impl<T: Timestamp> Interval<T> {
    /// Construct the interval `[start, end]`.
    /// Zero-length and inverted intervals are rejected.
    pub fn new(start: T, end: T) -> Result<Self> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(Error::InvalidInterval {
                start: format!("{start:?}"),
                end: format!("{end:?}"),
            })
        }
    }

    /// Same as [`Interval::new`], but returns None instead of an error.
    /// Used when computing fragments, where an empty result is expected.
    fn positive(start: &T, end: &T) -> Option<Self> {
        (start < end).then(|| Self {
            start: start.clone(),
            end: end.clone(),
        })
    }

    #[must_use]
    pub fn start(&self) -> &T {
        &self.start
    }

    #[must_use]
    pub fn end(&self) -> &T {
        &self.end
    }

    /// The time elapsed between start and end.  Always positive.
    #[must_use]
    pub fn duration(&self) -> T::Duration {
        self.end.duration_since(&self.start)
    }

    /// Whether the point is in the interval (both bounds included)
    #[must_use]
    pub fn contains(&self, point: &T) -> bool {
        self.start <= *point && *point <= self.end
    }

    /// Whether the two intervals have some time in common.
    /// ```txt
    ///    [-----]
    ///        [------]     => overlaps
    ///    [-----]
    ///          [------]   => does not overlap (single point in common)
    /// ```
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether the two intervals overlap, or share a boundary.  Two such
    /// intervals can be merged into a single one without adding any time.
    #[must_use]
    pub fn touches_or_overlaps(&self, other: &Self) -> bool {
        self.overlaps(other)
            || self.end == other.start
            || other.end == self.start
    }

    /// Whether self is entirely inside other.
    #[must_use]
    pub fn is_nested_in(&self, other: &Self) -> bool {
        self.start >= other.start && self.end <= other.end
    }

    /// Whether the two intervals have no time in common.  Intervals that only
    /// share a boundary are disjoint.
    #[must_use]
    pub fn is_disjoint_with(&self, other: &Self) -> bool {
        !self.overlaps(other)
    }

    /// The smallest interval containing both, if the two intervals touch or
    /// overlap.  Returns None when there is a gap between them.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Option<Self> {
        self.touches_or_overlaps(other).then(|| self.hull(other))
    }

    /// The smallest interval containing both, ignoring any gap.
    #[must_use]
    pub fn hull(&self, other: &Self) -> Self {
        Self {
            start: self.start.clone().min(other.start.clone()),
            end: self.end.clone().max(other.end.clone()),
        }
    }

    /// The time common to both intervals.  When they only share a boundary
    /// point, there is no time spent in common and None is returned.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let start = (&self.start).max(&other.start);
        let end = (&self.end).min(&other.end);
        Self::positive(start, end)
    }

    /// Restrict the interval to the window `[start, end]`, where None means
    /// no bound on that side.  Returns None when nothing is left.
    #[must_use]
    pub fn clamp_to(&self, start: Option<&T>, end: Option<&T>) -> Option<Self> {
        let lower = start.map_or(&self.start, |s| s.max(&self.start));
        let upper = end.map_or(&self.end, |e| e.min(&self.end));
        Self::positive(lower, upper)
    }

    /// The part of self that is outside of other.
    /// ```txt
    ///     [------ self ------]
    ///          [-other-]
    ///     [----)       (-----]    two fragments
    /// ```
    /// Fragments that would be empty are not created, so the result has
    /// zero, one or two intervals.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Remainder<T> {
        if !self.overlaps(other) {
            Remainder::One(self.clone())
        } else {
            Remainder::from_two(
                Self::positive(&self.start, &other.start),
                Self::positive(&other.end, &self.end),
            )
        }
    }
}

impl<T: ParseTimestamp> Interval<T> {
    /// Parse both texts with the given format, then build the interval.
    /// ```
    /// use chrono::NaiveDateTime;
    /// use timeset_lib::Interval;
    /// let intv = Interval::<NaiveDateTime>::from_strings(
    ///     "2024-03-01 15:00", "2024-03-01 17:45", "%Y-%m-%d %H:%M").unwrap();
    /// assert_eq!(intv.duration(), chrono::TimeDelta::minutes(165));
    /// ```
    pub fn from_strings(
        start_text: &str,
        end_text: &str,
        format: &str,
    ) -> Result<Self> {
        let start = T::parse_timestamp(start_text, format)?;
        let end = T::parse_timestamp(end_text, format)?;
        Self::new(start, end)
    }
}

/// The result of removing an interval from another one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Remainder<T> {
    Empty,
    One(Interval<T>),
    Two(Interval<T>, Interval<T>),
}

impl<T> Remainder<T> {
    fn from_two(left: Option<Interval<T>>, right: Option<Interval<T>>) -> Self {
        match (left, right) {
            (None, None) => Remainder::Empty,
            (Some(l), None) => Remainder::One(l),
            (None, Some(r)) => Remainder::One(r),
            (Some(l), Some(r)) => Remainder::Two(l, r),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Remainder::Empty)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Remainder::Empty => 0,
            Remainder::One(_) => 1,
            Remainder::Two(_, _) => 2,
        }
    }
}

impl<T> IntoIterator for Remainder<T> {
    type Item = Interval<T>;
    type IntoIter = std::iter::Flatten<std::array::IntoIter<Option<Interval<T>>, 2>>;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            Remainder::Empty => [None, None],
            Remainder::One(i) => [Some(i), None],
            Remainder::Two(l, r) => [Some(l), Some(r)],
        }
        .into_iter()
        .flatten()
    }
}

///  &Interval & &Interval
impl<T: Timestamp> std::ops::BitAnd<&Interval<T>> for &Interval<T> {
    type Output = Option<Interval<T>>;

    fn bitand(self, rhs: &Interval<T>) -> Self::Output {
        self.intersect(rhs)
    }
}

///  &Interval - &Interval
impl<T: Timestamp> std::ops::Sub<&Interval<T>> for &Interval<T> {
    type Output = Remainder<T>;

    /// Same as [`Interval::subtract()`]
    fn sub(self, rhs: &Interval<T>) -> Self::Output {
        self.subtract(rhs)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Interval<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Interval({:?}, {:?})", self.start, self.end)
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// The unchecked shape of a serialized interval
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawInterval<T> {
    start: T,
    end: T,
}

#[cfg(feature = "serde")]
impl<T: Timestamp> TryFrom<RawInterval<T>> for Interval<T> {
    type Error = Error;

    fn try_from(raw: RawInterval<T>) -> Result<Self> {
        Interval::new(raw.start, raw.end)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{NaiveDateTime, TimeDelta};

    fn intv(start: i32, end: i32) -> Interval<i32> {
        Interval::new(start, end).unwrap()
    }

    #[test]
    fn test_new() {
        let i = intv(1, 5);
        assert_eq!(i.start(), &1);
        assert_eq!(i.end(), &5);
        assert_eq!(i.duration(), 4);
        assert_eq!(Interval::new(-100_i8, 100).unwrap().duration(), 200);
        assert_eq!(Interval::new(i8::MIN, i8::MAX).unwrap().duration(), 255);

        assert!(matches!(
            Interval::new(5, 5),
            Err(Error::InvalidInterval { .. })
        ));
        let err = Interval::new(6, 5).unwrap_err();
        assert!(!err.is_parse_error());
        assert_eq!(err.to_string(), "invalid interval: 5 is not after 6");
    }

    #[test]
    fn test_from_strings() {
        let fmt = "%Y-%m-%d %H:%M";
        let i = Interval::<NaiveDateTime>::from_strings(
            "2024-03-01 17:00",
            "2024-03-02 06:00",
            fmt,
        )
        .unwrap();
        assert_eq!(i.duration(), TimeDelta::hours(13));

        let err = Interval::<NaiveDateTime>::from_strings(
            "2024-03-01",
            "2024-03-02 06:00",
            fmt,
        )
        .unwrap_err();
        assert!(matches!(err, Error::FormatMismatch { .. }));

        let err = Interval::<NaiveDateTime>::from_strings(
            "2024-03-01 17:00",
            "2024-03-02 06:00 UTC",
            fmt,
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnconvertedData { .. }));

        // Both parse, but end is before start
        let err = Interval::<NaiveDateTime>::from_strings(
            "2024-03-02 06:00",
            "2024-03-01 17:00",
            fmt,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInterval { .. }));
    }

    #[test]
    fn test_contains() {
        let i = intv(3, 5);
        assert!(!i.contains(&2));
        assert!(i.contains(&3));
        assert!(i.contains(&5));
        assert!(!i.contains(&6));
    }

    #[test]
    fn test_touches_or_overlaps() {
        let i = intv(3, 5);
        assert!(i.touches_or_overlaps(&intv(4, 8)));
        assert!(i.touches_or_overlaps(&intv(5, 8))); // shared boundary
        assert!(i.touches_or_overlaps(&intv(1, 3)));
        assert!(i.touches_or_overlaps(&intv(0, 10)));
        assert!(!i.touches_or_overlaps(&intv(6, 8)));
        assert!(!i.touches_or_overlaps(&intv(0, 2)));

        assert!(i.overlaps(&intv(4, 8)));
        assert!(!i.overlaps(&intv(5, 8)));
    }

    #[test]
    fn test_nested_disjoint() {
        let i = intv(3, 8);
        assert!(intv(4, 5).is_nested_in(&i));
        assert!(intv(3, 8).is_nested_in(&i));
        assert!(!intv(2, 5).is_nested_in(&i));
        assert!(i.is_disjoint_with(&intv(8, 10)));
        assert!(i.is_disjoint_with(&intv(0, 3)));
        assert!(!i.is_disjoint_with(&intv(7, 10)));
    }

    #[test]
    fn test_merge() {
        assert_eq!(intv(1, 3).merge(&intv(3, 5)), Some(intv(1, 5)));
        assert_eq!(intv(1, 9).merge(&intv(3, 5)), Some(intv(1, 9)));
        assert_eq!(intv(1, 3).merge(&intv(4, 5)), None);
        assert_eq!(intv(1, 3).hull(&intv(4, 5)), intv(1, 5));
    }

    #[test]
    fn test_intersect() {
        assert_eq!(intv(1, 5).intersect(&intv(3, 8)), Some(intv(3, 5)));
        assert_eq!(intv(3, 8).intersect(&intv(1, 5)), Some(intv(3, 5)));
        assert_eq!(intv(1, 9).intersect(&intv(3, 5)), Some(intv(3, 5)));
        assert_eq!(intv(1, 3).intersect(&intv(3, 5)), None);
        assert_eq!(intv(1, 3).intersect(&intv(4, 5)), None);
        assert_eq!(&intv(1, 5) & &intv(2, 3), Some(intv(2, 3)));
    }

    #[test]
    fn test_clamp() {
        let i = intv(3, 8);
        assert_eq!(i.clamp_to(Some(&4), Some(&6)), Some(intv(4, 6)));
        assert_eq!(i.clamp_to(Some(&0), Some(&10)), Some(i.clone()));
        assert_eq!(i.clamp_to(None, Some(&5)), Some(intv(3, 5)));
        assert_eq!(i.clamp_to(Some(&5), None), Some(intv(5, 8)));
        assert_eq!(i.clamp_to(Some(&8), None), None);
        assert_eq!(i.clamp_to(Some(&9), Some(&12)), None);
        assert_eq!(intv(3, 8).clamp_to(None, Some(&4)), Some(intv(3, 4)));
    }

    #[test]
    fn test_subtract() {
        let i = intv(3, 8);

        // disjoint, including a shared boundary
        assert_eq!(i.subtract(&intv(0, 2)), Remainder::One(i.clone()));
        assert_eq!(i.subtract(&intv(8, 10)), Remainder::One(i.clone()));

        // covered
        assert_eq!(i.subtract(&intv(3, 8)), Remainder::Empty);
        assert_eq!(i.subtract(&intv(0, 10)), Remainder::Empty);

        // left overlap
        assert_eq!(i.subtract(&intv(0, 5)), Remainder::One(intv(5, 8)));
        assert_eq!(i.subtract(&intv(3, 5)), Remainder::One(intv(5, 8)));

        // right overlap
        assert_eq!(i.subtract(&intv(5, 10)), Remainder::One(intv(3, 5)));
        assert_eq!(i.subtract(&intv(5, 8)), Remainder::One(intv(3, 5)));

        // strictly inside
        let r = &i - &intv(4, 6);
        assert_eq!(r, Remainder::Two(intv(3, 4), intv(6, 8)));
        assert_eq!(r.len(), 2);
        assert_eq!(r.into_iter().collect::<Vec<_>>(), [intv(3, 4), intv(6, 8)]);
        assert!(Remainder::<i32>::Empty.into_iter().next().is_none());
    }

    #[test]
    fn test_io() {
        assert_eq!(format!("{}", intv(1, 4)), "[1, 4]");
        assert_eq!(format!("{:?}", intv(1, 4)), "Interval(1, 4)");
    }

    #[test]
    fn test_ord() {
        let mut v = vec![intv(3, 4), intv(1, 5), intv(1, 2)];
        v.sort();
        assert_eq!(v, [intv(1, 2), intv(1, 5), intv(3, 4)]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&intv(1, 4)).unwrap();
        assert_eq!(json, r#"{"start":1,"end":4}"#);
        let back: Interval<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, intv(1, 4));
        assert!(
            serde_json::from_str::<Interval<i32>>(r#"{"start":4,"end":4}"#)
                .is_err()
        );
    }
}
