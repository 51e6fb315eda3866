use crate::errors::{Error, Result};
use chrono::format::ParseErrorKind;
use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, ParseResult, TimeDelta,
    TimeZone,
};
use std::fmt::Debug;
use std::ops::Add;

/// A point on a totally ordered time line.
///
/// The set algebra only ever compares timestamps and measures the distance
/// between two of them, so this is all the trait asks for.  Implementations
/// are provided for the primitive integers (useful for tests and for
/// "ticks"-like clocks) and for chrono's date and time types.
pub trait Timestamp: Ord + Clone + Debug {
    /// The magnitude returned by subtracting two timestamps.
    type Duration: Copy + Ord + Add<Output = Self::Duration> + Debug;

    /// The time elapsed between `earlier` and self.
    /// This is only called with `earlier <= self`.
    fn duration_since(&self, earlier: &Self) -> Self::Duration;

    /// The neutral element for summing durations.
    fn zero_duration() -> Self::Duration;
}

/// Durations are unsigned, since the distance between the extremes of a
/// signed type does not fit in that type.
macro_rules! integer_timestamp {
    ($($t:ty => $d:ty),*) => {
        $(
            impl Timestamp for $t {
                type Duration = $d;

                fn duration_since(&self, earlier: &$t) -> $d {
                    self.abs_diff(*earlier)
                }

                fn zero_duration() -> $d {
                    0
                }
            }
        )*
    };
}

integer_timestamp!(
    u8 => u8,
    u16 => u16,
    u32 => u32,
    u64 => u64,
    usize => usize,
    i8 => u8,
    i16 => u16,
    i32 => u32,
    i64 => u64,
    isize => usize
);

impl Timestamp for NaiveDateTime {
    type Duration = TimeDelta;

    fn duration_since(&self, earlier: &NaiveDateTime) -> TimeDelta {
        self.signed_duration_since(*earlier)
    }

    fn zero_duration() -> TimeDelta {
        TimeDelta::zero()
    }
}

impl Timestamp for NaiveDate {
    type Duration = TimeDelta;

    fn duration_since(&self, earlier: &NaiveDate) -> TimeDelta {
        self.signed_duration_since(*earlier)
    }

    fn zero_duration() -> TimeDelta {
        TimeDelta::zero()
    }
}

impl<Tz: TimeZone> Timestamp for DateTime<Tz> {
    type Duration = TimeDelta;

    fn duration_since(&self, earlier: &DateTime<Tz>) -> TimeDelta {
        self.clone().signed_duration_since(earlier)
    }

    fn zero_duration() -> TimeDelta {
        TimeDelta::zero()
    }
}

/// Timestamps that can be decoded from text with a strftime-like format,
/// for instance `"%Y-%m-%d %H:%M"`.
pub trait ParseTimestamp: Timestamp {
    fn parse_timestamp(text: &str, format: &str) -> Result<Self>;
}

impl ParseTimestamp for NaiveDateTime {
    fn parse_timestamp(text: &str, format: &str) -> Result<Self> {
        parse_with(text, format, NaiveDateTime::parse_from_str)
    }
}

impl ParseTimestamp for NaiveDate {
    fn parse_timestamp(text: &str, format: &str) -> Result<Self> {
        parse_with(text, format, NaiveDate::parse_from_str)
    }
}

impl ParseTimestamp for DateTime<FixedOffset> {
    fn parse_timestamp(text: &str, format: &str) -> Result<Self> {
        parse_with(text, format, DateTime::<FixedOffset>::parse_from_str)
    }
}

/// Run one of chrono's parsers, and sort its failures into our error kinds.
/// Chrono reports trailing characters as `TooLong`.
fn parse_with<T>(
    text: &str,
    format: &str,
    parse: impl FnOnce(&str, &str) -> ParseResult<T>,
) -> Result<T> {
    parse(text, format).map_err(|source| {
        if source.kind() == ParseErrorKind::TooLong {
            Error::UnconvertedData {
                text: text.to_string(),
                format: format.to_string(),
            }
        } else {
            Error::FormatMismatch {
                text: text.to_string(),
                format: format.to_string(),
                source,
            }
        }
    })
}
