//! Set operations on intervals of time.
//!
//! An [`Interval`] is a closed range of time `[start, end]` with a positive
//! duration.  An [`IntervalSet`] is any collection of them, possibly
//! overlapping and in any order.  Normalizing it produces a
//! [`CanonicalSet`], where intervals are sorted and neither overlap nor touch
//! each other.  Union, intersection and difference are computed on canonical
//! sets and always return canonical sets.
//!
//! ```text
//!        [------ A ------]   [-- A --]
//!               [--------- B ----------]
//!
//!        [-----------------------------]    Union (A | B)
//!               [--------]   [-------]      Intersection (A & B)
//!        [------]                           Difference (A - B)
//!                        [---]       [-]    Difference (B - A)
//! ```
//!
//! Intervals that share a single boundary point are merged by normalization,
//! but their intersection is empty: a single point is not time spent.
//!
//! The timestamps can be any type implementing [`Timestamp`], which includes
//! the primitive integers and chrono's `NaiveDateTime`, `NaiveDate` and
//! `DateTime`.
//!
//! ```
//! use chrono::{NaiveDateTime, TimeDelta};
//! use timeset_lib::{Interval, IntervalSet};
//!
//! let fmt = "%Y-%m-%d %H:%M";
//! let work = IntervalSet::from_intervals(vec![
//!     Interval::<NaiveDateTime>::from_strings(
//!         "2024-03-01 15:00", "2024-03-01 17:45", fmt)?,
//!     Interval::from_strings("2024-03-01 17:00", "2024-03-01 18:30", fmt)?,
//! ]);
//! let overtime = IntervalSet::from(
//!     Interval::from_strings("2024-03-01 17:00", "2024-03-02 06:00", fmt)?);
//! let extra = work.intersection(&overtime);
//! assert_eq!(extra.total_duration(), TimeDelta::minutes(90));
//! # Ok::<(), timeset_lib::Error>(())
//! ```

pub mod canonical;
pub mod errors;
pub mod interval_sets;
pub mod intervals;
pub mod timestamps;

pub use crate::canonical::CanonicalSet;
pub use crate::errors::{Error, Result};
pub use crate::interval_sets::{Adjacency, IntervalSet};
pub use crate::intervals::{Interval, Remainder};
pub use crate::timestamps::{ParseTimestamp, Timestamp};
