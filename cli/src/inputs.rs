use crate::global_settings::GlobalSettings;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::ArgMatches;
use timeset_lib::{Interval, IntervalSet};

/// Parse an interval given as `START..END`
pub fn parse_interval(
    text: &str,
    format: &str,
) -> Result<Interval<NaiveDateTime>> {
    let (start, end) = text
        .split_once("..")
        .with_context(|| format!("'{text}' is not of the form START..END"))?;
    Interval::from_strings(start.trim(), end.trim(), format)
        .with_context(|| format!("Invalid interval '{text}'"))
}

/// Parse all the intervals given for one argument.  A missing argument is an
/// empty set.
pub fn parse_set(
    args: &ArgMatches,
    id: &str,
    globals: &GlobalSettings,
) -> Result<IntervalSet<NaiveDateTime>> {
    args.get_many::<String>(id)
        .into_iter()
        .flatten()
        .map(|text| parse_interval(text, &globals.format))
        .collect()
}

#[cfg(test)]
mod test {
    use super::parse_interval;
    use timeset_lib::Error;

    const FORMAT: &str = "%Y-%m-%d %H:%M";

    #[test]
    fn test_parse_interval() {
        let intv =
            parse_interval("2024-03-01 15:00..2024-03-01 17:45", FORMAT).unwrap();
        assert_eq!(intv.duration(), chrono::TimeDelta::minutes(165));

        let intv =
            parse_interval("2024-03-01 15:00 .. 2024-03-01 17:45", FORMAT).unwrap();
        assert_eq!(intv.duration(), chrono::TimeDelta::minutes(165));

        assert!(parse_interval("2024-03-01 15:00", FORMAT).is_err());

        let err = parse_interval("2024-03-01 17:45..2024-03-01 15:00", FORMAT)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::InvalidInterval { .. })
        ));

        let err = parse_interval("15:00..17:45", FORMAT).unwrap_err();
        assert!(err.downcast_ref::<Error>().is_some_and(Error::is_parse_error));
    }
}
