use crate::global_settings::GlobalSettings;
use crate::tables::{Align, Column, Table};
use chrono::{NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use std::fmt::Write;
use console::Term;
use timeset_lib::{Interval, IntervalSet};

/// Display a timestamp with the user's format.  Chrono only detects invalid
/// formats while writing, so fall back to the default display.
fn timestamp_image(t: &NaiveDateTime, format: &str) -> String {
    let mut image = String::new();
    match write!(image, "{}", t.format(format)) {
        Ok(()) => image,
        Err(_) => t.to_string(),
    }
}

/// A duration in hours, e.g. "3.25"
pub fn hours(duration: TimeDelta) -> String {
    let h = Decimal::from(duration.num_seconds()) / Decimal::from(3600);
    format!("{:.2}", h.round_dp(2))
}

/// Number of columns available for tables.  When the output is not a
/// terminal, lines are never truncated.
pub fn output_width(term: &Term) -> usize {
    term.size_checked()
        .map_or(usize::MAX, |(_rows, cols)| usize::from(cols))
}

/// Display the intervals, which must not overlap, as a table with their
/// total duration
pub fn sets_view(
    set: &IntervalSet<NaiveDateTime>,
    globals: &GlobalSettings,
    max_width: usize,
) -> String {
    type Row = Interval<NaiveDateTime>;

    let start_image = |row: &Row| timestamp_image(row.start(), &globals.format);
    let end_image = |row: &Row| timestamp_image(row.end(), &globals.format);
    let duration_image = |row: &Row| hours(row.duration());

    let columns = vec![
        Column::new("Start", &start_image),
        Column::new("End", &end_image),
        Column::new("Hours", &duration_image).with_align(Align::Right),
    ];
    let mut table = Table::new(columns, &globals.table);
    table.add_rows(set);
    table.add_footer(vec![
        format!("{} intervals", set.len()),
        String::new(),
        hours(
            set.iter()
                .fold(TimeDelta::zero(), |total, intv| total + intv.duration()),
        ),
    ]);
    table.to_string(max_width)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::inputs::parse_interval;
    use timeset_lib::Adjacency;

    #[test]
    fn test_hours() {
        assert_eq!(hours(TimeDelta::minutes(195)), "3.25");
        assert_eq!(hours(TimeDelta::minutes(450)), "7.50");
        assert_eq!(hours(TimeDelta::minutes(20)), "0.33");
    }

    #[test]
    fn test_view() {
        let globals = GlobalSettings {
            format: "%H:%M".to_string(),
            json: false,
            verbose: false,
            table: crate::tables::Settings::default(),
        };
        let set: IntervalSet<_> =
            [("15:00", "16:00"), ("15:30", "17:45"), ("18:45", "20:30")]
                .iter()
                .map(|(start, end)| {
                    parse_interval(
                        &format!("2024-03-01 {start}..2024-03-01 {end}"),
                        "%Y-%m-%d %H:%M",
                    )
                    .unwrap()
                })
                .collect();
        assert_eq!(
            sets_view(&set.normalize().into_set(), &globals, 80),
            "Start      │End  │Hours\n\
             ───────────│─────│─────\n\
             15:00      │17:45│ 2.75\n\
             18:45      │20:30│ 1.75\n\
             ───────────│─────│─────\n\
             2 intervals│     │ 4.50\n"
        );

        // Piped output is not cut to a terminal width
        let wide = sets_view(&set.normalize().into_set(), &globals, usize::MAX);
        assert!(wide.lines().all(|line| line.chars().count() == 23));

        let touching = set.normalize_with(Adjacency::Separate);
        assert!(sets_view(&touching, &globals, 80).ends_with("│ 4.50\n"));
    }
}
