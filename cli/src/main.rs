mod args;
mod global_settings;
mod inputs;
mod sets_view;
mod tables;

use crate::args::build_cli;
use crate::global_settings::GlobalSettings;
use crate::inputs::parse_set;
use crate::sets_view::{output_width, sets_view};
use anyhow::{bail, Result};
use chrono::NaiveDateTime;
use clap::ArgMatches;
use console::Term;
use timeset_lib::{Adjacency, IntervalSet};

/// The two operands of a binary operation
fn operands(
    args: &ArgMatches,
    globals: &GlobalSettings,
) -> Result<(IntervalSet<NaiveDateTime>, IntervalSet<NaiveDateTime>)> {
    Ok((
        parse_set(args, "left", globals)?,
        parse_set(args, "right", globals)?,
    ))
}

fn main() -> Result<()> {
    let mut cli = build_cli();
    let matches = cli.get_matches_mut();
    let globals = GlobalSettings::new(&matches);

    env_logger::Builder::from_env(
        env_logger::Env::default()
            .default_filter_or(globals.default_log_filter()),
    )
    .init();

    let result = match matches.subcommand() {
        Some(("normalize", sub)) => {
            let set = parse_set(sub, "intervals", &globals)?;
            set.normalize_with(if sub.get_flag("keep-touching") {
                Adjacency::Separate
            } else {
                Adjacency::Merge
            })
        }
        Some(("union", sub)) => {
            let (left, right) = operands(sub, &globals)?;
            left.union(&right).into_set()
        }
        Some(("intersect", sub)) => {
            let (left, right) = operands(sub, &globals)?;
            left.intersection(&right).into_set()
        }
        Some(("subtract", sub)) => {
            let (left, right) = operands(sub, &globals)?;
            left.difference(&right).into_set()
        }
        Some(("completions", sub)) => {
            if let Some(shell) = sub
                .get_one::<clap_complete_command::Shell>("shell")
                .cloned()
            {
                shell.generate(&mut cli, &mut std::io::stdout());
            }
            return Ok(());
        }
        Some((name, _)) => bail!("Unknown command {name}"),
        None => bail!("No command given"),
    };

    log::info!("{} intervals in result", result.len());

    if globals.json {
        println!("{}", serde_json::to_string_pretty(result.intervals())?);
    } else {
        let output = sets_view(&result, &globals, output_width(&Term::stdout()));
        print!("{}", output);
    }
    Ok(())
}
