use crate::global_settings::GlobalSettings;
use clap::{arg, Arg, Command};

/// The two sets given to binary operations
fn operands() -> [Arg; 2] {
    [
        arg!(-a --left <INTERVAL> ... "Intervals of the first set (START..END)")
            .num_args(1..)
            .required(false),
        arg!(-b --right <INTERVAL> ... "Intervals of the second set (START..END)")
            .num_args(1..)
            .required(false),
    ]
}

pub(crate) fn build_cli() -> Command {
    Command::new("timeset")
        .version("0.1")
        .about("Merge, intersect and subtract intervals of time")
        .subcommand_required(true)
        .subcommand_precedence_over_arg(true) // --x val1 val2 subcommand
        .flatten_help(true) // show help for all subcommands
        .arg_required_else_help(true) // show full help if nothing given
        .args(GlobalSettings::cli())
        .subcommand(
            Command::new("normalize")
                .about("Merge overlapping intervals")
                .arg(
                    arg!(<INTERVAL> ... "Intervals to merge (START..END)")
                        .id("intervals"),
                )
                .arg(arg!(--"keep-touching" "Do not merge intervals that only share a boundary")),
        )
        .subcommand(
            Command::new("union")
                .about("Time covered by either set")
                .args(operands()),
        )
        .subcommand(
            Command::new("intersect")
                .about("Time covered by both sets")
                .args(operands()),
        )
        .subcommand(
            Command::new("subtract")
                .about("Time covered by the first set but not the second")
                .args(operands()),
        )
        .subcommand(
            // Use    eval "$(timeset completions zsh)"
            Command::new("completions")
                .about("Generate shell completions")
                .arg(
                    Arg::new("shell")
                        .value_name("SHELL")
                        .help("The shell to generate the completions for")
                        .required(true)
                        .value_parser(clap::builder::EnumValueParser::<
                            clap_complete_command::Shell,
                        >::new()),
                ),
        )
}

#[cfg(test)]
mod test {
    use super::build_cli;

    #[test]
    fn test_cli() {
        build_cli().debug_assert();

        let m = build_cli()
            .try_get_matches_from([
                "timeset",
                "--format",
                "%H:%M",
                "subtract",
                "-a",
                "10:00..12:00",
                "13:00..14:00",
                "-b",
                "11:00..13:30",
            ])
            .unwrap();
        assert_eq!(
            m.get_one::<String>("format").map(String::as_str),
            Some("%H:%M")
        );
        let (name, sub) = m.subcommand().unwrap();
        assert_eq!(name, "subtract");
        assert_eq!(sub.get_many::<String>("left").unwrap().count(), 2);
        assert_eq!(sub.get_many::<String>("right").unwrap().count(), 1);
    }

    #[test]
    fn test_completions() {
        let mut cli = build_cli();
        let m = cli
            .try_get_matches_from_mut(["timeset", "completions", "bash"])
            .unwrap();
        let shell = m
            .subcommand_matches("completions")
            .and_then(|sub| sub.get_one::<clap_complete_command::Shell>("shell"))
            .cloned()
            .unwrap();

        let mut script = Vec::new();
        shell.generate(&mut cli, &mut script);
        let script = String::from_utf8(script).unwrap();
        assert!(script.contains("timeset"));
        assert!(script.contains("subtract"));
    }
}
