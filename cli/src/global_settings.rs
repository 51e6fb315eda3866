use clap::{arg, Arg, ArgAction, ArgMatches};

pub struct GlobalSettings {
    // strftime-like format for all timestamps on the command line
    pub format: String,

    // Output the result as JSON rather than as a table
    pub json: bool,

    // Show debug logs, unless RUST_LOG says otherwise
    pub verbose: bool,

    pub table: crate::tables::Settings,
}

impl GlobalSettings {
    pub const DEFAULT_FORMAT: &'static str = "%Y-%m-%d %H:%M";

    /// Return the command line switches to configure the global settings
    pub fn cli() -> impl IntoIterator<Item = Arg> {
        [
            arg!(--format <FORMAT> "Format of timestamps, as in strftime")
                .default_value(Self::DEFAULT_FORMAT)
                .global(true),
            arg!(--json "Output the intervals as JSON")
                .action(ArgAction::SetTrue)
                .global(true),
            arg!(-v --verbose "Show debug traces")
                .action(ArgAction::SetTrue)
                .global(true),
        ]
    }

    /// Create the settings from the command line arguments.
    pub fn new(args: &ArgMatches) -> Self {
        GlobalSettings {
            format: args
                .get_one::<String>("format")
                .cloned()
                .unwrap_or_else(|| Self::DEFAULT_FORMAT.to_string()),
            json: args.get_flag("json"),
            verbose: args.get_flag("verbose"),
            table: crate::tables::Settings::default(),
        }
    }

    /// The log level used when RUST_LOG is not set
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }
}
