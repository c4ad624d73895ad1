use clap::{Parser, Subcommand};

/// Command-line interface definition for rCountdown
/// Countdown display and settings editor sharing a SQLite store
#[derive(Parser)]
#[command(
    name = "rcountdown",
    version = env!("CARGO_PKG_VERSION"),
    about = "A terminal countdown with a settings editor; every process shares the same SQLite store",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update, no waiting)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show the live countdown (the display page)
    Show {
        #[arg(long = "once", help = "Render the current state once and exit")]
        once: bool,

        #[arg(
            long = "poll-ms",
            value_name = "MS",
            help = "Override the store poll interval in milliseconds"
        )]
        poll_ms: Option<u64>,

        #[arg(
            long = "exit-after",
            value_name = "SECS",
            help = "Stop the display after this many seconds"
        )]
        exit_after: Option<u64>,

        #[arg(long = "lines", help = "Print one line per update instead of redrawing")]
        lines: bool,
    },

    /// View or change the countdown duration and due date (the settings page)
    Settings {
        #[arg(long = "hours", allow_hyphen_values = true, help = "Hours (no upper bound)")]
        hours: Option<String>,

        #[arg(
            long = "minutes",
            allow_hyphen_values = true,
            help = "Minutes (values above 59 become 59)"
        )]
        minutes: Option<String>,

        #[arg(
            long = "seconds",
            allow_hyphen_values = true,
            help = "Seconds (values above 59 become 59)"
        )]
        seconds: Option<String>,

        #[arg(
            long = "due",
            value_name = "YYYY-MM-DDTHH:MM",
            conflicts_with = "clear_due",
            help = "Due date in local time"
        )]
        due: Option<String>,

        #[arg(long = "clear-due", help = "Remove the due date")]
        clear_due: bool,

        #[arg(
            long = "interactive",
            short = 'i',
            help = "Prompt for every field, then confirm"
        )]
        interactive: bool,

        #[arg(long = "cancel", help = "Preview the edits without saving")]
        cancel: bool,
    },

    /// Select a document and submit it
    Submit {
        /// File to submit (.pdf, .doc, .docx or .txt)
        file: String,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (integrity checks, info, etc.)
    Db {
        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
