use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for fleetlog
/// CLI application to log heavy-equipment usage with SQLite
#[derive(Parser)]
#[command(
    name = "fleetlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Log which driver ran which machine, when, for whom and with what status; calendars and spreadsheet reports on SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

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

    /// Manage machines (equipment)
    Machine {
        #[command(subcommand)]
        action: EntityAction,
    },

    /// Manage drivers
    Driver {
        #[command(subcommand)]
        action: EntityAction,
    },

    /// Manage counterparties (clients)
    Counterparty {
        #[command(subcommand)]
        action: EntityAction,
    },

    /// Add, delete or list usage records
    Record {
        #[command(subcommand)]
        action: RecordAction,
    },

    /// Show one machine's records day by day for a month
    Calendar {
        /// Machine id (see `fleetlog machine list`)
        machine_id: i64,

        /// Month to show (YYYY-MM); defaults to the current month
        #[arg(long, short)]
        month: Option<String>,

        /// Print the month view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export every record as a styled spreadsheet (or CSV / JSON)
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Xlsx)]
        format: ExportFormat,

        /// Output file; defaults to report_<timestamp>.<ext> in the export directory
        #[arg(long, value_name = "FILE")]
        file: Option<String>,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Manage the database (migrations, integrity checks, reset)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,

        #[arg(
            long = "reset",
            help = "Back up the database, then drop and recreate every table"
        )]
        reset: bool,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum EntityAction {
    /// Add a new entry; an existing name is left as is
    Add { name: String },

    /// Delete an entry by id
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List all entries
    List {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum RecordAction {
    /// Add a usage record
    Add {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Machine id
        #[arg(long = "machine")]
        machine_id: i64,

        /// Driver id
        #[arg(long = "driver")]
        driver_id: i64,

        /// work, stop, repair or holiday
        #[arg(long)]
        status: String,

        /// Start time (HH:MM)
        #[arg(long = "start")]
        start: Option<String>,

        /// End time (HH:MM); earlier than start means the next day
        #[arg(long = "end")]
        end: Option<String>,

        #[arg(long)]
        comment: Option<String>,

        /// Counterparty id
        #[arg(long = "counterparty")]
        counterparty_id: Option<i64>,
    },

    /// Delete a record by id
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List all records, most recent first
    List {
        #[arg(long)]
        json: bool,
    },
}
