use clap::{Parser, Subcommand};

/// Command-line interface definition for rRunLogger
/// Web form application to log machine runs into daily CSV ledgers
#[derive(Parser)]
#[command(
    name = "rrunlogger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Log shop-floor machine runs into per-operator daily CSV ledgers through a browser form",
    long_about = None
)]
pub struct Cli {
    /// Override the configuration file path
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Override the data directory (ledgers live in <DIR>/operators)
    #[arg(global = true, long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the default configuration file and create the data directory
    Init {
        #[arg(long, short = 'f', help = "Overwrite an existing configuration file")]
        force: bool,
    },

    /// Show or check the configuration
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "check",
            help = "Check that the reference lists can be loaded"
        )]
        check: bool,
    },

    /// Start the web server
    Serve {
        #[arg(long, help = "Listen address (overrides the configuration)")]
        host: Option<String>,

        #[arg(long, help = "Listen port (overrides the configuration)")]
        port: Option<u16>,
    },

    /// Print an operator's ledger for one day
    List {
        /// Operator name (folder under operators/)
        operator: String,

        #[arg(
            long,
            short,
            help = "Day to show (YYYY-MM-DD or MM-DD-YY, default: today)"
        )]
        date: Option<String>,

        #[arg(long, help = "Print rows as JSON")]
        json: bool,
    },
}
