use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::store::Slot;

#[derive(Parser)]
#[command(author, version, about, long_about = None, propagate_version = true)]
pub struct Cli {
    /// Path to a TOML configuration file.
    #[clap(long, env = "COMMUTEOS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Refresh and print the whole dashboard.
    Dashboard,

    /// Current conditions and the daily forecast.
    Weather,

    /// Rideshare vs. bike for the home to work trip.
    Commute,

    /// What to wear today.
    Outfit,

    /// Look up places by name.
    Search {
        query: String,
    },

    /// Show or change the saved locations.
    #[command(subcommand)]
    Locations(LocationsCommand),

    /// Run the HTTP API.
    Serve {
        #[clap(long)]
        port: Option<u16>,
    },
}

#[derive(Subcommand)]
pub enum LocationsCommand {
    Show,

    Set(SetLocation),
}

#[derive(Args)]
pub struct SetLocation {
    /// `home` or `work`.
    pub slot: Slot,

    /// Use the first search result for this query.
    #[clap(long, conflicts_with_all = ["lat", "lon", "label"], required_unless_present_all = ["lat", "lon"])]
    pub query: Option<String>,

    #[clap(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    #[clap(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    #[clap(long)]
    pub label: Option<String>,
}
