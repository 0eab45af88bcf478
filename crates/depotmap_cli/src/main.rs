//! depotmap CLI
//!
//! Command-line editor and route finder for depotmap delivery maps.
//!
//! # Commands
//!
//! - `new` - Create a map pair with its depot
//! - `inspect` - Display map statistics, houses and paths
//! - `add-house`, `edit-house`, `remove-house` - Edit houses
//! - `add-path`, `set-weight`, `remove-path` - Edit paths
//! - `route` - Find a route from the depot to a house

mod commands;

use clap::{Parser, Subcommand};
use depotmap_core::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// depotmap delivery map tools.
#[derive(Parser)]
#[command(name = "depotmap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Map file (`.mph` or `.mpp`; `new` also accepts a bare name)
    #[arg(global = true, short, long)]
    path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new map, replacing any existing files
    New {
        /// Depot name
        #[arg(long, default_value = "Pizzeria")]
        depot_name: String,

        /// Depot x position
        #[arg(long, default_value_t = 50, allow_hyphen_values = true)]
        depot_x: i32,

        /// Depot y position
        #[arg(long, default_value_t = 50, allow_hyphen_values = true)]
        depot_y: i32,
    },

    /// Display map statistics
    Inspect {
        /// List houses
        #[arg(long)]
        houses: bool,

        /// List paths
        #[arg(long)]
        paths: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Add a house
    AddHouse {
        /// Display name (at most 24 bytes are kept)
        #[arg(short, long)]
        name: String,

        /// Horizontal position
        #[arg(short, allow_hyphen_values = true)]
        x: i32,

        /// Vertical position
        #[arg(short, allow_hyphen_values = true)]
        y: i32,
    },

    /// Rename or move a house
    EditHouse {
        /// House identifier
        id: u32,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New horizontal position
        #[arg(short, allow_hyphen_values = true)]
        x: Option<i32>,

        /// New vertical position
        #[arg(short, allow_hyphen_values = true)]
        y: Option<i32>,
    },

    /// Remove a house and every path touching it
    RemoveHouse {
        /// House identifier
        id: u32,
    },

    /// Add a one-way path between two houses
    AddPath {
        /// Source house
        start: u32,

        /// Destination house
        end: u32,

        /// Travel cost (defaults to 1)
        #[arg(short, long, allow_hyphen_values = true)]
        weight: Option<i32>,
    },

    /// Change the travel cost of a path
    SetWeight {
        /// Path identifier
        id: u32,

        /// New travel cost
        #[arg(allow_hyphen_values = true)]
        weight: i32,
    },

    /// Remove a path
    RemovePath {
        /// Path identifier
        id: u32,
    },

    /// Find a route from the depot to a house
    Route {
        /// Destination house
        target: u32,

        /// Origin house
        #[arg(long, default_value_t = 0)]
        from: u32,

        /// Search even if some houses have no paths
        #[arg(long)]
        allow_orphans: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::default();

    match cli.command {
        Commands::New {
            depot_name,
            depot_x,
            depot_y,
        } => {
            let config = config
                .depot_name(depot_name)
                .depot_position(depot_x, depot_y);
            commands::new::run(cli.path, config)?;
        }
        Commands::Inspect {
            houses,
            paths,
            format,
        } => {
            let path = cli.path.ok_or("Map path required for inspect")?;
            commands::inspect::run(&path, houses, paths, &format)?;
        }
        Commands::AddHouse { name, x, y } => {
            let path = cli.path.ok_or("Map path required for add-house")?;
            commands::edit::add_house(&path, &name, x, y)?;
        }
        Commands::EditHouse { id, name, x, y } => {
            let path = cli.path.ok_or("Map path required for edit-house")?;
            commands::edit::edit_house(&path, id, name.as_deref(), x, y)?;
        }
        Commands::RemoveHouse { id } => {
            let path = cli.path.ok_or("Map path required for remove-house")?;
            commands::edit::remove_house(&path, id)?;
        }
        Commands::AddPath { start, end, weight } => {
            let path = cli.path.ok_or("Map path required for add-path")?;
            commands::edit::add_path(&path, start, end, weight)?;
        }
        Commands::SetWeight { id, weight } => {
            let path = cli.path.ok_or("Map path required for set-weight")?;
            commands::edit::set_weight(&path, id, weight)?;
        }
        Commands::RemovePath { id } => {
            let path = cli.path.ok_or("Map path required for remove-path")?;
            commands::edit::remove_path(&path, id)?;
        }
        Commands::Route {
            target,
            from,
            allow_orphans,
            format,
        } => {
            let path = cli.path.ok_or("Map path required for route")?;
            commands::route::run(&path, from, target, allow_orphans, &format)?;
        }
        Commands::Version => {
            println!("depotmap CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("depotmap core v{}", depotmap_core::VERSION);
        }
    }

    Ok(())
}
