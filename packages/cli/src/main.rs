#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for the blocked bike lane dashboard.
//!
//! Renders a dashboard view model headlessly as JSON, lists the board
//! dropdown options, or starts the API server. Run without a subcommand
//! to pick one interactively.

mod interactive;

use std::path::PathBuf;

use bike_lane_analytics::render;
use bike_lane_dataset::{DashboardContext, DatasetPaths};
use bike_lane_request_models::FilterCriteria;
use bike_lane_server::{ServerConfig, run_server};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bike_lane_cli", about = "Blocked bike lane 311 dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the dashboard view model as JSON
    Render {
        #[command(flatten)]
        data: DataArgs,
        /// First day included (YYYY-MM-DD, default 2023-01-01)
        #[arg(long)]
        start: Option<String>,
        /// Last day included (YYYY-MM-DD, default 2023-12-31)
        #[arg(long)]
        end: Option<String>,
        /// Community board name, or "All"
        #[arg(long)]
        board: Option<String>,
        /// Minimum entries (1-10, default 3)
        #[arg(long)]
        min_entries: Option<u32>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// List the community board dropdown options
    Boards {
        #[command(flatten)]
        data: DataArgs,
    },
    /// Start the API server
    Serve {
        #[command(flatten)]
        data: DataArgs,
        /// Interface to bind (overrides `BIND_ADDR`)
        #[arg(long)]
        bind_addr: Option<String>,
        /// Port to bind (overrides `PORT`)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Pick a tool and enter its inputs interactively
    Interactive,
}

/// Dataset location overrides shared by every subcommand.
#[derive(Args)]
struct DataArgs {
    /// Directory holding the default input files
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Request CSV path
    #[arg(long)]
    requests_csv: Option<PathBuf>,
    /// Community board `GeoJSON` path
    #[arg(long)]
    boundaries: Option<PathBuf>,
}

impl DataArgs {
    /// Applies the flags over the environment-derived paths.
    fn resolve(self) -> DatasetPaths {
        let defaults = self
            .data_dir
            .as_deref()
            .map_or_else(DatasetPaths::from_env, DatasetPaths::new);

        DatasetPaths {
            requests_csv: self.requests_csv.unwrap_or(defaults.requests_csv),
            boundaries: self.boundaries.unwrap_or(defaults.boundaries),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    match cli.command {
        None | Some(Commands::Interactive) => interactive::run()?,
        Some(Commands::Render {
            data,
            start,
            end,
            board,
            min_entries,
            pretty,
        }) => {
            let criteria = FilterCriteria::from_controls(
                start.as_deref(),
                end.as_deref(),
                board.as_deref(),
                min_entries,
            )?;
            let context = DashboardContext::load(&data.resolve())?;
            print_view(&context, &criteria, pretty)?;
        }
        Some(Commands::Boards { data }) => {
            let context = DashboardContext::load(&data.resolve())?;
            for option in context.board_options() {
                println!("{option}");
            }
        }
        Some(Commands::Serve {
            data,
            bind_addr,
            port,
        }) => {
            let mut config = ServerConfig::from_env();
            config.paths = data.resolve();
            if let Some(bind_addr) = bind_addr {
                config.bind_addr = bind_addr;
            }
            if let Some(port) = port {
                config.port = port;
            }
            serve(config)?;
        }
    }

    Ok(())
}

/// Renders and prints one view model.
fn print_view(
    context: &DashboardContext,
    criteria: &FilterCriteria,
    pretty: bool,
) -> Result<(), serde_json::Error> {
    let view = render(context, criteria);
    let json = if pretty {
        serde_json::to_string_pretty(&view)?
    } else {
        serde_json::to_string(&view)?
    };
    println!("{json}");
    Ok(())
}

/// Runs the server on an Actix system runtime.
fn serve(config: ServerConfig) -> Result<(), bike_lane_server::ServerError> {
    actix_web::rt::System::new().block_on(run_server(config))
}
