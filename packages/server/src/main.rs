#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the blocked bike lane dashboard.
//!
//! Reads its configuration from the environment (`BIND_ADDR`, `PORT`,
//! `BIKE_LANE_DATA_DIR`, `BIKE_LANE_REQUESTS_CSV`, `BIKE_LANE_BOUNDARIES`).

use bike_lane_server::{ServerConfig, run_server};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    if let Err(e) = run_server(ServerConfig::from_env()).await {
        log::error!("Server failed: {e}");
        return Err(e.into());
    }

    Ok(())
}
