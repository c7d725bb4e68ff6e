#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the blocked bike lane dashboard.
//!
//! Loads the request CSV and community board boundaries once at startup,
//! then re-renders the dashboard view model on every control change the
//! frontend sends. The dataset is shared read-only across workers.

mod handlers;
pub mod interactive;
pub mod pages;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, middleware, web};
use bike_lane_dataset::{DashboardContext, DatasetError, DatasetPaths};
use bike_lane_server_models::{ApiError, PageContent};
use thiserror::Error;

use crate::pages::PagesError;

/// Errors that abort server startup.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The dataset could not be loaded.
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// The embedded page content is invalid.
    #[error("Pages error: {0}")]
    Pages(#[from] PagesError),

    /// The HTTP server failed to bind or run.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub bind_addr: String,
    /// Port to bind.
    pub port: u16,
    /// Dataset input files.
    pub paths: DatasetPaths,
}

impl ServerConfig {
    /// Reads `BIND_ADDR` and `PORT` (defaults `127.0.0.1:8080`) and the
    /// dataset paths from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        Self {
            bind_addr,
            port,
            paths: DatasetPaths::from_env(),
        }
    }
}

/// Shared application state.
pub struct AppState {
    /// Loaded requests and boundaries.
    pub context: Arc<DashboardContext>,
    /// Static page content, in navigation order.
    pub pages: Arc<Vec<PageContent>>,
    /// Boundary `GeoJSON` body, shared without copying per request.
    pub boundaries_body: web::Bytes,
}

impl AppState {
    /// Builds state around a loaded context.
    ///
    /// # Errors
    ///
    /// Returns [`PagesError`] if the embedded page content is invalid.
    pub fn new(context: DashboardContext) -> Result<Self, PagesError> {
        let pages = pages::all_pages()?;
        let boundaries_body = web::Bytes::from(context.boundaries().raw().to_string());

        Ok(Self {
            context: Arc::new(context),
            pages: Arc::new(pages),
            boundaries_body,
        })
    }
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        let body = ApiError {
            error: err.to_string(),
        };
        actix_web::error::InternalError::from_response(err, HttpResponse::BadRequest().json(body))
            .into()
    }))
    .service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/controls", web::get().to(handlers::controls))
            .route("/boards", web::get().to(handlers::boards))
            .route("/dashboard", web::get().to(handlers::dashboard))
            .route("/boundaries", web::get().to(handlers::boundaries))
            .route("/pages", web::get().to(handlers::pages))
            .route("/pages/{name}", web::get().to(handlers::page)),
    );
}

/// Starts the dashboard API server.
///
/// Loads the dataset from `config.paths`, then serves until shutdown.
/// This is a regular async function; the caller provides the runtime
/// (e.g. via `#[actix_web::main]`) and initializes logging.
///
/// # Errors
///
/// Returns [`ServerError`] if the dataset or page content fails to load,
/// or the HTTP server fails to bind or run.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    log::info!("Loading dataset...");
    let context = DashboardContext::load(&config.paths)?;

    let state = web::Data::new(AppState::new(context)?);

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await?;

    Ok(())
}
