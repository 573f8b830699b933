//! Serve the bookstore catalog.
#![allow(clippy::exit)]
use crate::db;
use crate::server::api::state::App as AppState;
use crate::server::tracing::BookstoreRootSpanBuilder;
use crate::utils::config::Config;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{App, Error, HttpServer};
use tracing_actix_web::TracingLogger;

use std::{io, process};

use actix_http::body::MessageBody;
use actix_service::ServiceFactory;

use crate::server::api::routes;

/// Serve the bookstore catalog.
#[actix_web::main]
pub async fn serve_bookstore(config: Config) -> io::Result<()> {
    let bind = config.server.bind.clone();
    let port = config.server.port;
    tracing::info!("Running Bookstore on http://{bind}:{port}.");

    let db = match db::init::connect(&config.database.url).await {
        Ok(db) => db,
        Err(err) => {
            tracing::error!(
                "error: could not connect to database. Confirm that DATABASE_URL env var or the `database.url` setting is correct."
            );
            tracing::error!("Error: {:?}", err);
            process::exit(1);
        }
    };
    let state = AppState { db, config };

    HttpServer::new(move || init_app(&state))
        .bind((bind.as_str(), port))?
        .run()
        .await
}

/// Initialize the application and all routing at start-up time.
///
/// # Arguments
/// * `state` - The application state
pub fn init_app(
    state: &AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = Error,
    >,
> {
    let app = App::new().wrap(TracingLogger::<BookstoreRootSpanBuilder>::new());
    routes::register_app(app, state)
}
