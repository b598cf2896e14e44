use astra::Server;
use hotel_desk::config::AppConfig;
use hotel_desk::db::{init_db, Database};
use hotel_desk::responses::error_to_response;
use hotel_desk::router::{handle, App};
use hotel_desk::telemetry::init_logging;
use std::net::SocketAddr;
use tracing::{error, info};

fn main() {
    let env = std::env::var("HOTEL_DESK_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };
    init_logging(&config.logging);

    // Create the database handle and apply the schema
    let db = Database::new(&config.database.path);
    if let Err(e) = init_db(&db, &config.database.schema) {
        error!(error = %e, "database initialization failed");
        std::process::exit(1);
    }

    let addr: SocketAddr = match config.server.bind.parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!(bind = %config.server.bind, error = %e, "invalid bind address");
            std::process::exit(1);
        }
    };

    let app = App::new(db, &config.engine);
    info!(%addr, env = %env, workers = config.server.max_workers, "starting hotel_desk");

    let server = Server::bind(&addr).max_workers(config.server.max_workers);

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        error!(error = %e, "server ended with error");
    }

    info!("server shut down cleanly");
}
