use actix_web::{App, HttpServer, web};
use petconnect_api::data::database::Database;
use petconnect_api::infrastructure::config::Settings;
use petconnect_api::infrastructure::logging::init_logging;
use petconnect_api::presentation::handlers::AppState;
use petconnect_api::presentation::middleware::RequestTracing;
use petconnect_api::presentation::{ROUTES, configure, cors};
use std::io;
use tracing::{error, info};

#[tokio::main]
async fn main() -> io::Result<()> {
    let settings = Settings::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    init_logging(&settings.log_level);
    info!(log_level = %settings.log_level, "Logging initialized");
    if let Some(path) = &settings.env_file {
        info!(path = %path.display(), "Loaded .env file");
    }

    let database = Database::connect(&settings.database).await.map_err(|e| {
        error!(error = %e, url = %settings.database.url, "Failed to open database");
        io::Error::other(e)
    })?;

    let state = web::Data::new(AppState::new(database.clone()));

    let bind_addr = settings.bind_address();
    info!(address = %bind_addr, "Binding server to address");
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors())
            .wrap(RequestTracing)
            .configure(configure)
    })
    .bind(&bind_addr)?;

    info!(address = %bind_addr, routes = %ROUTES, "Starting HTTP server");
    let result = server.run().await;

    database.close().await;
    info!("Server stopped");
    result
}
