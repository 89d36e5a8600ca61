pub mod auth;
pub mod handlers;
pub mod middleware;

use actix_cors::Cors;
use actix_web::web;

pub const ROUTES: &str =
    "GET /, GET /health, POST /register, POST /login, POST /add_pet, GET /pets";

/// Registers every route plus the JSON error handler on an `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(handlers::json_config())
        .route("/", web::get().to(handlers::home))
        .route("/health", web::get().to(handlers::health_check))
        .route("/register", web::post().to(auth::register))
        .route("/login", web::post().to(auth::login))
        .route("/add_pet", web::post().to(handlers::add_pet))
        .route("/pets", web::get().to(handlers::list_pets));
}

/// Any origin, method and header is allowed.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}
