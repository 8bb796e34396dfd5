//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;
mod upload;

use actix_web::web;

use crate::middleware::error::{json_error_handler, query_error_handler};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(
            web::scope("/api")
                // Public routes
                .route("/health", web::get().to(health::health_check))
                // Account routes
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register))
                        .route("/login", web::post().to(auth::login))
                        .route("/check", web::get().to(auth::check))
                        .route("/logout", web::post().to(auth::logout)),
                )
                // Post routes; `/upload` must precede `/{id}`
                .service(
                    web::scope("/posts")
                        .route("", web::get().to(posts::list))
                        .route("", web::post().to(posts::write))
                        .route("/upload", web::post().to(upload::upload))
                        .route("/{id}", web::get().to(posts::read))
                        .route("/{id}", web::patch().to(posts::update))
                        .route("/{id}", web::delete().to(posts::delete)),
                ),
        );
}
