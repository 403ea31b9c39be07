//! HTTP handlers and route configuration.

mod health;
pub mod posts;


use actix_web::{guard, web};

use crate::middleware::error::AppError;
use crate::middleware::{OwnershipGuard, PostLoader};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    .service(
                        web::resource("")
                            .route(web::get().to(posts::list))
                            .route(web::post().to(posts::create)),
                    )
                    .service(
                        web::resource("/{id}")
                            .guard(guard::Get())
                            .wrap(PostLoader)
                            .route(web::get().to(posts::read)),
                    )
                    // Owner-only routes: the loader runs first, then the guard.
                    .service(
                        web::resource("/{id}")
                            .wrap(OwnershipGuard)
                            .wrap(PostLoader)
                            .route(web::put().to(posts::update))
                            .route(web::delete().to(posts::remove)),
                    ),
            ),
    );
}
