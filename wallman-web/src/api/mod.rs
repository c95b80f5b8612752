//! Router module for handling all API routes

mod accounts;
mod admins;
mod applications;
mod categories;
mod control;
mod health;

use crate::middleware::auth::Authentication;
use actix_web::{error::JsonPayloadError, web, HttpRequest};
use wallman_error::web::WebError;

/// Largest icon or archive accepted in one upload
const MAX_ASSET_SIZE: usize = 32 * 1024 * 1024;

/// Configure all routes
///
/// `/health` stays outside the authentication middleware.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::PayloadConfig::new(MAX_ASSET_SIZE))
        .configure(health::configure_routes)
        .service(
            web::scope("")
                .wrap(Authentication)
                .service(web::scope(accounts::ROUTER_PREFIX).configure(accounts::configure_routes))
                .service(
                    web::scope(categories::ROUTER_PREFIX).configure(categories::configure_routes),
                )
                .service(
                    web::scope(applications::ROUTER_PREFIX)
                        .configure(applications::configure_routes),
                )
                .service(web::scope(admins::ROUTER_PREFIX).configure(admins::configure_routes))
                .service(web::scope(control::ROUTER_PREFIX).configure(control::configure_routes)),
        );
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    WebError::BadRequest(err.to_string()).into()
}
