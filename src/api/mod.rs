//! REST API modules.

use std::sync::Arc;

use actix_web::web;

use crate::models::Error;
use crate::persistence::UserRepository;

pub mod health;
pub mod users;

/// Dependency bundle for HTTP handlers.
///
/// Handlers accept this state via `actix_web::web::Data` so they only depend
/// on the store port and remain testable without a database.
#[derive(Clone)]
pub struct AppState {
    /// Store port backing the user endpoints.
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    /// Construct state around a store implementation.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

/// JSON extractor configuration mapping body deserialisation failures to a
/// 400 error envelope instead of actix's default plain-text response.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| Error::invalid_request(format!("invalid JSON body: {err}")).into())
}

/// Path extractor configuration mapping non-numeric ids to a 400 error
/// envelope.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid path parameter: {err}")).into()
    })
}

/// Register the user resource routes and extractor configuration.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .service(users::list_users)
        .service(users::get_user)
        .service(users::create_user)
        .service(users::update_user)
        .service(users::delete_user);
}
