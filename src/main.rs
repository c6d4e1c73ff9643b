//! Service entry-point: configuration, store bootstrap, and HTTP wiring.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use user_directory::api::health::{HealthState, live, ready};
use user_directory::api::{self, AppState};
use user_directory::config::AppConfig;
use user_directory::persistence::{DbPool, DieselUserRepository};
use user_directory::ResponseHeaders;
#[cfg(debug_assertions)]
use user_directory::ApiDoc;

/// Application bootstrap.
///
/// Fails fast when the database is unreachable or the schema bootstrap
/// fails; once serving, store errors are per-request 500s and never
/// terminate the process.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::parse();

    let pool = DbPool::connect(&config.database_url)
        .await
        .map_err(std::io::Error::other)?;
    let repository = DieselUserRepository::new(pool);
    repository
        .ensure_schema()
        .await
        .map_err(std::io::Error::other)?;

    let state = AppState::new(Arc::new(repository));
    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays accessible.
    let server_health_state = health_state.clone();

    info!(addr = %config.bind_addr, "starting user directory service");
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(server_health_state.clone())
            .wrap(ResponseHeaders)
            .configure(api::routes)
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    server.run().await
}
