//! User directory service library modules.

pub mod api;
pub mod config;
pub mod doc;
pub mod middleware;
pub mod models;
pub mod persistence;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::ResponseHeaders;
