//! Records API router.
//!
//! Layers (outermost first): `Cache-Control: no-store` → access log → handler.

use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the records router over a shared store.
pub fn records_router(core: Arc<CoreState>) -> Router {
    build_router(ApiContext::new(core))
}

fn build_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    // Static segments (`/search`, `/new`) take priority over `/:id`.
    Router::new()
        .route("/", get(endpoints::home::index))
        .route(
            "/patients",
            get(endpoints::patients::list).post(endpoints::patients::register),
        )
        .route("/patients/search", get(endpoints::patients::search))
        .route(
            "/patients/:id",
            get(endpoints::patients::detail).post(endpoints::patients::update),
        )
        .route(
            "/patients/:id/discharge",
            post(endpoints::patients::discharge),
        )
        .route(
            "/doctors",
            get(endpoints::doctors::list).post(endpoints::doctors::add),
        )
        .route("/doctors/search", get(endpoints::doctors::search))
        .route(
            "/doctors/:id",
            get(endpoints::doctors::detail).post(endpoints::doctors::update),
        )
        .route("/doctors/:id/delete", post(endpoints::doctors::delete))
        .route(
            "/appointments",
            get(endpoints::appointments::list).post(endpoints::appointments::schedule),
        )
        .route("/appointments/new", get(endpoints::appointments::choices))
        .route(
            "/appointments/:id",
            get(endpoints::appointments::detail).post(endpoints::appointments::reschedule),
        )
        .route(
            "/appointments/:id/discharge",
            post(endpoints::appointments::cancel),
        )
        .fallback(endpoints::not_found)
        .with_state(ctx)
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::overriding(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static("no-store"),
                ))
                .layer(axum::middleware::from_fn(middleware::audit::log_access)),
        )
}
