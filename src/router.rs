use crate::docs::ApiDoc;
use crate::middleware::rate_limit::auth_rate_limit;
use crate::modules::auth::router::{init_auth_router, init_logout_router};
use crate::modules::dashboard::router::init_dashboard_router;
use crate::modules::parents::router::init_parents_router;
use crate::modules::staff::router::init_staff_router;
use crate::modules::students::router::init_students_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use gsms_cache::private_no_store;
use gsms_observability::{logging_middleware, metrics_middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest(
                    "/auth",
                    init_auth_router()
                        .route_layer(middleware::from_fn_with_state(
                            state.clone(),
                            auth_rate_limit,
                        ))
                        .merge(init_logout_router()),
                )
                .merge(init_dashboard_router())
                .nest("/students", init_students_router())
                .nest("/staff", init_staff_router())
                .nest("/parents", init_parents_router())
                .layer(private_no_store()),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
