use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::require_auth;
use crate::state::AppState;

pub mod protected;
pub mod public;

/// Full HTTP surface: public auth routes plus the token-gated ad routes.
pub fn router(state: AppState) -> Router {
    let app = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .merge(auth_public_routes())
        // Protected
        .merge(ads_routes(state.clone()))
        // Global middleware
        .layer(DefaultBodyLimit::max(state.config.api.max_request_size_bytes))
        .layer(TraceLayer::new_for_http());

    let app = if state.config.security.enable_cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    };

    app.with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/register", post(auth::register_post))
        .route("/login", post(auth::login_post))
}

fn ads_routes(state: AppState) -> Router<AppState> {
    use protected::ads;

    Router::new()
        .route("/ads", get(ads::ads_list).post(ads::ads_create))
        .route("/ads/:id", put(ads::ads_update).delete(ads::ads_delete))
        .route_layer(axum::middleware::from_fn_with_state(state, require_auth))
}
