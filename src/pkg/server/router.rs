use axum::middleware::from_fn_with_state;
use axum::routing::{get, patch, post};
use axum::Router;

use super::handlers;
use super::handlers::auth::{login, refresh, register};
use super::handlers::probes::{healthz, livez};
use super::middlewares::authn;
use super::state::AppState;
use crate::prelude::Result;

pub async fn build_routes() -> Result<Router> {
    let state = AppState::new().await?;
    let app = Router::new()
        .route(
            "/profile",
            get(handlers::profile::retrieve).put(handlers::profile::update),
        )
        .route("/profile/picture", post(handlers::profile::upload_picture))
        .route(
            "/resume",
            get(handlers::resume::retrieve).put(handlers::resume::update),
        )
        .route("/resume/file", post(handlers::resume::upload))
        .route("/resume/:user_id", get(handlers::resume::retrieve_for_user))
        .route(
            "/jobs",
            get(handlers::jobs::list).post(handlers::jobs::create),
        )
        .route(
            "/jobs/employer/:employer_id",
            get(handlers::jobs::list_for_employer),
        )
        .route(
            "/jobs/:id",
            get(handlers::jobs::retrieve)
                .put(handlers::jobs::update)
                .delete(handlers::jobs::delete),
        )
        .route(
            "/jobs/:id/has-applied",
            get(handlers::proposals::has_applied),
        )
        .route(
            "/jobs/:id/proposals",
            get(handlers::proposals::list_for_job),
        )
        .route("/proposals", post(handlers::proposals::create))
        .route(
            "/proposals/freelancer",
            get(handlers::proposals::list_mine),
        )
        .route("/proposals/:id", patch(handlers::proposals::update_status))
        .route("/chat/rooms", get(handlers::chat::rooms))
        .route("/chat/start", post(handlers::chat::start))
        .route(
            "/chat/rooms/:room_id/messages",
            get(handlers::chat::list_messages).post(handlers::chat::create_message),
        )
        .layer(from_fn_with_state(state.clone(), authn::authenticate))
        .route("/register", post(register))
        .route("/token", post(login))
        .route("/token/refresh", post(refresh))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .with_state(state);

    Ok(app)
}
