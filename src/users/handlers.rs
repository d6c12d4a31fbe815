use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::instrument;

use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::response::Envelope;
use crate::state::AppState;
use crate::users::dto::{EditRequest, LoginRequest, PublicUser, RegisterRequest};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/users", get(list_users))
        .route(
            "/users/:id",
            put(edit_user).patch(edit_user).delete(delete_user),
        )
}

#[instrument(skip(state, payload))]
async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<Envelope<()>>), AppError> {
    state.users.register(&payload.email, &payload.password).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::empty("Success Register")),
    ))
}

#[instrument(skip(state, payload))]
async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<Envelope<()>>, AppError> {
    state.users.login(&payload.email, &payload.password).await?;
    Ok(Json(Envelope::empty("Success Login")))
}

#[instrument(skip(state))]
async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<PublicUser>>>, AppError> {
    let users = state.users.list().await?;
    Ok(Json(Envelope::success(users, "List User")))
}

#[instrument(skip(state, payload))]
async fn edit_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<EditRequest>,
) -> Result<(StatusCode, Json<Envelope<()>>), AppError> {
    state.users.edit(id, payload).await?;
    Ok((StatusCode::CREATED, Json(Envelope::empty("Success Edit"))))
}

#[instrument(skip(state))]
async fn delete_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Envelope<()>>, AppError> {
    state.users.delete(id).await?;
    Ok(Json(Envelope::empty("Success Delete User")))
}
