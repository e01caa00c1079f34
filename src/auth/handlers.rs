use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::{LoginRequest, PublicUser, SignupRequest},
        services::{self, Registration},
        session::{CurrentUser, SessionKeys},
    },
    error::{AppError, AppResult},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", delete(logout))
}

pub fn session_routes() -> Router<AppState> {
    Router::new().route("/check_session", get(check_session))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(body) = payload?;

    let user = services::create_user(
        state.users.as_ref(),
        Registration {
            username: body.username.as_deref(),
            password: body.password.as_deref(),
            image_url: body.image_url.as_deref(),
            bio: body.bio.as_deref(),
        },
    )
    .await?;

    let cookie = SessionKeys::from_ref(&state).set_cookie(user.id)?;

    info!(user_id = %user.id, username = %user.username, "user signed up");
    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(PublicUser::from(user)),
    ))
}

/// 200 with the current user, or 401 with an empty object.
#[instrument(skip(session))]
pub async fn check_session(session: Result<CurrentUser, AppError>) -> AppResult<Response> {
    match session {
        Ok(CurrentUser(user)) => Ok(Json(PublicUser::from(user)).into_response()),
        Err(AppError::Unauthorized) => {
            Ok((StatusCode::UNAUTHORIZED, Json(serde_json::json!({}))).into_response())
        }
        Err(e) => Err(e),
    }
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(body) = payload?;
    let (Some(username), Some(password)) = (body.username.as_deref(), body.password.as_deref())
    else {
        return Err(AppError::validation("Username and password are required."));
    };

    let user = services::login(state.users.as_ref(), username, password).await?;
    let cookie = SessionKeys::from_ref(&state).set_cookie(user.id)?;

    info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(PublicUser::from(user)),
    ))
}

#[instrument(skip(state, user))]
pub async fn logout(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<impl IntoResponse> {
    let cookie = SessionKeys::from_ref(&state).clear_cookie()?;

    info!(user_id = %user.id, "user logged out");
    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}
