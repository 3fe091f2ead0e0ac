//! Sign-up, sign-in and session endpoints.

use api_types::user::{Me, SignIn, SignUp, UserView};
use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use engine::NewUser;

use crate::{
    ServerError,
    server::{SESSION_COOKIE, ServerState, resolve_identity, session_id},
};

pub(crate) fn map_user(user: engine::User) -> UserView {
    UserView {
        id: user.id,
        username: user.username,
    }
}

/// Register a new user.
pub async fn sign_up(
    State(state): State<ServerState>,
    Json(payload): Json<SignUp>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    let user = state
        .engine
        .register_user(NewUser {
            username: payload.username,
            password: payload.password,
            password_confirmation: payload.password_confirmation,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(map_user(user))))
}

/// Open a session and hand its id to the browser as an HttpOnly cookie.
pub async fn sign_in(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(payload): Json<SignIn>,
) -> Result<(CookieJar, Json<UserView>), ServerError> {
    let session = state
        .engine
        .sign_in(&payload.username, &payload.password)
        .await?;

    let cookie = Cookie::build((SESSION_COOKIE, session.id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    Ok((jar.add(cookie), Json(map_user(session.user))))
}

/// Drop the session binding, if any, and clear the cookie.
pub async fn sign_out(
    State(state): State<ServerState>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode), ServerError> {
    if let Some(id) = session_id(&jar) {
        state.engine.sign_out(id).await?;
    }
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    Ok((jar, StatusCode::NO_CONTENT))
}

pub async fn me(
    State(state): State<ServerState>,
    jar: CookieJar,
) -> Result<Json<Me>, ServerError> {
    let identity = resolve_identity(&state, &jar).await?;
    Ok(Json(Me {
        authenticated: identity.is_authenticated(),
        user: identity.user().cloned().map(map_user),
    }))
}
