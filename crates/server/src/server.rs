use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use engine::{Engine, Identity};
use uuid::Uuid;

use std::sync::Arc;

use crate::{ServerError, categories, clients, orders, products, stock, user};

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "session";

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Read the session id from the cookie jar, if any.
///
/// A malformed value is treated like a missing one.
pub(crate) fn session_id(jar: &CookieJar) -> Option<Uuid> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

pub(crate) async fn resolve_identity(
    state: &ServerState,
    jar: &CookieJar,
) -> Result<Identity, ServerError> {
    match session_id(jar) {
        Some(id) => Ok(state.engine.identity(id).await?),
        None => Ok(Identity::Anonymous),
    }
}

async fn auth(
    State(state): State<ServerState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let Identity::Authenticated(user) = resolve_identity(&state, &jar).await? else {
        return Err(ServerError::Unauthorized);
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn router(state: ServerState) -> Router {
    let protected = Router::new()
        .route("/clients", get(clients::list).post(clients::create))
        .route("/products", get(products::list).post(products::create))
        .route("/products/{id}", get(products::get))
        .route("/categories", get(categories::list).post(categories::create))
        .route("/stock", get(stock::list).post(stock::create))
        .route("/orders", get(orders::list).post(orders::create))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    Router::new()
        .route("/sign_up", post(user::sign_up))
        .route("/sign_in", post(user::sign_in))
        .route("/sign_out", post(user::sign_out))
        .route("/me", get(user::me))
        .merge(protected)
        .with_state(state)
}

/// Build the application router around an engine.
pub fn app(engine: Engine) -> Router {
    router(ServerState {
        engine: Arc::new(engine),
    })
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine)).await
}
