use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn test_app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = engine::Engine::builder()
        .database(db)
        .build()
        .await
        .unwrap();
    server::app(engine)
}

fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(res: axum::response::Response) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Sign up and sign in, returning the `name=value` cookie pair.
async fn signed_in(app: &Router, username: &str, password: &str) -> String {
    let res = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/sign_up",
            None,
            json!({
                "username": username,
                "password": password,
                "password_confirmation": password,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/sign_in",
            None,
            json!({ "username": username, "password": password }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let set_cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.contains("HttpOnly"));
    set_cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn inventory_routes_require_a_session() {
    let app = test_app().await;

    for uri in ["/clients", "/products", "/categories", "/stock", "/orders"] {
        let res = app.clone().oneshot(get_request(uri, None)).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }

    let res = app
        .clone()
        .oneshot(get_request(
            "/clients",
            Some("session=00000000-0000-0000-0000-000000000000"),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn sign_in_with_wrong_password_is_401() {
    let app = test_app().await;
    signed_in(&app, "alice", "secret").await;

    let res = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/sign_in",
            None,
            json!({ "username": "alice", "password": "wrong" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn duplicate_sign_up_is_409() {
    let app = test_app().await;
    signed_in(&app, "alice", "secret").await;

    let res = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/sign_up",
            None,
            json!({
                "username": "alice",
                "password": "other",
                "password_confirmation": "other",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn me_follows_sign_in_and_sign_out() {
    let app = test_app().await;
    let cookie = signed_in(&app, "alice", "secret").await;

    let res = app
        .clone()
        .oneshot(get_request("/me", Some(&cookie)))
        .await
        .unwrap();
    let me = body_json(res).await;
    assert_eq!(me["authenticated"], json!(true));
    assert_eq!(me["user"]["username"], json!("alice"));

    let res = app
        .clone()
        .oneshot(json_request("POST", "/sign_out", Some(&cookie), json!({})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = app
        .clone()
        .oneshot(get_request("/me", Some(&cookie)))
        .await
        .unwrap();
    let me = body_json(res).await;
    assert_eq!(me["authenticated"], json!(false));
    assert_eq!(me["user"], Value::Null);
}

#[tokio::test]
async fn category_product_round_trip() {
    let app = test_app().await;
    let cookie = signed_in(&app, "alice", "secret").await;

    let res = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/categories",
            Some(&cookie),
            json!({ "name": "Tools" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let category_id = body_json(res).await["id"].as_i64().unwrap();

    let res = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/products",
            Some(&cookie),
            json!({ "code": "P1", "name": "Hammer", "categories": [category_id] }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let product_id = body_json(res).await["id"].as_i64().unwrap();

    let res = app
        .clone()
        .oneshot(get_request(&format!("/products/{product_id}"), Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let product = body_json(res).await;
    assert_eq!(product["name"], json!("Hammer"));
    assert_eq!(product["categories"][0]["name"], json!("Tools"));

    let res = app
        .clone()
        .oneshot(get_request("/products/999", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_category_is_422() {
    let app = test_app().await;
    let cookie = signed_in(&app, "alice", "secret").await;

    let res = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/products",
            Some(&cookie),
            json!({ "code": "P1", "name": "Hammer", "categories": [42] }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn duplicate_client_is_409() {
    let app = test_app().await;
    let cookie = signed_in(&app, "alice", "secret").await;

    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let res = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/clients",
                Some(&cookie),
                json!({ "name": "ACME" }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), expected);
    }

    let res = app
        .clone()
        .oneshot(get_request("/clients", Some(&cookie)))
        .await
        .unwrap();
    let clients = body_json(res).await;
    assert_eq!(clients["clients"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn orders_belong_to_the_session_user() {
    let app = test_app().await;
    let alice = signed_in(&app, "alice", "secret").await;
    let bob = signed_in(&app, "bob", "hunter2").await;

    let res = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/products",
            Some(&alice),
            json!({ "code": "P1", "name": "Hammer" }),
        ))
        .await
        .unwrap();
    let product_id = body_json(res).await["id"].as_i64().unwrap();

    let res = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/orders",
            Some(&alice),
            json!({ "product_id": product_id, "quantity": 2 }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app
        .clone()
        .oneshot(get_request("/orders", Some(&alice)))
        .await
        .unwrap();
    assert_eq!(body_json(res).await["orders"].as_array().unwrap().len(), 1);

    let res = app
        .clone()
        .oneshot(get_request("/orders", Some(&bob)))
        .await
        .unwrap();
    assert!(body_json(res).await["orders"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn orphan_stock_entry() {
    let app = test_app().await;
    let cookie = signed_in(&app, "alice", "secret").await;

    let res = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/stock",
            Some(&cookie),
            json!({ "quantity": 5 }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let stock = body_json(res).await;
    assert_eq!(stock["quantity"], json!(5));
    assert_eq!(stock["product_id"], Value::Null);
}
