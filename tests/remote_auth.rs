use axum::{extract::Extension, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use portal::auth::{AuthCollaborator, AuthError, RemoteAuth, SignUp};
use secrecy::SecretString;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use url::Url;

type Seen = Arc<Mutex<Vec<Value>>>;

async fn sign_in(Extension(seen): Extension<Seen>, Json(body): Json<Value>) -> impl IntoResponse {
    seen.lock().unwrap().push(body.clone());
    match body["password"].as_str() {
        Some("longenough1") => (
            StatusCode::OK,
            Json(json!({
                "token": "t",
                "user": {"id": "u_1", "name": "Test", "email": body["email"], "emailVerified": true}
            })),
        ),
        Some("explode!!") => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "boom"})),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"code": "INVALID_EMAIL_OR_PASSWORD"})),
        ),
    }
}

async fn sign_up(Extension(seen): Extension<Seen>, Json(body): Json<Value>) -> impl IntoResponse {
    seen.lock().unwrap().push(body.clone());
    Json(json!({
        "user": {
            "id": "u_2",
            "name": body["name"],
            "email": body["email"],
            "cellPhone": body["cellPhone"],
            "role": "customer"
        }
    }))
}

/// Serve a fake auth server under `/api/auth` and return its base url.
async fn spawn_auth_server(seen: Seen) -> Url {
    let app = Router::new()
        .route("/api/auth/sign-in/email", post(sign_in))
        .route("/api/auth/sign-up/email", post(sign_up))
        .layer(Extension(seen));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Url::parse(&format!("http://{addr}/api/auth")).unwrap()
}

#[tokio::test]
async fn sign_in_returns_the_user() {
    let seen = Seen::default();
    let auth = RemoteAuth::new(spawn_auth_server(seen.clone()).await).unwrap();

    let user = auth
        .sign_in_with_password("user@test.com", &SecretString::from("longenough1".to_string()))
        .await
        .unwrap();

    assert_eq!(user.id, "u_1");
    assert_eq!(user.email, "user@test.com");
    assert!(user.email_verified);
    assert_eq!(user.role, "user");

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0], json!({"email": "user@test.com", "password": "longenough1"}));
}

#[tokio::test]
async fn sign_in_refused_is_a_rejection() {
    let auth = RemoteAuth::new(spawn_auth_server(Seen::default()).await).unwrap();

    let err = auth
        .sign_in_with_password("user@test.com", &SecretString::from("wrongpass".to_string()))
        .await
        .unwrap_err();

    assert!(err.is_rejection());
    assert!(matches!(err, AuthError::Rejected { status: 401, .. }));
}

#[tokio::test]
async fn server_error_is_not_a_rejection() {
    let auth = RemoteAuth::new(spawn_auth_server(Seen::default()).await).unwrap();

    let err = auth
        .sign_in_with_password("user@test.com", &SecretString::from("explode!!".to_string()))
        .await
        .unwrap_err();

    assert!(!err.is_rejection());
    assert!(matches!(err, AuthError::Http { status: 500, .. }));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let auth = RemoteAuth::new(Url::parse(&format!("http://{addr}/api/auth")).unwrap()).unwrap();
    let err = auth
        .sign_in_with_password("user@test.com", &SecretString::from("longenough1".to_string()))
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::Transport(_)));
}

#[tokio::test]
async fn sign_up_sends_wire_names() {
    let seen = Seen::default();
    let auth = RemoteAuth::new(spawn_auth_server(seen.clone()).await).unwrap();

    let user = auth
        .sign_up_with_password(&SignUp {
            name: "Maria Silva".to_string(),
            email: "maria@test.com".to_string(),
            password: SecretString::from("abcdefgh".to_string()),
            cell_phone: Some("11987654321".to_string()),
            callback_url: "/home".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(user.name, "Maria Silva");
    assert_eq!(user.role, "customer");
    assert_eq!(user.cell_phone.as_deref(), Some("11987654321"));

    let body = seen.lock().unwrap()[0].clone();
    assert_eq!(body["cellPhone"], "11987654321");
    assert_eq!(body["callbackURL"], "/home");
    assert_eq!(body["password"], "abcdefgh");
}

#[tokio::test]
async fn sign_up_without_phone_omits_it() {
    let seen = Seen::default();
    let auth = RemoteAuth::new(spawn_auth_server(seen.clone()).await).unwrap();

    auth.sign_up_with_password(&SignUp {
        name: "Maria Silva".to_string(),
        email: "maria@test.com".to_string(),
        password: SecretString::from("abcdefgh".to_string()),
        cell_phone: None,
        callback_url: "/home".to_string(),
    })
    .await
    .unwrap();

    let body = seen.lock().unwrap()[0].clone();
    assert!(body.get("cellPhone").is_none());
}
