//! Router-level tests: requests go through the full axum stack
//! (bearer middleware, extractors, error envelope) over the in-memory store.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use taskboard::auth::password::hash_password;
use taskboard::auth::{AccessService, CredentialStore, TokenCodec};
use taskboard::config::{DEFAULT_TOKEN_TTL_SECS, SigningSecret};
use taskboard::gateway::{build_router, state::AppState};
use taskboard::store::MemoryStore;

// ─── Test helpers ───────────────────────────────────────────────────────

const EMAIL: &str = "owner@example.com";
const PASSWORD: &str = "secret";

struct TestApp {
    router: Router,
    store: Arc<MemoryStore>,
    access: Arc<AccessService>,
}

async fn test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    store
        .create_user(EMAIL, &hash_password(PASSWORD).unwrap())
        .await
        .unwrap();

    let codec = TokenCodec::new(
        &SigningSecret::new("integration-secret").unwrap(),
        DEFAULT_TOKEN_TTL_SECS,
    );
    let access = Arc::new(AccessService::new(store.clone(), codec));
    let state = AppState::new(access.clone(), store.clone(), store.clone());

    TestApp {
        router: build_router(state),
        store,
        access,
    }
}

struct Reply {
    status: StatusCode,
    challenge: Option<String>,
    body: Value,
}

impl TestApp {
    async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Reply {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let challenge = response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        Reply {
            status,
            challenge,
            body,
        }
    }

    async fn login(&self, email: &str, password: &str) -> Reply {
        self.send(
            Method::POST,
            "/api/v1/authentication",
            None,
            Some(json!({ "credentials": { "email": email, "password": password } })),
        )
        .await
    }

    async fn token(&self) -> String {
        let reply = self.login(EMAIL, PASSWORD).await;
        assert_eq!(reply.status, StatusCode::OK);
        reply.body["data"]["token"].as_str().unwrap().to_string()
    }

    async fn create(&self, token: &str, uri: &str, body: Value) -> Value {
        let reply = self.send(Method::POST, uri, Some(token), Some(body)).await;
        assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
        reply.body["data"].clone()
    }
}

fn assert_error(reply: &Reply, status: StatusCode, msg: &str) {
    assert_eq!(reply.status, status, "{}", reply.body);
    assert_eq!(reply.body["msg"], msg);
    assert_ne!(reply.body["code"], 0);
    assert!(reply.body.get("data").is_none());
}

// ─── System ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_is_public() {
    let app = test_app().await;
    let reply = app.send(Method::GET, "/api/v1/health", None, None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["code"], 0);
    assert!(reply.body["data"]["timestamp_ms"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = test_app().await;
    let reply = app
        .send(Method::GET, "/api-docs/openapi.json", None, None)
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body["paths"]["/api/v1/authentication"].is_object());
}

// ─── Authentication ─────────────────────────────────────────────────────

#[tokio::test]
async fn login_issues_a_usable_token() {
    let app = test_app().await;
    let token = app.token().await;

    let subject = app.access.grant_access(&token).await.unwrap();
    assert_eq!(subject.user.email, EMAIL);

    let org = app
        .create(&token, "/api/v1/organizations", json!({ "name": "Acme" }))
        .await;
    assert_eq!(org["name"], "Acme");
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = test_app().await;

    let wrong_password = app.login(EMAIL, "nope").await;
    let unknown_email = app.login("ghost@example.com", PASSWORD).await;
    let empty_password = app.login(EMAIL, "").await;

    for reply in [&wrong_password, &unknown_email, &empty_password] {
        assert_error(reply, StatusCode::UNAUTHORIZED, "Invalid Credentials");
        assert_eq!(reply.challenge.as_deref(), Some("Bearer"));
    }
    assert_eq!(wrong_password.body, unknown_email.body);
}

#[tokio::test]
async fn login_without_credentials_object_is_rejected() {
    let app = test_app().await;
    let reply = app
        .send(
            Method::POST,
            "/api/v1/authentication",
            None,
            Some(json!({})),
        )
        .await;
    assert_error(&reply, StatusCode::UNAUTHORIZED, "Invalid Credentials");
}

#[tokio::test]
async fn protected_routes_require_bearer() {
    let app = test_app().await;

    let reply = app
        .send(Method::GET, "/api/v1/organizations/1", None, None)
        .await;
    assert_error(&reply, StatusCode::UNAUTHORIZED, "User unauthorized for action");
    assert_eq!(reply.challenge.as_deref(), Some("Bearer"));

    let request = Request::builder()
        .uri("/api/v1/organizations/1")
        .header(header::AUTHORIZATION, "Basic b3duZXI6c2VjcmV0")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_is_invalid() {
    let app = test_app().await;
    let reply = app
        .send(Method::GET, "/api/v1/organizations/1", Some("not.a.jwt"), None)
        .await;
    assert_error(&reply, StatusCode::UNAUTHORIZED, "Invalid Token");
}

#[tokio::test]
async fn token_signed_with_another_secret_is_invalid() {
    let app = test_app().await;
    let foreign = TokenCodec::new(&SigningSecret::new("other-secret").unwrap(), 60)
        .encode(1)
        .unwrap();
    let reply = app
        .send(Method::GET, "/api/v1/organizations/1", Some(&foreign), None)
        .await;
    assert_error(&reply, StatusCode::UNAUTHORIZED, "Invalid Token");
}

#[tokio::test]
async fn expired_token_is_unauthorized() {
    let app = test_app().await;
    let now = chrono::Utc::now().timestamp();
    let expired = app
        .access
        .codec()
        .encode_at(1, now - 2 * DEFAULT_TOKEN_TTL_SECS)
        .unwrap();

    let reply = app
        .send(Method::GET, "/api/v1/organizations/1", Some(&expired), None)
        .await;
    assert_error(&reply, StatusCode::UNAUTHORIZED, "User unauthorized for action");
}

#[tokio::test]
async fn token_of_deleted_user_is_unauthorized() {
    let app = test_app().await;
    let token = app.token().await;
    assert!(app.store.remove_user(1));

    let reply = app
        .send(Method::GET, "/api/v1/organizations/1", Some(&token), None)
        .await;
    assert_error(&reply, StatusCode::UNAUTHORIZED, "User unauthorized for action");
}

// ─── Registration ───────────────────────────────────────────────────────

#[tokio::test]
async fn register_then_login() {
    let app = test_app().await;
    let reply = app
        .send(
            Method::POST,
            "/api/v1/users",
            None,
            Some(json!({ "email": "new@example.com", "password": "pw" })),
        )
        .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["data"]["email"], "new@example.com");
    assert!(reply.body["data"].get("password_hash").is_none());

    assert_eq!(
        app.login("new@example.com", "pw").await.status,
        StatusCode::OK
    );
}

#[tokio::test]
async fn register_duplicate_email_fails_validation() {
    let app = test_app().await;
    let reply = app
        .send(
            Method::POST,
            "/api/v1/users",
            None,
            Some(json!({ "email": EMAIL, "password": "pw" })),
        )
        .await;
    assert_error(
        &reply,
        StatusCode::UNPROCESSABLE_ENTITY,
        "Email has already been taken",
    );
}

// ─── Organizations / Projects ───────────────────────────────────────────

#[tokio::test]
async fn organization_requires_name() {
    let app = test_app().await;
    let token = app.token().await;
    let reply = app
        .send(
            Method::POST,
            "/api/v1/organizations",
            Some(&token),
            Some(json!({ "name": "" })),
        )
        .await;
    assert_error(&reply, StatusCode::UNPROCESSABLE_ENTITY, "Name can't be blank");
}

#[tokio::test]
async fn project_lifecycle() {
    let app = test_app().await;
    let token = app.token().await;
    let org = app
        .create(&token, "/api/v1/organizations", json!({ "name": "Acme" }))
        .await;
    let base = format!("/api/v1/organizations/{}/projects", org["id"]);

    let project = app.create(&token, &base, json!({ "name": "Site" })).await;
    assert_eq!(project["organization_id"], org["id"]);
    let url = format!("{}/{}", base, project["id"]);

    let listed = app.send(Method::GET, &base, Some(&token), None).await;
    assert_eq!(listed.body["data"].as_array().unwrap().len(), 1);

    let shown = app.send(Method::GET, &url, Some(&token), None).await;
    assert_eq!(shown.body["data"], project);

    let blank = app
        .send(Method::PATCH, &url, Some(&token), Some(json!({ "name": " " })))
        .await;
    assert_error(&blank, StatusCode::UNPROCESSABLE_ENTITY, "Name can't be blank");

    let untouched = app
        .send(Method::PATCH, &url, Some(&token), Some(json!({})))
        .await;
    assert_eq!(untouched.status, StatusCode::OK);
    assert_eq!(untouched.body["data"]["name"], "Site");

    let renamed = app
        .send(
            Method::PATCH,
            &url,
            Some(&token),
            Some(json!({ "name": "Relaunch" })),
        )
        .await;
    assert_eq!(renamed.body["data"]["name"], "Relaunch");

    let deleted = app.send(Method::DELETE, &url, Some(&token), None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["code"], 0);

    let gone = app.send(Method::GET, &url, Some(&token), None).await;
    assert_error(&gone, StatusCode::NOT_FOUND, "Not Found");
}

#[tokio::test]
async fn project_under_foreign_organization_is_not_found() {
    let app = test_app().await;
    let token = app.token().await;
    let acme = app
        .create(&token, "/api/v1/organizations", json!({ "name": "Acme" }))
        .await;
    let other = app
        .create(&token, "/api/v1/organizations", json!({ "name": "Other" }))
        .await;
    let project = app
        .create(
            &token,
            &format!("/api/v1/organizations/{}/projects", acme["id"]),
            json!({ "name": "Site" }),
        )
        .await;

    let url = format!(
        "/api/v1/organizations/{}/projects/{}",
        other["id"], project["id"]
    );
    for method in [Method::GET, Method::DELETE] {
        let reply = app.send(method, &url, Some(&token), None).await;
        assert_error(&reply, StatusCode::NOT_FOUND, "Not Found");
    }
}

#[tokio::test]
async fn unknown_or_malformed_ids_are_not_found() {
    let app = test_app().await;
    let token = app.token().await;
    for uri in [
        "/api/v1/organizations/999",
        "/api/v1/organizations/abc",
        "/api/v1/organizations/999/projects",
        "/api/v1/projects/999/tasks",
    ] {
        let reply = app.send(Method::GET, uri, Some(&token), None).await;
        assert_error(&reply, StatusCode::NOT_FOUND, "Not Found");
    }
}

#[tokio::test]
async fn malformed_json_fails_validation() {
    let app = test_app().await;
    let token = app.token().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/organizations")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ─── Tasks ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn task_lifecycle_and_cascade() {
    let app = test_app().await;
    let token = app.token().await;
    let org = app
        .create(&token, "/api/v1/organizations", json!({ "name": "Acme" }))
        .await;
    let project_url = format!("/api/v1/organizations/{}/projects", org["id"]);
    let project = app
        .create(&token, &project_url, json!({ "name": "Site" }))
        .await;
    let tasks_url = format!("/api/v1/projects/{}/tasks", project["id"]);

    let missing = app
        .send(
            Method::POST,
            &tasks_url,
            Some(&token),
            Some(json!({ "name": "Copy" })),
        )
        .await;
    assert_error(
        &missing,
        StatusCode::UNPROCESSABLE_ENTITY,
        "Description can't be blank",
    );

    let task = app
        .create(
            &token,
            &tasks_url,
            json!({ "name": "Copy", "description": "Landing page" }),
        )
        .await;
    assert_eq!(task["project_id"], project["id"]);
    let task_url = format!("{}/{}", tasks_url, task["id"]);

    let updated = app
        .send(
            Method::PATCH,
            &task_url,
            Some(&token),
            Some(json!({ "description": "Pricing page" })),
        )
        .await;
    assert_eq!(updated.body["data"]["name"], "Copy");
    assert_eq!(updated.body["data"]["description"], "Pricing page");

    let listed = app.send(Method::GET, &tasks_url, Some(&token), None).await;
    assert_eq!(listed.body["data"].as_array().unwrap().len(), 1);

    let project_delete = format!("{}/{}", project_url, project["id"]);
    let deleted = app
        .send(Method::DELETE, &project_delete, Some(&token), None)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app.send(Method::GET, &task_url, Some(&token), None).await;
    assert_error(&gone, StatusCode::NOT_FOUND, "Not Found");
}

#[tokio::test]
async fn task_under_foreign_project_is_not_found() {
    let app = test_app().await;
    let token = app.token().await;
    let org = app
        .create(&token, "/api/v1/organizations", json!({ "name": "Acme" }))
        .await;
    let projects_url = format!("/api/v1/organizations/{}/projects", org["id"]);
    let p1 = app.create(&token, &projects_url, json!({ "name": "One" })).await;
    let p2 = app.create(&token, &projects_url, json!({ "name": "Two" })).await;
    let task = app
        .create(
            &token,
            &format!("/api/v1/projects/{}/tasks", p1["id"]),
            json!({ "name": "t", "description": "d" }),
        )
        .await;

    let reply = app
        .send(
            Method::GET,
            &format!("/api/v1/projects/{}/tasks/{}", p2["id"], task["id"]),
            Some(&token),
            None,
        )
        .await;
    assert_error(&reply, StatusCode::NOT_FOUND, "Not Found");
}
