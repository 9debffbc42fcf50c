use std::{fs, path::PathBuf};

use apex_studio::{config::Config, router, state::AppState};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

struct TestSite {
    app: Router,
    data_dir: PathBuf,
    _dirs: (TempDir, TempDir),
}

fn test_site() -> TestSite {
    let data = TempDir::new().unwrap();
    let public = TempDir::new().unwrap();

    for page in ["index.html", "services.html", "contact.html", "404.html"] {
        fs::write(public.path().join(page), format!("<h1>{page}</h1>")).unwrap();
    }

    let state = AppState::new(Config {
        port: 0,
        data_dir: data.path().to_path_buf(),
        public_dir: public.path().to_path_buf(),
        production: false,
    });

    TestSite {
        app: router(state),
        data_dir: data.path().to_path_buf(),
        _dirs: (data, public),
    }
}

async fn get(app: Router, path: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn post_json(app: Router, path: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

fn read_collection(site: &TestSite, file: &str) -> Vec<Value> {
    let raw = fs::read_to_string(site.data_dir.join(file)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test]
async fn contact_round_trip() {
    let site = test_site();

    let (status, body) = post_json(
        site.app.clone(),
        "/api/contact",
        json!({ "name": "Ada", "email": "ada@example.com", "message": "Hello" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let contacts = read_collection(&site, "contacts.json");
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0]["name"], "Ada");
    assert_eq!(contacts[0]["email"], "ada@example.com");
    assert_eq!(contacts[0]["message"], "Hello");
    assert!(contacts[0]["id"].is_i64());
    assert!(contacts[0]["submittedAt"].is_string());
}

#[tokio::test]
async fn contact_missing_fields_rejected_without_append() {
    let site = test_site();

    let (status, body) = post_json(
        site.app.clone(),
        "/api/contact",
        json!({ "email": "ada@example.com" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("name"));
    assert!(error.contains("message"));

    assert!(!site.data_dir.join("contacts.json").exists());
}

#[tokio::test]
async fn malformed_email_rejected_on_both_endpoints() {
    let site = test_site();

    let (status, _) = post_json(
        site.app.clone(),
        "/api/contact",
        json!({ "name": "Ada", "email": "not-an-email", "message": "Hello" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post_json(
        site.app.clone(),
        "/api/newsletter",
        json!({ "email": "missing-the-tld@localhost" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please provide a valid email address.");

    assert!(!site.data_dir.join("contacts.json").exists());
    assert!(!site.data_dir.join("subscribers.json").exists());
}

#[tokio::test]
async fn contact_phone_must_look_like_a_phone_number() {
    let site = test_site();

    let (status, _) = post_json(
        site.app.clone(),
        "/api/contact",
        json!({
            "name": "Ada",
            "email": "ada@example.com",
            "phone": "555-CALL-ADA",
            "message": "Hello",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(
        site.app.clone(),
        "/api/contact",
        json!({
            "name": "Ada",
            "email": "ada@example.com",
            "phone": "+1 555-123-4567",
            "message": "Hello",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn newsletter_resubscribe_is_idempotent() {
    let site = test_site();
    let payload = json!({ "email": "test@test.com" });

    let (status, body) = post_json(site.app.clone(), "/api/newsletter", payload.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "You're in! Thanks for subscribing.");

    let (status, body) = post_json(site.app.clone(), "/api/newsletter", payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "You're already subscribed!");

    let subscribers = read_collection(&site, "subscribers.json");
    assert_eq!(subscribers.len(), 1);
    assert_eq!(subscribers[0]["email"], "test@test.com");
    assert!(subscribers[0]["subscribedAt"].is_string());
}

#[tokio::test]
async fn corrupt_collection_file_recovers_as_empty() {
    let site = test_site();
    fs::write(site.data_dir.join("contacts.json"), "{definitely not json").unwrap();

    let (status, _) = post_json(
        site.app.clone(),
        "/api/contact",
        json!({ "name": "Ada", "email": "ada@example.com", "message": "Hello" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(read_collection(&site, "contacts.json").len(), 1);
}

#[tokio::test]
async fn malformed_body_is_a_client_error() {
    let site = test_site();

    let response = site
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/newsletter")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn clean_urls_serve_their_pages() {
    let site = test_site();

    for (path, page) in [
        ("/", "index.html"),
        ("/services", "services.html"),
        ("/contact", "contact.html"),
    ] {
        let (status, body) = get(site.app.clone(), path).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(page));
    }
}

#[tokio::test]
async fn unmatched_route_serves_not_found_page() {
    let site = test_site();

    let (status, body) = get(site.app.clone(), "/nonexistent").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("404.html"));
}
