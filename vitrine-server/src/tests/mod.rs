//! In-process API tests over a memory-backed gallery.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::{Value, json};
use tower::ServiceExt;
use vitrine_core::GalleryService;
use vitrine_core::blob::MemoryBlobStore;
use vitrine_core::store::MemoryStore;

use crate::{AppState, Config, routes};

fn test_config() -> Config {
    Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        database_url: "postgres://unused".to_string(),
        database_max_connections: 1,
        blob_bucket: "unused".to_string(),
        blob_endpoint_url: None,
        blob_public_base_url: "https://blobs.test".to_string(),
        admin_username: "admin".to_string(),
        admin_password: "secret".to_string(),
        cors_allowed_origins: Vec::new(),
        max_upload_bytes: 1024 * 1024,
    }
}

fn test_router() -> Router {
    let store = Arc::new(MemoryStore::new());
    let blobs = Arc::new(MemoryBlobStore::new("https://blobs.test"));
    let gallery = GalleryService::new(store.clone(), store, blobs);
    routes::create_router(AppState::new(gallery, test_config()))
}

fn admin_auth() -> String {
    format!("Basic {}", STANDARD.encode("admin:secret"))
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("request should complete");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be json")
    };
    (status, body)
}

fn admin_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, admin_auth())
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request should build")
}

async fn create_album(router: &Router, title: &str) -> String {
    let (status, body) = send(
        router,
        admin_json("POST", "/api/v1/admin/albums", json!({ "title": title })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().expect("album id").to_string()
}

#[tokio::test]
async fn health_is_open() {
    let router = test_router();
    let (status, body) = send(&router, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn admin_routes_demand_credentials() {
    let router = test_router();

    let response = router
        .clone()
        .oneshot(get("/api/v1/admin/albums"))
        .await
        .expect("request should complete");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let challenge = response
        .headers()
        .get(header::WWW_AUTHENTICATE)
        .expect("challenge header")
        .to_str()
        .expect("header should be ascii");
    assert!(challenge.starts_with("Basic "));

    let wrong = Request::builder()
        .uri("/api/v1/admin/albums")
        .header(
            header::AUTHORIZATION,
            format!("Basic {}", STANDARD.encode("admin:wrong")),
        )
        .body(Body::empty())
        .expect("request should build");
    let (status, _) = send(&router, wrong).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn public_routes_skip_auth() {
    let router = test_router();
    let (status, body) = send(&router, get("/api/v1/albums")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn created_albums_show_up_publicly() {
    let router = test_router();
    create_album(&router, "Open Day").await;

    let (status, body) = send(&router, get("/api/v1/albums")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["title"], "Open Day");
    assert_eq!(body[0]["photo_count"], 0);
    assert_eq!(body[0]["cover_url"], Value::Null);
}

#[tokio::test]
async fn blank_titles_are_rejected() {
    let router = test_router();
    let (status, body) = send(
        &router,
        admin_json("POST", "/api/v1/admin/albums", json!({ "title": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["status"], 400);
}

#[tokio::test]
async fn unknown_albums_return_not_found() {
    let router = test_router();
    let (status, _) = send(
        &router,
        get("/api/v1/albums/00000000-0000-0000-0000-000000000000/photos"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reorder_and_unpublish_shape_the_public_listing() {
    let router = test_router();
    let a = create_album(&router, "A").await;
    let b = create_album(&router, "B").await;
    let c = create_album(&router, "C").await;

    let (status, _) = send(
        &router,
        admin_json(
            "POST",
            "/api/v1/admin/albums/reorder",
            json!({ "ids": [c, a, b] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &router,
        admin_json(
            "PUT",
            &format!("/api/v1/admin/albums/{b}/published"),
            json!({ "published": false }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&router, get("/api/v1/albums")).await;
    let titles: Vec<_> = body
        .as_array()
        .expect("array body")
        .iter()
        .map(|entry| entry["title"].as_str().expect("title"))
        .collect();
    assert_eq!(titles, vec!["C", "A"]);
}

#[tokio::test]
async fn multipart_upload_creates_a_photo() {
    let router = test_router();
    let album = create_album(&router, "Uploads").await;

    let boundary = "vitrine-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"album_id\"\r\n\r\n");
    body.extend_from_slice(album.as_bytes());
    body.extend_from_slice(format!("\r\n--{boundary}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"title\"\r\n\r\nBeach\r\n");
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"file\"; filename=\"beach.jpg\"\r\n\
          Content-Type: image/jpeg\r\n\r\n",
    );
    body.extend_from_slice(&[0xffu8, 0xd8, 0xff, 0xe0]);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/admin/photos/upload")
        .header(header::AUTHORIZATION, admin_auth())
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .expect("request should build");

    let (status, photo) = send(&router, request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(photo["title"], "Beach");
    assert_eq!(photo["album_id"].as_str(), Some(album.as_str()));
    assert!(
        photo["url"]
            .as_str()
            .expect("url")
            .starts_with("https://blobs.test/albums/")
    );

    let (_, photos) = send(
        &router,
        get(&format!("/api/v1/albums/{album}/photos")),
    )
    .await;
    assert_eq!(photos.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn upload_without_file_field_is_rejected() {
    let router = test_router();
    let boundary = "vitrine-test-boundary";
    let body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\nNope\r\n--{boundary}--\r\n"
    );

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/admin/photos/upload")
        .header(header::AUTHORIZATION, admin_auth())
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .expect("request should build");

    let (status, body) = send(&router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["status"], 400);
}

#[tokio::test]
async fn attach_orphans_reports_the_moved_count() {
    let router = test_router();
    let album = create_album(&router, "Home").await;

    let (status, _) = send(
        &router,
        admin_json(
            "POST",
            "/api/v1/admin/photos",
            json!({ "url": "https://blobs.test/orphans/one.jpg" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, orphans) = send(
        &router,
        Request::builder()
            .uri("/api/v1/admin/photos/orphans")
            .header(header::AUTHORIZATION, admin_auth())
            .body(Body::empty())
            .expect("request should build"),
    )
    .await;
    assert_eq!(orphans.as_array().map(Vec::len), Some(1));

    let (status, body) = send(
        &router,
        admin_json(
            "POST",
            &format!("/api/v1/admin/albums/{album}/attach-orphans"),
            json!({}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["moved"], 1);
}
