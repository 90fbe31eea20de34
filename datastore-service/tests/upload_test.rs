mod common;

use axum::http::StatusCode;
use common::TestApp;
use datastore_service::config::DatastoreConfig;
use datastore_service::startup::Application;
use reqwest::multipart;
use uuid::Uuid;

#[tokio::test]
#[ignore] // Requires MongoDB - run with a local instance
async fn upload_file_works() {
    // 1. Setup
    if std::env::var("MONGODB_URI").is_err() {
        std::env::set_var("MONGODB_URI", "mongodb://localhost:27017");
    }
    let mut config = DatastoreConfig::load().expect("Failed to load configuration");
    config.common.port = 0; // Random port
    config.storage.local_path = format!("target/test-blobs-{}", Uuid::new_v4());

    // Unique DB for test
    let db_name = format!("datastore_test_{}", Uuid::new_v4().simple());
    config.mongodb.database = db_name.clone();

    let app = Application::build(config.clone())
        .await
        .expect("Failed to build application");
    let port = app.port();
    let db = app.db().clone();

    tokio::spawn(app.run_until_stopped());

    // 2. Request
    let client = reqwest::Client::new();
    let form = multipart::Form::new().part(
        "file",
        multipart::Part::bytes(b"hello world".to_vec())
            .file_name("hello.txt")
            .mime_str("text/plain")
            .unwrap(),
    );

    let response = client
        .post(format!("http://127.0.0.1:{}/files", port))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");

    // 3. Assert response
    assert_eq!(StatusCode::OK, response.status());
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("hello.txt"));

    // 4. Verify storage
    let blob_path = std::path::Path::new(&config.storage.local_path).join("hello.txt");
    let stored = tokio::fs::read(&blob_path).await.expect("Blob not written");
    assert_eq!(stored, b"hello world");

    // Cleanup
    let _ = db.client().database(&db_name).drop(None).await;
    let _ = tokio::fs::remove_dir_all(&config.storage.local_path).await;
}

#[tokio::test]
#[ignore] // Requires MongoDB - run with a local instance
async fn upload_without_a_file_field_returns_400() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();

    let form = multipart::Form::new().text("data", "just a value");

    let response = client
        .post(format!("{}/files", app.address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::BAD_REQUEST, response.status());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(
        body["error"]
            .as_str()
            .expect("error should be a string")
            .contains("file")
    );

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires MongoDB - run with a local instance
async fn upload_picks_the_file_field_among_others() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();

    let form = multipart::Form::new()
        .text("description", "quarterly notes")
        .part(
            "file",
            multipart::Part::bytes(b"meeting notes".to_vec())
                .file_name("notes.txt")
                .mime_str("text/plain")
                .unwrap(),
        );

    let response = client
        .post(format!("{}/files", app.address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, response.status());

    let stored = tokio::fs::read(std::path::Path::new(&app.storage_path).join("notes.txt"))
        .await
        .expect("Blob not written");
    assert_eq!(stored, b"meeting notes");

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires MongoDB - run with a local instance
async fn upload_without_a_filename_stores_under_a_fallback_name() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();

    // A part named "file" with no filename attached.
    let form = multipart::Form::new().text("file", "raw value");

    let response = client
        .post(format!("{}/files", app.address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, response.status());

    let stored = tokio::fs::read(std::path::Path::new(&app.storage_path).join("unnamed"))
        .await
        .expect("Blob not written");
    assert_eq!(stored, b"raw value");

    app.cleanup().await;
}
