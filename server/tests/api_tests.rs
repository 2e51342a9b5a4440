use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use common::{Job, JobId};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use server::{JobStore, app};

fn seeded_app(count: usize) -> (Router, JobStore) {
    let jobs = (1..=count)
        .map(|i| Job {
            title: format!("Job {i}"),
            ..Job::default()
        })
        .collect();
    let store = JobStore::with_jobs(jobs);
    (app(store.clone()), store)
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_list_returns_all_jobs() {
    let (app, _) = seeded_app(5);
    let (status, body) = send(app, "GET", "/api/jobs", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 5);
    assert_eq!(body[0]["id"], "1");
}

#[tokio::test]
async fn test_list_honours_limit() {
    let (app, _) = seeded_app(5);
    let (status, body) = send(app, "GET", "/api/jobs?_limit=3", None).await;

    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|j| j["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Job 1", "Job 2", "Job 3"]);
}

#[tokio::test]
async fn test_get_single_job() {
    let (app, _) = seeded_app(2);
    let (status, body) = send(app, "GET", "/api/jobs/2", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Job 2");
}

#[tokio::test]
async fn test_get_missing_job_is_404() {
    let (app, _) = seeded_app(1);
    let (status, body) = send(app, "GET", "/api/jobs/9", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "job 9 not found");
}

#[tokio::test]
async fn test_create_assigns_id() {
    let (app, store) = seeded_app(2);
    let payload = json!({
        "title": "Rust Engineer",
        "type": "Remote",
        "company": { "name": "Ferris Inc", "contactEmail": "hi@ferris.dev" }
    });
    let (status, body) = send(app, "POST", "/api/jobs", Some(payload)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], "3");
    assert_eq!(body["company"]["contactEmail"], "hi@ferris.dev");
    assert_eq!(store.len().await, 3);
}

#[tokio::test]
async fn test_update_replaces_job() {
    let (app, store) = seeded_app(1);
    let payload = json!({ "id": "1", "title": "Renamed", "salary": "$100K - 125K" });
    let (status, body) = send(app, "PUT", "/api/jobs/1", Some(payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Renamed");
    let stored = store.get(&JobId::from(1)).await.unwrap();
    assert_eq!(stored.salary, "$100K - 125K");
}

#[tokio::test]
async fn test_update_missing_job_is_404() {
    let (app, _) = seeded_app(1);
    let (status, _) = send(app, "PUT", "/api/jobs/7", Some(json!({ "title": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_removes_job() {
    let (app, store) = seeded_app(2);
    let (status, body) = send(app.clone(), "DELETE", "/api/jobs/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
    assert!(store.get(&JobId::from(1)).await.is_none());

    let (status, _) = send(app, "DELETE", "/api/jobs/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
