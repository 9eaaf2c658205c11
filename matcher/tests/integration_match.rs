use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use jobmatch_core::persist::{save_jobs, save_meta, ArtifactPaths, MetaFile};
use jobmatch_core::JobPosting;
use serde_json::Value;
use std::collections::BTreeMap;
use tempfile::tempdir;
use tower::ServiceExt;

fn build_tiny_artifacts(dir: &std::path::Path) {
    let paths = ArtifactPaths::new(dir);
    let jobs: Vec<JobPosting> = [
        "welding carpentry",
        "python sql data science",
        "nursing patient care",
    ]
    .iter()
    .map(|s| JobPosting {
        skills: s.to_string(),
        extra: BTreeMap::new(),
    })
    .collect();
    save_jobs(&paths, &jobs).unwrap();
    save_meta(
        &paths,
        &MetaFile {
            num_jobs: jobs.len() as u32,
            created_at: "2026-01-01T00:00:00Z".into(),
            version: 1,
        },
    )
    .unwrap();
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let resp = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

fn app(dir: &std::path::Path) -> Router {
    build_tiny_artifacts(dir);
    jobmatch_matcher::build_app(dir).unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let dir = tempdir().unwrap();
    let app = app(dir.path());
    let resp = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn match_returns_ranked_results() {
    let dir = tempdir().unwrap();
    let app = app(dir.path());

    let (status, json) = get_json(app, "/match?skills=python%20sql%20machine%20learning").await;
    assert_eq!(status, StatusCode::OK);

    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["skills"], "python sql data science");

    // Scores are non-increasing percentages.
    let scores: Vec<f64> = results
        .iter()
        .map(|r| r["score"].as_f64().unwrap())
        .collect();
    for pair in scores.windows(2) {
        assert!(pair[0] >= pair[1]);
    }
    assert!(scores[0] > scores[1]);

    // Both outbound links are present.
    let first = &results[0];
    assert!(first["linkedin_url"]
        .as_str()
        .unwrap()
        .starts_with("https://www.linkedin.com/jobs/search/?keywords="));
    assert!(first["naukri_url"]
        .as_str()
        .unwrap()
        .ends_with("-jobs"));
}

#[tokio::test]
async fn blank_skills_produce_warning_and_no_results() {
    let dir = tempdir().unwrap();
    let app = app(dir.path());

    let (status, json) = get_json(app, "/match?skills=%20%20").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["warning"].as_str().unwrap().contains("skills"));
    assert_eq!(json["results"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn missing_skills_param_produces_warning() {
    let dir = tempdir().unwrap();
    let app = app(dir.path());

    let (status, json) = get_json(app, "/match").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["warning"].is_string());
}

#[tokio::test]
async fn multipart_skills_field_is_matched() {
    let dir = tempdir().unwrap();
    let app = app(dir.path());

    let body = concat!(
        "--boundary\r\n",
        "Content-Disposition: form-data; name=\"skills\"\r\n\r\n",
        "python sql machine learning\r\n",
        "--boundary--\r\n"
    );
    let resp = app
        .oneshot(
            Request::post("/match")
                .header("content-type", "multipart/form-data; boundary=boundary")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["results"][0]["skills"], "python sql data science");
}

#[tokio::test]
async fn corrupt_resume_upload_degrades_to_manual_skills() {
    let dir = tempdir().unwrap();
    let app = app(dir.path());

    let body = concat!(
        "--boundary\r\n",
        "Content-Disposition: form-data; name=\"resume\"; filename=\"cv.pdf\"\r\n",
        "Content-Type: application/pdf\r\n\r\n",
        "not a real pdf\r\n",
        "--boundary\r\n",
        "Content-Disposition: form-data; name=\"skills\"\r\n\r\n",
        "nursing\r\n",
        "--boundary--\r\n"
    );
    let resp = app
        .oneshot(
            Request::post("/match")
                .header("content-type", "multipart/form-data; boundary=boundary")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    // Extraction failure is silent; the manual skills still rank.
    assert!(json["warning"].is_null());
    assert_eq!(json["results"][0]["skills"], "nursing patient care");
}

#[tokio::test]
async fn corrupt_resume_alone_produces_warning() {
    let dir = tempdir().unwrap();
    let app = app(dir.path());

    let body = concat!(
        "--boundary\r\n",
        "Content-Disposition: form-data; name=\"resume\"; filename=\"cv.pdf\"\r\n",
        "Content-Type: application/pdf\r\n\r\n",
        "garbage bytes\r\n",
        "--boundary--\r\n"
    );
    let resp = app
        .oneshot(
            Request::post("/match")
                .header("content-type", "multipart/form-data; boundary=boundary")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(json["warning"].is_string());
    assert_eq!(json["results"].as_array().unwrap().len(), 0);
}
