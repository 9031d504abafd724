//! Integration tests for gitdeck-github
//!
//! A local axum server stands in for the GitHub REST API.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch, put};
use axum::{Json, Router};
use gitdeck_github::{
    GitHubClient, GitHubError, NewPullRequest, PullState, RepoSlug, SecretString,
};
use serde_json::{Value, json};
use similar_asserts::assert_eq;

/// Requests seen by the mock, as `(method path, authorization header, body)`
#[derive(Clone, Default)]
struct Recorded(Arc<Mutex<Vec<(String, Option<String>, Value)>>>);

impl Recorded {
    fn push(&self, what: String, headers: &HeaderMap, body: Value) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.0.lock().expect("lock").push((what, auth, body));
    }

    fn take(&self) -> Vec<(String, Option<String>, Value)> {
        std::mem::take(&mut *self.0.lock().expect("lock"))
    }
}

fn pull_json(number: u64, state: &str, merged_at: Option<&str>) -> Value {
    json!({
        "id": number * 10,
        "number": number,
        "url": format!("https://api.github.com/repos/octocat/Hello-World/pulls/{number}"),
        "state": state,
        "title": format!("PR {number}"),
        "body": "Please pull these awesome changes",
        "merged_at": merged_at,
        "base": {"ref": "main"},
        "head": {"ref": format!("topic-{number}")},
        "user": {"login": "octocat"}
    })
}

async fn list(
    State(recorded): State<Recorded>,
    Path((owner, repo)): Path<(String, String)>,
    headers: HeaderMap,
) -> Json<Value> {
    recorded.push(format!("GET {owner}/{repo}"), &headers, Value::Null);
    Json(json!([
        pull_json(1, "open", None),
        pull_json(2, "closed", Some("2026-01-17T02:33:06Z")),
        pull_json(3, "closed", None),
    ]))
}

async fn create(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    recorded.push("POST".to_string(), &headers, body.clone());
    if body["head"] == body["base"] {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "message": "Validation Failed",
                "errors": [{
                    "resource": "PullRequest",
                    "code": "custom",
                    "message": "No commits between main and main"
                }],
                "documentation_url": "https://docs.github.com/rest"
            })),
        );
    }
    (StatusCode::CREATED, Json(pull_json(4, "open", None)))
}

async fn update(
    State(recorded): State<Recorded>,
    Path((_, _, number)): Path<(String, String, u64)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, String)> {
    recorded.push(format!("PATCH {number}"), &headers, body.clone());
    if number == 404 {
        return Err((StatusCode::NOT_FOUND, "plain text, not json".to_string()));
    }
    let state = body["state"].as_str().unwrap_or("open").to_string();
    Ok(Json(pull_json(number, &state, None)))
}

async fn merge(
    State(recorded): State<Recorded>,
    Path((_, _, number)): Path<(String, String, u64)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    recorded.push(format!("PUT {number}"), &headers, body);
    if headers.get("authorization").is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Requires authentication"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e",
            "merged": true,
            "message": "Pull Request successfully merged"
        })),
    )
}

async fn spawn_mock() -> (GitHubClient, Recorded) {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/repos/{owner}/{repo}/pulls", get(list).post(create))
        .route("/repos/{owner}/{repo}/pulls/{number}", patch(update))
        .route("/repos/{owner}/{repo}/pulls/{number}/merge", put(merge))
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock");
    });

    let client = GitHubClient::with_api_url(format!("http://{addr}")).expect("client");
    (client, recorded)
}

fn slug() -> RepoSlug<'static> {
    RepoSlug::new("octocat", "Hello-World").expect("slug")
}

fn token() -> SecretString {
    SecretString::from("ghp_test_token".to_string())
}

#[tokio::test]
async fn test_list_pulls_flattens_and_marks_merged() {
    let (client, recorded) = spawn_mock().await;

    let pulls = client.list_pulls(slug(), None).await.expect("list pulls");

    let states: Vec<&str> = pulls.iter().map(|p| p.state.as_str()).collect();
    assert_eq!(states, vec!["open", "merged", "closed"]);
    assert_eq!(pulls[0].head, "topic-1");
    assert_eq!(pulls[0].base, "main");
    assert_eq!(pulls[0].user_name, "octocat");

    let calls = recorded.take();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "GET octocat/Hello-World");
    assert_eq!(calls[0].1, None);
}

#[tokio::test]
async fn test_token_sent_as_bearer() {
    let (client, recorded) = spawn_mock().await;

    client
        .list_pulls(slug(), Some(&token()))
        .await
        .expect("list pulls");

    let calls = recorded.take();
    assert_eq!(calls[0].1.as_deref(), Some("Bearer ghp_test_token"));
}

#[tokio::test]
async fn test_update_state_sends_lowercase_state() {
    let (client, recorded) = spawn_mock().await;

    let updated = client
        .update_state(slug(), 7, PullState::Closed, &token())
        .await
        .expect("update");
    assert_eq!(updated.number, 7);
    assert_eq!(updated.state, "closed");

    let calls = recorded.take();
    assert_eq!(calls[0].0, "PATCH 7");
    assert_eq!(calls[0].2, json!({"state": "closed"}));
}

#[tokio::test]
async fn test_merge_sends_commit_title() {
    let (client, recorded) = spawn_mock().await;

    let outcome = client.merge(slug(), 3, &token()).await.expect("merge");
    assert!(outcome.merged);
    assert_eq!(outcome.message, "Pull Request successfully merged");

    let calls = recorded.take();
    assert_eq!(calls[0].0, "PUT 3");
    assert!(calls[0].2["commit_title"].as_str().is_some());
}

#[tokio::test]
async fn test_create_returns_summary() {
    let (client, recorded) = spawn_mock().await;
    let pull = NewPullRequest {
        title: "Amazing new feature".to_string(),
        body: String::new(),
        head: "topic".to_string(),
        base: "main".to_string(),
    };

    let created = client.create(slug(), &pull, &token()).await.expect("create");
    assert_eq!(created.number, 4);
    assert_eq!(created.state, "open");

    let calls = recorded.take();
    assert_eq!(calls[0].2["title"], "Amazing new feature");
    assert_eq!(calls[0].2["head"], "topic");
    assert_eq!(calls[0].2["base"], "main");
}

#[tokio::test]
async fn test_validation_failure_becomes_api_error() {
    let (client, _) = spawn_mock().await;
    let pull = NewPullRequest {
        title: "Nothing".to_string(),
        body: String::new(),
        head: "main".to_string(),
        base: "main".to_string(),
    };

    let err = client
        .create(slug(), &pull, &token())
        .await
        .expect_err("validation should fail");

    assert_eq!(err.status(), Some(422));
    assert_eq!(
        err.to_string(),
        "Validation Failed\nPullRequest: custom => No commits between main and main"
    );
}

#[tokio::test]
async fn test_non_json_error_body_is_kept_raw() {
    let (client, _) = spawn_mock().await;

    let err = client
        .update_state(slug(), 404, PullState::Open, &token())
        .await
        .expect_err("should fail");

    match err {
        GitHubError::UnexpectedResponse { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "plain text, not json");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_api_is_network_error() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = GitHubClient::with_api_url(format!("http://{addr}")).expect("client");
    let err = client
        .list_pulls(slug(), None)
        .await
        .expect_err("should fail");

    assert!(matches!(err, GitHubError::Network(_)));
}
