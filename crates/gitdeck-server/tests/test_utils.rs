// Copyright (c) 2026 - present gitdeck contributors
// SPDX-License-Identifier: MIT

//! Test utilities for gitdeck-server integration tests
//!
//! This module provides utilities for:
//! - Git repository scaffolding in temp directories
//! - Driving the router with single requests
//! - Reading JSON response bodies

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use gitdeck_git::GitRepo;
use gitdeck_github::GitHubClient;
use gitdeck_server::{AppState, router};
use serde_json::Value;
use tower::ServiceExt;

// ============================================================================
// Git Repository Scaffolding
// ============================================================================

/// Counter for generating unique repository directory names
static REPO_COUNTER: AtomicU32 = AtomicU32::new(0);

/// A temporary git repository, removed on drop
pub struct TempGitRepo {
    path: PathBuf,
}

impl TempGitRepo {
    /// Create an empty repository on branch `main`
    pub fn new(test_name: &str) -> Self {
        let counter = REPO_COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "gitdeck-server-{}-{}-{}",
            test_name,
            std::process::id(),
            counter
        ));
        fs::create_dir_all(&path).expect("Failed to create temp repo directory");

        let repo = Self { path };
        repo.git(&["init", "--initial-branch=main"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "user.name", "Test Author"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo
    }

    /// A repository with two branches:
    /// - `main`: "Initial commit" (README.md)
    /// - `feature/login`: adds src/login.rs on top of main
    pub fn with_feature_branch(test_name: &str) -> Self {
        let repo = Self::new(test_name);
        repo.commit_file("README.md", "# demo\n", "Initial commit");
        repo.git(&["checkout", "-b", "feature/login"]);
        repo.commit_file("src/login.rs", "pub fn login() {}\n", "Add login");
        repo.git(&["checkout", "main"]);
        repo
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run git in the repository and return trimmed stdout
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .current_dir(&self.path)
            .args(args)
            .output()
            .expect("Failed to run git command");

        if !output.status.success() {
            panic!(
                "Git command failed: git {}\nstderr: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Write a file, commit it, and return the new HEAD SHA
    pub fn commit_file(&self, relative_path: &str, content: &str, message: &str) -> String {
        let file_path = self.path.join(relative_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&file_path, content).expect("Failed to write file");
        self.git(&["add", relative_path]);
        self.git(&["commit", "-m", message]);
        self.git(&["rev-parse", "HEAD"])
    }
}

impl Drop for TempGitRepo {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

// ============================================================================
// Router helpers
// ============================================================================

/// Assets shipped with the crate
pub fn assets_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}

/// Router over `repo`, with GitHub calls going to `github_api`
pub fn app_with(repo: GitRepo, github_api: &str) -> Router {
    let github = GitHubClient::with_api_url(github_api).expect("GitHub client");
    router(AppState::new(repo, github, "octocat"), assets_dir())
}

/// Router over a repository on disk; GitHub points at an unroutable address
pub fn app_for(repo: &TempGitRepo) -> Router {
    app_with(GitRepo::open(repo.path()), "http://127.0.0.1:9")
}

/// Send one request and return the status plus the raw body
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    headers: &[(&str, &str)],
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    (status, bytes.to_vec())
}

/// `GET` a path and parse the JSON body
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = send(app, Method::GET, uri, &[], None).await;
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}
