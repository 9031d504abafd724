// Copyright (c) 2026 - present gitdeck contributors
// SPDX-License-Identifier: MIT

//! CLI tests for the gitdeck flags
//!
//! These tests cover flag parsing, defaults, and how the parsed values feed
//! validation and the log level.

use std::net::{IpAddr, Ipv6Addr};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use gitdeck_server::config::{Config, ConfigError};
use tracing::Level;

// ============================================================================
// Server flags
// ============================================================================

#[test]
fn test_port_short_and_long() {
    let config = Config::try_parse_from(["gitdeck", "-p", "9000"]).expect("parse should succeed");
    assert_eq!(config.port, 9000);

    let config =
        Config::try_parse_from(["gitdeck", "--port", "9001"]).expect("parse should succeed");
    assert_eq!(config.port, 9001);
}

#[test]
fn test_port_out_of_range_rejected() {
    let result = Config::try_parse_from(["gitdeck", "--port", "70000"]);
    assert!(result.is_err(), "ports above 65535 should be rejected");
}

#[test]
fn test_host_accepts_ipv6() {
    let config =
        Config::try_parse_from(["gitdeck", "--host", "::1"]).expect("parse should succeed");
    assert_eq!(config.host, IpAddr::V6(Ipv6Addr::LOCALHOST));
    assert_eq!(config.socket_addr().to_string(), format!("[::1]:{}", config.port));
}

#[test]
fn test_host_rejects_hostname() {
    let result = Config::try_parse_from(["gitdeck", "--host", "localhost"]);
    assert!(result.is_err(), "host must be an IP address");
}

// ============================================================================
// Repository and GitHub flags
// ============================================================================

#[test]
fn test_repo_flag() {
    let config =
        Config::try_parse_from(["gitdeck", "--repo", "/tmp"]).expect("parse should succeed");
    assert_eq!(config.repo, Some(PathBuf::from("/tmp")));
    assert_eq!(config.repo_path(), Some(PathBuf::from("/tmp")));
}

#[test]
fn test_github_flags() {
    let config = Config::try_parse_from([
        "gitdeck",
        "--github-user",
        "hubot",
        "--github-api",
        "http://localhost:9999",
    ])
    .expect("parse should succeed");
    assert_eq!(config.github_user, "hubot");
    assert_eq!(config.github_api, "http://localhost:9999");
}

#[test]
fn test_git_timeout_flag() {
    let config =
        Config::try_parse_from(["gitdeck", "--git-timeout", "5"]).expect("parse should succeed");
    assert_eq!(config.git_timeout(), Duration::from_secs(5));
}

#[test]
fn test_git_timeout_rejects_negative() {
    let result = Config::try_parse_from(["gitdeck", "--git-timeout", "-1"]);
    assert!(result.is_err());
}

#[test]
fn test_zero_timeout_parses_but_fails_validation() {
    let config = Config::try_parse_from(["gitdeck", "--git-timeout", "0", "--repo", "/tmp"])
        .expect("parse should succeed");
    assert!(matches!(config.validate(), Err(ConfigError::ZeroTimeout)));
}

#[test]
fn test_missing_repo_fails_validation() {
    let config = Config::try_parse_from(["gitdeck", "--repo", "/nonexistent/gitdeck/12345"])
        .expect("parse should succeed");
    assert!(matches!(
        config.validate(),
        Err(ConfigError::RepoNotFound(_))
    ));
}

// ============================================================================
// Logging flags
// ============================================================================

#[test]
fn test_verbose_short_flag_v() {
    let config = Config::try_parse_from(["gitdeck", "-v"]).expect("parse should succeed");
    assert!(config.verbose);
    assert_eq!(config.log_level(), Level::DEBUG);
}

#[test]
fn test_quiet_short_flag_q() {
    let config = Config::try_parse_from(["gitdeck", "-q"]).expect("parse should succeed");
    assert!(config.quiet);
    assert_eq!(config.log_level(), Level::WARN);
}

#[test]
fn test_verbose_wins_over_quiet() {
    let config = Config::try_parse_from(["gitdeck", "-v", "-q"]).expect("parse should succeed");
    assert_eq!(config.log_level(), Level::DEBUG);
}

#[test]
fn test_verbose_flag_value_syntax_not_supported() {
    // Boolean flags are toggled by presence only
    let result = Config::try_parse_from(["gitdeck", "--verbose=true"]);
    assert!(result.is_err(), "Boolean flags don't support =value syntax");
}

// ============================================================================
// Env file
// ============================================================================

#[test]
fn test_missing_env_file_is_ignored() {
    let config = Config::load_from([
        "gitdeck",
        "--env-file",
        "/nonexistent/gitdeck/.env",
        "--port",
        "9100",
    ])
    .expect("missing env file is not an error");
    assert_eq!(config.port, 9100);
}

/// Write a `.env` file into a fresh temp directory
///
/// Both tests that load it use the same values, since dotenvy sets them on
/// the shared process environment.
fn write_env_file(test_name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "gitdeck-env-{}-{}",
        test_name,
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).expect("create env dir");
    let path = dir.join(".env");
    std::fs::write(&path, "HTTP_PORT=9123\nGITHUB_USER=someone\n").expect("write env file");
    path
}

#[test]
fn test_env_file_supplies_defaults() {
    let path = write_env_file("defaults");

    let env_file = path.to_str().expect("utf-8 temp path");

    let config =
        Config::load_from(["gitdeck", "--env-file", env_file]).expect("env file should load");
    assert_eq!(config.port, 9123);
    assert_eq!(config.github_user, "someone");
    assert_eq!(config.env_file, path);

    let _ = std::fs::remove_dir_all(path.parent().expect("parent"));
}

#[test]
fn test_flag_wins_over_env_file() {
    let path = write_env_file("flag-wins");

    let env_file = path.to_str().expect("utf-8 temp path");

    let config = Config::load_from([
        "gitdeck",
        "--env-file",
        env_file,
        "--port",
        "9200",
        "--github-user",
        "hubot",
    ])
    .expect("env file should load");
    assert_eq!(config.port, 9200);
    assert_eq!(config.github_user, "hubot");

    let _ = std::fs::remove_dir_all(path.parent().expect("parent"));
}

#[test]
fn test_unknown_flag_rejected() {
    let result = Config::try_parse_from(["gitdeck", "--database", "x.db"]);
    assert!(result.is_err());
}
