//! Configuration for the gitdeck server
//!
//! Settings come from command line flags, environment variables, and an
//! optional `.env` file, in that order of precedence.

use std::ffi::OsString;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use gitdeck_github::DEFAULT_API_URL;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8083;

/// Default GitHub account owning the repository
pub const DEFAULT_GITHUB_USER: &str = "octocat";

/// Default per-command git timeout, in seconds
pub const DEFAULT_GIT_TIMEOUT_SECS: u64 = 30;

/// gitdeck - browse branches, commits and pull requests of a local repository
#[derive(Parser, Debug, Clone)]
#[command(name = "gitdeck")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Port to listen on
    #[arg(short, long, env = "HTTP_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind
    ///
    /// Defaults to loopback; the API runs git in the configured repository,
    /// so think twice before exposing it.
    #[arg(long, env = "GITDECK_HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// GitHub account that owns the repository
    #[arg(long, env = "GITHUB_USER", default_value = DEFAULT_GITHUB_USER)]
    pub github_user: String,

    /// Repository to serve
    ///
    /// Defaults to the current working directory.
    #[arg(short, long, env = "GITDECK_REPO")]
    pub repo: Option<PathBuf>,

    /// Directory holding index.html, js/ and css/
    #[arg(long, env = "GITDECK_ASSETS")]
    pub assets: Option<PathBuf>,

    /// Seconds a single git command may run
    #[arg(long, env = "GITDECK_GIT_TIMEOUT", default_value_t = DEFAULT_GIT_TIMEOUT_SECS)]
    pub git_timeout: u64,

    /// GitHub REST API root
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub github_api: String,

    /// Environment file loaded before reading settings
    ///
    /// A missing file is ignored.
    #[arg(long, default_value = ".env")]
    pub env_file: PathBuf,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - only warnings and errors are logged
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            github_user: DEFAULT_GITHUB_USER.to_string(),
            repo: None,
            assets: None,
            git_timeout: DEFAULT_GIT_TIMEOUT_SECS,
            github_api: DEFAULT_API_URL.to_string(),
            env_file: PathBuf::from(".env"),
            verbose: false,
            quiet: false,
        }
    }
}

impl Config {
    /// Parse the process arguments, loading the env file first
    ///
    /// Arguments are parsed once to find `--env-file`, then again after the
    /// file is loaded so its variables can fill in unset flags. Variables
    /// already set in the environment win over the file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EnvFile` if the env file exists but can't be read.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(std::env::args_os())
    }

    /// Like [`Config::load`], with explicit arguments
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EnvFile` if the env file exists but can't be read.
    pub fn load_from<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let first = Self::parse_from(&args);

        match dotenvy::from_path(&first.env_file) {
            Ok(()) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(ConfigError::EnvFile(first.env_file, e)),
        }

        Ok(Self::parse_from(args))
    }

    /// The repository path, using the current directory as default
    ///
    /// Returns `None` if no repository is specified and the current
    /// directory cannot be determined.
    #[must_use]
    pub fn repo_path(&self) -> Option<PathBuf> {
        self.repo.clone().or_else(|| std::env::current_dir().ok())
    }

    /// The assets directory, defaulting to the one shipped with this crate
    #[must_use]
    pub fn assets_path(&self) -> PathBuf {
        self.assets
            .clone()
            .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets"))
    }

    /// Timeout for a single git command
    #[must_use]
    pub fn git_timeout(&self) -> Duration {
        Duration::from_secs(self.git_timeout)
    }

    /// Address the server binds to
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The repository path doesn't exist or isn't a directory
    /// - The assets path doesn't exist or isn't a directory
    /// - The git timeout is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        let repo = self.repo_path().ok_or(ConfigError::NoWorkingDirectory)?;
        if !repo.exists() {
            return Err(ConfigError::RepoNotFound(repo));
        }
        if !repo.is_dir() {
            return Err(ConfigError::RepoNotDirectory(repo));
        }

        let assets = self.assets_path();
        if !assets.is_dir() {
            return Err(ConfigError::AssetsNotFound(assets));
        }

        if self.git_timeout == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No repository given and the current directory is unavailable
    #[error("No repository given and the current directory can't be determined")]
    NoWorkingDirectory,

    /// Repository path not found
    #[error("Repository path not found: {0}")]
    RepoNotFound(PathBuf),

    /// Repository path is not a directory
    #[error("Repository path is not a directory: {0}")]
    RepoNotDirectory(PathBuf),

    /// Assets directory not found
    #[error("Assets directory not found: {0}")]
    AssetsNotFound(PathBuf),

    /// Git timeout of zero seconds
    #[error("Git timeout must be at least one second")]
    ZeroTimeout,

    /// Env file present but unreadable
    #[error("Failed to load env file {0}: {1}")]
    EnvFile(PathBuf, dotenvy::Error),
}
