use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SyncError};
use crate::git::{Credentials, Identity};

/// Represents the complete configuration for spec-sync.
///
/// Constructed once at startup from a TOML file and passed by reference into
/// the orchestrator; there is no ambient or global configuration lookup.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub upstream: UpstreamConfig,

    pub spec: SpecConfig,

    pub github: GithubConfig,

    #[serde(rename = "git-config")]
    pub git: GitConfig,
}

/// The monitored upstream project whose releases trigger updates.
#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Hosting identifier of the upstream repository (e.g. "owner/project").
    pub github: String,
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_bump_tool() -> String {
    "rpmdev-bumpspec".to_string()
}

/// The repository holding the packaging spec file to be updated.
#[derive(Debug, Deserialize, Clone)]
pub struct SpecConfig {
    /// Hosting identifier of the spec repository (e.g. "owner/project-spec").
    pub github: String,

    /// URL used to clone the spec repository when no working copy exists.
    pub clone_url: String,

    /// Base branch that update branches fork from and pull requests target.
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Remote fetched from and pushed to.
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Spec file path relative to the repository root.
    pub file: String,

    /// External command that rewrites the spec file's version and changelog.
    #[serde(default = "default_bump_tool")]
    pub bump_tool: String,

    /// When true, a non-zero exit from the bump tool aborts the run instead
    /// of being logged and skipped over.
    #[serde(default)]
    pub abort_on_bump_failure: bool,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

/// Hosting API access settings.
#[derive(Debug, Deserialize, Clone)]
pub struct GithubConfig {
    pub access_token: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_ssh_user() -> String {
    "git".to_string()
}

/// Local working copy location, committer identity, and transport keys.
#[derive(Debug, Deserialize, Clone)]
pub struct GitConfig {
    /// Path of the local working copy of the spec repository.
    pub workdir: PathBuf,

    pub name: String,

    pub email: String,

    #[serde(default = "default_ssh_user")]
    pub ssh_user: String,

    #[serde(default)]
    pub ssh_pub_key: Option<PathBuf>,

    #[serde(default)]
    pub ssh_priv_key: Option<PathBuf>,

    #[serde(default)]
    pub ssh_key_pass: Option<String>,
}

impl Config {
    /// Transport credentials handed opaquely to the git client constructor.
    pub fn credentials(&self) -> Credentials {
        Credentials {
            ssh_user: self.git.ssh_user.clone(),
            public_key: self.git.ssh_pub_key.clone(),
            private_key: self.git.ssh_priv_key.clone(),
            passphrase: self.git.ssh_key_pass.clone(),
        }
    }

    /// Author/committer identity used for commits and changelog entries.
    pub fn identity(&self) -> Identity {
        Identity {
            name: self.git.name.clone(),
            email: self.git.email.clone(),
        }
    }
}

/// Loads configuration from a file.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `specsync.toml` in current directory
/// 3. `specsync.toml` in the user config directory
///
/// There is no built-in default configuration: the repository identifiers
/// cannot be guessed, so a missing file is an error.
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded configuration
/// * `Err` - If no file is found, or a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)
            .map_err(|e| SyncError::config(format!("cannot read '{}': {}", path, e)))?
    } else if Path::new("./specsync.toml").exists() {
        fs::read_to_string("./specsync.toml")
            .map_err(|e| SyncError::config(format!("cannot read './specsync.toml': {}", e)))?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("specsync.toml");
        if config_path.exists() {
            fs::read_to_string(&config_path).map_err(|e| {
                SyncError::config(format!("cannot read '{}': {}", config_path.display(), e))
            })?
        } else {
            return Err(SyncError::config(
                "no configuration file found (looked for ./specsync.toml and the user config directory)",
            ));
        }
    } else {
        return Err(SyncError::config("no configuration file found"));
    };

    let config: Config =
        toml::from_str(&config_str).map_err(|e| SyncError::config(e.to_string()))?;
    Ok(config)
}
