//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the git operations
//! spec-sync needs, allowing for a real libgit2-backed implementation and a
//! mock implementation for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [SpecRepository] trait, which covers the
//! working copy of the spec repository. The concrete implementations are:
//!
//! - [repository::Git2SpecRepository]: a real implementation using the `git2` crate
//! - [mock::MockSpecRepository]: a mock implementation for testing
//!
//! The orchestrator depends on the trait rather than a concrete type, so the
//! update sequence can be exercised without a network or a real repository.

pub mod mock;
pub mod repository;

pub use mock::MockSpecRepository;
pub use repository::Git2SpecRepository;

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Transport credentials for remote operations.
///
/// Constructed from configuration and injected into the git client
/// constructor as one opaque value; nothing outside this module inspects it.
/// When no private key is configured, authentication falls back to the SSH
/// agent and then to default credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub ssh_user: String,
    pub public_key: Option<PathBuf>,
    pub private_key: Option<PathBuf>,
    pub passphrase: Option<String>,
}

/// Author/committer identity recorded on commits.
#[derive(Debug, Clone)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    /// Formats the identity as "Name <email>" for the bump tool's changelog entry.
    pub fn user_string(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }
}

/// Operations on the spec repository working copy.
///
/// All methods are synchronous and blocking. Errors map to
/// [crate::error::SyncError] variants; implementations should translate
/// underlying errors (like `git2::Error`) accordingly.
pub trait SpecRepository {
    /// Check out an existing local branch, updating HEAD and the work tree.
    fn checkout_branch(&self, branch: &str) -> Result<()>;

    /// Fetch the base branch from the given remote.
    fn fetch(&self, remote: &str, branch: &str) -> Result<()>;

    /// Whether a local branch with this exact name already exists.
    fn branch_exists(&self, branch: &str) -> Result<bool>;

    /// Create a local branch off the tip of `base`.
    ///
    /// Callers are expected to check [SpecRepository::branch_exists] first;
    /// creating a branch that already exists is an error.
    fn create_branch(&self, branch: &str, base: &str) -> Result<()>;

    /// Stage a file (path relative to the repository root) into the index.
    fn stage(&self, rel_path: &str) -> Result<()>;

    /// Commit the staged index on `branch` with the configured identity.
    fn commit(&self, branch: &str, message: &str) -> Result<()>;

    /// Push `branch` to the given remote.
    fn push(&self, remote: &str, branch: &str) -> Result<()>;

    /// Root of the working copy on disk.
    fn workdir(&self) -> &Path;
}
