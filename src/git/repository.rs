use std::path::Path;

use git2::{BranchType, Repository, Signature};

use crate::error::{Result, SyncError};
use crate::git::{Credentials, Identity};

/// Real [SpecRepository](super::SpecRepository) implementation backed by git2.
///
/// Holds the working copy of the spec repository together with the transport
/// credentials and commit identity it was constructed with.
pub struct Git2SpecRepository {
    repo: Repository,
    credentials: Credentials,
    identity: Identity,
}

/// Builds remote callbacks that authenticate with the configured keypair,
/// falling back to the SSH agent and then to default credentials.
fn remote_callbacks(credentials: &Credentials) -> git2::RemoteCallbacks<'_> {
    let mut callbacks = git2::RemoteCallbacks::new();
    callbacks.credentials(move |_url, username_from_url, allowed_types| {
        let user = username_from_url.unwrap_or(&credentials.ssh_user);

        if allowed_types.contains(git2::CredentialType::SSH_KEY) {
            if let Some(private_key) = &credentials.private_key {
                return git2::Cred::ssh_key(
                    user,
                    credentials.public_key.as_deref(),
                    private_key,
                    credentials.passphrase.as_deref(),
                );
            }

            if let Ok(cred) = git2::Cred::ssh_key_from_agent(user) {
                return Ok(cred);
            }
        }

        git2::Cred::default()
    });
    callbacks
}

impl Git2SpecRepository {
    /// Opens the working copy at `path`, cloning it from `url` if absent.
    ///
    /// A fresh clone is checked out to `branch`. Any failure here is fatal to
    /// the run; there is no partially-usable state to continue from.
    ///
    /// # Arguments
    /// * `url` - Clone URL of the spec repository
    /// * `path` - Local working copy path
    /// * `branch` - Base branch a fresh clone checks out
    /// * `credentials` - Opaque transport credentials
    /// * `identity` - Author/committer identity for commits
    pub fn open_or_clone(
        url: &str,
        path: &Path,
        branch: &str,
        credentials: Credentials,
        identity: Identity,
    ) -> Result<Self> {
        let repo = match Repository::discover(path) {
            Ok(repo) => repo,
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                let mut fetch_options = git2::FetchOptions::new();
                fetch_options.remote_callbacks(remote_callbacks(&credentials));

                git2::build::RepoBuilder::new()
                    .branch(branch)
                    .fetch_options(fetch_options)
                    .clone(url, path)
                    .map_err(|e| {
                        SyncError::remote(format!("cannot clone '{}': {}", url, e))
                    })?
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Git2SpecRepository {
            repo,
            credentials,
            identity,
        })
    }
}

impl super::SpecRepository for Git2SpecRepository {
    fn checkout_branch(&self, branch: &str) -> Result<()> {
        let refname = format!("refs/heads/{}", branch);
        let reference = self.repo.find_reference(&refname).map_err(|e| {
            SyncError::branch(format!("cannot resolve branch '{}': {}", branch, e))
        })?;

        let commit = reference.peel_to_commit()?;
        self.repo.checkout_tree(commit.as_object(), None)?;
        self.repo.set_head(&refname)?;

        Ok(())
    }

    fn fetch(&self, remote: &str, branch: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote)
            .map_err(|e| SyncError::remote(format!("cannot find remote '{}': {}", remote, e)))?;

        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(remote_callbacks(&self.credentials));

        remote
            .fetch(&[branch], Some(&mut fetch_options), None)
            .map_err(|e| SyncError::remote(format!("fetch failed: {}", e)))?;

        Ok(())
    }

    fn branch_exists(&self, branch: &str) -> Result<bool> {
        match self.repo.find_branch(branch, BranchType::Local) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn create_branch(&self, branch: &str, base: &str) -> Result<()> {
        let base_branch = self.repo.find_branch(base, BranchType::Local).map_err(|e| {
            SyncError::branch(format!("cannot resolve base branch '{}': {}", base, e))
        })?;

        let base_commit = base_branch.get().peel_to_commit()?;
        self.repo.branch(branch, &base_commit, false).map_err(|e| {
            SyncError::branch(format!("cannot create branch '{}': {}", branch, e))
        })?;

        Ok(())
    }

    fn stage(&self, rel_path: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_path(Path::new(rel_path))?;
        index.write()?;

        Ok(())
    }

    fn commit(&self, branch: &str, message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        let tree_oid = index.write_tree()?;
        let tree = self.repo.find_tree(tree_oid)?;

        let refname = format!("refs/heads/{}", branch);
        let parent = self.repo.find_reference(&refname)?.peel_to_commit()?;

        let signature = Signature::now(&self.identity.name, &self.identity.email)?;
        self.repo.commit(
            Some(&refname),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;

        Ok(())
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote)
            .map_err(|e| SyncError::remote(format!("cannot find remote '{}': {}", remote, e)))?;

        let mut push_options = git2::PushOptions::new();
        let mut callbacks = remote_callbacks(&self.credentials);

        // Surface per-reference failures that the transport reports as success
        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                eprintln!("Warning: Could not update reference {}: {}", refname, status);
                Err(git2::Error::from_str(&format!(
                    "Push failed for {}",
                    refname
                )))
            } else {
                Ok(())
            }
        });

        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/heads/{}:refs/heads/{}", branch, branch);
        remote
            .push(&[&refspec], Some(&mut push_options))
            .map_err(|e| {
                if e.class() == git2::ErrorClass::Net {
                    SyncError::remote(format!("network error during push: {}", e))
                } else {
                    SyncError::remote(format!("failed to push branch '{}': {}", branch, e))
                }
            })?;

        Ok(())
    }

    fn workdir(&self) -> &Path {
        // Bare repositories are never cloned or opened by spec-sync
        self.repo.workdir().unwrap_or_else(|| Path::new("."))
    }
}
