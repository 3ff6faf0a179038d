//! Sync orchestration
//!
//! The only logic of note in spec-sync: compare the upstream release version
//! to the version recorded in the spec file and, if they differ, drive the
//! update sequence end-to-end (branch, bump, commit, push, pull request).
//!
//! The comparison and all derived values live in the pure [plan_sync]
//! function; [SyncRunner] executes a plan against the injected repository,
//! hosting API, and bump tool collaborators.

use std::path::Path;

use crate::bump::{BumpRequest, BumpTool};
use crate::config::Config;
use crate::error::{Result, SyncError};
use crate::git::SpecRepository;
use crate::github::{NewPullRequest, ReleaseHost};
use crate::specfile::SpecFile;
use crate::ui;
use crate::version::{ReleaseVersion, SpecVersion};

/// Everything an update run will do, derived deterministically from the two
/// versions before any side effect happens.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePlan {
    /// Branch the update is committed on.
    pub branch: String,

    pub old_version: String,

    pub new_version: String,

    /// Exact commit message for the spec change.
    pub commit_message: String,

    /// Changelog comment handed to the bump tool.
    pub comment: String,

    pub pr_title: String,

    pub pr_body: String,
}

/// Outcome of the version comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncDecision {
    /// Spec already records the latest release; nothing to do.
    UpToDate,

    /// Spec is behind (or simply different); run the update sequence.
    Update(UpdatePlan),
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    UpToDate {
        version: String,
    },
    Updated {
        branch: String,
        new_version: String,
        /// URL of the opened pull request; `None` in dry-run mode.
        pull_request: Option<String>,
    },
}

/// Decides whether an update is needed and what it will look like.
///
/// Comparison is exact string equality. No semantic-version ordering is
/// applied, so "1.2" and "1.2.0" count as different and trigger an update.
///
/// # Arguments
/// * `current` - Version recorded in the spec file
/// * `latest` - Normalized latest upstream release version
/// * `upstream_repo` - Upstream hosting identifier, named in the PR body
pub fn plan_sync(
    current: &SpecVersion,
    latest: &ReleaseVersion,
    upstream_repo: &str,
) -> SyncDecision {
    if current.as_str() == latest.as_str() {
        return SyncDecision::UpToDate;
    }

    SyncDecision::Update(UpdatePlan {
        branch: format!("update/v{}", latest),
        old_version: current.to_string(),
        new_version: latest.to_string(),
        commit_message: format!("Update spec from {} -> {}", current, latest),
        comment: format!("Updating to v{}", latest),
        pr_title: format!("Bump spec version to {}", latest),
        pr_body: format!(
            "# Summary\nBump spec version to latest release (v{}) from {}\n",
            latest, upstream_repo
        ),
    })
}

/// Executes the sync workflow against injected collaborators.
pub struct SyncRunner<'a, R, H, B>
where
    R: SpecRepository,
    H: ReleaseHost,
    B: BumpTool,
{
    repo: &'a R,
    host: &'a H,
    bump: &'a B,
    config: &'a Config,
}

impl<'a, R, H, B> SyncRunner<'a, R, H, B>
where
    R: SpecRepository,
    H: ReleaseHost,
    B: BumpTool,
{
    pub fn new(repo: &'a R, host: &'a H, bump: &'a B, config: &'a Config) -> Self {
        SyncRunner {
            repo,
            host,
            bump,
            config,
        }
    }

    /// Runs the full workflow:
    ///
    /// 1. Check out the base branch and fetch it from the remote.
    /// 2. Query the hosting API for the latest release and normalize its tag.
    /// 3. Parse the spec file for its recorded version.
    /// 4. Equal: report up to date and stop, with no side effects.
    /// 5. Different: branch (idempotently), bump, stage, commit, push, and
    ///    open a pull request.
    ///
    /// In dry-run mode the commit, push, and pull-request steps are replaced
    /// by printed previews; remote state is never mutated. Rerunning after a
    /// partial failure reuses an existing update branch rather than failing,
    /// but a branch that was already committed is not amended.
    pub fn run(&self, dry_run: bool) -> Result<SyncOutcome> {
        let spec_cfg = &self.config.spec;

        self.repo.checkout_branch(&spec_cfg.branch)?;
        ui::display_status(&format!(
            "Fetching '{}' from '{}'",
            spec_cfg.branch, spec_cfg.remote
        ));
        self.repo.fetch(&spec_cfg.remote, &spec_cfg.branch)?;

        let tag = self.host.latest_release_tag(&self.config.upstream.github)?;
        let latest = ReleaseVersion::from_tag(&tag);

        let spec_path = self.repo.workdir().join(&spec_cfg.file);
        let spec = SpecFile::from_file(&spec_path)?;

        match plan_sync(&spec.version, &latest, &self.config.upstream.github) {
            SyncDecision::UpToDate => {
                ui::display_success(&format!("Spec is at {} already", latest));
                Ok(SyncOutcome::UpToDate {
                    version: latest.to_string(),
                })
            }
            SyncDecision::Update(plan) => {
                ui::display_status(&format!(
                    "Updating spec from {} to {}",
                    plan.old_version, plan.new_version
                ));
                self.apply(&plan, &spec_path, dry_run)
            }
        }
    }

    fn apply(&self, plan: &UpdatePlan, spec_path: &Path, dry_run: bool) -> Result<SyncOutcome> {
        let spec_cfg = &self.config.spec;

        if !self.repo.branch_exists(&plan.branch)? {
            self.repo.create_branch(&plan.branch, &spec_cfg.branch)?;
        }
        self.repo.checkout_branch(&plan.branch)?;

        let request = BumpRequest {
            new_version: plan.new_version.clone(),
            comment: plan.comment.clone(),
            author: self.config.identity().user_string(),
            spec_path: spec_path.to_path_buf(),
        };
        let exit_code = self.bump.bump(&request)?;
        if exit_code != 0 {
            if spec_cfg.abort_on_bump_failure {
                return Err(SyncError::bump(format!(
                    "'{}' exited with code {}",
                    spec_cfg.bump_tool, exit_code
                )));
            }
            ui::display_warning(&format!(
                "'{}' exited with code {}, continuing",
                spec_cfg.bump_tool, exit_code
            ));
        }

        self.repo.stage(&spec_cfg.file)?;

        if dry_run {
            ui::display_dry_run(&format!(
                "Would commit '{}' on branch '{}'",
                plan.commit_message, plan.branch
            ));
            ui::display_dry_run(&format!(
                "Would push '{}' to '{}'",
                plan.branch, spec_cfg.remote
            ));
            ui::display_dry_run(&format!(
                "Would open pull request '{}' from '{}' into '{}'",
                plan.pr_title, plan.branch, spec_cfg.branch
            ));
            return Ok(SyncOutcome::Updated {
                branch: plan.branch.clone(),
                new_version: plan.new_version.clone(),
                pull_request: None,
            });
        }

        self.repo.commit(&plan.branch, &plan.commit_message)?;
        ui::display_status(&format!(
            "Pushing '{}' to '{}'",
            plan.branch, spec_cfg.remote
        ));
        self.repo.push(&spec_cfg.remote, &plan.branch)?;

        let pull_request = NewPullRequest {
            title: plan.pr_title.clone(),
            body: plan.pr_body.clone(),
            head: plan.branch.clone(),
            base: spec_cfg.branch.clone(),
        };
        let url = self.host.open_pull_request(&spec_cfg.github, &pull_request)?;
        ui::display_success(&format!("Opened pull request: {}", url));

        Ok(SyncOutcome::Updated {
            branch: plan.branch.clone(),
            new_version: plan.new_version.clone(),
            pull_request: Some(url),
        })
    }
}
