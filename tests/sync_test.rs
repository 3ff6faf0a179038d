// tests/sync_test.rs
//
// End-to-end sync scenarios over the mock repository and local mock
// collaborators: no network, no real git, no external process.

use std::cell::RefCell;
use std::path::Path;

use spec_sync::bump::{BumpRequest, BumpTool};
use spec_sync::config::{Config, GitConfig, GithubConfig, SpecConfig, UpstreamConfig};
use spec_sync::git::mock::RepoOp;
use spec_sync::git::{MockSpecRepository, SpecRepository};
use spec_sync::github::{NewPullRequest, ReleaseHost};
use spec_sync::sync::{SyncOutcome, SyncRunner};
use spec_sync::Result;
use tempfile::TempDir;

struct MockHost {
    tag: String,
    pull_requests: RefCell<Vec<(String, NewPullRequest)>>,
}

impl MockHost {
    fn new(tag: &str) -> Self {
        MockHost {
            tag: tag.to_string(),
            pull_requests: RefCell::new(Vec::new()),
        }
    }
}

impl ReleaseHost for MockHost {
    fn latest_release_tag(&self, _repo: &str) -> Result<String> {
        Ok(self.tag.clone())
    }

    fn open_pull_request(&self, repo: &str, pull_request: &NewPullRequest) -> Result<String> {
        self.pull_requests
            .borrow_mut()
            .push((repo.to_string(), pull_request.clone()));
        Ok(format!("https://github.com/{}/pull/1", repo))
    }
}

struct MockBump {
    exit_code: i32,
    calls: RefCell<Vec<BumpRequest>>,
}

impl MockBump {
    fn new(exit_code: i32) -> Self {
        MockBump {
            exit_code,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl BumpTool for MockBump {
    fn bump(&self, request: &BumpRequest) -> Result<i32> {
        self.calls.borrow_mut().push(request.clone());
        Ok(self.exit_code)
    }
}

fn test_config(workdir: &Path) -> Config {
    Config {
        upstream: UpstreamConfig {
            github: "example/project".to_string(),
        },
        spec: SpecConfig {
            github: "example/project-spec".to_string(),
            clone_url: "git@github.com:example/project-spec.git".to_string(),
            branch: "main".to_string(),
            remote: "origin".to_string(),
            file: "project.spec".to_string(),
            bump_tool: "rpmdev-bumpspec".to_string(),
            abort_on_bump_failure: false,
        },
        github: GithubConfig {
            access_token: "ghp_testtoken".to_string(),
            api_url: "https://api.github.com".to_string(),
        },
        git: GitConfig {
            workdir: workdir.to_path_buf(),
            name: "Maintainer Name".to_string(),
            email: "maintainer@example.org".to_string(),
            ssh_user: "git".to_string(),
            ssh_pub_key: None,
            ssh_priv_key: None,
            ssh_key_pass: None,
        },
    }
}

fn working_copy(spec_version: &str) -> (TempDir, MockSpecRepository) {
    let dir = tempfile::tempdir().unwrap();
    let content = format!(
        "Name:           project\nVersion:        {}\nRelease:        1%{{?dist}}\n",
        spec_version
    );
    std::fs::write(dir.path().join("project.spec"), content).unwrap();
    let repo = MockSpecRepository::new(dir.path());
    (dir, repo)
}

#[test]
fn test_up_to_date_performs_no_mutations() {
    let (_dir, repo) = working_copy("3.0.0");
    let host = MockHost::new("3.0.0");
    let bump = MockBump::new(0);
    let config = test_config(repo.workdir());

    let outcome = SyncRunner::new(&repo, &host, &bump, &config)
        .run(false)
        .unwrap();

    assert_eq!(
        outcome,
        SyncOutcome::UpToDate {
            version: "3.0.0".to_string()
        }
    );
    assert!(repo.mutating_operations().is_empty());
    assert!(bump.calls.borrow().is_empty());
    assert!(host.pull_requests.borrow().is_empty());
}

#[test]
fn test_update_runs_full_sequence() {
    let (_dir, repo) = working_copy("2.3.0");
    let host = MockHost::new("v2.3.1");
    let bump = MockBump::new(0);
    let config = test_config(repo.workdir());

    let outcome = SyncRunner::new(&repo, &host, &bump, &config)
        .run(false)
        .unwrap();

    match outcome {
        SyncOutcome::Updated {
            branch,
            new_version,
            pull_request,
        } => {
            assert_eq!(branch, "update/v2.3.1");
            assert_eq!(new_version, "2.3.1");
            assert_eq!(
                pull_request.as_deref(),
                Some("https://github.com/example/project-spec/pull/1")
            );
        }
        other => panic!("expected an update outcome, got {:?}", other),
    }

    let ops = repo.operations();
    assert!(ops.contains(&RepoOp::CreateBranch {
        branch: "update/v2.3.1".to_string(),
        base: "main".to_string(),
    }));
    assert!(ops.contains(&RepoOp::CheckoutBranch("update/v2.3.1".to_string())));
    assert!(ops.contains(&RepoOp::Stage("project.spec".to_string())));
    assert!(ops.contains(&RepoOp::Commit {
        branch: "update/v2.3.1".to_string(),
        message: "Update spec from 2.3.0 -> 2.3.1".to_string(),
    }));
    assert!(ops.contains(&RepoOp::Push {
        remote: "origin".to_string(),
        branch: "update/v2.3.1".to_string(),
    }));

    let bump_calls = bump.calls.borrow();
    assert_eq!(bump_calls.len(), 1);
    assert_eq!(bump_calls[0].new_version, "2.3.1");
    assert_eq!(bump_calls[0].comment, "Updating to v2.3.1");
    assert_eq!(
        bump_calls[0].author,
        "Maintainer Name <maintainer@example.org>"
    );
    assert!(bump_calls[0].spec_path.ends_with("project.spec"));

    let pull_requests = host.pull_requests.borrow();
    assert_eq!(pull_requests.len(), 1);
    let (pr_repo, pr) = &pull_requests[0];
    assert_eq!(pr_repo, "example/project-spec");
    assert!(pr.title.contains("2.3.1"));
    assert_eq!(pr.head, "update/v2.3.1");
    assert_eq!(pr.base, "main");
    assert!(pr.body.contains("example/project"));
}

#[test]
fn test_branch_creation_is_idempotent() {
    let (_dir, repo) = working_copy("2.3.0");
    let host = MockHost::new("v2.3.1");
    let bump = MockBump::new(0);
    let config = test_config(repo.workdir());

    repo.add_branch("update/v2.3.1");

    SyncRunner::new(&repo, &host, &bump, &config)
        .run(false)
        .unwrap();

    let creations: Vec<_> = repo
        .operations()
        .into_iter()
        .filter(|op| matches!(op, RepoOp::CreateBranch { .. }))
        .collect();
    assert!(creations.is_empty());
}

#[test]
fn test_second_run_creates_no_duplicate_branch() {
    let (_dir, repo) = working_copy("2.3.0");
    let host = MockHost::new("v2.3.1");
    let bump = MockBump::new(0);
    let config = test_config(repo.workdir());

    let runner = SyncRunner::new(&repo, &host, &bump, &config);
    runner.run(false).unwrap();
    runner.run(false).unwrap();

    let creations: Vec<_> = repo
        .operations()
        .into_iter()
        .filter(|op| matches!(op, RepoOp::CreateBranch { .. }))
        .collect();
    assert_eq!(creations.len(), 1);
}

#[test]
fn test_dry_run_never_mutates_remote_state() {
    let (_dir, repo) = working_copy("2.3.0");
    let host = MockHost::new("v2.3.1");
    let bump = MockBump::new(0);
    let config = test_config(repo.workdir());

    let outcome = SyncRunner::new(&repo, &host, &bump, &config)
        .run(true)
        .unwrap();

    match outcome {
        SyncOutcome::Updated { pull_request, .. } => assert!(pull_request.is_none()),
        other => panic!("expected an update outcome, got {:?}", other),
    }

    let ops = repo.operations();
    assert!(!ops
        .iter()
        .any(|op| matches!(op, RepoOp::Commit { .. } | RepoOp::Push { .. })));
    assert!(host.pull_requests.borrow().is_empty());

    // Local-only steps still run: branch creation, bump, staging
    assert!(ops
        .iter()
        .any(|op| matches!(op, RepoOp::CreateBranch { .. })));
    assert!(ops.contains(&RepoOp::Stage("project.spec".to_string())));
    assert_eq!(bump.calls.borrow().len(), 1);
}

#[test]
fn test_dry_run_up_to_date_still_compares() {
    let (_dir, repo) = working_copy("1.4.0");
    let host = MockHost::new("v1.4.0");
    let bump = MockBump::new(0);
    let config = test_config(repo.workdir());

    let outcome = SyncRunner::new(&repo, &host, &bump, &config)
        .run(true)
        .unwrap();

    assert!(matches!(outcome, SyncOutcome::UpToDate { .. }));
    assert!(repo.mutating_operations().is_empty());
}

#[test]
fn test_exact_string_comparison_triggers_update() {
    let (_dir, repo) = working_copy("1.2");
    let host = MockHost::new("1.2.0");
    let bump = MockBump::new(0);
    let config = test_config(repo.workdir());

    let outcome = SyncRunner::new(&repo, &host, &bump, &config)
        .run(false)
        .unwrap();

    assert!(matches!(outcome, SyncOutcome::Updated { .. }));
}

#[test]
fn test_bump_failure_is_logged_and_run_continues() {
    let (_dir, repo) = working_copy("2.3.0");
    let host = MockHost::new("v2.3.1");
    let bump = MockBump::new(1);
    let config = test_config(repo.workdir());

    let outcome = SyncRunner::new(&repo, &host, &bump, &config)
        .run(false)
        .unwrap();

    assert!(matches!(outcome, SyncOutcome::Updated { .. }));
    assert!(repo
        .operations()
        .iter()
        .any(|op| matches!(op, RepoOp::Commit { .. })));
}

#[test]
fn test_bump_failure_aborts_when_configured() {
    let (_dir, repo) = working_copy("2.3.0");
    let host = MockHost::new("v2.3.1");
    let bump = MockBump::new(1);
    let mut config = test_config(repo.workdir());
    config.spec.abort_on_bump_failure = true;

    let result = SyncRunner::new(&repo, &host, &bump, &config).run(false);

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Bump tool"));
    assert!(!repo
        .operations()
        .iter()
        .any(|op| matches!(op, RepoOp::Commit { .. } | RepoOp::Push { .. })));
    assert!(host.pull_requests.borrow().is_empty());
}

#[test]
fn test_missing_spec_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let repo = MockSpecRepository::new(dir.path());
    let host = MockHost::new("v2.3.1");
    let bump = MockBump::new(0);
    let config = test_config(repo.workdir());

    let result = SyncRunner::new(&repo, &host, &bump, &config).run(false);

    assert!(result.is_err());
    assert!(repo.mutating_operations().is_empty());
}
