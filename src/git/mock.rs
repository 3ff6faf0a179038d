use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::git::SpecRepository;

/// One recorded repository operation.
#[derive(Debug, Clone, PartialEq)]
pub enum RepoOp {
    CheckoutBranch(String),
    Fetch { remote: String, branch: String },
    CreateBranch { branch: String, base: String },
    Stage(String),
    Commit { branch: String, message: String },
    Push { remote: String, branch: String },
}

/// Mock repository for testing without actual git operations.
///
/// Records every operation in order so tests can assert exactly which
/// mutations the orchestrator performed (or did not perform).
pub struct MockSpecRepository {
    workdir: PathBuf,
    branches: RefCell<HashSet<String>>,
    ops: RefCell<Vec<RepoOp>>,
}

impl MockSpecRepository {
    /// Create a mock whose working copy root is `workdir`.
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        MockSpecRepository {
            workdir: workdir.into(),
            branches: RefCell::new(HashSet::new()),
            ops: RefCell::new(Vec::new()),
        }
    }

    /// Pre-seed a local branch, as if it existed from an earlier run.
    pub fn add_branch(&self, branch: impl Into<String>) {
        self.branches.borrow_mut().insert(branch.into());
    }

    /// All operations recorded so far, in call order.
    pub fn operations(&self) -> Vec<RepoOp> {
        self.ops.borrow().clone()
    }

    /// Operations that mutate repository state (everything except checkout
    /// and fetch).
    pub fn mutating_operations(&self) -> Vec<RepoOp> {
        self.operations()
            .into_iter()
            .filter(|op| {
                !matches!(op, RepoOp::CheckoutBranch(_) | RepoOp::Fetch { .. })
            })
            .collect()
    }
}

impl SpecRepository for MockSpecRepository {
    fn checkout_branch(&self, branch: &str) -> Result<()> {
        self.ops
            .borrow_mut()
            .push(RepoOp::CheckoutBranch(branch.to_string()));
        Ok(())
    }

    fn fetch(&self, remote: &str, branch: &str) -> Result<()> {
        self.ops.borrow_mut().push(RepoOp::Fetch {
            remote: remote.to_string(),
            branch: branch.to_string(),
        });
        Ok(())
    }

    fn branch_exists(&self, branch: &str) -> Result<bool> {
        Ok(self.branches.borrow().contains(branch))
    }

    fn create_branch(&self, branch: &str, base: &str) -> Result<()> {
        self.branches.borrow_mut().insert(branch.to_string());
        self.ops.borrow_mut().push(RepoOp::CreateBranch {
            branch: branch.to_string(),
            base: base.to_string(),
        });
        Ok(())
    }

    fn stage(&self, rel_path: &str) -> Result<()> {
        self.ops
            .borrow_mut()
            .push(RepoOp::Stage(rel_path.to_string()));
        Ok(())
    }

    fn commit(&self, branch: &str, message: &str) -> Result<()> {
        self.ops.borrow_mut().push(RepoOp::Commit {
            branch: branch.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.ops.borrow_mut().push(RepoOp::Push {
            remote: remote.to_string(),
            branch: branch.to_string(),
        });
        Ok(())
    }

    fn workdir(&self) -> &Path {
        &self.workdir
    }
}
