//! External spec-bump tool invocation
//!
//! The spec file's version and changelog are rewritten by an external
//! `rpmdev-bumpspec`-compatible command; this module only invokes it and
//! reports its exit code. What to do with a non-zero exit is the
//! orchestrator's decision.

use std::path::PathBuf;
use std::process::Command;

use crate::error::{Result, SyncError};

/// One bump invocation: the new version, the changelog comment, the
/// changelog author string, and the spec file to mutate in place.
#[derive(Debug, Clone, PartialEq)]
pub struct BumpRequest {
    pub new_version: String,
    pub comment: String,
    pub author: String,
    pub spec_path: PathBuf,
}

/// External process that mutates the spec file in place.
pub trait BumpTool {
    /// Run the tool and return its exit code (0 on success, -1 when
    /// terminated by a signal). Failing to spawn the process is an error;
    /// a non-zero exit is not.
    fn bump(&self, request: &BumpRequest) -> Result<i32>;
}

/// Invokes an `rpmdev-bumpspec`-compatible command.
pub struct RpmdevBumpspec {
    program: String,
}

impl RpmdevBumpspec {
    pub fn new(program: impl Into<String>) -> Self {
        RpmdevBumpspec {
            program: program.into(),
        }
    }
}

impl BumpTool for RpmdevBumpspec {
    fn bump(&self, request: &BumpRequest) -> Result<i32> {
        let output = Command::new(&self.program)
            .arg("-n")
            .arg(&request.new_version)
            .arg(format!("--comment={}", request.comment))
            .arg(format!("--userstring={}", request.author))
            .arg(&request.spec_path)
            .output()
            .map_err(|e| {
                SyncError::bump(format!("failed to execute '{}': {}", self.program, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.trim().is_empty() {
                eprintln!("{} stderr: {}", self.program, stderr.trim());
            }
        }

        Ok(output.status.code().unwrap_or(-1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> BumpRequest {
        BumpRequest {
            new_version: "2.3.1".to_string(),
            comment: "Updating to v2.3.1".to_string(),
            author: "Maintainer <maintainer@example.org>".to_string(),
            spec_path: PathBuf::from("/tmp/example.spec"),
        }
    }

    #[test]
    fn test_missing_program_is_an_error() {
        let tool = RpmdevBumpspec::new("/nonexistent/path/to/bumpspec");
        let result = tool.bump(&request());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("failed to execute"));
    }

    #[test]
    fn test_nonzero_exit_is_reported_not_raised() {
        // `false` ignores its arguments and exits 1
        let tool = RpmdevBumpspec::new("false");
        let code = tool.bump(&request()).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn test_zero_exit() {
        let tool = RpmdevBumpspec::new("true");
        let code = tool.bump(&request()).unwrap();
        assert_eq!(code, 0);
    }
}
