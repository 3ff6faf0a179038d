use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::{Result, SyncError};
use crate::version::SpecVersion;

/// The fields spec-sync needs from a packaging spec file.
///
/// Only the recorded version is extracted; the changelog and the rest of the
/// preamble are owned by the external bump tool and never parsed here.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecFile {
    pub version: SpecVersion,
}

impl SpecFile {
    /// Reads and parses a spec file from disk.
    ///
    /// # Arguments
    /// * `path` - Path to the spec file inside the working copy
    ///
    /// # Returns
    /// * `Ok(SpecFile)` - The parsed spec file
    /// * `Err` - If the file cannot be read or has no `Version:` field
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SyncError::spec(format!("cannot read spec file '{}': {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parses spec file content, extracting the `Version:` preamble field.
    pub fn parse(content: &str) -> Result<Self> {
        let re = Regex::new(r"(?m)^Version:\s*(\S+)\s*$")
            .map_err(|e| SyncError::spec(format!("invalid version pattern: {}", e)))?;

        let captures = re
            .captures(content)
            .ok_or_else(|| SyncError::spec("no Version field found in spec file"))?;

        Ok(SpecFile {
            version: SpecVersion::new(&captures[1]),
        })
    }
}
