pub mod bump;
pub mod config;
pub mod error;
pub mod git;
pub mod github;
pub mod specfile;
pub mod sync;
pub mod ui;
pub mod version;

pub use error::{Result, SyncError};
