//! Console front end for compdeps
//!
//! Runs command scripts against a dependency graph and writes the
//! transcript: each command line followed by what it did.

pub mod script;
pub mod session;

pub use script::{run_script, InputMode, RunSummary};
pub use session::{Flow, Session, SessionConfig, SessionError};
