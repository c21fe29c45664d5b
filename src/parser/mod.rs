//! Parser module for compdeps command scripts.
//!
//! Turns text lines into typed [`Command`]s and validates argument counts.
//! Argument-count violations are reported as [`UsageError`]s; unrecognised
//! command names are not errors and come back as [`Command::Unknown`].
//!
//! # Example
//!
//! ```
//! use compdeps::parser::{parse_line, Command};
//!
//! let commands: Vec<Command> = ["DEPEND TELNET TCPIP", "", "LIST"]
//!     .iter()
//!     .filter_map(|line| parse_line(line).unwrap())
//!     .collect();
//!
//! assert_eq!(commands.len(), 2);
//! assert_eq!(commands[1], Command::List);
//! ```

pub mod line;
pub mod types;

pub use line::{parse_line, ParseResult, UsageError};
pub use types::{keywords, Command};
