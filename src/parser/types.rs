//! Command types produced by the line parser.

use std::fmt;

/// A single parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `DEPEND <parent> <dep1> [dep2 ...]`
    Depend {
        parent: String,
        dependencies: Vec<String>,
    },
    /// `INSTALL <component>`
    Install(String),
    /// `REMOVE <component>`
    Remove(String),
    /// `LIST`
    List,
    /// `END`
    End,
    /// Any other command name. Not an error; the caller reports it and
    /// moves on.
    Unknown(String),
}

impl Command {
    /// Returns the keyword this command is spelled with.
    pub fn keyword(&self) -> &str {
        match self {
            Command::Depend { .. } => keywords::DEPEND,
            Command::Install(_) => keywords::INSTALL,
            Command::Remove(_) => keywords::REMOVE,
            Command::List => keywords::LIST,
            Command::End => keywords::END,
            Command::Unknown(name) => name.as_str(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Depend {
                parent,
                dependencies,
            } => write!(f, "{} {} {}", keywords::DEPEND, parent, dependencies.join(" ")),
            Command::Install(c) => write!(f, "{} {}", keywords::INSTALL, c),
            Command::Remove(c) => write!(f, "{} {}", keywords::REMOVE, c),
            Command::List | Command::End | Command::Unknown(_) => write!(f, "{}", self.keyword()),
        }
    }
}

/// Command keywords. Matching is case-sensitive.
pub mod keywords {
    pub const DEPEND: &str = "DEPEND";
    pub const INSTALL: &str = "INSTALL";
    pub const REMOVE: &str = "REMOVE";
    pub const LIST: &str = "LIST";
    pub const END: &str = "END";
}
