//! Script input loop
//!
//! Feeds lines from a reader into a [`Session`] until the input runs out or
//! an `END` command is executed.

use std::io::{BufRead, Write};

use tracing::debug;

use super::session::{Flow, Session, SessionError};

/// How the script input is framed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// The first line holds the number of command lines that follow.
    /// Lines beyond that count are ignored.
    #[default]
    Counted,
    /// Every line of input is a command line.
    Unbounded,
}

/// What happened over a whole script run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of non-blank lines executed
    pub executed: usize,
    /// Whether the run stopped at an `END` command
    pub ended: bool,
}

/// Run every command line from `reader` through `session`.
///
/// Stops at the first `END` command or the first usage error. Blank lines
/// are skipped and do not count as executed.
///
/// # Example
///
/// ```
/// use compdeps::console::{run_script, InputMode, Session};
///
/// let input = "3\nDEPEND A B\nINSTALL A\nLIST\n";
/// let mut session = Session::new(Vec::new());
/// let summary = run_script(input.as_bytes(), &mut session, InputMode::Counted).unwrap();
///
/// assert_eq!(summary.executed, 3);
/// assert!(session.graph().is_installed("B"));
/// ```
pub fn run_script<R: BufRead, W: Write>(
    reader: R,
    session: &mut Session<W>,
    mode: InputMode,
) -> Result<RunSummary, SessionError> {
    let mut lines = reader.lines();

    let limit = match mode {
        InputMode::Counted => {
            let first = lines.next().ok_or(SessionError::MissingCount)??;
            let count = first
                .trim()
                .parse::<usize>()
                .map_err(|_| SessionError::InvalidCount { line: first.clone() })?;
            debug!(count, "reading counted script");
            Some(count)
        }
        InputMode::Unbounded => None,
    };

    let mut summary = RunSummary {
        executed: 0,
        ended: false,
    };

    for (position, line) in lines.enumerate() {
        if limit.is_some_and(|limit| position >= limit) {
            break;
        }

        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        summary.executed += 1;
        if session.execute_line(&line)? == Flow::End {
            summary.ended = true;
            break;
        }
    }

    debug!(executed = summary.executed, ended = summary.ended, "script finished");
    Ok(summary)
}
