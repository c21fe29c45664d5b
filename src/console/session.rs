//! Session state and command dispatch
//!
//! A [`Session`] owns one [`DependencyGraph`] and a transcript writer. Every
//! command line is echoed, executed against the graph, and followed by one
//! line per event the graph reports.

use std::io::{self, Write};

use tracing::{debug, info, trace};

use crate::graph::{CycleCheck, DependencyGraph, Event, GraphError};
use crate::parser::{parse_line, Command, UsageError};

/// Errors that stop a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A command had the wrong number of arguments.
    #[error("{0}")]
    Usage(#[from] UsageError),

    /// The graph refused a call outright.
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// Reading the script or writing the transcript failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The script did not start with a command count.
    #[error("Missing command count on the first line")]
    MissingCount,

    /// The first line of the script is not a valid command count.
    #[error("Invalid command count: '{line}'")]
    InvalidCount { line: String },
}

impl SessionError {
    /// Returns true for malformed-command errors, whose message is already
    /// part of the transcript.
    pub fn is_usage(&self) -> bool {
        matches!(self, SessionError::Usage(_))
    }
}

/// Whether processing should go on after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next command.
    Continue,
    /// An `END` command was executed.
    End,
}

/// Session options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Cycle check policy for the session's graph
    pub cycle_check: CycleCheck,
    /// Print a line for every accepted dependency edge
    pub echo_edges: bool,
}

/// A command-processing session over one dependency graph.
pub struct Session<W: Write> {
    graph: DependencyGraph,
    out: W,
    config: SessionConfig,
}

impl<W: Write> Session<W> {
    /// Create a session with default options writing its transcript to `out`
    pub fn new(out: W) -> Self {
        Self::with_config(out, SessionConfig::default())
    }

    /// Create a session with the given options
    pub fn with_config(out: W, config: SessionConfig) -> Self {
        Self {
            graph: DependencyGraph::with_cycle_check(config.cycle_check),
            out,
            config,
        }
    }

    /// The graph this session operates on
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// The transcript writer
    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Consume the session, returning the graph and the transcript writer
    pub fn into_parts(self) -> (DependencyGraph, W) {
        (self.graph, self.out)
    }

    /// Echo, parse and execute one raw input line.
    ///
    /// Blank lines are ignored. A usage error is written to the transcript
    /// and then returned; the caller should stop processing.
    pub fn execute_line(&mut self, line: &str) -> Result<Flow, SessionError> {
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }

        writeln!(self.out, "{}", line)?;

        match parse_line(line) {
            Ok(Some(command)) => self.execute(command),
            Ok(None) => Ok(Flow::Continue),
            Err(err) => {
                writeln!(self.out, "{}", err)?;
                Err(err.into())
            }
        }
    }

    /// Execute an already parsed command.
    pub fn execute(&mut self, command: Command) -> Result<Flow, SessionError> {
        debug!(command = %command, "executing");

        match command {
            Command::Depend {
                parent,
                dependencies,
            } => {
                let events = self.graph.declare_dependency(&parent, dependencies.as_slice())?;
                self.report(&events)?;
            }
            Command::Install(component) => {
                let events = self.graph.install(&component);
                self.report(&events)?;
            }
            Command::Remove(component) => {
                let events = self.graph.remove(&component);
                self.report(&events)?;
            }
            Command::List => {
                for component in self.graph.list_installed() {
                    writeln!(self.out, "{}", component)?;
                }
            }
            Command::End => {
                info!("END command received");
                writeln!(self.out, "Encountered END command. Exiting program.")?;
                return Ok(Flow::End);
            }
            Command::Unknown(name) => {
                writeln!(self.out, "Unable to process unknown command {}", name)?;
            }
        }

        Ok(Flow::Continue)
    }

    fn report(&mut self, events: &[Event]) -> io::Result<()> {
        for event in events {
            trace!(component = event.component(), %event, "event");
            if matches!(event, Event::DependencyRecorded { .. }) && !self.config.echo_edges {
                continue;
            }
            writeln!(self.out, "{}", event)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(session: &Session<Vec<u8>>) -> Vec<String> {
        String::from_utf8_lossy(session.writer())
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_execute_line_echoes_input() {
        let mut session = Session::new(Vec::new());
        let flow = session.execute_line("INSTALL DNS").unwrap();

        assert_eq!(flow, Flow::Continue);
        assert_eq!(transcript(&session), vec!["INSTALL DNS", "Installing DNS"]);
    }

    #[test]
    fn test_blank_line_is_ignored() {
        let mut session = Session::new(Vec::new());
        assert_eq!(session.execute_line("   ").unwrap(), Flow::Continue);
        assert!(session.writer().is_empty());
    }

    #[test]
    fn test_depend_is_silent_by_default() {
        let mut session = Session::new(Vec::new());
        session.execute_line("DEPEND A B").unwrap();

        assert_eq!(transcript(&session), vec!["DEPEND A B"]);
        assert_eq!(session.graph().dependencies_of("A"), vec!["B"]);
    }

    #[test]
    fn test_echo_edges() {
        let config = SessionConfig {
            echo_edges: true,
            ..SessionConfig::default()
        };
        let mut session = Session::with_config(Vec::new(), config);
        session.execute_line("DEPEND A B").unwrap();

        assert_eq!(transcript(&session), vec!["DEPEND A B", "A depends on B"]);
    }

    #[test]
    fn test_cycle_rejection_is_reported() {
        let mut session = Session::new(Vec::new());
        session.execute_line("DEPEND A B").unwrap();
        session.execute_line("DEPEND B A").unwrap();

        assert_eq!(
            transcript(&session),
            vec!["DEPEND A B", "DEPEND B A", "A depends on B, ignoring command"]
        );
    }

    #[test]
    fn test_transitive_config_reaches_graph() {
        let config = SessionConfig {
            cycle_check: CycleCheck::Transitive,
            ..SessionConfig::default()
        };
        let session = Session::with_config(Vec::new(), config);
        assert_eq!(session.graph().cycle_check(), CycleCheck::Transitive);
    }

    #[test]
    fn test_list() {
        let mut session = Session::new(Vec::new());
        session.execute_line("INSTALL A").unwrap();
        session.execute_line("INSTALL B").unwrap();
        session.execute_line("LIST").unwrap();

        let lines = transcript(&session);
        assert_eq!(&lines[lines.len() - 3..], &["LIST", "A", "B"]);
    }

    #[test]
    fn test_end() {
        let mut session = Session::new(Vec::new());
        assert_eq!(session.execute_line("END").unwrap(), Flow::End);
        assert_eq!(
            transcript(&session),
            vec!["END", "Encountered END command. Exiting program."]
        );
    }

    #[test]
    fn test_unknown_command() {
        let mut session = Session::new(Vec::new());
        assert_eq!(session.execute_line("UPGRADE X").unwrap(), Flow::Continue);
        assert_eq!(
            transcript(&session),
            vec!["UPGRADE X", "Unable to process unknown command UPGRADE"]
        );
    }

    #[test]
    fn test_usage_error_is_written_and_returned() {
        let mut session = Session::new(Vec::new());
        let err = session.execute_line("REMOVE").unwrap_err();

        assert!(err.is_usage());
        assert_eq!(
            transcript(&session),
            vec!["REMOVE", "Invalid syntax for REMOVE command. Eg) REMOVE TELNET"]
        );
    }

    #[test]
    fn test_into_parts() {
        let mut session = Session::new(Vec::new());
        session.execute(Command::Install("X".into())).unwrap();

        let (graph, out) = session.into_parts();
        assert!(graph.is_installed("X"));
        assert_eq!(String::from_utf8(out).unwrap(), "Installing X\n");
    }
}
