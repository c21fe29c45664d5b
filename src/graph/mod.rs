//! Graph module for component dependency tracking.
//!
//! This module provides the [`DependencyGraph`] engine: declared dependency
//! edges, the installed set, and the install and remove cascades that keep
//! them consistent.
//!
//! # Example
//!
//! ```rust
//! use compdeps::graph::{DependencyGraph, Event};
//!
//! let mut graph = DependencyGraph::new();
//! graph.declare_dependency("DNS", &["TCPIP"]).unwrap();
//!
//! assert_eq!(
//!     graph.install("DNS"),
//!     vec![Event::Installed("TCPIP".into()), Event::Installed("DNS".into())]
//! );
//! assert_eq!(graph.list_installed(), vec!["TCPIP", "DNS"]);
//! ```

mod dependency_graph;

pub use dependency_graph::{CycleCheck, CycleInfo, DependencyGraph, Event, GraphError};
