//! Dependency graph engine using petgraph.
//!
//! Components are nodes and declared dependencies are edges pointing from the
//! dependent component to the component it requires. Outgoing edges answer
//! "what does X depend on", incoming edges answer "what still uses X", so the
//! two directions can never disagree.

use indexmap::IndexSet;
use petgraph::algo::{has_path_connecting, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace, warn};

/// Errors returned by graph operations.
///
/// Domain outcomes such as "still needed" are reported as [`Event`]s; this
/// type only covers calls that violate the operation's contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// `declare_dependency` was called without any dependency.
    #[error("component '{parent}' was declared without any dependency")]
    EmptyDependencyList { parent: String },
}

/// How thoroughly a new edge is checked for cycles before it is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CycleCheck {
    /// Reject self-dependencies and direct back-edges only.
    #[default]
    Shallow,
    /// Reject any edge whose target already reaches the parent.
    Transitive,
}

impl FromStr for CycleCheck {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "shallow" => Ok(CycleCheck::Shallow),
            "transitive" | "full" => Ok(CycleCheck::Transitive),
            _ => Err(format!(
                "Unknown cycle check: '{}'. Valid values: shallow, transitive (alias: full)",
                s
            )),
        }
    }
}

impl fmt::Display for CycleCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleCheck::Shallow => write!(f, "shallow"),
            CycleCheck::Transitive => write!(f, "transitive"),
        }
    }
}

/// Something observable that happened while executing an operation.
///
/// Events are returned in the order they occurred. Their `Display` output is
/// the line a transcript prints for them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Event {
    /// An edge `parent -> dependency` is now part of the graph.
    DependencyRecorded { parent: String, dependency: String },
    /// The edge `parent -> dependency` was refused; the rest of the
    /// declaration was abandoned.
    CycleRejected { parent: String, dependency: String },
    /// The component was added to the installed set.
    Installed(String),
    /// The component was already installed; nothing changed.
    AlreadyInstalled(String),
    /// The component was taken out of the installed set.
    Removed(String),
    /// A removal was requested for a component that is not installed.
    NotInstalled(String),
    /// An installed component outside the current removal still depends on it.
    StillNeeded(String),
}

impl Event {
    /// The component the event is about.
    pub fn component(&self) -> &str {
        match self {
            Event::DependencyRecorded { parent, .. } | Event::CycleRejected { parent, .. } => parent,
            Event::Installed(c)
            | Event::AlreadyInstalled(c)
            | Event::Removed(c)
            | Event::NotInstalled(c)
            | Event::StillNeeded(c) => c,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::DependencyRecorded { parent, dependency } => {
                write!(f, "{} depends on {}", parent, dependency)
            }
            Event::CycleRejected { parent, dependency } => {
                write!(f, "{} depends on {}, ignoring command", dependency, parent)
            }
            Event::Installed(c) => write!(f, "Installing {}", c),
            Event::AlreadyInstalled(c) => write!(f, "{} is already installed.", c),
            Event::Removed(c) => write!(f, "Removed {}", c),
            Event::NotInstalled(c) => write!(f, "{} is not installed.", c),
            Event::StillNeeded(c) => write!(f, "{} is still needed.", c),
        }
    }
}

/// Information about a dependency cycle present in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleInfo {
    /// The components in the cycle (the last connects back to the first)
    pub nodes: Vec<String>,
}

impl CycleInfo {
    /// Returns a formatted string representation of the cycle path.
    ///
    /// For example: "A -> B -> C -> A"
    pub fn cycle_path(&self) -> String {
        let Some(first) = self.nodes.first() else {
            return String::new();
        };
        format!("{} -> {}", self.nodes.join(" -> "), first)
    }

    /// Returns the number of components in the cycle.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the cycle is empty (should not happen in practice).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// The dependency graph engine.
///
/// Owns every piece of state: the edges between components and the set of
/// installed components. Each operation runs to completion and leaves the
/// graph consistent, whether it succeeded or was refused.
///
/// # Example
///
/// ```rust
/// use compdeps::graph::{DependencyGraph, Event};
///
/// let mut graph = DependencyGraph::new();
/// graph.declare_dependency("TELNET", &["TCPIP", "NETCARD"]).unwrap();
///
/// let events = graph.install("TELNET");
/// assert!(events.contains(&Event::Installed("TCPIP".to_string())));
/// assert!(graph.is_installed("NETCARD"));
///
/// let events = graph.remove("TCPIP");
/// assert_eq!(events, vec![Event::StillNeeded("TCPIP".to_string())]);
/// ```
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// Edges point from the dependent component to its dependency
    graph: DiGraph<String, ()>,
    /// Maps component names to their node indices for O(1) lookup
    node_indices: HashMap<String, NodeIndex>,
    /// Installed components, in install order
    installed: IndexSet<String>,
    cycle_check: CycleCheck,
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyGraph {
    /// Creates an empty graph using the shallow cycle check.
    pub fn new() -> Self {
        Self::with_cycle_check(CycleCheck::default())
    }

    /// Creates an empty graph using the given cycle check policy.
    pub fn with_cycle_check(cycle_check: CycleCheck) -> Self {
        Self {
            graph: DiGraph::new(),
            node_indices: HashMap::new(),
            installed: IndexSet::new(),
            cycle_check,
        }
    }

    /// Returns the active cycle check policy.
    pub fn cycle_check(&self) -> CycleCheck {
        self.cycle_check
    }

    /// Declares that `parent` depends on each of `dependencies`.
    ///
    /// Dependencies are processed in the given order. The first one that
    /// would make `parent` depend on itself, or close a cycle according to
    /// the active [`CycleCheck`], is reported as [`Event::CycleRejected`]
    /// and the remaining dependencies are not processed. Edges accepted
    /// before the rejection stay in place. Declaring an existing edge again
    /// is a no-op apart from the event.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyDependencyList`] when `dependencies` is empty.
    pub fn declare_dependency<S: AsRef<str>>(
        &mut self,
        parent: &str,
        dependencies: &[S],
    ) -> Result<Vec<Event>, GraphError> {
        if dependencies.is_empty() {
            return Err(GraphError::EmptyDependencyList {
                parent: parent.to_string(),
            });
        }

        let mut events = Vec::with_capacity(dependencies.len());
        for dependency in dependencies {
            let dependency = dependency.as_ref();

            if self.would_form_cycle(parent, dependency) {
                warn!(parent, dependency, "dependency would form a cycle, ignoring the rest of the declaration");
                events.push(Event::CycleRejected {
                    parent: parent.to_string(),
                    dependency: dependency.to_string(),
                });
                break;
            }

            let from = self.ensure_node(parent);
            let to = self.ensure_node(dependency);
            if self.graph.contains_edge(from, to) {
                trace!(parent, dependency, "edge already declared");
            } else {
                self.graph.add_edge(from, to, ());
                debug!(parent, dependency, "edge declared");
            }

            events.push(Event::DependencyRecorded {
                parent: parent.to_string(),
                dependency: dependency.to_string(),
            });
        }

        Ok(events)
    }

    /// Installs `component` after making sure all of its dependencies are
    /// installed, recursively.
    ///
    /// Dependencies that are already installed are reported as
    /// [`Event::AlreadyInstalled`]. The installed set only grows.
    pub fn install(&mut self, component: &str) -> Vec<Event> {
        let mut events = Vec::new();
        let mut in_progress = HashSet::new();
        self.install_cascade(component, &mut in_progress, &mut events);
        events
    }

    fn install_cascade(
        &mut self,
        component: &str,
        in_progress: &mut HashSet<String>,
        events: &mut Vec<Event>,
    ) {
        in_progress.insert(component.to_string());

        for dependency in self.neighbor_names(component, Direction::Outgoing) {
            if self.installed.contains(&dependency) {
                events.push(Event::AlreadyInstalled(dependency));
            } else if in_progress.contains(&dependency) {
                // Only reachable when a longer cycle slipped past the shallow check.
                warn!(component, dependency = %dependency, "dependency cycle encountered during install");
            } else {
                self.install_cascade(&dependency, in_progress, events);
            }
        }

        if self.installed.insert(component.to_string()) {
            debug!(component, "installed");
            events.push(Event::Installed(component.to_string()));
        } else {
            events.push(Event::AlreadyInstalled(component.to_string()));
        }
    }

    /// Removes `component` and every dependency that nothing else needs.
    ///
    /// Removal is refused with [`Event::StillNeeded`] when an installed
    /// component outside the current removal depends on `component`; in that
    /// case nothing changes. Dependencies still needed elsewhere are kept and
    /// reported the same way, while the rest of the cascade proceeds.
    pub fn remove(&mut self, component: &str) -> Vec<Event> {
        let mut events = Vec::new();

        if !self.installed.contains(component) {
            events.push(Event::NotInstalled(component.to_string()));
            return events;
        }

        let mut to_be_removed = HashSet::new();
        self.remove_cascade(component, &mut to_be_removed, &mut events);
        events
    }

    fn remove_cascade(
        &mut self,
        component: &str,
        to_be_removed: &mut HashSet<String>,
        events: &mut Vec<Event>,
    ) {
        to_be_removed.insert(component.to_string());

        let blocker = self
            .neighbor_names(component, Direction::Incoming)
            .into_iter()
            .find(|dependent| {
                self.installed.contains(dependent) && !to_be_removed.contains(dependent)
            });
        if let Some(dependent) = blocker {
            debug!(component, needed_by = %dependent, "removal refused");
            to_be_removed.remove(component);
            events.push(Event::StillNeeded(component.to_string()));
            return;
        }

        for dependency in self.neighbor_names(component, Direction::Outgoing) {
            if !self.installed.contains(&dependency) || to_be_removed.contains(&dependency) {
                trace!(component, dependency = %dependency, "skipping dependency");
                continue;
            }
            self.remove_cascade(&dependency, to_be_removed, events);
        }

        self.installed.shift_remove(component);
        debug!(component, "removed");
        events.push(Event::Removed(component.to_string()));
    }

    /// Returns the installed components in install order.
    pub fn list_installed(&self) -> Vec<&str> {
        self.installed.iter().map(String::as_str).collect()
    }

    /// Returns true if `component` is installed.
    pub fn is_installed(&self, component: &str) -> bool {
        self.installed.contains(component)
    }

    /// Returns the components `component` directly depends on.
    pub fn dependencies_of(&self, component: &str) -> Vec<&str> {
        self.neighbors(component, Direction::Outgoing)
    }

    /// Returns the components that directly depend on `component`.
    pub fn dependents_of(&self, component: &str) -> Vec<&str> {
        self.neighbors(component, Direction::Incoming)
    }

    /// Returns true if `component` appears in any declared edge.
    pub fn contains(&self, component: &str) -> bool {
        self.node_indices.contains_key(component)
    }

    /// Returns every component that appears in a declared edge.
    pub fn components(&self) -> Vec<&str> {
        self.graph.node_weights().map(String::as_str).collect()
    }

    /// Returns every declared edge as `(dependent, dependency)`.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.graph
            .raw_edges()
            .iter()
            .map(|edge| {
                (
                    self.graph[edge.source()].as_str(),
                    self.graph[edge.target()].as_str(),
                )
            })
            .collect()
    }

    /// Returns the number of components that appear in a declared edge.
    pub fn component_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of declared edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Detects cycles currently present in the graph.
    ///
    /// With [`CycleCheck::Shallow`] a chain such as `A -> B`, `B -> C`,
    /// `C -> A` is accepted edge by edge; this reports it afterwards.
    /// One cycle is reported per strongly connected component, listed in
    /// edge direction.
    pub fn detect_cycles(&self) -> Vec<CycleInfo> {
        tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|scc| CycleInfo {
                nodes: self
                    .cycle_within(&scc)
                    .into_iter()
                    .map(|idx| self.graph[idx].clone())
                    .collect(),
            })
            .collect()
    }

    /// Follows outgoing edges inside `scc` from its first node back to it.
    fn cycle_within(&self, scc: &[NodeIndex]) -> Vec<NodeIndex> {
        let Some(&start) = scc.first() else {
            return Vec::new();
        };

        let members: HashSet<NodeIndex> = scc.iter().copied().collect();
        let mut visited = HashSet::from([start]);
        let mut path = vec![start];
        if self.extend_cycle(start, start, &members, &mut visited, &mut path) {
            path
        } else {
            scc.to_vec()
        }
    }

    fn extend_cycle(
        &self,
        current: NodeIndex,
        start: NodeIndex,
        members: &HashSet<NodeIndex>,
        visited: &mut HashSet<NodeIndex>,
        path: &mut Vec<NodeIndex>,
    ) -> bool {
        for next in self.graph.neighbors_directed(current, Direction::Outgoing) {
            if next == start {
                return true;
            }
            if members.contains(&next) && visited.insert(next) {
                path.push(next);
                if self.extend_cycle(next, start, members, visited, path) {
                    return true;
                }
                path.pop();
            }
        }
        false
    }

    fn would_form_cycle(&self, parent: &str, dependency: &str) -> bool {
        if parent == dependency {
            return true;
        }

        let (Some(&from), Some(&to)) = (
            self.node_indices.get(parent),
            self.node_indices.get(dependency),
        ) else {
            return false;
        };

        match self.cycle_check {
            CycleCheck::Shallow => self.graph.contains_edge(to, from),
            CycleCheck::Transitive => has_path_connecting(&self.graph, to, from, None),
        }
    }

    fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(name) {
            return idx;
        }

        let idx = self.graph.add_node(name.to_string());
        self.node_indices.insert(name.to_string(), idx);
        idx
    }

    fn neighbors(&self, name: &str, direction: Direction) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(name) else {
            return Vec::new();
        };

        self.graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n].as_str())
            .collect()
    }

    fn neighbor_names(&self, name: &str, direction: Direction) -> Vec<String> {
        self.neighbors(name, direction)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
