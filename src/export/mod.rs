//! Export functionality for graph state.
//!
//! This module renders a snapshot of a [`DependencyGraph`] either as plain
//! text (installed components, one per line) or as JSON.

pub mod json;
pub mod text;

use crate::graph::{CycleInfo, DependencyGraph};
use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Installed components, one per line
    Text,
    /// JSON format - machine-readable, full data
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: text, json",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

/// Point-in-time copy of a graph's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSnapshot {
    /// Every component that appears in a declared edge
    pub components: Vec<String>,
    /// Declared edges as (dependent, dependency)
    pub edges: Vec<(String, String)>,
    /// Installed components in install order
    pub installed: Vec<String>,
    /// Cycles present in the graph
    pub cycles: Vec<CycleInfo>,
}

impl GraphSnapshot {
    /// Capture the current state of `graph`.
    ///
    /// Components and edges are sorted so snapshots of equal graphs compare
    /// equal; the installed list keeps install order.
    pub fn capture(graph: &DependencyGraph) -> Self {
        let mut components: Vec<String> =
            graph.components().into_iter().map(str::to_string).collect();
        components.sort();

        let mut edges: Vec<(String, String)> = graph
            .edges()
            .into_iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();
        edges.sort();

        Self {
            components,
            edges,
            installed: graph
                .list_installed()
                .into_iter()
                .map(str::to_string)
                .collect(),
            cycles: graph.detect_cycles(),
        }
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the snapshot to the given writer.
    fn export<W: Write>(&self, snapshot: &GraphSnapshot, writer: &mut W) -> io::Result<()>;
}

/// Export a snapshot in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    snapshot: &GraphSnapshot,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Text => text::TextExporter.export(snapshot, writer),
        ExportFormat::Json => json::JsonExporter.export(snapshot, writer),
    }
}

/// Export a snapshot to a string.
pub fn export_to_string(format: ExportFormat, snapshot: &GraphSnapshot) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, snapshot, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
