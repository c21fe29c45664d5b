//! JSON export implementation.
//!
//! Exports the graph snapshot in JSON format for machine-readable output.

use super::{Exporter, GraphSnapshot};
use serde::Serialize;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// Serializable edge for JSON output.
#[derive(Serialize)]
struct JsonEdge<'a> {
    component: &'a str,
    depends_on: &'a str,
}

/// Serializable cycle info for JSON output.
#[derive(Serialize)]
struct JsonCycle {
    components: Vec<String>,
    path: String,
}

/// Summary statistics for JSON output.
#[derive(Serialize)]
struct JsonSummary {
    components: usize,
    edges: usize,
    installed: usize,
    cycles: usize,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport<'a> {
    summary: JsonSummary,
    components: &'a [String],
    edges: Vec<JsonEdge<'a>>,
    installed: &'a [String],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    cycles: Vec<JsonCycle>,
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, snapshot: &GraphSnapshot, writer: &mut W) -> io::Result<()> {
        let edges: Vec<JsonEdge<'_>> = snapshot
            .edges
            .iter()
            .map(|(from, to)| JsonEdge {
                component: from,
                depends_on: to,
            })
            .collect();

        let cycles: Vec<JsonCycle> = snapshot
            .cycles
            .iter()
            .map(|c| JsonCycle {
                components: c.nodes.clone(),
                path: c.cycle_path(),
            })
            .collect();

        let export = JsonExport {
            summary: JsonSummary {
                components: snapshot.components.len(),
                edges: snapshot.edges.len(),
                installed: snapshot.installed.len(),
                cycles: snapshot.cycles.len(),
            },
            components: &snapshot.components,
            edges,
            installed: &snapshot.installed,
            cycles,
        };

        serde_json::to_writer_pretty(&mut *writer, &export)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        writeln!(writer)?;
        Ok(())
    }
}
