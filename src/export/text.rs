//! Plain text export: installed components, one per line.

use super::{Exporter, GraphSnapshot};
use std::io::{self, Write};

/// Text exporter implementation.
pub struct TextExporter;

impl Exporter for TextExporter {
    fn export<W: Write>(&self, snapshot: &GraphSnapshot, writer: &mut W) -> io::Result<()> {
        for component in &snapshot.installed {
            writeln!(writer, "{}", component)?;
        }
        Ok(())
    }
}
