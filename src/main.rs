use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use compdeps::console::{run_script, InputMode, Session, SessionConfig};
use compdeps::export::{export, ExportFormat, GraphSnapshot};
use compdeps::graph::CycleCheck;
use compdeps::logging::{self, LogLevel};

#[derive(Parser)]
#[command(name = "compdeps")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Component dependency manager with install cascades and guarded removal", long_about = None)]
struct Cli {
    /// Command script to run ("-" or omitted reads standard input)
    input: Option<PathBuf>,

    /// The script has no leading command count line
    #[arg(long)]
    no_count: bool,

    /// Cycle check applied to new dependencies (shallow, transitive; "full" is an alias for transitive)
    #[arg(long, default_value = "shallow")]
    cycle_check: CycleCheck,

    /// Print a line for every accepted dependency
    #[arg(long)]
    echo_edges: bool,

    /// Write the final graph state after the run (text, json)
    #[arg(long)]
    export: Option<ExportFormat>,

    /// Where to write the export (defaults to standard output)
    #[arg(long, requires = "export")]
    export_path: Option<PathBuf>,

    /// Increase diagnostic output on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            cycle_check: self.cycle_check,
            echo_edges: self.echo_edges,
        }
    }

    fn input_mode(&self) -> InputMode {
        if self.no_count {
            InputMode::Unbounded
        } else {
            InputMode::Counted
        }
    }

    fn open_input(&self) -> Result<Box<dyn BufRead>> {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open script {}", path.display()))?;
                Ok(Box::new(BufReader::new(file)))
            }
            _ => Ok(Box::new(io::stdin().lock())),
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    logging::init(LogLevel::from_verbosity(cli.verbose)).context("failed to set up logging")?;

    let reader = cli.open_input()?;
    let mut session = Session::with_config(io::stdout().lock(), cli.session_config());

    match run_script(reader, &mut session, cli.input_mode()) {
        Ok(summary) => {
            tracing::info!(
                executed = summary.executed,
                ended = summary.ended,
                "script complete"
            );
        }
        // The usage message is already in the transcript
        Err(err) if err.is_usage() => return Ok(ExitCode::FAILURE),
        Err(err) => return Err(err).context("failed to run command script"),
    }

    let (graph, mut out) = session.into_parts();
    out.flush()?;

    if let Some(format) = cli.export {
        let snapshot = GraphSnapshot::capture(&graph);
        match &cli.export_path {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                let mut writer = BufWriter::new(file);
                export(format, &snapshot, &mut writer)?;
                writer.flush()?;
            }
            None => {
                export(format, &snapshot, &mut out)?;
                out.flush()?;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
