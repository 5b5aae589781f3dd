//! Diff command
//!
//! Usage: cms diff --kind <KIND> --original <FILE> --working <FILE> [--format json|summary]

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use cms_core::{render_human_summary, EditSession, RecordKind};

use super::{emit, languages_or_default, read_record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Changeset as pretty-printed JSON
    Json,
    /// Markdown summary for review
    Summary,
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Record type: about-us, category or project
    #[arg(long)]
    pub kind: RecordKind,

    /// Snapshot as fetched
    #[arg(long)]
    pub original: PathBuf,

    /// Edited working copy
    #[arg(long)]
    pub working: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Comma-separated language codes (default: en,fr,tr)
    #[arg(long, value_delimiter = ',')]
    pub languages: Option<Vec<String>>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let original = read_record(&args.original)?;
    let working = read_record(&args.working)?;

    // Both sides are backfilled the same way a live session would
    let mut session = EditSession::start(
        original,
        args.kind.schema(),
        languages_or_default(args.languages),
    );
    session.replace_working(working);

    let changeset = session.changeset();
    if changeset.is_empty() {
        println!("No changes to save");
        return Ok(());
    }

    let text = match args.format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&changeset)?),
        OutputFormat::Summary => render_human_summary(&changeset),
    };
    emit(&text, args.output.as_ref())
}
