//! Push command
//!
//! Fetches the live record, diffs it against a local working copy and
//! submits the changeset.

use std::path::PathBuf;

use clap::Args;
use cms_core::{render_human_summary, EditSession, Notice, RecordKind};

use super::{languages_or_default, read_record, RemoteArgs};

#[derive(Debug, Args)]
pub struct PushArgs {
    #[arg(long)]
    pub kind: RecordKind,

    /// Record id; omitted for about-us
    #[arg(long)]
    pub id: Option<String>,

    /// Edited working copy
    #[arg(long)]
    pub working: PathBuf,

    /// Comma-separated language codes (default: en,fr,tr)
    #[arg(long, value_delimiter = ',')]
    pub languages: Option<Vec<String>>,

    /// Print the changeset summary instead of submitting
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub remote: RemoteArgs,
}

pub fn execute(args: PushArgs) -> Result<(), Box<dyn std::error::Error>> {
    let working = read_record(&args.working)?;
    let mut remote = args.remote.connect(args.kind)?;

    let mut session = EditSession::open(
        &mut remote,
        args.id.as_deref(),
        args.kind.schema(),
        languages_or_default(args.languages),
    )?;
    session.replace_working(working);

    if args.dry_run {
        print!("{}", render_human_summary(&session.changeset()));
        return Ok(());
    }

    let label = args.kind.label();
    match session.submit(&mut remote) {
        Ok(outcome) => {
            println!("{}", Notice::from_outcome(&outcome, label));
            Ok(())
        }
        Err(err) => Err(Notice::from_error(&err, label).to_string().into()),
    }
}
