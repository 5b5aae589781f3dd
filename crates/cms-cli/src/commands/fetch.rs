//! Fetch command

use std::path::PathBuf;

use clap::Args;
use cms_core::remote::RemoteSource;
use cms_core::RecordKind;
use cms_core_types::RequestContext;

use super::{emit, RemoteArgs};

#[derive(Debug, Args)]
pub struct FetchArgs {
    #[arg(long)]
    pub kind: RecordKind,

    /// Record id; omitted for about-us
    #[arg(long)]
    pub id: Option<String>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub remote: RemoteArgs,
}

pub fn execute(args: FetchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut remote = args.remote.connect(args.kind)?;
    let record = remote.fetch_record(args.id.as_deref(), &RequestContext::new())?;
    emit(
        &format!("{}\n", serde_json::to_string_pretty(&record)?),
        args.output.as_ref(),
    )
}
