//! Delete command

use clap::Args;
use cms_core::remote::RemoteSource;
use cms_core::RecordKind;
use cms_core_types::RequestContext;

use super::RemoteArgs;

#[derive(Debug, Args)]
pub struct DeleteArgs {
    #[arg(long)]
    pub kind: RecordKind,

    #[arg(long)]
    pub id: String,

    #[command(flatten)]
    pub remote: RemoteArgs,
}

pub fn execute(args: DeleteArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut remote = args.remote.connect(args.kind)?;
    remote.delete_record(&args.id, &RequestContext::new())?;
    println!("✓ Deleted {} {}", args.kind, args.id);
    Ok(())
}
