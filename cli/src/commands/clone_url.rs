use anyhow::Result;
use clap::Args;
use context::ContextBroker;

#[derive(Args)]
pub struct CloneUrlArgs {
    #[arg(help = "Repository name")]
    pub name: String
}

pub fn run(broker: &ContextBroker, args: CloneUrlArgs) -> Result<()> {
    println!("{}", broker.clone_url_for(&args.name));
    Ok(())
}
