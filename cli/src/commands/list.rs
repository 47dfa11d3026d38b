use anyhow::Result;
use clap::Args;
use context::ContextBroker;

use crate::output;

#[derive(Args)]
pub struct ListArgs {
    #[arg(long, help = "Output as JSON")]
    pub json: bool,

    #[arg(long, help = "Print names only")]
    pub names: bool
}

pub fn run(broker: &ContextBroker, args: ListArgs) -> Result<()> {
    if args.names && !args.json {
        for name in broker.list_repository_names()? {
            println!("{name}");
        }
        return Ok(());
    }

    let models = broker.list_repositories()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&models)?);
        return Ok(());
    }

    if models.is_empty() {
        output::info("No repositories found");
        return Ok(());
    }

    output::header(&format!("Repositories ({})", models.len()));
    println!();
    for model in &models {
        output::repository_row(model);
    }
    Ok(())
}
