use anyhow::{Result, bail};
use clap::Args;
use context::{ContextBroker, Resolution};

use crate::output;

#[derive(Args)]
pub struct ShowArgs {
    #[arg(help = "Repository name, relative to the repositories folder")]
    pub name: String,

    #[arg(long, help = "Output as JSON")]
    pub json: bool
}

pub fn run(broker: &ContextBroker, args: ShowArgs) -> Result<()> {
    let handle = match broker.get_repository(&args.name)? {
        Resolution::Found(handle) => handle,
        Resolution::NotFound => bail!("repository {} not found", args.name),
        Resolution::NotEnabled => bail!("repository {} is not exported", args.name)
    };
    let model = handle.to_model()?;
    let clone_url = broker.clone_url_for(&model.name);

    if args.json {
        let mut value = serde_json::to_value(&model)?;
        value["cloneUrl"] = serde_json::Value::String(clone_url);
        value["bare"] = serde_json::Value::Bool(handle.is_bare());
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    output::header(&model.name);
    println!();
    output::field("description", &model.description);
    output::field("owner", &model.owner);
    output::field("last change", &output::timestamp(&model.last_change));
    output::field("features", &output::features(&model.features));
    output::field("bare", &handle.is_bare().to_string());
    output::field("clone url", &clone_url);
    Ok(())
}
