use anyhow::{Result, bail};
use clap::Args;
use context::{ContextBroker, EditOutcome, Resolution};
use gb_core::RepositoryModel;

use crate::output;

/// Metadata flags shared by `create` and `edit`. Unset flags keep the
/// current value (or the default on create).
#[derive(Args, Debug, Default)]
pub struct MetadataArgs {
    #[arg(long, help = "Repository description")]
    pub description: Option<String>,

    #[arg(long, help = "Repository owner")]
    pub owner: Option<String>,

    #[arg(long, value_name = "BOOL", help = "Enable tickets")]
    pub tickets: Option<bool>,

    #[arg(long, value_name = "BOOL", help = "Enable documentation pages")]
    pub docs: Option<bool>,

    #[arg(long = "named-users", value_name = "BOOL", help = "Restrict pushes to named users")]
    pub named_users: Option<bool>
}

impl MetadataArgs {
    fn apply_to(self, model: &mut RepositoryModel) {
        if let Some(description) = self.description {
            model.description = description;
        }
        if let Some(owner) = self.owner {
            model.owner = owner;
        }
        if let Some(on) = self.tickets {
            model.features.use_tickets = on;
        }
        if let Some(on) = self.docs {
            model.features.use_docs = on;
        }
        if let Some(on) = self.named_users {
            model.features.use_named_users = on;
        }
    }
}

#[derive(Args)]
pub struct CreateArgs {
    #[arg(help = "Repository name, e.g. team/app.git")]
    pub name: String,

    #[command(flatten)]
    pub metadata: MetadataArgs
}

#[derive(Args)]
pub struct EditArgs {
    #[arg(help = "Repository name")]
    pub name: String,

    #[command(flatten)]
    pub metadata: MetadataArgs
}

pub fn create(broker: &ContextBroker, args: CreateArgs) -> Result<()> {
    let mut model = RepositoryModel::new(args.name, "", "");
    args.metadata.apply_to(&mut model);

    broker.edit_repository(&model, true)?;
    output::success(&format!(
        "Created {} ({})",
        model.name,
        broker.clone_url_for(&model.name)
    ));
    Ok(())
}

pub fn edit(broker: &ContextBroker, args: EditArgs) -> Result<()> {
    let mut model = match broker.get_repository(&args.name)? {
        Resolution::Found(handle) => handle.to_model()?,
        Resolution::NotFound => bail!("repository {} not found", args.name),
        Resolution::NotEnabled => bail!("repository {} is not exported", args.name)
    };
    args.metadata.apply_to(&mut model);

    match broker.edit_repository(&model, false)? {
        EditOutcome::Updated | EditOutcome::Created => {
            output::success(&format!("Updated {}", model.name));
            Ok(())
        }
        EditOutcome::NotFound => bail!("repository {} not found", model.name),
        EditOutcome::NotEnabled => bail!("repository {} is not exported", model.name)
    }
}
