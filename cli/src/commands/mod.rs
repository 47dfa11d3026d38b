pub mod clone_url;
pub mod completion;
pub mod edit;
pub mod list;
pub mod show;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "gitbroker",
    author,
    version,
    about = "gitbroker - serve, list and edit git repositories from one folder",
    long_about = "Works on the repositories folder named by git.repositoriesFolder.\n\nSettings \
                  come from built-in defaults, an optional --config file, GITBROKER_* \
                  environment variables and command-line flags, in that order."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    #[arg(long, global = true, help = "Settings file (TOML or YAML)")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Repositories folder, overrides git.repositoriesFolder"
    )]
    pub repositories: Option<PathBuf>
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List served repositories")]
    List(list::ListArgs),

    #[command(about = "Show one repository")]
    Show(show::ShowArgs),

    #[command(about = "Create a bare repository")]
    Create(edit::CreateArgs),

    #[command(about = "Edit repository description, owner and features")]
    Edit(edit::EditArgs),

    #[command(about = "Print the clone URL of a repository")]
    CloneUrl(clone_url::CloneUrlArgs),

    #[command(about = "Generate shell completions")]
    Completion(completion::CompletionArgs)
}
