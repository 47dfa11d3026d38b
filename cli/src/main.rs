use anyhow::Result;
use clap::Parser;

mod bootstrap;
mod commands;
mod output;

use commands::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Completion(args) = cli.command {
        return commands::completion::run(args);
    }

    let broker = bootstrap::start(&cli.global)?;
    let result = match cli.command {
        Commands::List(args) => commands::list::run(&broker, args),
        Commands::Show(args) => commands::show::run(&broker, args),
        Commands::Create(args) => commands::edit::create(&broker, args),
        Commands::Edit(args) => commands::edit::edit(&broker, args),
        Commands::CloneUrl(args) => commands::clone_url::run(&broker, args),
        Commands::Completion(_) => Ok(())
    };
    broker.shutdown();
    result
}
