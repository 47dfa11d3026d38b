use chrono::{DateTime, Utc};
use colored::Colorize;
use gb_core::{FeatureFlags, RepositoryModel};

pub fn header(title: &str) {
    println!("{}", title.bold().underline());
}

pub fn info(msg: &str) {
    eprintln!("{} {}", "info:".blue().bold(), msg);
}

pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

/// `key: value` line with the key padded to a fixed column.
pub fn field(name: &str, value: &str) {
    println!("  {:<14} {}", format!("{name}:"), value);
}

pub fn timestamp(when: &DateTime<Utc>) -> String {
    when.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Enabled feature names, or `none`.
pub fn features(flags: &FeatureFlags) -> String {
    let enabled: Vec<&str> = [
        (flags.use_tickets, "tickets"),
        (flags.use_docs, "docs"),
        (flags.use_named_users, "named-users")
    ]
    .into_iter()
    .filter_map(|(on, name)| on.then_some(name))
    .collect();

    if enabled.is_empty() {
        "none".to_string()
    } else {
        enabled.join(", ")
    }
}

/// One listing row: name, last change and description.
pub fn repository_row(model: &RepositoryModel) {
    let description = if model.description.is_empty() {
        "-".dimmed().to_string()
    } else {
        model.description.dimmed().to_string()
    };
    println!(
        "  {:<32} {}  {}",
        model.name.cyan(),
        timestamp(&model.last_change),
        description
    );
}
