use anyhow::Result;
use clap::Parser;
use console::style;

use keyshift_runtime::migrations::{default_migrations, MigrationDescriptor, DEFAULT_NAMESPACE};

/// List the built-in migrations in application order.
#[derive(Parser)]
pub struct ListCommand {
    /// Also print every key each move set renames.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ListCommand {
    pub fn execute(self) -> Result<()> {
        println!();
        println!(
            "  {}  {} migrations ({})",
            style("⇄").bold(),
            style("keyshift").bold().cyan(),
            DEFAULT_NAMESPACE
        );
        println!();

        for (index, migration) in default_migrations().iter().enumerate() {
            let kind = match migration {
                MigrationDescriptor::MoveSet(_) => "moves",
                MigrationDescriptor::Custom(_) => "custom",
            };
            println!(
                "  {} {} {} {}",
                style(format!("{}.", index + 1)).dim(),
                migration.description(),
                style(format!("[{}]", kind)).yellow(),
                style(format!("added {}", migration.added())).dim()
            );

            if let (true, MigrationDescriptor::MoveSet(set)) = (self.verbose, migration) {
                for rule in &set.moves {
                    println!(
                        "      {} {} {}",
                        style(&rule.old).cyan(),
                        style("→").dim(),
                        style(&rule.new).cyan()
                    );
                }
            }
        }
        println!();

        Ok(())
    }
}
