mod list;
mod migrate;

pub use list::ListCommand;
pub use migrate::MigrateCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// keyshift - migrate persisted plugin settings to the current schema
#[derive(Parser)]
#[command(name = "keyshift")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Apply the built-in migrations to a settings file.
    Migrate(MigrateCommand),

    /// List the built-in migrations in application order.
    List(ListCommand),
}

impl Cli {
    /// Execute the CLI command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Migrate(cmd) => cmd.execute(),
            Commands::List(cmd) => cmd.execute(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_migrate() {
        let cli = Cli::try_parse_from([
            "keyshift",
            "migrate",
            "--settings",
            "config.json",
            "--namespace",
            "my-plugin",
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Commands::Migrate(cmd) => {
                assert_eq!(cmd.config, "keyshift.toml");
                assert_eq!(cmd.settings.as_deref(), Some(std::path::Path::new("config.json")));
                assert_eq!(cmd.namespace.as_deref(), Some("my-plugin"));
                assert!(cmd.dry_run);
            }
            Commands::List(_) => panic!("expected migrate"),
        }
    }

    #[test]
    fn test_cli_parse_list() {
        let cli = Cli::try_parse_from(["keyshift", "list"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["keyshift", "rollback"]).is_err());
    }
}
