use anyhow::Result;
use clap::Parser;
use console::style;
use std::path::PathBuf;
use tracing::info;

use keyshift_core::config::KeyshiftConfig;
use keyshift_core::store::StoreOp;
use keyshift_runtime::migrations::{
    default_migrations, ConfigMigrator, MigrationOutcome, MigrationReport,
};
use keyshift_runtime::observability::init_tracing;
use keyshift_runtime::store::JsonFileStore;

/// Apply the built-in migrations to a settings file.
#[derive(Parser)]
pub struct MigrateCommand {
    /// Configuration file path.
    #[arg(short, long, default_value = "keyshift.toml")]
    pub config: String,

    /// Settings file to migrate (overrides config).
    #[arg(short, long)]
    pub settings: Option<PathBuf>,

    /// Settings namespace (overrides config).
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Show what would change without writing the settings file.
    #[arg(long)]
    pub dry_run: bool,
}

/// Result of a migrate invocation.
#[derive(Debug)]
pub enum MigrateOutcome {
    Planned(Vec<StoreOp>),
    Applied { report: MigrationReport, saved: bool },
}

impl MigrateCommand {
    pub fn execute(self) -> Result<()> {
        // Load .env if present so ${VAR} references in the config resolve
        dotenvy::dotenv().ok();

        let config = self.resolve_config()?;
        init_tracing(&config.logging)?;

        println!();
        println!(
            "  {}  {} v{}",
            style("⇄").bold(),
            style("keyshift").bold().cyan(),
            env!("CARGO_PKG_VERSION")
        );
        println!();
        println!(
            "  {} Settings: {} ({})",
            style("→").dim(),
            style(config.settings.path.display()).cyan(),
            config.settings.namespace
        );

        match migrate_settings(&config, self.dry_run)? {
            MigrateOutcome::Planned(ops) => print_plan(&ops),
            MigrateOutcome::Applied { report, saved } => print_report(&report, saved),
        }
        println!();

        Ok(())
    }

    /// Load the config file (or defaults) and apply command-line overrides.
    fn resolve_config(&self) -> Result<KeyshiftConfig> {
        let mut config = KeyshiftConfig::load_or_default(&self.config)?;

        if let Some(settings) = &self.settings {
            config.settings.path = settings.clone();
        }
        if let Some(namespace) = &self.namespace {
            config.settings.namespace = namespace.clone();
        }

        Ok(config)
    }
}

/// Open the configured settings file and migrate it, or plan the migration.
///
/// The file is only rewritten when every migration succeeds.
pub fn migrate_settings(config: &KeyshiftConfig, dry_run: bool) -> Result<MigrateOutcome> {
    let mut store = JsonFileStore::open(&config.settings.path)?;
    let migrator = ConfigMigrator::new(config.settings.namespace.clone(), default_migrations());

    if dry_run {
        let ops = migrator.plan(&store)?;
        info!("Planned {} settings change(s)", ops.len());
        return Ok(MigrateOutcome::Planned(ops));
    }

    let report = migrator.apply(&mut store)?;
    let saved = store.save()?;
    Ok(MigrateOutcome::Applied { report, saved })
}

fn print_plan(ops: &[StoreOp]) {
    if ops.is_empty() {
        println!("  {} Settings are up to date", style("✓").green());
        return;
    }

    println!("  {} Dry run, would apply:", style("ℹ").blue());
    for op in ops {
        println!("    {} {}", style("→").dim(), style(op).yellow());
    }
}

fn print_report(report: &MigrationReport, saved: bool) {
    for outcome in &report.outcomes {
        match outcome {
            MigrationOutcome::Moved { description, moved, .. } => {
                if moved.is_empty() {
                    continue;
                }
                println!("  {} {}", style("✓").green(), description);
                for rule in moved {
                    println!(
                        "    {} {} {} {}",
                        style("→").dim(),
                        style(&rule.old).cyan(),
                        style("→").dim(),
                        style(&rule.new).cyan()
                    );
                }
            }
            MigrationOutcome::Custom { description, changed } => {
                if *changed {
                    println!("  {} {}", style("✓").green(), description);
                }
            }
        }
    }

    if saved {
        println!("  {} Settings saved", style("✓").green());
    } else {
        println!("  {} Settings are up to date", style("✓").green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::fs;
    use tempfile::TempDir;

    fn config_for(path: PathBuf) -> KeyshiftConfig {
        let mut config = KeyshiftConfig::default();
        config.settings.path = path;
        config
    }

    #[test]
    fn test_migrate_settings_applies_and_saves() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "linter-eslint": { "fixOnSave": true } }"#).unwrap();

        let outcome = migrate_settings(&config_for(path.clone()), false).unwrap();
        assert!(matches!(outcome, MigrateOutcome::Applied { saved: true, .. }));

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            written,
            json!({ "linter-eslint": { "autofix": { "fixOnSave": true } } })
        );

        let again = migrate_settings(&config_for(path), false).unwrap();
        assert!(matches!(again, MigrateOutcome::Applied { saved: false, .. }));
    }

    #[test]
    fn test_rerun_reports_no_changed_migrations() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "linter-eslint": { "autofix": { "fixOnSave": true } } }"#).unwrap();

        match migrate_settings(&config_for(path), false).unwrap() {
            MigrateOutcome::Applied { report, saved } => {
                assert!(!saved);
                assert_eq!(report.outcomes.len(), 2);
                assert_eq!(report.changes().count(), 0);
            }
            other => panic!("expected applied run, got {:?}", other),
        }
    }

    #[test]
    fn test_migrate_settings_dry_run_leaves_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let original = r#"{ "linter-eslint": { "useGlobalEslint": true } }"#;
        fs::write(&path, original).unwrap();

        let outcome = migrate_settings(&config_for(path.clone()), true).unwrap();
        match outcome {
            MigrateOutcome::Planned(ops) => assert_eq!(ops.len(), 2),
            other => panic!("expected plan, got {:?}", other),
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_resolve_config_overrides() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("keyshift.toml");
        fs::write(
            &config_path,
            "[settings]\npath = \"from-file.json\"\nnamespace = \"from-file\"\n",
        )
        .unwrap();

        let cmd = MigrateCommand {
            config: config_path.to_string_lossy().into_owned(),
            settings: Some(PathBuf::from("override.json")),
            namespace: None,
            dry_run: false,
        };
        let config = cmd.resolve_config().unwrap();
        assert_eq!(config.settings.path, PathBuf::from("override.json"));
        assert_eq!(config.settings.namespace, "from-file");
    }
}
