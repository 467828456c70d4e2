//! Built-in linter-eslint settings migrations.
//!
//! Applied in the order listed here. New migrations go at the end.

use keyshift_core::error::Result;
use once_cell::sync::Lazy;
use serde_json::Value;

use super::descriptor::{MigrationContext, MigrationDescriptor};

/// Namespace the built-in migrations operate under.
pub const DEFAULT_NAMESPACE: &str = "linter-eslint";

static BUILTIN_MIGRATIONS: Lazy<Vec<MigrationDescriptor>> = Lazy::new(|| {
    vec![
        MigrationDescriptor::moves(
            "January, 2018",
            "Organized config settings into sections",
            [
                ("disableWhenNoEslintConfig", "disabling.disableWhenNoEslintConfig"),
                ("fixOnSave", "autofix.fixOnSave"),
                ("ignoreFixableRulesWhileTyping", "autofix.ignoreFixableRulesWhileTyping"),
                ("rulesToDisableWhileFixing", "autofix.rulesToDisableWhileFixing"),
                ("rulesToSilenceWhileTyping", "disabling.rulesToSilenceWhileTyping"),
                ("disableEslintIgnore", "advanced.disableEslintIgnore"),
                ("disableFSCache", "advanced.disableFSCache"),
                ("showRuleIdInMessage", "advanced.showRuleIdInMessage"),
                ("eslintrcPath", "global.eslintrcPath"),
                ("advancedLocalNodeModules", "advanced.localNodeModules"),
                ("eslintRulesDirs", "advanced.eslintRulesDirs"),
                ("useGlobalEslint", "global.useGlobalEslint"),
                ("globalNodePath", "global.globalNodePath"),
            ],
        ),
        MigrationDescriptor::custom(
            "September, 2017",
            "Deprecated eslintRulesDir{String} option in favor of eslintRulesDirs{Array<String>}",
            retire_rules_dir,
        ),
    ]
});

/// The built-in migrations, in application order.
pub fn default_migrations() -> &'static [MigrationDescriptor] {
    &BUILTIN_MIGRATIONS
}

/// Fold the old single `eslintRulesDir` into the `eslintRulesDirs` list.
///
/// The list is only filled in when it is empty (a missing key, `[]` or `""`);
/// a configured list is kept.
/// The old key is removed either way.
fn retire_rules_dir(ctx: &mut MigrationContext<'_>) -> Result<()> {
    let old_dir = match ctx.get("eslintRulesDir") {
        Some(value) if is_truthy(value) => value.clone(),
        _ => return Ok(()),
    };

    let dirs_empty = match ctx.get("eslintRulesDirs") {
        None => true,
        Some(Value::Array(dirs)) => dirs.is_empty(),
        Some(Value::String(dirs)) => dirs.is_empty(),
        Some(_) => false,
    };
    if dirs_empty {
        ctx.set("eslintRulesDirs", Value::Array(vec![old_dir]))?;
    }

    ctx.unset("eslintRulesDir")
}

/// JavaScript-style truthiness, which is what the editor stored these settings under.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
