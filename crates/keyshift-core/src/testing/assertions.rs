//! Test assertion macros for settings stores.

/// Assert that a store holds `value` at a full dotted path.
///
/// # Example
///
/// ```ignore
/// assert_setting!(store, "linter-eslint.autofix.fixOnSave", json!(true));
/// ```
#[macro_export]
macro_rules! assert_setting {
    ($store:expr, $path:expr, $value:expr) => {
        match $store.value($path) {
            Some(ref actual) if *actual == $value => (),
            Some(actual) => panic!(
                "assertion failed: expected {} = {}, got {}",
                $path, $value, actual
            ),
            None => panic!(
                "assertion failed: expected {} = {}, but it is unset",
                $path, $value
            ),
        }
    };
}

/// Assert that a store holds nothing at a full dotted path.
///
/// # Example
///
/// ```ignore
/// assert_unset!(store, "linter-eslint.fixOnSave");
/// ```
#[macro_export]
macro_rules! assert_unset {
    ($store:expr, $path:expr) => {
        if let Some(actual) = $store.value($path) {
            panic!(
                "assertion failed: expected {} to be unset, got {}",
                $path, actual
            );
        }
    };
}

/// Assert that a store served no `set`/`unset` operations.
#[macro_export]
macro_rules! assert_no_writes {
    ($store:expr) => {
        let writes = $store.writes();
        if !writes.is_empty() {
            panic!("assertion failed: expected no writes, got {:?}", writes);
        }
    };
}
