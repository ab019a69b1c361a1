//! Layout diagnostics with colored terminal output.
//!
//! Provides deduplication so a tree with hundreds of identical items does not
//! repeat the same diagnostic hundreds of times. Used by the grid parser,
//! placement resolver, and driver to report input that is accepted but
//! probably not what the author meant.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about questionable input (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("Grid", "line name `a` declared on lines 1 and 3; using 3");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if first_sighting(component, message) {
        eprintln!("{}", format!("[Trellis {component}] ⚠ {message}").yellow());
    }
}

/// Clear all recorded warnings (call before laying out an unrelated tree)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

/// Record a warning key, returning `true` the first time it is seen.
fn first_sighting(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(format!("[{component}] {message}"))
}
