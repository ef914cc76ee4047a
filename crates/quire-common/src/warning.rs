//! Engine warnings, deduplicated and routed through `log`.
//!
//! Structural misuse (appending into a leaf, addressing a slot outside its
//! grid, ...) is ignored by the engine but worth reporting once. Rebuilding a
//! page tends to repeat the same mistake every frame, so each unique message
//! is only logged the first time it is seen.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already logged (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a structural problem (logs once per unique message)
///
/// # Example
/// ```
/// quire_common::warning::warn_once("tree", "cannot append children to a sprite");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_log = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_log {
        log::warn!(target: "quire", "[{component}] {message}");
    }
}

/// Clear all recorded warnings (call when loading a new page)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

/// Whether `warn_once` has already reported this message.
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}
