//! One-time deprecation notices

use std::collections::HashSet;
use std::sync::{Mutex, OnceLock};

fn emitted() -> &'static Mutex<HashSet<&'static str>> {
    static EMITTED: OnceLock<Mutex<HashSet<&'static str>>> = OnceLock::new();
    EMITTED.get_or_init(|| Mutex::new(HashSet::new()))
}

/// Log a deprecation warning for `feature` the first time it is seen in
/// this process. Returns true when the warning was emitted.
pub(crate) fn warn_once(feature: &'static str, message: &str) -> bool {
    let first = match emitted().lock() {
        Ok(mut seen) => seen.insert(feature),
        Err(poisoned) => poisoned.into_inner().insert(feature),
    };
    if first {
        tracing::warn!(feature, "deprecated: {message}");
    }
    first
}
