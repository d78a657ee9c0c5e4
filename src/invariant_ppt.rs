//! PPT Invariant System: non-RT invariant enforcement with contract tracking.

#[cfg(feature = "ppt")]
use lazy_static::lazy_static;
#[cfg(feature = "ppt")]
use std::collections::HashSet;
#[cfg(feature = "ppt")]
use std::sync::Mutex;

/// Host setup parameters were accepted.
pub const SETUP_VALID: u32 = 1;
/// A callback's declared channel counts matched the host's.
pub const ARITY_MATCH: u32 = 2;
/// Block buffers covered every channel and frame the callback touches.
pub const BLOCK_SHAPE: u32 = 3;
/// An offline render produced exactly the requested number of frames.
pub const OFFLINE_RENDER_COMPLETE: u32 = 4;
/// Rendered channels were written to a WAV file.
pub const WAV_EXPORTED: u32 = 5;

#[cfg(feature = "ppt")]
lazy_static! {
    static ref INVARIANT_LOG: Mutex<HashSet<u32>> = Mutex::new(HashSet::new());
}

#[cfg(feature = "ppt")]
/// Assert an invariant: logs it and panics on failure.
pub fn assert_invariant(id: u32, condition: bool, message: &str, context: Option<&str>) {
    if !condition {
        let full_message = if let Some(ctx) = context {
            format!("Invariant {} failed: {} (context: {})", id, message, ctx)
        } else {
            format!("Invariant {} failed: {}", id, message)
        };
        tracing::error!("{}", full_message);
        panic!("{}", full_message);
    }
    // A poisoned log only loses bookkeeping.
    if let Ok(mut log) = INVARIANT_LOG.lock() {
        log.insert(id);
    }
}

#[cfg(not(feature = "ppt"))]
/// Assert an invariant: checks condition and panics on failure.
pub fn assert_invariant(_id: u32, condition: bool, message: &str, _context: Option<&str>) {
    if !condition {
        panic!("Invariant failed: {}", message);
    }
}

#[cfg(feature = "ppt")]
/// Contract test: checks that specified invariants were asserted.
pub fn contract_test(test_name: &str, required_invariants: &[u32]) {
    let missing: Vec<u32> = {
        let log = INVARIANT_LOG.lock().unwrap_or_else(|e| e.into_inner());
        required_invariants
            .iter()
            .copied()
            .filter(|inv| !log.contains(inv))
            .collect()
    };
    if !missing.is_empty() {
        panic!(
            "Contract test '{}' failed: invariants not enforced: {:?}",
            test_name, missing
        );
    }
}

#[cfg(not(feature = "ppt"))]
/// Contract test: no-op when PPT feature is disabled.
pub fn contract_test(_test_name: &str, _required_invariants: &[u32]) {}

#[cfg(feature = "ppt")]
/// Clear invariant log (for between test runs).
pub fn clear_invariant_log() {
    if let Ok(mut log) = INVARIANT_LOG.lock() {
        log.clear();
    }
}

#[cfg(not(feature = "ppt"))]
/// Clear invariant log: no-op when PPT feature is disabled.
pub fn clear_invariant_log() {}
