//! Pass-level tracing hooks.
//!
//! This module purposefully avoids pulling a telemetry stack. Subscribers
//! (and any metrics export) are wired up by the embedding application.

#[cfg(feature = "tracing")]
pub fn emit_pass(pass: &'static str, key_values: &[(&str, String)]) {
    let span = tracing::span!(tracing::Level::DEBUG, "nestree_pass", pass);
    let _enter = span.enter();
    for (k, v) in key_values {
        tracing::debug!(pass, stat = %k, value = %v, "pass stat");
    }
}

#[cfg(not(feature = "tracing"))]
pub fn emit_pass(_pass: &'static str, _key_values: &[(&str, String)]) { /* no-op */
}
