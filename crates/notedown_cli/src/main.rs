//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `notedown_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // A tiny probe keeps core crate wiring checkable without any host UI
    // runtime in place.
    println!("notedown_core ping={}", notedown_core::ping());
    println!("notedown_core version={}", notedown_core::core_version());
}
