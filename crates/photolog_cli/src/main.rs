//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `photolog_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("photolog_core ping={}", photolog_core::ping());
    println!("photolog_core version={}", photolog_core::core_version());
}
