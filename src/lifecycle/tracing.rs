//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging for the whole system:
//! compact output, module paths hidden, level controlled by `RUST_LOG`.
//!
//! ## What gets traced
//!
//! - **Actor lifecycle**: repository startup, shutdown, and final list size
//! - **Operations**: every load, create, submit, resolve, update, delete
//! - **Sessions**: sign-in, sign-out, idle expiry
//! - **Failures**: warn-level records with the retained error message
//!
//! ## Usage
//!
//! ```bash
//! # Compact logs
//! RUST_LOG=info cargo run
//!
//! # Show full request payloads
//! RUST_LOG=debug cargo run
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Module paths add noise; messages carry the context
        .compact() // Compact format shows spans inline
        .init();
}
