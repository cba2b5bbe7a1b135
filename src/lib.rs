//! # Product Tracker
//!
//! > **A single-tenant inventory and sales tracker built on message-passing actors.**
//!
//! Users sign in, record products they bought for resale, and watch each one
//! move through `pending`, `delivered`, `returned`, or `failed`. A dashboard
//! aggregates counts and money totals over the current list. The product
//! list lives inside one actor task that mirrors every change to an
//! owner-scoped record store.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Why an actor for a product list?
//!
//! The list has exactly one interesting hazard: two rapid submissions can
//! race between "scan for a duplicate name" and "write the row". Putting the
//! list behind a mailbox makes every operation an uninterrupted unit:
//! screening, the store call, and the cache patch happen inside one task,
//! with no locks and no lost updates.
//!
//! ### Explicit sessions
//!
//! Nothing reads an ambient current user. Every repository operation asks
//! the injected [`IdentityProvider`](identity::IdentityProvider) who is
//! signed in, and refuses mutations without an answer. That keeps ownership
//! scoping visible in the code and trivial to exercise in tests.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Core ([`repository`])
//! The actor owning the product list, its mailbox protocol, and the
//! duplicate-name reconciliation rule.
//! - **Key items**: [`ProductRepository`](repository::ProductRepository),
//!   [`check_duplicate`](repository::check_duplicate),
//!   [`SubmitOutcome`](repository::SubmitOutcome).
//!
//! ### 2. The Interface ([`clients`])
//! Raw message passing stays private; callers use a cloneable async client.
//! - **Key items**: [`RepositoryClient`](clients::RepositoryClient).
//!
//! ### 3. The Collaborators ([`store`], [`identity`])
//! External services behind trait seams, each with an in-process
//! implementation for demos and tests.
//! - **Key items**: [`RecordStore`](store::RecordStore),
//!   [`IdentityProvider`](identity::IdentityProvider),
//!   [`SessionEvent`](identity::SessionEvent).
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! Spins everything up, wires dependencies, and shuts down cleanly.
//! - **Key items**: [`TrackerSystem`](lifecycle::TrackerSystem).
//!
//! ### 5. The Rest
//! [`model`] holds the plain data types, [`view`] the pure dashboard math,
//! [`auth`] the account flows, [`idle`] the inactivity watchdog, and
//! [`config`] the tunables.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo flow with info logs
//! RUST_LOG=info cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod auth;
pub mod clients;
pub mod config;
pub mod identity;
pub mod idle;
pub mod lifecycle;
pub mod model;
pub mod repository;
pub mod store;
pub mod view;
