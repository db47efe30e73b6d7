//! # SDRP Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/
//! │   ├── simulation.rs   # In-memory broadcast mesh of routing managers
//! │   └── integration/    # Multi-node scenarios over the mesh
//! └── benches/
//!     └── routing_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p sdrp-tests
//!
//! # Scenarios only
//! cargo test -p sdrp-tests integration::
//!
//! # Benchmarks
//! cargo bench -p sdrp-tests
//! ```
//!
//! Set `RUST_LOG=debug` to see the per-node trace of a failing scenario.

pub mod simulation;

pub use simulation::{DeliveryReport, Mesh, SimNode};
