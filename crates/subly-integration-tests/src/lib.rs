//! Integration test crate for the Subly primitives.
//!
//! This crate has no library code. Its tests exercise end-to-end flows
//! across the commitment, codec and membership crates.
//!
//! Run all integration tests:
//! ```sh
//! cargo test -p subly-integration-tests
//! ```
