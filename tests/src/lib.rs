//! # Debt Note Ledger Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs      # Multi-org lifecycles over shared stores
//!     ├── dispatch.rs   # Function-name invocations end to end
//!     └── telemetry.rs  # Subscriber and metrics wiring
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p debtnote-tests
//! cargo test -p debtnote-tests integration::flows
//!
//! # Benchmarks
//! cargo bench -p debtnote-tests
//! ```

pub mod integration;
