//! # Adapters Layer (Outer Hexagon)
//!
//! Concrete implementations of the outbound ports.

pub mod context;
pub mod memory;

pub use context::*;
pub use memory::*;
