//! # depotmap testkit
//!
//! Test utilities for depotmap.
//!
//! This crate provides:
//! - Map fixtures backed by memory or temporary files
//! - Property-based test generators using proptest
//! - A harness that checks a map against a shadow model
//!
//! ## Usage
//!
//! ```rust
//! use depotmap_testkit::prelude::*;
//!
//! let map = scenarios::chain(3, 2);
//! assert_eq!(map.stats().paths, 3);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod integration;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::integration::*;
}

pub use fixtures::*;
pub use generators::*;
pub use integration::*;
