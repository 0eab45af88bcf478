//! # depotmap core
//!
//! Delivery maps stored as fixed-record files, and route search over them.
//!
//! This crate provides:
//! - Record codecs for the house (`.mph`) and path (`.mpp`) files
//! - Tombstone-based record stores that reuse freed slots
//! - [`GraphRepository`], the facade that keeps both files consistent
//! - [`ShortestPathEngine`], a depth-first label-correcting search from the depot
//!
//! ## Example
//!
//! ```rust
//! use depotmap_core::{Config, GraphRepository, House, HouseId, ShortestPathEngine};
//!
//! let mut map = GraphRepository::in_memory(Config::default()).unwrap();
//! let a = map.add_house(House::new("Elm Street 3", 10, 4)).unwrap().unwrap();
//! let b = map.add_house(House::new("Elm Street 9", 30, 4)).unwrap().unwrap();
//! map.connect(HouseId::DEPOT, a).unwrap();
//! map.connect(a, b).unwrap();
//!
//! let route = ShortestPathEngine::new().search(&map, HouseId::DEPOT, b).unwrap();
//! assert_eq!(route.distance, 2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod entity;
mod error;
mod files;
pub mod record;
mod repository;
mod search;
mod store;
mod types;
mod working_set;

pub use config::Config;
pub use entity::{House, Path};
pub use error::{CoreError, CoreResult, ErrorKind, DESTINATION_UNREACHABLE, NO_FILE_SELECTED};
pub use files::{FileResolver, FixedSelection, MapFiles, HOUSE_EXTENSION, PATH_EXTENSION};
pub use repository::{GraphRepository, MapStats};
pub use search::{NoProgress, ProgressSink, Route, ShortestPathEngine, TracingProgress};
pub use store::{HouseStore, PathStore, RecordFile, RecordStore};
pub use types::{HouseId, PathId};
pub use working_set::{CursorMut, Slotted, WorkingSet};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
