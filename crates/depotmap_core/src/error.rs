//! Error types for depotmap core.

use crate::types::HouseId;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Code of [`CoreError::NoFileSelected`] within [`ErrorKind::Storage`].
pub const NO_FILE_SELECTED: u32 = 1;

/// Code of [`CoreError::Unreachable`] within [`ErrorKind::GraphSearch`].
pub const DESTINATION_UNREACHABLE: u32 = 1;

/// The module an error originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Record files: missing files, I/O, inconsistent data.
    Storage,
    /// Route search.
    GraphSearch,
    /// Bad arguments from the caller.
    CallerInput,
}

impl ErrorKind {
    /// Human-readable module name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Storage => "File System Module",
            Self::GraphSearch => "Graph Searching Module",
            Self::CallerInput => "Caller Input",
        }
    }
}

/// Errors that can occur in depotmap core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Storage backend error.
    #[error("storage error: {0}")]
    Storage(#[from] depotmap_storage::StorageError),

    /// The file resolver returned no selection.
    #[error("no map file selected")]
    NoFileSelected,

    /// The selected file is neither a house nor a path file.
    #[error("unsupported map file extension: {}", path.display())]
    UnsupportedExtension {
        /// The rejected selection.
        path: PathBuf,
    },

    /// A record could not be decoded or refers to something that doesn't exist.
    #[error("inconsistent {file} data (id:{slot}) - {reason}")]
    CorruptRecord {
        /// Which file the record came from ("house" or "path").
        file: &'static str,
        /// Slot index of the record.
        slot: u32,
        /// What is wrong with it.
        reason: String,
    },

    /// The destination has no route from the origin.
    #[error("destination {target} unreachable from {origin}")]
    Unreachable {
        /// Search origin.
        origin: HouseId,
        /// Search destination.
        target: HouseId,
    },

    /// Walking back-pointers revisited a house.
    #[error("back-pointer cycle through {house}")]
    BackPointerCycle {
        /// The house seen twice.
        house: HouseId,
    },

    /// A house identifier that isn't live.
    #[error("unknown house: {id}")]
    UnknownHouse {
        /// The identifier given.
        id: HouseId,
    },

    /// Attempted to remove the depot.
    #[error("cannot remove the depot ({})", HouseId::DEPOT)]
    DepotRemoval,
}

impl CoreError {
    /// Creates a corrupt record error.
    pub fn corrupt_record(file: &'static str, slot: u32, reason: impl Into<String>) -> Self {
        Self::CorruptRecord {
            file,
            slot,
            reason: reason.into(),
        }
    }

    /// Creates an unknown house error.
    pub fn unknown_house(id: HouseId) -> Self {
        Self::UnknownHouse { id }
    }

    /// Returns the module this error originates from.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Storage(_)
            | Self::NoFileSelected
            | Self::UnsupportedExtension { .. }
            | Self::CorruptRecord { .. } => ErrorKind::Storage,
            Self::Unreachable { .. } | Self::BackPointerCycle { .. } => ErrorKind::GraphSearch,
            Self::UnknownHouse { .. } | Self::DepotRemoval => ErrorKind::CallerInput,
        }
    }

    /// Returns the numeric code of an identified outcome.
    ///
    /// Codes are scoped by [`kind`](Self::kind); message-based errors have none.
    #[must_use]
    pub fn code(&self) -> Option<u32> {
        match self {
            Self::NoFileSelected => Some(NO_FILE_SELECTED),
            Self::Unreachable { .. } => Some(DESTINATION_UNREACHABLE),
            _ => None,
        }
    }

    /// Returns true for outcomes a caller is expected to handle quietly.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        self.code().is_some()
    }
}
