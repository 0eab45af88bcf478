//! Fixed-size on-disk record layouts.
//!
//! Both files are flat arrays of fixed-size slots; a slot's index is the
//! identifier of the entity stored in it. Every slot starts with a one-byte
//! tombstone flag. All integers are big-endian.
//!
//! ```text
//! house (33 bytes): [deleted:1][name:24, space padded][x:4][y:4]
//! path  (13 bytes): [deleted:1][start id:4][end id:4][weight:4]
//! ```

use crate::error::{CoreError, CoreResult};

/// Width of the name field in bytes.
pub const NAME_WIDTH: usize = 24;

/// Size of a house record on disk.
pub const HOUSE_RECORD_SIZE: usize = 1 + NAME_WIDTH + 4 + 4;

/// Size of a path record on disk.
pub const PATH_RECORD_SIZE: usize = 1 + 4 + 4 + 4;

/// The tombstone byte of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordFlags(u8);

impl RecordFlags {
    /// A live record.
    pub const LIVE: Self = Self(0);
    /// A deleted record whose slot may be reused.
    pub const TOMBSTONE: Self = Self(1);

    /// Creates flags from the raw byte.
    #[must_use]
    pub const fn from_byte(b: u8) -> Self {
        Self(b)
    }

    /// Returns the raw byte value.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self.0
    }

    /// Any non-zero byte reads as deleted.
    #[must_use]
    pub const fn is_tombstone(self) -> bool {
        self.0 != 0
    }
}

/// Truncates `name` to at most [`NAME_WIDTH`] bytes on a character boundary.
#[must_use]
pub fn fit_name(name: &str) -> &str {
    if name.len() <= NAME_WIDTH {
        return name;
    }
    let mut end = NAME_WIDTH;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

fn read_i32(bytes: &[u8], at: usize) -> i32 {
    i32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// A house slot as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseRecord {
    /// Tombstone flag.
    pub flags: RecordFlags,
    /// Display name, already trimmed.
    pub name: String,
    /// Horizontal position.
    pub x: i32,
    /// Vertical position.
    pub y: i32,
}

impl HouseRecord {
    /// Creates a live record.
    #[must_use]
    pub fn live(name: &str, x: i32, y: i32) -> Self {
        Self {
            flags: RecordFlags::LIVE,
            name: fit_name(name).to_string(),
            x,
            y,
        }
    }

    /// Returns whether the slot is deleted.
    #[must_use]
    pub fn is_tombstone(&self) -> bool {
        self.flags.is_tombstone()
    }

    /// Encodes the record to exactly [`HOUSE_RECORD_SIZE`] bytes.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HOUSE_RECORD_SIZE);
        buf.push(self.flags.as_byte());

        let name = fit_name(&self.name).as_bytes();
        buf.extend_from_slice(name);
        buf.resize(1 + NAME_WIDTH, b' ');

        buf.extend_from_slice(&self.x.to_be_bytes());
        buf.extend_from_slice(&self.y.to_be_bytes());
        buf
    }

    /// Decodes the record stored in `slot`.
    pub fn decode(slot: u32, data: &[u8]) -> CoreResult<Self> {
        if data.len() != HOUSE_RECORD_SIZE {
            return Err(CoreError::corrupt_record(
                "house",
                slot,
                format!("record is {} bytes, expected {HOUSE_RECORD_SIZE}", data.len()),
            ));
        }

        let name = String::from_utf8_lossy(&data[1..1 + NAME_WIDTH])
            .trim_end()
            .to_string();

        Ok(Self {
            flags: RecordFlags::from_byte(data[0]),
            name,
            x: read_i32(data, 1 + NAME_WIDTH),
            y: read_i32(data, 1 + NAME_WIDTH + 4),
        })
    }
}

/// A path slot as stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathRecord {
    /// Tombstone flag.
    pub flags: RecordFlags,
    /// Source house slot.
    pub start: u32,
    /// Destination house slot.
    pub end: u32,
    /// Travel cost.
    pub weight: i32,
}

impl PathRecord {
    /// Creates a live record.
    #[must_use]
    pub const fn live(start: u32, end: u32, weight: i32) -> Self {
        Self {
            flags: RecordFlags::LIVE,
            start,
            end,
            weight,
        }
    }

    /// Returns whether the slot is deleted.
    #[must_use]
    pub const fn is_tombstone(&self) -> bool {
        self.flags.is_tombstone()
    }

    /// Encodes the record to exactly [`PATH_RECORD_SIZE`] bytes.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(PATH_RECORD_SIZE);
        buf.push(self.flags.as_byte());
        buf.extend_from_slice(&self.start.to_be_bytes());
        buf.extend_from_slice(&self.end.to_be_bytes());
        buf.extend_from_slice(&self.weight.to_be_bytes());
        buf
    }

    /// Decodes the record stored in `slot`.
    pub fn decode(slot: u32, data: &[u8]) -> CoreResult<Self> {
        if data.len() != PATH_RECORD_SIZE {
            return Err(CoreError::corrupt_record(
                "path",
                slot,
                format!("record is {} bytes, expected {PATH_RECORD_SIZE}", data.len()),
            ));
        }

        Ok(Self {
            flags: RecordFlags::from_byte(data[0]),
            start: read_u32(data, 1),
            end: read_u32(data, 5),
            weight: read_i32(data, 9),
        })
    }
}
