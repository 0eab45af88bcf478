//! Houses and the paths between them.

mod house;
mod path;

pub use house::House;
pub use path::Path;
