pub mod names;

pub use names::{NameDb, NameDbError, NameSource};
