pub mod format;
pub mod xss;

pub use format::{location, serialize, serialize_all};
