//! FileSystem abstraction for testable file operations

mod mock;
mod real;
mod r#trait;

pub use mock::MockFileSystem;
pub(crate) use r#trait::is_skipped;
pub use r#trait::{FileSystem, FileType, SKIPPED_DIRS};
pub use real::RealFileSystem;
