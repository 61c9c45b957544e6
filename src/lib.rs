pub mod filesystem;
pub mod scenario;

pub use filesystem::{ErrorCode, FileSystemError, MemoryFs, Stat};
