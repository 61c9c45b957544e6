//! In-memory filesystem tree.
//!
//! Nodes live in an arena owned by [`Tree`]; directories keep their children
//! in insertion order and every node remembers its parent through a
//! non-owning [`NodeId`]. [`MemoryFs`] exposes the path-addressed operations.

mod error;
mod memory_fs;
mod node;
pub mod path;
mod stat;
mod tree;

pub use error::{ErrorCode, FileSystemError};
pub use memory_fs::MemoryFs;
pub use node::{Directory, File, Node, NodeId, NodeKind};
pub use stat::Stat;
pub use tree::Tree;
