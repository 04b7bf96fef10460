//! In-memory virtual filesystem.
//!
//! The tree is a strict ownership hierarchy: every directory owns its
//! children in insertion order, and parents are found again by path rather
//! than through back references. It can be populated from a real directory
//! and mirrored back to disk.

mod node;
pub mod path;
mod tree;

pub use node::VfsNode;
pub use tree::{Vfs, VfsError};
