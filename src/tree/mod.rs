//! Directory tree building and rendering
//!
//! `TreeWalker` builds the whole tree in memory (required for JSON output
//! and for the report snapshot); `render` turns a built tree into the
//! indented outline without touching the file system again.

mod node;
mod render;
mod walker;

pub use node::TreeNode;
pub use render::render_tree;
pub use walker::{TreeWalker, WalkError, WalkerConfig};
