//! Tree node representation for directory structures

use serde::{Deserialize, Serialize};

/// One node in the built directory tree.
///
/// The truncation and unreadable markers are dedicated variants so they can
/// never collide with a real file or directory name. Exclusion has no
/// variant at all: an excluded path is dropped by the walker before a node
/// is ever constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    File {
        name: String,
    },
    Dir {
        name: String,
        children: Vec<TreeNode>,
    },
    /// Depth limit reached: deeper content exists but was not traversed.
    Truncated {
        name: String,
    },
    /// Listing this directory's contents failed.
    Unreadable {
        name: String,
    },
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::File { name }
            | TreeNode::Dir { name, .. }
            | TreeNode::Truncated { name }
            | TreeNode::Unreadable { name } => name,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, TreeNode::Dir { .. })
    }

    /// Names of every file leaf in the subtree, in traversal order.
    pub fn file_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_file_names(&mut names);
        names
    }

    fn collect_file_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            TreeNode::File { name } => out.push(name),
            TreeNode::Dir { children, .. } => {
                for child in children {
                    child.collect_file_names(out);
                }
            }
            TreeNode::Truncated { .. } | TreeNode::Unreadable { .. } => {}
        }
    }
}
