//! Outline rendering for built trees
//!
//! Rendering is a pure function of the tree: it performs no I/O, so the
//! same tree (or a serde round-tripped copy of it) always renders to the
//! same lines.

use super::node::TreeNode;

/// Render a tree into indented outline lines.
///
/// Directories get a trailing `/`, truncated directories render as
/// `name/ ...`, unreadable ones as `name/ [unreadable]`. The root node is
/// itself the first line.
pub fn render_tree(root: &TreeNode) -> Vec<String> {
    let mut lines = Vec::new();
    render_node(root, "", true, &mut lines);
    lines
}

fn render_node(node: &TreeNode, indent: &str, is_last: bool, out: &mut Vec<String>) {
    let prefix = if is_last { "└── " } else { "├── " };

    match node {
        TreeNode::File { name } => out.push(format!("{indent}{prefix}{name}")),
        TreeNode::Truncated { name } => out.push(format!("{indent}{prefix}{name}/ ...")),
        TreeNode::Unreadable { name } => {
            out.push(format!("{indent}{prefix}{name}/ [unreadable]"))
        }
        TreeNode::Dir { name, children } => {
            out.push(format!("{indent}{prefix}{name}/"));
            let child_indent = format!("{indent}{}", if is_last { "    " } else { "│   " });
            for (i, child) in children.iter().enumerate() {
                render_node(child, &child_indent, i + 1 == children.len(), out);
            }
        }
    }
}
