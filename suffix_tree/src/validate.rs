use std::collections::VecDeque;

use crate::error::SuffixTreeError;
use crate::node::{NodeId, NodeStore, ROOT};

/// Walks every internal node and confirms its suffix link points at the
/// right place: the link target's path label is the node's path label with
/// its first byte dropped (or, for a depth-1 child of the root, that the
/// link points back at the root itself).
///
/// Leaves are skipped: Ukkonen's construction never wires a leaf's suffix
/// link, so this check only applies to internal nodes.
pub(crate) fn check_suffix_links(
    store: &NodeStore,
    text: &[u8],
    end_of_text: usize,
) -> Result<(), SuffixTreeError> {
    let mut queue: VecDeque<NodeId> = VecDeque::new();
    queue.push_back(ROOT);

    while let Some(node) = queue.pop_front() {
        for &child in store.node(node).children.values() {
            queue.push_back(child);
        }

        if node == ROOT || store.node(node).is_leaf() {
            continue;
        }

        let edge_len = store.effective_end(node, end_of_text) - store.node(node).text_begin;
        let link = store.node(node).suffix_link.ok_or_else(|| {
            SuffixTreeError::structural(format!("internal node {} has no suffix link", node))
        })?;

        if link == ROOT {
            let parent_is_root = store.node(node).parent == Some(ROOT);
            if !(parent_is_root && edge_len == 1) {
                return Err(SuffixTreeError::structural(format!(
                    "node {} links to the root but is not a depth-1 child of it",
                    node
                )));
            }
            continue;
        }

        let node_label = path_label(store, text, end_of_text, node);
        let link_label = path_label(store, text, end_of_text, link);
        if link_label != node_label[1..] {
            return Err(SuffixTreeError::structural(format!(
                "suffix link from node {} to node {} does not drop exactly one byte",
                node, link
            )));
        }
    }

    Ok(())
}

fn path_label(store: &NodeStore, text: &[u8], end_of_text: usize, node: NodeId) -> Vec<u8> {
    let mut bytes = Vec::new();
    let mut current = node;
    while current != ROOT {
        let begin = store.node(current).text_begin;
        let end = store.effective_end(current, end_of_text);
        let mut edge: Vec<u8> = text[begin..end].to_vec();
        edge.extend(bytes);
        bytes = edge;
        current = store.node(current).parent.expect("non-root node always has a parent");
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;

    #[test]
    fn freshly_built_trees_satisfy_suffix_link_invariants() {
        for text in [&b"abcabx$"[..], b"banana$", b"aaaaaa$", b"mississippi$"] {
            let mut store = NodeStore::new();
            build(&mut store, text).unwrap();
            check_suffix_links(&store, text, text.len()).unwrap();
        }
    }

    #[test]
    fn detects_a_missing_suffix_link() {
        let text = b"abcabx$".to_vec();
        let mut store = NodeStore::new();
        build(&mut store, &text).unwrap();

        let broken = (0..store.len()).find(|&id| id != ROOT && !store.node(id).is_leaf());
        if let Some(id) = broken {
            store.node_mut(id).suffix_link = None;
            assert!(check_suffix_links(&store, &text, text.len()).is_err());
        }
    }
}
