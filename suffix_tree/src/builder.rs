use crate::error::SuffixTreeError;
use crate::node::{NodeId, NodeStore, ROOT};

/// Builds a suffix tree for the whole of `text` into `store` (which must be
/// freshly allocated, i.e. contain only the root) using Ukkonen's online
/// construction.
///
/// `text` is expected to already carry its trailing end marker; the caller
/// is responsible for rejecting marker bytes that occur earlier in the
/// input.
pub(crate) fn build(store: &mut NodeStore, text: &[u8]) -> Result<(), SuffixTreeError> {
    let mut active_node: NodeId = ROOT;
    let mut active_edge: Option<u8> = None;
    let mut active_length: usize = 0;
    let mut remaining: usize = 0;

    for i in 0..text.len() {
        remaining += 1;
        let mut need_suffix_link: Option<NodeId> = None;

        while remaining > 0 {
            if active_length == 0 {
                active_edge = Some(text[i]);
            }
            let edge_byte = active_edge.expect("active_length == 0 sets active_edge above");

            let existing = store.node(active_node).children.get(&edge_byte).copied();
            match existing {
                None => {
                    let suffix_start = i + 1 - remaining;
                    let leaf = store.new_leaf(active_node, i, suffix_start);
                    store.attach(active_node, edge_byte, leaf)?;
                    link(store, &mut need_suffix_link, active_node);
                }
                Some(next) => {
                    let edge_len = store.effective_end(next, text.len()) - store.node(next).text_begin;
                    if active_length >= edge_len {
                        active_node = next;
                        active_length -= edge_len;
                        active_edge = Some(text[i - active_length]);
                        continue;
                    }

                    let next_byte_on_edge = text[store.node(next).text_begin + active_length];
                    if next_byte_on_edge == text[i] {
                        active_length += 1;
                        link(store, &mut need_suffix_link, active_node);
                        break;
                    }

                    let split_begin = store.node(next).text_begin;
                    let split_end = split_begin + active_length;
                    let split = store.new_internal(active_node, split_begin, split_end);
                    store.replace_child(active_node, edge_byte, split);

                    store.node_mut(next).parent = Some(split);
                    store.node_mut(next).text_begin = split_end;
                    store.attach(split, next_byte_on_edge, next)?;

                    let suffix_start = i + 1 - remaining;
                    let leaf = store.new_leaf(split, i, suffix_start);
                    store.attach(split, text[i], leaf)?;

                    link(store, &mut need_suffix_link, split);
                    need_suffix_link = Some(split);
                }
            }

            remaining -= 1;

            if active_node == ROOT && active_length > 0 {
                active_length -= 1;
                active_edge = Some(text[i + 1 - remaining]);
            } else if active_node != ROOT {
                active_node = store.node(active_node).suffix_link.unwrap_or(ROOT);
            }
        }
    }

    store.finalize_ends(text.len());
    Ok(())
}

/// Wires `suffix_link` of the previously created internal node (if any) to
/// `target` as soon as its sibling extension completes. The
/// root never receives or needs a real suffix link.
fn link(store: &mut NodeStore, need_suffix_link: &mut Option<NodeId>, target: NodeId) {
    if let Some(pending) = need_suffix_link.take() {
        if pending != ROOT {
            store.node_mut(pending).suffix_link = Some(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves_under(store: &NodeStore, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            let children = &store.node(n).children;
            if children.is_empty() {
                out.push(n);
            } else {
                stack.extend(children.values().copied());
            }
        }
        out
    }

    #[test]
    fn builds_one_leaf_per_suffix() {
        let text = b"abcabx$".to_vec();
        let mut store = NodeStore::new();
        build(&mut store, &text).unwrap();
        assert_eq!(leaves_under(&store, ROOT).len(), text.len());
    }

    #[test]
    fn every_suffix_start_is_present_exactly_once() {
        let text = b"banana$".to_vec();
        let mut store = NodeStore::new();
        build(&mut store, &text).unwrap();
        let mut starts: Vec<usize> = leaves_under(&store, ROOT)
            .into_iter()
            .map(|id| store.node(id).suffix_start.unwrap())
            .collect();
        starts.sort_unstable();
        assert_eq!(starts, (0..text.len()).collect::<Vec<_>>());
    }

    #[test]
    fn single_character_text_has_one_leaf() {
        let text = b"$".to_vec();
        let mut store = NodeStore::new();
        build(&mut store, &text).unwrap();
        assert_eq!(leaves_under(&store, ROOT).len(), 1);
    }

    #[test]
    fn repeated_character_text_builds_without_error() {
        let text = b"aaaaaa$".to_vec();
        let mut store = NodeStore::new();
        build(&mut store, &text).unwrap();
        assert_eq!(leaves_under(&store, ROOT).len(), text.len());
    }
}
