use crate::node::{NodeId, NodeStore, ROOT};

/// Walks a single edge out of `from`, matching `pattern[pos..]` against
/// `text`.
///
/// Returns `None` if `from` is a non-root leaf (no outgoing edges exist to
/// walk at all). Returns `Some(from)` unchanged if `from` has no child for
/// `pattern[pos]`, including the case where `pos` has already run off the
/// end of `pattern`: there is no byte left to look up. Otherwise returns
/// the reached child, having advanced `pos` past every matching byte along
/// that child's incoming edge (stopping at the first mismatch, or at `end`,
/// or at the edge's own end, whichever comes first).
pub(crate) fn traverse_edge(
    store: &NodeStore,
    text: &[u8],
    from: NodeId,
    pattern: &[u8],
    pos: &mut usize,
    end: usize,
    end_of_text: usize,
) -> Option<NodeId> {
    let node = store.node(from);
    if node.is_leaf() && from != ROOT {
        return None;
    }

    let ch = match pattern.get(*pos) {
        Some(&b) => b,
        None => return Some(from),
    };

    let next = match node.children.get(&ch) {
        Some(&id) => id,
        None => return Some(from),
    };

    let next_begin = store.node(next).text_begin;
    let next_end = store.effective_end(next, end_of_text);
    let mut offset = 0usize;
    while next_begin + offset < next_end && *pos + offset < end && text[next_begin + offset] == pattern[*pos + offset] {
        offset += 1;
    }
    *pos += offset;
    Some(next)
}

/// Repeatedly applies [`traverse_edge`] from the root, following whole edges
/// as long as they are entirely consumed. Returns the locus: the deepest
/// node reached whose path label is a prefix of `pattern[..end]` (or the
/// node one edge short of a mismatch).
///
/// On return, `*pos >= end` iff the whole pattern matched.
pub(crate) fn traverse_tree(
    store: &NodeStore,
    text: &[u8],
    pattern: &[u8],
    pos: &mut usize,
    end: usize,
    end_of_text: usize,
) -> NodeId {
    let mut current_node = ROOT;
    let mut current_position = *pos;
    let mut next_node = ROOT;
    let mut have_next = true;

    loop {
        current_node = next_node;
        current_position = *pos;

        let step = traverse_edge(store, text, current_node, pattern, pos, end, end_of_text);
        have_next = step.is_some();
        next_node = step.unwrap_or(current_node);

        let keep_going = have_next
            && *pos < end
            && current_node != next_node
            && {
                let edge_len = store.effective_end(next_node, end_of_text) - store.node(next_node).text_begin;
                edge_len == *pos - current_position
            };
        if !keep_going {
            break;
        }
    }

    if have_next && *pos >= end {
        let edge_len = store.effective_end(next_node, end_of_text) - store.node(next_node).text_begin;
        if *pos - current_position <= edge_len {
            return next_node;
        }
    }
    current_node
}
