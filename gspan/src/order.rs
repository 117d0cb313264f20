use std::cmp::Ordering;

use crate::pattern::{EdgeCode, Pattern};

/// DFS order over edge codes, used to rank candidate right extensions of a
/// common parent pattern and to pick canonical representatives.
///
/// Backward extensions come before forward ones; backward edges rank by
/// closer target, then smaller edge label; forward edges rank by deeper
/// source, then smaller source label, edge label and target label.
pub fn dfs_code_cmp<V: Ord, E: Ord>(a: &EdgeCode<V, E>, b: &EdgeCode<V, E>) -> Ordering {
    match (a.is_forward(), b.is_forward()) {
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (false, false) => a
            .dst
            .cmp(&b.dst)
            .then_with(|| a.edge_label.cmp(&b.edge_label)),
        (true, true) => b
            .src
            .cmp(&a.src)
            .then_with(|| a.src_label.cmp(&b.src_label))
            .then_with(|| a.edge_label.cmp(&b.edge_label))
            .then_with(|| a.dst_label.cmp(&b.dst_label)),
    }
}

/// Plain lexicographic order over the `(src, dst, src label, edge label,
/// dst label)` tuple. Not used for canonical comparison; it serves as a key
/// for auxiliary indexes over codes that do not share a parent.
pub fn lex_code_cmp<V: Ord, E: Ord>(a: &EdgeCode<V, E>, b: &EdgeCode<V, E>) -> Ordering {
    a.src
        .cmp(&b.src)
        .then_with(|| a.dst.cmp(&b.dst))
        .then_with(|| a.src_label.cmp(&b.src_label))
        .then_with(|| a.edge_label.cmp(&b.edge_label))
        .then_with(|| a.dst_label.cmp(&b.dst_label))
}

/// DFS order over patterns sharing a common prefix; only the newest edge
/// code is distinctive under extension enumeration, so only it is compared.
pub fn dfs_cmp<V: Copy + Ord, E: Copy + Ord>(a: &Pattern<V, E>, b: &Pattern<V, E>) -> Ordering {
    dfs_code_cmp(&a.code(), &b.code())
}

/// Lexicographic order over patterns, comparing the newest edge code.
pub fn lex_cmp<V: Copy + Ord, E: Copy + Ord>(a: &Pattern<V, E>, b: &Pattern<V, E>) -> Ordering {
    lex_code_cmp(&a.code(), &b.code())
}

/// Key wrapper ordering patterns by [`dfs_cmp`], for use in the extension
/// maps.
pub struct ByDfs<V, E>(pub Pattern<V, E>);

impl<V: Copy + Ord, E: Copy + Ord> PartialEq for ByDfs<V, E> {
    fn eq(&self, other: &Self) -> bool {
        dfs_cmp(&self.0, &other.0) == Ordering::Equal
    }
}

impl<V: Copy + Ord, E: Copy + Ord> Eq for ByDfs<V, E> {}

impl<V: Copy + Ord, E: Copy + Ord> PartialOrd for ByDfs<V, E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V: Copy + Ord, E: Copy + Ord> Ord for ByDfs<V, E> {
    fn cmp(&self, other: &Self) -> Ordering {
        dfs_cmp(&self.0, &other.0)
    }
}
