use std::cmp::Ordering;

use crate::embedding::Embedding;
use crate::graph::Incidence;
use crate::order::dfs_code_cmp;
use crate::pattern::{EdgeCode, Pattern, PatternEdge};

// Extension map of the reconstruction, trimmed to the single DFS-smallest
// candidate. Offering a larger code is a no-op, an equal code contributes
// another embedding, a smaller code replaces the entry wholesale.
struct MinExtension<V, E> {
    entry: Option<(Pattern<V, E>, Vec<Embedding>)>,
}

impl<V: Copy + Ord, E: Copy + Ord> MinExtension<V, E> {
    fn new() -> Self {
        MinExtension { entry: None }
    }

    fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    fn offer(
        &mut self,
        parent: Option<&Pattern<V, E>>,
        code: EdgeCode<V, E>,
        embedding: impl FnOnce() -> Embedding,
    ) {
        let grow = |code| match parent {
            Some(parent) => parent.extend(code),
            None => Pattern::root(code),
        };
        match &mut self.entry {
            None => self.entry = Some((grow(code), vec![embedding()])),
            Some((pattern, embeddings)) => match dfs_code_cmp(&code, &pattern.code()) {
                Ordering::Less => {
                    *pattern = grow(code);
                    embeddings.clear();
                    embeddings.push(embedding());
                }
                Ordering::Equal => embeddings.push(embedding()),
                Ordering::Greater => {}
            },
        }
    }

    fn take(self) -> Option<(Pattern<V, E>, Vec<Embedding>)> {
        self.entry
    }
}

/// Checks whether the edge code sequence of `tested` is the
/// lexicographically smallest DFS code of its underlying graph.
///
/// The minimal code is rebuilt edge by edge with the tested pattern acting
/// as its own host graph, on freshly constructed chains and embeddings; at
/// each length the single DFS-smallest candidate must coincide with the
/// corresponding edge of the tested code.
pub fn is_minimal<V: Copy + Ord, E: Copy + Ord>(tested: &Pattern<V, E>) -> bool {
    let edge_count = tested.edge_count();
    let vertex_count = tested.vertex_count();
    let tested_codes = tested.codes();

    // every directed edge of the tested pattern is a 1-edge candidate
    let mut seed = MinExtension::new();
    for vertex in tested.vertices() {
        for out in tested.out_edges(vertex) {
            let code = EdgeCode {
                src: 0,
                dst: 1,
                src_label: tested.vertex_label(out.source),
                edge_label: tested.edge_label(out.edge),
                dst_label: tested.vertex_label(out.target),
            };
            seed.offer(None, code, || {
                Embedding::root(0, out.source, out.target, out.edge, vertex_count, edge_count)
            });
        }
    }

    let (mut pattern, mut embeddings) = match seed.take() {
        Some(entry) => entry,
        None => return true,
    };

    for n in 0..edge_count {
        if pattern.code() != tested_codes[n] {
            return false;
        }
        if n + 1 == edge_count {
            break;
        }

        let rmpath = pattern.rmpath_edges().collect::<Vec<_>>();

        let mut next = MinExtension::new();
        backward_extensions(&mut next, &rmpath, &pattern, &embeddings, tested);
        if next.is_empty() {
            forward_extensions(&mut next, &rmpath, &pattern, &embeddings, tested);
        }
        match next.take() {
            Some((next_pattern, next_embeddings)) => {
                pattern = next_pattern;
                embeddings = next_embeddings;
            }
            None => break,
        }
    }

    true
}

// Backward candidates close the cycle from the right-most vertex to a
// right-most-path vertex, nearest the root first; the first hit is the
// DFS-smallest backward extension.
fn backward_extensions<V: Copy + Ord, E: Copy + Ord>(
    next: &mut MinExtension<V, E>,
    rmpath: &[PatternEdge<V, E>],
    pattern: &Pattern<V, E>,
    embeddings: &[Embedding],
    tested: &Pattern<V, E>,
) {
    let rmost = rmpath[0].code.dst;
    let rmost_label = rmpath[0].code.dst_label;

    for rp in rmpath.iter().rev() {
        if !next.is_empty() {
            break;
        }
        let back = rp.code.src;
        let label_le = rp.code.dst_label <= rmost_label;

        for embedding in embeddings {
            let rmost_host = embedding.host_vertex(rmost);
            let back_host = embedding.host_vertex(back);
            let rp_label = tested.edge_label(embedding.host_edge(rp.index));

            for out in tested.out_edges(rmost_host) {
                if embedding.pattern_edge(out.edge).is_some() {
                    continue;
                }
                if out.target != back_host {
                    continue;
                }
                let label = tested.edge_label(out.edge);
                if (label_le && rp_label == label) || rp_label < label {
                    let code = EdgeCode {
                        src: rmost,
                        dst: back,
                        src_label: rmost_label,
                        edge_label: label,
                        dst_label: rp.code.src_label,
                    };
                    next.offer(Some(pattern), code, || {
                        embedding.extend(rmost, back, out.source, out.target, out.edge)
                    });
                    break;
                }
            }
        }
    }
}

// Forward candidates grow a new vertex, preferring the right-most vertex;
// only if it yields nothing are the other right-most-path vertices tried,
// nearest the right-most first.
fn forward_extensions<V: Copy + Ord, E: Copy + Ord>(
    next: &mut MinExtension<V, E>,
    rmpath: &[PatternEdge<V, E>],
    pattern: &Pattern<V, E>,
    embeddings: &[Embedding],
    tested: &Pattern<V, E>,
) {
    let rmost = rmpath[0].code.dst;
    let rmost_label = rmpath[0].code.dst_label;
    let min_label = rmpath[rmpath.len() - 1].code.src_label;

    for embedding in embeddings {
        let rmost_host = embedding.host_vertex(rmost);
        for out in tested.out_edges(rmost_host) {
            if embedding.pattern_vertex(out.target).is_some() {
                continue;
            }
            let target_label = tested.vertex_label(out.target);
            if target_label < min_label {
                continue;
            }
            let code = EdgeCode {
                src: rmost,
                dst: rmost + 1,
                src_label: rmost_label,
                edge_label: tested.edge_label(out.edge),
                dst_label: target_label,
            };
            next.offer(Some(pattern), code, || {
                embedding.extend(rmost, rmost + 1, out.source, out.target, out.edge)
            });
        }
    }

    for rp in rmpath {
        if !next.is_empty() {
            break;
        }
        for embedding in embeddings {
            let source_host = embedding.host_vertex(rp.code.src);
            for out in tested.out_edges(source_host) {
                if embedding.pattern_vertex(out.target).is_some() {
                    continue;
                }
                let target_label = tested.vertex_label(out.target);
                if target_label < min_label {
                    continue;
                }
                let label = tested.edge_label(out.edge);
                if (rp.code.dst_label <= target_label && rp.code.edge_label == label)
                    || rp.code.edge_label < label
                {
                    let code = EdgeCode {
                        src: rp.code.src,
                        dst: rmost + 1,
                        src_label: rp.code.src_label,
                        edge_label: label,
                        dst_label: target_label,
                    };
                    next.offer(Some(pattern), code, || {
                        embedding.extend(rp.code.src, rmost + 1, out.source, out.target, out.edge)
                    });
                }
            }
        }
    }
}
