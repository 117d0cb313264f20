use std::collections::BTreeMap;

use crate::embedding::{Embedding, EmbeddingSet, PatternEmbeddings};
use crate::graph::Incidence;
use crate::order::ByDfs;
use crate::pattern::{EdgeCode, Pattern, PatternEdge};

/// Candidate extensions grouped by their induced pattern, ranked in DFS
/// order. Each frame of the mining recursion owns one such map; dropping it
/// drops the patterns and embeddings created for that frame.
pub type Extensions<V, E> = BTreeMap<ByDfs<V, E>, PatternEmbeddings>;

fn insert<V: Copy + Ord, E: Copy + Ord>(
    extensions: &mut Extensions<V, E>,
    pattern: Pattern<V, E>,
    graph_id: usize,
    embedding: Embedding,
) {
    extensions
        .entry(ByDfs(pattern))
        .or_default()
        .entry(graph_id)
        .or_default()
        .insert(embedding);
}

/// Seeds the extension map with every single-edge pattern of `graph`.
///
/// Each undirected edge is taken in canonical orientation, with the smaller
/// endpoint label at vertex 0. Equal endpoint labels admit both
/// orientations; their embeddings land under the same key and fold into one
/// automorphism class.
pub fn enumerate_one_edges<G, V, E>(
    extensions: &mut Extensions<V, E>,
    graph: &G,
    graph_id: usize,
    vertex_label: &impl Fn(&G, usize) -> V,
    edge_label: &impl Fn(&G, usize) -> E,
) where
    G: Incidence,
    V: Copy + Ord,
    E: Copy + Ord,
{
    for vertex in 0..graph.vertex_count() {
        let src_label = vertex_label(graph, vertex);
        for out in graph.out_edges(vertex) {
            let dst_label = vertex_label(graph, out.target);
            if dst_label < src_label {
                continue;
            }
            let code = EdgeCode {
                src: 0,
                dst: 1,
                src_label,
                edge_label: edge_label(graph, out.edge),
                dst_label,
            };
            let embedding = Embedding::root(
                graph_id,
                out.source,
                out.target,
                out.edge,
                graph.vertex_count(),
                graph.edge_count(),
            );
            insert(extensions, Pattern::root(code), graph_id, embedding);
        }
    }
}

/// Enumerates the right extensions of `pattern` over all its embeddings in
/// one input graph.
///
/// Grown edges either run backward from the right-most vertex to a vertex
/// on the right-most path, or forward from a right-most-path vertex to a
/// vertex not yet part of the embedding. The label comparisons against the
/// right-most-path edges prune extensions that cannot yield a DFS code
/// smaller than or equal to the canonical one; surviving non-minimal codes
/// are caught later by the minimality check.
pub fn enumerate<G, V, E>(
    extensions: &mut Extensions<V, E>,
    pattern: &Pattern<V, E>,
    graph: &G,
    graph_id: usize,
    embeddings: &EmbeddingSet,
    vertex_label: &impl Fn(&G, usize) -> V,
    edge_label: &impl Fn(&G, usize) -> E,
) where
    G: Incidence,
    V: Copy + Ord,
    E: Copy + Ord,
{
    let rmpath = pattern.rmpath_edges().collect::<Vec<_>>();
    let rmost = pattern.rmost_vertex();

    // the smallest-label seed, vertex 0
    let min_label = rmpath[rmpath.len() - 1].code.src_label;

    // right-most-path edge by its source vertex
    let mut rmpath_source_edge: Vec<Option<PatternEdge<V, E>>> =
        vec![None; pattern.vertex_count()];
    for edge in &rmpath {
        rmpath_source_edge[edge.code.src] = Some(*edge);
    }

    for embedding in embeddings.all() {
        let rmost_host = embedding.host_vertex(rmost);
        let rmost_label = vertex_label(graph, rmost_host);

        for out in graph.out_edges(rmost_host) {
            if embedding.pattern_edge(out.edge).is_some() {
                continue;
            }
            match embedding.pattern_vertex(out.target) {
                None => {
                    // forward from the right-most vertex
                    let target_label = vertex_label(graph, out.target);
                    if target_label < min_label {
                        continue;
                    }
                    let code = EdgeCode {
                        src: rmost,
                        dst: rmost + 1,
                        src_label: rmost_label,
                        edge_label: edge_label(graph, out.edge),
                        dst_label: target_label,
                    };
                    insert(
                        extensions,
                        pattern.extend(code),
                        graph_id,
                        embedding.extend(rmost, rmost + 1, out.source, out.target, out.edge),
                    );
                }
                Some(back) => {
                    // backward onto the right-most path
                    let rp = match rmpath_source_edge[back] {
                        Some(rp) => rp,
                        None => continue,
                    };
                    let rp_label = edge_label(graph, embedding.host_edge(rp.index));
                    let rp_target_label =
                        vertex_label(graph, embedding.host_vertex(rp.code.dst));
                    let label = edge_label(graph, out.edge);
                    if label > rp_label || (label == rp_label && rmost_label >= rp_target_label)
                    {
                        let code = EdgeCode {
                            src: rmost,
                            dst: back,
                            src_label: rmost_label,
                            edge_label: label,
                            dst_label: vertex_label(graph, out.target),
                        };
                        insert(
                            extensions,
                            pattern.extend(code),
                            graph_id,
                            embedding.extend(rmost, back, out.source, out.target, out.edge),
                        );
                    }
                }
            }
        }

        // forward from the remaining right-most-path vertices
        for rp in &rmpath {
            let source = rp.code.src;
            let source_host = embedding.host_vertex(source);
            let rp_label = edge_label(graph, embedding.host_edge(rp.index));
            let rp_target_label = vertex_label(graph, embedding.host_vertex(rp.code.dst));

            for out in graph.out_edges(source_host) {
                if embedding.pattern_edge(out.edge).is_some()
                    || embedding.pattern_vertex(out.target).is_some()
                {
                    continue;
                }
                let target_label = vertex_label(graph, out.target);
                if target_label < min_label {
                    continue;
                }
                let label = edge_label(graph, out.edge);
                if rp_label < label || (rp_label == label && rp_target_label <= target_label) {
                    let code = EdgeCode {
                        src: source,
                        dst: rmost + 1,
                        src_label: vertex_label(graph, source_host),
                        edge_label: label,
                        dst_label: target_label,
                    };
                    insert(
                        extensions,
                        pattern.extend(code),
                        graph_id,
                        embedding.extend(source, rmost + 1, out.source, out.target, out.edge),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph, GraphBuilder};

    fn vl(graph: &Graph, vertex: usize) -> usize {
        graph.vertex_label(vertex)
    }

    fn el(graph: &Graph, edge: usize) -> usize {
        graph.edge_label(edge)
    }

    fn path_abc() -> Graph {
        // A(0) - B(1) - C(2), edge label 9
        let mut builder = GraphBuilder::new(0);
        let a = builder.add_vertex(0);
        let b = builder.add_vertex(1);
        let c = builder.add_vertex(2);
        builder.add_edge(a, b, 9);
        builder.add_edge(b, c, 9);
        builder.build()
    }

    fn triangle() -> Graph {
        let mut builder = GraphBuilder::new(0);
        let a = builder.add_vertex(5);
        let b = builder.add_vertex(5);
        let c = builder.add_vertex(5);
        builder.add_edge(a, b, 1);
        builder.add_edge(b, c, 1);
        builder.add_edge(c, a, 1);
        builder.build()
    }

    #[test]
    fn one_edges_are_canonically_oriented() {
        let graph = path_abc();
        let mut extensions = Extensions::new();
        enumerate_one_edges(&mut extensions, &graph, 0, &vl, &el);

        let codes = extensions
            .keys()
            .map(|ByDfs(p)| p.code())
            .collect::<Vec<_>>();
        assert_eq!(codes.len(), 2);
        assert!(codes.contains(&EdgeCode {
            src: 0,
            dst: 1,
            src_label: 0,
            edge_label: 9,
            dst_label: 1
        }));
        assert!(codes.contains(&EdgeCode {
            src: 0,
            dst: 1,
            src_label: 1,
            edge_label: 9,
            dst_label: 2
        }));

        for embeddings in extensions.values() {
            assert_eq!(embeddings[&0].len(), 1);
        }
    }

    #[test]
    fn equal_labels_fold_into_one_seed() {
        let graph = triangle();
        let mut extensions = Extensions::new();
        enumerate_one_edges(&mut extensions, &graph, 0, &vl, &el);

        assert_eq!(extensions.len(), 1);
        let embeddings = &extensions.values().next().unwrap()[&0];
        // both orientations of all three edges
        assert_eq!(embeddings.len(), 6);
        assert_eq!(embeddings.group_count(), 3);
    }

    #[test]
    fn triangle_seed_extends_to_both_forward_shapes() {
        let graph = triangle();
        let mut seeds = Extensions::new();
        enumerate_one_edges(&mut seeds, &graph, 0, &vl, &el);

        let (ByDfs(pattern), embeddings) = seeds.iter().next().unwrap();

        let mut extensions = Extensions::new();
        enumerate(
            &mut extensions,
            pattern,
            &graph,
            0,
            &embeddings[&0],
            &vl,
            &el,
        );

        let codes = extensions
            .keys()
            .map(|ByDfs(p)| p.code())
            .collect::<Vec<_>>();
        // the deep extension ranks before the shallow one
        assert_eq!(
            codes,
            vec![
                EdgeCode {
                    src: 1,
                    dst: 2,
                    src_label: 5,
                    edge_label: 1,
                    dst_label: 5
                },
                EdgeCode {
                    src: 0,
                    dst: 2,
                    src_label: 5,
                    edge_label: 1,
                    dst_label: 5
                },
            ]
        );
    }

    #[test]
    fn path_closes_with_backward_extension() {
        let graph = triangle();
        let mut seeds = Extensions::new();
        enumerate_one_edges(&mut seeds, &graph, 0, &vl, &el);
        let (ByDfs(seed), seed_embeddings) = seeds.iter().next().unwrap();

        let mut paths = Extensions::new();
        enumerate(&mut paths, seed, &graph, 0, &seed_embeddings[&0], &vl, &el);

        // grow the canonical two-edge path and close the triangle
        let (ByDfs(path), path_embeddings) = paths.iter().next().unwrap();
        let mut closed = Extensions::new();
        enumerate(&mut closed, path, &graph, 0, &path_embeddings[&0], &vl, &el);

        assert_eq!(closed.len(), 1);
        let (ByDfs(triangle), triangle_embeddings) = closed.iter().next().unwrap();
        assert_eq!(
            triangle.code(),
            EdgeCode {
                src: 2,
                dst: 0,
                src_label: 5,
                edge_label: 1,
                dst_label: 5
            }
        );
        // all six embeddings cover the same three host edges
        assert_eq!(triangle_embeddings[&0].len(), 6);
        assert_eq!(triangle_embeddings[&0].group_count(), 1);
    }
}
