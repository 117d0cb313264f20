/*!
## gSpan

A library for mining frequent subgraphs in labelled graphs.

Implements the gSpan algorithm by Xifeng Yan and Jiawei Han, ["gSpan:
Graph-Based Substructure Pattern Mining"](https://doi.org/10.1109/ICDM.2002.1184038),
published at ICDM 2002: every connected subgraph occurring at least
`min_support` times — inside one graph or across a collection — is reported
exactly once, together with its concrete occurrences.

### License

MIT
*/
pub mod embedding;
pub mod enumerate;
pub mod graph;
pub mod input;
pub mod mine;
pub mod minimal;
pub mod order;
pub mod output;
pub mod pattern;

use std::io;

pub use crate::embedding::{Embedding, EmbeddingSet, PatternEmbeddings};
pub use crate::graph::{Graph, GraphBuilder, Incidence, OutEdge};
pub use crate::input::{read_egf, read_tgf, Collection, LabelTable};
pub use crate::mine::{Miner, SupportMode};
pub use crate::output::{EmbeddingMode, PatternWriter};
pub use crate::pattern::{EdgeCode, Pattern};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("error while reading graph file")]
    Io {
        #[from]
        source: io::Error,
    },
    #[error("line {line}: malformed input: {reason}")]
    Malformed { line: usize, reason: &'static str },
    #[error("line {line}: edge references unknown vertex {vertex}")]
    DanglingVertex { line: usize, vertex: usize },
}

/// Mines one graph. The support of a pattern is the number of its distinct
/// occurrences, i.e. of its automorphism classes of embeddings.
///
/// `report` is invoked once per frequent minimal pattern, in DFS pre-order;
/// the pattern and its embeddings may be dropped as soon as it returns, so
/// reporters that need persistence must copy.
pub fn mine_single<G, V, E, VA, EA, R>(
    graph: &G,
    min_support: usize,
    report: R,
    vertex_label: VA,
    edge_label: EA,
) where
    G: Incidence,
    V: Copy + Ord,
    E: Copy + Ord,
    VA: Fn(&G, usize) -> V,
    EA: Fn(&G, usize) -> E,
    R: FnMut(&Pattern<V, E>, &PatternEmbeddings, usize),
{
    debug_assert!(graph.edge_count() > 0);
    Miner::new(
        std::slice::from_ref(graph),
        min_support,
        SupportMode::SingleGraph,
        vertex_label,
        edge_label,
        report,
    )
    .run()
}

/// Mines a collection of graphs. The support of a pattern is the number of
/// graphs containing it at least once.
pub fn mine_many<G, V, E, VA, EA, R>(
    graphs: &[G],
    min_support: usize,
    report: R,
    vertex_label: VA,
    edge_label: EA,
) where
    G: Incidence,
    V: Copy + Ord,
    E: Copy + Ord,
    VA: Fn(&G, usize) -> V,
    EA: Fn(&G, usize) -> E,
    R: FnMut(&Pattern<V, E>, &PatternEmbeddings, usize),
{
    Miner::new(
        graphs,
        min_support,
        SupportMode::ManyGraphs,
        vertex_label,
        edge_label,
        report,
    )
    .run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use trim_margin::MarginTrimmable;

    fn collection(egf: &str) -> Collection {
        read_egf(egf.trim_margin().unwrap().as_bytes()).unwrap()
    }

    fn vl(graph: &Graph, vertex: usize) -> usize {
        graph.vertex_label(vertex)
    }

    fn el(graph: &Graph, edge: usize) -> usize {
        graph.edge_label(edge)
    }

    #[test]
    fn mine_many_counts_graphs() {
        let collection = collection(
            "
            |t 0
            |v 0 A
            |v 1 B
            |e 0 0 1 _
            |t 1
            |v 0 A
            |v 1 B
            |e 0 0 1 _
            |",
        );

        let mut reported = Vec::new();
        mine_many(
            &collection.graphs,
            2,
            |pattern: &Pattern<usize, usize>, _, support| {
                reported.push((pattern.codes(), support))
            },
            vl,
            el,
        );

        assert_eq!(reported.len(), 1);
        let (codes, support) = &reported[0];
        assert_eq!(support, &2);
        assert_eq!(
            codes,
            &vec![EdgeCode {
                src: 0,
                dst: 1,
                src_label: 0,
                edge_label: 0,
                dst_label: 1
            }]
        );
    }

    // Every reported embedding must map pattern edges injectively onto host
    // edges with matching labels and endpoints.
    #[test]
    fn embeddings_are_faithful() {
        let collection = collection(
            "
            |t 0
            |v 0 X
            |v 1 X
            |v 2 X
            |v 3 Y
            |e 0 0 1 a
            |e 1 1 2 a
            |e 2 2 0 a
            |e 3 2 3 b
            |",
        );
        let graph = &collection.graphs[0];

        let mut patterns = 0;
        mine_single(
            graph,
            1,
            |pattern: &Pattern<usize, usize>, embeddings, support| {
                patterns += 1;
                assert!(support >= 1);
                assert!(minimal::is_minimal(pattern));

                for set in embeddings.values() {
                    for embedding in set.all() {
                        let mut seen = vec![false; graph.edge_count()];
                        for edge in pattern.edges() {
                            let host_edge = embedding.host_edge(edge.index);
                            assert!(!seen[host_edge], "pattern edges must map injectively");
                            seen[host_edge] = true;

                            let host_src = embedding.host_vertex(edge.code.src);
                            let host_dst = embedding.host_vertex(edge.code.dst);
                            let (u, v) = graph.endpoints(host_edge);
                            assert!(
                                (host_src, host_dst) == (u, v) || (host_src, host_dst) == (v, u)
                            );
                            assert_eq!(graph.vertex_label(host_src), edge.code.src_label);
                            assert_eq!(graph.vertex_label(host_dst), edge.code.dst_label);
                            assert_eq!(graph.edge_label(host_edge), edge.code.edge_label);
                        }
                    }
                }
            },
            vl,
            el,
        );

        // triangle, pendant edge, their union and all smaller pieces
        assert!(patterns > 3);
    }
}
