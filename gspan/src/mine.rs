use std::fmt::Display;

use log::{debug, trace};

use crate::embedding::PatternEmbeddings;
use crate::enumerate::{enumerate, enumerate_one_edges, Extensions};
use crate::graph::Incidence;
use crate::minimal::is_minimal;
use crate::pattern::Pattern;

/// How the support of a pattern is computed from its embeddings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportMode {
    /// Mining a single graph: support is the number of automorphism
    /// classes, i.e. of distinct occurrences.
    SingleGraph,
    /// Mining a collection: support is the number of graphs containing the
    /// pattern at least once.
    ManyGraphs,
}

impl SupportMode {
    pub fn support(&self, embeddings: &PatternEmbeddings) -> usize {
        match self {
            SupportMode::SingleGraph => embeddings
                .values()
                .next()
                .map_or(0, |set| set.group_count()),
            SupportMode::ManyGraphs => embeddings.len(),
        }
    }
}

impl Display for SupportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The mining recursion: grows patterns one edge at a time along the
/// right-most path, prunes infrequent branches, discards non-minimal codes
/// and reports the rest in DFS pre-order.
pub struct Miner<'a, G, VA, EA, R> {
    graphs: &'a [G],
    min_support: usize,
    mode: SupportMode,
    vertex_label: VA,
    edge_label: EA,
    report: R,
    calls: usize,
}

impl<'a, G, V, E, VA, EA, R> Miner<'a, G, VA, EA, R>
where
    G: Incidence,
    V: Copy + Ord,
    E: Copy + Ord,
    VA: Fn(&G, usize) -> V,
    EA: Fn(&G, usize) -> E,
    R: FnMut(&Pattern<V, E>, &PatternEmbeddings, usize),
{
    pub fn new(
        graphs: &'a [G],
        min_support: usize,
        mode: SupportMode,
        vertex_label: VA,
        edge_label: EA,
        report: R,
    ) -> Self {
        Miner {
            graphs,
            min_support,
            mode,
            vertex_label,
            edge_label,
            report,
            calls: 0,
        }
    }

    pub fn run(mut self) {
        let mut extensions = Extensions::new();
        for (graph_id, graph) in self.graphs.iter().enumerate() {
            enumerate_one_edges(
                &mut extensions,
                graph,
                graph_id,
                &self.vertex_label,
                &self.edge_label,
            );
        }
        self.mine(extensions);
        debug!("subgraph mining calls: {}", self.calls);
    }

    fn mine(&mut self, extensions: Extensions<V, E>) {
        for (key, embeddings) in &extensions {
            let support = self.mode.support(embeddings);
            if support >= self.min_support {
                self.subgraph_mining(&key.0, embeddings, support);
            }
        }
    }

    fn subgraph_mining(
        &mut self,
        pattern: &Pattern<V, E>,
        embeddings: &PatternEmbeddings,
        support: usize,
    ) {
        self.calls += 1;

        if !is_minimal(pattern) {
            return;
        }

        trace!(
            "report pattern with {} edges, support {}",
            pattern.edge_count(),
            support
        );
        (self.report)(pattern, embeddings, support);

        let mut extensions = Extensions::new();
        for (&graph_id, set) in embeddings {
            enumerate(
                &mut extensions,
                pattern,
                &self.graphs[graph_id],
                graph_id,
                set,
                &self.vertex_label,
                &self.edge_label,
            );
        }
        self.mine(extensions);
    }
}
