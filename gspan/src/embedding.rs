use std::collections::BTreeMap;

/// One occurrence of a pattern inside a host graph.
///
/// Keeps all four direction maps between pattern and host, indexed by the
/// dense ids on either side. The maps are copied whole on every extension,
/// which makes each embedding self-contained and every lookup O(1); the
/// price is O(|V(G)| + |E(G)|) memory per embedding.
#[derive(Debug, Clone)]
pub struct Embedding {
    graph: usize,
    /// pattern vertex -> host vertex
    host_vertices: Vec<usize>,
    /// pattern edge -> host edge
    host_edges: Vec<usize>,
    /// host vertex -> pattern vertex
    pattern_vertices: Vec<Option<usize>>,
    /// host edge -> pattern edge
    pattern_edges: Vec<Option<usize>>,
}

impl Embedding {
    /// Maps a single-edge pattern onto the host edge `host_edge`, oriented
    /// `host_src -> host_dst`. `graph` identifies the host within the mined
    /// collection.
    pub fn root(
        graph: usize,
        host_src: usize,
        host_dst: usize,
        host_edge: usize,
        host_vertex_count: usize,
        host_edge_count: usize,
    ) -> Self {
        let mut pattern_vertices = vec![None; host_vertex_count];
        pattern_vertices[host_src] = Some(0);
        pattern_vertices[host_dst] = Some(1);

        let mut pattern_edges = vec![None; host_edge_count];
        pattern_edges[host_edge] = Some(0);

        Embedding {
            graph,
            host_vertices: vec![host_src, host_dst],
            host_edges: vec![host_edge],
            pattern_vertices,
            pattern_edges,
        }
    }

    /// Extends this embedding by the pattern edge `(src, dst)` realised by
    /// the host edge `host_edge`, oriented `host_src -> host_dst`. A forward
    /// extension (`dst` not mapped yet) registers the new vertex.
    pub fn extend(
        &self,
        src: usize,
        dst: usize,
        host_src: usize,
        host_dst: usize,
        host_edge: usize,
    ) -> Self {
        debug_assert_eq!(self.host_vertices[src], host_src);
        debug_assert!(dst <= self.host_vertices.len());
        debug_assert!(self.pattern_edges[host_edge].is_none());

        let mut next = self.clone();

        if dst == next.host_vertices.len() {
            next.host_vertices.push(host_dst);
        }
        next.host_edges.push(host_edge);
        next.pattern_vertices[host_src] = Some(src);
        next.pattern_vertices[host_dst] = Some(dst);
        next.pattern_edges[host_edge] = Some(next.host_edges.len() - 1);

        next
    }

    pub fn graph(&self) -> usize {
        self.graph
    }

    pub fn vertex_count(&self) -> usize {
        self.host_vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.host_edges.len()
    }

    pub fn host_vertex(&self, pattern_vertex: usize) -> usize {
        self.host_vertices[pattern_vertex]
    }

    pub fn host_edge(&self, pattern_edge: usize) -> usize {
        self.host_edges[pattern_edge]
    }

    pub fn pattern_vertex(&self, host_vertex: usize) -> Option<usize> {
        self.pattern_vertices[host_vertex]
    }

    pub fn pattern_edge(&self, host_edge: usize) -> Option<usize> {
        self.pattern_edges[host_edge]
    }

    /// Two embeddings are automorphic iff they live in the same host graph
    /// and cover the same set of host edges. No endpoint comparison is
    /// needed: equal edge sets realise the same subgraph.
    pub fn is_automorphic(&self, other: &Embedding) -> bool {
        if self.graph != other.graph {
            return false;
        }
        debug_assert_eq!(self.pattern_edges.len(), other.pattern_edges.len());
        self.pattern_edges
            .iter()
            .zip(other.pattern_edges.iter())
            .all(|(a, b)| a.is_some() == b.is_some())
    }
}

/// Every embedding of one pattern in one host graph, partitioned into
/// automorphism classes.
///
/// Groups hold indices into the owning `all` vector and appear in the order
/// in which their first representative was discovered.
#[derive(Debug, Default)]
pub struct EmbeddingSet {
    all: Vec<Embedding>,
    groups: Vec<Vec<usize>>,
}

impl EmbeddingSet {
    pub fn insert(&mut self, embedding: Embedding) {
        let index = self.all.len();
        let all = &self.all;
        let group = self
            .groups
            .iter_mut()
            .find(|group| all[group[0]].is_automorphic(&embedding));
        match group {
            Some(group) => group.push(index),
            None => self.groups.push(vec![index]),
        }
        self.all.push(embedding);
    }

    pub fn all(&self) -> &[Embedding] {
        &self.all
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// The number of automorphism classes, i.e. the number of distinct
    /// occurrences of the pattern in the host graph.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// The first discovered embedding of each automorphism class.
    pub fn representatives(&self) -> impl Iterator<Item = &Embedding> {
        self.groups.iter().map(move |group| &self.all[group[0]])
    }

    pub fn groups(&self) -> impl Iterator<Item = impl Iterator<Item = &Embedding>> {
        self.groups
            .iter()
            .map(move |group| group.iter().map(move |&index| &self.all[index]))
    }
}

/// Per-pattern store: for each input graph (by collection index) the set of
/// embeddings found there. Ordered so that reports are deterministic.
pub type PatternEmbeddings = BTreeMap<usize, EmbeddingSet>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_maps_both_directions() {
        let embedding = Embedding::root(0, 3, 1, 2, 5, 4);

        assert_eq!(embedding.graph(), 0);
        assert_eq!(embedding.vertex_count(), 2);
        assert_eq!(embedding.edge_count(), 1);
        assert_eq!(embedding.host_vertex(0), 3);
        assert_eq!(embedding.host_vertex(1), 1);
        assert_eq!(embedding.host_edge(0), 2);

        assert_eq!(embedding.pattern_vertex(3), Some(0));
        assert_eq!(embedding.pattern_vertex(1), Some(1));
        assert_eq!(embedding.pattern_vertex(0), None);
        assert_eq!(embedding.pattern_edge(2), Some(0));
        assert_eq!(embedding.pattern_edge(0), None);
    }

    #[test]
    fn forward_extension_adds_a_vertex() {
        let root = Embedding::root(0, 3, 1, 2, 5, 4);
        let next = root.extend(1, 2, 1, 4, 3);

        assert_eq!(next.vertex_count(), 3);
        assert_eq!(next.edge_count(), 2);
        assert_eq!(next.host_vertex(2), 4);
        assert_eq!(next.pattern_vertex(4), Some(2));
        assert_eq!(next.pattern_edge(3), Some(1));

        // the parent stays untouched
        assert_eq!(root.vertex_count(), 2);
        assert_eq!(root.pattern_vertex(4), None);
    }

    #[test]
    fn backward_extension_only_adds_an_edge() {
        let embedding = Embedding::root(0, 0, 1, 0, 3, 3)
            .extend(1, 2, 1, 2, 1)
            .extend(2, 0, 2, 0, 2);

        assert_eq!(embedding.vertex_count(), 3);
        assert_eq!(embedding.edge_count(), 3);
        assert_eq!(embedding.pattern_edge(2), Some(2));
    }

    #[test]
    fn automorphism_ignores_orientation() {
        // the same host edge covered from either endpoint
        let left = Embedding::root(0, 0, 1, 0, 2, 1);
        let right = Embedding::root(0, 1, 0, 0, 2, 1);
        assert!(left.is_automorphic(&right));

        let other_graph = Embedding::root(1, 0, 1, 0, 2, 1);
        assert!(!left.is_automorphic(&other_graph));
    }

    #[test]
    fn groups_follow_discovery_order() {
        let mut set = EmbeddingSet::default();
        set.insert(Embedding::root(0, 0, 1, 0, 3, 2));
        set.insert(Embedding::root(0, 1, 0, 0, 3, 2));
        set.insert(Embedding::root(0, 1, 2, 1, 3, 2));

        assert_eq!(set.len(), 3);
        assert_eq!(set.group_count(), 2);

        let reps = set.representatives().collect::<Vec<_>>();
        assert_eq!(reps[0].host_vertex(0), 0);
        assert_eq!(reps[1].host_vertex(0), 1);
        assert_eq!(reps[1].host_edge(0), 1);

        let sizes = set
            .groups()
            .map(|group| group.count())
            .collect::<Vec<_>>();
        assert_eq!(sizes, vec![2, 1]);
    }
}
