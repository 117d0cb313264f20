use std::collections::HashSet;
use std::fmt::Display;

/// One edge incident to a vertex, oriented away from it.
///
/// `source` is always the vertex the edge was asked for; for an undirected
/// edge stored as `(u, v)`, asking `u` yields `u -> v` and asking `v` yields
/// `v -> u`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutEdge {
    pub edge: usize,
    pub source: usize,
    pub target: usize,
}

/// Undirected graph topology with dense vertex and edge indices.
///
/// Implemented by the input graph and by mined patterns, which allows the
/// minimality check to re-run the extension machinery with a pattern acting
/// as its own host graph.
pub trait Incidence {
    type OutEdges<'a>: Iterator<Item = OutEdge>
    where
        Self: 'a;

    fn vertex_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    /// All edges incident to `vertex`, oriented away from it.
    fn out_edges(&self, vertex: usize) -> Self::OutEdges<'_>;
}

/// A labelled undirected input graph.
///
/// Vertices and edges are identified by dense indices in `[0, N)` and carry
/// small-integer labels. The adjacency lists are laid out in CSR fashion,
/// with each undirected edge appearing in the list of both endpoints.
#[derive(Debug)]
pub struct Graph {
    id: usize,
    vertex_labels: Box<[usize]>,
    edge_labels: Box<[usize]>,
    endpoints: Box<[(usize, usize)]>,
    offsets: Box<[usize]>,
    adjacency: Box<[(usize, usize)]>,
}

impl Graph {
    /// The opaque identifier carried over from the input, used only in output.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn vertex_label(&self, vertex: usize) -> usize {
        self.vertex_labels[vertex]
    }

    pub fn edge_label(&self, edge: usize) -> usize {
        self.edge_labels[edge]
    }

    pub fn endpoints(&self, edge: usize) -> (usize, usize) {
        self.endpoints[edge]
    }

    pub fn degree(&self, vertex: usize) -> usize {
        self.offsets[vertex + 1] - self.offsets[vertex]
    }

    pub fn max_degree(&self) -> usize {
        (0..self.vertex_count())
            .map(|v| self.degree(v))
            .max()
            .unwrap_or(0)
    }

    pub fn vertex_label_count(&self) -> usize {
        self.vertex_labels.iter().collect::<HashSet<_>>().len()
    }

    pub fn edge_label_count(&self) -> usize {
        self.edge_labels.iter().collect::<HashSet<_>>().len()
    }
}

impl Incidence for Graph {
    type OutEdges<'a> = Neighbors<'a>;

    fn vertex_count(&self) -> usize {
        self.vertex_labels.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_labels.len()
    }

    fn out_edges(&self, vertex: usize) -> Neighbors<'_> {
        let from = self.offsets[vertex];
        let to = self.offsets[vertex + 1];
        Neighbors {
            source: vertex,
            inner: self.adjacency[from..to].iter(),
        }
    }
}

pub struct Neighbors<'a> {
    source: usize,
    inner: std::slice::Iter<'a, (usize, usize)>,
}

impl Iterator for Neighbors<'_> {
    type Item = OutEdge;

    fn next(&mut self) -> Option<OutEdge> {
        let &(edge, target) = self.inner.next()?;
        Some(OutEdge {
            edge,
            source: self.source,
            target,
        })
    }
}

impl Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "|V|: {}, |E|: {}, |Σv|: {}, |Σe|: {}\nMax Degree: {}",
            self.vertex_count(),
            self.edge_count(),
            self.vertex_label_count(),
            self.edge_label_count(),
            self.max_degree()
        )
    }
}

/// Incrementally assembles a [`Graph`].
///
/// Callers must add vertices before referencing them from edges; the input
/// readers turn violations into parse errors, the builder itself only
/// asserts in debug builds.
pub struct GraphBuilder {
    id: usize,
    vertex_labels: Vec<usize>,
    edges: Vec<(usize, usize, usize)>,
}

impl GraphBuilder {
    pub fn new(id: usize) -> Self {
        GraphBuilder {
            id,
            vertex_labels: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_labels.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn add_vertex(&mut self, label: usize) -> usize {
        self.vertex_labels.push(label);
        self.vertex_labels.len() - 1
    }

    pub fn add_edge(&mut self, source: usize, target: usize, label: usize) -> usize {
        debug_assert!(source < self.vertex_labels.len());
        debug_assert!(target < self.vertex_labels.len());
        self.edges.push((source, target, label));
        self.edges.len() - 1
    }

    pub fn build(self) -> Graph {
        let GraphBuilder {
            id,
            vertex_labels,
            edges,
        } = self;

        let vertex_count = vertex_labels.len();

        let mut degrees = vec![0_usize; vertex_count];
        for &(source, target, _) in &edges {
            degrees[source] += 1;
            degrees[target] += 1;
        }

        let mut offsets = Vec::with_capacity(vertex_count + 1);
        offsets.push(0);
        for vertex in 0..vertex_count {
            offsets.push(offsets[vertex] + degrees[vertex]);
        }

        // next insert position per vertex
        let mut cursor = offsets.clone();
        let mut adjacency = vec![(0_usize, 0_usize); edges.len() * 2];
        let mut edge_labels = Vec::with_capacity(edges.len());
        let mut endpoints = Vec::with_capacity(edges.len());

        for (edge, &(source, target, label)) in edges.iter().enumerate() {
            adjacency[cursor[source]] = (edge, target);
            cursor[source] += 1;
            adjacency[cursor[target]] = (edge, source);
            cursor[target] += 1;
            edge_labels.push(label);
            endpoints.push((source, target));
        }

        Graph {
            id,
            vertex_labels: vertex_labels.into_boxed_slice(),
            edge_labels: edge_labels.into_boxed_slice(),
            endpoints: endpoints.into_boxed_slice(),
            offsets: offsets.into_boxed_slice(),
            adjacency: adjacency.into_boxed_slice(),
        }
    }
}
