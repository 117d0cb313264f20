use std::collections::HashMap;
use std::fmt::Display;
use std::io::Read;

use atoi::FromRadix10;
use linereader::LineReader;

use crate::graph::{Graph, GraphBuilder, Incidence};
use crate::Error;

/// Interns label strings into dense integers and resolves them back for
/// output.
#[derive(Debug, Default)]
pub struct LabelTable {
    indexes: HashMap<String, usize>,
    names: Vec<String>,
}

impl LabelTable {
    pub fn intern(&mut self, name: &str) -> usize {
        match self.indexes.get(name) {
            Some(&label) => label,
            None => {
                let label = self.names.len();
                self.indexes.insert(name.to_string(), label);
                self.names.push(name.to_string());
                label
            }
        }
    }

    pub fn resolve(&self, label: usize) -> &str {
        &self.names[label]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// The parsed input: the graphs plus the two label tables shared by all of
/// them.
#[derive(Debug)]
pub struct Collection {
    pub graphs: Vec<Graph>,
    pub vertex_labels: LabelTable,
    pub edge_labels: LabelTable,
}

impl Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let vertices: usize = self.graphs.iter().map(|g| g.vertex_count()).sum();
        let edges: usize = self.graphs.iter().map(|g| g.edge_count()).sum();
        write!(
            f,
            "Graphs: {}, |V|: {}, |E|: {}, |Σv|: {}, |Σe|: {}",
            self.graphs.len(),
            vertices,
            edges,
            self.vertex_labels.len(),
            self.edge_labels.len()
        )
    }
}

/// Reads the EGF format.
///
/// `t <graph_id>` opens a graph, `v <vertex_id> <label>` appends a vertex,
/// `e <edge_id> <src> <dst> <label>` appends an edge, `#` starts a comment.
/// Labels run to the end of the line and are interned. Vertex and edge ids
/// must arrive dense and sorted.
pub fn read_egf<R: Read>(input: R) -> Result<Collection, Error> {
    let mut lines = LineReader::new(input);
    let mut reader = Reader::new();
    let mut line_no = 0;

    while let Some(line) = lines.next_line() {
        let line = trim(line?);
        line_no += 1;
        if line.is_empty() {
            continue;
        }
        match line[0] {
            b'#' => continue,
            b't' => {
                let (id, _) = field(&line[1..], line_no)?;
                reader.open(id);
            }
            b'v' => {
                let (vertex, rest) = field(&line[1..], line_no)?;
                let label = rest_label(rest, line_no)?;
                reader.add_vertex(line_no, vertex, label)?;
            }
            b'e' => {
                let (edge, rest) = field(&line[1..], line_no)?;
                let (source, rest) = field(rest, line_no)?;
                let (target, rest) = field(rest, line_no)?;
                let label = rest_label(rest, line_no)?;
                reader.add_edge(line_no, Some(edge), source, target, label)?;
            }
            _ => {
                return Err(Error::Malformed {
                    line: line_no,
                    reason: "unknown record type",
                })
            }
        }
    }

    Ok(reader.finish())
}

/// Reads the legacy TGF format: `t # <graph_id>`, `v <vertex_id> <label>`,
/// `e <src> <dst> <label>` with integer labels and implicit edge ids.
pub fn read_tgf<R: Read>(input: R) -> Result<Collection, Error> {
    let mut lines = LineReader::new(input);
    let mut reader = Reader::new();
    let mut line_no = 0;

    while let Some(line) = lines.next_line() {
        let line = trim(line?);
        line_no += 1;
        if line.is_empty() {
            continue;
        }
        match line[0] {
            b't' => {
                let rest = skip_space(&line[1..]);
                if rest.first() != Some(&b'#') {
                    return Err(Error::Malformed {
                        line: line_no,
                        reason: "expected `t # <graph_id>`",
                    });
                }
                let (id, _) = field(&rest[1..], line_no)?;
                reader.open(id);
            }
            b'v' => {
                let (vertex, rest) = field(&line[1..], line_no)?;
                let label = rest_label(rest, line_no)?;
                reader.add_vertex(line_no, vertex, label)?;
            }
            b'e' => {
                let (source, rest) = field(&line[1..], line_no)?;
                let (target, rest) = field(rest, line_no)?;
                let label = rest_label(rest, line_no)?;
                reader.add_edge(line_no, None, source, target, label)?;
            }
            _ => {
                return Err(Error::Malformed {
                    line: line_no,
                    reason: "unknown record type",
                })
            }
        }
    }

    Ok(reader.finish())
}

struct Reader {
    graphs: Vec<Graph>,
    current: Option<GraphBuilder>,
    vertex_labels: LabelTable,
    edge_labels: LabelTable,
}

impl Reader {
    fn new() -> Self {
        Reader {
            graphs: Vec::new(),
            current: None,
            vertex_labels: LabelTable::default(),
            edge_labels: LabelTable::default(),
        }
    }

    fn open(&mut self, id: usize) {
        if let Some(builder) = self.current.replace(GraphBuilder::new(id)) {
            self.graphs.push(builder.build());
        }
    }

    fn builder(&mut self, line: usize) -> Result<&mut GraphBuilder, Error> {
        self.current.as_mut().ok_or(Error::Malformed {
            line,
            reason: "record before the first `t` line",
        })
    }

    fn add_vertex(&mut self, line: usize, vertex: usize, label: &str) -> Result<(), Error> {
        let label = self.vertex_labels.intern(label);
        let builder = self.builder(line)?;
        if vertex != builder.vertex_count() {
            return Err(Error::Malformed {
                line,
                reason: "vertex ids must be dense and sorted",
            });
        }
        builder.add_vertex(label);
        Ok(())
    }

    fn add_edge(
        &mut self,
        line: usize,
        edge: Option<usize>,
        source: usize,
        target: usize,
        label: &str,
    ) -> Result<(), Error> {
        let label = self.edge_labels.intern(label);
        let builder = self.builder(line)?;
        if let Some(edge) = edge {
            if edge != builder.edge_count() {
                return Err(Error::Malformed {
                    line,
                    reason: "edge ids must be dense and sorted",
                });
            }
        }
        for vertex in [source, target] {
            if vertex >= builder.vertex_count() {
                return Err(Error::DanglingVertex { line, vertex });
            }
        }
        builder.add_edge(source, target, label);
        Ok(())
    }

    fn finish(mut self) -> Collection {
        if let Some(builder) = self.current.take() {
            self.graphs.push(builder.build());
        }
        Collection {
            graphs: self.graphs,
            vertex_labels: self.vertex_labels,
            edge_labels: self.edge_labels,
        }
    }
}

fn trim(mut line: &[u8]) -> &[u8] {
    while let [rest @ .., b'\n' | b'\r' | b' ' | b'\t'] = line {
        line = rest;
    }
    line
}

fn skip_space(mut line: &[u8]) -> &[u8] {
    while let [b' ' | b'\t', rest @ ..] = line {
        line = rest;
    }
    line
}

fn field(line: &[u8], line_no: usize) -> Result<(usize, &[u8]), Error> {
    let line = skip_space(line);
    let (value, used) = usize::from_radix_10(line);
    if used == 0 {
        return Err(Error::Malformed {
            line: line_no,
            reason: "expected a number",
        });
    }
    Ok((value, &line[used..]))
}

fn rest_label(line: &[u8], line_no: usize) -> Result<&str, Error> {
    let label = std::str::from_utf8(skip_space(line)).map_err(|_| Error::Malformed {
        line: line_no,
        reason: "label is not valid UTF-8",
    })?;
    if label.is_empty() {
        return Err(Error::Malformed {
            line: line_no,
            reason: "missing label",
        });
    }
    Ok(label)
}
