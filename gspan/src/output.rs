use std::io::{self, Write};

use crate::embedding::{Embedding, PatternEmbeddings};
use crate::graph::Incidence;
use crate::input::Collection;
use crate::pattern::Pattern;

/// How much of the embedding information accompanies each written pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingMode {
    /// Patterns only.
    None,
    /// One occurrence line per automorphism class.
    Groups,
    /// One occurrence line per embedding.
    All,
}

/// Serialises reported patterns back into the EGF vocabulary.
///
/// Each pattern becomes a `t # <serial> * <support>` block with `v` and `e`
/// lines in DFS-code order; labels are resolved through the collection's
/// tables. Depending on the mode, `m` lines list the host vertices of the
/// occurrences, prefixed with the id of the containing graph.
pub struct PatternWriter<W> {
    out: W,
    mode: EmbeddingMode,
    serial: usize,
}

impl<W: Write> PatternWriter<W> {
    pub fn new(out: W, mode: EmbeddingMode) -> Self {
        PatternWriter {
            out,
            mode,
            serial: 0,
        }
    }

    /// The number of patterns written so far.
    pub fn written(&self) -> usize {
        self.serial
    }

    pub fn write(
        &mut self,
        pattern: &Pattern<usize, usize>,
        embeddings: &PatternEmbeddings,
        support: usize,
        collection: &Collection,
    ) -> io::Result<()> {
        writeln!(self.out, "t # {} * {}", self.serial, support)?;
        self.serial += 1;

        let mut labels = vec![0; pattern.vertex_count()];
        for edge in pattern.edges() {
            labels[edge.code.src] = edge.code.src_label;
            labels[edge.code.dst] = edge.code.dst_label;
        }
        for (vertex, &label) in labels.iter().enumerate() {
            writeln!(
                self.out,
                "v {} {}",
                vertex,
                collection.vertex_labels.resolve(label)
            )?;
        }
        for code in pattern.codes() {
            writeln!(
                self.out,
                "e {} {} {}",
                code.src,
                code.dst,
                collection.edge_labels.resolve(code.edge_label)
            )?;
        }

        match self.mode {
            EmbeddingMode::None => {}
            EmbeddingMode::Groups => {
                for (&graph_id, set) in embeddings {
                    for embedding in set.representatives() {
                        self.occurrence(graph_id, embedding, collection)?;
                    }
                }
            }
            EmbeddingMode::All => {
                for (&graph_id, set) in embeddings {
                    for embedding in set.all() {
                        self.occurrence(graph_id, embedding, collection)?;
                    }
                }
            }
        }

        writeln!(self.out)
    }

    fn occurrence(
        &mut self,
        graph_id: usize,
        embedding: &Embedding,
        collection: &Collection,
    ) -> io::Result<()> {
        write!(self.out, "m {}", collection.graphs[graph_id].id())?;
        for vertex in 0..embedding.vertex_count() {
            write!(self.out, " {}", embedding.host_vertex(vertex))?;
        }
        writeln!(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::PatternEmbeddings;
    use crate::input::read_egf;
    use crate::mine::{Miner, SupportMode};
    use crate::Graph;
    use trim_margin::MarginTrimmable;

    fn mine_to_string(input: &str, min_support: usize, mode: EmbeddingMode) -> String {
        let collection = read_egf(input.trim_margin().unwrap().as_bytes()).unwrap();
        let mut out = Vec::new();
        let mut writer = PatternWriter::new(&mut out, mode);
        Miner::new(
            &collection.graphs,
            min_support,
            SupportMode::ManyGraphs,
            |g: &Graph, v| g.vertex_label(v),
            |g: &Graph, e| g.edge_label(e),
            |pattern: &Pattern<usize, usize>, embeddings: &PatternEmbeddings, support: usize| {
                writer
                    .write(pattern, embeddings, support, &collection)
                    .unwrap()
            },
        )
        .run();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn writes_pattern_blocks() {
        let output = mine_to_string(
            "
            |t 3
            |v 0 A
            |v 1 B
            |e 0 0 1 x
            |t 4
            |v 0 A
            |v 1 B
            |e 0 0 1 x
            |",
            2,
            EmbeddingMode::None,
        );

        let expected = "
            |t # 0 * 2
            |v 0 A
            |v 1 B
            |e 0 1 x
            |
            |"
        .trim_margin()
        .unwrap();

        assert_eq!(output, expected);
    }

    #[test]
    fn writes_occurrences_per_group() {
        let output = mine_to_string(
            "
            |t 3
            |v 0 A
            |v 1 B
            |e 0 0 1 x
            |t 4
            |v 0 B
            |v 1 A
            |e 0 0 1 x
            |",
            2,
            EmbeddingMode::Groups,
        );

        let expected = "
            |t # 0 * 2
            |v 0 A
            |v 1 B
            |e 0 1 x
            |m 3 0 1
            |m 4 1 0
            |
            |"
        .trim_margin()
        .unwrap();

        assert_eq!(output, expected);
    }
}
